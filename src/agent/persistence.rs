//! Export and import of trained policy networks
//!
//! A saved agent is two files next to each other. For `models/best.bin`:
//! - `models/best.mpk` - network weights (Burn named MessagePack record)
//! - `models/best.meta.json` - layer sizes and training information as JSON
//!
//! Whatever extension the given path carries is replaced, so `load_agent`
//! accepts the same path that was passed to `save_agent`.

use anyhow::{Context, Result};
use burn::{
    module::Module,
    record::{FullPrecisionSettings, NamedMpkFileRecorder, Recorder},
    tensor::backend::Backend,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{PolicyConfig, PolicyNetwork};

/// Metadata saved with the network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMetadata {
    /// Layer sizes needed to rebuild the network
    pub policy: PolicyConfig,

    /// Generation the agent was found in
    pub generation: usize,

    /// Fitness of the exported episode
    pub fitness: f32,

    /// Score of the exported episode
    pub score: u32,

    /// Version identifier for compatibility checking
    pub version: String,
}

impl AgentMetadata {
    pub fn new(policy: PolicyConfig, generation: usize, fitness: f32, score: u32) -> Self {
        Self {
            policy,
            generation,
            fitness,
            score,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Extension Burn's MessagePack recorder gives weight files
const WEIGHTS_EXTENSION: &str = "mpk";

/// File the network weights of an agent saved at `path` live in
pub fn weights_path(path: &Path) -> PathBuf {
    path.with_extension(WEIGHTS_EXTENSION)
}

/// File the metadata of an agent saved at `path` lives in
pub fn metadata_path(path: &Path) -> PathBuf {
    path.with_extension("meta.json")
}

/// Save a network and its metadata, creating parent directories as needed.
///
/// Returns the weights file that was written.
pub fn save_agent<B: Backend>(
    network: &PolicyNetwork<B>,
    metadata: &AgentMetadata,
    path: &Path,
) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    let weights = weights_path(path);
    let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
    recorder
        .record(network.clone().into_record(), weights.clone())
        .with_context(|| format!("Failed to save network weights to {:?}", weights))?;

    let meta_path = metadata_path(path);
    let meta_json =
        serde_json::to_string_pretty(metadata).context("Failed to serialize metadata")?;
    std::fs::write(&meta_path, meta_json)
        .with_context(|| format!("Failed to write metadata to {:?}", meta_path))?;

    tracing::info!(path = ?weights, score = metadata.score, "Saved agent");

    Ok(weights)
}

/// Load a network saved with [`save_agent`]
pub fn load_agent<B: Backend>(
    path: &Path,
    device: &B::Device,
) -> Result<(PolicyNetwork<B>, AgentMetadata)> {
    let meta_path = metadata_path(path);
    let meta_json = std::fs::read_to_string(&meta_path)
        .with_context(|| format!("Failed to read metadata from {:?}", meta_path))?;
    let metadata: AgentMetadata =
        serde_json::from_str(&meta_json).context("Failed to deserialize metadata")?;

    let network = metadata.policy.init::<B>(device);

    let weights = weights_path(path);
    let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
    let record = recorder
        .load(weights.clone(), device)
        .with_context(|| format!("Failed to load network weights from {:?}", weights))?;

    Ok((network.load_record(record), metadata))
}
