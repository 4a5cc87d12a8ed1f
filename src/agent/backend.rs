//! Backend type alias and device management
//!
//! Agents only run forward passes, so a plain CPU NdArray backend without
//! autodiff is all the game needs.

use burn::backend::ndarray::{NdArray, NdArrayDevice};

/// Backend used to run policy networks
pub type InferenceBackend = NdArray<f32>;

/// Get the default device for computation
pub fn default_device() -> NdArrayDevice {
    NdArrayDevice::default()
}
