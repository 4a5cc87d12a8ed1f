//! Evo Snake - a grid Snake game driven by people or by trained agents
//!
//! This library provides:
//! - Core game logic (game module)
//! - Sensor encoding, agent networks and fitness scoring (agent module)
//! - TUI rendering and input mapping (render, input modules)
//! - Execution modes: human, train, play (modes module)

pub mod agent;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
