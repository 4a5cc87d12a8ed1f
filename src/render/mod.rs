pub mod renderer;

pub use renderer::{Hud, Palette, Renderer};
