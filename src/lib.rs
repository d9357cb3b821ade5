//! Diffusion-field color toy.
//!
//! A fixed grid of pixels is relaxed toward each pixel's neighbor mean every
//! frame, under a saturation coefficient that oscillates over time and
//! pauses at its peak. A few randomly seeded static pixels keep feeding color
//! into the field.

pub mod color;
pub mod config;
pub mod diffusion;
pub mod error;
pub mod field;
pub mod grid;
pub mod oscillator;
pub mod statics;

pub use color::{ChannelPolicy, Rgb, RoundingMode};
pub use config::FieldConfig;
pub use diffusion::ScanMode;
pub use error::ConfigError;
pub use field::{DiffusionField, FieldStats, GridView};
pub use oscillator::{Oscillator, OscillatorParams, Phase};
