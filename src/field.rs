use crate::color::Rgb;
use crate::config::FieldConfig;
use crate::diffusion::{self, StepParams};
use crate::error::ConfigError;
use crate::grid::Grid;
use crate::oscillator::{Oscillator, Phase, Transition};
use crate::statics::{seed_grid, StaticPixels};
use log::{debug, info, warn};

/// Read-only view of a finished frame.
#[derive(Clone, Copy)]
pub struct GridView<'a> {
    grid: &'a Grid,
}

impl<'a> GridView<'a> {
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.grid.get(x, y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldStats {
    /// Per-channel mean over the whole grid.
    pub mean: [f64; 3],
    /// Pixels that are not pure black.
    pub lit: usize,
    pub saturation: f64,
    pub phase: Phase,
}

/// Owns the color grid, its static seeds and the saturation oscillator.
/// The host calls [`tick`](Self::tick) once per frame and then reads the
/// finished frame through [`current_buffer`](Self::current_buffer).
#[derive(Clone, Debug)]
pub struct DiffusionField {
    config: FieldConfig,
    front: Grid,
    back: Grid,
    statics: StaticPixels,
    oscillator: Oscillator,
    frames: u64,
}

impl DiffusionField {
    pub fn new(config: FieldConfig) -> Result<Self, ConfigError> {
        if let Err(mut errors) = config.validate() {
            return Err(errors.remove(0));
        }

        let (front, statics) = seed_grid(
            config.width,
            config.height,
            config.static_density,
            config.seed,
        );
        info!(
            "field {}x{} seeded with {} static pixels (seed {:#x})",
            config.width,
            config.height,
            statics.len(),
            config.seed
        );

        Ok(Self {
            back: Grid::new(config.width, config.height),
            front,
            statics,
            oscillator: Oscillator::new(config.oscillator),
            config,
            frames: 0,
        })
    }

    /// Field with default timing and update policies.
    pub fn initialize(
        width: usize,
        height: usize,
        static_density: f64,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::new(FieldConfig::sized(width, height, static_density, seed))
    }

    /// Advances the oscillator by `elapsed_seconds` and runs one diffusion
    /// step at the resulting saturation. Negative or non-finite deltas count
    /// as zero.
    pub fn tick(&mut self, elapsed_seconds: f64) {
        debug_assert!(
            elapsed_seconds.is_finite() && elapsed_seconds >= 0.0,
            "invalid frame delta {elapsed_seconds}"
        );
        let dt = if elapsed_seconds.is_finite() && elapsed_seconds >= 0.0 {
            elapsed_seconds
        } else {
            warn!("ignoring invalid frame delta {elapsed_seconds}");
            0.0
        };

        if let Some(t) = self.oscillator.advance(dt) {
            match t {
                Transition::ClimaxStarted => debug!(
                    "climax at t={:.2}s, holding for {:.1}s",
                    self.oscillator.elapsed(),
                    self.config.oscillator.hold_duration
                ),
                Transition::ClimaxEnded => {
                    debug!("climax hold over at t={:.2}s", self.oscillator.elapsed())
                }
                Transition::Rearmed => debug!(
                    "saturation {:.3} below zero, climax re-armed",
                    self.oscillator.saturation()
                ),
            }
        }

        self.step();
        self.frames += 1;
    }

    fn step(&mut self) {
        let p = StepParams {
            saturation: self.oscillator.saturation(),
            preserve_statics: self.config.preserve_statics,
            rounding: self.config.rounding,
            channels: self.config.channels,
        };
        diffusion::step(
            &mut self.front,
            &mut self.back,
            &self.statics,
            &p,
            self.config.scan,
        );
    }

    /// Row-major pixels of the last completed frame, `width * height` long.
    pub fn current_buffer(&self) -> &[Rgb] {
        self.front.cells()
    }

    pub fn snapshot(&self) -> GridView<'_> {
        GridView { grid: &self.front }
    }

    /// `[r, g, b, r, g, b, ...]` in row-major order.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.front.cells().iter().flat_map(|c| c.channels()).collect()
    }

    pub fn stats(&self) -> FieldStats {
        let cells = self.front.cells();
        let mut sum = [0u64; 3];
        let mut lit = 0usize;
        for c in cells {
            sum[0] += c.r as u64;
            sum[1] += c.g as u64;
            sum[2] += c.b as u64;
            if !c.is_black() {
                lit += 1;
            }
        }
        let n = cells.len().max(1) as f64;
        FieldStats {
            mean: sum.map(|s| s as f64 / n),
            lit,
            saturation: self.oscillator.saturation(),
            phase: self.oscillator.phase(),
        }
    }

    pub fn width(&self) -> usize {
        self.config.width
    }

    pub fn height(&self) -> usize {
        self.config.height
    }

    pub fn statics(&self) -> &StaticPixels {
        &self.statics
    }

    pub fn oscillator(&self) -> &Oscillator {
        &self.oscillator
    }

    /// Completed ticks since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
