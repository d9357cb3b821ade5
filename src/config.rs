use crate::color::{ChannelPolicy, RoundingMode};
use crate::diffusion::ScanMode;
use crate::error::ConfigError;
use crate::oscillator::OscillatorParams;

pub const DEFAULT_WIDTH: usize = 540;
pub const DEFAULT_HEIGHT: usize = 405;
pub const DEFAULT_STATIC_DENSITY: f64 = 0.01;

/// Static seeding retries on collision, so density has to stay well clear of
/// a full grid.
pub const MAX_STATIC_DENSITY: f64 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub width: usize,
    pub height: usize,
    pub static_density: f64,
    pub seed: u64,
    pub oscillator: OscillatorParams,
    pub preserve_statics: bool,
    pub rounding: RoundingMode,
    pub channels: ChannelPolicy,
    pub scan: ScanMode,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            static_density: DEFAULT_STATIC_DENSITY,
            seed: 0xC0FFEE_u64,
            oscillator: OscillatorParams::default(),
            preserve_statics: true,
            rounding: RoundingMode::Truncate,
            channels: ChannelPolicy::Clamp,
            scan: ScanMode::DoubleBuffered,
        }
    }
}

impl FieldConfig {
    pub fn sized(width: usize, height: usize, static_density: f64, seed: u64) -> Self {
        Self {
            width,
            height,
            static_density,
            seed,
            ..Self::default()
        }
    }

    /// Every violated constraint, in field order.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();

        if self.width == 0 {
            errors.push(ConfigError::new("width", "0", "must be positive"));
        }
        if self.height == 0 {
            errors.push(ConfigError::new("height", "0", "must be positive"));
        }

        let d = self.static_density;
        if !d.is_finite() || !(0.0..MAX_STATIC_DENSITY).contains(&d) {
            errors.push(ConfigError::new(
                "static_density",
                d.to_string(),
                format!("must be in [0, {MAX_STATIC_DENSITY})"),
            ));
        }

        let osc = &self.oscillator;
        if !osc.max_cycle_time.is_finite() || osc.max_cycle_time <= 0.0 {
            errors.push(ConfigError::new(
                "max_cycle_time",
                osc.max_cycle_time.to_string(),
                "must be a positive number of seconds",
            ));
        }
        if !osc.hold_duration.is_finite() || osc.hold_duration < 0.0 {
            errors.push(ConfigError::new(
                "hold_duration",
                osc.hold_duration.to_string(),
                "must be zero or more seconds",
            ));
        }
        if !osc.climax_threshold.is_finite() || osc.climax_threshold < 0.0 {
            errors.push(ConfigError::new(
                "climax_threshold",
                osc.climax_threshold.to_string(),
                "must be zero or more",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn fields(cfg: &FieldConfig) -> Vec<&'static str> {
        cfg.validate()
            .err()
            .unwrap_or_default()
            .into_iter()
            .map(|e| e.field)
            .collect()
    }

    #[test]
    fn defaults_are_valid() {
        let cfg = FieldConfig::default();
        assert_eq!(cfg.validate(), Ok(()));
        assert_eq!((cfg.width, cfg.height), (540, 405));
        assert_eq!(cfg.oscillator.max_cycle_time, 80.0);
        assert_eq!(cfg.oscillator.hold_duration, 20.0);
        assert!(cfg.preserve_statics);
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(fields(&FieldConfig::sized(0, 10, 0.01, 1)), vec!["width"]);
        assert_eq!(
            fields(&FieldConfig::sized(0, 0, 0.01, 1)),
            vec!["width", "height"]
        );
    }

    #[test]
    fn rejects_bad_density() {
        for d in [-0.1, 0.5, 1.0, 2.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                fields(&FieldConfig::sized(10, 10, d, 1)),
                vec!["static_density"],
                "density {d}"
            );
        }
        assert!(FieldConfig::sized(10, 10, 0.0, 1).validate().is_ok());
        assert!(FieldConfig::sized(10, 10, 0.49, 1).validate().is_ok());
    }

    #[test]
    fn rejects_bad_timing() {
        let mut cfg = FieldConfig::default();
        cfg.oscillator.max_cycle_time = 0.0;
        cfg.oscillator.hold_duration = -1.0;
        cfg.oscillator.climax_threshold = f64::NAN;
        assert_eq!(
            fields(&cfg),
            vec!["max_cycle_time", "hold_duration", "climax_threshold"]
        );
    }

    #[test]
    fn error_display_names_field() {
        let errs = FieldConfig::sized(4, 4, 1.0, 0).validate().unwrap_err();
        assert_eq!(errs[0].to_string(), "static_density=1 (must be in [0, 0.5))");
    }
}
