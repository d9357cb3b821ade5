#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn is_black(self) -> bool {
        self == Self::BLACK
    }

    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_channels(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

/// How a computed channel value becomes an integer before storage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round to nearest, ties to even.
    Nearest,
    /// Drop the fractional part (toward zero).
    #[default]
    Truncate,
}

/// What happens to integer channel values outside 0..=255.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChannelPolicy {
    #[default]
    Clamp,
    /// Modulo 256, the way a bare 8-bit store would behave.
    Wrap,
}

/// Converts one computed channel into its stored byte.
pub fn quantize(v: f64, rounding: RoundingMode, policy: ChannelPolicy) -> u8 {
    let v = if v.is_finite() { v } else { 0.0 };
    let i = match rounding {
        RoundingMode::Nearest => v.round_ties_even(),
        RoundingMode::Truncate => v.trunc(),
    };
    match policy {
        ChannelPolicy::Clamp => i.clamp(0.0, 255.0) as u8,
        ChannelPolicy::Wrap => i.rem_euclid(256.0) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn truncate_goes_toward_zero() {
        assert_eq!(quantize(16.9, RoundingMode::Truncate, ChannelPolicy::Clamp), 16);
        assert_eq!(quantize(-0.7, RoundingMode::Truncate, ChannelPolicy::Clamp), 0);
        assert_eq!(quantize(-0.7, RoundingMode::Truncate, ChannelPolicy::Wrap), 0);
    }

    #[test]
    fn nearest_rounds_half_to_even() {
        assert_eq!(quantize(2.5, RoundingMode::Nearest, ChannelPolicy::Clamp), 2);
        assert_eq!(quantize(3.5, RoundingMode::Nearest, ChannelPolicy::Clamp), 4);
        assert_eq!(quantize(16.67, RoundingMode::Nearest, ChannelPolicy::Clamp), 17);
    }

    #[test]
    fn clamp_saturates_out_of_range() {
        assert_eq!(quantize(300.2, RoundingMode::Truncate, ChannelPolicy::Clamp), 255);
        assert_eq!(quantize(-40.0, RoundingMode::Nearest, ChannelPolicy::Clamp), 0);
    }

    #[test]
    fn wrap_is_modulo_256() {
        assert_eq!(quantize(256.0, RoundingMode::Truncate, ChannelPolicy::Wrap), 0);
        assert_eq!(quantize(300.9, RoundingMode::Truncate, ChannelPolicy::Wrap), 44);
        assert_eq!(quantize(-1.0, RoundingMode::Nearest, ChannelPolicy::Wrap), 255);
    }

    #[test]
    fn non_finite_maps_to_zero() {
        assert_eq!(quantize(f64::NAN, RoundingMode::Nearest, ChannelPolicy::Clamp), 0);
        assert_eq!(quantize(f64::INFINITY, RoundingMode::Truncate, ChannelPolicy::Wrap), 0);
    }
}
