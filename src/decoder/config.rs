//! Decoder settings with environment overrides.

use std::sync::OnceLock;

fn parse_env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

/// Knobs for calibration and sampling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Light border added around the raster before locating markers, in pixels
    pub quiet_zone_px: u32,
    /// Treat light pixels as dark (light-on-dark symbols)
    pub inverted: bool,
    /// Reject finder candidates taller than `height / max_finder_fraction`
    pub max_finder_fraction: u32,
    /// Rotate the raster to upright before sampling
    pub rotate: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            quiet_zone_px: 10,
            inverted: false,
            max_finder_fraction: 4,
            rotate: true,
        }
    }
}

impl DecoderConfig {
    /// Defaults overridden by `QR_QUIET_ZONE_PX`, `QR_INVERTED`, `QR_MAX_FINDER_FRACTION`
    /// and `QR_ROTATE`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            quiet_zone_px: parse_env_u32("QR_QUIET_ZONE_PX", defaults.quiet_zone_px),
            inverted: parse_env_bool_u8("QR_INVERTED", defaults.inverted),
            max_finder_fraction: parse_env_u32("QR_MAX_FINDER_FRACTION", defaults.max_finder_fraction)
                .max(1),
            rotate: parse_env_bool_u8("QR_ROTATE", defaults.rotate),
        }
    }

    /// Process-wide settings read from the environment once
    pub fn global() -> &'static DecoderConfig {
        static GLOBAL: OnceLock<DecoderConfig> = OnceLock::new();
        GLOBAL.get_or_init(Self::from_env)
    }

    /// Luma value of a dark pixel after binarization
    pub fn dark_value(&self) -> u8 {
        if self.inverted { 255 } else { 0 }
    }
}
