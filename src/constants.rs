use std::time::Duration;

use crate::color::Rgb;

pub const DEFAULT_HOST: &str = "8.8.8.8";
pub const DEFAULT_MAX_MS: u32 = 2000;
pub const DEFAULT_WINDOW_MINUTES: u32 = 60;
pub const DEFAULT_PROBE_TIMEOUT_SECS: u32 = 5;

// Probes per burst
pub const PROBE_COUNT: u32 = 4;

pub const DEVICE_TIMEOUT: Duration = Duration::from_secs(5);
pub const SEGMENT_ID: u8 = 0;
pub const FULL_BRIGHTNESS: u8 = 255;

pub const FAILED_COLOR: Rgb = Rgb { r: 255, g: 0, b: 0 };
pub const IDLE_COLOR: Rgb = Rgb { r: 0, g: 255, b: 0 };
pub const SATURATED_COLOR: Rgb = Rgb { r: 127, g: 0, b: 0 };
