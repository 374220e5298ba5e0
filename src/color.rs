use serde::Serialize;

use crate::constants::{FAILED_COLOR, IDLE_COLOR, SATURATED_COLOR};
use crate::sampler::Sample;

/// One LED color, 8 bits per channel.
///
/// Serializes as `[r, g, b]`, the shape WLED expects for individual LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.r, self.g, self.b].serialize(serializer)
    }
}

/// Map a sample onto the green -> yellow log ramp.
///
/// Failed samples are red, anything at or below 1 ms is pure green and
/// anything above `max_ms` saturates to dark red. In between the red channel
/// follows `log10(ms) * 255 / log10(max_ms)`, truncated.
pub fn map_sample(sample: Sample, max_ms: u32) -> Rgb {
    let ms = match sample {
        Sample::Failed => return FAILED_COLOR,
        Sample::Millis(ms) => ms,
    };
    if ms <= 1 {
        return IDLE_COLOR;
    }
    if ms > max_ms {
        return SATURATED_COLOR;
    }

    let red = f64::from(ms).log10() * (255.0 / f64::from(max_ms).log10());
    Rgb::new(red.clamp(0.0, 255.0) as u8, 255, 0)
}

pub fn map_history<'a, I>(samples: I, max_ms: u32) -> Vec<Rgb>
where
    I: IntoIterator<Item = &'a Sample>,
{
    samples.into_iter().map(|s| map_sample(*s, max_ms)).collect()
}
