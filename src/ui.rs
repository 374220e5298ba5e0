use std::io::{self, Write};

use chrono::{Local, Timelike};
use crossterm::style::{Color, Stylize};

use crate::color::Rgb;
use crate::device::DeviceInfo;

const SAMPLE_GLYPH: &str = "#";
const RENDER_FAILED_GLYPH: &str = "!";

/// Liveness trace on the terminal: one colored glyph per sample, one line
/// per hour of the day.
pub struct Console<W: Write> {
    out: W,
    last_hour: Option<u32>,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_hour: None,
        }
    }

    pub fn banner(&mut self, info: &DeviceInfo, seconds_per_led: f64) -> io::Result<()> {
        writeln!(
            self.out,
            "WLED {}, {} LEDs, {}s per led",
            info.version, info.led_count, seconds_per_led
        )?;
        self.out.flush()
    }

    pub fn sample(&mut self, color: Rgb) -> io::Result<()> {
        self.sample_at(Local::now().hour(), color)
    }

    pub fn sample_at(&mut self, hour: u32, color: Rgb) -> io::Result<()> {
        if self.last_hour != Some(hour) {
            self.last_hour = Some(hour);
            write!(self.out, "\n{hour:2}: ")?;
        }
        let fg = Color::Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        };
        write!(self.out, "{}", SAMPLE_GLYPH.with(fg))?;
        self.out.flush()
    }

    pub fn render_failed(&mut self) -> io::Result<()> {
        write!(self.out, "{RENDER_FAILED_GLYPH}")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
