use std::collections::VecDeque;
use std::io::Write;
use std::time::Instant;

use log::{debug, warn};

use crate::color::{map_history, Rgb};
use crate::device::{DeviceError, LedDevice};
use crate::pacing::{Pacer, Shutdown};
use crate::probe::{ProbeParser, ProbeTransport};
use crate::sampler::{Sample, Sampler};
use crate::ui::Console;

/// Newest-first sample history, capped at the LED count.
#[derive(Debug, Clone)]
pub struct History {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push_front(sample);
        self.samples.truncate(self.capacity);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn newest(&self) -> Option<Sample> {
        self.samples.front().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn to_vec(&self) -> Vec<Sample> {
        self.samples.iter().copied().collect()
    }
}

/// What one loop iteration did.
#[derive(Debug)]
pub struct Step {
    pub sample: Sample,
    pub colors: Vec<Rgb>,
    pub render: Result<(), DeviceError>,
}

/// The sample -> history -> colors -> device loop.
pub struct Monitor<D, T, P> {
    device: D,
    sampler: Sampler<T, P>,
    history: History,
    pacer: Pacer,
    host: String,
    max_ms: u32,
    console: Option<Console<Box<dyn Write>>>,
}

impl<D, T, P> Monitor<D, T, P>
where
    D: LedDevice,
    T: ProbeTransport,
    P: ProbeParser,
{
    pub fn new(
        device: D,
        sampler: Sampler<T, P>,
        led_count: usize,
        window_minutes: u32,
        host: impl Into<String>,
        max_ms: u32,
    ) -> Self {
        Self {
            device,
            sampler,
            history: History::new(led_count),
            pacer: Pacer::new(window_minutes, led_count),
            host: host.into(),
            max_ms,
            console: None,
        }
    }

    pub fn with_console(mut self, console: Console<Box<dyn Write>>) -> Self {
        self.console = Some(console);
        self
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn pacer(&self) -> &Pacer {
        &self.pacer
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Sample, record, render. A render failure is reported, not raised;
    /// the history advances either way.
    pub fn step(&mut self) -> Step {
        let sample = self.sampler.sample(&self.host);
        self.history.push(sample);
        debug!("sample {sample}, history {}/{}", self.history.len(), self.history.capacity());

        let colors = map_history(self.history.iter(), self.max_ms);
        if let (Some(console), Some(newest)) = (self.console.as_mut(), colors.first()) {
            if let Err(e) = console.sample(*newest) {
                debug!("console write failed: {e}");
            }
        }

        let render = self.device.render_segment(&colors);
        if let Err(e) = &render {
            warn!("render skipped: {e}");
            if let Some(console) = self.console.as_mut() {
                if let Err(e) = console.render_failed() {
                    debug!("console write failed: {e}");
                }
            }
        }

        Step {
            sample,
            colors,
            render,
        }
    }

    /// Loop until `shutdown` fires. Returns the number of completed iterations.
    pub fn run(&mut self, shutdown: &Shutdown) -> u64 {
        let mut iterations = 0;
        while !shutdown.is_triggered() {
            let started = Instant::now();
            self.step();
            iterations += 1;
            if self.pacer.pace(started, shutdown) {
                break;
            }
        }
        iterations
    }
}
