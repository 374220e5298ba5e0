use std::fmt;

use log::{trace, warn};

use crate::probe::{PingOutputParser, ProbeEvent, ProbeParser, ProbeTransport};

/// Outcome of one probe burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    Millis(u32),
    /// Timeout, total loss, or nothing usable came back.
    Failed,
}

impl From<Option<u32>> for Sample {
    fn from(ms: Option<u32>) -> Self {
        ms.map_or(Sample::Failed, Sample::Millis)
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sample::Millis(ms) => write!(f, "{ms} ms"),
            Sample::Failed => f.write_str("failed"),
        }
    }
}

/// Reduce a burst to a single sample.
///
/// The first timeout or total-loss event fails the whole burst, even if other
/// probes replied. Otherwise the slowest reply wins; a burst without any reply
/// is failed as well.
pub fn reduce_burst<I>(events: I) -> Sample
where
    I: IntoIterator<Item = ProbeEvent>,
{
    let mut worst: Option<u32> = None;
    for event in events {
        match event {
            ProbeEvent::Timeout | ProbeEvent::TotalLoss => return Sample::Failed,
            ProbeEvent::Reply(ms) => worst = Some(worst.map_or(ms, |w| w.max(ms))),
            ProbeEvent::Other => {}
        }
    }
    worst.into()
}

/// Turns probe bursts into samples.
pub struct Sampler<T, P = PingOutputParser> {
    transport: T,
    parser: P,
}

impl<T: ProbeTransport> Sampler<T> {
    pub fn new(transport: T) -> Self {
        Self::with_parser(transport, PingOutputParser)
    }
}

impl<T: ProbeTransport, P: ProbeParser> Sampler<T, P> {
    pub fn with_parser(transport: T, parser: P) -> Self {
        Self { transport, parser }
    }

    /// Probe `host` once. Never fails: transport errors become [`Sample::Failed`].
    pub fn sample(&mut self, host: &str) -> Sample {
        let output = match self.transport.run_burst(host) {
            Ok(output) => output,
            Err(e) => {
                warn!("probe of {host} failed: {e}");
                return Sample::Failed;
            }
        };

        let parser = &self.parser;
        reduce_burst(output.lines().map(|line| {
            let event = parser.parse_line(line);
            if event == ProbeEvent::Other && !line.trim().is_empty() {
                trace!("ignoring probe line: {line}");
            }
            event
        }))
    }
}
