//! Reachability probes: running a burst and reading its output line by line.
//!
//! The transport only produces text; deciding what a line means is left to a
//! [`ProbeParser`], so a different probing mechanism can be swapped in without
//! touching the reduction in [`crate::sampler`].

use std::io;
use std::process::{Command, Stdio};

use log::debug;
use thiserror::Error;

use crate::constants::PROBE_COUNT;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to run probe command `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("probe command `{0}` was terminated by a signal")]
    Signaled(String),
}

/// What a single line of probe output says about the burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeEvent {
    /// A reply with its round-trip time, truncated to whole milliseconds.
    Reply(u32),
    Timeout,
    TotalLoss,
    /// Anything else: headers, statistics, blank lines.
    Other,
}

pub trait ProbeParser {
    fn parse_line(&self, line: &str) -> ProbeEvent;
}

/// Runs one burst against `host` and returns its textual output.
pub trait ProbeTransport {
    fn run_burst(&mut self, host: &str) -> Result<String, ProbeError>;
}

/// Understands the output of the BSD and iputils `ping` utilities.
#[derive(Debug, Default, Clone, Copy)]
pub struct PingOutputParser;

impl ProbeParser for PingOutputParser {
    fn parse_line(&self, line: &str) -> ProbeEvent {
        if line.contains("Request timeout") {
            return ProbeEvent::Timeout;
        }
        if line.contains("100% packet loss") {
            return ProbeEvent::TotalLoss;
        }
        match parse_round_trip_ms(line) {
            Some(ms) => ProbeEvent::Reply(ms),
            None => ProbeEvent::Other,
        }
    }
}

/// Extract `N` from `time=N.fff ms` (or `time=N ms`), dropping the fraction.
fn parse_round_trip_ms(line: &str) -> Option<u32> {
    let (_, rest) = line.split_once("time=")?;
    let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if int_len == 0 {
        return None;
    }
    let (int_part, mut rest) = rest.split_at(int_len);

    if let Some(frac) = rest.strip_prefix('.') {
        let frac_len = frac.bytes().take_while(u8::is_ascii_digit).count();
        if frac_len == 0 {
            return None;
        }
        rest = &frac[frac_len..];
    }
    if !rest.trim_start().starts_with("ms") {
        return None;
    }
    int_part.parse().ok()
}

/// Shells out to the system `ping` utility.
#[derive(Debug, Clone)]
pub struct PingCommand {
    program: String,
    count: u32,
    deadline_secs: u32,
}

impl PingCommand {
    pub fn new(deadline_secs: u32) -> Self {
        Self {
            program: "ping".to_string(),
            count: PROBE_COUNT,
            deadline_secs,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn args(&self, host: &str) -> Vec<String> {
        // BSD ping spells the whole-run deadline `-t`, iputils uses `-w`.
        let deadline_flag = if cfg!(target_os = "macos") { "-t" } else { "-w" };
        vec![
            "-c".to_string(),
            self.count.to_string(),
            deadline_flag.to_string(),
            self.deadline_secs.to_string(),
            host.to_string(),
        ]
    }
}

impl ProbeTransport for PingCommand {
    fn run_burst(&mut self, host: &str) -> Result<String, ProbeError> {
        let output = Command::new(&self.program)
            .args(self.args(host))
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ProbeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // ping exits non-zero on partial loss; the output still counts.
        let Some(code) = output.status.code() else {
            return Err(ProbeError::Signaled(self.program.clone()));
        };
        if code != 0 {
            debug!(
                "{} {host} exited with {code}: {}",
                self.program,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
