//! Ambient latency monitor: pings a host and paints the recent history onto a
//! WLED strip, newest sample on the first LED.

pub mod app;
pub mod color;
pub mod config;
pub mod constants;
pub mod device;
pub mod pacing;
pub mod probe;
pub mod sampler;
pub mod ui;

pub use app::{History, Monitor, Step};
pub use color::{map_sample, Rgb};
pub use config::{Args, Config};
pub use device::{DeviceError, DeviceInfo, LedDevice, WledClient};
pub use pacing::{Pacer, Shutdown};
pub use probe::{PingCommand, PingOutputParser, ProbeEvent, ProbeParser, ProbeTransport};
pub use sampler::{reduce_burst, Sample, Sampler};
