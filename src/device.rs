//! The LED controller: a WLED device reached over its JSON HTTP API.

use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Rgb;
use crate::constants::{DEVICE_TIMEOUT, FULL_BRIGHTNESS, SEGMENT_ID};

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("LED device request failed: {0}")]
    Connection(#[from] reqwest::Error),
    #[error("LED device answered with HTTP {0}")]
    Status(u16),
    #[error("LED device reports no LEDs")]
    NoLeds,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub led_count: usize,
    pub version: String,
}

pub trait LedDevice {
    /// Read LED count and firmware version. Called once at startup.
    fn fetch_info(&mut self) -> Result<DeviceInfo, DeviceError>;

    /// Show `colors` on the strip, index 0 first.
    fn render_segment(&mut self, colors: &[Rgb]) -> Result<(), DeviceError>;
}

// Subset of /json/info
#[derive(Debug, Deserialize)]
struct InfoResponse {
    ver: String,
    leds: LedsInfo,
}

#[derive(Debug, Deserialize)]
struct LedsInfo {
    count: usize,
}

#[derive(Debug, Serialize)]
struct StateRequest<'a> {
    seg: [SegmentState<'a>; 1],
}

#[derive(Debug, Serialize)]
struct SegmentState<'a> {
    id: u8,
    on: bool,
    bri: u8,
    i: &'a [Rgb],
}

impl<'a> StateRequest<'a> {
    fn individual(colors: &'a [Rgb]) -> Self {
        Self {
            seg: [SegmentState {
                id: SEGMENT_ID,
                on: true,
                bri: FULL_BRIGHTNESS,
                i: colors,
            }],
        }
    }
}

pub struct WledClient {
    client: Client,
    base_url: String,
}

impl WledClient {
    /// `base_url` like `http://wled.local`, without trailing slash.
    pub fn new(base_url: impl Into<String>) -> Result<Self, DeviceError> {
        let client = Client::builder().timeout(DEVICE_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn check(response: Response) -> Result<Response, DeviceError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(DeviceError::Status(status.as_u16()))
        }
    }
}

impl LedDevice for WledClient {
    fn fetch_info(&mut self) -> Result<DeviceInfo, DeviceError> {
        let url = format!("{}/json/info", self.base_url);
        let info: InfoResponse = Self::check(self.client.get(url).send()?)?.json()?;
        if info.leds.count == 0 {
            return Err(DeviceError::NoLeds);
        }
        Ok(DeviceInfo {
            led_count: info.leds.count,
            version: info.ver,
        })
    }

    fn render_segment(&mut self, colors: &[Rgb]) -> Result<(), DeviceError> {
        let url = format!("{}/json/state", self.base_url);
        let body = StateRequest::individual(colors);
        Self::check(self.client.post(url).json(&body).send()?)?;
        Ok(())
    }
}
