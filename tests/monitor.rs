//! Loop behavior against a scripted probe and an in-memory LED device.

use std::collections::VecDeque;

use wled_ping::probe::ProbeError;
use wled_ping::{
    map_sample, DeviceError, DeviceInfo, LedDevice, Monitor, ProbeTransport, Rgb, Sample, Sampler,
    Shutdown,
};

const UNREACHABLE: &str = "PING 10.9.9.9 (10.9.9.9): 56 data bytes\n\
                           Request timeout for icmp_seq 0\n\
                           Request timeout for icmp_seq 1\n\
                           Request timeout for icmp_seq 2\n\
                           \n\
                           --- 10.9.9.9 ping statistics ---\n\
                           4 packets transmitted, 0 packets received, 100.0% packet loss\n";

const REACHABLE_42: &str = "PING 10.9.9.9 (10.9.9.9): 56 data bytes\n\
                            64 bytes from 10.9.9.9: icmp_seq=0 ttl=64 time=21.117 ms\n\
                            64 bytes from 10.9.9.9: icmp_seq=1 ttl=64 time=42.870 ms\n\
                            64 bytes from 10.9.9.9: icmp_seq=2 ttl=64 time=30.004 ms\n\
                            64 bytes from 10.9.9.9: icmp_seq=3 ttl=64 time=18.550 ms\n";

const LINUX_LOSS: &str = "PING 10.9.9.9 (10.9.9.9) 56(84) bytes of data.\n\
                          \n\
                          --- 10.9.9.9 ping statistics ---\n\
                          4 packets transmitted, 0 received, 100% packet loss, time 3071ms\n";

/// Replays canned ping outputs, then keeps failing.
struct Script(VecDeque<&'static str>);

impl Script {
    fn new(outputs: &[&'static str]) -> Self {
        Self(outputs.iter().copied().collect())
    }
}

impl ProbeTransport for Script {
    fn run_burst(&mut self, _host: &str) -> Result<String, ProbeError> {
        Ok(self.0.pop_front().unwrap_or(UNREACHABLE).to_string())
    }
}

#[derive(Default)]
struct FakeStrip {
    leds: usize,
    frames: Vec<Vec<Rgb>>,
    fail_renders: VecDeque<bool>,
    stop_after: Option<(usize, Shutdown)>,
}

impl LedDevice for FakeStrip {
    fn fetch_info(&mut self) -> Result<DeviceInfo, DeviceError> {
        Ok(DeviceInfo {
            led_count: self.leds,
            version: "0.14.4".to_string(),
        })
    }

    fn render_segment(&mut self, colors: &[Rgb]) -> Result<(), DeviceError> {
        self.frames.push(colors.to_vec());
        if let Some((n, shutdown)) = &self.stop_after {
            if self.frames.len() >= *n {
                shutdown.trigger();
            }
        }
        if self.fail_renders.pop_front().unwrap_or(false) {
            return Err(DeviceError::Status(503));
        }
        Ok(())
    }
}

fn monitor(
    strip: FakeStrip,
    outputs: &[&'static str],
    window_minutes: u32,
    max_ms: u32,
) -> Monitor<FakeStrip, Script, wled_ping::PingOutputParser> {
    let mut strip = strip;
    let info = strip.fetch_info().unwrap();
    Monitor::new(
        strip,
        Sampler::new(Script::new(outputs)),
        info.led_count,
        window_minutes,
        "10.9.9.9",
        max_ms,
    )
}

#[test]
fn recovers_after_three_failures() {
    let strip = FakeStrip {
        leds: 4,
        ..Default::default()
    };
    let mut m = monitor(strip, &[UNREACHABLE, LINUX_LOSS, UNREACHABLE, REACHABLE_42], 60, 1000);

    for _ in 0..4 {
        m.step();
    }

    assert_eq!(
        m.history().to_vec(),
        [Sample::Millis(42), Sample::Failed, Sample::Failed, Sample::Failed]
    );

    let red = Rgb::new(255, 0, 0);
    let frame = m.device().frames.last().unwrap();
    assert_eq!(frame.len(), 4);
    assert_eq!(frame[0], map_sample(Sample::Millis(42), 1000));
    assert_eq!(frame[0], Rgb::new(137, 255, 0));
    assert_eq!(frame[1..], [red, red, red]);
}

#[test]
fn history_never_exceeds_led_count() {
    let strip = FakeStrip {
        leds: 3,
        ..Default::default()
    };
    let mut m = monitor(strip, &[REACHABLE_42; 5], 60, 2000);

    for expected in [1, 2, 3, 3, 3, 3, 3] {
        let step = m.step();
        assert_eq!(m.history().len(), expected);
        assert_eq!(step.colors.len(), expected);
    }
    // The script ran out after five bursts; the newest entries are failures.
    assert_eq!(m.history().newest(), Some(Sample::Failed));
    assert_eq!(
        m.history().to_vec(),
        [Sample::Failed, Sample::Failed, Sample::Millis(42)]
    );
}

#[test]
fn render_failure_does_not_stop_history() {
    let strip = FakeStrip {
        leds: 8,
        fail_renders: [false, true, false].into_iter().collect(),
        ..Default::default()
    };
    let mut m = monitor(strip, &[REACHABLE_42, REACHABLE_42, REACHABLE_42], 60, 1000);

    assert!(m.step().render.is_ok());
    let failed = m.step();
    assert!(matches!(failed.render, Err(DeviceError::Status(503))));
    assert_eq!(failed.sample, Sample::Millis(42));
    assert!(m.step().render.is_ok());

    assert_eq!(m.history().len(), 3);
    assert_eq!(m.device().frames.len(), 3);
}

#[test]
fn run_stops_on_shutdown() {
    let shutdown = Shutdown::new();
    let strip = FakeStrip {
        leds: 6000,
        stop_after: Some((3, shutdown.clone())),
        ..Default::default()
    };
    // One minute over 6000 LEDs: 10 ms per sample.
    let mut m = monitor(strip, &[REACHABLE_42; 3], 1, 1000);

    let iterations = m.run(&shutdown);

    assert_eq!(iterations, 3);
    assert_eq!(m.device().frames.len(), 3);
    assert_eq!(m.history().len(), 3);
}

#[test]
fn run_does_nothing_when_already_stopped() {
    let shutdown = Shutdown::new();
    shutdown.trigger();
    let strip = FakeStrip {
        leds: 10,
        ..Default::default()
    };
    let mut m = monitor(strip, &[], 60, 1000);

    assert_eq!(m.run(&shutdown), 0);
    assert!(m.history().is_empty());
}

#[test]
fn time_per_led_matches_window() {
    let strip = FakeStrip {
        leds: 120,
        ..Default::default()
    };
    let m = monitor(strip, &[], 60, 1000);
    assert_eq!(m.pacer().time_per_led().as_secs_f64(), 30.0);
}
