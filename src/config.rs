use clap::Parser;

use crate::constants::{
    DEFAULT_HOST, DEFAULT_MAX_MS, DEFAULT_PROBE_TIMEOUT_SECS, DEFAULT_WINDOW_MINUTES,
};

#[derive(Parser, Debug)]
#[command(name = "wled-ping")]
#[command(version, about = "Show recent ping latency as a color gradient on a WLED strip")]
pub struct Args {
    /// WLED device address (host, IP or http:// URL)
    pub wled: String,

    /// Host to ping
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Latency in ms at the yellow end of the scale; slower is dark red
    #[arg(long, default_value_t = DEFAULT_MAX_MS, value_parser = clap::value_parser!(u32).range(2..))]
    pub max: u32,

    /// Minutes of history spread across the whole strip
    #[arg(long, default_value_t = DEFAULT_WINDOW_MINUTES, value_parser = clap::value_parser!(u32).range(1..))]
    pub timescale: u32,

    /// Deadline in seconds for one burst of pings
    #[arg(long, default_value_t = DEFAULT_PROBE_TIMEOUT_SECS, value_parser = clap::value_parser!(u32).range(1..))]
    pub probe_timeout: u32,

    /// Do not print the per-sample glyphs
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub device: String,
    pub host: String,
    pub max_ms: u32,
    pub window_minutes: u32,
    pub probe_timeout_secs: u32,
    pub quiet: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            device: args.wled,
            host: args.host,
            max_ms: args.max,
            window_minutes: args.timescale,
            probe_timeout_secs: args.probe_timeout,
            quiet: args.quiet,
        }
    }
}

impl Config {
    /// Base URL of the device's HTTP API, e.g. `http://wled.local`.
    pub fn device_url(&self) -> String {
        let addr = self.device.trim().trim_end_matches('/');
        if addr.starts_with("http://") || addr.starts_with("https://") {
            addr.to_string()
        } else {
            format!("http://{addr}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Config, clap::Error> {
        Args::try_parse_from(argv).map(Config::from)
    }

    #[test]
    fn defaults() {
        let cfg = parse(&["wled-ping", "wled.local"]).unwrap();
        assert_eq!(cfg.device, "wled.local");
        assert_eq!(cfg.host, "8.8.8.8");
        assert_eq!(cfg.max_ms, 2000);
        assert_eq!(cfg.window_minutes, 60);
        assert_eq!(cfg.probe_timeout_secs, 5);
        assert!(!cfg.quiet);
    }

    #[test]
    fn overrides() {
        let cfg = parse(&[
            "wled-ping",
            "--host",
            "1.1.1.1",
            "--max",
            "1000",
            "--timescale",
            "15",
            "-q",
            "192.168.1.40",
        ])
        .unwrap();
        assert_eq!(cfg.host, "1.1.1.1");
        assert_eq!(cfg.max_ms, 1000);
        assert_eq!(cfg.window_minutes, 15);
        assert!(cfg.quiet);
        assert_eq!(cfg.device, "192.168.1.40");
    }

    #[test]
    fn rejects_degenerate_values() {
        assert!(parse(&["wled-ping", "--max", "1", "wled"]).is_err());
        assert!(parse(&["wled-ping", "--timescale", "0", "wled"]).is_err());
        assert!(parse(&["wled-ping"]).is_err());
    }

    #[test]
    fn device_url_normalization() {
        let mut cfg = parse(&["wled-ping", "wled.local"]).unwrap();
        assert_eq!(cfg.device_url(), "http://wled.local");
        cfg.device = "http://10.0.0.7:8080/".to_string();
        assert_eq!(cfg.device_url(), "http://10.0.0.7:8080");
        cfg.device = "10.0.0.7".to_string();
        assert_eq!(cfg.device_url(), "http://10.0.0.7");
    }
}
