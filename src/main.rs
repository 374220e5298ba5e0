use std::error::Error;
use std::io::{self, Write};

use clap::Parser;
use log::info;

use wled_ping::ui::Console;
use wled_ping::{Args, Config, LedDevice, Monitor, PingCommand, Sampler, Shutdown, WledClient};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from(Args::parse());

    let mut device = WledClient::new(config.device_url())?;
    let info = device.fetch_info()?;

    let sampler = Sampler::new(PingCommand::new(config.probe_timeout_secs));
    let mut monitor = Monitor::new(
        device,
        sampler,
        info.led_count,
        config.window_minutes,
        config.host.clone(),
        config.max_ms,
    );
    let seconds_per_led = monitor.pacer().time_per_led().as_secs_f64();
    info!(
        "WLED {} at {}: {} LEDs, {:.3}s per LED, pinging {}",
        info.version,
        config.device_url(),
        info.led_count,
        seconds_per_led,
        config.host
    );

    if !config.quiet {
        let mut console: Console<Box<dyn Write>> = Console::new(Box::new(io::stdout()));
        console.banner(&info, seconds_per_led)?;
        monitor = monitor.with_console(console);
    }

    let shutdown = Shutdown::new();
    let handle = shutdown.clone();
    ctrlc::set_handler(move || handle.trigger())?;

    let iterations = monitor.run(&shutdown);
    println!();
    info!("stopped after {iterations} samples");
    Ok(())
}
