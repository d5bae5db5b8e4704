use anyhow::{bail, Context, Result};
use signal_timing::control_system::{tick_period, SignalCycle};
use signal_timing::shared_data::IntersectionReport;
use tokio::time::interval;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        bail!("Usage: {} <report.json> [speed]", args[0]);
    }
    let raw = std::fs::read_to_string(&args[1])
        .with_context(|| format!("read report {}", args[1]))?;
    let report: IntersectionReport = serde_json::from_str(&raw).context("parse report")?;
    let speed: f64 = match args.get(2) {
        Some(s) => s.parse().with_context(|| format!("invalid speed {:?}", s))?,
        None => 1.0,
    };
    if !(speed.is_finite() && speed > 0.0) {
        bail!("speed must be a positive number, got {}", speed);
    }

    let mut cycle = SignalCycle::new(report.intersection_data.timings);
    let cycle_time = cycle.cycle_time();
    println!(
        "Playing back {} signals, cycle {}s at {}x speed",
        cycle.timings.len(),
        cycle_time,
        speed
    );
    for timing in &cycle.timings {
        println!(
            "Signal {} ({}): green {}s, yellow {}s, red {}s, {:.0}% green",
            timing.lane_index + 1,
            timing.direction,
            timing.green,
            timing.yellow,
            timing.red,
            timing.green_ratio() * 100.0
        );
    }

    // One clock drives both the state and the printout.
    let mut ticker = interval(tick_period(speed));
    ticker.tick().await;
    for _ in 0..cycle_time {
        println!(
            "Signal {} {:?}, {}s remaining",
            cycle.current_signal + 1,
            cycle.light_for(cycle.current_signal),
            cycle.time_remaining()
        );
        ticker.tick().await;
        cycle.tick();
    }

    println!("Cycle complete");
    Ok(())
}
