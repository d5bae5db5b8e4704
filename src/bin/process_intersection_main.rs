use anyhow::{Context, Result};
use signal_timing::detection::{MockFrameSampler, ReportedCountProvider, VehicleCountProvider};
use signal_timing::global_variables::{CONFIG_PATH_ENV, TIMING_LOG_FILE};
use signal_timing::monitoring::log_intersection_report;
use signal_timing::shared_data::IntersectionRequest;
use signal_timing::{process_intersection, SignalConfig};
use std::io::Read;

fn load_config() -> Result<SignalConfig> {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => SignalConfig::from_json_file(&path)
            .with_context(|| format!("load signal config from {}", path)),
        Err(_) => Ok(SignalConfig::default()),
    }
}

fn read_request(path: Option<&String>) -> Result<IntersectionRequest> {
    let raw = match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("read request {}", path))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read request from stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("parse intersection request")
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let use_mock = args.iter().any(|a| a == "--mock");
    let request_path = args.iter().find(|a| !a.starts_with("--"));

    let config = load_config()?;
    let request = read_request(request_path)?;

    let mut provider: Box<dyn VehicleCountProvider> = if use_mock {
        log::info!("Using mock frame sampler for vehicle detection");
        Box::new(MockFrameSampler::with_thread_rng())
    } else {
        Box::new(ReportedCountProvider)
    };

    let report = process_intersection(&request, provider.as_mut(), &config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Err(e) = log_intersection_report(TIMING_LOG_FILE, &report) {
        log::warn!("Error logging signal timings: {}", e);
    }
    Ok(())
}
