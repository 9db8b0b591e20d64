//! Biosig Monitor - Polls the acquisition pipeline and logs derived features
//!
//! Runs the acquisition loop against a simulated front-end for the signal
//! class given on the command line (emg, ecg, or eeg) and periodically logs
//! the latest raw sample, the class-specific feature, and a high/low
//! activity indication.

use anyhow::{bail, Result};
use biosig_acquisition::AcquisitionService;
use biosig_core::SignalClass;
use biosig_simulation::{SignalPattern, SimConfig, SimFrontend};
use tokio::time::{interval, Duration};

/// Raw level above which the signal is reported as active
const ACTIVITY_THRESHOLD: u16 = 700;

/// Poll period of the outer application loop
const POLL_INTERVAL_MS: u64 = 100;

fn parse_class(arg: &str) -> Result<SignalClass> {
    match arg.to_ascii_lowercase().as_str() {
        "emg" => Ok(SignalClass::Emg),
        "ecg" => Ok(SignalClass::Ecg),
        "eeg" => Ok(SignalClass::Eeg),
        other => bail!("unknown signal class '{}', expected emg, ecg, or eeg", other),
    }
}

fn pattern_for(class: SignalClass) -> SignalPattern {
    match class {
        SignalClass::Emg => SignalPattern::EmgBurst {
            amplitude: 150.0,
            on_secs: 1.0,
            off_secs: 1.0,
        },
        SignalClass::Ecg => SignalPattern::EcgTrain {
            bpm: 72.0,
            spike: 200.0,
        },
        SignalClass::Eeg => SignalPattern::AlphaWave {
            amplitude: 80.0,
            frequency: 10.0,
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let class = match std::env::args().nth(1) {
        Some(arg) => parse_class(&arg)?,
        None => SignalClass::Emg,
    };

    let sim = SimConfig {
        pattern: pattern_for(class),
        ..Default::default()
    };
    tracing::info!(class = %class, pattern = sim.pattern.description(), "starting monitor");

    let service = AcquisitionService::with_defaults(SimFrontend::new(sim)?)?;
    service.select_mode(class).await?;

    let mut ticker = interval(Duration::from_millis(POLL_INTERVAL_MS));
    loop {
        ticker.tick().await;

        let raw = service.latest_sample();
        let active = raw > ACTIVITY_THRESHOLD;
        match class {
            SignalClass::Emg => {
                tracing::info!(raw, envelope = service.envelope(), active, "emg");
            }
            SignalClass::Ecg => {
                tracing::info!(raw, bpm = service.heart_rate(), active, "ecg");
            }
            SignalClass::Eeg => {
                tracing::info!(raw, alpha = service.alpha_power(), active, "eeg");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_class() {
        assert_eq!(parse_class("EMG").unwrap(), SignalClass::Emg);
        assert_eq!(parse_class("ecg").unwrap(), SignalClass::Ecg);
        assert_eq!(parse_class("eeg").unwrap(), SignalClass::Eeg);
        assert!(parse_class("ekg").is_err());
    }
}
