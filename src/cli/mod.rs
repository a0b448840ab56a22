//! Command-line argument parsing for VitalGuard
//!
//! Thin wiring only; the scenario simulator and orchestrator hold the
//! behavior.

use crate::simulator::Scenario;
use clap::Parser;
use std::path::PathBuf;

/// VitalGuard - simulated vitals monitor with automated emergency response
#[derive(Parser, Debug)]
#[command(name = "vitalguard")]
#[command(version = "0.1.0")]
#[command(about = "Simulate a critical-vitals episode and orchestrate the response", long_about = None)]
pub struct Args {
    /// Emergency scenario to simulate
    #[arg(value_enum, default_value_t = Scenario::Tachycardia)]
    pub scenario: Scenario,

    /// Manual location text (fallback when there is no GPS fix)
    #[arg(short = 'l', long)]
    pub manual_location: Option<String>,

    /// Simulate a device without GPS (the location stream errors out)
    #[arg(long)]
    pub no_gps: bool,

    /// Simulated GPS fix as "lat,lng"
    #[arg(long, value_parser = parse_coords)]
    pub gps: Option<(f64, f64)>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path override
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

fn parse_coords(raw: &str) -> Result<(f64, f64), String> {
    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| "expected \"lat,lng\"".to_string())?;
    let lat: f64 = lat.trim().parse().map_err(|_| "invalid latitude".to_string())?;
    let lng: f64 = lng.trim().parse().map_err(|_| "invalid longitude".to_string())?;
    Ok((lat, lng))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coords() {
        assert_eq!(parse_coords("51.5, -0.12"), Ok((51.5, -0.12)));
        assert!(parse_coords("51.5").is_err());
        assert!(parse_coords("a,b").is_err());
    }

    #[test]
    fn test_default_scenario() {
        let args = Args::parse_from(["vitalguard"]);
        assert_eq!(args.scenario, Scenario::Tachycardia);
        assert!(!args.no_gps);
    }
}
