//! VitalGuard - CLI entry point
//!
//! Drives one scripted scenario through the orchestrator and prints the
//! resulting episode. Thin wiring only.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::sync::Arc;
use std::time::Duration;
use vitalguard::cli::Args;
use vitalguard::config::Config;
use vitalguard::contacts::ContactStore;
use vitalguard::intel::GeminiIntelClient;
use vitalguard::location::{location_channel, LocationStreamError};
use vitalguard::orchestrator::{EmergencyOrchestrator, OrchestratorConfig};
use vitalguard::simulator::{demo_history, Scenario};
use vitalguard::types::Coordinates;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if config.intel.api_key.is_empty() {
        eprintln!(
            "{}",
            "Warning: no API key configured (set GEMINI_API_KEY); lookups will fail over to the manual-guidance fallback."
                .yellow()
        );
    }

    let intel = GeminiIntelClient::with_config(
        &config.intel.base_url,
        &config.intel.api_key,
        &config.intel.model,
        Duration::from_secs(config.intel.timeout_secs),
    )?;

    let mut orchestrator = EmergencyOrchestrator::new(
        Arc::new(intel),
        ContactStore::default_path()?,
        demo_history(),
        OrchestratorConfig {
            lookup_timeout: Duration::from_secs(config.intel.timeout_secs),
            verbose: args.verbose > 0,
        },
    );

    // Location source: a simulated push stream with one sample
    let (tx, mut rx) = location_channel();
    if args.no_gps {
        tx.send(Err(LocationStreamError::Unsupported)).await?;
    } else {
        let (latitude, longitude) = args.gps.unwrap_or((51.5074, -0.1278));
        tx.send(Ok(Coordinates {
            latitude,
            longitude,
        }))
        .await?;
    }
    drop(tx);
    while let Some(sample) = rx.recv().await {
        orchestrator.ingest_location_sample(sample).await;
    }

    if let Some(text) = &args.manual_location {
        orchestrator.set_manual_location(text).await;
    }

    println!(
        "{} scenario: {:?}",
        "VitalGuard Response".bold().blue(),
        args.scenario
    );

    let mut rng = rand::thread_rng();
    for frame in args.scenario.frames(&mut rng) {
        println!(
            "  HR {:>3} bpm  BP {:>3}/{:<3}  {}",
            frame.heart_rate,
            frame.systolic_bp,
            frame.diastolic_bp,
            if frame.is_responsive {
                "responsive".normal()
            } else {
                "UNRESPONSIVE".red().bold()
            }
        );
        orchestrator.ingest_vitals(frame).await;
        tokio::time::sleep(Duration::from_millis(250)).await;
    }

    let episode = orchestrator.episode();
    if episode.is_critical() {
        println!();
        println!("{}", "EMERGENCY PROTOCOL ACTIVE".red().bold());
        println!("{}", episode.status.status_message.red());
        if let Some(at) = episode.triggered_at {
            println!("Triggered at: {}", at.to_rfc3339());
        }
        println!();
        println!("{}", "Nearest A&E Hospital".bold());
        println!("{}", episode.hospital_info);
        for source in &episode.sources {
            println!("  [{:?}] {} - {}", source.kind, source.label, source.url);
        }
        println!();
        println!("{}", "EMS Handoff Report".bold());
        println!("{}", episode.report);
    } else {
        println!("\n{}", "No emergency detected.".green());
    }

    if args.scenario != Scenario::Stable {
        orchestrator.reset();
        println!("\nAlarm deactivated; vitals restored to baseline.");
    }

    if args.verbose > 0 {
        let stats = orchestrator.telemetry().get_stats();
        eprintln!(
            "[STATS] detections={} lookups={} ok={} failed={} resets={}",
            stats.critical_detections,
            stats.lookups_started,
            stats.lookups_succeeded,
            stats.lookups_failed,
            stats.episode_resets
        );
    }

    Ok(())
}
