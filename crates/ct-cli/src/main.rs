// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `ct-scan`: headless driver for the CT scan simulator.
//!
//! Runs complete scans against the saved (or overridden) scene, samples single
//! rays, exports sinograms and manages saved preferences.
//!
//! # Usage
//! ```text
//! ct-scan run --speed 10 --density 5 --output sino.png --format png
//! ct-scan sample --angle 90 --detector 0.5
//! ct-scan prefs save --speed 12
//! ```
// The CLI is expected to print to stdout.
#![allow(clippy::print_stdout)]

mod cli;
mod export;

use anyhow::{Context, Result};
use clap::Parser;
use comfy_table::Table;
use ct_app_core::config::ConfigService;
use ct_app_core::config_port::ConfigPort;
use ct_app_core::prefs::ScanPrefs;
use ct_config_fs::FsConfigStore;
use ct_scan_core::{
    detected_signal_pct, dispatch, sample_attenuation, tick, SimulationContext, TickInput,
};
use image::ImageFormat;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, ExportFormat, PrefsAction, RunArgs, SampleArgs, SliderArgs};
use crate::export::CanvasPort;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = if cli.no_prefs { None } else { open_config(&cli) };
    let prefs = config
        .as_ref()
        .and_then(ConfigPort::load_prefs)
        .unwrap_or_default();

    match cli.command {
        Command::Run(args) => run_scan(&prefs, &args),
        Command::Sample(args) => sample(&prefs, &args),
        Command::Prefs { action } => match action {
            PrefsAction::Show => {
                println!("{}", serde_json::to_string_pretty(&prefs)?);
                Ok(())
            }
            PrefsAction::Save(overrides) => {
                let config = config.context("no preference store (--no-prefs or unavailable)")?;
                let merged = apply_sliders(prefs, overrides);
                config.save_scan_prefs(&merged).context("save prefs")?;
                println!("{}", serde_json::to_string_pretty(&merged)?);
                Ok(())
            }
        },
    }
}

fn open_config(cli: &Cli) -> Option<ConfigService<FsConfigStore>> {
    let store = match &cli.config_dir {
        Some(dir) => FsConfigStore::at(dir),
        None => FsConfigStore::new(),
    };
    match store {
        Ok(store) => {
            debug!(dir = %store.base().display(), "config store");
            Some(ConfigService::new(store))
        }
        Err(err) => {
            warn!(%err, "config store unavailable; using defaults");
            None
        }
    }
}

fn apply_sliders(mut prefs: ScanPrefs, sliders: SliderArgs) -> ScanPrefs {
    if let Some(speed) = sliders.speed {
        prefs.scan_speed = speed;
    }
    if let Some(density) = sliders.density {
        prefs.density = density;
    }
    prefs
}

fn run_scan(prefs: &ScanPrefs, args: &RunArgs) -> Result<()> {
    anyhow::ensure!(
        args.dt.is_finite() && args.dt > 0.0,
        "--dt must be a positive number of seconds"
    );
    let prefs = apply_sliders(prefs.clone(), args.sliders);
    anyhow::ensure!(prefs.scan_speed > 0, "scan speed must be positive");
    let objects = prefs.object_model().context("scene from prefs")?;
    let input = TickInput {
        dt_sec: args.dt,
        scan_speed: prefs.scan_speed,
        density: prefs.density,
    };

    let mut ctx = SimulationContext::new();
    let mut port = CanvasPort::new();
    dispatch(&ctx.start_scan(), &mut port);
    info!(speed = prefs.scan_speed, density = prefs.density, dt = args.dt, "running scan");

    let mut ticks = 0usize;
    while ctx.state().is_scanning && ticks < args.max_ticks {
        let events = tick(&mut ctx, &objects, input);
        dispatch(&events, &mut port);
        ticks += 1;
    }
    if !port.completed {
        warn!(ticks, angle = ctx.state().current_angle_deg, "scan stopped before completing");
    }

    let written: Vec<&[f64]> = ctx
        .sinogram()
        .rows()
        .filter(|r| r.iter().any(|&v| v > 0.0))
        .collect();
    #[allow(clippy::cast_precision_loss)]
    let mean_row = if written.is_empty() {
        0.0
    } else {
        written
            .iter()
            .map(|r| r.iter().sum::<f64>() / r.len() as f64)
            .sum::<f64>()
            / written.len() as f64
    };

    let st = ctx.state();
    let mut table = Table::new();
    table.set_header(vec!["metric", "value"]);
    table.add_row(vec!["ticks".to_string(), ticks.to_string()]);
    table.add_row(vec!["completed".to_string(), port.completed.to_string()]);
    table.add_row(vec!["projections".to_string(), st.projection_count.to_string()]);
    table.add_row(vec!["rows painted".to_string(), port.rows_painted.to_string()]);
    table.add_row(vec!["log entries".to_string(), ctx.log().len().to_string()]);
    table.add_row(vec!["elapsed (s)".to_string(), format!("{:.3}", st.elapsed_time_sec)]);
    table.add_row(vec!["progress (%)".to_string(), format!("{:.1}", st.scan_progress_pct)]);
    table.add_row(vec!["mean row attenuation".to_string(), format!("{mean_row:.4}")]);
    if let Some(t) = &port.telemetry {
        table.add_row(vec!["detected signal (%)".to_string(), t.detected_signal_pct.to_string()]);
    }
    println!("{table}");

    if args.show_log {
        let mut log = Table::new();
        log.set_header(vec!["angle (°)", "avg attenuation", "detected signal (%)"]);
        for s in ctx.log().samples() {
            log.add_row(vec![
                format!("{:.2}", s.angle_deg),
                format!("{:.4}", s.avg_attenuation),
                format!("{:.0}", detected_signal_pct(s.avg_attenuation)),
            ]);
        }
        println!("{log}");
    }

    if let Some(path) = &args.output {
        match args.format {
            ExportFormat::Json => export::write_json(path, &ctx, prefs.scan_speed, prefs.density)?,
            ExportFormat::Png => export::write_image(path, &port.pixels, ImageFormat::Png)?,
            ExportFormat::Pgm => export::write_image(path, &port.pixels, ImageFormat::Pnm)?,
        }
    }
    Ok(())
}

fn sample(prefs: &ScanPrefs, args: &SampleArgs) -> Result<()> {
    anyhow::ensure!(
        (0.0..=1.0).contains(&args.detector),
        "--detector must lie in [0, 1]"
    );
    let objects = prefs.object_model().context("scene from prefs")?;
    let density = args.density.unwrap_or(prefs.density);
    let a = sample_attenuation(args.angle, args.detector, &objects.shapes(), density);
    println!("{a:.6}");
    Ok(())
}
