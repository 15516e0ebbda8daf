//! # Flexure CLI
//!
//! Reads a JSON beam description, solves it and prints reactions and
//! extrema. `--output` writes the full JSON report; `--json` prints it to
//! stdout instead of the summary.
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (e.g. `RUST_LOG=flexure_core=debug`).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use flexure_core::calculations::analysis::BeamAnalysis;
use flexure_core::file_io::{load_input, save_report};
use flexure_core::report::AnalysisReport;
use flexure_core::settings::AnalysisSettings;
use flexure_core::FlexureResult;

#[derive(Debug, Parser)]
#[command(name = "flexure", version, about = "Shear force and bending moment analysis of a statically loaded beam")]
struct Args {
    /// Beam description (JSON)
    input: PathBuf,

    /// Write the full report to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of uniform sampling intervals (overrides the input file)
    #[arg(short, long)]
    resolution: Option<usize>,

    /// Print the report as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn run(args: &Args) -> FlexureResult<AnalysisReport> {
    let mut input = load_input(&args.input)?;
    if let Some(intervals) = args.resolution {
        let settings = input.settings.unwrap_or_default();
        input.settings = Some(AnalysisSettings {
            grid_intervals: intervals,
            ..settings
        });
    }

    let mut analysis = BeamAnalysis::from_input(&input)?;
    analysis.solve()?;
    let report = analysis.report()?;

    if let Some(path) = &args.output {
        save_report(&report, path)?;
        info!("report written to {}", path.display());
    }
    Ok(report)
}

fn print_summary(report: &AnalysisReport) {
    println!("═══════════════════════════════════════");
    println!("  BEAM ANALYSIS RESULTS");
    println!("═══════════════════════════════════════");
    println!();
    println!("Beam:");
    println!("  Length:     {:.3}", report.beam_length);
    println!("  Total load: {:.3}", report.total_load);
    println!();
    println!("Reactions:");
    for r in &report.reactions {
        let mut parts = Vec::new();
        if let Some(rx) = r.rx {
            parts.push(format!("Rx = {:.3}", rx));
        }
        if let Some(ry) = r.ry {
            parts.push(format!("Ry = {:.3}", ry));
        }
        if let Some(m) = r.m {
            parts.push(format!("M = {:.3}", m));
        }
        println!(
            "  {:<6} {:<7} at x = {:<8.3} {}",
            r.label,
            r.kind.display_name(),
            r.position,
            parts.join(", ")
        );
    }
    println!();
    let e = &report.extrema;
    println!("Extrema:");
    println!("  V_max = {:.3} at x = {:.3}", e.max_shear, e.max_shear_at);
    println!("  V_min = {:.3} at x = {:.3}", e.min_shear, e.min_shear_at);
    println!("  M_max = {:.3} at x = {:.3}", e.max_moment, e.max_moment_at);
    println!("  M_min = {:.3} at x = {:.3}", e.min_moment, e.min_moment_at);
    println!();
    println!(
        "{} shear samples, {} moment samples, {} critical points",
        report.diagram.shear.len(),
        report.diagram.moment.len(),
        report.diagram.critical_points.len()
    );
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(report) => {
            if args.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("could not serialize report: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print_summary(&report);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}
