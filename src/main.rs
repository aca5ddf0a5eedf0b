// Tue Jan 13 2026 - Alex

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use sec_protocol_locator::{
    config::Config,
    memory::StaticRegionMap,
    orchestration::{Protocol, ProtocolFinder, Protocols, ResolvedProtocols, ScanCounts},
    utils::{format_bytes, logging},
};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Locates the scheduler and DT operations structures of a firmware core image", long_about = None)]
struct Args {
    /// Raw memory dump holding the firmware volume.
    #[arg(short, long)]
    dump: PathBuf,

    /// JSON platform config: GUIDs, region map, candidates.
    #[arg(short, long)]
    config: PathBuf,

    /// Overrides `output_file` from the config.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Exit with an error when a protocol is not found.
    #[arg(long)]
    strict: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    dump: &'a Path,
    resolved: ResolvedProtocols,
    stats: ScanCounts,
}

fn main() {
    let args = Args::parse();
    logging::init_logger(args.verbose as usize);

    if let Err(e) = run(&args) {
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let start_time = Instant::now();

    let config = Config::load(&args.config)
        .with_context(|| format!("Failed to load config {}", args.config.display()))?;
    config.validate()?;

    println!("{} Loading dump: {}", "[*]".blue(), args.dump.display());
    let map = StaticRegionMap::open(&args.dump, config.regions.clone())
        .with_context(|| format!("Failed to map {}", args.dump.display()))?;
    println!(
        "{} Dump mapped: {}, {} regions",
        "[+]".green(),
        format_bytes(map.dump_size() as u64),
        map.regions().len()
    );

    let finder = ProtocolFinder::from_config(Arc::new(map), &config)?;
    let resolved = finder.resolve_protocols(Protocols::all());

    for protocol in Protocol::ALL {
        match resolved.get(protocol) {
            Some(address) => println!("{} {}: {}", "[+]".green(), protocol, address.to_string().cyan()),
            None => println!("{} {}: {}", "[!]".yellow(), protocol, "not found".yellow()),
        }
    }

    let report = Report {
        dump: &args.dump,
        resolved,
        stats: finder.stats(),
    };

    if let Some(path) = args.output.as_ref().or(config.output_file.as_ref()) {
        save_report(&report, path).with_context(|| format!("Failed to save report {}", path.display()))?;
        println!("{} Report saved to: {}", "[+]".green(), path.display());
    }

    println!("{} Done in {:.2}ms", "[+]".green(), start_time.elapsed().as_secs_f64() * 1000.0);

    if args.strict {
        finder.resolve_strict(Protocols::all())?;
    }

    Ok(())
}

fn save_report(report: &Report<'_>, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
