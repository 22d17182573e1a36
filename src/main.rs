//! Ashcraft - Command Line Interface
//!
//! This is the main entry point for the crafting calculator.
//! Run with `--help` to see all available options.

use clap::{ArgAction, Parser};
use std::error::Error;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use ashcraft::{
    data::{load_recipes, DEFAULT_DATA_FILE},
    display::display_report,
    search::choose_item,
    validate::validate_csv,
};

/// Command-line arguments for Ashcraft.
#[derive(Parser, Debug)]
#[command(name = "ashcraft")]
#[command(author, version, about = "Calculate required materials and costs for crafting items", long_about = None)]
struct Args {
    /// Name of the item to craft (a unique partial name is enough)
    item: Option<String>,

    /// Number of units to craft
    #[arg(short, long, default_value_t = 1)]
    quantity: u64,

    /// List all available items and exit
    #[arg(long)]
    list: bool,

    /// Check the recipe file for problems and exit
    #[arg(long)]
    validate: bool,

    /// Path to the recipes CSV file
    #[arg(short, long, env = "ASHCRAFT_DATA", default_value = DEFAULT_DATA_FILE)]
    data: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_validation(args: &Args) -> Result<(), Box<dyn Error>> {
    let file_name = args
        .data
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.data.display().to_string());

    let problems = match validate_csv(&args.data) {
        Ok(problems) => problems,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if problems.is_empty() {
        println!("{}: no problems found", file_name);
        return Ok(());
    }

    println!("Found {} problem row(s) in {}:", problems.len(), file_name);
    for problem in &problems {
        println!("{}", problem);
    }
    std::process::exit(1);
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.verbose);
    debug!(?args, "parsed arguments");

    if args.validate {
        return run_validation(&args);
    }

    // Load all data
    let catalog = match load_recipes(&args.data) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    info!(recipes = catalog.len(), path = %args.data.display(), "recipes loaded");

    if args.list {
        println!("Available items:");
        for name in catalog.items() {
            println!("  - {}", name);
        }
        return Ok(());
    }

    let Some(query) = args.item.as_deref() else {
        eprintln!("Error: you must provide an item name. Use --list to see available items.");
        std::process::exit(1);
    };

    let item = match choose_item(query, &catalog) {
        Ok(item) => item,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    info!(item = %item, quantity = args.quantity, "resolving requirements");

    if let Err(e) = display_report(&item, args.quantity, &catalog) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
