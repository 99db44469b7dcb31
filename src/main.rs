//! netfx-resolve - main entry point
//!
//! Thin shell around the library: parses a request, resolves it and prints
//! the plan. Nothing here executes the planned actions.

use anyhow::{Context, Result};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use netfx_resolver::cli::{Cli, Commands, OutputFormat, ResolveArgs};
use netfx_resolver::host::SUPPORT_TABLE;
use netfx_resolver::render::{describe_plan, PowerShell};
use netfx_resolver::{resolve, ComponentRequest, Resolution};

/// Initialize logging to stderr, `RUST_LOG` overriding the `info` default
fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logger();

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed");

    let result = match cli.command {
        Commands::Resolve(args) => run_resolve(&args),
        Commands::Validate { config } => run_validate(&config),
        Commands::Support { version } => {
            run_support(version.as_deref());
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{:#}", e);
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

fn run_resolve(args: &ResolveArgs) -> Result<()> {
    let request = args.to_request()?;
    info!(component = %request.name, version = %request.version, host = %request.host, "resolving");

    let resolution = resolve(&request);

    match args.format {
        OutputFormat::Summary => match &resolution {
            Resolution::Planned(plan) => println!("{}", plan.summary()),
            Resolution::Skipped { reason } => {
                println!("Skipped {} {}: {}", request.name, request.version, reason)
            }
        },
        OutputFormat::Json => {
            let descriptors = resolution
                .plan()
                .map(|plan| describe_plan(plan, &PowerShell))
                .unwrap_or_default();
            let output = serde_json::json!({
                "resolution": &resolution,
                "actions": descriptors,
            });
            let text = serde_json::to_string_pretty(&output)
                .context("Failed to serialize resolution")?;
            println!("{}", text);
        }
    }

    Ok(())
}

fn run_validate(path: &std::path::Path) -> Result<()> {
    info!("Validating request file: {:?}", path);
    let request = ComponentRequest::load_from_file(path)?;
    request.validate()?;
    println!("✓ Request file is valid: {} {} ({})", request.name, request.version, request.ensure);
    Ok(())
}

fn run_support(version: Option<&str>) {
    for entry in SUPPORT_TABLE
        .iter()
        .filter(|e| version.is_none_or(|v| e.version == v.trim()))
    {
        println!("{:<6} {:<26} {}", entry.version, entry.os_name, entry.class);
    }
}
