use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config_file::ComponentRequest;
use crate::error::{ResolverError, Result};
use crate::host::HostFacts;
use crate::types::Ensure;

/// netfx-resolve - plan idempotent .NET Framework install/remove actions
#[derive(Parser)]
#[command(name = "netfx-resolve")]
#[command(about = "Resolve a desired .NET Framework state into guarded, ordered actions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a request and print the planned actions
    Resolve(ResolveArgs),
    /// Validate a request file
    Validate {
        /// Path to request file to validate
        config: PathBuf,
    },
    /// Print which hosts each version supports and how
    Support {
        /// Only show this framework version
        #[arg(long)]
        version: Option<String>,
    },
}

/// Output rendering for `resolve`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plan summary
    #[default]
    Summary,
    /// Rendered executor descriptors as JSON
    Json,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Request file to resolve; flags below override its fields
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Logical component name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Framework version (e.g. 3.5, 4.0)
    #[arg(short = 'V', long = "framework-version")]
    pub version: Option<String>,

    /// Desired state (present or absent)
    #[arg(short, long)]
    pub ensure: Option<Ensure>,

    /// OS display name as reported by the host (e.g. "Windows 7")
    #[arg(long)]
    pub os: Option<String>,

    /// OS version string (informational)
    #[arg(long)]
    pub os_version: Option<String>,

    /// Directory holding a pre-staged installer; skips the download
    #[arg(short, long)]
    pub package_dir: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    pub format: OutputFormat,
}

impl ResolveArgs {
    /// Build the request from the optional file plus flag overrides.
    pub fn to_request(&self) -> Result<ComponentRequest> {
        let mut request = match &self.config {
            Some(path) => ComponentRequest::load_from_file(path)
                .map_err(|e| ResolverError::config(format!("{:#}", e)))?,
            None => {
                let version = self
                    .version
                    .clone()
                    .ok_or_else(|| ResolverError::config("--framework-version is required without --config"))?;
                let os = self
                    .os
                    .clone()
                    .ok_or_else(|| ResolverError::config("--os is required without --config"))?;
                ComponentRequest::new("dotnet", version, HostFacts::new(os))
            }
        };

        if let Some(name) = &self.name {
            request.name = name.clone();
        }
        if let Some(version) = &self.version {
            request.version = version.clone();
        }
        if let Some(ensure) = self.ensure {
            request.ensure = ensure;
        }
        if let Some(os) = &self.os {
            request.host.os_name = os.clone();
        }
        if let Some(os_version) = &self.os_version {
            request.host.os_version = Some(os_version.clone());
        }
        if let Some(dir) = &self.package_dir {
            request.package_dir = Some(dir.clone());
        }

        request.validate()?;
        Ok(request)
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
