use crate::config::env::EnvOverrides;
use crate::config::toml_config::{BackendKind, TomlConfig};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "homecare.toml";

#[derive(Debug, Clone, Parser)]
#[command(name = "homecare-stats")]
#[command(about = "Families-served counter and testimonials for the home-care website")]
pub struct CliConfig {
    /// Path to TOML configuration file (defaults to ./homecare.toml when present)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Storage backend, overrides the config file and HOMECARE_BACKEND
    #[arg(long, value_enum)]
    pub backend: Option<BackendKind>,

    /// Directory for the local backend's JSON documents
    #[arg(long)]
    pub data_dir: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the raw stats record
    Stats,
    /// Show the statistics banner
    Display {
        #[arg(long)]
        json: bool,
    },
    /// Add one family to the families-served counter
    Increment,
    /// Restore the default stats record
    Reset,
    /// Confirm a care request (increments the counter on every call)
    Confirm {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// List or submit testimonials
    Testimonials {
        #[command(subcommand)]
        action: TestimonialCommand,
    },
    /// Create the stats record and example testimonials if missing
    Init,
    /// Print the statistics on a fixed interval until interrupted
    Watch {
        /// Seconds between polls, overrides poll.interval_seconds
        #[arg(long)]
        interval: Option<u64>,
        /// Stop after this many polls
        #[arg(long)]
        count: Option<usize>,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum TestimonialCommand {
    List {
        #[arg(long)]
        json: bool,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        relation: String,
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        text: String,
        #[arg(long, default_value = "")]
        service: String,
    },
}

impl CliConfig {
    /// Config file, then environment, then command-line flags; validated.
    pub fn load_settings(&self) -> Result<TomlConfig> {
        let mut settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                TomlConfig::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => TomlConfig::default(),
        };

        EnvOverrides::from_env().apply(&mut settings)?;
        self.apply_overrides(&mut settings);
        settings.validate()?;

        tracing::debug!("Resolved settings: {:?}", settings);
        Ok(settings)
    }

    pub fn apply_overrides(&self, settings: &mut TomlConfig) {
        if let Some(backend) = self.backend {
            settings.storage.backend = backend;
        }
        if let Some(data_dir) = &self.data_dir {
            settings.local.data_dir = data_dir.clone();
        }
    }
}
