//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::{BreakConfig, TournamentStructure};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "blind-clock")]
#[command(about = "A state-managed HTTP server running a poker tournament blind clock")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Level duration in minutes (defaults to the standard structure's 15)
    #[arg(short, long)]
    pub level_minutes: Option<u32>,

    /// Take a break after this many levels
    #[arg(long)]
    pub break_every: Option<u32>,

    /// Break duration in minutes
    #[arg(long)]
    pub break_minutes: Option<u32>,

    /// Play straight through without breaks
    #[arg(long)]
    pub no_breaks: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// The standard structure with command line overrides applied
    pub fn structure(&self) -> TournamentStructure {
        let mut structure = TournamentStructure::standard();

        if let Some(minutes) = self.level_minutes {
            structure.level_duration = minutes.saturating_mul(60);
        }

        let defaults = structure.break_config;
        structure.break_config = BreakConfig {
            enabled: !self.no_breaks,
            frequency: self.break_every.unwrap_or(defaults.frequency),
            duration: self
                .break_minutes
                .map(|minutes| minutes.saturating_mul(60))
                .unwrap_or(defaults.duration),
        };

        structure
    }
}
