//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::controller::Tunables;

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "encore")]
#[command(about = "A state-managed HTTP service for countdown-gated playback continuation")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20561")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Countdown length in seconds once a continuation arms
    #[arg(short, long, default_value = "5")]
    pub countdown: u64,

    /// Seconds from the end at which the next-episode countdown arms
    #[arg(long, default_value = "2")]
    pub arm_window: f64,

    /// Seconds from the end at which the affordance is always shown
    #[arg(long, default_value = "30")]
    pub display_window: f64,

    /// Fraction of playback past which the affordance shows on hover
    #[arg(long, default_value = "0.9")]
    pub hover_ratio: f64,

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

    /// Threshold set consumed by the controllers.
    ///
    /// The display window, arm window and countdown length are independent
    /// knobs on purpose; no single rule relates them.
    pub fn tunables(&self) -> Tunables {
        Tunables {
            display_window_secs: self.display_window,
            hover_ratio: self.hover_ratio,
            arm_window_secs: self.arm_window,
            countdown_secs: self.countdown,
        }
    }
}
