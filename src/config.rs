//! Runtime configuration.

use std::{path::PathBuf, time::Duration};

use clap::Parser;

/// Delay before provisioning when `--debug` is set, giving an attached
/// debugger time to reconnect after a restart.
pub const DEBUG_STARTUP_DELAY: Duration = Duration::from_millis(1000);

#[derive(Clone, Debug, Parser)]
#[command(name = "vocab-market", version, about)]
pub struct Config {
    /// Vocabulary table (JSON object of id -> descriptor).
    #[arg(long, default_value = "public/vocab.json")]
    pub vocabulary: PathBuf,

    /// Directory model resources are resolved against.
    #[arg(long, default_value = "public")]
    pub assets_dir: PathBuf,

    /// Prefix of every pronunciation URI.
    #[arg(long, alias = "base-url", default_value = "public")]
    pub base_dir: String,

    /// Wait this long before loading assets.
    #[arg(long)]
    pub startup_delay_ms: Option<u64>,

    /// Wait for a debugger to reconnect before loading assets.
    #[arg(long)]
    pub debug: bool,
}

impl Config {
    pub fn startup_delay(&self) -> Option<Duration> {
        match (self.startup_delay_ms, self.debug) {
            (Some(ms), _) => Some(Duration::from_millis(ms)),
            (None, true) => Some(DEBUG_STARTUP_DELAY),
            (None, false) => None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vocabulary: PathBuf::from("public/vocab.json"),
            assets_dir: PathBuf::from("public"),
            base_dir: "public".to_string(),
            startup_delay_ms: None,
            debug: false,
        }
    }
}
