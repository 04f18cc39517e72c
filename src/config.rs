use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Deadline re-armed before every wait for request bytes.
pub const DEFAULT_IDLE_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "filament", about = "Minimal HTTP/1.1 server over raw TCP")]
pub struct Args {
    /// Base directory for the /files/* routes. Without it every
    /// /files/* request answers 404.
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0:4221")]
    pub listen: String,
}

/// Runtime configuration shared by the listener and its connections.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub directory: Option<PathBuf>,
    pub idle_read_timeout: Duration,
}

impl Config {
    pub fn from_args(args: Args) -> Self {
        Self {
            listen_addr: args.listen,
            directory: args.directory,
            idle_read_timeout: DEFAULT_IDLE_READ_TIMEOUT,
        }
    }
}
