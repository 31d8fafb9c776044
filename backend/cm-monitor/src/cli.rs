use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "conan-monitor")]
#[command(about = "Conan Exiles dedicated server monitor: log readiness, port gating, Discord status")]
#[command(version)]
pub struct Cli {
    /// Config file (default: $CM_CONFIG_PATH or ./config/config.json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override server.logs_directory
    #[arg(long, value_name = "DIR")]
    pub logs_dir: Option<String>,

    /// Load and validate the configuration, print a summary and exit
    #[arg(long)]
    pub check_config: bool,
}
