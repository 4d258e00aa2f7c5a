use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::constants::{ENV_CONFIG, ENV_FILTER_NAME, ENV_PRETTY};

#[derive(Parser)]
#[command(name = "erm-agreements")]
#[command(version, about = "Agreement content filter codec", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Filter name the content expression is stored under
    #[arg(long, short = 'f', global = true, env = ENV_FILTER_NAME)]
    pub filter_name: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true, env = ENV_PRETTY)]
    pub pretty: bool,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Decode a serialized content filter into filter rows (JSON)
    Decode {
        /// Serialized expression; none decodes to one empty row
        expressions: Vec<String>,
    },
    /// Encode filter rows (JSON array) into active filter state
    Encode {
        /// Read rows from a file instead of stdin
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Active filter state (JSON object) to merge the expression into
        #[arg(long, short)]
        active: Option<PathBuf>,
    },
    /// Print a serialized content filter in readable form
    Describe {
        /// Serialized expression
        expressions: Vec<String>,
    },
    /// List the content types and agreement line types
    Options,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub config: Option<PathBuf>,
    pub filter_name: Option<String>,
    pub pretty: bool,
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Commands) {
    let cli = Cli::parse();
    let config = CliConfig {
        config: cli.config,
        filter_name: cli.filter_name,
        pretty: cli.pretty,
    };
    (config, cli.command)
}
