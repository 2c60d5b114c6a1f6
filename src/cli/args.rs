//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--json`: Machine-readable output

use clap::{Parser, Subcommand};

/// Microplate - inspect plate formats, well keys and random plate data
#[derive(Parser, Debug)]
#[command(name = "plate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the standard plate types
    #[command(
        name = "types",
        long_about = "List the standard plate types.\n\n\
            Shows each standard format with its descriptor, row count, column \
            count and number of wells.",
        after_help = "\
EXAMPLES:
    plate types
    plate types --json"
    )]
    Types,

    /// Resolve a plate type from dimensions or a name
    #[command(
        name = "describe",
        long_about = "Resolve a plate type from its dimensions or its name.\n\n\
            Dimensions that match a standard format resolve to that format; any \
            other dimensions give a custom plate. With no arguments, the configured \
            default plate is described.",
        after_help = "\
EXAMPLES:
    # 8 x 12 is the standard 96-well format
    plate describe --rows 8 --columns 12

    # Anything else is a custom plate
    plate describe --rows 7 --columns 13

    # Look a format up by name
    plate describe --type 384"
    )]
    Describe {
        /// Number of rows
        #[arg(long, requires = "columns", conflicts_with = "kind")]
        rows: Option<u32>,

        /// Number of columns
        #[arg(long, requires = "rows")]
        columns: Option<u32>,

        /// Plate type, e.g. "96" or "384-well"
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<String>,
    },

    /// Parse a list of well keys and print them in plate order
    #[command(
        name = "keys",
        long_about = "Parse a delimited list of well keys.\n\n\
            Keys are case-insensitive and may be padded with whitespace. Duplicates \
            are collapsed and the result is printed in row-major order, one \
            canonical key per line.",
        after_help = "\
EXAMPLES:
    plate keys \"h12, a1, B3\"
    plate keys \"A1;A2\" --delimiter \";\"

    # Warn about keys that fall outside a 96-well plate
    plate keys \"A1,Q30\" --type 96"
    )]
    Keys {
        /// The key list, e.g. "A1,B2,H12"
        list: String,

        /// Separator between keys (defaults to the configured delimiter)
        #[arg(short, long)]
        delimiter: Option<String>,

        /// Plate type to check the keys against
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<String>,
    },

    /// Generate a plate of random integer data
    #[command(
        name = "generate",
        long_about = "Generate a plate filled with random integer values.\n\n\
            Wells are placed at distinct random keys inside the plate. Use --seed \
            for reproducible output.",
        after_help = "\
EXAMPLES:
    # A full 96-well plate, one value per well
    plate generate --seed 1

    # Ten wells on a 384-well plate, shown as a grid
    plate generate --type 384 --wells 10 --grid

    # Three values per well between -5 and 5
    plate generate --type 6 --values 3 --min -5 --max 5"
    )]
    Generate {
        /// Plate type (defaults to the configured plate)
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<String>,

        /// Plate label
        #[arg(long, default_value = "Plate1")]
        label: String,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Values per well
        #[arg(long, default_value_t = 1)]
        values: usize,

        /// Smallest value
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        min: i32,

        /// Largest value
        #[arg(long, default_value_t = 100, allow_hyphen_values = true)]
        max: i32,

        /// Number of wells (defaults to every well on the plate)
        #[arg(long)]
        wells: Option<usize>,

        /// Show the plate as a grid of first values
        #[arg(long)]
        grid: bool,
    },

    /// Get, set, or list configuration values
    #[command(
        name = "config",
        long_about = "Get, set, or list configuration values.\n\n\
            Values come from the first config file found ($MICROPLATE_CONFIG, \
            $XDG_CONFIG_HOME/microplate/config.toml, ~/.microplate/config.toml), \
            with defaults for anything unset. `set` writes back to the file that \
            was loaded, or to ~/.microplate/config.toml if there was none.",
        after_help = "\
EXAMPLES:
    plate config list
    plate config get default_plate
    plate config set default_plate 384
    plate config set render.empty_cell -"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell.",
        after_help = "\
EXAMPLES:
    # Bash (add to ~/.bashrc)
    plate completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    plate completion zsh >> ~/.zshrc

    # Fish
    plate completion fish > ~/.config/fish/completions/plate.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// List all configuration values
    List,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
