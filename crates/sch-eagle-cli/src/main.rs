use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;

mod commands;
mod utils;

#[derive(Parser)]
#[command(name = "eagle2sch")]
#[command(about = "Convert EAGLE schematics to the native schematic format", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    import: ImportArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand that runs an import
#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// Accept files that do not start with the EAGLE XML prologue
    #[arg(long, global = true)]
    no_header_check: bool,

    /// First sheet stamp (defaults to the current UNIX time)
    #[arg(long, global = true, value_name = "N")]
    stamp_seed: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a summary of the converted schematic
    Info {
        /// EAGLE schematic to import
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the converted schematic as JSON
    Dump {
        /// EAGLE schematic to import
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Print the part library only
        #[arg(long)]
        library: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize color handling (respects NO_COLOR)
    utils::color::init_color();

    // Initialize logger with default level (overridden by RUST_LOG)
    let env = Env::default().default_filter_or("warn");
    env_logger::Builder::from_env(env).init();

    match cli.command {
        Commands::Info { file, format } => commands::info::execute(&file, &cli.import, format),
        Commands::Dump { file, library } => commands::dump::execute(&file, &cli.import, library),
    }
}
