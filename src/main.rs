//! Calltrace Studio CLI
//!
//! Inspects preprocessed call-trace files: headers, single functions with
//! their callers and callees, cost rankings, and full-file validation.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use calltrace_studio::analysis::SortKey;
use calltrace_studio::commands::{
    execute_function, execute_info, execute_top, execute_validate, FunctionArgs, TopArgs,
};
use calltrace_studio::format::CostUnit;
use calltrace_studio::utils::config::{DEFAULT_TOP_FUNCTIONS, REPORT_VERSION, SUPPORTED_VERSION};

/// Calltrace Studio - inspect preprocessed call-trace files
#[derive(Parser, Debug)]
#[command(name = "calltrace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Show format version, function count and headers
    Info {
        /// Trace file to inspect
        file: PathBuf,
    },

    /// Show one function with its callers and callees
    Function {
        /// Trace file to inspect
        file: PathBuf,

        /// Function number (index into the offset table)
        nr: usize,

        /// Unit for displayed costs
        #[arg(short, long, value_enum, default_value_t = CostUnit::Usec)]
        unit: CostUnit,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the most expensive functions
    Top {
        /// Trace file to inspect
        file: PathBuf,

        /// Number of functions to list
        #[arg(short, long, default_value_t = DEFAULT_TOP_FUNCTIONS)]
        limit: usize,

        /// Cost to rank by
        #[arg(short, long, value_enum, default_value_t = SortKey::Inclusive)]
        sort: SortKey,

        /// Unit for displayed costs
        #[arg(short, long, value_enum, default_value_t = CostUnit::Usec)]
        unit: CostUnit,

        /// Also write a JSON report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decode every record and check call edges
    Validate {
        /// Trace file to validate
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Info { file } => execute_info(&file)?,

        Commands::Function {
            file,
            nr,
            unit,
            json,
        } => execute_function(FunctionArgs {
            trace: file,
            function_nr: nr,
            unit,
            json,
        })?,

        Commands::Top {
            file,
            limit,
            sort,
            unit,
            output,
        } => execute_top(TopArgs {
            trace: file,
            limit,
            sort,
            unit,
            output,
        })?,

        Commands::Validate { file } => execute_validate(&file)?,

        Commands::Version => display_version(),
    }

    Ok(())
}

/// Display version information
fn display_version() {
    println!("Calltrace Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Trace format: v{}", SUPPORTED_VERSION);
    println!("Report schema: v{}", REPORT_VERSION);
}
