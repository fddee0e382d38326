//! Stark CLI - Normalize, export and sort the character roster
//!
//! # Commands
//!
//! ```bash
//! stark                                   # Interactive menu (built-in roster)
//! stark --data roster.json menu           # Interactive menu on another roster
//! stark normalize roster.json -o out.json # Normalize a JSON roster
//! stark sort out.json --by peso --order desc
//! ```

use clap::{Parser, Subcommand};
use stark::files::json_file::{to_document, to_pretty_json};
use stark::logging::{init_logging, LogConfig, LogFormat};
use stark::{
    dataset, normalize_collection, read_json, sort_by_field, write_json, ExportError, Record,
    Session, SessionConfig, SessionError, SortOrder,
};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "stark")]
#[command(about = "Normalize, export and sort a roster of character records", long_about = None)]
struct Cli {
    /// CSV file written and read by the menu
    #[arg(long, global = true, default_value = stark::config::DEFAULT_CSV_PATH)]
    csv: PathBuf,

    /// JSON file written and read by the menu
    #[arg(long, global = true, default_value = stark::config::DEFAULT_JSON_PATH)]
    json: PathBuf,

    /// Key holding the list inside JSON files
    #[arg(long, global = true, default_value = stark::config::DEFAULT_LIST_KEY)]
    list_key: String,

    /// Seed roster (JSON, list under --list-key). Defaults to the built-in roster
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default)
    Menu,

    /// Normalize a JSON roster
    Normalize {
        /// Input JSON file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Sort a JSON roster by one field
    Sort {
        /// Input JSON file
        input: PathBuf,

        /// Field to sort by
        #[arg(long)]
        by: String,

        /// asc or desc
        #[arg(long, default_value = "asc")]
        order: SortOrder,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_config = LogConfig::from_verbosity(cli.verbose).with_format(cli.log_format);
    if let Err(e) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    let config = SessionConfig::default()
        .with_csv_path(&cli.csv)
        .with_json_path(&cli.json)
        .with_list_key(&cli.list_key);

    let result = match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => cmd_menu(cli.data.as_deref(), config),
        Commands::Normalize { input, output } => {
            cmd_normalize(&input, output.as_deref(), &config.list_key)
        }
        Commands::Sort {
            input,
            by,
            order,
            output,
        } => cmd_sort(&input, &by, order, output.as_deref(), &config.list_key),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_menu(data: Option<&Path>, config: SessionConfig) -> Result<(), SessionError> {
    let roster = dataset::load(data, &config.list_key)?;
    tracing::info!(records = roster.len(), "loaded roster");

    let mut session = Session::new(roster, config);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    session.run(&mut input, &mut output)
}

fn cmd_normalize(input: &Path, output: Option<&Path>, list_key: &str) -> Result<(), SessionError> {
    let mut roster = read_json(input, list_key)?;
    let summary = normalize_collection(&mut roster);
    eprintln!(
        "Normalized {} records: {} fields sanitized, {} rejected, {} missing",
        summary.records, summary.sanitized, summary.rejected, summary.missing
    );
    write_roster(&roster, output, list_key)
}

fn cmd_sort(
    input: &Path,
    field: &str,
    order: SortOrder,
    output: Option<&Path>,
    list_key: &str,
) -> Result<(), SessionError> {
    let mut roster = read_json(input, list_key)?;
    sort_by_field(&mut roster, field, order);
    write_roster(&roster, output, list_key)
}

fn write_roster(
    roster: &[Record],
    output: Option<&Path>,
    list_key: &str,
) -> Result<(), SessionError> {
    match output {
        Some(path) => {
            write_json(path, roster, list_key)?;
            eprintln!("Output written to: {}", path.display());
        }
        None => {
            let document = to_document(roster, list_key);
            let json = to_pretty_json(&document).map_err(ExportError::from)?;
            println!("{}", json);
        }
    }
    Ok(())
}
