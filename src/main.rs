//! gitlog - commit history as a table
//!
//! Command-line entry point: scans the log table of one repository and
//! prints its rows.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use gitlog::catalog::Schema;
use gitlog::context::QueryContext;
use gitlog::executor::{self, json_record, text_record};
use gitlog::session::{DatabaseConfig, Session};
use gitlog::storage::BranchName;
use gitlog::system::{log_table_schema, SessionLogTable};
use gitlog::table::Table;

struct Options {
    path: PathBuf,
    name: Option<String>,
    branch: Option<String>,
    limit: Option<usize>,
    json: bool,
    schema: bool,
    verbose: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let mut opts = Options {
        path: PathBuf::from("."),
        name: None,
        branch: None,
        limit: None,
        json: false,
        schema: false,
        verbose: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-d" | "--database" | "-n" | "--name" | "-b" | "--branch" | "-l" | "--limit" => {
                let flag = args[i].as_str();
                i += 1;
                let Some(value) = args.get(i) else {
                    eprintln!("Missing value for {}", flag);
                    return ExitCode::FAILURE;
                };
                match flag {
                    "-d" | "--database" => opts.path = PathBuf::from(value),
                    "-n" | "--name" => opts.name = Some(value.clone()),
                    "-b" | "--branch" => opts.branch = Some(value.clone()),
                    _ => match value.parse() {
                        Ok(n) => opts.limit = Some(n),
                        Err(_) => {
                            eprintln!("Invalid limit: {}", value);
                            return ExitCode::FAILURE;
                        }
                    },
                }
            }
            "--json" => {
                opts.json = true;
            }
            "--schema" => {
                opts.schema = true;
            }
            "-v" | "--verbose" => {
                opts.verbose = true;
            }
            "-h" | "--help" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            "--version" => {
                println!("gitlog v{}", env!("CARGO_PKG_VERSION"));
                return ExitCode::SUCCESS;
            }
            arg => {
                // Treat as repository path if no flag.
                if !arg.starts_with('-') {
                    opts.path = PathBuf::from(arg);
                } else {
                    eprintln!("Unknown option: {}", arg);
                    return ExitCode::FAILURE;
                }
            }
        }
        i += 1;
    }

    let level = if opts.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if opts.schema {
        print_schema(&log_table_schema());
        return ExitCode::SUCCESS;
    }

    match run(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    println!("gitlog - commit history as a table");
    println!();
    println!("Usage: gitlog [OPTIONS] [REPOSITORY]");
    println!();
    println!("Options:");
    println!("  -d, --database PATH    Repository path (default: .)");
    println!("  -n, --name NAME        Logical database name (default: directory name)");
    println!("  -b, --branch BRANCH    Branch to read (default: HEAD)");
    println!("  -l, --limit N          Stop after N rows");
    println!("      --json             Print one JSON object per row");
    println!("      --schema           Print the table schema and exit");
    println!("  -v, --verbose          Enable debug logging");
    println!("  -h, --help             Show this help message");
    println!("  --version              Show version");
    println!();
    println!("Examples:");
    println!("  gitlog                         Log of the repository in the current directory");
    println!("  gitlog -b dev -l 10 ../repo    Ten newest commits on 'dev'");
    println!("  gitlog --json | jq .message    Messages only");
}

fn run(opts: &Options) -> Result<(), Box<dyn Error>> {
    let mut config = DatabaseConfig::new(&opts.path);
    if let Some(name) = &opts.name {
        config = config.name(name.as_str());
    }
    if let Some(branch) = &opts.branch {
        config = config.branch(BranchName::new(branch.as_str())?);
    }

    let session = Arc::new(Session::new());
    let db_name = session.open_database(&config)?;
    let table = SessionLogTable::for_session(session, db_name)?;

    let columns: Vec<String> = table
        .schema()
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();
    if !opts.json {
        println!("{}", columns.join("\t"));
    }

    // Rows are printed as they arrive so a failure still shows what came before it.
    let mut op = executor::scan(&table, QueryContext::new(), opts.limit);
    let mut count = 0;
    while let Some(row) = op.next_row()? {
        if opts.json {
            println!("{}", json_record(&columns, &row)?);
        } else {
            println!("{}", text_record(&row));
        }
        count += 1;
    }
    op.close()?;

    if !opts.json {
        println!("({} rows)", count);
    }
    Ok(())
}

fn print_schema(schema: &Schema) {
    for column in schema.columns() {
        let mut line = format!("{}\t{}", column.name, column.data_type);
        if column.primary_key {
            line.push_str("\tPRIMARY KEY");
        } else if !column.nullable {
            line.push_str("\tNOT NULL");
        }
        println!("{}", line);
    }
}
