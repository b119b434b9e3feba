use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ktdb::{
    Config, DEFAULT_DB_PATH, DbError, InputType, MetaCommand, PrepareError, TABLE_MAX_PAGES, Table,
};
use tracing_subscriber::{EnvFilter, fmt};

/// Single-table record store with an interactive prompt.
#[derive(Parser, Debug)]
#[command(name = "ktdb")]
#[command(version)]
struct Args {
    /// Database file
    #[arg(default_value = DEFAULT_DB_PATH)]
    db_path: PathBuf,

    /// Maximum number of pages the table may hold
    #[arg(long, default_value_t = TABLE_MAX_PAGES)]
    max_pages: usize,
}

struct InputBuffer {
    raw: Vec<u8>,
    buffer: String,
}

enum ReadOutcome {
    Line,
    NotUtf8,
    Eof,
}

impl InputBuffer {
    fn new() -> Self {
        Self {
            raw: Vec::new(),
            buffer: String::new(),
        }
    }

    fn read_input(&mut self) -> io::Result<ReadOutcome> {
        self.raw.clear();
        self.buffer.clear();
        if io::stdin().lock().read_until(b'\n', &mut self.raw)? == 0 {
            return Ok(ReadOutcome::Eof);
        }
        match std::str::from_utf8(&self.raw) {
            Ok(line) => {
                self.buffer.push_str(line.trim());
                Ok(ReadOutcome::Line)
            }
            Err(_) => Ok(ReadOutcome::NotUtf8),
        }
    }
}

fn print_prompt() -> io::Result<()> {
    print!("db > ");
    io::stdout().flush()
}

fn repl(table: &mut Table) -> ktdb::Result<()> {
    let mut input_buffer = InputBuffer::new();
    let mut stdout = io::stdout();

    loop {
        print_prompt()?;
        match input_buffer.read_input()? {
            ReadOutcome::Line => {}
            ReadOutcome::NotUtf8 => {
                println!("{}", PrepareError::Syntax);
                continue;
            }
            ReadOutcome::Eof => break,
        }

        match InputType::parse(&input_buffer.buffer) {
            InputType::Meta(MetaCommand::Exit) => break,
            InputType::Meta(MetaCommand::Unrecognized) => {
                println!("Unrecognized meta-command: {}", input_buffer.buffer);
            }
            InputType::Statement(Err(e)) => println!("{e}"),
            InputType::Statement(Ok(statement)) => {
                match ktdb::execute(statement, table, &mut stdout) {
                    Ok(()) => println!("Executed."),
                    Err(e @ DbError::TableFull) => println!("Error: {e}"),
                    Err(e) => return Err(e),
                }
            }
        }
    }

    Ok(())
}

/// Runs the prompt loop, then flushes the table whether or not the loop
/// ended cleanly.
fn run(mut table: Table) -> ktdb::Result<()> {
    let session = repl(&mut table);
    finish(session, table.close())
}

/// The loop's error wins over the flush error; the latter is only logged.
fn finish(session: ktdb::Result<()>, closed: ktdb::Result<()>) -> ktdb::Result<()> {
    match (session, closed) {
        (Err(e), Err(close_err)) => {
            tracing::error!("Failed to flush table: {}", close_err);
            Err(e)
        }
        (session, closed) => session.and(closed),
    }
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only the prompt protocol.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::builder()
        .db_path(args.db_path)
        .max_pages(args.max_pages)
        .build();

    let table = match Table::open(&config) {
        Ok(table) => table,
        Err(e) => {
            tracing::debug!("Failed to open {}: {:?}", config.db_path.display(), e);
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(table) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Session aborted: {:?}", e);
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
