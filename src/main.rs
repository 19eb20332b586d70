use std::{io::Write, path::PathBuf};

use clap::Parser;
use lembar::{
    art::welcome_message,
    config::EngineConfig,
    executor::{engine::Engine, result::ExecResult},
};
use rustyline::{DefaultEditor, error::ReadlineError};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const HISTORY_FILE: &str = ".lembar_history";

#[derive(Parser, Debug)]
#[command(
    name = "lembar",
    version,
    about = "Single-file-per-table storage engine with a tiny SQL shell"
)]
struct Args {
    /// Directory holding table, schema and write-log files
    #[arg(short, long, env = "LEMBAR_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// JSON engine configuration; --data-dir overrides its data_dir
    #[arg(long)]
    config: Option<PathBuf>,

    /// Execute one statement, print its JSON result and exit
    #[arg(short, long)]
    command: Option<String>,

    /// Log engine activity to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("lembar=debug")
        } else {
            EnvFilter::new("lembar=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<EngineConfig, lembar::types::error::DatabaseError> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(data_dir) = &args.data_dir {
        config.data_dir = data_dir.clone();
    }
    Ok(config)
}

fn read_multiline_command(rl: &mut DefaultEditor) -> rustyline::Result<String> {
    let mut input = String::new();
    let mut prompt = "lembar> ";

    loop {
        let line = rl.readline(prompt)?;
        let trimmed_line = line.trim_end();

        // `\` at end of line continues the statement
        if let Some(head) = trimmed_line.strip_suffix('\\') {
            input.push_str(head);
            input.push(' ');
            prompt = "     -> ";
        } else {
            input.push_str(trimmed_line);
            break;
        }
    }

    Ok(input)
}

fn print_result(result: &ExecResult) {
    if !result.is_ok() {
        println!("error: {}", result.message().unwrap_or("unknown error"));
        return;
    }
    if let Some(location) = result.location() {
        println!("inserted at {}", location);
    } else if let Some(count) = result.count() {
        println!("{} row(s) affected", count);
    } else if !result.rows().is_empty() {
        for row in result.rows() {
            println!("{} {}", row.location, row.data);
        }
        println!("({} row(s))", result.rows().len());
    } else if !result.joined().is_empty() {
        for row in result.joined() {
            println!("{} | {}", row.left, row.right);
        }
        println!("({} row(s))", result.joined().len());
    } else if let Some(msg) = result.message() {
        println!("{}", msg);
    } else {
        println!("(0 row(s))");
    }
}

/// Returns false when the shell should stop.
fn process_command(engine: &mut Engine, command: &str) -> bool {
    let cmd = command.trim();

    match cmd.to_lowercase().as_str() {
        "exit" | "quit" | "q" => {
            println!("Goodbye!");
            return false;
        }
        "help" | "h" => {
            println!(
                r#"
Available commands:
  help, h          - Show this help message
  clear, ctrl + l  - Clear the screen
  exit, quit, q    - Exit the shell

Statements:
  CREATE TABLE t (id INT, name TEXT)
  INSERT INTO t VALUES (1, "Alice")
  SELECT * FROM t [WHERE col = value]
  SELECT * FROM a JOIN b ON a.x = b.y
  UPDATE t SET col = value WHERE col = value
  DELETE FROM t WHERE col = value

Use '\' at the end of a line for multiline input.
Use Up/Down arrows to navigate command history.
"#
            );
        }
        "clear" => {
            print!("\x1B[2J\x1B[1;1H");
            let _ = std::io::stdout().flush();
        }
        "" => {}
        _ => {
            let result = engine.execute_sql(cmd);
            print_result(&result);
        }
    }

    true
}

fn run_repl(engine: &mut Engine) -> rustyline::Result<()> {
    println!("{}", welcome_message("LEMBAR"));

    let history_path = engine.config().data_dir.join(HISTORY_FILE);
    let mut rl = DefaultEditor::new()?;
    if rl.load_history(&history_path).is_err() {
        debug!(path = %history_path.display(), "no shell history yet");
    }

    loop {
        match read_multiline_command(&mut rl) {
            Ok(input) => {
                let command = input.trim().to_string();
                if command.is_empty() {
                    continue;
                }
                rl.add_history_entry(&command)?;
                if !process_command(engine, &command) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Interrupted");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("EOF");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    if let Err(e) = rl.save_history(&history_path) {
        warn!(error = %e, "could not save shell history");
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;
    let mut engine = Engine::open(config)?;

    match &args.command {
        Some(sql) => {
            let result = engine.execute_sql(sql);
            println!("{}", result.to_json());
            if !result.is_ok() {
                std::process::exit(1);
            }
        }
        None => run_repl(&mut engine)?,
    }

    Ok(())
}
