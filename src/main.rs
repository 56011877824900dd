use anyhow::{Context, Result};
use blockagotchi_core::{init_logging, AppConfig};
use blockagotchi_io::JournalFormat;
use blockagotchi_lib::app::{load_config, App, RunReport};
use blockagotchi_lib::simulate::{generate, SimulationParams};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Process a JSONL command stream
    Run {
        /// Input file, one command per line
        #[arg(short, long)]
        input: PathBuf,

        /// Outcome journal; discarded when absent
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Query to answer after the stream, repeatable
        #[arg(short, long)]
        query: Vec<String>,

        /// Write host notices and reports instead of raw outcomes
        #[arg(long)]
        host_messages: bool,
    },
    /// Generate a seeded command stream and process it
    Simulate {
        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, default_value_t = 1000)]
        count: usize,

        #[arg(long, default_value_t = 10)]
        users: usize,

        /// Write the generated commands here as JSONL
        #[arg(long)]
        dump: Option<PathBuf>,

        /// Query to answer after the run, repeatable
        #[arg(short, long)]
        query: Vec<String>,
    },
    /// Print the default configuration as TOML
    Config,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    match args.command {
        Mode::Config => {
            print!("{}", toml::to_string_pretty(&AppConfig::default())?);
        }
        Mode::Run {
            input,
            output,
            query,
            host_messages,
        } => {
            let format = if host_messages {
                JournalFormat::HostMessages
            } else {
                JournalFormat::Outcomes
            };
            let mut app = App::new(load_config(&args.config)?).with_journal_format(format);
            let reader = BufReader::new(
                File::open(&input).with_context(|| format!("opening {}", input.display()))?,
            );
            let report = match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("creating {}", path.display()))?;
                    app.run_stream(reader, BufWriter::new(file))?
                }
                None => app.run_stream(reader, io::sink())?,
            };
            print_report(&app, &report, &query)?;
        }
        Mode::Simulate {
            seed,
            count,
            users,
            dump,
            query,
        } => {
            let config = load_config(&args.config)?;
            let params = SimulationParams {
                seed,
                count,
                users,
                ..Default::default()
            };
            let commands = generate(&params, &config.world.portal_account);
            if let Some(path) = dump {
                let mut out = BufWriter::new(
                    File::create(&path).with_context(|| format!("creating {}", path.display()))?,
                );
                for command in &commands {
                    writeln!(out, "{}", serde_json::to_string(command)?)?;
                }
                out.flush()?;
            }
            let mut app = App::new(config);
            let report = app.run_commands(&commands, io::sink())?;
            print_report(&app, &report, &query)?;
        }
    }

    Ok(())
}

fn print_report(app: &App, report: &RunReport, queries: &[String]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", serde_json::to_string_pretty(report)?)?;
    for path in queries {
        writeln!(out, "{path}: {}", serde_json::to_string_pretty(&app.query(path))?)?;
    }
    Ok(())
}
