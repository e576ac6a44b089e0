use anyhow::Context;
use clap::{Parser, Subcommand};
use ow2_tracker::config::Config;
use ow2_tracker::display::output::{display_error, display_info, render};
use ow2_tracker::session::{parse_command, split_heroes, Command, Outcome, Session};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ow2-tracker")]
#[command(about = "Track 5v5 team compositions and hero pick rates", long_about = None)]
struct Args {
    /// Directory holding the stats, match log and catalog files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Record a match
    Submit {
        #[arg(short, long)]
        map: String,

        /// Five teammates, comma separated (Tank, Damage, Damage, Support, Support)
        #[arg(short, long)]
        team: String,

        /// Five enemies, comma separated
        #[arg(short, long)]
        enemy: String,
    },

    /// Teammate and enemy pick rates
    Stats,

    /// Pick counts for one map
    Map { name: String },

    /// Cumulative picks of a hero over time (exact name as entered)
    Trend { hero: String },

    /// Most recent matches
    History {
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// List heroes by role
    Heroes,

    /// List known maps
    Maps,

    /// Add a hero to a role's list
    AddHero {
        name: String,

        /// Tank, Damage or Support
        #[arg(short, long)]
        role: String,
    },

    /// Add a map to the map list
    AddMap { name: String },

    /// Clear all pick counters (the match log is kept)
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Interactive session; `recall` and `again` only work here
    Shell,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = match args.data_dir {
        Some(dir) => Config {
            data_dir: dir,
            ..Config::from_env().unwrap_or_else(|_| Config::with_data_dir("."))
        },
        None => Config::from_env()?,
    };
    init_tracing(&config);

    let mut session = Session::open(&config)
        .with_context(|| format!("loading data from {}", config.data_dir().display()))?;

    let command = match args.command.unwrap_or(Cmd::Shell) {
        Cmd::Shell => return run_shell(&mut session),
        Cmd::Submit { map, team, enemy } => Command::Submit {
            map,
            teammates: split_heroes(&team),
            enemies: split_heroes(&enemy),
        },
        Cmd::Stats => Command::Stats,
        Cmd::Map { name } => Command::Map(name),
        Cmd::Trend { hero } => Command::Trend(hero),
        Cmd::History { limit } => Command::History(limit),
        Cmd::Heroes => Command::Heroes,
        Cmd::Maps => Command::Maps,
        Cmd::AddHero { name, role } => Command::AddHero { name, role },
        Cmd::AddMap { name } => Command::AddMap(name),
        Cmd::Reset { yes } => {
            if !yes && !confirm("Reset all stats?", &mut io::stdin().lock().lines())? {
                display_info("Reset cancelled");
                return Ok(());
            }
            Command::Reset
        }
    };

    let outcome = session.handle(command)?;
    render(&outcome);
    session.finish().context("saving pending changes")?;
    Ok(())
}

fn run_shell(session: &mut Session) -> anyhow::Result<()> {
    display_info("Type `help` for commands, `quit` to leave");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                display_error(&e.to_string());
                continue;
            }
        };

        if command == Command::Reset && !confirm("Reset all stats?", &mut lines)? {
            display_info("Reset cancelled");
            continue;
        }

        match session.handle(command) {
            Ok(Outcome::Quit) => break,
            Ok(outcome) => render(&outcome),
            Err(e) => display_error(&e.to_string()),
        }
    }

    session.finish().context("saving pending changes")?;
    Ok(())
}

fn confirm<I>(question: &str, lines: &mut I) -> io::Result<bool>
where
    I: Iterator<Item = io::Result<String>>,
{
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let answer = lines.next().transpose()?.unwrap_or_default();
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
