use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::info;

// Use library instead of local modules
use dl_simulator::logging::{init_logging, LogConfig, LogFormat};
use dl_simulator::{
    generate, generate_batch, generate_batch_file, parse_birthdate, Gender, IdentityInput, State,
};

#[derive(Parser)]
#[command(
    name = "dl-simulator",
    version,
    about = "Synthetic driver's license numbers from per-state rules"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log output format
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    log_format: LogFormatArg,
}

#[derive(Subcommand)]
enum Command {
    /// Generate one DL number
    Generate(GenerateArgs),

    /// List the 50 states and which have a DL format
    States {
        /// Only show states with a real format
        #[arg(long)]
        implemented: bool,
    },

    /// Generate DL numbers for every row of a CSV file
    Batch {
        /// CSV with columns state,last_name,birthdate,gender,ssn
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output CSV (default: stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },
}

#[derive(Parser)]
struct GenerateArgs {
    /// State name or USPS code (e.g. "Florida", "fl")
    #[arg(short, long)]
    state: String,

    #[arg(short, long = "last-name")]
    last_name: String,

    /// Birthdate as YYYY-MM-DD
    #[arg(short, long, default_value = "1990-01-01", value_parser = parse_birthdate)]
    birthdate: NaiveDate,

    /// M or F
    #[arg(short, long, default_value = "M")]
    gender: Gender,

    /// SSN as XXX-XX-XXXX (only Georgia uses it)
    #[arg(long, default_value = "")]
    ssn: String,

    /// Print JSON instead of the message line
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let log_config = LogConfig::from_verbosity(cli.verbose, cli.quiet)
        .with_format(format)
        .with_ansi(io::stderr().is_terminal());
    init_logging(&log_config).context("Failed to initialize logging")?;

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::States { implemented } => run_states(implemented),
        Command::Batch { input, output } => run_batch(input, output),
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    // Canonical spelling for known states; anything else falls through to the placeholder
    let state = args
        .state
        .parse::<State>()
        .map(|s| s.name().to_string())
        .unwrap_or(args.state);

    let input = IdentityInput::new(state, args.last_name)
        .with_birthdate(args.birthdate)
        .with_gender(args.gender)
        .with_ssn(args.ssn);

    let dl = generate(&input).context("Failed to generate DL number")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&dl)?);
    } else {
        println!("{}", dl);
    }

    Ok(())
}

fn run_states(implemented_only: bool) -> Result<()> {
    for state in State::ALL {
        let implemented = state.is_implemented();
        if implemented_only && !implemented {
            continue;
        }

        let marker = if implemented { "✓" } else { " " };
        println!("{} {}  {}", marker, state.code(), state.name());
    }

    Ok(())
}

fn run_batch(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    info!(input = %input.display(), "Running batch");

    let summary = match output {
        Some(path) => generate_batch_file(&input, &path)
            .with_context(|| format!("Failed to process batch {} -> {}", input.display(), path.display()))?,
        None => {
            let reader = std::fs::File::open(&input)
                .with_context(|| format!("Failed to open file: {}", input.display()))?;
            generate_batch(reader, io::stdout().lock())
                .with_context(|| format!("Failed to process batch {}", input.display()))?
        }
    };

    eprintln!("✓ {}", summary.summary());

    Ok(())
}
