use clap::{ArgAction, Parser};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use evtxsift::{FilterSpec, InputFormat, Profile, SiftError, SiftPipeline, SiftStats};

#[derive(Parser)]
#[command(name = "evtxsift")]
#[command(about = "Sift Windows Event Logs (EVTX or JSONL exports) into flat CSV views")]
#[command(version)]
struct Args {
    /// Event log file (.evtx / .jsonl) or a directory of recognized logs
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Log-source view to extract
    #[arg(short = 'p', long = "profile", value_enum)]
    profile: Profile,

    /// Input container format (default: detected from the file extension)
    #[arg(long, value_enum)]
    format: Option<InputFormat>,

    /// Drop rows containing any of these terms (space/comma/semicolon
    /// separated word list, e.g. -x 4634,LOCAL)
    #[arg(short = 'x', long = "exclude", action = ArgAction::Append, value_name = "TERMS")]
    exclude: Vec<String>,

    /// Keep only rows containing any of these terms (e.g. -i 4672,-500)
    #[arg(short = 'i', long = "include", action = ArgAction::Append, value_name = "TERMS")]
    include: Vec<String>,

    /// Keep only rows containing every one of these terms (e.g. -m admin,cmd.exe)
    #[arg(short = 'm', long = "match-all", action = ArgAction::Append, value_name = "TERMS")]
    match_all: Vec<String>,

    /// Do not print the column header row
    #[arg(short = 'n', long = "no-header")]
    no_header: bool,

    /// Output file (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Verbosity (-v run summary, -vv skip decisions, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    match run(&args) {
        Ok(stats) => {
            log::info!(
                "{} records in, {} rows out ({} filtered, {} not in catalog, {} decode errors, {} files failed)",
                stats.records_processed,
                stats.rows_emitted,
                stats.rows_filtered,
                stats.records_skipped,
                stats.decode_errors,
                stats.files_failed,
            );
        }
        Err(e) => {
            eprintln!("evtxsift: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<SiftStats, SiftError> {
    let output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    let filter = FilterSpec::new(&args.exclude, &args.include, &args.match_all);
    let mut pipeline = SiftPipeline::new(
        args.profile.schema(),
        filter,
        output,
        args.no_header,
    );
    pipeline.run(&args.input, args.format)
}
