//! Command line front end: turns a semicolon separated payment list into a
//! pain.008 or pain.001 file.

use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};
use sepa_converter_config::{Config, ConfigError};
use sepa_converter_pain::{convert, ConversionReport, ConvertError, RunSettings, SummaryLine};
use sepa_converter_types::{MessageType, SequenceType};

#[derive(Parser)]
#[command(name = "sepa-converter", version)]
#[command(about = "Convert CSV payment lists into SEPA XML (pain.008 / pain.001)", long_about = None)]
struct Cli {
    /// Semicolon separated input file
    #[arg(short, long, required_unless_present = "save_defaults")]
    input: Option<PathBuf>,

    /// Output file, or a directory to write pain-output.xml into
    #[arg(short, long, required_unless_present = "save_defaults")]
    output: Option<PathBuf>,

    /// Name of the initiating company
    #[arg(short, long)]
    company_name: Option<String>,

    /// direct-debit (lastschrift, pain.008) or credit-transfer (ueberweisung, pain.001)
    #[arg(short, long)]
    message_type: Option<MessageType>,

    /// FRST, RCUR, OOFF or FNAL, direct debits only
    #[arg(short, long)]
    sequence_type: Option<SequenceType>,

    /// Request a single booking for the whole batch
    #[arg(short, long)]
    batch_booking: bool,

    /// Config file to read defaults from
    #[arg(long)]
    config: Option<PathBuf>,

    /// Store the given company name, message type, sequence type and batch
    /// booking flag as defaults
    #[arg(long)]
    save_defaults: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load_from_file()?,
    };
    apply_overrides(&mut config, &cli);
    for problem in config.config_errors() {
        warn!("{}", problem);
    }

    if cli.save_defaults {
        let saved_to = match &cli.config {
            Some(path) => {
                config.save_to(path)?;
                path.clone()
            }
            None => config.save_to_file()?,
        };
        println!("Saved defaults to {}", saved_to.display());
    }

    let (Some(input), Some(output)) = (cli.input, cli.output) else {
        return Ok(());
    };
    let settings = RunSettings::from_config(config.sepa(), input, output);
    info!(
        "converting {} as {}",
        settings.input_path.display(),
        settings.message_type
    );
    let report = convert(&settings)?;
    print_report(&report);
    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    let sepa = config.sepa_mut();
    if let Some(company_name) = &cli.company_name {
        sepa.company_name = company_name.clone();
    }
    if let Some(message_type) = cli.message_type {
        sepa.message_type = message_type;
    }
    if let Some(sequence_type) = cli.sequence_type {
        sepa.sequence_type = sequence_type;
    }
    if cli.batch_booking {
        sepa.batch_booking = true;
    }
}

fn print_report(report: &ConversionReport) {
    println!("{}", SummaryLine::header());
    for line in &report.summary {
        println!("{}", line);
    }
    println!();
    println!(
        "{} transactions, {} EUR, message {}",
        report.number_of_transactions, report.control_sum, report.message_id
    );
    if !report.diagnostics.is_empty() {
        println!();
        println!("Replaced values:");
        for coercion in report.diagnostics.iter() {
            println!("  {}", coercion);
        }
    }
    println!("Wrote {}", report.output_path.display());
}
