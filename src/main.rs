use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tourpay::report::{SUMMARY_COLUMNS, TOTAL_LABEL};
use tourpay::session::PayrollSession;
use tourpay::store::JsonFileStore;
use tourpay::{PayrollError, Result};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_tracing()?;

    let store = match &cli.store {
        Some(path) => JsonFileStore::open(path),
        None => JsonFileStore::open_default()?,
    };
    let mut session = PayrollSession::open(store);

    match cli.command {
        Command::Import(args) => execute_import(&mut session, args),
        Command::Summary => execute_summary(&session),
        Command::Export(args) => execute_export(&session, args),
        Command::SetPrice(args) => execute_set_price(&mut session, args),
        Command::SetPenalty(args) => execute_set_penalty(&mut session, args),
        Command::Reset => execute_reset(&mut session),
    }
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| PayrollError::Logging(error.to_string()))
}

fn execute_import(session: &mut PayrollSession<JsonFileStore>, args: ImportArgs) -> Result<()> {
    if !args.input.exists() {
        return Err(PayrollError::MissingInput(args.input));
    }

    let report = session.import_file(&args.input)?;
    println!(
        "Imported {} tours for {} drivers from {}",
        report.record_count, report.driver_count, report.file_name
    );
    Ok(())
}

fn execute_summary(session: &PayrollSession<JsonFileStore>) -> Result<()> {
    let state = session.state();
    let summary = session.summary();

    if let Some(name) = &state.source_file {
        println!("Source file: {name}");
    }
    println!("Price per tour: {}", format_amount(state.price_per_tour));
    println!();
    print_summary_row(
        SUMMARY_COLUMNS[0],
        SUMMARY_COLUMNS[1].to_string(),
        SUMMARY_COLUMNS[2].to_string(),
        SUMMARY_COLUMNS[3].to_string(),
        SUMMARY_COLUMNS[4].to_string(),
    );
    for line in &summary.lines {
        print_summary_row(
            &line.driver,
            line.tour_count.to_string(),
            format_amount(line.gross_pay),
            format_amount(line.penalty),
            format_amount(line.net_pay),
        );
    }
    let totals = &summary.totals;
    print_summary_row(
        TOTAL_LABEL,
        totals.total_tours.to_string(),
        format_amount(totals.total_gross),
        format_amount(totals.total_penalties),
        format_amount(totals.total_payout),
    );
    Ok(())
}

fn execute_export(session: &PayrollSession<JsonFileStore>, args: ExportArgs) -> Result<()> {
    let written = session.export(args.output.as_deref())?;
    println!("Payroll workbook written to {}", written.display());
    Ok(())
}

fn execute_set_price(
    session: &mut PayrollSession<JsonFileStore>,
    args: SetPriceArgs,
) -> Result<()> {
    let price = session.set_tour_price(&args.price)?;
    println!("Price per tour set to {}", format_amount(price));
    Ok(())
}

fn execute_set_penalty(
    session: &mut PayrollSession<JsonFileStore>,
    args: SetPenaltyArgs,
) -> Result<()> {
    let amount = session.set_penalty(&args.driver, &args.amount)?;
    println!(
        "Penalty for {} set to {}",
        args.driver,
        format_amount(amount)
    );
    Ok(())
}

fn execute_reset(session: &mut PayrollSession<JsonFileStore>) -> Result<()> {
    session.reset()?;
    println!("Records, penalties, and source file cleared; tour price kept.");
    Ok(())
}

fn print_summary_row(label: &str, tours: String, gross: String, penalties: String, net: String) {
    println!("{label:<30} {tours:>12} {gross:>14} {penalties:>14} {net:>14}");
}

fn format_amount(value: f64) -> String {
    format!("{value:.2} €")
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Aggregate delivery tours and compute driver payroll."
)]
struct Cli {
    /// Override the state-store file location.
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import a tour file (.xlsx, .xls, or delimited text), replacing any
    /// previously imported records.
    Import(ImportArgs),

    /// Print the payroll summary.
    Summary,

    /// Write the payroll summary workbook.
    Export(ExportArgs),

    /// Set the price credited per tour.
    SetPrice(SetPriceArgs),

    /// Set a driver's penalty.
    SetPenalty(SetPenaltyArgs),

    /// Clear imported records, penalties, and the source file name; the
    /// tour price is kept.
    Reset,
}

#[derive(clap::Args)]
struct ImportArgs {
    /// Input file path.
    input: PathBuf,
}

#[derive(clap::Args)]
struct ExportArgs {
    /// Output file or directory; defaults to a dated file name in the
    /// current directory.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
struct SetPriceArgs {
    /// New price per tour; non-numeric input falls back to 0.
    price: String,
}

#[derive(clap::Args)]
struct SetPenaltyArgs {
    /// Driver the penalty applies to.
    driver: String,

    /// Penalty amount; non-numeric or negative input falls back to 0.
    amount: String,
}
