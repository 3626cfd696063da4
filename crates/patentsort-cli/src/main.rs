mod display;
mod input;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use patentsort_core::{PatentRecord, Sorter};
use patentsort_export::{CsvOptions, ExportFormat, export_sheet, output_file_stem};
use tracing::info;

use crate::input::InputArgs;

/// Sort extracted patent certificate records by holder, type, and
/// application date, and emit a grouped sheet.
#[derive(Debug, Parser)]
#[command(name = "patentsort", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sort records and write the sheet to a file.
    Sort(SortArgs),
    /// Sort records and print the sheet as a table.
    Show(ShowArgs),
}

#[derive(Debug, Args)]
struct SortArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output format: csv, parquet, or json.
    #[arg(long, env = "PATENTSORT_FORMAT", default_value = "csv", value_parser = parse_format)]
    format: ExportFormat,

    /// Output file. Defaults to `<holder>-专利信息.<ext>` in the output directory.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for the derived output file. Defaults to the input file's directory.
    #[arg(long, env = "PATENTSORT_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Insert an empty CSV row between holder groups.
    #[arg(long)]
    separate_groups: bool,

    /// Omit the UTF-8 byte-order mark from CSV output.
    #[arg(long)]
    no_bom: bool,
}

#[derive(Debug, Args)]
struct ShowArgs {
    #[command(flatten)]
    input: InputArgs,
}

fn parse_format(s: &str) -> Result<ExportFormat, String> {
    s.parse()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    info!("patentsort v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.command {
        Command::Sort(args) => run_sort(&args),
        Command::Show(args) => run_show(&args),
    }
}

fn run_sort(args: &SortArgs) -> anyhow::Result<()> {
    let rules = args.input.load_rules()?;
    let records = args.input.load_records()?;
    let sorter = Sorter::new(rules);
    let sorted = sorter.sort(&records);

    let path = resolve_output_path(args, &records);
    let csv_options = CsvOptions {
        bom: !args.no_bom,
        separate_groups: args.separate_groups,
    };
    export_sheet(&sorted, sorter.rules(), args.format, csv_options, &path)
        .with_context(|| format!("writing {}", path.display()))?;

    info!(
        path = %path.display(),
        format = %args.format,
        records = sorted.len(),
        groups = sorted.groups().count(),
        "sheet written"
    );
    println!("{}", path.display());
    Ok(())
}

fn run_show(args: &ShowArgs) -> anyhow::Result<()> {
    let rules = args.input.load_rules()?;
    let records = args.input.load_records()?;
    let sorter = Sorter::new(rules);
    let sorted = sorter.sort(&records);
    print!("{}", display::render_table(&sorted, sorter.rules()));
    Ok(())
}

/// Pick the output path: `--output`, else a holder-derived name inside
/// `--output-dir`, the input file's directory, or the current directory.
fn resolve_output_path(args: &SortArgs, records: &[PatentRecord]) -> PathBuf {
    if let Some(path) = &args.output {
        return path.clone();
    }
    let dir = args
        .output_dir
        .clone()
        .or_else(|| {
            args.input
                .input_file()
                .and_then(Path::parent)
                .map(Path::to_path_buf)
        })
        .unwrap_or_else(|| PathBuf::from("."));
    dir.join(format!(
        "{}.{}",
        output_file_stem(records),
        args.format.extension()
    ))
}
