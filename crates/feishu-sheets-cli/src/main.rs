//! feishu-sheets CLI - read and write Feishu spreadsheets from the shell

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use feishu_sheets::prelude::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "feishu-sheets")]
#[command(
    author,
    version,
    about = "Read and write Feishu spreadsheets",
    long_about = "Read and write Feishu spreadsheets.\n\n\
                  Credentials are read from FEISHU_APP_ID and FEISHU_APP_SECRET; \
                  FEISHU_BASE_URL selects another API host."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a cell or range
    Get {
        /// Spreadsheet token
        spreadsheet: String,

        /// Sheet id
        sheet: String,

        /// Cell ("B3") or range ("A1:C5")
        range: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Field delimiter for CSV output
        #[arg(short, long, default_value = ",")]
        delimiter: char,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write one cell
    Set {
        spreadsheet: String,
        sheet: String,

        /// Target cell, e.g. "B3"
        cell: String,

        /// Numbers and true/false are written as such, anything else as text
        value: String,

        /// Write the value as a formula
        #[arg(long)]
        formula: bool,
    },

    /// Embed a local image into a cell
    SetImage {
        spreadsheet: String,
        sheet: String,
        cell: String,

        /// Image file to upload
        path: PathBuf,
    },

    /// Download an embedded image by file token
    Download {
        /// File token of the image
        file_token: String,

        /// Destination path
        output: PathBuf,

        /// Append the detected format as extension (".png", ".jpeg", ...)
        #[arg(short, long)]
        auto_suffix: bool,
    },

    /// Show the dimensions of a sheet
    Info { spreadsheet: String, sheet: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Csv,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Get {
            spreadsheet,
            sheet,
            range,
            format,
            delimiter,
            output,
        } => get(&spreadsheet, &sheet, &range, format, delimiter, output.as_deref()),
        Commands::Set {
            spreadsheet,
            sheet,
            cell,
            value,
            formula,
        } => set(&spreadsheet, &sheet, &cell, parse_value(&value, formula)),
        Commands::SetImage {
            spreadsheet,
            sheet,
            cell,
            path,
        } => set_image(&spreadsheet, &sheet, &cell, &path),
        Commands::Download {
            file_token,
            output,
            auto_suffix,
        } => download(&file_token, &output, auto_suffix),
        Commands::Info { spreadsheet, sheet } => show_info(&spreadsheet, &sheet),
    }
}

fn connect() -> Result<Client> {
    Client::from_env()
        .context("Failed to set up the client (are FEISHU_APP_ID and FEISHU_APP_SECRET set?)")
}

fn get(
    spreadsheet: &str,
    sheet_id: &str,
    range: &str,
    format: Format,
    delimiter: char,
    output: Option<&Path>,
) -> Result<()> {
    let client = connect()?;
    let mut sheet = client.sheet(spreadsheet, sheet_id);
    let selection = sheet
        .get(range)
        .with_context(|| format!("Failed to read {range} from sheet {sheet_id}"))?;

    let mut out: Box<dyn Write> = match output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create '{}'", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, &selection.to_json())
                .context("Failed to write JSON")?;
            writeln!(out)?;
        }
        Format::Csv => {
            if !delimiter.is_ascii() {
                bail!("Delimiter must be a single ASCII character, got '{delimiter}'");
            }
            let options = CsvExportOptions {
                delimiter: delimiter as u8,
                ..Default::default()
            };
            selection
                .write_csv(&mut out, &options)
                .context("Failed to write CSV")?;
        }
    }

    out.flush()?;
    Ok(())
}

fn set(spreadsheet: &str, sheet_id: &str, cell: &str, value: CellValue) -> Result<()> {
    let client = connect()?;
    let mut sheet = client.sheet(spreadsheet, sheet_id);
    let shown = value.to_string();
    sheet
        .set(cell, value)
        .with_context(|| format!("Failed to write {cell} in sheet {sheet_id}"))?;
    eprintln!("Wrote {shown} to {cell}");
    Ok(())
}

fn set_image(spreadsheet: &str, sheet_id: &str, cell: &str, path: &Path) -> Result<()> {
    if !path.is_file() {
        bail!("Image file '{}' not found", path.display());
    }

    let client = connect()?;
    let mut sheet = client.sheet(spreadsheet, sheet_id);
    sheet
        .set(cell, Image::from_path(path))
        .with_context(|| format!("Failed to embed '{}' into {cell}", path.display()))?;
    eprintln!("Embedded {} into {cell}", path.display());
    Ok(())
}

fn download(file_token: &str, output: &Path, auto_suffix: bool) -> Result<()> {
    let client = connect()?;
    let mut image = Image::from_token(file_token);
    let path = image
        .download_to(&client, output, auto_suffix)
        .with_context(|| format!("Failed to download image {file_token}"))?;
    println!("{}", path.display());
    Ok(())
}

fn show_info(spreadsheet: &str, sheet_id: &str) -> Result<()> {
    let client = connect()?;
    let mut sheet = client.sheet(spreadsheet, sheet_id);
    let rows = sheet
        .rows()
        .with_context(|| format!("Failed to read sheet {sheet_id}"))?;
    let cols = sheet.cols()?;

    println!("Spreadsheet: {spreadsheet}");
    println!("Sheet:       {sheet_id}");
    println!("Rows:        {rows}");
    println!("Columns:     {cols}");
    if rows > 0 && cols > 0 {
        let last = CellAddress::new(rows as u32 - 1, cols as u32 - 1);
        println!("Range:       A1:{last}");
    }
    Ok(())
}

/// Interpret a command-line value the way a user typing into a cell would
fn parse_value(raw: &str, formula: bool) -> CellValue {
    if formula {
        return CellValue::formula(raw);
    }
    if let Ok(n) = raw.trim().parse::<f64>() {
        if n.is_finite() {
            return CellValue::Number(n);
        }
    }
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => CellValue::Boolean(true),
        "false" => CellValue::Boolean(false),
        _ => CellValue::text(raw),
    }
}
