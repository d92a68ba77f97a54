use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "docpivot", version, about = "Convert documents between JSON and XML")]
struct Args {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Input format (inferred from the input file extension if omitted)
    #[arg(short, long, value_enum)]
    from: Option<FormatArg>,
    /// Output format
    #[arg(short, long, value_enum)]
    to: FormatArg,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Json,
    Xml,
}

impl From<FormatArg> for docpivot::Format {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => docpivot::Format::Json,
            FormatArg::Xml => docpivot::Format::Xml,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let input_data = read_input(&args.input)?;
    let mut input = docpivot::Input::from_str(&input_data);
    let filename = args
        .input
        .as_ref()
        .and_then(|path| path.file_name())
        .and_then(|name| name.to_str());
    if let Some(filename) = filename {
        input = input.with_filename(filename);
    }

    let from = match args.from.map(docpivot::Format::from) {
        Some(format) => format,
        None => match input.format_hint() {
            Some(format) => format,
            None => bail!(
                "could not infer input format; pass --from or provide an input file with extension"
            ),
        },
    };

    let output = docpivot::convert(&input, from, args.to.into())?;
    tracing::debug!(bytes = output.len(), "conversion complete");

    write_output(&args.output, output.as_bytes())?;
    Ok(())
}

fn read_input(path: &Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.trim().is_empty() {
                bail!("no input provided on stdin");
            }
            Ok(buffer)
        }
    }
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}
