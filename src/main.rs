use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use whittle::{PathShortener, WhittleError};

#[derive(Parser)]
#[command(name = "whittle")]
#[command(about = "A lossless SVG path data shortener", long_about = None)]
struct Cli {
    /// Input file containing raw path data (use - for stdin)
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Output file (use - for stdout)
    #[arg(short, long, default_value = "-")]
    output: PathBuf,

    /// Significant digits for coordinates rewritten between absolute and
    /// relative form (original text is never re-rounded)
    #[arg(short, long, default_value = "6")]
    precision: u8,

    /// Print size comparison
    #[arg(short, long)]
    stats: bool,
}

fn main() -> Result<(), WhittleError> {
    let cli = Cli::parse();

    // Read input
    let input = if cli.input.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        fs::read(&cli.input)?
    };

    let output = PathShortener::with_precision(cli.precision).shorten(&input);

    // Write output
    if cli.output.as_os_str() == "-" {
        io::stdout().write_all(&output)?;
    } else {
        fs::write(&cli.output, &output)?;
    }

    // Print stats if requested
    if cli.stats {
        let saved = input.len().saturating_sub(output.len());
        let percent = if !input.is_empty() {
            (saved as f64 / input.len() as f64) * 100.0
        } else {
            0.0
        };
        eprintln!(
            "{} -> {} bytes ({:.1}% smaller)",
            input.len(),
            output.len(),
            percent
        );
    }

    Ok(())
}
