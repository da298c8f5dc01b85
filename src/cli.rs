// File: ./src/cli.rs
//! Command-line argument handling and help text for the `yeargrid` binary.

use anyhow::{Result, anyhow};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub year: Option<i32>,
    pub title: Option<String>,
    pub font: Option<String>,
    pub bold_font: Option<String>,
    pub title_font: Option<String>,
    pub events: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub verbose: bool,
    pub help: bool,
}

impl CliArgs {
    /// Parses arguments after the binary name.
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut parsed = CliArgs::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let mut value = |flag: &str| {
                args.next()
                    .ok_or_else(|| anyhow!("Missing value for {}", flag))
            };
            match arg.as_str() {
                "-h" | "--help" | "help" => parsed.help = true,
                "-v" | "--verbose" => parsed.verbose = true,
                "-y" | "--year" => {
                    let raw = value(&arg)?;
                    parsed.year = Some(
                        raw.parse()
                            .map_err(|_| anyhow!("Invalid year '{}'", raw))?,
                    );
                }
                "-t" | "--title" => parsed.title = Some(value(&arg)?),
                "-r" | "--font" => parsed.font = Some(value(&arg)?),
                "-b" | "--bold-font" => parsed.bold_font = Some(value(&arg)?),
                "-T" | "--title-font" => parsed.title_font = Some(value(&arg)?),
                "-e" | "--events" => parsed.events = Some(value(&arg)?.into()),
                "-o" | "--output" => parsed.output = Some(value(&arg)?.into()),
                "--root" => parsed.root = Some(value(&arg)?.into()),
                other => return Err(anyhow!("Unknown argument '{}'", other)),
            }
        }
        Ok(parsed)
    }
}

pub fn print_help(binary_name: &str) {
    println!(
        "Yeargrid v{} - A year-at-a-glance wall calendar generator (A1 landscape PDF)",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS]", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -y, --year <YEAR>          Year to generate (default: current year)");
    println!("    -t, --title <TEXT>         Title text (default: YEAR)");
    println!("    -r, --font <NAME>          Regular font name or file (default: Helvetica)");
    println!("    -b, --bold-font <NAME>     Bold font name or file (default: Helvetica-Bold)");
    println!("    -T, --title-font <NAME>    Title font (default: same as bold font)");
    println!("    -e, --events <FILE>        Events file (format: DDMMM  Event description)");
    println!("    -o, --output <FILE>        Output PDF (default: calendar_YEAR.pdf)");
    println!("    --root <path>              Use a different directory for config and bundled fonts");
    println!("    -v, --verbose              Print debug logging");
    println!("    -h, --help                 Show this help message");
    println!();
    println!("EVENTS FILE:");
    println!("    # Lines starting with '#' are comments");
    println!("    01jan  New Year");
    println!("    14feb  Valentine's Day");
    println!("    25dec  Christmas");
    println!();
    println!("FONTS:");
    println!("    Builtin: Helvetica, Times-Roman, Courier (and their -Bold/-Oblique/-Italic faces).");
    println!("    Other names are looked up as .ttf/.ttc files in the user, system and bundled");
    println!("    font directories. Use TrueType fonts for non-Latin event text.");
}
