use anyhow::{Context, Result};
use chrono::Datelike;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::path::PathBuf;
use yeargrid::cli::{CliArgs, print_help};
use yeargrid::config::Config;
use yeargrid::context::{AppContext, StandardContext};
use yeargrid::error::CalendarError;
use yeargrid::events::{ParsedEvents, load_events_file};
use yeargrid::{RenderOptions, render_calendar};

fn main() -> Result<()> {
    let mut args = env::args();
    let binary_name = args.next().unwrap_or_else(|| "yeargrid".to_string());
    let cli = CliArgs::parse(args)?;

    if cli.help {
        print_help(&binary_name);
        return Ok(());
    }

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Error
    };
    // A second logger (e.g. under a test harness) is not an error.
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let ctx = StandardContext::new(cli.root.clone());
    let config = Config::load(&ctx)?;

    let mut selection = config.font_selection();
    if let Some(font) = cli.font {
        selection.regular = font;
    }
    if let Some(font) = cli.bold_font {
        selection.bold = font;
    }
    if let Some(font) = cli.title_font {
        selection.title = Some(font);
    }

    let year = cli.year.unwrap_or_else(|| chrono::Local::now().year());
    let title = cli.title.unwrap_or_else(|| year.to_string());

    let events = match &cli.events {
        Some(path) => match load_events_file(path) {
            Ok(parsed) => {
                println!("Loaded {} events from {}", parsed.events.len(), path.display());
                parsed
            }
            Err(e @ CalendarError::EventFileEncoding { .. }) => {
                eprintln!("{}; continuing without events", e);
                ParsedEvents::default()
            }
            Err(e) => return Err(e.into()),
        },
        None => ParsedEvents::default(),
    };
    for warning in &events.warnings {
        eprintln!("Warning: {}", warning);
    }

    let options = RenderOptions {
        search_path: ctx.font_search_path(&config.font_dirs),
        palette: config.palette(),
        layout: config.layout(),
    };

    let rendered = render_calendar(year, &title, &selection, &events, &options)
        .with_context(|| format!("Failed to render calendar for {}", year))?;

    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(format!("calendar_{}.pdf", year)));
    std::fs::write(&output, &rendered.pdf)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Calendar generated: {}", output.display());
    Ok(())
}
