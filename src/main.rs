//! `depthreel` command-line viewer.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use depthreel::{ImageSource, Options, Viewer, DEFAULT_CONTAINER};

#[derive(Parser, Debug)]
#[command(version, about = "Looping depth-scrolling image carousel")]
struct Cli {
    /// Options file (TOML); defaults apply when omitted
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Container identifier the window answers to
    #[arg(long, value_name = "ID", default_value = DEFAULT_CONTAINER)]
    container: String,

    /// Print the options JSON Schema to stdout and exit
    #[arg(long)]
    print_schema: bool,

    /// Write the effective options to FILE
    #[arg(long, value_name = "FILE")]
    save_options: Option<PathBuf>,

    /// Image files or http(s) URLs, nearest first
    #[arg(
        value_name = "IMAGE",
        required_unless_present_any = ["print_schema", "save_options"]
    )]
    images: Vec<String>,
}

fn run(cli: Cli) -> Result<(), String> {
    let options = match &cli.options {
        Some(path) => Options::load(path).map_err(|e| e.to_string())?,
        None => Options::default(),
    };

    if let Some(path) = &cli.save_options {
        options.save(path).map_err(|e| e.to_string())?;
        log::info!("options written to {}", path.display());
    }

    if cli.print_schema {
        let schema = serde_json::to_string_pretty(&Options::json_schema())
            .map_err(|e| e.to_string())?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{schema}").map_err(|e| e.to_string())?;
        return Ok(());
    }

    if cli.images.is_empty() {
        return Ok(());
    }

    Viewer::builder()
        .with_options(options)
        .with_container(cli.container)
        .with_sources(cli.images.iter().map(|s| ImageSource::parse(s)))
        .build()
        .run()
        .map_err(|e| e.to_string())
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
