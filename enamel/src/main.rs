use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use colored::Colorize;
use enamel::{
    TemplateRenderer,
    ctx::{AppContext, OptionOverrides},
    generate_with,
};
use log::{LevelFilter, debug};

/// Generate C settings accessors from a Clay configuration.
#[derive(Parser, Debug)]
#[command(name = "enamel", version, about)]
struct Cli {
    /// App metadata (appinfo.json or package.json)
    #[arg(long, value_name = "FILE")]
    appinfo: Option<PathBuf>,

    /// Clay configuration, JSON or JavaScript [default: src/js/config.json]
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output directory [default: src/generated]
    #[arg(long, value_name = "DIR")]
    folder: Option<PathBuf>,

    /// Base name of the generated files [default: enamel]
    #[arg(long, value_name = "NAME")]
    filename: Option<String>,

    /// Project file [default: .enamel.toml when present]
    #[arg(long, value_name = "FILE")]
    project: Option<PathBuf>,

    /// More output, repeat for more
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only report warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> OptionOverrides {
        OptionOverrides {
            appinfo: self.appinfo.clone(),
            config: self.config.clone(),
            folder: self.folder.clone(),
            filename: self.filename.clone(),
        }
    }

    fn level(&self) -> LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => LevelFilter::Warn,
            (false, 0) => LevelFilter::Info,
            (false, 1) => LevelFilter::Debug,
            (false, _) => LevelFilter::Trace,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let renderer = match TemplateRenderer::new() {
        Ok(renderer) => renderer,
        Err(e) => {
            println!("{}", format!("enamel could not load its templates: {e}").red());
            println!(
                "{}",
                "The installation looks broken. Reinstall it with `cargo install enamel --force` and try again."
                    .red()
            );
            std::process::exit(1);
        }
    };

    let workspace = std::env::current_dir().context("cannot determine the working directory")?;
    let mut ctx = AppContext::new(workspace);
    ctx.load_project(cli.project.clone())?;

    let options = ctx.generate_options(&cli.overrides());
    debug!("{options:?}");

    let files = generate_with(&renderer, &options)
        .with_context(|| format!("failed to generate from {}", options.config.display()))?;

    if !cli.quiet {
        println!(
            "{} {} {}",
            "Generated".green().bold(),
            files.header.display(),
            files.source.display()
        );
    }
    Ok(())
}
