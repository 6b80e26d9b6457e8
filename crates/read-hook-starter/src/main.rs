//! init-read-hook - generate .claude/settings.local.json
//!
//! Copies `.claude/settings.example.json` to `.claude/settings.local.json`,
//! replacing every `$PWD` with the project directory and checking that the
//! result is valid JSON.
//!
//! Exit status is 0 on success and 1 on any failure.

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use read_hook_starter::{InitConfig, InitError, InitOutcome, SubstitutionMode};

#[derive(Parser)]
#[command(name = "init-read-hook")]
#[command(about = "Generate .claude/settings.local.json from its template, resolving $PWD")]
#[command(version)]
#[command(after_help = r#"PATHS:
    Template and output default to .claude/settings.example.json and
    .claude/settings.local.json under the working directory. They can also
    be set with READ_HOOK_TEMPLATE and READ_HOOK_OUTPUT; flags win.

EXAMPLES:
    init-read-hook                      # Run from the project root
    init-read-hook -C ~/src/myproject   # Run for another checkout
    init-read-hook --dry-run            # Print the result, write nothing
"#)]
struct Cli {
    /// Use DIR as the working directory (and the value of $PWD)
    #[arg(short = 'C', long = "dir", value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Template to read
    #[arg(short, long, value_name = "PATH")]
    template: Option<PathBuf>,

    /// File to write
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Insert the directory verbatim instead of JSON-escaping it
    #[arg(long)]
    raw: bool,

    /// Validate and print the result without writing it
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    // stdout carries the result, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = build_config(cli)?;
    tracing::debug!(?config, "resolved configuration");

    let outcome = read_hook_starter::run(&config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<InitConfig> {
    let mut config = match &cli.dir {
        Some(dir) => InitConfig::new(absolute_dir(dir)?),
        None => InitConfig::from_current_dir()?,
    }
    .with_env_overrides();

    if let Some(ref template) = cli.template {
        config = config.with_template(template);
    }
    if let Some(ref output) = cli.output {
        config = config.with_output(output);
    }

    let mode = if cli.raw {
        SubstitutionMode::Raw
    } else {
        SubstitutionMode::Escaped
    };

    Ok(config.with_mode(mode).with_dry_run(cli.dry_run))
}

/// Make `dir` absolute without resolving symlinks
fn absolute_dir(dir: &Path) -> Result<PathBuf> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(InitError::WorkingDir)?;
    Ok(cwd.join(dir))
}

fn print_outcome(outcome: &InitOutcome) {
    match outcome.content {
        Some(ref content) => {
            print!("{}", content);
            if !content.ends_with('\n') {
                println!();
            }
        }
        None => {
            println!("success: Created {}", outcome.output.display());
            println!("  Replaced $PWD with: {}", outcome.working_dir);
            println!("  Replacements: {}", outcome.replacements);
        }
    }
}

fn report_error(err: &anyhow::Error) {
    eprintln!("error: {}", err);
    if let Some(hint) = err.downcast_ref::<InitError>().and_then(InitError::hint) {
        eprintln!("  {}", hint);
    }
}
