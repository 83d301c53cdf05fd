use std::{fs::OpenOptions, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use diffy::{DiffOptions as PatchOptions, PatchFormatter};
use env_logger::{Builder, Target};
use philology_edit::{DiffOptions, EditScript};

/// Parse, apply and derive compact edit operations.
#[derive(Parser, Debug)]
#[command(name = "philology-edit", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse operations and print their canonical notation
    Parse {
        /// Operations, e.g. `"b"@2="z"`
        #[arg(required = true)]
        operations: Vec<String>,

        /// Print JSON instead of the notation
        #[arg(long)]
        json: bool,
    },

    /// Apply operations, in order, to a text
    Apply {
        input: String,

        #[arg(required = true)]
        operations: Vec<String>,

        /// Also print a line diff between input and output
        #[arg(long)]
        show_diff: bool,
    },

    /// Derive the operations turning SOURCE into TARGET
    Diff {
        source: String,
        target: String,

        /// Do not record the affected source text
        #[arg(long)]
        no_input_text: bool,

        /// Do not merge relocations into moves
        #[arg(long)]
        no_adjust: bool,

        /// Only insertions may pair with deletions when merging moves
        #[arg(long)]
        insert_only: bool,

        /// Print JSON instead of the notation
        #[arg(long)]
        json: bool,
    },
}

fn init_logging() -> Result<()> {
    let mut builder = Builder::from_default_env();
    if let Ok(log_location) = std::env::var("LOG_LOCATION") {
        let path = PathBuf::from(&*shellexpand::tilde(&log_location));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn print_script(script: &EditScript, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(script)?);
    } else if !script.is_empty() {
        println!("{script}");
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    log::debug!("{cli:?}");

    match cli.command {
        Command::Parse { operations, json } => {
            let script = EditScript::parse(&operations)?;
            print_script(&script, json)?;
        }

        Command::Apply {
            input,
            operations,
            show_diff,
        } => {
            let script = EditScript::parse(&operations)?;
            let output = script.execute(&input)?;
            println!("{output}");
            if show_diff {
                let patch = PatchOptions::new().create_patch(&input, &output);
                let formatter = PatchFormatter::new().missing_newline_message(false);
                print!("{}", formatter.fmt_patch(&patch));
            }
        }

        Command::Diff {
            source,
            target,
            no_input_text,
            no_adjust,
            insert_only,
            json,
        } => {
            let options = DiffOptions {
                include_input_text: !no_input_text,
                adjust: !no_adjust,
                insert_only,
            };
            let script = EditScript::from_diff(&source, &target, options);
            print_script(&script, json)?;
        }
    }

    Ok(())
}
