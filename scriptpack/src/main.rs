mod cli;
mod commands;

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use scriptpack_core::observability;

fn main() -> Result<()> {
    observability::init_tracing();
    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Run {
            script,
            args,
            keep,
            project_root,
            shared,
            staging_dir,
            interpreter,
            json,
        } => {
            let opts = commands::run::RunOptions {
                keep,
                project_root,
                shared,
                staging_dir,
                interpreter,
                json,
            };
            commands::run::cmd_run(&script, &args, &opts)?
        }
        Commands::List { project_root, json } => {
            commands::list::cmd_list(project_root, json)?;
            0
        }
        Commands::Readme {
            scripts_dir,
            readme,
            check,
        } => commands::readme::cmd_readme(scripts_dir.as_deref(), &readme, check)?,
    };

    if code != 0 {
        std::io::stdout().flush()?;
        std::process::exit(code);
    }
    Ok(())
}
