use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// scriptpack - run shell scripts bundled into the binary
#[derive(Parser, Debug)]
#[command(name = "scriptpack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stage the scripts and run one of them, exiting with its exit code
    Run {
        /// Script name; `.sh` is appended when no extension is given
        #[arg(value_name = "SCRIPT")]
        script: String,

        /// Arguments forwarded to the script unchanged
        #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,

        /// Keep the staged scripts after the run
        #[arg(long, default_value = "false")]
        keep: bool,

        /// Copy scripts from <DIR>/bash_scripts instead of the bundled set
        #[arg(long, value_name = "DIR")]
        project_root: Option<PathBuf>,

        /// Stage into the shared per-user directory (~/.scriptpack)
        #[arg(long, default_value = "false", conflicts_with = "staging_dir")]
        shared: bool,

        /// Stage into this fixed directory (shared mode)
        #[arg(long, value_name = "DIR")]
        staging_dir: Option<PathBuf>,

        /// Interpreter to launch scripts with
        #[arg(long, value_name = "PATH")]
        interpreter: Option<String>,

        /// Print a JSON report instead of the raw output
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// List the scripts a run would stage
    List {
        /// Copy scripts from <DIR>/bash_scripts instead of the bundled set
        #[arg(long, value_name = "DIR")]
        project_root: Option<PathBuf>,

        /// Print the names as a JSON array
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Regenerate the Available Scripts section of a README
    Readme {
        /// Scripts directory to describe (default: the bundled scripts)
        #[arg(long, value_name = "DIR")]
        scripts_dir: Option<PathBuf>,

        /// README file to update
        #[arg(long, value_name = "PATH", default_value = "README.md")]
        readme: PathBuf,

        /// Only report whether an update is needed; exit 1 if so
        #[arg(long, default_value = "false")]
        check: bool,
    },
}
