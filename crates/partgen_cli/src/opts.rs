use std::path::PathBuf;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};

#[derive(Parser, Debug)]
#[command(name = "partgen")]
#[command(bin_name = "partgen")]
#[command(version, about, long_about = None)]
pub(crate) struct Opts {
    #[command(subcommand)]
    pub(crate) command: Command,

    /// Trace log file
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "trace.log")]
    pub(crate) trace: Option<PathBuf>,

    /// Settings file, remembers the output directory between runs
    #[arg(long, value_name = "FILE", default_value = "partgen_settings.txt")]
    pub(crate) settings: PathBuf,

    #[command(flatten)]
    pub(crate) verbose: Verbosity<InfoLevel>,
}

#[derive(Subcommand, Debug)]
#[command(arg_required_else_help(true))]
pub(crate) enum Command {
    /// Generate a symbol library from a parts file
    Generate {
        /// Parts file
        #[arg(long, value_name = "FILE")]
        parts: PathBuf,

        /// Symbol library containing the template symbols
        #[arg(long, value_name = "FILE", default_value = "BaseSymbols.kicad_sym")]
        library: PathBuf,

        /// Output directory, remembered for later runs
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
    /// Remember an output directory for later runs
    SetOutputDir {
        /// Output directory
        #[arg(long, value_name = "DIR")]
        path: PathBuf,
    },
    /// Show the remembered output directory
    ShowOutputDir {
    },
}
