use clap::{Args, Parser};
use std::path::PathBuf;

/// Options shared by every command that reads CUE sheets.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct SplitArgs {
    /// Path to a CUE file or a directory
    #[arg(value_name = "SRC_PATH")]
    pub src_path: PathBuf,

    /// Additional comments in the format of 'KEY: VALUE NKEY: NVALUE'
    #[arg(long, short = 'c', value_name = "COMMENT")]
    pub comment: Option<String>,

    /// SoX compression level, SoX default if omitted
    #[arg(long, short = 'C', value_name = "LEVEL")]
    pub compression_level: Option<f64>,

    /// Output directory, defaults to <CUE sheet parent directory>/tracks
    #[arg(long, short = 'd', value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// CUE sheet file encoding, detected if omitted
    #[arg(long, short = 'e', value_name = "ENCODING")]
    pub encoding: Option<String>,

    /// Output file format, must be supported by SoX
    #[arg(long, short = 'f', value_name = "FORMAT", default_value = "flac")]
    pub format: String,

    /// Output naming format
    #[arg(
        long,
        short = 'n',
        value_name = "NAMING_SPEC",
        default_value = "#c - #d - #a/#n - #p - #t"
    )]
    pub naming_spec: String,

    /// SoX command name or full path to an executable
    #[arg(long, short = 's', value_name = "SOX_EXE", default_value = "sox")]
    pub sox_exe: String,

    /// Delay each CUE sheet processing by this many seconds
    #[arg(long, short = 'w', value_name = "SECONDS", default_value_t = 5)]
    pub wait: u64,

    /// Number of tracks converted in parallel, defaults to one less than the CPU count
    #[arg(long, short = 'j', value_name = "JOBS")]
    pub jobs: Option<usize>,
}

/// Splits every CUE sheet found into tagged per-track files.
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct SplitCommand {
    #[command(flatten)]
    pub args: SplitArgs,
}

/// Prints the planned SoX commands without running them.
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct PlanCommand {
    #[command(flatten)]
    pub args: SplitArgs,

    /// Print the planned sheets as JSON instead of command lines
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
