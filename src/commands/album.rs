use clap::Parser;
use std::path::PathBuf;

/// Prints the CUETools database TOC of an album.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct TocCommand {
    /// Path to a .cue file or a .zip archive containing one
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

/// Lists the playable tracks of an album.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct TracksCommand {
    /// Path to a .cue file or a .zip archive containing one
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

/// Rewrites a cue sheet in canonical layout.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct NormalizeCommand {
    /// Input cue sheet
    #[arg(value_name = "INPUT_CUE")]
    pub input_cue: PathBuf,

    /// Output cue sheet, defaults to stdout
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Force overwrite of the output file if it already exists
    #[arg(long, short = 'f', value_name = "FORCE", default_value_t = false)]
    pub force: bool,
}

/// Copies the raw bytes of one track to a file.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct ExtractCommand {
    /// Path to a .cue file or a .zip archive containing one
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Track number as written in the cue sheet
    #[arg(value_name = "TRACK")]
    pub track: u32,

    /// Output file path
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Force overwrite of the output file if it already exists
    #[arg(long, short = 'f', value_name = "FORCE", default_value_t = false)]
    pub force: bool,
}
