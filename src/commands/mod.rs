use crate::commands::album::{ExtractCommand, NormalizeCommand, TocCommand, TracksCommand};
use clap::{Parser, Subcommand};

pub mod album;
pub mod handlers;

/// CLI for inspecting CUE/BIN audio albums stored in folders or zip archives.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Toc(TocCommand),
    Tracks(TracksCommand),
    Normalize(NormalizeCommand),
    Extract(ExtractCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parses_extract_arguments() {
        let cli = Cli::parse_from(["cuebox", "extract", "album.zip", "3", "out.bin", "-f"]);

        match cli.command {
            Commands::Extract(cmd) => assert_eq!(
                cmd,
                ExtractCommand {
                    path: PathBuf::from("album.zip"),
                    track: 3,
                    output: PathBuf::from("out.bin"),
                    force: true,
                }
            ),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn normalize_output_is_optional() {
        let cli = Cli::parse_from(["cuebox", "normalize", "album.cue"]);

        match cli.command {
            Commands::Normalize(cmd) => {
                assert_eq!(cmd.output, None);
                assert!(!cmd.force);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
