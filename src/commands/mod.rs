use crate::commands::split::{PlanCommand, SplitCommand};
use clap::{Parser, Subcommand};

pub mod split;

const NAMING_HELP: &str = "\
Naming format:
    #a = Album Title (top level TITLE)
    #c = CD/Album Performer (top level PERFORMER)
    #d = Date (REM DATE)
    #n = Track Index
    #p = Track Performer
    #t = Track Title

Default tags:
    Unknown Album/Artist/Title/Genre
    Default Year: 1900";

/// CLI for splitting single-file albums into tagged tracks using CUE sheets.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, after_help = NAMING_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(after_help = NAMING_HELP)]
    Split(SplitCommand),
    #[command(after_help = NAMING_HELP)]
    Plan(PlanCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::PathBuf;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn split_uses_defaults() {
        let cli = Cli::try_parse_from(["cue-split", "split", "album.cue"]).unwrap();
        let Commands::Split(cmd) = cli.command else {
            panic!("expected split");
        };

        assert_eq!(cmd.args.src_path, PathBuf::from("album.cue"));
        assert_eq!(cmd.args.format, "flac");
        assert_eq!(cmd.args.naming_spec, "#c - #d - #a/#n - #p - #t");
        assert_eq!(cmd.args.sox_exe, "sox");
        assert_eq!(cmd.args.wait, 5);
        assert_eq!(cmd.args.compression_level, None);
        assert_eq!(cmd.args.jobs, None);
    }

    #[test]
    fn plan_accepts_shared_options() {
        let cli = Cli::try_parse_from([
            "cue-split", "plan", "music", "-f", "wav", "-C", "8", "-n", "#n - #t", "-e",
            "cp1251", "--json",
        ])
        .unwrap();
        let Commands::Plan(cmd) = cli.command else {
            panic!("expected plan");
        };

        assert!(cmd.json);
        assert_eq!(cmd.args.format, "wav");
        assert_eq!(cmd.args.compression_level, Some(8.0));
        assert_eq!(cmd.args.naming_spec, "#n - #t");
        assert_eq!(cmd.args.encoding.as_deref(), Some("cp1251"));
    }
}
