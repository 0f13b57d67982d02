use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "verso",
    about = "Verso — structural diff and three-way merge for versioned values",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show structural changes between two JSON documents
    Diff(DiffArgs),
    /// Merge an edit (before → after) onto the latest document
    Merge(MergeArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// The document as the author read it
    pub before: PathBuf,
    /// The document as the author rewrote it
    pub after: PathBuf,
}

#[derive(Args)]
pub struct MergeArgs {
    /// The document as the author read it
    pub before: PathBuf,
    /// The document as the author rewrote it
    pub after: PathBuf,
    /// The currently stored document
    pub latest: PathBuf,
    /// Also print positions where latest lost a concurrent scalar edit
    #[arg(long)]
    pub report: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_diff() {
        let cli = Cli::try_parse_from(["verso", "diff", "a.json", "b.json"]).unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.before, PathBuf::from("a.json"));
            assert_eq!(args.after, PathBuf::from("b.json"));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_merge() {
        let cli =
            Cli::try_parse_from(["verso", "merge", "a.json", "b.json", "c.json"]).unwrap();
        if let Command::Merge(args) = cli.command {
            assert_eq!(args.latest, PathBuf::from("c.json"));
            assert!(!args.report);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_merge_with_report() {
        let cli = Cli::try_parse_from([
            "verso", "merge", "a.json", "b.json", "c.json", "--report",
        ])
        .unwrap();
        if let Command::Merge(args) = cli.command {
            assert!(args.report);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_json_format() {
        let cli =
            Cli::try_parse_from(["verso", "--format", "json", "diff", "a.json", "b.json"])
                .unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn parse_verbose() {
        let cli =
            Cli::try_parse_from(["verso", "--verbose", "diff", "a.json", "b.json"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn diff_requires_two_paths() {
        assert!(Cli::try_parse_from(["verso", "diff", "a.json"]).is_err());
    }
}
