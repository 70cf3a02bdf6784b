use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lockstep",
    about = "Compare received output against an expected reference",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML file with comparison options; flags override its values
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Render divergences without terminal colors
    #[arg(long, global = true)]
    pub no_color: bool,

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
    /// Compare two text files line by line
    Text(CompareArgs),
    /// Compare two XML documents structurally
    Xml(CompareArgs),
}

#[derive(Args)]
pub struct CompareArgs {
    /// The output under test
    pub received: PathBuf,
    /// The reference output
    pub expected: PathBuf,

    #[arg(long)]
    pub ignore_empty_lines: bool,
    /// Trim leading and trailing whitespace before comparing
    #[arg(long)]
    pub trim: bool,
    #[arg(long)]
    pub compress_spaces: bool,
    #[arg(long)]
    pub ignore_case: bool,
    #[arg(long)]
    pub ignore_attribute_order: bool,
    /// Skip the markup-compatibility Ignorable attribute
    #[arg(long)]
    pub ignore_ignorable: bool,
    /// Stop once divergences exceed this many (0 stops at the first)
    #[arg(long)]
    pub diff_limit: Option<usize>,
    /// Lines searched ahead when resynchronizing (0 disables resync)
    #[arg(long)]
    pub sync_limit: Option<usize>,
    /// Echo matching lines as well as divergences
    #[arg(long)]
    pub show_equal: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_text() {
        let cli = Cli::try_parse_from(["lockstep", "text", "got.txt", "want.txt"]).unwrap();
        if let Command::Text(args) = cli.command {
            assert_eq!(args.received, PathBuf::from("got.txt"));
            assert_eq!(args.expected, PathBuf::from("want.txt"));
            assert!(!args.trim);
            assert_eq!(args.diff_limit, None);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_xml_with_overrides() {
        let cli = Cli::try_parse_from([
            "lockstep", "xml", "a.xml", "b.xml",
            "--ignore-attribute-order", "--ignore-case", "--diff-limit", "3",
        ]).unwrap();
        if let Command::Xml(args) = cli.command {
            assert!(args.ignore_attribute_order);
            assert!(args.ignore_case);
            assert_eq!(args.diff_limit, Some(3));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_sync_limit_zero() {
        let cli = Cli::try_parse_from(["lockstep", "text", "a", "b", "--sync-limit", "0"]).unwrap();
        if let Command::Text(args) = cli.command {
            assert_eq!(args.sync_limit, Some(0));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_globals() {
        let cli = Cli::try_parse_from([
            "lockstep", "--verbose", "--no-color", "--config", "lockstep.toml", "text", "a", "b",
        ]).unwrap();
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert_eq!(cli.config, Some(PathBuf::from("lockstep.toml")));
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["lockstep", "--format", "json", "xml", "a", "b"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn both_paths_required() {
        assert!(Cli::try_parse_from(["lockstep", "text", "only-one"]).is_err());
    }
}
