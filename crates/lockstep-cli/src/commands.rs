use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use lockstep_diff::{CompareOptions, MemorySink, TextComparer, TreeComparer};
use serde_json::json;
use tracing::{debug, info};

use crate::cli::*;
use crate::console::ConsoleSink;

/// Result of a completed comparison, mapped to the process exit status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Equal,
    Different,
}

/// Run the parsed command, writing the report to `out`.
pub fn run_command(cli: Cli, out: &mut impl Write) -> anyhow::Result<Outcome> {
    let use_color = !cli.no_color;
    match cli.command {
        Command::Text(args) => {
            let options = resolve_options(cli.config.as_deref(), &args)?;
            cmd_text(&args, &options, cli.format, use_color, out)
        }
        Command::Xml(args) => {
            let options = resolve_options(cli.config.as_deref(), &args)?;
            cmd_xml(&args, &options, cli.format, use_color, out)
        }
    }
}

/// Load options from the config file, if any, then apply command-line flags.
pub fn resolve_options(config: Option<&Path>, args: &CompareArgs) -> anyhow::Result<CompareOptions> {
    let mut options = match config {
        Some(path) => CompareOptions::load(path)
            .with_context(|| format!("loading options from {}", path.display()))?,
        None => CompareOptions::default(),
    };
    options.ignore_empty_lines |= args.ignore_empty_lines;
    options.trim_lines |= args.trim;
    options.compress_spaces |= args.compress_spaces;
    options.ignore_case |= args.ignore_case;
    options.ignore_attributes_order |= args.ignore_attribute_order;
    options.ignore_ignorable_attribute |= args.ignore_ignorable;
    options.write_content_if_equals |= args.show_equal;
    if let Some(limit) = args.diff_limit {
        options.diff_limit = limit;
    }
    if let Some(limit) = args.sync_limit {
        options.sync_limit = limit;
    }
    debug!(?options, "resolved comparison options");
    Ok(options)
}

fn cmd_text(
    args: &CompareArgs,
    options: &CompareOptions,
    format: OutputFormat,
    use_color: bool,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    let received = read(&args.received)?;
    let expected = read(&args.expected)?;
    let comparer = TextComparer::new(options);

    let report = match format {
        OutputFormat::Text => {
            let mut sink = ConsoleSink::new(&mut *out, use_color);
            let report = comparer.compare(&received, &expected, &mut sink);
            sink.finish().context("writing report")?;
            report
        }
        OutputFormat::Json => {
            let mut sink = MemorySink::new();
            let report = comparer.compare(&received, &expected, &mut sink);
            write_json(out, json!({ "report": report, "lines": sink.lines() }))?;
            report
        }
    };
    info!(verdict = ?report.verdict, divergences = report.divergences, "text comparison finished");
    Ok(outcome(report.is_equal()))
}

fn cmd_xml(
    args: &CompareArgs,
    options: &CompareOptions,
    format: OutputFormat,
    use_color: bool,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    let received = lockstep_xml::parse_file(&args.received)
        .with_context(|| format!("parsing {}", args.received.display()))?;
    let expected = lockstep_xml::parse_file(&args.expected)
        .with_context(|| format!("parsing {}", args.expected.display()))?;
    let comparer = TreeComparer::new(options);

    let report = match format {
        OutputFormat::Text => {
            let mut sink = ConsoleSink::new(&mut *out, use_color);
            let report = comparer.compare(Some(&received), Some(&expected), &mut sink)?;
            sink.finish().context("writing report")?;
            report
        }
        OutputFormat::Json => {
            let mut sink = MemorySink::new();
            let report = comparer.compare(Some(&received), Some(&expected), &mut sink)?;
            write_json(out, json!({ "report": report, "lines": sink.lines() }))?;
            report
        }
    };
    info!(verdict = %report.verdict, divergences = report.divergences, "tree comparison finished");
    Ok(outcome(report.is_equal()))
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn write_json(out: &mut impl Write, value: serde_json::Value) -> anyhow::Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(&value)?).context("writing report")?;
    Ok(())
}

fn outcome(equal: bool) -> Outcome {
    if equal {
        Outcome::Equal
    } else {
        Outcome::Different
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;
    use tempfile::TempDir;

    use super::*;

    fn args(received: PathBuf, expected: PathBuf, extra: &[&str]) -> CompareArgs {
        let mut argv = vec![
            "lockstep".to_string(),
            "text".to_string(),
            received.display().to_string(),
            expected.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Text(args) | Command::Xml(args) => args,
        }
    }

    /// Write both inputs into a fresh directory and return their paths.
    fn inputs(name: &str, received: &str, expected: &str) -> (TempDir, String, String) {
        let dir = tempfile::tempdir().unwrap();
        let r = dir.path().join(format!("received.{name}"));
        let e = dir.path().join(format!("expected.{name}"));
        fs::write(&r, received).unwrap();
        fs::write(&e, expected).unwrap();
        (dir, r.display().to_string(), e.display().to_string())
    }

    fn run(argv: &[&str]) -> (anyhow::Result<Outcome>, String) {
        let cli = Cli::try_parse_from(argv.iter().copied()).unwrap();
        let mut out = Vec::new();
        let result = run_command(cli, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn flags_override_defaults() {
        let a = args("a".into(), "b".into(), &["--trim", "--diff-limit", "0", "--sync-limit", "2"]);
        let options = resolve_options(None, &a).unwrap();
        assert!(options.trim_lines);
        assert!(!options.ignore_case);
        assert_eq!(options.diff_limit, 0);
        assert_eq!(options.sync_limit, 2);
    }

    #[test]
    fn flags_layer_over_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("lockstep.toml");
        fs::write(&config, "ignore_case = true\ndiff_limit = 4\n").unwrap();
        let a = args("a".into(), "b".into(), &["--compress-spaces"]);
        let options = resolve_options(Some(&config), &a).unwrap();
        assert!(options.ignore_case);
        assert!(options.compress_spaces);
        assert_eq!(options.diff_limit, 4);
    }

    #[test]
    fn bad_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("lockstep.toml");
        fs::write(&config, "diff_limit = \"many\"\n").unwrap();
        let a = args("a".into(), "b".into(), &[]);
        assert!(resolve_options(Some(&config), &a).is_err());
    }

    #[test]
    fn text_command_reports_divergence() {
        let (_dir, r, e) = inputs("txt", "Alpha\nbeta\n", "alpha\nbeta\n");

        let (result, out) = run(&["lockstep", "--no-color", "text", &r, &e]);
        assert_eq!(result.unwrap(), Outcome::Different);
        assert_eq!(out, "--- received\nAlpha\n===\n+++ expected\nalpha\n===\n");

        let (result, out) = run(&["lockstep", "--no-color", "text", &r, &e, "--ignore-case"]);
        assert_eq!(result.unwrap(), Outcome::Equal);
        assert!(out.is_empty());
    }

    #[test]
    fn xml_command_compares_documents() {
        let (_dir, r, e) = inputs(
            "xml",
            r#"<r><a k="1"/><b>t</b></r>"#,
            r#"<r><b>t</b></r>"#,
        );
        let (result, out) = run(&["lockstep", "--no-color", "xml", &r, &e]);
        assert_eq!(result.unwrap(), Outcome::Different);
        assert!(out.starts_with("--- exceeded\n"));
        assert!(out.contains(r#"<a k="1"/>"#));
        assert!(out.contains("+++ expected\n"));

        let (result, out) = run(&["lockstep", "--no-color", "xml", &r, &r]);
        assert_eq!(result.unwrap(), Outcome::Equal);
        assert!(out.is_empty());
    }

    #[test]
    fn xml_attribute_order_flag() {
        let (_dir, r, e) = inputs("xml", r#"<r a="1" b="2"/>"#, r#"<r b="2" a="1"/>"#);
        let (result, _) = run(&["lockstep", "--no-color", "xml", &r, &e]);
        assert_eq!(result.unwrap(), Outcome::Different);
        let (result, _) = run(&["lockstep", "--no-color", "xml", &r, &e, "--ignore-attribute-order"]);
        assert_eq!(result.unwrap(), Outcome::Equal);
    }

    #[test]
    fn malformed_xml_is_an_error() {
        let (_dir, r, e) = inputs("xml", "<r><a></r>", "<r/>");
        let (result, out) = run(&["lockstep", "xml", &r, &e]);
        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("parsing"));
        assert!(out.is_empty());
    }

    #[test]
    fn json_format_prints_report() {
        let (_dir, r, e) = inputs("txt", "Alpha\nbeta\n", "alpha\nbeta\n");
        let (result, out) = run(&["lockstep", "--format", "json", "text", &r, &e]);
        assert_eq!(result.unwrap(), Outcome::Different);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["report"]["verdict"], "different");
        assert_eq!(value["report"]["divergences"], 1);
        assert_eq!(value["lines"][1], "Alpha");
    }

    #[test]
    fn json_format_for_xml() {
        let (_dir, r, e) = inputs("xml", "<r><v>1</v></r>", "<r><v>2</v></r>");
        let (result, out) = run(&["lockstep", "--format", "json", "xml", &r, &e]);
        assert_eq!(result.unwrap(), Outcome::Different);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["report"]["verdict"]["different"], "child_differs");
        assert_eq!(value["lines"][1], "<v>1</v>");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let r = dir.path().join("nope").display().to_string();
        let e = dir.path().join("nada").display().to_string();
        let (result, _) = run(&["lockstep", "text", &r, &e]);
        assert!(result.unwrap_err().to_string().contains("reading"));
    }
}
