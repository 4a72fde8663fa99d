use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use errtree_diff::{CompareOptions, DiffResult, ErrorTreeComparator};
use errtree_types::{AnnotationMap, ErrorNode};
use tracing::debug;

use crate::cli::{AnnotationsArgs, Cli, Command, DiffArgs, OutputFormat};

/// Run a command, returning `true` when the compared inputs match.
pub fn run_command(cli: Cli) -> anyhow::Result<bool> {
    let result = match cli.command {
        Command::Diff(args) => cmd_diff(args)?,
        Command::Annotations(args) => cmd_annotations(args)?,
    };
    print_result(&result, &cli.format)?;
    Ok(result.is_match)
}

fn cmd_diff(args: DiffArgs) -> anyhow::Result<DiffResult> {
    let mut options = match &args.config {
        Some(path) => CompareOptions::from_file(path)?,
        None => CompareOptions::default(),
    };
    if args.strict_aggregate_messages {
        options.strict_aggregate_messages = true;
    }
    if let Some(max_depth) = args.max_depth {
        options.max_depth = max_depth;
    }
    debug!(?options, "comparator options");

    let actual = load_tree(&args.actual)?;
    let expected = load_tree(&args.expected)?;
    debug!(
        actual_depth = ?actual.as_ref().map(ErrorNode::chain_depth),
        expected_depth = ?expected.as_ref().map(ErrorNode::chain_depth),
        "loaded error trees"
    );

    let comparator = ErrorTreeComparator::new(options);
    Ok(comparator.compare(actual.as_ref(), expected.as_ref()))
}

fn cmd_annotations(args: AnnotationsArgs) -> anyhow::Result<DiffResult> {
    let actual = load_tree(&args.actual)?;
    let expected = load_tree(&args.expected)?;

    let empty = AnnotationMap::new();
    let actual = actual.as_ref().map_or(&empty, |n| n.annotations());
    let expected = expected.as_ref().map_or(&empty, |n| n.annotations());

    Ok(errtree_diff::compare_annotations(actual, expected))
}

fn load_tree(path: &Path) -> anyhow::Result<Option<ErrorNode>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid error tree in {}", path.display()))
}

fn print_result(result: &DiffResult, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Text if result.is_match => {
            println!("{} Error trees match.", "✓".green().bold())
        }
        OutputFormat::Text => {
            println!("{} Error trees differ:", "✗".red().bold());
            for line in result.message.lines() {
                println!("  {line}");
            }
        }
    }
    Ok(())
}
