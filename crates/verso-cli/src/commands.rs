use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use verso_diff::{Diff, KeyDiff};
use verso_merge::MergeEngine;
use verso_value::Value;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Diff(args) => cmd_diff(args, &cli.format),
        Command::Merge(args) => cmd_merge(args, &cli.format),
    }
}

fn load_value(path: &Path) -> anyhow::Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    Ok(Value::from_json(&json))
}

fn cmd_diff(args: DiffArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let before = load_value(&args.before)?;
    let after = load_value(&args.after)?;
    let diff = verso_diff::diff(&before, &after);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diff)?),
        OutputFormat::Text => {
            if diff.is_unchanged() {
                println!("No changes.");
            } else {
                print_diff(&diff, 0);
            }
        }
    }
    Ok(())
}

fn cmd_merge(args: MergeArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let before = load_value(&args.before)?;
    let after = load_value(&args.after)?;
    let latest = load_value(&args.latest)?;

    let engine = MergeEngine::with_map_accessor();
    let (merged, report) = engine.merge_with_report(&before, &after, &latest)?;

    match format {
        OutputFormat::Json => {
            if args.report {
                let doc = serde_json::json!({
                    "merged": merged.to_json(),
                    "conflicts": report.conflicts,
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&merged.to_json())?);
            }
        }
        OutputFormat::Text => {
            println!("{}", serde_json::to_string_pretty(&merged.to_json())?);
            if args.report {
                if report.is_clean() {
                    println!("{} no concurrent edits", "✓".green());
                } else {
                    for conflict in &report.conflicts {
                        let lost = conflict
                            .latest
                            .as_ref()
                            .map(|v| v.to_json().to_string())
                            .unwrap_or_else(|| "(absent)".into());
                        println!(
                            "{} {}: latest value {} was overwritten",
                            "conflict".yellow().bold(),
                            conflict.path.bold(),
                            lost,
                        );
                    }
                }
            }
        }
    }
    Ok(())
}

fn print_diff(diff: &Diff, depth: usize) {
    let pad = "  ".repeat(depth);
    match diff {
        Diff::Unchanged => {}
        Diff::Value { before, after } => {
            println!(
                "{pad}{} {} {} {}",
                "~".yellow(),
                before.to_json(),
                "->".dimmed(),
                after.to_json()
            );
        }
        Diff::Keys(entries) => {
            for (key, verdict) in entries {
                match verdict {
                    KeyDiff::Unchanged => {}
                    KeyDiff::Added(value) => {
                        println!("{pad}{} {}: {}", "+".green(), key.bold(), value.to_json());
                    }
                    KeyDiff::Removed(value) => {
                        println!("{pad}{} {}: {}", "-".red(), key.bold(), value.to_json());
                    }
                    KeyDiff::Changed(Diff::Value { before, after }) => {
                        println!(
                            "{pad}{} {}: {} {} {}",
                            "~".yellow(),
                            key.bold(),
                            before.to_json(),
                            "->".dimmed(),
                            after.to_json()
                        );
                    }
                    KeyDiff::Changed(sub) => {
                        println!("{pad}{} {}:", "~".yellow(), key.bold());
                        print_diff(sub, depth + 1);
                    }
                }
            }
        }
    }
}
