use crate::models::{IssueCategory, ValidationReport};
use crate::validator::{validate_file, SchemaValidator, ValidateOptions};
use crate::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Options for the validate command
#[derive(Debug, Clone, Default)]
pub struct ValidateArgs {
    /// Directory holding the JSON Schemas (looked up when unset)
    pub schemas_dir: Option<PathBuf>,
    pub strict: bool,
    pub json: bool,
}

/// Run validate command
pub fn run(file: &Path, args: &ValidateArgs) -> Result<()> {
    let schemas_dir = args
        .schemas_dir
        .clone()
        .unwrap_or_else(SchemaValidator::default_schemas_dir);
    let mut schemas = SchemaValidator::new(schemas_dir);
    let options = ValidateOptions { strict: args.strict };

    let report = validate_file(file, &mut schemas, &options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.to_json_output())?);
    } else {
        print_report(&report, args.strict);
    }

    if !report.is_valid() {
        anyhow::bail!("Validation failed for '{}'", report.file_name());
    }

    Ok(())
}

fn print_report(report: &ValidationReport, strict: bool) {
    let file_name = report.file_name();

    if let Some(content_type) = report.content_type {
        let mode = if strict { " (strict)" } else { "" };
        println!(
            "{}",
            format!(
                "🔍 Validating '{}' as type '{}'{}...",
                file_name,
                content_type.display_name(),
                mode
            )
            .cyan()
        );
    }

    println!();
    if report.is_valid() {
        println!(
            "{}",
            format!("✅ VALIDATION PASSED for '{}'", file_name).green().bold()
        );
        if let Some(content_type) = report.content_type {
            println!(
                "   The YAML structure matches the {} template.",
                content_type.display_name()
            );
        }
        return;
    }

    println!(
        "{}",
        format!("❌ VALIDATION FAILED for '{}'", file_name).red().bold()
    );
    println!("{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());

    for issue in &report.issues {
        match issue.category {
            IssueCategory::Schema => {
                println!("{}", "📝 Schema error:".yellow());
                println!("   Path: {}", issue.path.as_deref().unwrap_or("[root]"));
                println!("   Message: {}", issue.message);
            }
            IssueCategory::Graph => {
                println!("   {} {}", "GRAPH:".red(), issue.message);
            }
            IssueCategory::Structure => {
                println!("   {} {}", "ERROR:".red(), issue.message);
            }
        }
    }

    println!("{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());

    let graph_count = report.count_by_category(IssueCategory::Graph);
    if graph_count > 1 {
        println!("   {} graph problems found", graph_count);
    }
}
