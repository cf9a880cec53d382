//! Console output for the command-line tool.

use console::style;

use crate::boundary::BoundaryNotice;
use crate::cli::GeneratedChangeset;
use crate::domain::Bucket;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display the reason a run stopped early.
pub fn display_notice(notice: &BoundaryNotice) {
    match notice {
        BoundaryNotice::ExistingChangesets { .. } => display_success(&notice.to_string()),
        BoundaryNotice::HarvestFailed { .. } => {
            eprintln!("{} {}", style("⚠ WARNING:").yellow(), notice)
        }
        _ => println!("{} {}", style("ℹ").cyan(), notice),
    }
}

/// Format the bump summary lines shown before the document.
pub fn format_summary(generated: &GeneratedChangeset) -> Vec<String> {
    let document = &generated.document;
    vec![
        format!("Version bump: {}", style(document.bump()).bold()),
        format!("  - {} conventional commits", document.len()),
        format!(
            "  - {} breaking changes",
            document.commits(Bucket::Breaking).len()
        ),
    ]
}

/// Display the result of a run that produced a changeset.
pub fn display_generated(generated: &GeneratedChangeset) {
    for line in format_summary(generated) {
        println!("{}", line);
    }

    match &generated.path {
        Some(path) => display_success(&format!("Generated changeset: {}", path.display())),
        None => display_status("Dry run: changeset not written"),
    }

    println!("\n{}", style("Changeset content:").bold());
    println!("---");
    print!("{}", generated.contents);
    println!("---");
}
