//! Pure formatting functions for UI output.
//!
//! Everything except the resolved version itself goes to stderr, so stdout can be
//! captured by build scripts.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::short_id;
use crate::resolver::ResolvedVersion;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning with a yellow warning icon.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Print the bare version on stdout.
pub fn display_version(resolved: &ResolvedVersion) {
    println!("{}", resolved.version);
}

/// Lines describing how a version was derived.
///
/// Shows the base tag, distance, increment and up to 10 commits that justified it.
pub fn explain_lines(resolved: &ResolvedVersion) -> Vec<String> {
    let mut lines = Vec::new();

    match &resolved.base_tag {
        Some(tag) => lines.push(format!("Base tag:  {} ({})", tag.name, tag.version)),
        None => lines.push(format!("Base tag:  none (from {})", resolved.base_version())),
    }
    lines.push(format!("Commit:    {}", resolved.commit));
    lines.push(format!("Distance:  {}", resolved.distance_from_tag));
    lines.push(format!("Increment: {}", resolved.bump.bump));
    if resolved.is_dirty {
        lines.push("Dirty:     yes".to_string());
    }

    if !resolved.bump.commits.is_empty() {
        lines.push(format!("Justified by {} commit(s):", resolved.bump.commits.len()));
        for id in resolved.bump.commits.iter().take(10) {
            let line = match resolved.find_commit(*id) {
                Some(commit) if commit.is_merge() => {
                    format!("  {} {} (merge)", short_id(*id, 7), commit.summary())
                }
                Some(commit) => format!("  {} {}", short_id(*id, 7), commit.summary()),
                None => format!("  {}", id),
            };
            lines.push(line);
        }
        if resolved.bump.commits.len() > 10 {
            lines.push(format!("  ... and {} more commits", resolved.bump.commits.len() - 10));
        }
    }

    lines
}

/// Print the derivation of a version on stderr.
pub fn display_explanation(resolved: &ResolvedVersion) {
    eprintln!("\n{}", style("Version resolution").bold());
    for line in explain_lines(resolved) {
        eprintln!("  {}", line);
    }
}

/// Display the proposed tag change (or initial tag).
///
/// Shows either:
/// - If updating: "From: old_tag -> To: new_tag"
/// - If initial: "Initial Tag: new_tag"
pub fn display_proposed_tag(old_tag: Option<&str>, new_tag: &str) {
    match old_tag {
        Some(old) => {
            eprintln!("\n{}", style("Proposed Tag Change:").bold());
            eprintln!("  From: {}", style(old).red());
            eprintln!("  To:   {}", style(new_tag).green());
        }
        None => {
            eprintln!("\n{}", style("Initial Tag:").bold());
            eprintln!("  New tag: {}", style(new_tag).green());
        }
    }
}

/// Display the git command that publishes a locally created tag.
pub fn display_manual_push_instruction(tag: &str, remote: &str) {
    eprintln!(
        "\n{} To publish this tag, run:\n  {}",
        style("→").yellow(),
        style(format!("git push {} {}", remote, tag)).cyan()
    );
}
