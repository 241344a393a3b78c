use colored::Colorize;
use serde::Serialize;
use std::path::Path;

use pcltoggle::engine::Plan;
use pcltoggle::result::{Failure, ToggleMode, ToggleResult};
use pcltoggle::utils::display_path;

/// `status` report, also the JSON shape of `pcltoggle status --json`.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub root: String,
    pub root_source: &'static str,
    pub root_exists: bool,
    pub can_disable: bool,
    pub can_enable: bool,
}

pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => print_error(&format!("could not encode output: {e}")),
    }
}

pub fn print_header(mode: ToggleMode, root: &Path) {
    println!("{}", format!("=== {} ===", mode.label()).bold().white());
    println!("  {} {}", "Root:".bold(), display_path(root).dimmed());
    println!();
}

pub fn print_renamed(from: &Path, to: &Path) {
    let new_name = to
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    println!(
        "  {} {}  ->  {}",
        "Renamed".green(),
        display_path(from).dimmed(),
        new_name.yellow()
    );
}

pub fn print_failure(failure: &Failure) {
    eprintln!(
        "  {} {}: {}",
        "Failed".red().bold(),
        display_path(&failure.path).dimmed(),
        failure.reason.to_string().red()
    );
}

pub fn print_plan(plan: &Plan) {
    for m in &plan.moves {
        println!(
            "  {} {}  ->  {}",
            "Would rename".cyan(),
            display_path(&m.from).dimmed(),
            display_path(&m.to).yellow()
        );
    }
    for failure in &plan.failures {
        print_failure(failure);
    }
    println!();
    println!(
        "{}",
        format!(
            "{} file(s) would be renamed. This was a dry run.",
            plan.moves.len()
        )
        .yellow()
        .bold()
    );
}

pub fn print_summary(result: &ToggleResult) {
    println!();
    if result.cancelled {
        println!(
            "{} {}",
            "Cancelled.".yellow().bold(),
            format!("{} file(s) renamed before stopping.", result.renamed_count).yellow()
        );
    } else if result.failures.is_empty() {
        println!(
            "{} {}",
            "Done!".green().bold(),
            format!("{} file(s) renamed.", result.renamed_count).green()
        );
    } else {
        println!(
            "{} {}",
            "Finished with errors.".red().bold(),
            format!(
                "{} file(s) renamed, {} failed.",
                result.renamed_count,
                result.failures.len()
            )
            .red()
        );
    }
}

pub fn print_status(report: &StatusReport) {
    println!("{}", "=== Xamarin PCL status ===".bold().white());
    println!(
        "  {:<14} {}  {}",
        "Root:",
        report.root,
        format!("[{}]", report.root_source).dimmed()
    );
    if !report.root_exists {
        print_warning("root directory does not exist or is not a directory");
        return;
    }
    println!("  {:<14} {}", "Can disable:", yes_no(report.can_disable));
    println!("  {:<14} {}", "Can enable:", yes_no(report.can_enable));
}

fn yes_no(value: bool) -> colored::ColoredString {
    if value {
        "yes".green()
    } else {
        "no".dimmed()
    }
}

pub fn print_warning(msg: &str) {
    println!("{} {}", "Warning:".red().bold(), msg.red());
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg.red());
}
