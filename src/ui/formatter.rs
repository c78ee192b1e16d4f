//! Pure formatting functions for console output.

use console::style;

use crate::domain::{StepStatus, WorkflowReport};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print a step banner before a workflow step starts.
pub fn display_step(name: &str) {
    println!("\n{}", style(name).bold());
}

/// Print one line of streamed output from the external release tool.
pub fn display_tool_line(line: &str) {
    println!("  {}", style(line).dim());
}

/// Print the end-of-run summary of all step outcomes.
pub fn display_report(report: &WorkflowReport) {
    println!("\n{}", style("Workflow summary:").bold());
    for step in report.steps() {
        match step.status {
            StepStatus::Completed => println!("  {} {}", style("✓").green(), step.name),
            StepStatus::Failed => println!("  {} {}", style("✗").red(), step.name),
        }
    }

    if report.all_completed() {
        display_success("All steps completed");
    } else {
        display_error(&format!(
            "{} step(s) failed; review the log above",
            report.failed_count()
        ));
    }
}
