//! Terminal output helpers shared by the commands

use colored::*;

pub fn section_header(title: &str) {
    println!("\n{}", title.bold().cyan());
}

/// Display a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Display an info message
pub fn info(message: &str) {
    println!("{} {}", "●".blue(), message);
}

pub fn warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Display a process/action message
pub fn action(message: &str) {
    println!("{} {}", "▶".cyan(), message);
}

/// Tree structure item
pub fn tree_item(is_last: bool, label: &str, value: Option<&str>) {
    let prefix = if is_last { "└─" } else { "├─" };
    if let Some(val) = value {
        println!("{} {}: {}", prefix.dimmed(), label, val);
    } else {
        println!("{} {}", prefix.dimmed(), label);
    }
}
