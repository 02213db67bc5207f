//! Pure formatting functions for UI output.
//!
//! Functions here only format and print; they never read input.

use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Render an old -> new version change.
///
/// Returns the plain text; colors are added only when the terminal supports
/// them.
pub fn format_version_change(old: &str, new: &str) -> String {
    format!("{} -> {}", style(old).red(), style(new).green())
}

/// Display the version change computed by a bump or begin-dev.
pub fn display_version_change(old: &str, new: &str) {
    println!("{}", format_version_change(old, new));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_version_change_contains_both_versions() {
        console::set_colors_enabled(false);
        assert_eq!(format_version_change("0.5.0", "0.6.0"), "0.5.0 -> 0.6.0");
    }

    #[test]
    fn test_display_functions_do_not_panic() {
        display_error("test error");
        display_success("test success");
    }
}
