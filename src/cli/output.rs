//! CLI output formatting utilities.

use console::{style, Style};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an error message to stderr.
    pub fn error(msg: &str) {
        eprintln!("{}", style(msg).red());
    }

    /// Print a warning message to stderr.
    pub fn warning(msg: &str) {
        eprintln!("{}", style(msg).yellow());
    }

    /// Print the search header.
    pub fn search_header(query: &str, matches: usize) {
        println!("\n{} {}", style("Search results for:").cyan().bold(), query);
        println!(
            "\n{} {} {}\n",
            style("Found").green(),
            matches,
            style("matches:").green()
        );
    }

    /// Print one ranked search result.
    pub fn search_result(rank: usize, text: &str, similarity: f32) {
        println!(
            "{} Text: \"{}\"",
            style(format!("{}.", rank)).cyan().bold(),
            style(text).bold()
        );
        println!(
            "   Similarity: {}\n",
            similarity_style(similarity).apply_to(format_similarity(similarity))
        );
    }
}

/// Colour for a similarity score: green above 0.8, yellow above 0.6, red otherwise
pub fn similarity_style(similarity: f32) -> Style {
    if similarity > 0.8 {
        Style::new().green()
    } else if similarity > 0.6 {
        Style::new().yellow()
    } else {
        Style::new().red()
    }
}

/// Render a similarity score as a percentage with two decimals
pub fn format_similarity(similarity: f32) -> String {
    format!("{:.2}%", similarity * 100.0)
}
