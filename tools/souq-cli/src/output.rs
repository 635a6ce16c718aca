//! Output formatting for the CLI.

use console::style;
use souq_commerce::search::{PageLink, Pagination};
use souq_commerce::Money;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        println!("  {}", format_row(cols, widths));
    }

    /// Print the "showing x-y of n" line and the page strip.
    pub fn pagination(&self, pagination: &Pagination) {
        if self.json {
            return;
        }
        println!(
            "\n  {}",
            style(format!(
                "Showing {}-{} of {}",
                pagination.from, pagination.to, pagination.total
            ))
            .dim()
        );

        let links = pagination.page_links(2);
        if !links.is_empty() {
            println!("  {}", page_strip(&links, pagination.current_page));
        }
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Pad each column to its width. Widths count characters, not bytes, so
/// Arabic names line up.
pub fn format_row(cols: &[&str], widths: &[usize]) -> String {
    cols.iter()
        .zip(widths.iter())
        .map(|(col, width)| {
            let pad = width.saturating_sub(col.chars().count());
            format!("{}{}", col, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Render page links as `‹ 1 … 4 [5] 6 … 12 ›`.
pub fn page_strip(links: &[PageLink], current: usize) -> String {
    let mut parts = vec!["‹".to_string()];
    for link in links {
        parts.push(match link {
            PageLink::Page(page) if *page == current => format!("[{}]", page),
            PageLink::Page(page) => page.to_string(),
            PageLink::Gap => "…".to_string(),
        });
    }
    parts.push("›".to_string());
    parts.join(" ")
}

/// Format an optional price, for products the backend sent without one.
pub fn price_cell(price: Option<Money>) -> String {
    price
        .map(|p| p.display())
        .unwrap_or_else(|| "n/a".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use souq_commerce::Currency;

    #[test]
    fn test_format_row_counts_chars() {
        assert_eq!(format_row(&["قهوة", "5"], &[6, 3]), "قهوة    5");
        assert_eq!(format_row(&["toolong", "x"], &[3, 1]), "toolong  x");
    }

    #[test]
    fn test_page_strip() {
        let links = [
            PageLink::Page(1),
            PageLink::Gap,
            PageLink::Page(4),
            PageLink::Page(5),
            PageLink::Page(6),
            PageLink::Gap,
            PageLink::Page(12),
        ];
        assert_eq!(page_strip(&links, 5), "‹ 1 … 4 [5] 6 … 12 ›");
    }

    #[test]
    fn test_price_cell() {
        assert_eq!(price_cell(None), "n/a");
        assert_eq!(
            price_cell(Some(Money::from_major(9_000, Currency::SYP))),
            "9,000 ل.س"
        );
    }
}
