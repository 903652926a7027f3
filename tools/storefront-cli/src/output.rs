//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use storefront_commerce::checkout::{CheckoutPhase, OrderStatus};
use storefront_commerce::{Currency, Money};

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

    /// Create a spinner for a backend call.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

fn format_row(cols: &[&str], widths: &[usize]) -> String {
    cols.iter()
        .zip(widths.iter())
        .map(|(col, width)| format!("{:width$}", col, width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Colored order status.
pub fn status_badge(status: OrderStatus) -> String {
    let label = status.display_name();
    match status {
        OrderStatus::Delivered => style(label).green().to_string(),
        OrderStatus::Pending | OrderStatus::Processing | OrderStatus::Shipped => {
            style(label).yellow().to_string()
        }
        OrderStatus::Cancelled => style(label).red().to_string(),
    }
}

/// Colored checkout phase.
pub fn phase_badge(phase: CheckoutPhase) -> String {
    let label = phase.display_name();
    match phase {
        CheckoutPhase::Empty => style(label).dim().to_string(),
        CheckoutPhase::Populated => style(label).green().to_string(),
        CheckoutPhase::Submitting => style(label).yellow().to_string(),
    }
}

/// A discount line: `-₺29.99`, or `-` when nothing is taken off.
pub fn format_discount(currency: Currency, amount: Money) -> String {
    if amount.is_zero() {
        "-".to_string()
    } else {
        format!("-{}", currency.format(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_row_pads_columns() {
        assert_eq!(format_row(&["ID", "NAME"], &[4, 6]), "ID    NAME");
        assert_eq!(format_row(&["1", "x", "extra"], &[2, 2]), "1   x");
    }

    #[test]
    fn test_badges_keep_labels() {
        let badge = status_badge(OrderStatus::Shipped);
        assert_eq!(console::strip_ansi_codes(&badge), OrderStatus::Shipped.display_name());
        let badge = phase_badge(CheckoutPhase::Empty);
        assert_eq!(console::strip_ansi_codes(&badge), CheckoutPhase::Empty.display_name());
    }

    #[test]
    fn test_format_discount() {
        assert_eq!(format_discount(Currency::USD, Money::zero()), "-");
        assert_eq!(format_discount(Currency::USD, Money::new(2999)), "-$29.99");
    }
}
