//! Amount input field handling
//!
//! The amount can be edited by typing into a text field (in the display
//! currency) or by dragging a slider (in the reference currency). Both paths
//! feed the same clamped reference amount, and the text field is re-derived
//! from it when it loses focus.

use super::config::CalculatorConfig;
use super::engine::ProjectionEngine;
use super::points::ProjectionResult;
use crate::currency::{self, DisplayCurrency};

/// Format a display amount as whole units with `,` thousands separators
pub fn format_input_text(amount_display: f64) -> String {
    let whole = amount_display.max(0.0).round();
    let digits = format!("{:.0}", whole);

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Parse user text by keeping only its digits
///
/// Returns `None` when nothing numeric remains, which means "no value" rather
/// than zero.
pub fn parse_input_text(text: &str) -> Option<f64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Reformat partially typed text, keeping an empty field empty
pub fn reformat_input_text(text: &str) -> String {
    parse_input_text(text).map(format_input_text).unwrap_or_default()
}

/// Keeps the amount text field and the calculator config in sync
#[derive(Debug, Clone)]
pub struct AmountEditor<'a> {
    engine: &'a ProjectionEngine,
    config: CalculatorConfig,
    text: String,
}

impl<'a> AmountEditor<'a> {
    pub fn new(engine: &'a ProjectionEngine, config: CalculatorConfig) -> Self {
        let config = config.with_base_amount(config.base_amount_reference);
        let mut editor = Self {
            engine,
            config,
            text: String::new(),
        };
        editor.refresh_text();
        editor
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Current content of the text field
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Clamped base amount converted for display
    pub fn display_amount(&self) -> f64 {
        let lookup = self.engine.rate_for(&self.config.display_currency);
        self.engine.display_amount(self.config.base_amount_reference, lookup)
    }

    /// Handle a keystroke in the text field
    ///
    /// The text keeps what the user typed (digits only, regrouped). A
    /// non-empty value is converted back to the reference currency and
    /// clamped; an empty field leaves the amount unchanged.
    pub fn type_text(&mut self, text: &str) {
        self.text = reformat_input_text(text);

        if let Some(amount_display) = parse_input_text(text) {
            let lookup = self.engine.rate_for(&self.config.display_currency);
            let amount_ref = currency::reference_amount(amount_display, lookup);
            self.config = self.config.with_base_amount(amount_ref);
        }
    }

    /// Handle the text field losing focus
    pub fn blur(&mut self) {
        self.refresh_text();
    }

    /// Handle a slider drag to a reference amount
    pub fn drag_slider(&mut self, amount_ref: f64) {
        self.config = self.config.with_base_amount(amount_ref);
        self.refresh_text();
    }

    /// Switch display currency without touching the reference amount
    pub fn select_currency(&mut self, currency: DisplayCurrency) {
        self.config = self.config.with_display_currency(currency);
        self.refresh_text();
    }

    /// Apply any other config change, re-clamping the amount
    pub fn update_config<F>(&mut self, edit: F)
    where
        F: FnOnce(&CalculatorConfig) -> CalculatorConfig,
    {
        let edited = edit(&self.config);
        self.config = edited.with_base_amount(edited.base_amount_reference);
        self.refresh_text();
    }

    pub fn projection(&self) -> ProjectionResult {
        self.engine.project(&self.config)
    }

    fn refresh_text(&mut self) {
        self.text = format_input_text(self.display_amount());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::config::{DEFAULT_MAX_AMOUNT, DEFAULT_MIN_AMOUNT};

    #[test]
    fn test_format_input_text() {
        assert_eq!(format_input_text(0.0), "0");
        assert_eq!(format_input_text(999.0), "999");
        assert_eq!(format_input_text(1_000.0), "1,000");
        assert_eq!(format_input_text(475_000.0), "475,000");
        assert_eq!(format_input_text(1_234_567.6), "1,234,568");
        assert_eq!(format_input_text(100_000_000.0), "100,000,000");
    }

    #[test]
    fn test_parse_input_text() {
        assert_eq!(parse_input_text("1,250,000"), Some(1_250_000.0));
        assert_eq!(parse_input_text("$ 12 345"), Some(12_345.0));
        assert_eq!(parse_input_text(""), None);
        assert_eq!(parse_input_text("abc"), None);
        assert_eq!(parse_input_text("0"), Some(0.0));
    }

    #[test]
    fn test_reformat_keeps_empty_field_empty() {
        assert_eq!(reformat_input_text(""), "");
        assert_eq!(reformat_input_text("12a34"), "1,234");
    }

    #[test]
    fn test_typing_updates_clamped_reference_amount() {
        let engine = ProjectionEngine::default();
        let mut editor = AmountEditor::new(&engine, CalculatorConfig::default());

        editor.type_text("750,000");
        assert_eq!(editor.text(), "750,000");
        assert_eq!(editor.config().base_amount_reference, 750_000.0);

        editor.type_text("5");
        assert_eq!(editor.text(), "5");
        assert_eq!(editor.config().base_amount_reference, DEFAULT_MIN_AMOUNT);

        editor.blur();
        assert_eq!(editor.text(), "100,000");
    }

    #[test]
    fn test_empty_text_keeps_amount() {
        let engine = ProjectionEngine::default();
        let mut editor = AmountEditor::new(&engine, CalculatorConfig::default());
        let before = editor.config().base_amount_reference;

        editor.type_text("");
        assert_eq!(editor.text(), "");
        assert_eq!(editor.config().base_amount_reference, before);
    }

    #[test]
    fn test_typing_in_display_currency() {
        let engine = ProjectionEngine::default();
        let config = CalculatorConfig::default().with_display_currency(DisplayCurrency::Aed);
        let mut editor = AmountEditor::new(&engine, config);

        editor.type_text("3,672,500");
        assert_eq!(editor.config().base_amount_reference, 1_000_000.0);

        editor.blur();
        assert_eq!(editor.text(), "3,700,000");
    }

    #[test]
    fn test_slider_and_currency_switch() {
        let engine = ProjectionEngine::default();
        let mut editor = AmountEditor::new(&engine, CalculatorConfig::default());

        editor.drag_slider(2e8);
        assert_eq!(editor.config().base_amount_reference, DEFAULT_MAX_AMOUNT);
        assert_eq!(editor.text(), "100,000,000");

        editor.drag_slider(200_000.0);
        editor.select_currency(DisplayCurrency::Gbp);
        assert_eq!(editor.config().base_amount_reference, 200_000.0);
        // 200,000 * 0.79 = 158,000
        assert_eq!(editor.text(), "160,000");
        assert_eq!(editor.projection().current_display_amount, 160_000.0);
    }

    #[test]
    fn test_update_config_reclamps() {
        let engine = ProjectionEngine::default();
        let mut editor = AmountEditor::new(&engine, CalculatorConfig::default());
        editor.update_config(|c| CalculatorConfig {
            base_amount_reference: 1.0,
            ..c.with_timeline(10)
        });
        assert_eq!(editor.config().timeline_years, 10);
        assert_eq!(editor.config().base_amount_reference, DEFAULT_MIN_AMOUNT);
    }
}
