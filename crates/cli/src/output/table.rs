//! Table formatting utilities

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, *};

/// Table formatter
pub struct TableFormatter;

impl TableFormatter {
    /// Create a new table with default styling
    pub fn new() -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }

    /// Table with headers and rows
    pub fn simple<H: ToString>(headers: &[H], rows: &[Vec<String>]) -> String {
        let mut table = Self::new();
        table.set_header(headers.iter().map(|h| h.to_string()));

        for row in rows {
            table.add_row(row);
        }

        table.to_string()
    }

    /// Two-column label/value table
    pub fn key_value(items: &[(String, String)]) -> String {
        let mut table = Self::new();

        for (key, value) in items {
            table.add_row(vec![Cell::new(key).add_attribute(Attribute::Bold), Cell::new(value)]);
        }

        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_table() {
        let rows = vec![
            vec!["1".to_string(), "Technical Depth(25)".to_string()],
            vec!["2".to_string(), "Q&A Performance(15)".to_string()],
        ];
        let rendered = TableFormatter::simple(&["S.L", "PARAMETERS"], &rows);
        assert!(rendered.contains("Technical Depth(25)"));
        assert!(rendered.contains("PARAMETERS"));
    }

    #[test]
    fn test_key_value_table() {
        let items = vec![("TEAM NAME".to_string(), "Byte Club".to_string())];
        let rendered = TableFormatter::key_value(&items);
        assert!(rendered.contains("TEAM NAME"));
        assert!(rendered.contains("Byte Club"));
    }
}
