use unicode_width::UnicodeWidthStr;

/// Text and row metrics for table nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMetrics {
    pub char_width: f64,
    pub header_font_size: f64,
    pub column_font_size: f64,
    pub type_font_size: f64,
    pub header_height: f64,
    pub row_height: f64,
    pub row_gap: f64,
    pub body_padding: f64,
    pub padding_x: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 7.0,
            header_font_size: 14.0,
            column_font_size: 12.0,
            type_font_size: 10.0,
            header_height: 44.0,
            row_height: 36.0,
            row_gap: 4.0,
            body_padding: 8.0,
            padding_x: 12.0,
        }
    }
}

impl TextMetrics {
    pub fn text_width(&self, text: &str) -> f64 {
        let width = UnicodeWidthStr::width(text);
        width as f64 * self.char_width
    }

    /// Height of a node box holding `column_count` rows.
    pub fn node_height(&self, column_count: usize) -> f64 {
        let rows = column_count as f64 * self.row_height
            + column_count.saturating_sub(1) as f64 * self.row_gap;
        self.header_height + self.body_padding * 2.0 + rows
    }

    /// Cut `text` so it fits in `max_width`, ending with an ellipsis when shortened.
    pub fn truncate(&self, text: &str, max_width: f64) -> String {
        if self.text_width(text) <= max_width {
            return text.to_string();
        }
        let budget = max_width - self.char_width;
        let mut out = String::new();
        let mut used = 0.0;
        for ch in text.chars() {
            let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0) as f64 * self.char_width;
            if used + w > budget {
                break;
            }
            used += w;
            out.push(ch);
        }
        out.push('…');
        out
    }
}
