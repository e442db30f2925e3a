//! JSON to HTML table rendering.
//!
//! Objects become two-column tables (key header cell, value cell), arrays
//! become one-cell-per-row tables and scalars become their text form. Tables
//! nest as deep as the document does.

use serde_json::{Map, Value};

/// Renders JSON values as nested HTML tables
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    table_attributes: String,
    escape: bool,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new(r#"border="1""#, true)
    }
}

impl HtmlRenderer {
    pub fn new(table_attributes: &str, escape: bool) -> Self {
        Self {
            table_attributes: table_attributes.trim().to_string(),
            escape,
        }
    }

    /// Render a whole document
    pub fn render(&self, value: &Value) -> String {
        let mut out = String::new();
        self.render_value(value, &mut out);
        out
    }

    fn render_value(&self, value: &Value, out: &mut String) {
        match value {
            Value::Object(map) => self.render_object(map, out),
            Value::Array(items) => self.render_array(items, out),
            Value::String(s) => self.push_text(s, out),
            // Number, bool and null print as they do in JSON
            scalar => out.push_str(&scalar.to_string()),
        }
    }

    fn render_object(&self, map: &Map<String, Value>, out: &mut String) {
        self.open_table(out);
        for (key, value) in map {
            out.push_str("<tr><th>");
            self.push_text(key, out);
            out.push_str("</th><td>");
            self.render_value(value, out);
            out.push_str("</td></tr>");
        }
        out.push_str("</table>");
    }

    fn render_array(&self, items: &[Value], out: &mut String) {
        self.open_table(out);
        for item in items {
            out.push_str("<tr><td>");
            self.render_value(item, out);
            out.push_str("</td></tr>");
        }
        out.push_str("</table>");
    }

    fn open_table(&self, out: &mut String) {
        if self.table_attributes.is_empty() {
            out.push_str("<table>");
        } else {
            out.push_str("<table ");
            out.push_str(&self.table_attributes);
            out.push('>');
        }
    }

    fn push_text(&self, text: &str, out: &mut String) {
        if self.escape {
            escape_into(text, out);
        } else {
            out.push_str(text);
        }
    }
}

fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
}
