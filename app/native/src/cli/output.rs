//! CLI output formatting.
//!
//! JSON is colored by walking the `serde_json::Value` tree:
//! keys cyan, strings green, numbers yellow, booleans and null magenta.

use std::fmt::Write;

use colored::Colorize;
use serde_json::Value;

const INDENT: &str = "  ";

/// Prints `value` as pretty JSON with syntax highlighting.
pub fn print_highlighted_json(value: &Value) { println!("{}", highlight_json(value)); }

/// Renders `value` as pretty JSON with ANSI colors.
#[must_use]
pub fn highlight_json(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => out.push_str(&"null".magenta().to_string()),
        Value::Bool(flag) => out.push_str(&flag.to_string().magenta().to_string()),
        Value::Number(number) => out.push_str(&number.to_string().yellow().to_string()),
        Value::String(text) => out.push_str(&quote(text).green().to_string()),
        Value::Array(items) => {
            write_container(out, ('[', ']'), items.iter().map(|item| (None, item)), depth);
        }
        Value::Object(map) => {
            write_container(out, ('{', '}'), map.iter().map(|(k, v)| (Some(k.as_str()), v)), depth);
        }
    }
}

fn write_container<'a>(
    out: &mut String,
    (open, close): (char, char),
    entries: impl ExactSizeIterator<Item = (Option<&'a str>, &'a Value)>,
    depth: usize,
) {
    let open = open.to_string().white().bold();
    let close = close.to_string().white().bold();

    let count = entries.len();
    if count == 0 {
        let _ = write!(out, "{open}{close}");
        return;
    }

    let _ = writeln!(out, "{open}");
    for (i, (key, value)) in entries.enumerate() {
        out.push_str(&INDENT.repeat(depth + 1));
        if let Some(key) = key {
            let _ = write!(out, "{}{} ", quote(key).cyan(), ":".white());
        }
        write_value(out, value, depth + 1);
        if i + 1 < count {
            out.push_str(&",".white().to_string());
        }
        out.push('\n');
    }
    out.push_str(&INDENT.repeat(depth));
    let _ = write!(out, "{close}");
}

fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{text}\""))
}

/// Formats a boolean as a colored check mark or cross.
#[must_use]
pub fn format_bool(value: bool) -> String {
    if value { "✓".green().to_string() } else { "✗".red().to_string() }
}
