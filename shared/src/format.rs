use std::fmt::Write;

/// Group the integer part in threes, e.g. `56691` -> `56,691`.
///
/// Whole values print without decimals; anything else keeps one decimal.
pub fn format_grouped(value: f64) -> String {
    let mut out = String::with_capacity(12);
    write_grouped(&mut out, value);
    out
}

pub fn write_grouped(buf: &mut String, value: f64) {
    buf.clear();
    if !value.is_finite() {
        let _ = write!(buf, "{value}");
        return;
    }
    let tenths = (value.abs() * 10.0).round() as u64;
    let whole = tenths / 10;
    let frac = tenths % 10;

    if value < 0.0 && tenths != 0 {
        buf.push('-');
    }
    let digits = whole.to_string();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            buf.push(',');
        }
        buf.push(ch);
    }
    if frac != 0 {
        let _ = write!(buf, ".{frac}");
    }
}

/// Minimal escaping for text placed into popup markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
