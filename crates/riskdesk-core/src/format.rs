/// Formats a USD amount with no decimals, e.g. `-$1,234,568`.
pub fn format_currency(value: f64) -> String {
    let body = format_number(value, 0);
    match body.strip_prefix('-') {
        Some(magnitude) => format!("-${magnitude}"),
        None => format!("${body}"),
    }
}

/// Fixed decimals with thousands separators, e.g. `1,234.57`.
pub fn format_number(value: f64, decimals: usize) -> String {
    let raw = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && raw.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

/// Like [`format_number`] but with an explicit `+` on positive values.
pub fn format_signed(value: f64, decimals: usize) -> String {
    let s = format_number(value, decimals);
    if value > 0.0 {
        format!("+{s}")
    } else {
        s
    }
}
