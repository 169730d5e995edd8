//! Lenient cell coercions used when reading stock sheets
//!
//! Stock sheets are typed by hand, so every reader here is forgiving: a value
//! that cannot be read is treated as absent rather than reported.

use calamine::Data;
use regex::Regex;
use std::sync::OnceLock;

/// Anything that is not part of a decimal number (currency signs, spaces, letters)
fn price_noise() -> &'static Regex {
    static PRICE_NOISE: OnceLock<Regex> = OnceLock::new();
    PRICE_NOISE.get_or_init(|| Regex::new(r"[^0-9.,]").expect("valid price pattern"))
}

/// Format a number the way a spreadsheet shows it as text (30.0 → "30")
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // also normalizes -0
        return "0".to_string();
    }
    format!("{}", value)
}

/// Text content of a cell, `None` for blank, empty, zero or false cells
pub fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            if s.is_empty() {
                None
            } else {
                Some(s.clone())
            }
        }
        Data::Float(f) => {
            if *f == 0.0 || f.is_nan() {
                None
            } else {
                Some(format_number(*f))
            }
        }
        Data::Int(i) => {
            if *i == 0 {
                None
            } else {
                Some(i.to_string())
            }
        }
        Data::Bool(true) => Some("true".to_string()),
        Data::DateTime(dt) => Some(format_number(dt.as_f64())),
        _ => None,
    }
}

/// Whether a cell holds the given label, either as text or as a number
pub fn holds_label(cell: &Data, label: &str) -> bool {
    match cell {
        Data::String(s) => s == label,
        Data::Float(f) => format_number(*f) == label,
        Data::Int(i) => i.to_string() == label,
        _ => false,
    }
}

/// Size label of a header cell: any non-zero numeric value, numeral text included
pub fn size_label(cell: &Data) -> Option<String> {
    match cell {
        Data::Float(f) if f.is_finite() && *f != 0.0 => Some(format_number(*f)),
        Data::Int(i) if *i != 0 => Some(i.to_string()),
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<f64>() {
                Ok(value) if value.is_finite() => Some(s.clone()),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Unit price of a cell; unreadable or missing prices are 0
pub fn parse_price(cell: Option<&Data>) -> f64 {
    let price = match cell {
        Some(Data::Float(f)) => *f,
        Some(Data::Int(i)) => *i as f64,
        Some(Data::String(s)) => parse_price_text(s).unwrap_or(0.0),
        _ => 0.0,
    };

    if price.is_finite() && price > 0.0 {
        price
    } else {
        0.0
    }
}

/// Parse price text such as `"1 234,50€"`
///
/// Every character other than digits, commas and periods is dropped, the
/// first comma becomes the decimal point, and the longest leading decimal
/// number is read (`"1.234.50"` reads as `1.234`).
pub fn parse_price_text(text: &str) -> Option<f64> {
    let cleaned = price_noise().replace_all(text, "");
    let normalized = cleaned.replacen(',', ".", 1);
    decimal_prefix(&normalized)
}

/// Longest leading `digits[.digits]` run, parsed as a float
fn decimal_prefix(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end;

    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > end + 1 {
            end = frac_end;
        }
    }

    // ".5" is a number, "." is not
    let has_digits = int_digits > 0 || end > int_digits;
    if !has_digits {
        return None;
    }
    text[..end].parse::<f64>().ok()
}

/// Integer stock count of a cell
///
/// Numbers are truncated toward zero, text is read up to its first
/// non-digit (`"3 pcs"` → 3). Blank and non-numeric cells are `None`.
/// Counts beyond `u32::MAX` are returned as read; the importer clamps them.
pub fn parse_stock(cell: Option<&Data>) -> Option<i64> {
    match cell? {
        Data::Int(i) => Some(*i),
        Data::Float(f) if f.is_finite() => Some(f.trunc() as i64),
        Data::String(s) => integer_prefix(s),
        _ => None,
    }
}

/// Leading optionally-signed integer of a string, after leading whitespace
fn integer_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_text() {
        assert_eq!(parse_price_text("1 234,50€"), Some(1234.5));
        assert_eq!(parse_price_text("150€"), Some(150.0));
        assert_eq!(parse_price_text("12.99 EUR"), Some(12.99));
        assert_eq!(parse_price_text(",5"), Some(0.5));
        assert_eq!(parse_price_text("1.234,50"), Some(1.234));
        assert_eq!(parse_price_text("gratuit"), None);
        assert_eq!(parse_price_text(""), None);
        assert_eq!(parse_price_text("€."), None);
    }

    #[test]
    fn test_parse_price_cell() {
        assert_eq!(parse_price(Some(&Data::Float(89.9))), 89.9);
        assert_eq!(parse_price(Some(&Data::Int(40))), 40.0);
        assert_eq!(parse_price(Some(&Data::String("1 234,50€".into()))), 1234.5);
        assert_eq!(parse_price(Some(&Data::String("n/a".into()))), 0.0);
        assert_eq!(parse_price(Some(&Data::Bool(true))), 0.0);
        assert_eq!(parse_price(Some(&Data::Float(-5.0))), 0.0);
        assert_eq!(parse_price(Some(&Data::Empty)), 0.0);
        assert_eq!(parse_price(None), 0.0);
    }

    #[test]
    fn test_parse_stock() {
        assert_eq!(parse_stock(Some(&Data::Float(2.0))), Some(2));
        assert_eq!(parse_stock(Some(&Data::Float(2.7))), Some(2));
        assert_eq!(parse_stock(Some(&Data::Int(4))), Some(4));
        assert_eq!(parse_stock(Some(&Data::String(" 3 pcs".into()))), Some(3));
        assert_eq!(parse_stock(Some(&Data::String("-2".into()))), Some(-2));
        assert_eq!(parse_stock(Some(&Data::String("x3".into()))), None);
        assert_eq!(parse_stock(Some(&Data::String("".into()))), None);
        assert_eq!(parse_stock(Some(&Data::Bool(true))), None);
        assert_eq!(parse_stock(Some(&Data::Empty)), None);
        assert_eq!(parse_stock(None), None);
    }

    #[test]
    fn test_cell_text_truthiness() {
        assert_eq!(cell_text(&Data::String("Acme".into())), Some("Acme".to_string()));
        assert_eq!(cell_text(&Data::String(String::new())), None);
        assert_eq!(cell_text(&Data::Float(12345.0)), Some("12345".to_string()));
        assert_eq!(cell_text(&Data::Float(0.0)), None);
        assert_eq!(cell_text(&Data::Int(0)), None);
        assert_eq!(cell_text(&Data::Bool(false)), None);
        assert_eq!(cell_text(&Data::Empty), None);
    }

    #[test]
    fn test_holds_label() {
        assert!(holds_label(&Data::Float(30.0), "30"));
        assert!(holds_label(&Data::Int(30), "30"));
        assert!(holds_label(&Data::String("30".into()), "30"));
        assert!(!holds_label(&Data::String(" 30".into()), "30"));
        assert!(!holds_label(&Data::Float(30.5), "30"));
        assert!(!holds_label(&Data::Empty, "30"));
    }

    #[test]
    fn test_size_label() {
        assert_eq!(size_label(&Data::Float(48.0)), Some("48".to_string()));
        assert_eq!(size_label(&Data::Float(38.5)), Some("38.5".to_string()));
        assert_eq!(size_label(&Data::String("52".into())), Some("52".to_string()));
        assert_eq!(size_label(&Data::String("M".into())), None);
        assert_eq!(size_label(&Data::String("   ".into())), None);
        assert_eq!(size_label(&Data::Float(0.0)), None);
        assert_eq!(size_label(&Data::String("Prix total".into())), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(30.0), "30");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(-0.0), "0");
    }
}
