use serde::{Deserialize, Deserializer};

use crate::consts::MAX_FRACTION_DIGITS;

/// Cleans locale-formatted decimal text (comma decimal marker) into a
/// canonical `digits[,digits]` form.
///
/// Mirrors what the form does on the client, so pasted garbage like
/// `"Rp 1.234,5678"` still lands on a parseable value. Deterministic and
/// idempotent; no I/O.
pub fn clean_decimal_input(raw: &str) -> String {
    let stripped = raw
        .chars()
        .filter(|c| !c.is_alphabetic())
        .map(|c| if c == '.' { ',' } else { c })
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect::<String>();

    match stripped.split_once(',') {
        None => stripped,
        Some((integer, rest)) => {
            // Everything after the first comma folds into the fraction
            let fraction = rest
                .chars()
                .filter(char::is_ascii_digit)
                .take(MAX_FRACTION_DIGITS)
                .collect::<String>();

            if fraction.is_empty() {
                integer.to_string()
            } else {
                format!("{integer},{fraction}")
            }
        }
    }
}

/// Parses cleaned decimal text into a non-negative `f64`.
///
/// A failed parse or a negative value yields `0.0` rather than an error; the
/// caller decides whether zero is acceptable for the field.
pub fn parse_decimal_input(raw: &str) -> f64 {
    clean_decimal_input(raw)
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
        .unwrap_or(0.0)
}

/// Deserializes a quantity that may arrive as a JSON number or as
/// locale-formatted text. Client-computed values are never trusted as-is;
/// both shapes end up re-normalized here.
pub fn de_quantity<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(value) if value.is_finite() && value >= 0.0 => value,
        Raw::Number(_) => 0.0,
        Raw::Text(text) => parse_decimal_input(&text),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_strips_letters_and_symbols() {
        assert_eq!(clean_decimal_input("Rp 1234"), "1234");
        assert_eq!(clean_decimal_input("12a34b"), "1234");
        assert_eq!(clean_decimal_input("liter"), "");
    }

    #[test]
    fn test_clean_period_becomes_comma() {
        assert_eq!(clean_decimal_input("12.5"), "12,5");
        assert_eq!(clean_decimal_input("1.234.567"), "1,234");
    }

    #[test]
    fn test_clean_collapses_commas_and_truncates_fraction() {
        assert_eq!(clean_decimal_input("1,2,3"), "1,23");
        assert_eq!(clean_decimal_input("12,3456"), "12,345");
        assert_eq!(clean_decimal_input("12,"), "12");
    }

    #[test]
    fn test_clean_is_idempotent() {
        for raw in ["12,345", "1.234,5678", "Rp 1.000", "", "0,5", "7"] {
            let once = clean_decimal_input(raw);
            assert_eq!(clean_decimal_input(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse_decimal_input("12,5"), 12.5);
        assert_eq!(parse_decimal_input("1050"), 1050.0);
        assert_eq!(parse_decimal_input("0,125"), 0.125);
        // Periods are decimal markers here, never thousand separators
        assert_eq!(parse_decimal_input("1.234,567"), 1.234);
    }

    #[test]
    fn test_parse_rejects_garbage_as_zero() {
        assert_eq!(parse_decimal_input(""), 0.0);
        assert_eq!(parse_decimal_input("abc"), 0.0);
        assert_eq!(parse_decimal_input(","), 0.0);
    }

    #[test]
    fn test_de_quantity() {
        #[derive(Deserialize)]
        struct Probe {
            #[serde(deserialize_with = "de_quantity")]
            value: f64,
        }

        let number: Probe = serde_json::from_str(r#"{ "value": 1100.5 }"#).unwrap();
        assert_eq!(number.value, 1100.5);

        let text: Probe = serde_json::from_str(r#"{ "value": "1100,5" }"#).unwrap();
        assert_eq!(text.value, 1100.5);

        let negative: Probe = serde_json::from_str(r#"{ "value": -3.0 }"#).unwrap();
        assert_eq!(negative.value, 0.0);
    }
}
