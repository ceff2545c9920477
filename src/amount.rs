//! Lenient parsing of expense amounts.
//!
//! Amounts arrive either as JSON numbers or as text such as `"10.50"`. A value
//! that cannot be read as a finite number contributes nothing to the totals
//! instead of failing the whole load.

use serde::{Deserialize, Deserializer, de::IgnoredAny};

/// Parse `text` as an amount, falling back to zero when it is not a finite number.
pub fn parse_amount(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() => amount,
        _ => {
            tracing::warn!("could not parse amount {text:?}, counting it as 0");
            0.0
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Serde helper for `#[serde(deserialize_with = "...")]` that accepts numbers or text.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match Option::<RawAmount>::deserialize(deserializer)? {
        Some(RawAmount::Number(amount)) => amount,
        Some(RawAmount::Text(text)) => parse_amount(&text),
        Some(RawAmount::Other(_)) => {
            tracing::warn!("amount is neither a number nor text, counting it as 0");
            0.0
        }
        None => {
            tracing::warn!("missing amount, counting it as 0");
            0.0
        }
    };

    Ok(amount)
}
