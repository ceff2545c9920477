//! Formatting amounts for display with the household currency symbol.

use numfmt::{Formatter, Precision};

/// Format `number` with two decimal places, thousands separators and `symbol`.
///
/// Negative amounts are prefixed with a minus sign before the symbol, e.g. "-$5.00".
pub fn format_currency(number: f64, symbol: &str) -> String {
    // numfmt switches to exponent notation below one cent
    let number = (number * 100.0).round() / 100.0;

    if number == 0.0 {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return format!("{symbol}0.00");
    }

    let prefix = if number < 0.0 {
        format!("-{symbol}")
    } else {
        symbol.to_owned()
    };

    let formatted_string = match Formatter::currency(&prefix) {
        Ok(formatter) => formatter
            .precision(Precision::Decimals(2))
            .fmt_string(number.abs()),
        Err(error) => {
            tracing::debug!("could not build a formatter for {prefix:?}: {error:?}");
            format!("{prefix}{:.2}", number.abs())
        }
    };

    let is_exponent = formatted_string
        .strip_prefix(prefix.as_str())
        .is_some_and(|digits| digits.contains('e'));

    if is_exponent {
        return format!("{prefix}{:.2}", number.abs());
    }

    pad_decimals(formatted_string)
}

/// numfmt omits trailing zeros, so we must add them ourselves.
/// For example, "12.3" is rendered as "12.30".
fn pad_decimals(mut formatted_string: String) -> String {
    match formatted_string.rfind('.') {
        Some(point) => {
            let decimals = formatted_string.len() - point - 1;
            for _ in decimals..2 {
                formatted_string.push('0');
            }
        }
        None => formatted_string.push_str(".00"),
    }

    formatted_string
}
