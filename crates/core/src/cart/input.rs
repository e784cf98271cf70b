//! Fail-soft coercion of user-supplied values.
//!
//! Nothing here rejects input. Prices fall back to zero, quantities to one,
//! names to [`FALLBACK_ITEM_NAME`].

use serde_json::Value;

use crate::Price;

/// Name given to items added without a usable name.
pub const FALLBACK_ITEM_NAME: &str = "Product";

/// Parse a submitted value as a number.
///
/// Surrounding whitespace is ignored and a blank value reads as zero.
#[must_use]
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok()
}

/// Floor a finite, positive number. Anything else yields `None`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn positive_floor(value: f64) -> Option<u64> {
    if value.is_finite() && value > 0.0 {
        // `as` saturates for values beyond u64::MAX
        Some(value.floor() as u64)
    } else {
        None
    }
}

fn clamp_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Coerce a submitted price. Invalid, negative or non-numeric input is zero.
#[must_use]
pub fn price(raw: &str) -> Price {
    parse_number(raw)
        .and_then(positive_floor)
        .map_or(Price::ZERO, Price::new)
}

/// Extract a price from a display label by keeping only its digits.
///
/// `"Rp 150.000"` becomes 150000. A label without digits is zero.
#[must_use]
pub fn price_from_label(label: &str) -> Price {
    let digits: String = label.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<u64>().map_or(Price::ZERO, Price::new)
}

/// Coerce the quantity passed to an add. Invalid or sub-unit input is one.
#[must_use]
pub fn add_quantity(raw: &str) -> u32 {
    parse_number(raw)
        .and_then(positive_floor)
        .filter(|qty| *qty >= 1)
        .map_or(1, clamp_u32)
}

/// Coerce a value submitted through a row's quantity field.
///
/// A finite value above zero is floored (so `0.5` becomes 0 and takes the
/// removal path); anything else becomes 1.
#[must_use]
pub fn field_quantity(raw: &str) -> i64 {
    parse_number(raw)
        .and_then(positive_floor)
        .map_or(1, |qty| i64::try_from(qty).unwrap_or(i64::MAX))
}

/// Normalize an item name, substituting [`FALLBACK_ITEM_NAME`] when blank.
#[must_use]
pub fn item_name(raw: &str) -> String {
    if raw.trim().is_empty() {
        FALLBACK_ITEM_NAME.to_string()
    } else {
        raw.to_string()
    }
}

/// Read a stored price that may be a JSON number or a numeric string.
pub(crate) fn price_from_json(value: &Value) -> Price {
    match value {
        Value::Number(n) => n
            .as_f64()
            .and_then(positive_floor)
            .map_or(Price::ZERO, Price::new),
        Value::String(s) => price(s),
        _ => Price::ZERO,
    }
}

/// Read a stored quantity. `None` means the item must not exist.
pub(crate) fn quantity_from_json(value: &Value) -> Option<u32> {
    let qty = match value {
        Value::Number(n) => n.as_f64().and_then(positive_floor),
        Value::String(s) => parse_number(s).and_then(positive_floor),
        _ => None,
    }?;
    (qty >= 1).then(|| clamp_u32(qty))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_price_coercion() {
        assert_eq!(price("150000"), Price::new(150_000));
        assert_eq!(price(" 99.9 "), Price::new(99));
        assert_eq!(price("-5"), Price::ZERO);
        assert_eq!(price("abc"), Price::ZERO);
        assert_eq!(price("NaN"), Price::ZERO);
        assert_eq!(price("inf"), Price::ZERO);
        assert_eq!(price(""), Price::ZERO);
    }

    #[test]
    fn test_price_from_label() {
        assert_eq!(price_from_label("Rp 150.000"), Price::new(150_000));
        assert_eq!(price_from_label("IDR 1,250,000"), Price::new(1_250_000));
        assert_eq!(price_from_label("free"), Price::ZERO);
    }

    #[test]
    fn test_add_quantity_coercion() {
        assert_eq!(add_quantity("3"), 3);
        assert_eq!(add_quantity("2.7"), 2);
        assert_eq!(add_quantity("0"), 1);
        assert_eq!(add_quantity("0.5"), 1);
        assert_eq!(add_quantity("-4"), 1);
        assert_eq!(add_quantity("lots"), 1);
        assert_eq!(add_quantity("1e20"), u32::MAX);
    }

    #[test]
    fn test_field_quantity_coercion() {
        assert_eq!(field_quantity("4"), 4);
        assert_eq!(field_quantity("4.9"), 4);
        assert_eq!(field_quantity("0.5"), 0);
        assert_eq!(field_quantity("0"), 1);
        assert_eq!(field_quantity("-2"), 1);
        assert_eq!(field_quantity("two"), 1);
        assert_eq!(field_quantity(""), 1);
    }

    #[test]
    fn test_item_name_fallback() {
        assert_eq!(item_name("Tas A"), "Tas A");
        assert_eq!(item_name("   "), FALLBACK_ITEM_NAME);
    }

    #[test]
    fn test_stored_values() {
        assert_eq!(price_from_json(&json!(150_000)), Price::new(150_000));
        assert_eq!(price_from_json(&json!("25000")), Price::new(25_000));
        assert_eq!(price_from_json(&json!(null)), Price::ZERO);

        assert_eq!(quantity_from_json(&json!(2)), Some(2));
        assert_eq!(quantity_from_json(&json!("3")), Some(3));
        assert_eq!(quantity_from_json(&json!(0)), None);
        assert_eq!(quantity_from_json(&json!(-1)), None);
        assert_eq!(quantity_from_json(&json!(0.4)), None);
        assert_eq!(quantity_from_json(&json!([1])), None);
    }
}
