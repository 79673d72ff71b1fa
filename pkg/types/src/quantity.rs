use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One base unit expressed in nano-units. All quantities are held as
/// nano-units so that decimal and binary suffix forms compare exactly.
const NANO: i128 = 1_000_000_000;

/// A parsed resource quantity, e.g. `500m` CPU or `2Gi` memory.
///
/// Internally a count of nano-units in an `i128`, which comfortably holds
/// the largest accepted value (`E` / `Ei`) with nano precision. Two
/// quantities compare by magnitude regardless of the textual form they were
/// parsed from: `1Gi` equals `1024Mi` equals `1073741824`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity {
    nanos: i128,
}

/// Error produced when quantity text does not match the accepted grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseQuantityError {
    #[error("empty quantity string")]
    Empty,
    #[error("quantity '{0}' has no digits in its mantissa")]
    NoDigits(String),
    #[error("quantity '{0}' has an unknown suffix '{1}'")]
    UnknownSuffix(String, String),
    #[error("quantity '{0}' overflows the representable range")]
    Overflow(String),
}

/// Nano-units per one unit of the given suffix, or `None` for an unknown
/// suffix. Suffixes are case-sensitive: `m` is milli, `M` is mega.
fn suffix_nanos(suffix: &str) -> Option<i128> {
    Some(match suffix {
        "n" => 1,
        "u" => 1_000,
        "m" => 1_000_000,
        "" => NANO,
        "k" => NANO * 1_000,
        "M" => NANO * 1_000_000,
        "G" => NANO * 1_000_000_000,
        "T" => NANO * 1_000_000_000_000,
        "P" => NANO * 1_000_000_000_000_000,
        "E" => NANO * 1_000_000_000_000_000_000,
        "Ki" => NANO << 10,
        "Mi" => NANO << 20,
        "Gi" => NANO << 30,
        "Ti" => NANO << 40,
        "Pi" => NANO << 50,
        "Ei" => NANO << 60,
        _ => return None,
    })
}

impl Quantity {
    pub const ZERO: Quantity = Quantity { nanos: 0 };

    /// Parse quantity text: optional sign, decimal mantissa with an optional
    /// fractional part, optional decimal (`n u m k M G T P E`) or binary
    /// (`Ki Mi Gi Ti Pi Ei`) suffix. Malformed input is an error, never a
    /// silent zero. Fractions below nano resolution round up, the
    /// conservative direction for a limit.
    pub fn parse(text: &str) -> Result<Quantity, ParseQuantityError> {
        if text.is_empty() {
            return Err(ParseQuantityError::Empty);
        }

        let (negative, rest) = match text.as_bytes()[0] {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };

        // Mantissa: digits, optionally one dot followed by digits.
        let mut int_end = 0;
        for c in rest.chars() {
            if c.is_ascii_digit() {
                int_end += 1;
            } else {
                break;
            }
        }
        if int_end == 0 {
            return Err(ParseQuantityError::NoDigits(text.to_string()));
        }
        let (int_part, mut tail) = rest.split_at(int_end);

        let mut frac_part = "";
        if let Some(after_dot) = tail.strip_prefix('.') {
            let frac_end = after_dot
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(after_dot.len());
            if frac_end == 0 {
                return Err(ParseQuantityError::NoDigits(text.to_string()));
            }
            frac_part = &after_dot[..frac_end];
            tail = &after_dot[frac_end..];
        }

        let scale = suffix_nanos(tail).ok_or_else(|| {
            ParseQuantityError::UnknownSuffix(text.to_string(), tail.to_string())
        })?;

        // magnitude = (int.frac) * scale, computed exactly in i128 as
        // digits * scale / 10^len(frac), rounding any remainder up.
        let overflow = || ParseQuantityError::Overflow(text.to_string());
        let mut digits: i128 = 0;
        for c in int_part.chars().chain(frac_part.chars()) {
            digits = digits
                .checked_mul(10)
                .and_then(|d| d.checked_add((c as u8 - b'0') as i128))
                .ok_or_else(overflow)?;
        }
        let mut divisor: i128 = 1;
        for _ in 0..frac_part.len() {
            divisor = divisor.checked_mul(10).ok_or_else(overflow)?;
        }
        let scaled = digits.checked_mul(scale).ok_or_else(overflow)?;
        let mut nanos = scaled / divisor;
        if scaled % divisor != 0 {
            nanos += 1;
        }

        Ok(Quantity {
            nanos: if negative { -nanos } else { nanos },
        })
    }

    /// Sum that pins at the representable extremes instead of wrapping.
    pub fn saturating_add(self, other: Quantity) -> Quantity {
        Quantity {
            nanos: self.nanos.saturating_add(other.nanos),
        }
    }

    pub fn is_zero(self) -> bool {
        self.nanos == 0
    }
}

impl FromStr for Quantity {
    type Err = ParseQuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quantity::parse(s)
    }
}

impl fmt::Display for Quantity {
    /// Canonical form: base units as a plain decimal with trailing zeros
    /// trimmed, e.g. `4`, `4.5`, `0.000000001`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.nanos < 0 { "-" } else { "" };
        let magnitude = self.nanos.unsigned_abs();
        let whole = magnitude / NANO as u128;
        let frac = magnitude % NANO as u128;
        if frac == 0 {
            write!(f, "{sign}{whole}")
        } else {
            let digits = format!("{frac:09}");
            write!(f, "{sign}{whole}.{}", digits.trim_end_matches('0'))
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Quantity::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(s: &str) -> Quantity {
        Quantity::parse(s).unwrap()
    }

    #[test]
    fn parses_plain_and_fractional() {
        assert_eq!(q("0"), Quantity::ZERO);
        assert_eq!(q("4"), q("4.0"));
        assert_eq!(q("2.5").to_string(), "2.5");
        assert_eq!(q("+3"), q("3"));
        assert_eq!(q("-1").to_string(), "-1");
    }

    #[test]
    fn decimal_suffixes() {
        assert_eq!(q("500m").to_string(), "0.5");
        assert_eq!(q("1k"), q("1000"));
        assert_eq!(q("1M"), q("1000k"));
        assert_eq!(q("2G"), q("2000M"));
        assert_eq!(q("1000n"), q("1u"));
        assert_eq!(q("1000u"), q("1m"));
    }

    #[test]
    fn binary_suffixes_compare_with_decimal_forms() {
        assert_eq!(q("1Ki"), q("1024"));
        assert_eq!(q("1Gi"), q("1024Mi"));
        assert_eq!(q("1Gi"), q("1073741824"));
        assert!(q("1Gi") > q("1G"));
    }

    #[test]
    fn suffixes_are_case_sensitive() {
        assert!(q("1m") < q("1"));
        assert!(q("1M") > q("1"));
        assert!(Quantity::parse("1KI").is_err());
        assert!(Quantity::parse("1gi").is_err());
    }

    #[test]
    fn malformed_input_is_an_error_not_zero() {
        assert_eq!(Quantity::parse(""), Err(ParseQuantityError::Empty));
        assert!(matches!(
            Quantity::parse("abc"),
            Err(ParseQuantityError::NoDigits(_))
        ));
        assert!(matches!(
            Quantity::parse("1."),
            Err(ParseQuantityError::NoDigits(_))
        ));
        assert!(matches!(
            Quantity::parse("12X"),
            Err(ParseQuantityError::UnknownSuffix(_, _))
        ));
        assert!(matches!(
            Quantity::parse("1 Gi"),
            Err(ParseQuantityError::UnknownSuffix(_, _))
        ));
    }

    #[test]
    fn overflow_is_an_error() {
        assert!(matches!(
            Quantity::parse("99999999999999999999999E"),
            Err(ParseQuantityError::Overflow(_))
        ));
        // Largest accepted order of magnitude still parses.
        assert!(Quantity::parse("8Ei").is_ok());
    }

    #[test]
    fn sub_nano_fractions_round_up() {
        assert_eq!(q("0.5n"), q("1n"));
        assert!(q("1.0000000001") > q("1"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for s in ["0", "4.5", "500m", "2Gi", "123456789n", "-2.5"] {
            let v = q(s);
            assert_eq!(q(&v.to_string()), v);
        }
    }

    #[test]
    fn serde_uses_the_textual_form() {
        let v: Quantity = serde_json::from_str("\"1536Mi\"").unwrap();
        assert_eq!(v, q("1.5Gi"));
        assert_eq!(serde_json::to_string(&q("250m")).unwrap(), "\"0.25\"");
        assert!(serde_json::from_str::<Quantity>("\"nope\"").is_err());
    }
}
