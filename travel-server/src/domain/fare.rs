//! Fare amounts.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Error returned when parsing an invalid fare.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid fare: {reason}")]
pub struct InvalidFare {
    reason: &'static str,
}

impl InvalidFare {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Currency prefixes accepted in front of an amount, longest first.
const PREFIXES: [&str; 4] = ["₹", "INR", "RS.", "RS"];

/// A fare in Indian rupees, stored in paise.
///
/// # Examples
///
/// ```
/// use travel_server::domain::Fare;
///
/// assert_eq!(Fare::parse("Rs 280").unwrap().to_string(), "Rs 280");
/// assert_eq!(Fare::parse("₹240").unwrap(), Fare::from_rupees(240));
/// assert_eq!(Fare::parse("12.5").unwrap().to_string(), "Rs 12.50");
/// assert!(Fare::parse("free").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fare {
    paise: u64,
}

impl Fare {
    /// A whole-rupee fare.
    pub fn from_rupees(rupees: u64) -> Self {
        Self {
            paise: rupees * 100,
        }
    }

    /// Returns the amount in paise.
    pub fn paise(&self) -> u64 {
        self.paise
    }

    /// Parse a fare such as "Rs 100", "Rs. 99.50", "₹1,250", "INR 50" or "75".
    pub fn parse(s: &str) -> Result<Self, InvalidFare> {
        let s = s.trim();
        if s.is_empty() {
            return Err(InvalidFare::new("fare is empty"));
        }

        let upper = s.to_uppercase();
        let amount = PREFIXES
            .iter()
            .find_map(|p| upper.strip_prefix(p))
            .unwrap_or(&upper)
            .trim();

        if amount.is_empty() {
            return Err(InvalidFare::new("missing amount"));
        }
        if amount.starts_with('-') {
            return Err(InvalidFare::new("fare cannot be negative"));
        }

        let (whole, fraction) = match amount.split_once('.') {
            Some((w, f)) => (w, f),
            None => (amount, ""),
        };

        // digit grouping: "1,250" and "1,00,000"
        let grouped = whole.starts_with(',') || whole.ends_with(',') || whole.contains(",,");
        let whole = whole.replace(',', "");
        if grouped || whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidFare::new("amount must be a number"));
        }
        if fraction.len() > 2 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidFare::new("at most two decimal places"));
        }

        let rupees: u64 = whole
            .parse()
            .map_err(|_| InvalidFare::new("amount too large"))?;
        let paise = match fraction.len() {
            0 => 0,
            1 => u64::from(fraction.as_bytes()[0] - b'0') * 10,
            _ => fraction
                .parse::<u64>()
                .map_err(|_| InvalidFare::new("amount must be a number"))?,
        };

        rupees
            .checked_mul(100)
            .and_then(|p| p.checked_add(paise))
            .map(|paise| Self { paise })
            .ok_or_else(|| InvalidFare::new("amount too large"))
    }
}

impl fmt::Display for Fare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rupees = self.paise / 100;
        let paise = self.paise % 100;
        if paise == 0 {
            write!(f, "Rs {rupees}")
        } else {
            write!(f, "Rs {rupees}.{paise:02}")
        }
    }
}

impl Serialize for Fare {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Fare {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_prefixed_amounts() {
        assert_eq!(Fare::parse("Rs 280").unwrap(), Fare::from_rupees(280));
        assert_eq!(Fare::parse("Rs. 15").unwrap(), Fare::from_rupees(15));
        assert_eq!(Fare::parse("rs100").unwrap(), Fare::from_rupees(100));
        assert_eq!(Fare::parse("₹ 240").unwrap(), Fare::from_rupees(240));
        assert_eq!(Fare::parse("INR 180").unwrap(), Fare::from_rupees(180));
        assert_eq!(Fare::parse("  90 ").unwrap(), Fare::from_rupees(90));
    }

    #[test]
    fn parse_decimals() {
        assert_eq!(Fare::parse("Rs 99.5").unwrap().paise(), 9950);
        assert_eq!(Fare::parse("Rs 99.05").unwrap().paise(), 9905);
        assert!(Fare::parse("Rs 99.505").is_err());
        assert!(Fare::parse("Rs .50").is_err());
    }

    #[test]
    fn parse_grouped_thousands() {
        assert_eq!(Fare::parse("Rs 1,000").unwrap().paise(), 100_000);
        assert_eq!(Fare::parse("₹1,250").unwrap(), Fare::from_rupees(1250));
        assert_eq!(Fare::parse("INR 1,00,000.50").unwrap().paise(), 10_000_050);
        assert_eq!(Fare::parse("Rs 1,000").unwrap().to_string(), "Rs 1000");

        for bad in [",", "Rs ,500", "Rs 500,", "Rs 1,,000", "Rs 1.000,5"] {
            assert!(Fare::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn reject_invalid() {
        assert!(Fare::parse("").is_err());
        assert!(Fare::parse("Rs").is_err());
        assert!(Fare::parse("Rs -5").is_err());
        assert!(Fare::parse("Rs 50-80").is_err());
        assert!(Fare::parse("cheap").is_err());
        assert!(Fare::parse("99999999999999999999").is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Fare::from_rupees(100).to_string(), "Rs 100");
        assert_eq!(Fare::parse("Rs 7.5").unwrap().to_string(), "Rs 7.50");
    }

    #[test]
    fn error_display() {
        let err = Fare::parse("").unwrap_err();
        assert_eq!(err.to_string(), "invalid fare: fare is empty");
    }
}
