use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub service_id: String,
    pub add_on_ids: Vec<String>,
    pub price_cents: i64,
    /// Advisory only: the detailer confirms actual timing with the customer.
    pub duration_minutes: i32,
}

/// `$100` for whole dollars, `$12.50` otherwise.
pub fn format_price(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let dollars = cents / 100;
    let rest = cents % 100;
    if rest == 0 {
        format!("{sign}${dollars}")
    } else {
        format!("{sign}${dollars}.{rest:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(10_000), "$100");
        assert_eq!(format_price(1250), "$12.50");
        assert_eq!(format_price(5), "$0.05");
        assert_eq!(format_price(0), "$0");
    }
}
