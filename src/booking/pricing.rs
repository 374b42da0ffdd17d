//! Price computation for the booking flow

use once_cell::sync::Lazy;
use regex::Regex;

static NON_PRICE_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^0-9.]").expect("valid price regex")
});

/// Flat service surcharge applied to the base price at checkout
pub const SERVICE_FEE_RATE: f64 = 0.10;

/// Price breakdown shown on the review step and persisted with the booking.
/// Only the fee is rounded; base and total keep whatever the multiplication
/// produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBreakdown {
    pub base: f64,
    pub service_fee: f64,
    pub total: f64,
}

/// Parse an amount out of a currency-formatted string ("$245", "1,299 €").
///
/// Everything except ASCII digits and the decimal point is stripped before
/// parsing; input with no usable digits yields 0.
pub fn parse_price(raw: &str) -> f64 {
    NON_PRICE_CHARS.replace_all(raw, "").parse().unwrap_or(0.0)
}

/// Compute the checkout breakdown for a per-person price and a party size.
pub fn quote(price_per_person: f64, participants: u32) -> PriceBreakdown {
    let base = price_per_person * participants as f64;
    let service_fee = (base * SERVICE_FEE_RATE).round();
    PriceBreakdown {
        base,
        service_fee,
        total: base + service_fee,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_currency_symbols() {
        assert_eq!(parse_price("$245"), 245.0);
        assert_eq!(parse_price("1,299 €"), 1299.0);
        assert_eq!(parse_price("USD 89.50"), 89.5);
    }

    #[test]
    fn test_parse_price_plain_number() {
        assert_eq!(parse_price("245"), 245.0);
        assert_eq!(parse_price("245.75"), 245.75);
    }

    #[test]
    fn test_parse_price_garbage_is_zero() {
        assert_eq!(parse_price("call us"), 0.0);
        assert_eq!(parse_price(""), 0.0);
        // Two decimal points survive the strip and fail the parse
        assert_eq!(parse_price("1.2.3"), 0.0);
    }

    #[test]
    fn test_quote_rounds_fee_only() {
        let q = quote(245.0, 3);
        assert_eq!(q.base, 735.0);
        assert_eq!(q.service_fee, 74.0); // round(73.5)
        assert_eq!(q.total, 809.0);
    }

    #[test]
    fn test_quote_two_participants() {
        let q = quote(245.0, 2);
        assert_eq!(q.base, 490.0);
        assert_eq!(q.service_fee, 49.0);
        assert_eq!(q.total, 539.0);
    }

    #[test]
    fn test_quote_single_participant() {
        let q = quote(89.0, 1);
        assert_eq!(q.base, 89.0);
        assert_eq!(q.service_fee, 9.0); // round(8.9)
        assert_eq!(q.total, 98.0);
    }

    #[test]
    fn test_decomposed_total_differs_from_single_rounding() {
        // With a fractional base the fee is rounded but the base is not,
        // so the decomposed total keeps its cents while a single
        // round(base * 1.1) would drop them.
        let q = quote(2.45, 3);
        assert!((q.base - 7.35).abs() < 1e-9);
        assert_eq!(q.service_fee, 1.0); // round(0.735)
        assert!((q.total - 8.35).abs() < 1e-9);
        assert_ne!(q.total, (q.base * (1.0 + SERVICE_FEE_RATE)).round());
    }

    #[test]
    fn test_quote_all_party_sizes() {
        for participants in 1..=10u32 {
            let q = quote(245.0, participants);
            let base = 245.0 * participants as f64;
            assert_eq!(q.base, base);
            assert_eq!(q.service_fee, (base * 0.1).round());
            assert_eq!(q.total, q.base + q.service_fee);
        }
    }
}
