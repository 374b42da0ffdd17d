//! Booking reference generation

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

const BASE36: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generate a booking reference: `BOOKING-` followed by the millisecond
/// Unix timestamp in base36 and 3 random base36 characters, all uppercase.
pub fn generate_reference() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();

    let mut rng = rand::thread_rng();
    let suffix: String = (0..3)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();

    format!("BOOKING-{}{}", to_base36(millis), suffix)
}

fn to_base36(mut n: u128) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.iter().rev().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base36_round_trip() {
        for n in [0u128, 1, 35, 36, 1295, 1_700_000_000_000] {
            let s = to_base36(n);
            assert_eq!(u128::from_str_radix(&s, 36).expect("base36"), n);
        }
    }

    #[test]
    fn test_base36_is_uppercase() {
        let s = to_base36(1_700_000_000_000);
        assert!(s.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_reference_format() {
        let reference = generate_reference();
        let re = regex::Regex::new(r"^BOOKING-[0-9A-Z]+$").expect("regex");
        assert!(re.is_match(&reference), "unexpected reference {reference}");
        // timestamp in base36 plus the 3-char suffix
        assert!(reference.len() > "BOOKING-".len() + 3);
    }

    #[test]
    fn test_references_differ_across_milliseconds() {
        let first = generate_reference();
        std::thread::sleep(std::time::Duration::from_millis(3));
        let second = generate_reference();
        assert_ne!(first, second);
    }
}
