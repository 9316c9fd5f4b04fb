use alloy_primitives::U256;
use bigdecimal::{
    num_bigint::{BigInt, Sign},
    BigDecimal,
};

use crate::constant::ADDRESS_LEN;

pub fn is_address(value: &str) -> bool {
    // 0x + 40 hex chars, no checksum enforcement
    value.len() == ADDRESS_LEN
        && value.starts_with("0x")
        && value[2..].chars().all(|c| c.is_ascii_hexdigit())
}

/// `amount / 10^decimals` without going through floating point.
pub fn format_units(amount: U256, decimals: u32) -> BigDecimal {
    let digits = BigInt::from_bytes_be(Sign::Plus, &amount.to_be_bytes::<32>());
    BigDecimal::new(digits, i64::from(decimals)).normalized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_is_address() {
        assert!(is_address("0x1111111111111111111111111111111111111111"));
        assert!(is_address("0x3AbEdbA3052845ce3f57818032bfa747cded3fca"));
        assert!(!is_address("1111111111111111111111111111111111111111"));
        assert!(!is_address("0x111111111111111111111111111111111111111"));
        assert!(!is_address("0x11111111111111111111111111111111111111111"));
        assert!(!is_address("0xg111111111111111111111111111111111111111"));
        assert!(!is_address(""));
    }

    #[test]
    fn test_format_units() {
        assert_eq!(
            format_units(U256::from(2_500_000u64), 6),
            BigDecimal::from_str("2.5").unwrap()
        );
        assert_eq!(format_units(U256::ZERO, 18), BigDecimal::from(0));
        assert_eq!(
            format_units(U256::from(1u64), 18),
            BigDecimal::from_str("0.000000000000000001").unwrap()
        );
        assert_eq!(format_units(U256::from(7u64), 0), BigDecimal::from(7));
    }

    #[test]
    fn test_format_units_reads_big_endian_digits() {
        assert_eq!(
            format_units(U256::from(0x0100u64), 2),
            BigDecimal::from_str("2.56").unwrap()
        );
        assert_eq!(
            format_units(U256::from(10u64).pow(U256::from(30u64)), 12),
            BigDecimal::from(1_000_000_000_000_000_000u64)
        );
    }

    #[test]
    fn test_format_units_beyond_u128() {
        let huge = U256::MAX;
        let formatted = format_units(huge, 18);
        let expected = BigDecimal::from_str(
            "115792089237316195423570985008687907853269984665640564039457.584007913129639935",
        )
        .unwrap();
        assert_eq!(formatted, expected);
    }
}
