use alloy::primitives::U256;

use dripdash_core::{format_token_amount, parse_token_amount, AmountError, MINIMUM_DISPLAY_UNIT};

#[test]
fn formats_with_token_decimals() {
    let amount = U256::from(1_500_000_000_000_000_000u128);
    assert_eq!(format_token_amount(amount, 18, MINIMUM_DISPLAY_UNIT), "1.5");
    assert_eq!(
        format_token_amount(U256::from(1_234_567_890_000u64), 6, MINIMUM_DISPLAY_UNIT),
        "1,234,567.89"
    );
    assert_eq!(format_token_amount(U256::from(42u8), 0, MINIMUM_DISPLAY_UNIT), "42");
    assert_eq!(format_token_amount(U256::ZERO, 18, MINIMUM_DISPLAY_UNIT), "0");
}

#[test]
fn small_fractions_keep_leading_zeros() {
    assert_eq!(
        format_token_amount(U256::from(1u8), 18, MINIMUM_DISPLAY_UNIT),
        "0.000000000000000001"
    );
    assert_eq!(format_token_amount(U256::from(5u8), 2, MINIMUM_DISPLAY_UNIT), "0.05");
}

#[test]
fn amounts_below_minimum_display_unit_are_clamped() {
    let minimum = U256::from(10_000u64);
    assert_eq!(format_token_amount(U256::from(9_999u64), 6, minimum), "<0.01");
    assert_eq!(format_token_amount(U256::from(10_000u64), 6, minimum), "0.01");
    assert_eq!(format_token_amount(U256::ZERO, 6, minimum), "0");
}

#[test]
fn parses_decimal_input() {
    assert_eq!(
        parse_token_amount("1.5", 18),
        Ok(U256::from(1_500_000_000_000_000_000u128))
    );
    assert_eq!(parse_token_amount(" 1,000 ", 6), Ok(U256::from(1_000_000_000u64)));
    assert_eq!(parse_token_amount(".25", 2), Ok(U256::from(25u8)));
    assert_eq!(parse_token_amount("3.", 0), Ok(U256::from(3u8)));
    assert_eq!(parse_token_amount("1.500", 1), Ok(U256::from(15u8)));
}

#[test]
fn rejects_bad_input() {
    assert_eq!(parse_token_amount("   ", 18), Err(AmountError::Empty));
    assert!(matches!(parse_token_amount("-1", 18), Err(AmountError::Invalid(_))));
    assert!(matches!(parse_token_amount("1e18", 18), Err(AmountError::Invalid(_))));
    assert!(matches!(parse_token_amount(".", 18), Err(AmountError::Invalid(_))));
    assert_eq!(
        parse_token_amount("0.001", 2),
        Err(AmountError::TooPrecise { max: 2 })
    );
    assert_eq!(
        parse_token_amount(&"9".repeat(80), 0),
        Err(AmountError::Overflow)
    );
}
