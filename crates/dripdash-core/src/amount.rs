//! Token amount parsing and display

use alloy::primitives::U256;
use thiserror::Error;

/// Highest decimals value whose scale still fits in a U256.
pub const MAX_DECIMALS: u8 = 77;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("invalid amount: {0}")]
    Invalid(String),
    #[error("too many decimal places: token supports {max}")]
    TooPrecise { max: u8 },
    #[error("amount is too large")]
    Overflow,
    #[error("unsupported token decimals: {0}")]
    Decimals(u8),
}

fn scale(decimals: u8) -> Result<U256, AmountError> {
    if decimals > MAX_DECIMALS {
        return Err(AmountError::Decimals(decimals));
    }
    Ok(U256::from(10u8).pow(U256::from(decimals)))
}

/// Parse a user-entered decimal amount into base units.
pub fn parse_token_amount(input: &str, decimals: u8) -> Result<U256, AmountError> {
    let trimmed: String = input.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }

    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (trimmed.as_str(), ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(AmountError::Invalid(input.trim().to_owned()));
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(AmountError::Invalid(input.trim().to_owned()));
    }

    let frac_digits = frac_part.trim_end_matches('0');
    if frac_digits.len() > decimals as usize {
        return Err(AmountError::TooPrecise { max: decimals });
    }

    let unit = scale(decimals)?;
    let whole = if int_part.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(int_part, 10).map_err(|_| AmountError::Overflow)?
    };
    let frac = if frac_digits.is_empty() {
        U256::ZERO
    } else {
        let padding = decimals as usize - frac_digits.len();
        let digits = U256::from_str_radix(frac_digits, 10).map_err(|_| AmountError::Overflow)?;
        digits
            .checked_mul(U256::from(10u8).pow(U256::from(padding)))
            .ok_or(AmountError::Overflow)?
    };

    whole
        .checked_mul(unit)
        .and_then(|w| w.checked_add(frac))
        .ok_or(AmountError::Overflow)
}

/// Format base units for display.
///
/// The integer part gets thousands separators and trailing fractional zeros
/// are trimmed. A non-zero amount below `minimum_display_unit` (in base
/// units) renders as `<{minimum}`.
pub fn format_token_amount(amount: U256, decimals: u8, minimum_display_unit: U256) -> String {
    if !amount.is_zero() && amount < minimum_display_unit {
        return format!("<{}", format_units(minimum_display_unit, decimals));
    }
    format_units(amount, decimals)
}

fn format_units(amount: U256, decimals: u8) -> String {
    let Ok(unit) = scale(decimals) else {
        return add_thousand_separators(&amount.to_string());
    };
    let whole = amount / unit;
    let frac = amount % unit;

    let int_formatted = add_thousand_separators(&whole.to_string());
    if frac.is_zero() {
        return int_formatted;
    }

    let frac_str = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    format!("{}.{}", int_formatted, frac_str.trim_end_matches('0'))
}

fn add_thousand_separators(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(chars.len() + chars.len() / 3);

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_every_three_digits() {
        assert_eq!(add_thousand_separators("1"), "1");
        assert_eq!(add_thousand_separators("1000"), "1,000");
        assert_eq!(add_thousand_separators("1234567"), "1,234,567");
    }

    #[test]
    fn decimals_beyond_u256_are_rejected() {
        assert_eq!(
            parse_token_amount("1", MAX_DECIMALS + 1),
            Err(AmountError::Decimals(MAX_DECIMALS + 1))
        );
    }
}
