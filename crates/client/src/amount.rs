use alloy_primitives::U256;

/// Formats a raw token amount as an exact decimal string.
///
/// Trailing fractional zeros are trimmed, so `10^18` with 18 decimals is `"1"`.
pub fn format_amount(value: U256, decimals: u8) -> String {
    let divisor = U256::from(10u8).pow(U256::from(decimals));
    let (integer, fraction) = value.div_rem(divisor);

    if fraction.is_zero() {
        return integer.to_string();
    }

    let fraction = format!("{:0>width$}", fraction.to_string(), width = decimals as usize);
    format!("{integer}.{}", fraction.trim_end_matches('0'))
}

/// Formats a raw token amount rounded half-up to at most `precision` fractional digits.
pub fn format_display_amount(value: U256, decimals: u8, precision: u8) -> String {
    if precision >= decimals {
        return format_amount(value, decimals);
    }

    let step = U256::from(10u8).pow(U256::from(decimals - precision));
    let (mut scaled, remainder) = value.div_rem(step);
    if remainder >= step - remainder {
        scaled = scaled.saturating_add(U256::from(1u8));
    }

    format_amount(scaled, precision)
}
