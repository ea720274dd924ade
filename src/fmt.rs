use rust_decimal::{Decimal, RoundingStrategy};

/// Shown in place of an undefined ratio or variation.
pub const MISSING: &str = "—";

/// Rounds half away from zero, the way amounts are rounded on paper.
fn round_half_up(val: Decimal, dp: u32) -> Decimal {
    val.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

fn cents(val: Decimal) -> Decimal {
    round_half_up(val, 2)
}

/// Format a decimal as a money amount with thousands separators: R$ 1,234.56
pub fn money(symbol: &str, val: Decimal) -> String {
    let rounded = cents(val);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = format!("{:.2}", rounded.abs());
    let (int_part, dec_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    let prefix = if symbol.is_empty() {
        String::new()
    } else {
        format!("{symbol} ")
    };
    if negative {
        format!("-{prefix}{with_commas}.{dec_part}")
    } else {
        format!("{prefix}{with_commas}.{dec_part}")
    }
}

/// Revenue-per-expense ratio as a multiple: 2.00x
pub fn ratio(val: Option<Decimal>) -> String {
    match val {
        Some(r) => format!("{:.2}x", cents(r)),
        None => MISSING.to_string(),
    }
}

/// Signed percentage with one decimal: +12.5%
pub fn signed_percent(val: Option<Decimal>) -> String {
    match val {
        Some(p) => {
            let rounded = round_half_up(p, 1);
            let sign = if rounded >= Decimal::ZERO { "+" } else { "" };
            format!("{sign}{rounded:.1}%")
        }
        None => MISSING.to_string(),
    }
}

/// Plain percentage with one decimal: 87.5%
pub fn percent(val: Option<Decimal>) -> String {
    match val {
        Some(p) => format!("{:.1}%", round_half_up(p, 1)),
        None => MISSING.to_string(),
    }
}

/// Amount with two decimals and no symbol, for machine-readable exports.
pub fn plain(val: Decimal) -> String {
    format!("{:.2}", cents(val))
}

/// Ratio with two decimals for exports; empty when undefined.
pub fn plain_ratio(val: Option<Decimal>) -> String {
    val.map(plain).unwrap_or_default()
}
