//! Quantity input normalization.
//!
//! Cells accept keystrokes only while the buffer is still a plausible partial
//! decimal (`is_valid_intermediate_input`). On commit the buffer is quantized
//! to three fractional digits (`normalize_to_three_decimals`), and every
//! committed quantity is rendered with `format_number`.

/// Number of fractional digits carried by every committed quantity.
pub const QUANTITY_DECIMALS: usize = 3;

/// Multiplier that turns a committed quantity into whole thousandths.
pub const QUANTITY_SCALE: f64 = 1000.0;

fn is_sign(c: char) -> bool {
    c == '-' || c == '+'
}

/// Check whether a string is a valid partial state of a signed decimal.
///
/// Accepts the empty string, a lone sign, a lone point, a sign followed by a
/// point, and anything of the form `[sign] digits* [.] digits*`.
pub fn is_valid_intermediate_input(value: &str) -> bool {
    let unsigned = match value.chars().next() {
        Some(c) if is_sign(c) => &value[1..],
        _ => value,
    };

    let mut seen_point = false;
    for c in unsigned.chars() {
        match c {
            '0'..='9' => {}
            '.' if !seen_point => seen_point = true,
            _ => return false,
        }
    }
    true
}

/// Round a value to three fractional digits, ties away from zero.
///
/// Non-finite values (and values whose scaled form overflows) collapse to 0,
/// as does negative zero.
pub fn round_to_three_decimals(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let scaled = (value * QUANTITY_SCALE).round();
    if !scaled.is_finite() {
        return 0.0;
    }
    let rounded = scaled / QUANTITY_SCALE;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Normalize a committed cell string into a three-decimal quantity.
///
/// Empty, sign-only and point-only strings become 0, as do strings that fail
/// to parse or parse to a non-finite number.
pub fn normalize_to_three_decimals(value: &str) -> f64 {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.chars().all(|c| is_sign(c) || c == '.') {
        return 0.0;
    }

    match trimmed.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => round_to_three_decimals(parsed),
        _ => 0.0,
    }
}

/// Parse user input to a number, treating anything unparseable as 0.
pub fn parse_number(value: &str) -> f64 {
    match value.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => parsed,
        _ => 0.0,
    }
}

/// Format a quantity with exactly three fractional digits.
pub fn format_number(value: f64) -> String {
    format!("{:.*}", QUANTITY_DECIMALS, round_to_three_decimals(value))
}
