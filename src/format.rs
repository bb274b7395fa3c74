//! Rounding and es-MX presentation of computed volumes.

/// Placeholder shown while no volume is available.
pub const RESULT_PLACEHOLDER: &str = "—";

/// Rounds a raw volume to 3 decimals, halves away from zero.
pub fn round_volume(value: f64) -> f64 {
    // + 0.0 folds -0 into +0
    (value * 1000.0).round() / 1000.0 + 0.0
}

/// Formats a rounded volume with es-MX conventions: comma thousands
/// grouping, dot decimal mark, always 3 fractional digits.
pub fn es_mx(value: f64) -> String {
    let text = format!("{value:.3}");
    let Some((int_part, frac_part)) = text.split_once('.') else {
        // inf / NaN have no fractional part; pass them through
        return text;
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (offset, digit) in digits.chars().enumerate() {
        if offset > 0 && (digits.len() - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}{grouped}.{frac_part}")
}

/// Result line shown under the form and printed by the CLI.
pub fn volume_line(display: &str) -> String {
    format!("Volumen: {display} unidades³")
}

/// Error line listing every field that failed validation.
pub fn review_line(labels: &[&str]) -> String {
    format!("Revisa estos campos: {}.", labels.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn rounds_reference_volumes() {
        assert_eq!(round_volume(PI * 4.0 * 5.0), 62.832);
        assert_eq!(round_volume(4.0 / 3.0 * PI * 27.0), 113.097);
        assert_eq!(round_volume(24.0), 24.0);
    }

    #[test]
    fn rounds_halves_away_from_zero() {
        // 0.0625 is exact in binary, so the scaled value is exactly 62.5
        assert_eq!(round_volume(0.0625), 0.063);
        assert_eq!(round_volume(-0.0625), -0.063);
    }

    #[test]
    fn negative_zero_is_normalized() {
        assert_eq!(round_volume(-0.0).to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn formats_three_decimals() {
        assert_eq!(es_mx(62.832), "62.832");
        assert_eq!(es_mx(24.0), "24.000");
        assert_eq!(es_mx(0.063), "0.063");
    }

    #[test]
    fn groups_thousands_with_commas() {
        assert_eq!(es_mx(1000.0), "1,000.000");
        assert_eq!(es_mx(25000.0), "25,000.000");
        assert_eq!(es_mx(999999.999), "999,999.999");
        assert_eq!(es_mx(1234567.891), "1,234,567.891");
    }

    #[test]
    fn keeps_small_integers_ungrouped() {
        assert_eq!(es_mx(0.0), "0.000");
        assert_eq!(es_mx(100.0), "100.000");
    }

    #[test]
    fn carries_the_sign_outside_the_grouping() {
        assert_eq!(es_mx(-1234.5), "-1,234.500");
    }

    #[test]
    fn builds_result_and_error_lines() {
        assert_eq!(volume_line("62.832"), "Volumen: 62.832 unidades³");
        assert_eq!(
            volume_line(RESULT_PLACEHOLDER),
            "Volumen: — unidades³"
        );
        assert_eq!(
            review_line(&["Radio (r)", "Altura (h)"]),
            "Revisa estos campos: Radio (r), Altura (h)."
        );
    }
}
