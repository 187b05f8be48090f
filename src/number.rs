//! Canonical number formatting for emitted path data and attributes.

/// Formats `value` in its shortest stable form.
///
/// Values within 1e-6 of an integer print as that integer; everything else
/// prints with four decimals and the trailing zeros (and a bare trailing
/// point) removed. Formatting an already formatted number is a no-op.
pub fn fmt_number(value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() < 1e-6 {
        let s = format!("{:.0}", rounded);
        return if s == "-0" { "0".to_string() } else { s };
    }

    let s = format!("{:.4}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
