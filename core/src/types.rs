//! Shared primitive types used across the whole generator.

/// Stable identity token of a client, e.g. `clt_001`.
pub type ClientId = String;

/// Identity token of a backup job, e.g. `bkp_000001`.
pub type BackupId = String;

/// Fixed-width timestamp format used in every emitted table.
/// Zero-padded, so lexicographic order equals chronological order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date format for presentation-only date fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a GB quantity the way the fixture consumers expect:
/// two-decimal rounding, shortest form, and at least one decimal
/// place (`2.0`, `1.6`, `1.85`).
pub fn format_gb(value: f64) -> String {
    let rounded = round2(value);
    if rounded.fract() == 0.0 {
        format!("{rounded:.1}")
    } else {
        format!("{rounded}")
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gb_formatting_keeps_one_decimal_for_whole_values() {
        assert_eq!(format_gb(0.0), "0.0");
        assert_eq!(format_gb(2.0), "2.0");
        assert_eq!(format_gb(1.6), "1.6");
        assert_eq!(format_gb(1.854), "1.85");
        assert_eq!(format_gb(2.399999), "2.4");
    }
}
