//! Text formatting for counter values shown in the statistics panel.

const GROUP_SEPARATOR: char = ' ';
const BYTE_UNITS: [&str; 6] = ["KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

/// Format an integer with its digits grouped by three, e.g. `1234567` -> `"1 234 567"`.
///
/// The separator is fixed and does not follow the user's locale.
pub fn format_grouped(value: u64) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }

    out
}

/// Format a byte count using 1024-based units with one decimal place.
///
/// Values below 1024 are printed as whole bytes (`"512 B"`), anything larger uses the
/// biggest unit that keeps the scaled value at or above one (`1572864` -> `"1.5 MiB"`).
pub fn format_human_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let last = BYTE_UNITS.len() - 1;
    let mut scaled = bytes as f64 / 1024.0;
    let mut unit = 0;
    while scaled >= 1024.0 && unit < last {
        scaled /= 1024.0;
        unit += 1;
    }

    // Rounding can carry into the next unit, e.g. 1023.96 KiB prints as 1.0 MiB
    let mut rounded = round_one_decimal(scaled);
    if rounded >= 1024.0 && unit < last {
        rounded = round_one_decimal(scaled / 1024.0);
        unit += 1;
    }

    format!("{:.1} {}", rounded, BYTE_UNITS[unit])
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(7), "7");
        assert_eq!(format_grouped(999), "999");
        assert_eq!(format_grouped(1000), "1 000");
        assert_eq!(format_grouped(123456), "123 456");
        assert_eq!(format_grouped(1234567), "1 234 567");
        assert_eq!(format_grouped(u64::MAX), "18 446 744 073 709 551 615");
    }

    #[test]
    fn test_format_human_bytes() {
        assert_eq!(format_human_bytes(0), "0 B");
        assert_eq!(format_human_bytes(1023), "1023 B");
        assert_eq!(format_human_bytes(1024), "1.0 KiB");
        assert_eq!(format_human_bytes(1536), "1.5 KiB");
        assert_eq!(format_human_bytes(1572864), "1.5 MiB");
        assert_eq!(format_human_bytes(1024 * 1024 * 1024), "1.0 GiB");
        assert_eq!(format_human_bytes(5 * 1024_u64.pow(4)), "5.0 TiB");
    }

    #[test]
    fn test_format_human_bytes_carries_at_unit_boundary() {
        assert_eq!(format_human_bytes(1048524), "1023.9 KiB");
        assert_eq!(format_human_bytes(1048575), "1.0 MiB");
        assert_eq!(format_human_bytes(1073741823), "1.0 GiB");
        assert_eq!(format_human_bytes(1024_u64.pow(4) - 1), "1.0 TiB");
    }

    #[test]
    fn test_format_human_bytes_caps_at_largest_unit() {
        assert_eq!(format_human_bytes(u64::MAX), "16.0 EiB");
    }
}
