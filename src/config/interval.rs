use std::time::Duration;

/// Longest interval accepted anywhere: one year.
pub const MAX_INTERVAL: Duration = Duration::from_secs(365 * 86400);

/// Parse an interval like "30s", "5m", "1h", "1d" or raw seconds.
pub fn parse_interval(s: &str) -> Result<Duration, String> {
    let s = s.trim().to_lowercase();

    let (count, unit, unit_secs) = if let Some(hours) = s.strip_suffix('h') {
        (hours, "hours", 3600)
    } else if let Some(minutes) = s.strip_suffix('m') {
        (minutes, "minutes", 60)
    } else if let Some(days) = s.strip_suffix('d') {
        (days, "days", 86400)
    } else if let Some(secs) = s.strip_suffix('s') {
        (secs, "seconds", 1)
    } else {
        (s.as_str(), "interval", 1)
    };

    let count = count
        .trim()
        .parse::<u64>()
        .map_err(|_| format!("Invalid {}: {}. Use format like '30s', '5m', '1h'", unit, count))?;

    let secs = count
        .checked_mul(unit_secs)
        .filter(|&secs| secs <= MAX_INTERVAL.as_secs())
        .ok_or_else(|| {
            format!(
                "Interval too long: {}. Maximum is {}",
                s,
                format_interval(MAX_INTERVAL)
            )
        })?;

    if secs == 0 {
        return Err("Interval must be greater than zero".to_string());
    }
    Ok(Duration::from_secs(secs))
}

/// Format an interval for display
pub fn format_interval(interval: Duration) -> String {
    let secs = interval.as_secs();
    if secs >= 86400 && secs % 86400 == 0 {
        format!("{}d", secs / 86400)
    } else if secs >= 3600 && secs % 3600 == 0 {
        format!("{}h", secs / 3600)
    } else if secs >= 60 && secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: &str) -> u64 {
        parse_interval(s).unwrap().as_secs()
    }

    #[test]
    fn test_parse_interval() {
        assert_eq!(secs("30s"), 30);
        assert_eq!(secs("5m"), 300);
        assert_eq!(secs("1h"), 3600);
        assert_eq!(secs("1d"), 86400);
        assert_eq!(secs("45"), 45);
        assert_eq!(secs(" 2M "), 120);
        assert!(parse_interval("soon").is_err());
        assert!(parse_interval("0s").is_err());
        assert!(parse_interval("").is_err());
    }

    #[test]
    fn test_parse_interval_rejects_overflow() {
        assert!(parse_interval("18446744073709551615h").is_err());
        assert!(parse_interval("18446744073709551615m").is_err());
        assert!(parse_interval("18446744073709551615d").is_err());
        assert!(parse_interval("99999999999999999999s").is_err());
    }

    #[test]
    fn test_parse_interval_upper_bound() {
        assert_eq!(secs("365d"), MAX_INTERVAL.as_secs());
        assert!(parse_interval("366d").is_err());
        assert!(parse_interval("18446744073709551615s").is_err());
        assert!(parse_interval("18446744073709551615").is_err());
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(Duration::from_secs(30)), "30s");
        assert_eq!(format_interval(Duration::from_secs(90)), "90s");
        assert_eq!(format_interval(Duration::from_secs(1800)), "30m");
        assert_eq!(format_interval(Duration::from_secs(7200)), "2h");
        assert_eq!(format_interval(Duration::from_secs(86400)), "1d");
    }
}
