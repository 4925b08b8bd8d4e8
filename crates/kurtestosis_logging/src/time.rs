use std::time::Duration;

/// Formats an elapsed duration the way run summaries print it.
pub fn format_duration(duration: Duration) -> String {
    if duration.as_secs() < 2 {
        format!("{}ms", duration.as_millis())
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(0)), "0ms");
        assert_eq!(format_duration(Duration::from_millis(1999)), "1999ms");
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.50s");
    }
}
