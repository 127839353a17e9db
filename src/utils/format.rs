//! Countdown formatting

/// Format seconds as `MM:SS`, or `H:MM:SS` from one hour up
pub fn format_countdown(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_countdown(0), "00:00");
        assert_eq!(format_countdown(59), "00:59");
        assert_eq!(format_countdown(900), "15:00");
    }

    #[test]
    fn formats_hours() {
        assert_eq!(format_countdown(3600), "1:00:00");
        assert_eq!(format_countdown(5025), "1:23:45");
    }
}
