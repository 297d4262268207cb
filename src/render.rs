//! Human-readable output for pass lists.

use chrono::DateTime;
use chrono_tz::Tz;

use crate::flyover::{FlyoverWindow, LookupError};

const RISE_FORMAT: &str = "%a %b %d %Y %H:%M:%S %Z";

/// Rise time in `tz`, or the raw epoch value if it is out of chrono's range.
pub fn format_rise(risetime: i64, tz: Tz) -> String {
    match DateTime::from_timestamp(risetime, 0) {
        Some(utc) => utc.with_timezone(&tz).format(RISE_FORMAT).to_string(),
        None => format!("@{}", risetime),
    }
}

pub fn format_pass(window: &FlyoverWindow, tz: Tz) -> String {
    format!(
        "Next pass at {} for {} seconds!",
        format_rise(window.risetime, tz),
        window.duration
    )
}

/// One line per pass, each terminated by a newline.
pub fn render_passes(passes: &[FlyoverWindow], tz: Tz) -> String {
    if passes.is_empty() {
        return "No upcoming passes reported for this location.\n".to_string();
    }
    let mut out = String::new();
    for p in passes {
        out.push_str(&format_pass(p, tz));
        out.push('\n');
    }
    out
}

pub fn error_line(err: &LookupError) -> String {
    format!("It didn't work: {}", err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flyover::Step;

    #[test]
    fn test_format_pass_utc() {
        let w = FlyoverWindow { risetime: 1680000000, duration: 600 };
        assert_eq!(
            format_pass(&w, chrono_tz::UTC),
            "Next pass at Tue Mar 28 2023 10:40:00 UTC for 600 seconds!"
        );
    }

    #[test]
    fn test_format_rise_local_zone() {
        assert_eq!(
            format_rise(1680000000, chrono_tz::America::New_York),
            "Tue Mar 28 2023 06:40:00 EDT"
        );
    }

    #[test]
    fn test_render_keeps_order() {
        let passes = [
            FlyoverWindow { risetime: 1680000600, duration: 300 },
            FlyoverWindow { risetime: 1680000000, duration: 600 },
        ];
        let out = render_passes(&passes, chrono_tz::UTC);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("10:50:00"));
        assert!(lines[1].contains("10:40:00"));
    }

    #[test]
    fn test_render_empty() {
        assert!(render_passes(&[], chrono_tz::UTC).starts_with("No upcoming passes"));
    }

    #[test]
    fn test_error_line() {
        let err = LookupError::EmptyBody { step: Step::FetchIp };
        assert_eq!(error_line(&err), "It didn't work: There was no body when fetching IP");
    }
}
