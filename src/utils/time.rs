//! Match-clock parsing and formatting utilities

use crate::domain::errors::DomainError;

/// Parse a clock string to seconds.
///
/// Accepts plain seconds (`90.5`), `MM:SS(.ms)` and `HH:MM:SS(.ms)`. Minutes are
/// unbounded in the two-part form so that match clocks such as `93:10` parse.
pub fn parse_clock(time_str: &str) -> Result<f64, DomainError> {
    let trimmed = time_str.trim();
    if trimmed.is_empty() {
        return Err(DomainError::BadArgs("Time cannot be empty".to_string()));
    }

    if let Ok(seconds) = trimmed.parse::<f64>() {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(DomainError::BadArgs(format!(
                "Time must be a non-negative number of seconds: {}",
                trimmed
            )));
        }
        return Ok(seconds);
    }

    let parts: Vec<&str> = trimmed.split(':').collect();
    match parts.as_slice() {
        [minutes, seconds] => {
            let minutes = parse_component(minutes, "minutes", trimmed)?;
            let seconds = parse_seconds(seconds, trimmed)?;
            Ok(minutes as f64 * 60.0 + seconds)
        }
        [hours, minutes, seconds] => {
            let hours = parse_component(hours, "hours", trimmed)?;
            let minutes = parse_component(minutes, "minutes", trimmed)?;
            if minutes >= 60 {
                return Err(DomainError::BadArgs(format!(
                    "Minutes must be less than 60: {}",
                    trimmed
                )));
            }
            let seconds = parse_seconds(seconds, trimmed)?;
            Ok(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds)
        }
        _ => Err(DomainError::BadArgs(format!(
            "Invalid time format '{}'. Supported formats: seconds (e.g., 95.5), MM:SS (e.g., 45:00), HH:MM:SS (e.g., 1:02:30)",
            trimmed
        ))),
    }
}

fn parse_component(part: &str, name: &str, original: &str) -> Result<u64, DomainError> {
    part.parse::<u64>()
        .map_err(|_| DomainError::BadArgs(format!("Invalid {} in '{}'", name, original)))
}

fn parse_seconds(part: &str, original: &str) -> Result<f64, DomainError> {
    let seconds = part
        .parse::<f64>()
        .map_err(|_| DomainError::BadArgs(format!("Invalid seconds in '{}'", original)))?;

    if !(0.0..60.0).contains(&seconds) {
        return Err(DomainError::BadArgs(format!(
            "Seconds must be less than 60: {}",
            original
        )));
    }

    Ok(seconds)
}

/// Format seconds as `M:SS`, truncating fractional seconds
pub fn format_clock(seconds: f64) -> String {
    let minutes = (seconds / 60.0).trunc() as i64;
    let secs = (seconds % 60.0).trunc() as i64;
    format!("{}:{:02}", minutes, secs)
}

/// Format a cut boundary for the media backend, to hundredths of a second
pub fn format_cut_seconds(seconds: f64) -> String {
    format!("{:.2}", seconds)
}
