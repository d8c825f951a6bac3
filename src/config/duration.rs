//! Duration strings for credential lifetimes.

use std::time::Duration;

/// Parses a duration string (e.g., "30s", "15m", "24h", "7d", "2w").
///
/// A bare number is taken as seconds. Zero is rejected.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim().to_lowercase();

    if s.is_empty() {
        return Err("empty duration".to_string());
    }

    let (num_str, multiplier) = match s.char_indices().last() {
        Some((i, 's')) => (&s[..i], 1),
        Some((i, 'm')) => (&s[..i], 60),
        Some((i, 'h')) => (&s[..i], 3_600),
        Some((i, 'd')) => (&s[..i], 86_400),
        Some((i, 'w')) => (&s[..i], 604_800),
        _ => (s.as_str(), 1),
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {num_str}"))?;

    if num == 0 {
        return Err("duration must be greater than zero".to_string());
    }

    let secs = num
        .checked_mul(multiplier)
        .ok_or_else(|| format!("duration too large: {s}"))?;

    Ok(Duration::from_secs(secs))
}
