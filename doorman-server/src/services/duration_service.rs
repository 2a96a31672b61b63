use std::fmt::Write;

use time::Duration;

/// Render an elapsed span as e.g. `"1 days, 2 hours, 5 minutes"`.
///
/// Unit names are always plural and zero-valued units are skipped; this
/// matches the output the legacy automations already parse. Seconds only
/// appear when no larger unit contributed anything, and a span under one
/// second (or negative, from clock skew) renders as the empty string.
pub fn format_duration(span: Duration) -> String {
    let total = span.whole_seconds().max(0);

    let days = total / 86_400;
    let hours = total % 86_400 / 3_600;
    let minutes = total % 3_600 / 60;
    let seconds = total % 60;

    let mut result = String::new();
    if days > 0 {
        let _ = write!(result, "{days} days, ");
    }
    if hours > 0 {
        let _ = write!(result, "{hours} hours, ");
    }
    if minutes > 0 {
        let _ = write!(result, "{minutes} minutes, ");
    }

    if result.is_empty() {
        if seconds > 0 {
            let _ = write!(result, "{seconds} seconds");
        }
    } else {
        result.truncate(result.len() - 2);
    }

    result
}
