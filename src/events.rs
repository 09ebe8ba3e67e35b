//! Structured event lines.
//!
//! Each event is a single line of fields joined by [`DELIMITER`]. The delimiter never appears
//! inside a field.
use tracing::info;

/// The tracing target that event lines are emitted on.
pub const TARGET: &str = "quotebot::events";

/// The field separator (ASCII unit separator).
pub const DELIMITER: char = '\u{1f}';

/// Joins `fields` into a single event line.
///
/// Occurrences of [`DELIMITER`] inside a field are replaced by a space.
#[must_use]
pub fn line<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut line = String::new();

    for (idx, field) in fields.into_iter().enumerate() {
        if idx > 0 {
            line.push(DELIMITER);
        }

        line.push_str(&field.as_ref().replace(DELIMITER, " "));
    }

    line
}

/// Emits an event line built from `fields`.
pub fn emit<I, S>(fields: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    info!(target: TARGET, "{}", line(fields));
}
