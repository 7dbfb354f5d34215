//! Length-capping for logged values

use std::borrow::Cow;

/// Marker appended to values that were cut short
pub const ELLIPSIS: &str = "...";

/// Default cap for logged fields
pub const DEFAULT_MAX_LENGTH: usize = 100;

/// Cap `value` at `max` characters.
///
/// Values of at most `max` characters are returned untouched. Longer values
/// keep their first `max` characters followed by [`ELLIPSIS`]. Characters are
/// Unicode scalar values, so a multi-byte sequence is never split.
pub fn truncate(value: &str, max: usize) -> Cow<'_, str> {
    match value.char_indices().nth(max) {
        None => Cow::Borrowed(value),
        Some((cut, _)) => {
            let mut shortened = String::with_capacity(cut + ELLIPSIS.len());
            shortened.push_str(&value[..cut]);
            shortened.push_str(ELLIPSIS);
            Cow::Owned(shortened)
        }
    }
}
