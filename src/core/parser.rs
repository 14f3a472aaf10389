use crate::core::prompt::{CONCLUSION_MARKER, REASON_MARKER};
use crate::models::{Verdict, NOT_RECOMMENDABLE};

/// Reason used when the model produced no text at all
pub const EMPTY_RESPONSE_REASON: &str = "model returned nothing";

/// Reason used when the text has no reason line
pub const MISSING_REASON: &str = "no reason";

/// Parse the two labelled lines of a filtering answer into a verdict
///
/// Never fails. Missing lines fall back to `not recommendable` and
/// `no reason`; an absent or blank response yields the fixed
/// "model returned nothing" verdict. When a marker appears on more than one
/// line, the last one wins.
pub fn parse_filter_output(text: Option<&str>) -> Verdict {
    let text = match text.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Verdict::new(NOT_RECOMMENDABLE, EMPTY_RESPONSE_REASON),
    };

    let mut result = NOT_RECOMMENDABLE.to_string();
    let mut reason = MISSING_REASON.to_string();

    for line in text.lines() {
        if line.contains(CONCLUSION_MARKER) {
            result = line.replace(CONCLUSION_MARKER, "").trim().to_string();
        } else if line.contains(REASON_MARKER) {
            reason = line.replace(REASON_MARKER, "").trim().to_string();
        }
    }

    Verdict { result, reason }
}
