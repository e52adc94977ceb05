//! Plain-text preview derivation for entry content.
//!
//! # Responsibility
//! - Turn raw, possibly markup-bearing content into a bounded plain-text
//!   excerpt for list views.
//!
//! # Invariants
//! - Pure and deterministic; no storage access, no external state.
//! - Output never exceeds [`PREVIEW_MAX_CHARS`] characters plus the
//!   ellipsis marker, and formatting its own output is a no-op.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum preview length in characters, before the ellipsis marker.
pub const PREVIEW_MAX_CHARS: usize = 150;
/// Marker appended when truncation occurred, so callers can distinguish
/// full content from a cut preview.
pub const PREVIEW_ELLIPSIS: char = '…';

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static ENCODED_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9+/=]{50,}").expect("valid encoded-run regex"));
static DOTTED_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.[\w\-]{20,}").expect("valid dotted-token regex"));

/// Derives a bounded plain-text preview from raw entry content.
///
/// Rules, applied in order:
/// 1. Strip `<...>` tag spans, delimiters included. An unterminated `<`
///    is left as-is.
/// 2. Collapse whitespace runs to one space and trim the ends.
/// 3. Remove accidental artifacts: runs of 50+ base64-alphabet
///    characters, then runs of 20+ word/hyphen characters directly after
///    a literal dot (the dot goes with them).
/// 4. Truncate to [`PREVIEW_MAX_CHARS`] characters and append
///    [`PREVIEW_ELLIPSIS`] when truncation occurred.
pub fn format_preview(content: &str) -> String {
    let without_tags = TAG_RE.replace_all(content, "");
    let collapsed = WHITESPACE_RE.replace_all(&without_tags, " ");
    let without_encoded = ENCODED_RUN_RE.replace_all(collapsed.trim(), "");
    let without_tokens = DOTTED_TOKEN_RE.replace_all(&without_encoded, "");
    // Artifact removal can leave doubled or dangling spaces behind;
    // collapse once more so the result is a fixed point of this function.
    let normalized = WHITESPACE_RE.replace_all(&without_tokens, " ");
    truncate_with_ellipsis(normalized.trim())
}

fn truncate_with_ellipsis(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count <= PREVIEW_MAX_CHARS {
        return text.to_string();
    }

    // An already-truncated preview is exactly max + marker; pass it
    // through instead of cutting and re-appending.
    if char_count == PREVIEW_MAX_CHARS + 1 && text.ends_with(PREVIEW_ELLIPSIS) {
        return text.to_string();
    }

    let mut preview: String = text.chars().take(PREVIEW_MAX_CHARS).collect();
    preview.push(PREVIEW_ELLIPSIS);
    preview
}
