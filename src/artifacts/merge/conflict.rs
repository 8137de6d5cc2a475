use bytes::Bytes;

pub const CURRENT_MARKER: &str = "<<<<<<< HEAD\n";
pub const SEPARATOR_MARKER: &str = "=======\n";
pub const END_MARKER: &str = ">>>>>>>\n";

/// Working file content for a conflicted path
///
/// An absent side contributes nothing between its markers. Contents are
/// copied byte for byte, without adding missing trailing newlines.
pub fn render_conflict(current: Option<&[u8]>, other: Option<&[u8]>) -> Bytes {
    let current = current.unwrap_or_default();
    let other = other.unwrap_or_default();

    let mut content = Vec::with_capacity(
        CURRENT_MARKER.len()
            + current.len()
            + SEPARATOR_MARKER.len()
            + other.len()
            + END_MARKER.len(),
    );
    content.extend_from_slice(CURRENT_MARKER.as_bytes());
    content.extend_from_slice(current);
    content.extend_from_slice(SEPARATOR_MARKER.as_bytes());
    content.extend_from_slice(other);
    content.extend_from_slice(END_MARKER.as_bytes());

    Bytes::from(content)
}
