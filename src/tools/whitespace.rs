/// Marker written in place of a space.
pub const SPACE_MARKER: &str = "#SP#";
/// Marker written in place of a newline.
pub const NEWLINE_MARKER: &str = "#NL#";
/// Marker written in place of a tab.
pub const TAB_MARKER: &str = "#TAB#";

/// The three substitutions, used in both directions.
const MARKERS: [(char, &str); 3] = [
    (' ', SPACE_MARKER),
    ('\n', NEWLINE_MARKER),
    ('\t', TAB_MARKER),
];

/// Replace every space, newline and tab with its marker. Everything else passes through.
pub fn mark(text: &str) -> String {
    // Every substitution grows the text, so reserve a little headroom up front
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    for c in text.chars() {
        match MARKERS.iter().find(|(ws, _)| *ws == c) {
            Some((_, marker)) => out.push_str(marker),
            None => out.push(c),
        }
    }
    out
}

/// Restore spaces, newlines and tabs from their markers.
///
/// A partial or malformed marker is not an error. It is copied through as literal text.
pub fn unmark(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    // Markers all start with '#', so only stop to look at those.
    while let Some(pos) = rest.find('#') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match MARKERS.iter().find(|(_, marker)| rest.starts_with(marker)) {
            Some((ws, marker)) => {
                out.push(*ws);
                rest = &rest[marker.len()..];
            }
            None => {
                out.push('#');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
