//! Symbolic style names.

/// Style applied for the `"dark"` alias.
pub const DARK_STYLE_ID: &str = "e05ac437-fcc2-4845-ad74-b1de9ce07555";

/// Style applied for the `"light"` alias.
pub const LIGHT_STYLE_ID: &str = "c080bb6a-8134-4993-93a1-5b4d8c36a59b";

/// Resolves `"dark"` and `"light"` to their style ids; any other string is
/// already a style id and is returned unchanged.
///
/// ```
/// use mapgl_protocol::style::{resolve_style_id, DARK_STYLE_ID};
///
/// assert_eq!(resolve_style_id("dark"), DARK_STYLE_ID);
/// assert_eq!(resolve_style_id("my-style"), "my-style");
/// ```
pub fn resolve_style_id(style_id: &str) -> &str {
    match style_id {
        "dark" => DARK_STYLE_ID,
        "light" => LIGHT_STYLE_ID,
        other => other,
    }
}
