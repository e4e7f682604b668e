/// Identifier for one liquid color, as labeled by the scanning collaborator.
///
/// Any consistent labeling is acceptable; the engine never checks ids against
/// a palette. Mapping ids back to display colors is the presentation layer's
/// concern.
pub type ColorId = u8;

/// Letter used when printing a unit of this color, `A` for id 0 and so on.
pub(crate) fn display_letter(color: ColorId) -> char {
    match color {
        0..=25 => (b'A' + color) as char,
        _ => '?',
    }
}
