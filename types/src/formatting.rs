//! CSS value formatting.
//!
//! Inline styles written by the frontend all go through this module so the
//! numeric output stays consistent (shortest round-trip form, no trailing
//! `.0`).

/// Format a length in pixels.
///
/// # Examples
/// ```
/// use folio_types::formatting::format_px;
/// assert_eq!(format_px(4.0), "4px");
/// assert_eq!(format_px(2.5), "2.5px");
/// assert_eq!(format_px(-0.0), "0px");
/// ```
pub fn format_px(value: f64) -> String {
    format!("{}px", normalize(value))
}

/// Format a percentage, clamped to `[0, 100]`.
///
/// Non-finite input (a zero-height document divides by zero) maps to `0%`.
///
/// # Examples
/// ```
/// use folio_types::formatting::format_percent;
/// assert_eq!(format_percent(42.0), "42%");
/// assert_eq!(format_percent(140.0), "100%");
/// assert_eq!(format_percent(f64::NAN), "0%");
/// ```
pub fn format_percent(value: f64) -> String {
    let clamped = if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    };
    format!("{}%", normalize(clamped))
}

/// Format an opacity for `style.opacity`.
pub fn format_opacity(value: f64) -> String {
    format!("{}", normalize(value.clamp(0.0, 1.0)))
}

/// Collapse `-0.0` to `0.0` so it never renders as `-0`.
#[inline]
fn normalize(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}
