//! Hero section geometry: headline words, parallax layers and the scroll
//! indicator. The particle trail lives in [`crate::particles`].

pub const PARALLAX_LAYERS: usize = 3;
const PARALLAX_SPEED: f64 = 0.5;
const PARALLAX_X_PX: f64 = 50.0;
const PARALLAX_Y_PX: f64 = 30.0;
const INDICATOR_FADE_PX: f64 = 200.0;

/// Words of the headline, each wrapped for the staggered reveal.
pub fn headline_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Pointer position relative to the hero box, in `[-0.5, 0.5]` on each
/// axis when inside.
pub fn normalized_pointer(
    client: (f64, f64),
    rect_origin: (f64, f64),
    rect_size: (f64, f64),
) -> (f64, f64) {
    let (width, height) = rect_size;
    if width <= 0.0 || height <= 0.0 {
        return (0.0, 0.0);
    }
    (
        (client.0 - rect_origin.0) / width - 0.5,
        (client.1 - rect_origin.1) / height - 0.5,
    )
}

/// Offset of parallax layer `index` for a normalized pointer position.
/// Deeper layers move further.
pub fn parallax_offset(index: usize, pointer: (f64, f64)) -> (f64, f64) {
    let speed = (index + 1) as f64 * PARALLAX_SPEED;
    (
        pointer.0 * speed * PARALLAX_X_PX,
        pointer.1 * speed * PARALLAX_Y_PX,
    )
}

/// Scroll indicator opacity, fading out over the first 200px.
pub fn indicator_opacity(scroll_y: f64) -> f64 {
    (1.0 - scroll_y / INDICATOR_FADE_PX).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headline_words() {
        assert_eq!(
            headline_words("  Creative   Developer & Designer "),
            vec!["Creative", "Developer", "&", "Designer"]
        );
    }

    #[test]
    fn test_parallax_layers_scale_with_depth() {
        let pointer = normalized_pointer((150.0, 100.0), (0.0, 0.0), (200.0, 100.0));
        assert_eq!(pointer, (0.25, 0.5));
        assert_eq!(parallax_offset(0, pointer), (6.25, 7.5));
        assert_eq!(parallax_offset(2, pointer), (18.75, 22.5));
    }

    #[test]
    fn test_degenerate_rect() {
        assert_eq!(normalized_pointer((10.0, 10.0), (0.0, 0.0), (0.0, 50.0)), (0.0, 0.0));
    }

    #[test]
    fn test_indicator_opacity() {
        assert_eq!(indicator_opacity(0.0), 1.0);
        assert_eq!(indicator_opacity(100.0), 0.5);
        assert_eq!(indicator_opacity(400.0), 0.0);
    }
}
