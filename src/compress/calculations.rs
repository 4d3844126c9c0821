//! Pure calculation functions for output dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the scale-down-only fit of an image within a bounding box.
///
/// The clamp runs in two sequential steps: width first (scaling height to
/// keep the aspect ratio), then height (scaling width). Intermediate values
/// stay in floating point and rounding happens once at the end, so the
/// result matches a single combined scale factor to within rounding.
///
/// Never upscales: inputs already inside the box pass through unchanged.
///
/// # Arguments
/// * `source` - Decoded image dimensions (width, height)
/// * `bounds` - Bounding box (max width, max height)
///
/// # Returns
/// * `(width, height)` - Output dimensions, each at least 1 pixel
///
/// # Examples
/// ```
/// # use upshrink::compress::fit_within;
/// // 4:3 source into a wide box → height is the tighter bound
/// assert_eq!(fit_within((4000, 3000), (1200, 600)), (800, 600));
///
/// // Already inside the box → unchanged
/// assert_eq!(fit_within((200, 100), (1920, 1080)), (200, 100));
/// ```
pub fn fit_within(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (max_w, max_h) = (bounds.0 as f64, bounds.1 as f64);
    let mut w = source.0 as f64;
    let mut h = source.1 as f64;

    if w > max_w {
        h = h * max_w / w;
        w = max_w;
    }
    if h > max_h {
        w = w * max_h / h;
        h = max_h;
    }

    (round_pixel(w), round_pixel(h))
}

/// Round a fractional dimension to a whole pixel, never below 1.
///
/// The floor matters for extreme aspect ratios: a 10000x10 strip fit into
/// 100x100 wants a 0.1px height, which must become 1 to stay encodable.
fn round_pixel(value: f64) -> u32 {
    (value.round() as u32).max(1)
}
