//! Pure calculation functions for thumbnail dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate dimensions that fit a source image inside a bounding box.
///
/// Standard thumbnail semantics: the aspect ratio is preserved, the image is
/// shrunk until both dimensions fit inside the box, and an image that already
/// fits is never upscaled. Each output dimension is at least 1 pixel.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `bounds` - Maximum box dimensions (width, height)
///
/// # Returns
/// * `(width, height)` - Target dimensions, never exceeding `bounds`
///
/// # Examples
/// ```
/// # use marker_mill::imaging::calculate_fit_dimensions;
/// // 1000x1000 square into a 150x96 box → limited by height
/// assert_eq!(calculate_fit_dimensions((1000, 1000), (150, 96)), (96, 96));
///
/// // Small image already fits → unchanged
/// assert_eq!(calculate_fit_dimensions((100, 50), (150, 96)), (100, 50));
/// ```
pub fn calculate_fit_dimensions(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (max_w, max_h) = bounds;

    let ratio_w = max_w as f64 / src_w as f64;
    let ratio_h = max_h as f64 / src_h as f64;
    let ratio = ratio_w.min(ratio_h);

    if ratio >= 1.0 {
        // Already inside the box: no upscaling
        return (src_w, src_h);
    }

    let w = ((src_w as f64 * ratio).round() as u32).max(1);
    let h = ((src_h as f64 * ratio).round() as u32).max(1);
    (w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // calculate_fit_dimensions tests
    // =========================================================================

    #[test]
    fn fit_square_source_limited_by_height() {
        // 1000x1000 into 150x96: height is the tighter bound
        assert_eq!(calculate_fit_dimensions((1000, 1000), (150, 96)), (96, 96));
    }

    #[test]
    fn fit_wide_source_limited_by_width() {
        // 3000x1000 (3:1) into 150x96: width is the tighter bound
        // 150/3000 = 0.05 → 150x50
        assert_eq!(calculate_fit_dimensions((3000, 1000), (150, 96)), (150, 50));
    }

    #[test]
    fn fit_tall_source_limited_by_height() {
        // 1000x3000 (1:3) into 150x96: 96/3000 = 0.032 → 32x96
        assert_eq!(calculate_fit_dimensions((1000, 3000), (150, 96)), (32, 96));
    }

    #[test]
    fn fit_never_upscales_smaller_source() {
        assert_eq!(calculate_fit_dimensions((100, 50), (150, 96)), (100, 50));
    }

    #[test]
    fn fit_exact_box_size_unchanged() {
        assert_eq!(calculate_fit_dimensions((150, 96), (150, 96)), (150, 96));
    }

    #[test]
    fn fit_one_dimension_over() {
        // 200x50: width over, height under → scale by 150/200 = 0.75
        assert_eq!(calculate_fit_dimensions((200, 50), (150, 96)), (150, 38));
    }

    #[test]
    fn fit_extreme_aspect_clamps_to_one_pixel() {
        // 10000x10: ratio 0.015 would round height to 0
        assert_eq!(calculate_fit_dimensions((10000, 10), (150, 96)), (150, 1));
    }

    #[test]
    fn fit_preserves_aspect_within_rounding() {
        let (w, h) = calculate_fit_dimensions((4000, 3000), (150, 96));
        // 4:3 source: 96 * 4/3 = 128
        assert_eq!((w, h), (128, 96));
        assert!(w <= 150 && h <= 96);
    }
}
