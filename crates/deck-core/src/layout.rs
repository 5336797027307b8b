//! Page fitting and capsule stacking geometry

use crate::types::PageSize;

/// Width / height ratio of a portrait deck page
pub const DEFAULT_ASPECT_RATIO: f32 = 0.77;

/// Largest box with the given aspect ratio that fits inside the viewport
pub fn fit_page(viewport: PageSize, aspect_ratio: f32) -> PageSize {
    if viewport.is_empty() || aspect_ratio <= 0.0 {
        return PageSize::default();
    }

    if viewport.width / viewport.height > aspect_ratio {
        // Viewport is wider than the page: height bound
        PageSize::new(viewport.height * aspect_ratio, viewport.height)
    } else {
        PageSize::new(viewport.width, viewport.width / aspect_ratio)
    }
}

/// Height of the indicator capsule for a given number of title lines
pub fn indicator_height(title_lines: usize) -> f32 {
    if title_lines > 1 {
        (title_lines as f32 * 20.0 + 20.0).max(60.0)
    } else {
        50.0
    }
}

/// Bottom offset of a capsule stacked `below` capsules above the indicator
///
/// Offsets are measured from the bottom edge with a 30 unit margin and a
/// 10 unit gap between capsules; stacked capsules are 50 units tall.
pub fn capsule_offset(title_lines: usize, below: usize) -> f32 {
    const MARGIN: f32 = 30.0;
    const GAP: f32 = 10.0;
    const CAPSULE: f32 = 50.0;

    if below == 0 {
        return MARGIN;
    }
    MARGIN + indicator_height(title_lines) + GAP + (below - 1) as f32 * (CAPSULE + GAP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_page_height_bound() {
        let fitted = fit_page(PageSize::new(1920.0, 1000.0), 0.77);
        assert_eq!(fitted.height, 1000.0);
        assert!((fitted.width - 770.0).abs() < 0.01);
    }

    #[test]
    fn test_fit_page_width_bound() {
        let fitted = fit_page(PageSize::new(385.0, 1000.0), 0.77);
        assert_eq!(fitted.width, 385.0);
        assert!((fitted.height - 500.0).abs() < 0.01);
    }

    #[test]
    fn test_fit_page_empty_viewport() {
        assert!(fit_page(PageSize::default(), 0.77).is_empty());
        assert!(fit_page(PageSize::new(100.0, 100.0), 0.0).is_empty());
    }

    #[test]
    fn test_indicator_height() {
        assert_eq!(indicator_height(0), 50.0);
        assert_eq!(indicator_height(1), 50.0);
        assert_eq!(indicator_height(2), 60.0);
        assert_eq!(indicator_height(3), 80.0);
    }

    #[test]
    fn test_capsule_offset_stacks_above_indicator() {
        assert_eq!(capsule_offset(1, 0), 30.0);
        assert_eq!(capsule_offset(1, 1), 90.0);
        assert_eq!(capsule_offset(3, 1), 120.0);
        assert_eq!(capsule_offset(1, 2), 150.0);
    }
}
