use crate::traits::VideoGeometry;
use tubely_core::AspectRatio;

// Ratios in hundredths after rounding: 16/9 -> 1.78, 9/16 -> 0.56.
const LANDSCAPE_HUNDREDTHS: i64 = 178;
const PORTRAIT_HUNDREDTHS: i64 = 56;

/// Classify a frame size by its width/height ratio rounded to two decimals.
///
/// Rounding is half away from zero. Only an exact match on the rounded value counts, so
/// 1.77 and 1.79 are both `Other`. A zero height is `Other`.
pub fn classify(width: u32, height: u32) -> AspectRatio {
    if height == 0 {
        return AspectRatio::Other;
    }

    let hundredths = (f64::from(width) / f64::from(height) * 100.0).round() as i64;
    match hundredths {
        LANDSCAPE_HUNDREDTHS => AspectRatio::Landscape,
        PORTRAIT_HUNDREDTHS => AspectRatio::Portrait,
        _ => AspectRatio::Other,
    }
}

impl VideoGeometry {
    pub fn aspect_ratio(&self) -> AspectRatio {
        classify(self.width, self.height)
    }
}
