//! Constants shared across the importer.

/// Floating-point comparison epsilon.
pub const EPS: f64 = 0.0001;

/// Scale applied to tool diameters when used as histogram keys.
/// One key unit = 0.1 mm, so fractional diameters (4.5 mm) stay distinct
/// while the histogram map remains ordered.
pub const DIAMETER_KEY_SCALE: f64 = 10.0;

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    use super::EPS;

    /// Check if two floats are approximately equal.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }
}
