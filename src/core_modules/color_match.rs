// THEORY:
// The `ColorMatch` module decides whether a sampled pixel "is" the curve color. Plots
// are anti-aliased and compressed, so an exact comparison misses most of the line;
// instead every channel may drift from the target by a tolerance derived from a
// similarity threshold.
//
// Key principles:
// 1.  **Per-channel tolerance**: `allowed = (1 - threshold) * MAX_CHANNEL`. A pixel
//     matches only if red, green and blue are each within `allowed` of the target.
// 2.  **Alpha is ignored**: transparency says nothing about which curve a pixel
//     belongs to.
// 3.  **Pure**: no state, no caching. Symmetric in its two colors and monotonic in
//     the threshold (lowering it never turns a match into a miss).

pub mod color_match {
    use crate::core_modules::pixel::pixel::{MAX_CHANNEL, Pixel};

    /// A similarity threshold in [0, 1]. 1.0 demands exact equality.
    pub type Threshold = f64;

    /// Returns true when every color channel of `candidate` is within the tolerance
    /// that `threshold` allows around `target`.
    pub fn fuzzy_same(target: &Pixel, candidate: &Pixel, threshold: Threshold) -> bool {
        let allowed = allowed_diff(threshold);
        target
            .rgb()
            .iter()
            .zip(candidate.rgb().iter())
            .all(|(&a, &b)| (a as f64 - b as f64).abs() <= allowed)
    }

    /// The largest per-channel difference still considered a match.
    pub fn allowed_diff(threshold: Threshold) -> f64 {
        (1.0 - threshold) * MAX_CHANNEL as f64
    }
}
