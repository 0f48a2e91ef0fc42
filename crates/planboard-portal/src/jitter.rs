//! Deterministic horizontal jitter
//!
//! Markers that share an anchor column are nudged sideways by an amount
//! derived from the cross-reference id alone, so the same id lands on the
//! same offset on every machine and every run.

use planboard_model::CrossRefId;

/// Stable 64-bit seed of an id: the first 8 bytes of its Blake3 digest, LE
#[inline]
#[must_use]
pub fn seed(id: &CrossRefId) -> u64 {
    let hash = blake3::hash(id.as_str().as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(head)
}

/// Offset in `[-range, range]`; zero for a non-positive or non-finite range
#[must_use]
pub fn jitter(id: &CrossRefId, range: f32) -> f32 {
    if !range.is_finite() || range <= 0.0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let unit = seed(id) as f64 / u64::MAX as f64;
    #[allow(clippy::cast_possible_truncation)]
    let offset = ((unit * 2.0 - 1.0) * f64::from(range)) as f32;
    offset.clamp(-range, range)
}
