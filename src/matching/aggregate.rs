//! Average color across all sampled regions

use crate::color::conversion::Color;
use crate::region::Region;

/// Per-channel mean of every sampled region color, rounded to nearest
///
/// Returns `None` when no region carries a color, so callers can clear
/// their display instead of showing a default.
pub fn average(regions: &[Region]) -> Option<Color> {
    let (count, sum_r, sum_g, sum_b) = regions
        .iter()
        .filter_map(|region| region.color)
        .fold((0u64, 0u64, 0u64, 0u64), |(n, r, g, b), color| {
            (
                n + 1,
                r + u64::from(color.red()),
                g + u64::from(color.green()),
                b + u64::from(color.blue()),
            )
        });

    if count == 0 {
        return None;
    }

    let channel = |sum: u64| (sum as f64 / count as f64).round() as u8;
    Some(Color::new(channel(sum_r), channel(sum_g), channel(sum_b)))
}
