//! First-match chunk labelling against risky zones.
//!
//! A chunk takes the category of the first zone, in extraction order, that
//! starts inside it, ends inside it, or covers it entirely. The policy is
//! first-match rather than best-match: an earlier zone that barely clips a
//! chunk beats a later zone that sits squarely inside it.

use lexguard_core::Category;

use crate::chunker::Chunk;
use crate::zones::RiskyZone;

/// Whether `zone` overlaps the half-open chunk range `[start, end)` under the
/// three labelling conditions.
pub fn touches(zone: &RiskyZone, start: usize, end: usize) -> bool {
    let begins_inside = start <= zone.start && zone.start < end;
    let ends_inside = start < zone.end && zone.end <= end;
    let covers = zone.start <= start && zone.end >= end;
    begins_inside || ends_inside || covers
}

/// Category of the first zone touching `[start, end)`, or Safe.
pub fn resolve(start: usize, end: usize, zones: &[RiskyZone]) -> Category {
    for zone in zones {
        if touches(zone, start, end) {
            return zone.category;
        }
    }
    Category::Safe
}

/// Assign each chunk its category.
pub fn label_chunks<'a>(
    chunks: impl Iterator<Item = Chunk<'a>>,
    zones: &[RiskyZone],
) -> impl Iterator<Item = Chunk<'a>> {
    chunks.map(move |mut chunk| {
        chunk.category = resolve(chunk.start, chunk.end, zones);
        chunk
    })
}
