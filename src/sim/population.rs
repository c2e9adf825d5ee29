//! Marble counting per enclosure

use super::geometry::point_in_polygon;
use super::state::{Enclosure, Marble};

/// The enclosure a point falls in: lowest id wins, `None` if outside all
pub fn owning_enclosure<'a>(
    enclosures: &'a [Enclosure],
    marble: &Marble,
) -> Option<&'a Enclosure> {
    enclosures
        .iter()
        .filter(|e| point_in_polygon(marble.pos, &e.vertices))
        .min_by_key(|e| e.id)
}

/// Fill in every enclosure's `marble_count` from the frozen marble positions
///
/// Counts are recomputed from zero. Marbles outside every enclosure are not
/// counted anywhere. Returns the count set in enclosure id order.
pub fn count_populations(enclosures: &mut [Enclosure], marbles: &[Marble]) -> Vec<u32> {
    enclosures.sort_by_key(|e| e.id);
    for enclosure in enclosures.iter_mut() {
        enclosure.marble_count = 0;
    }

    let mut outside = 0;
    for marble in marbles {
        let owner = enclosures
            .iter()
            .position(|e| point_in_polygon(marble.pos, &e.vertices));
        match owner {
            Some(index) => enclosures[index].marble_count += 1,
            None => outside += 1,
        }
    }

    let counts: Vec<u32> = enclosures.iter().map(|e| e.marble_count).collect();
    log::debug!("Marble counts {:?} ({} outside)", counts, outside);
    counts
}
