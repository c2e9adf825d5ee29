//! Stroke validation
//!
//! A stroke becomes an enclosure when it has at least three points and its
//! closed polygon neither crosses nor nests with any existing enclosure.

use glam::Vec2;

use super::geometry::{polygon_area, polygon_perimeter, polygons_overlap};
use super::state::{Enclosure, Notice, Round, RoundPhase};
use crate::consts::OVERLAP_NOTICE;
use crate::error::EnclosureError;

/// Check a stroke against the round without modifying anything
///
/// An overlap reports the lowest-id enclosure the stroke collides with.
pub fn check_stroke(round: &Round, stroke: &[Vec2]) -> Result<(), EnclosureError> {
    if round.phase != RoundPhase::Drawing {
        return Err(EnclosureError::DrawingClosed);
    }

    let required = round.config.required_enclosures;
    if round.enclosures.len() as u32 >= required {
        return Err(EnclosureError::CapacityReached { required });
    }

    if stroke.len() <= 2 {
        return Err(EnclosureError::TooFewPoints { got: stroke.len() });
    }

    match round
        .enclosures
        .iter()
        .find(|e| polygons_overlap(stroke, &e.vertices))
    {
        Some(existing) => Err(EnclosureError::Overlaps {
            existing: existing.id,
        }),
        None => Ok(()),
    }
}

/// Validate a completed stroke and add it to the round
///
/// On an overlap the round gets a transient notice; every other rejection is
/// silent. A rejected stroke never changes the enclosure set.
pub fn add_enclosure<'a>(
    round: &'a mut Round,
    stroke: &[Vec2],
    now_ms: f64,
) -> Result<&'a Enclosure, EnclosureError> {
    if let Err(err) = check_stroke(round, stroke) {
        if err.is_user_facing() {
            log::warn!("Stroke rejected: {}", err);
            round.notice = Some(Notice {
                message: OVERLAP_NOTICE.to_string(),
                expires_at_ms: now_ms + round.settings.notice_duration_ms,
            });
        } else {
            log::debug!("Stroke ignored: {}", err);
        }
        return Err(err);
    }

    let id = round.next_enclosure_id();
    let enclosure = Enclosure {
        id,
        vertices: stroke.to_vec(),
        marble_count: 0,
        area: polygon_area(stroke),
        perimeter: polygon_perimeter(stroke),
        draw_time_ms: now_ms,
    };
    log::debug!(
        "Enclosure {} accepted: {} vertices, area {:.1}, perimeter {:.1}",
        id,
        enclosure.vertices.len(),
        enclosure.area,
        enclosure.perimeter
    );

    round.notice = None;
    round.enclosures.push(enclosure);
    Ok(&round.enclosures[round.enclosures.len() - 1])
}
