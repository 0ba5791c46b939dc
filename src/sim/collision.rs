//! Contact classification between the avatar and world objects
//!
//! Gap columns use a per-column opening test against the fixed reference
//! column. Rectangular kinds use AABB tests, with platforms acting as
//! one-way surfaces: only a fall through the top edge counts as a landing,
//! side and bottom contact pass through.

use super::rect::Rect;
use super::state::{Avatar, ObjectKind, WorldObject};

/// Result of a contact check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// No interaction
    None,
    /// Landed on a surface whose top edge is at `top`
    Supported { top: f32 },
    /// Overlapping a climbable surface
    Climbable,
    /// Terminal contact
    Blocked,
}

impl Contact {
    pub fn is_blocking(&self) -> bool {
        matches!(self, Contact::Blocked)
    }
}

/// Opening test for a gap column
///
/// The column swept `[x, prev_x + width)` during its last advance. When
/// `reference_x` falls inside that band the avatar must lie within
/// `[top, bottom)` of the opening, however far the column moved.
pub fn gap_contact(reference_x: f32, avatar: &Rect, obstacle: &WorldObject) -> Contact {
    let Some((open_top, open_bottom)) = obstacle.opening() else {
        return Contact::None;
    };
    let in_band = obstacle.x <= reference_x && reference_x < obstacle.prev_trailing_edge();
    if !in_band {
        return Contact::None;
    }
    if avatar.top() < open_top || avatar.bottom() >= open_bottom {
        Contact::Blocked
    } else {
        Contact::None
    }
}

/// Landing test for a one-way platform
///
/// `prev_bottom` is the avatar's bottom edge before this tick's integration
/// and `vy` the velocity it moved with. A landing needs a non-upward
/// velocity, the bottom edge crossing the top surface from above, and
/// horizontal overlap.
pub fn platform_contact(prev_bottom: f32, vy: f32, avatar: &Rect, platform: &Rect) -> Contact {
    let top = platform.top();
    let falling = vy >= 0.0;
    let crossed_top = prev_bottom <= top && avatar.bottom() >= top;
    if falling && crossed_top && avatar.overlaps_horizontally(platform) {
        Contact::Supported { top }
    } else {
        Contact::None
    }
}

/// Avatar center inside the ladder
pub fn ladder_contact(avatar: &Rect, ladder: &Rect) -> Contact {
    if ladder.contains_point(avatar.center()) {
        Contact::Climbable
    } else {
        Contact::None
    }
}

/// Any overlap with a hazard is terminal
pub fn hazard_contact(avatar: &Rect, hazard: &Rect) -> Contact {
    if avatar.overlaps(hazard) {
        Contact::Blocked
    } else {
        Contact::None
    }
}

/// Classify the avatar against one world object
pub fn resolve(avatar: &Avatar, prev_bottom: f32, reference_x: f32, object: &WorldObject) -> Contact {
    let bounds = avatar.bounds();
    match (object.kind, object.bounds()) {
        (ObjectKind::Gap { .. }, _) => gap_contact(reference_x, &bounds, object),
        (ObjectKind::Platform { .. }, Some(rect)) => {
            platform_contact(prev_bottom, avatar.vel.y, &bounds, &rect)
        }
        (ObjectKind::Ladder { .. }, Some(rect)) => ladder_contact(&bounds, &rect),
        (ObjectKind::Hazard { .. }, Some(rect)) => hazard_contact(&bounds, &rect),
        _ => Contact::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn pipe(x: f32, center: f32) -> WorldObject {
        WorldObject::new(
            1,
            x,
            3.0,
            ObjectKind::Gap {
                center,
                half_gap: 4.0,
            },
        )
    }

    fn point(y: f32) -> Rect {
        Rect::new(16.0, y, 0.0, 0.0)
    }

    #[test]
    fn test_gap_blocks_above_opening() {
        // Opening is [6, 14)
        let obstacle = pipe(15.0, 10.0);
        assert_eq!(gap_contact(16.0, &point(5.0), &obstacle), Contact::Blocked);
    }

    #[test]
    fn test_gap_opening_is_half_open() {
        let obstacle = pipe(15.0, 10.0);
        assert_eq!(gap_contact(16.0, &point(6.0), &obstacle), Contact::None);
        assert_eq!(gap_contact(16.0, &point(13.9), &obstacle), Contact::None);
        assert_eq!(gap_contact(16.0, &point(14.0), &obstacle), Contact::Blocked);
    }

    #[test]
    fn test_gap_ignores_avatar_outside_band() {
        let obstacle = pipe(20.0, 10.0);
        assert_eq!(gap_contact(16.0, &point(0.0), &obstacle), Contact::None);
        // Trailing edge is exclusive
        let obstacle = pipe(13.0, 10.0);
        assert_eq!(gap_contact(16.0, &point(0.0), &obstacle), Contact::None);
    }

    #[test]
    fn test_gap_checks_band_swept_this_advance() {
        // Moves from [20, 23) to [8, 11), jumping over column 16
        let mut obstacle = pipe(20.0, 10.0);
        obstacle.advance(12.0);
        assert_eq!(gap_contact(16.0, &point(2.0), &obstacle), Contact::Blocked);
        assert_eq!(gap_contact(16.0, &point(10.0), &obstacle), Contact::None);

        // Next advance stays left of the column
        obstacle.advance(12.0);
        assert_eq!(gap_contact(16.0, &point(2.0), &obstacle), Contact::None);
    }

    #[test]
    fn test_platform_landing_from_above() {
        let platform = Rect::new(0.0, 100.0, 50.0, 10.0);
        let avatar = Rect::new(10.0, 70.0, 10.0, 32.0); // bottom 102
        assert_eq!(
            platform_contact(98.0, 4.0, &avatar, &platform),
            Contact::Supported { top: 100.0 }
        );
    }

    #[test]
    fn test_platform_pass_through_from_below() {
        let platform = Rect::new(0.0, 100.0, 50.0, 10.0);
        // Rising through the platform
        let avatar = Rect::new(10.0, 75.0, 10.0, 30.0); // bottom 105
        assert_eq!(platform_contact(112.0, -7.0, &avatar, &platform), Contact::None);
        // Falling but already below the top last tick
        assert_eq!(platform_contact(103.0, 2.0, &avatar, &platform), Contact::None);
    }

    #[test]
    fn test_platform_requires_horizontal_overlap() {
        let platform = Rect::new(0.0, 100.0, 50.0, 10.0);
        let avatar = Rect::new(50.0, 70.0, 10.0, 32.0);
        assert_eq!(platform_contact(98.0, 4.0, &avatar, &platform), Contact::None);
    }

    #[test]
    fn test_ladder_uses_avatar_center() {
        let ladder = Rect::new(80.0, 400.0, 20.0, 120.0);
        let on = Rect::new(76.0, 450.0, 28.0, 36.0); // center (90, 468)
        let off = Rect::new(40.0, 450.0, 28.0, 36.0); // center (54, 468), box still touches
        assert_eq!(ladder_contact(&on, &ladder), Contact::Climbable);
        assert_eq!(ladder_contact(&off, &ladder), Contact::None);
    }

    #[test]
    fn test_hazard_overlap_blocks() {
        let hazard = Rect::new(100.0, 100.0, 26.0, 26.0);
        assert!(hazard_contact(&Rect::new(110.0, 90.0, 28.0, 36.0), &hazard).is_blocking());
        assert!(!hazard_contact(&Rect::new(126.0, 90.0, 28.0, 36.0), &hazard).is_blocking());
    }

    #[test]
    fn test_resolve_dispatches_by_kind() {
        let avatar = Avatar {
            pos: Vec2::new(10.0, 70.0),
            vel: Vec2::new(0.0, 4.0),
            size: Vec2::new(10.0, 32.0),
            on_ground: false,
            on_climbable: false,
        };
        let platform = WorldObject::new(
            2,
            0.0,
            50.0,
            ObjectKind::Platform {
                top: 100.0,
                thickness: 10.0,
            },
        );
        assert_eq!(
            resolve(&avatar, 98.0, 16.0, &platform),
            Contact::Supported { top: 100.0 }
        );

        let hazard = WorldObject::new(3, 5.0, 10.0, ObjectKind::Hazard { top: 80.0, size: 10.0 });
        assert_eq!(resolve(&avatar, 98.0, 16.0, &hazard), Contact::Blocked);
    }
}
