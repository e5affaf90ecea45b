//! Collision tests for axis-aligned boxes
//!
//! Two queries drive the whole game: strict box overlap (goal check) and the
//! swept landing test that lets a falling player stand on a platform top.

use super::rect::Rect;

/// Strict AABB overlap. Boxes that only share an edge do not overlap.
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Strict overlap of the horizontal extents only
#[inline]
fn spans_overlap_x(a: &Rect, b: &Rect) -> bool {
    a.right() > b.left() && a.left() < b.right()
}

/// Check whether a falling player lands on a platform this step
///
/// `player` is the box *after* vertical integration. The bottom edge is swept
/// over `[bottom - velocity_y, bottom + velocity_y]`: the lower half covers the
/// distance travelled this step, the upper half looks one step ahead. The test
/// passes when that sweep contains the platform top, the player is moving
/// down, and the horizontal extents overlap.
///
/// Only one velocity sample is taken. A player whose bottom is already below
/// the platform top when it first overlaps the platform horizontally (running
/// into its side) will not land on it.
pub fn landing_test(player: &Rect, platform: &Rect, velocity_y: f32) -> bool {
    let bottom = player.bottom();
    let top = platform.top();

    velocity_y > 0.0
        && bottom + velocity_y >= top
        && bottom - velocity_y <= top
        && spans_overlap_x(player, platform)
}

/// Index of the first platform (in list order) the player lands on
pub fn first_landing<'a, I>(player: &Rect, platforms: I, velocity_y: f32) -> Option<usize>
where
    I: IntoIterator<Item = &'a Rect>,
{
    platforms
        .into_iter()
        .position(|platform| landing_test(player, platform, velocity_y))
}
