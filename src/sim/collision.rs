//! Collision detection between round bodies
//!
//! Every body collides as a circle of its bounding radius, whatever shape it
//! is drawn with. Entity counts stay in the tens, so a plain pairwise sweep
//! each tick is all the broad phase we need.

use glam::Vec2;

use super::body::Body;

/// Circle-circle overlap. Touching (distance == r1 + r2) counts as a hit.
#[inline]
pub fn circles_collide(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) <= a_radius + b_radius
}

/// A projectile/target overlap found during a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub shell: usize,
    pub target: usize,
}

/// Pairwise sweep of `shells` against `targets`
///
/// `is_live` filters shells that should be ignored (already dead this
/// tick). Hits are returned in shell-major order.
pub fn sweep<S: Body, T: Body>(
    shells: &[S],
    targets: &[T],
    is_live: impl Fn(&S) -> bool,
) -> Vec<Hit> {
    let mut hits = Vec::new();
    for (i, shell) in shells.iter().enumerate() {
        if !is_live(shell) {
            continue;
        }
        for (j, target) in targets.iter().enumerate() {
            if shell.collides_with(target) {
                hits.push(Hit {
                    shell: i,
                    target: j,
                });
            }
        }
    }
    hits
}

/// Distinct target indices hit, sorted ascending
///
/// A target struck by several shells in one tick appears once.
pub fn struck_targets(hits: &[Hit]) -> Vec<usize> {
    let mut struck: Vec<usize> = hits.iter().map(|h| h.target).collect();
    struck.sort_unstable();
    struck.dedup();
    struck
}
