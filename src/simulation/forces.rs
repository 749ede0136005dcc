//! Pairwise gravity and the brute-force pair walk
//!
//! Gravity is evaluated one unordered pair at a time: each call adds an
//! equal-and-opposite contribution to both bodies' accumulated acceleration.
//! Whoever drives the pairs (brute force here, or the octree traversal) is
//! responsible for visiting every unordered pair exactly once per update

use super::states::Body;

/// Newtonian gravity with a distance floor
///
/// The separation used in the force law is never smaller than the sum of
/// the two radii (touching spheres) nor smaller than `softening`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonianGravity {
    pub grav_constant: f64, // gravitational constant
    pub softening: f64, // global minimum distance
}

impl NewtonianGravity {
    /// Add the accelerations `b1` and `b2` exert on each other
    pub fn accumulate_pair(&self, b1: &mut Body, b2: &mut Body) {
        // r points from body 1 to body 2; body 1 is pulled along +r,
        // body 2 along -r
        let r = b2.x - b1.x;
        let dist = r.norm();

        // Coincident centres have no direction to pull along, and a
        // non-finite separation would poison both bodies
        if dist == 0.0 || !dist.is_finite() || self.grav_constant == 0.0 {
            return;
        }
        let dir = r / dist;

        // Floored distance:
        // r_eff = max(|r|, r1 + r2, softening)
        let r_eff = dist.max(b1.radius + b2.radius).max(self.softening);

        // coef = G / r_eff^2
        let coef = self.grav_constant / (r_eff * r_eff);

        // a1 +=  G * m2 * d / r^2
        // a2 += -G * m1 * d / r^2
        b1.a += coef * b2.m * dir;
        b2.a -= coef * b1.m * dir;
    }

    /// Potential energy of one pair, using the same distance floor as the force
    pub fn pair_potential(&self, b1: &Body, b2: &Body) -> f64 {
        let dist = (b2.x - b1.x).norm();
        let r_eff = dist.max(b1.radius + b2.radius).max(self.softening);
        -self.grav_constant * b1.m * b2.m / r_eff
    }
}

/// Visit each unordered pair `(i, j)` with `i < j` in registry order
pub fn for_each_pair_brute<F>(n: usize, mut visit: F)
where
    F: FnMut(usize, usize),
{
    for i in 0..n {
        for j in (i + 1)..n {
            visit(i, j);
        }
    }
}

/// Borrow two distinct bodies mutably. Requires `i < j`
pub fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert!(i < j, "pair indices must be ordered");
    let (head, tail) = bodies.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}
