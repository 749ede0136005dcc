//! Sphere–sphere collision resolution
//!
//! A pair is resolved in two stages: positional de-penetration, which always
//! splits the overlap 50/50 regardless of mass, and a velocity response
//! chosen by the first body's `CollisionModel` and `restitution`.
//! "First" is the body with the lower registry index.

use super::error::SimError;
use super::states::{Body, CollisionModel, NVec3};

/// What happened to a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Spheres do not overlap
    Apart,
    /// Overlap removed, bodies were already moving apart along the normal
    Separating,
    /// Overlap removed and velocities updated
    Resolved,
}

/// Detect and resolve overlap between `b1` and `b2`
///
/// `indices` only labels the error for logging.
/// Fails with [`SimError::InvalidPair`] and leaves both bodies untouched when
/// either mass is non-positive or non-finite.
pub fn resolve_collision(b1: &mut Body, b2: &mut Body, indices: (usize, usize)) -> Result<Contact, SimError> {
    let r = b2.x - b1.x;
    let dist = r.norm();
    let reach = b1.radius + b2.radius;

    // NaN compares false against `reach`, so catch it first
    if !dist.is_finite() || dist >= reach {
        return Ok(Contact::Apart);
    }

    let (m1, m2) = (b1.m, b2.m);
    let total = m1 + m2;
    if !(m1.is_finite() && m2.is_finite() && m1 > 0.0 && m2 > 0.0 && total > 0.0) {
        return Err(SimError::InvalidPair { first: indices.0, second: indices.1 });
    }

    // Coincident centres: pick +x so the pair still separates
    let normal = if dist > 0.0 { r / dist } else { NVec3::x() };

    // Push apart along the normal, half each
    let overlap = reach - dist;
    b1.x -= 0.5 * overlap * normal;
    b2.x += 0.5 * overlap * normal;

    // Closing speed along the normal; <= 0 means already separating
    let rel = (b1.v - b2.v).dot(&normal);
    if rel <= 0.0 {
        return Ok(Contact::Separating);
    }

    let e = b1.restitution;
    let (v1, v2) = match b1.collision {
        CollisionModel::ElasticKe => elastic_ke(b1.v, b2.v, m1, m2, e, normal),
        CollisionModel::Impulse => impulse(b1.v, b2.v, m1, m2, e, rel, normal),
        CollisionModel::InelasticHack => inelastic_hack(b1.v, b2.v, m1, m2, e, rel, normal),
    };
    b1.v = v1;
    b2.v = v2;

    Ok(Contact::Resolved)
}

/// Split each velocity into normal and tangential parts and apply the 1-D
/// restitution formula to the normal parts only
fn elastic_ke(v1: NVec3, v2: NVec3, m1: f64, m2: f64, e: f64, n: NVec3) -> (NVec3, NVec3) {
    let total = m1 + m2;

    let v1n = v1.dot(&n) * n;
    let v2n = v2.dot(&n) * n;
    let v1t = v1 - v1n;
    let v2t = v2 - v2n;

    let new_v1n = v1n * ((m1 - e * m2) / total) + v2n * ((1.0 + e) * m2 / total);
    let new_v2n = v2n * ((m2 - e * m1) / total) + v1n * ((1.0 + e) * m1 / total);

    (v1t + new_v1n, v2t + new_v2n)
}

/// j = -(1 + e) * rel / (1/m1 + 1/m2)
fn impulse(v1: NVec3, v2: NVec3, m1: f64, m2: f64, e: f64, rel: f64, n: NVec3) -> (NVec3, NVec3) {
    let j = -(1.0 + e) * rel / (1.0 / m1 + 1.0 / m2);
    (v1 + (j / m1) * n, v2 - (j / m2) * n)
}

/// Fully inelastic merge on every axis, then a partial bounce along the
/// normal scaled by `e`
fn inelastic_hack(v1: NVec3, v2: NVec3, m1: f64, m2: f64, e: f64, rel: f64, n: NVec3) -> (NVec3, NVec3) {
    let merged = (m1 * v1 + m2 * v2) / (m1 + m2);
    let j = -e * rel / (1.0 / m1 + 1.0 / m2);
    (merged + (j / m1) * n, merged - (j / m2) * n)
}
