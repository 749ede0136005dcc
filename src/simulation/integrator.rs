//! Per-body time integrators
//!
//! Each body carries its own `IntegrationScheme`, so semi-implicit and
//! explicit Euler bodies can share one simulation. The step driver calls
//! [`integrate`] once per body after every pair has been accumulated

use super::states::{Body, IntegrationScheme};

/// Advance one body by `dt` according to its scheme
pub fn integrate(body: &mut Body, dt: f64) {
    match body.integration {
        IntegrationScheme::SemiImplicit => semi_implicit(body, dt),
        IntegrationScheme::Explicit => explicit(body, dt),
    }
}

/// Symplectic Euler: the position update sees the new velocity
///
/// v_n+1 = v_n + dt * a_n
/// x_n+1 = x_n + dt * v_n+1
pub fn semi_implicit(body: &mut Body, dt: f64) {
    body.v += dt * body.a;
    body.x += dt * body.v;
}

/// Forward Euler: the position update sees the old velocity
///
/// x_n+1 = x_n + dt * v_n
/// v_n+1 = v_n + dt * a_n
pub fn explicit(body: &mut Body, dt: f64) {
    body.x += dt * body.v;
    body.v += dt * body.a;
}
