//! Physical parameters for the simulation
//!
//! `Parameters` holds the runtime-tunable globals:
//! - gravitational constant `grav_constant`,
//! - `speed_modifier`, a global scale on every integration step,
//! - `softening`, an extra minimum distance for gravity on top of the
//!   per-pair radius floor

use super::error::SimError;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub grav_constant: f64, // gravitational constant
    pub speed_modifier: f64, // scale applied to dt before integration
    pub softening: f64, // gravity distance floor
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            grav_constant: 1.0,
            speed_modifier: 1.0,
            softening: 0.0,
        }
    }
}

impl Parameters {
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.grav_constant.is_finite() {
            return Err(SimError::InvalidParameter { name: "grav_constant", value: self.grav_constant });
        }
        if !(self.speed_modifier.is_finite() && self.speed_modifier >= 0.0) {
            return Err(SimError::InvalidParameter { name: "speed_modifier", value: self.speed_modifier });
        }
        if !(self.softening.is_finite() && self.softening >= 0.0) {
            return Err(SimError::InvalidParameter { name: "softening", value: self.softening });
        }
        Ok(())
    }
}
