use crate::utils::errors::SimError;

/// Fixed per-run settings for a Barnes-Hut simulation.
///
/// The defaults describe a 10,000 particle disc inside a 7-unit domain, with
/// solar-mass particles, one light-year per distance unit, and a 100 second
/// time step. Every value is fixed for the lifetime of a run; there is no
/// runtime reconfiguration.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// Number of particles sampled at initialization.
    pub particle_count: usize,
    /// Half-width of the square tracking domain; the tree root spans
    /// `[-R, R] x [-R, R]`. Particles outside are left out of the tree.
    pub domain_radius: f64,
    /// Newton's gravitational constant, in SI units.
    pub gravitational_constant: f64,
    /// Mass shared by every particle, in kilograms.
    pub unit_mass: f64,
    /// Meters per distance unit; separations are scaled by this factor
    /// before the inverse-square law is applied.
    pub distance_scale: f64,
    /// Integration time step, in seconds.
    pub time_step: f64,
    /// Acceptance threshold for the multipole criterion. The tree walk
    /// recurses while `side / distance` exceeds this value, so `0.0` forces
    /// exact pairwise evaluation and large values approximate aggressively.
    pub theta: f64,
    /// Subdivision depth limit guarding against coincident particles.
    pub max_depth: usize,
}

pub const DEFAULT_SIM_CONFIG: SimConfig = SimConfig {
    particle_count: 10_000,
    domain_radius: 7.0,
    gravitational_constant: 6.67408e-11,
    unit_mass: 2.0e30,
    distance_scale: 9.461e15,
    time_step: 100.0,
    theta: 50.0,
    max_depth: 64,
};

impl Default for SimConfig {
    fn default() -> Self {
        DEFAULT_SIM_CONFIG
    }
}

impl SimConfig {
    /// Checks the configuration for values the simulation cannot run with.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero particle count, or a non-positive domain
    /// radius, time step, or particle mass.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.particle_count == 0 {
            return Err(SimError::InvalidParticleCount);
        }
        if self.domain_radius <= 0.0 {
            return Err(SimError::InvalidDomainRadius);
        }
        if self.time_step <= 0.0 {
            return Err(SimError::InvalidTimeStep);
        }
        if self.unit_mass <= 0.0 {
            return Err(SimError::InvalidMass);
        }
        Ok(())
    }
}
