use std::fmt;
use std::error::Error;

/// Represents errors that can occur while configuring or running a simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Indicates a non-positive particle count.
    InvalidParticleCount,
    /// Indicates a non-positive domain radius.
    InvalidDomainRadius,
    /// Indicates a non-positive time step.
    InvalidTimeStep,
    /// Indicates a non-positive particle mass.
    InvalidMass,
    /// Indicates that tree insertion hit the subdivision depth limit, which
    /// happens when two particles occupy the exact same coordinates.
    DepthLimitExceeded(usize),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimError::InvalidParticleCount => write!(f, "Particle count must be positive"),
            SimError::InvalidDomainRadius => write!(f, "Domain radius must be positive"),
            SimError::InvalidTimeStep => write!(f, "Time step must be positive"),
            SimError::InvalidMass => write!(f, "Particle mass must be positive"),
            SimError::DepthLimitExceeded(limit) => write!(f, "Tree subdivision exceeded depth limit {}", limit),
        }
    }
}

impl Error for SimError {}
