use std::f64::consts::PI;

use rand::Rng;

/// A point mass tracked by the simulation.
///
/// Only position and velocity are stored. Mass is uniform across the whole
/// system and lives in [`SimConfig::unit_mass`](crate::utils::SimConfig),
/// which is what lets tree aggregates reduce to plain position sums.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Position represented as (x, y).
    pub position: (f64, f64),
    /// Velocity represented as (vx, vy).
    pub velocity: (f64, f64),
}

impl Particle {
    /// Creates a particle at rest at the given position.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadgrav::particles::Particle;
    ///
    /// let p = Particle::at_rest(1.5, -2.0);
    /// assert_eq!(p.position, (1.5, -2.0));
    /// assert_eq!(p.velocity, (0.0, 0.0));
    /// ```
    pub fn at_rest(x: f64, y: f64) -> Self {
        Self {
            position: (x, y),
            velocity: (0.0, 0.0),
        }
    }
}

/// Samples `count` particles at rest, uniformly within a ball of the given
/// radius projected onto the z = 0 plane.
///
/// The radial coordinate is cube-root scaled so the sample is uniform in the
/// ball before projection; both angles are uniformly distributed. The
/// projection concentrates particles toward the center of the disc.
///
/// # Examples
///
/// ```
/// use quadgrav::particles::sample_disc;
///
/// let mut rng = rand::rng();
/// let particles = sample_disc(&mut rng, 100, 7.0);
/// assert_eq!(particles.len(), 100);
/// assert!(particles.iter().all(|p| p.velocity == (0.0, 0.0)));
/// ```
pub fn sample_disc<R: Rng>(rng: &mut R, count: usize, radius: f64) -> Vec<Particle> {
    let mut particles = Vec::with_capacity(count);
    for _ in 0..count {
        let phi = 2.0 * PI * rng.random::<f64>();
        let theta = (2.0 * rng.random::<f64>() - 1.0).acos();
        let r = radius * rng.random::<f64>().cbrt();

        let x = r * theta.sin() * phi.cos();
        let y = r * theta.sin() * phi.sin();

        particles.push(Particle::at_rest(x, y));
    }
    particles
}
