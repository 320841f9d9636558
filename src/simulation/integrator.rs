use crate::particles::Particle;
use crate::utils::SimConfig;

/// Advances every particle by one time step under the given forces.
///
/// Velocity is updated first, `v += (F / m) * dt`, and the position update
/// uses that new velocity together with the constant-acceleration term:
/// `x += v * dt + (F / m) * dt^2 / 2` per axis. The scheme is explicit and
/// non-symplectic; it does not conserve energy exactly and drifts over long
/// runs, which is accepted behavior rather than a defect to correct here.
///
/// `forces` holds one `(fx, fy)` entry per particle, in particle order.
pub fn advance(particles: &mut [Particle], forces: &[(f64, f64)], config: &SimConfig) {
    debug_assert_eq!(particles.len(), forces.len());

    let dt = config.time_step;
    for (p, &(fx, fy)) in particles.iter_mut().zip(forces) {
        let ax = fx / config.unit_mass;
        let ay = fy / config.unit_mass;

        p.velocity.0 += ax * dt;
        p.velocity.1 += ay * dt;

        p.position.0 += p.velocity.0 * dt + 0.5 * ax * dt * dt;
        p.position.1 += p.velocity.1 * dt + 0.5 * ay * dt * dt;
    }
}
