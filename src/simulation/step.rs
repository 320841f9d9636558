use log::trace;
use rayon::prelude::*;

use crate::forces::net_force;
use crate::particles::{sample_disc, Particle};
use crate::quadtree::QuadTree;
use crate::simulation::advance;
use crate::utils::{SimConfig, SimError};

/// A complete Barnes-Hut simulation: the particle set, the reusable tree
/// arena, and the run configuration.
///
/// Each call to [`step`](Simulation::step) rebuilds the tree from the
/// current positions, evaluates forces for every particle against that
/// frozen snapshot in parallel, and only then integrates, so no particle's
/// movement influences another's force within the same step. The driver is
/// external: call `step` on whatever cadence suits the display or batch
/// job; the simulation assumes nothing about timing.
///
/// # Examples
///
/// ```
/// use quadgrav::simulation::Simulation;
/// use quadgrav::utils::SimConfig;
///
/// let config = SimConfig { particle_count: 500, ..SimConfig::default() };
/// let mut sim = Simulation::new(config).expect("valid configuration");
/// sim.run(10).expect("simulation step failed");
/// assert_eq!(sim.particles().len(), 500);
/// ```
pub struct Simulation {
    particles: Vec<Particle>,
    tree: QuadTree,
    config: SimConfig,
}

impl Simulation {
    /// Creates a simulation with `config.particle_count` particles sampled
    /// at rest inside the domain.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let particles = sample_disc(&mut rand::rng(), config.particle_count, config.domain_radius);
        Ok(Self {
            particles,
            tree: QuadTree::new(config.max_depth),
            config,
        })
    }

    /// Creates a simulation over an externally prepared particle set.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn from_particles(particles: Vec<Particle>, config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            particles,
            tree: QuadTree::new(config.max_depth),
            config,
        })
    }

    /// One tick: rebuild the tree from current positions, evaluate all
    /// forces against the frozen snapshot, then integrate in place.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DepthLimitExceeded`] if the rebuild encounters
    /// coincident particles.
    pub fn step(&mut self) -> Result<(), SimError> {
        self.tree.rebuild(&self.particles, self.config.domain_radius)?;

        let config = self.config;
        let tree = &self.tree;
        let forces: Vec<(f64, f64)> = self
            .particles
            .par_iter()
            .map(|p| net_force(tree, p.position, &config))
            .collect();

        advance(&mut self.particles, &forces, &self.config);
        trace!(
            "stepped {} particles over {} tree nodes",
            self.particles.len(),
            self.tree.len()
        );
        Ok(())
    }

    /// Runs the simulation for a number of steps.
    ///
    /// # Errors
    ///
    /// Stops at the first failing step and returns its error.
    pub fn run(&mut self, steps: usize) -> Result<(), SimError> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    /// Current particle state, in insertion order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Updated positions for the rendering side, in particle order.
    pub fn positions(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.particles.iter().map(|p| p.position)
    }

    /// The tree snapshot from the most recent step, for boundary drawing.
    pub fn tree(&self) -> &QuadTree {
        &self.tree
    }

    /// The run configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}
