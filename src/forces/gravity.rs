use crate::quadtree::{NodeId, QuadTree};
use crate::utils::SimConfig;

/// Net approximate gravitational force on a body at `position` from every
/// particle in the tree.
///
/// The walk treats each node as one of three cases: an empty region
/// contributes nothing, a single particle is evaluated exactly, and a
/// populated region either descends into its quadrants or collapses into a
/// single point mass at its centroid, depending on the acceptance test. The
/// walk recurses while `side / distance` exceeds `config.theta`, so a theta
/// of `0.0` forces full descent (exact pairwise evaluation) and large
/// values approximate aggressively. A body exactly at a centroid receives
/// zero force from that node rather than a division by zero.
///
/// # Examples
///
/// ```
/// use quadgrav::forces::net_force;
/// use quadgrav::particles::Particle;
/// use quadgrav::quadtree::QuadTree;
/// use quadgrav::utils::SimConfig;
///
/// let config = SimConfig {
///     gravitational_constant: 1.0,
///     unit_mass: 1.0,
///     distance_scale: 1.0,
///     theta: 0.0,
///     ..SimConfig::default()
/// };
/// let pair = [Particle::at_rest(1.0, 0.0), Particle::at_rest(-1.0, 0.0)];
/// let tree = QuadTree::build(&pair, 7.0, config.max_depth).expect("tree build failed");
///
/// let (fx, fy) = net_force(&tree, (0.0, 1.0), &config);
/// assert!(fx.abs() < 1e-12); // the symmetric pair cancels in x
/// assert!(fy < 0.0);         // and pulls the probe down
/// ```
pub fn net_force(tree: &QuadTree, position: (f64, f64), config: &SimConfig) -> (f64, f64) {
    if tree.is_empty() {
        return (0.0, 0.0);
    }
    node_force(tree, QuadTree::ROOT, position, config)
}

fn node_force(tree: &QuadTree, id: NodeId, position: (f64, f64), config: &SimConfig) -> (f64, f64) {
    let node = tree.node(id);

    let centroid = match node.centroid() {
        Some(c) => c,
        None => return (0.0, 0.0),
    };
    if node.count == 1 {
        return monopole_force(node.count, centroid, position, config);
    }

    let dist = distance(centroid, position);
    if dist == 0.0 {
        return (0.0, 0.0);
    }

    if node.bounds.side() / dist > config.theta {
        match node.children {
            Some(children) => {
                let mut fx = 0.0;
                let mut fy = 0.0;
                for child in children {
                    let (cfx, cfy) = node_force(tree, child, position, config);
                    fx += cfx;
                    fy += cfy;
                }
                (fx, fy)
            }
            // a populated node is either a leaf (count 1, handled above) or
            // subdivided, so this arm is unreachable after a rebuild
            None => monopole_force(node.count, centroid, position, config),
        }
    } else {
        monopole_force(node.count, centroid, position, config)
    }
}

/// One inverse-square evaluation against `count` unit masses collapsed at
/// `centroid`.
///
/// The magnitude is `G * (count * m) * m / (dist * distance_scale)^2` and
/// the direction is the angle from the body to the centroid. Zero
/// separation yields zero force.
pub fn monopole_force(
    count: usize,
    centroid: (f64, f64),
    position: (f64, f64),
    config: &SimConfig,
) -> (f64, f64) {
    let dist = distance(centroid, position);
    if dist == 0.0 {
        return (0.0, 0.0);
    }

    let alpha = (centroid.1 - position.1).atan2(centroid.0 - position.0);
    let scaled = dist * config.distance_scale;
    let magnitude = config.gravitational_constant
        * (count as f64 * config.unit_mass)
        * config.unit_mass
        / (scaled * scaled);

    (magnitude * alpha.cos(), magnitude * alpha.sin())
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}
