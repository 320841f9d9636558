use log::debug;

use crate::particles::Particle;
use crate::utils::SimError;

/// Index of a node inside a [`QuadTree`] arena.
pub type NodeId = usize;

/// Axis-aligned square region given by its lower-left and upper-right
/// corners.
///
/// # Examples
///
/// ```
/// use quadgrav::quadtree::Quad;
///
/// let quad = Quad { min: (-1.0, -1.0), max: (1.0, 1.0) };
/// assert_eq!(quad.center(), (0.0, 0.0));
/// assert_eq!(quad.side(), 2.0);
/// assert!(quad.contains(0.5, 0.5));
/// assert!(!quad.contains(1.0, 0.5)); // the boundary is excluded
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    pub min: (f64, f64),
    pub max: (f64, f64),
}

impl Quad {
    /// Builds the square `[-radius, radius] x [-radius, radius]` centered on
    /// the origin.
    pub fn spanning(radius: f64) -> Self {
        Self {
            min: (-radius, -radius),
            max: (radius, radius),
        }
    }

    /// Midpoint of the square.
    pub fn center(&self) -> (f64, f64) {
        ((self.min.0 + self.max.0) / 2.0, (self.min.1 + self.max.1) / 2.0)
    }

    /// Side length of the square.
    pub fn side(&self) -> f64 {
        (self.max.0 - self.min.0).abs()
    }

    /// Returns true if the point lies strictly inside the square on all
    /// four sides.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x > self.min.0 && x < self.max.0 && y > self.min.1 && y < self.max.1
    }

    /// Splits the square at its center into four child squares in NE, NW,
    /// SE, SW order. The children tile this square exactly and share its
    /// center as a common corner.
    pub fn subdivide(&self) -> [Quad; 4] {
        let (cx, cy) = self.center();
        [
            Quad { min: (cx, cy), max: self.max },
            Quad { min: (self.min.0, cy), max: (cx, self.max.1) },
            Quad { min: (cx, self.min.1), max: (self.max.0, cy) },
            Quad { min: self.min, max: (cx, cy) },
        ]
    }
}

/// The four quadrants of a subdivided node, in child-array order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quadrant {
    Ne = 0,
    Nw = 1,
    Se = 2,
    Sw = 3,
}

impl Quadrant {
    /// Selects the quadrant for a point relative to a node center: strictly
    /// greater x goes east, strictly greater y goes north. Ties go west and
    /// south.
    pub fn select(center: (f64, f64), point: (f64, f64)) -> Self {
        match (point.0 > center.0, point.1 > center.1) {
            (true, true) => Quadrant::Ne,
            (true, false) => Quadrant::Se,
            (false, true) => Quadrant::Nw,
            (false, false) => Quadrant::Sw,
        }
    }
}

/// One square of space together with the aggregate statistics of every
/// particle in its subtree.
///
/// Because all particles share one mass, the center of mass reduces from the
/// weighted form `(m1*x1 + ... + mi*xi) / (m1 + ... + mi)` to the arithmetic
/// mean `(x1 + ... + xi) / i`, so plain coordinate sums are enough. The sums
/// must become weighted again if per-particle masses are ever introduced.
#[derive(Clone, Debug)]
pub struct SpatialNode {
    /// The square region this node covers.
    pub bounds: Quad,
    /// Recursion depth from the root (root = 0). Diagnostic and
    /// visualization aid only; the algorithm never reads it.
    pub depth: usize,
    /// Midpoint of `bounds`, computed once at creation.
    pub center: (f64, f64),
    /// Number of particles anywhere in this node's subtree.
    pub count: usize,
    /// Sum of contained particles' x coordinates.
    pub sum_x: f64,
    /// Sum of contained particles' y coordinates.
    pub sum_y: f64,
    /// The directly held particle position, present only on a leaf holding
    /// exactly one particle.
    pub occupant: Option<(f64, f64)>,
    /// Child node indices in NE, NW, SE, SW order; all four exist or none.
    pub children: Option<[NodeId; 4]>,
}

impl SpatialNode {
    /// Creates a node over `bounds` with zeroed aggregates, no occupant and
    /// no children.
    pub fn new(bounds: Quad, depth: usize) -> Self {
        Self {
            bounds,
            depth,
            center: bounds.center(),
            count: 0,
            sum_x: 0.0,
            sum_y: 0.0,
            occupant: None,
            children: None,
        }
    }

    /// Whether this node has subdivided into four quadrants.
    pub fn has_children(&self) -> bool {
        self.children.is_some()
    }

    /// Arithmetic-mean centroid of the contained particles, or `None` for
    /// an empty node.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.count == 0 {
            None
        } else {
            Some((self.sum_x / self.count as f64, self.sum_y / self.count as f64))
        }
    }
}

/// Arena-backed Barnes-Hut quadtree, rebuilt from scratch every step.
///
/// Nodes live in a flat `Vec` and refer to their children by index, so walks
/// never chase owning pointers and the backing storage survives from one
/// rebuild to the next: [`rebuild`](QuadTree::rebuild) clears the vec
/// without releasing its capacity.
///
/// # Examples
///
/// ```
/// use quadgrav::particles::Particle;
/// use quadgrav::quadtree::QuadTree;
///
/// let particles = vec![Particle::at_rest(0.5, 0.5), Particle::at_rest(-0.5, -0.25)];
/// let tree = QuadTree::build(&particles, 1.0, 64).expect("tree build failed");
/// assert_eq!(tree.root().count, 2);
/// assert!(tree.root().has_children());
/// ```
#[derive(Debug)]
pub struct QuadTree {
    nodes: Vec<SpatialNode>,
    max_depth: usize,
}

impl QuadTree {
    /// Index of the root node of any non-empty tree.
    pub const ROOT: NodeId = 0;

    /// Creates an empty arena. No nodes exist until the first call to
    /// [`rebuild`](QuadTree::rebuild).
    pub fn new(max_depth: usize) -> Self {
        Self {
            nodes: Vec::new(),
            max_depth,
        }
    }

    /// Builds a tree over `[-domain_radius, domain_radius]^2` in one call.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DepthLimitExceeded`] when two particles with
    /// identical coordinates force subdivision past `max_depth`.
    pub fn build(particles: &[Particle], domain_radius: f64, max_depth: usize) -> Result<Self, SimError> {
        let mut tree = Self::new(max_depth);
        tree.rebuild(particles, domain_radius)?;
        Ok(tree)
    }

    /// Discards the previous tree and reinserts every particle that lies
    /// strictly inside the domain square.
    ///
    /// Particles on or outside the domain boundary are skipped, not
    /// reported: they are simply absent from force calculations until a
    /// later rebuild finds them back inside.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DepthLimitExceeded`] when coincident particles
    /// force subdivision past `max_depth`.
    pub fn rebuild(&mut self, particles: &[Particle], domain_radius: f64) -> Result<(), SimError> {
        self.nodes.clear();
        self.nodes.push(SpatialNode::new(Quad::spanning(domain_radius), 0));

        let mut skipped = 0usize;
        for p in particles {
            let (x, y) = p.position;
            if self.nodes[Self::ROOT].bounds.contains(x, y) {
                self.insert(Self::ROOT, (x, y))?;
            } else {
                skipped += 1;
            }
        }
        if skipped > 0 {
            debug!("left {} particle(s) outside the domain out of the tree", skipped);
        }
        Ok(())
    }

    /// Root node of the most recent rebuild. Empty regions report a zero
    /// `count`, so callers need no special casing for particle-free trees.
    pub fn root(&self) -> &SpatialNode {
        &self.nodes[Self::ROOT]
    }

    /// Immutable access to a node by index. Indices come from a node's
    /// `children` array and stay valid until the next rebuild.
    pub fn node(&self, id: NodeId) -> &SpatialNode {
        &self.nodes[id]
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True until the first rebuild allocates a root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn insert(&mut self, id: NodeId, position: (f64, f64)) -> Result<(), SimError> {
        match self.nodes[id].occupant {
            None => {
                // Aggregates grow on the way down, before this node decides
                // whether to hold the particle itself or hand it to a child.
                let node = &mut self.nodes[id];
                node.count += 1;
                node.sum_x += position.0;
                node.sum_y += position.1;

                match node.children {
                    None => {
                        node.occupant = Some(position);
                        Ok(())
                    }
                    Some(children) => {
                        let quadrant = Quadrant::select(node.center, position);
                        self.insert(children[quadrant as usize], position)
                    }
                }
            }
            Some(previous) => {
                // Two particles at identical coordinates route into the same
                // quadrant at every level; cut the recursion off instead of
                // overflowing the stack.
                if self.nodes[id].depth >= self.max_depth {
                    return Err(SimError::DepthLimitExceeded(self.max_depth));
                }
                self.subdivide(id);
                self.insert(id, previous)?;
                self.insert(id, position)
            }
        }
    }

    /// Atomically splits a single-occupant leaf: the aggregates reset to
    /// zero, all four children are created together, and the occupant is
    /// cleared. The caller re-inserts the evicted occupant through
    /// `insert`, which restores the aggregates.
    fn subdivide(&mut self, id: NodeId) {
        let quads = self.nodes[id].bounds.subdivide();
        let child_depth = self.nodes[id].depth + 1;
        let first = self.nodes.len();
        for quad in quads {
            self.nodes.push(SpatialNode::new(quad, child_depth));
        }

        let node = &mut self.nodes[id];
        node.occupant = None;
        node.count = 0;
        node.sum_x = 0.0;
        node.sum_y = 0.0;
        node.children = Some([first, first + 1, first + 2, first + 3]);
    }
}
