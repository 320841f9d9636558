use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::particles::{sample_disc, Particle};
use crate::quadtree::{NodeId, Quad, QuadTree, Quadrant};
use crate::utils::SimError;

fn particle(x: f64, y: f64) -> Particle {
    Particle::at_rest(x, y)
}

#[test]
fn test_quad_center_and_side() {
    let quad = Quad { min: (-3.0, 1.0), max: (1.0, 5.0) };
    assert_eq!(quad.center(), (-1.0, 3.0));
    assert_eq!(quad.side(), 4.0);
}

#[test]
fn test_quad_contains_is_strict() {
    let quad = Quad::spanning(1.0);
    assert!(quad.contains(0.0, 0.0));
    assert!(!quad.contains(1.0, 0.0));
    assert!(!quad.contains(-1.0, 0.5));
    assert!(!quad.contains(0.0, -1.0));
    assert!(!quad.contains(0.0, 1.0));
}

#[test]
fn test_subdivide_tiles_parent() {
    let quad = Quad { min: (-2.0, -2.0), max: (2.0, 2.0) };
    let children = quad.subdivide();

    // union of areas equals the parent's area
    let area: f64 = children.iter().map(|c| c.side() * c.side()).sum();
    crate::assert_float_eq(area, quad.side() * quad.side(), 1e-12, None);

    // all four children meet at the parent's center
    let center = quad.center();
    assert_eq!(children[0].min, center);
    assert_eq!(children[1].max, (center.0, quad.max.1));
    assert_eq!(children[2].max, (quad.max.0, center.1));
    assert_eq!(children[3].max, center);

    // interiors are pairwise disjoint: each child's midpoint lies in
    // exactly one child
    for (i, child) in children.iter().enumerate() {
        let mid = child.center();
        let holders = children.iter().filter(|c| c.contains(mid.0, mid.1)).count();
        assert_eq!(holders, 1, "midpoint of child {} held by {} children", i, holders);
    }
}

#[test]
fn test_quadrant_selection_ties_go_south_west() {
    let center = (0.0, 0.0);
    assert_eq!(Quadrant::select(center, (1.0, 1.0)), Quadrant::Ne);
    assert_eq!(Quadrant::select(center, (1.0, -1.0)), Quadrant::Se);
    assert_eq!(Quadrant::select(center, (-1.0, 1.0)), Quadrant::Nw);
    assert_eq!(Quadrant::select(center, (-1.0, -1.0)), Quadrant::Sw);
    // exact ties are not "strictly greater"
    assert_eq!(Quadrant::select(center, (0.0, 0.0)), Quadrant::Sw);
    assert_eq!(Quadrant::select(center, (0.0, 1.0)), Quadrant::Nw);
    assert_eq!(Quadrant::select(center, (1.0, 0.0)), Quadrant::Se);
}

#[test]
fn test_single_particle_is_root_occupant() {
    let tree = QuadTree::build(&[particle(0.5, 0.5)], 1.0, 64).unwrap();
    let root = tree.root();
    assert_eq!(root.count, 1);
    assert_eq!(root.occupant, Some((0.5, 0.5)));
    assert!(!root.has_children());
    assert_eq!(root.centroid(), Some((0.5, 0.5)));
}

#[test]
fn test_subdivision_is_atomic() {
    let tree = QuadTree::build(&[particle(0.5, 0.5), particle(-0.5, -0.5)], 1.0, 64).unwrap();
    let root = tree.root();
    assert_eq!(root.count, 2);
    assert_eq!(root.occupant, None);
    assert!(root.has_children());
    // exactly the root plus its four children
    assert_eq!(tree.len(), 5);
}

#[test]
fn test_child_depths_increase_from_root() {
    let tree = QuadTree::build(&[particle(0.5, 0.5), particle(-0.5, -0.5)], 1.0, 64).unwrap();
    assert_eq!(tree.root().depth, 0);
    let children = tree.root().children.unwrap();
    for child in children {
        assert_eq!(tree.node(child).depth, 1);
    }
}

#[test]
fn test_out_of_domain_particles_are_skipped() {
    let particles = [particle(0.5, 0.5), particle(2.0, 0.0), particle(0.0, -3.0)];
    let tree = QuadTree::build(&particles, 1.0, 64).unwrap();
    assert_eq!(tree.root().count, 1);
    assert_eq!(tree.root().occupant, Some((0.5, 0.5)));
}

#[test]
fn test_boundary_particle_is_skipped() {
    let tree = QuadTree::build(&[particle(1.0, 0.0)], 1.0, 64).unwrap();
    assert_eq!(tree.root().count, 0);
}

#[test]
fn test_coincident_particles_hit_depth_limit() {
    let particles = [particle(0.25, 0.25), particle(0.25, 0.25)];
    let result = QuadTree::build(&particles, 1.0, 16);
    assert_eq!(result.err(), Some(SimError::DepthLimitExceeded(16)));
}

#[test]
fn test_rebuild_reuses_arena_and_discards_previous_tree() {
    let mut tree = QuadTree::new(64);
    assert!(tree.is_empty());

    tree.rebuild(&[particle(0.5, 0.5), particle(-0.5, -0.5)], 1.0).unwrap();
    assert_eq!(tree.len(), 5);

    tree.rebuild(&[particle(0.25, 0.25)], 1.0).unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.root().count, 1);
    assert_eq!(tree.root().occupant, Some((0.25, 0.25)));
}

fn subtree_positions(tree: &QuadTree, id: NodeId, out: &mut Vec<(f64, f64)>) {
    let node = tree.node(id);
    if let Some(p) = node.occupant {
        out.push(p);
    }
    if let Some(children) = node.children {
        for child in children {
            subtree_positions(tree, child, out);
        }
    }
}

#[test]
fn test_aggregate_consistency() {
    let mut rng = StdRng::seed_from_u64(1234);
    let particles = sample_disc(&mut rng, 300, 6.0);
    let tree = QuadTree::build(&particles, 7.0, 64).unwrap();

    let mut stack = vec![QuadTree::ROOT];
    while let Some(id) = stack.pop() {
        let node = tree.node(id);

        let mut contained = Vec::new();
        subtree_positions(&tree, id, &mut contained);
        assert_eq!(node.count, contained.len());

        if let Some((cx, cy)) = node.centroid() {
            let mean_x = contained.iter().map(|p| p.0).sum::<f64>() / contained.len() as f64;
            let mean_y = contained.iter().map(|p| p.1).sum::<f64>() / contained.len() as f64;
            crate::assert_float_eq(cx, mean_x, 1e-9, Some("centroid x drifted from the arithmetic mean"));
            crate::assert_float_eq(cy, mean_y, 1e-9, Some("centroid y drifted from the arithmetic mean"));
        }

        if let Some(children) = node.children {
            stack.extend(children);
        }
    }
}

#[test]
fn test_every_inserted_particle_is_reachable() {
    let mut rng = StdRng::seed_from_u64(77);
    let particles = sample_disc(&mut rng, 150, 4.0);
    let tree = QuadTree::build(&particles, 5.0, 64).unwrap();

    let mut reachable = Vec::new();
    subtree_positions(&tree, QuadTree::ROOT, &mut reachable);
    assert_eq!(reachable.len(), tree.root().count);

    for p in &particles {
        assert!(
            reachable.contains(&p.position),
            "particle at {:?} missing from the tree",
            p.position
        );
    }
}
