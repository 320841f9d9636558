mod tree;

pub use tree::*;

#[cfg(test)]
mod quadtree_tests;
