mod gravity;

pub use gravity::*;
