// src/math/geometry/polygon/operations/mod.rs

pub mod boolean;
pub mod decomposition;
pub mod simplicial_chain;

pub use boolean::*;
pub use decomposition::*;
pub use simplicial_chain::Edge;
