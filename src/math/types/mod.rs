// src/math/types/mod.rs
pub mod bounds;

pub use bounds::*;

// Re-export häufig verwendete externe Typen
pub use bevy::math::DVec2;

/// Ein Polygon-Eckpunkt in doppelter Genauigkeit. Gleichheit ist Koordinatengleichheit.
pub type Vertex = DVec2;
