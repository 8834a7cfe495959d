pub mod error;
pub mod geometry;
pub mod types;
pub mod utils;

// Re-exports für einfache Verwendung
pub use error::{MathError, MathResult};
pub use types::*;

// Öffentliche API
pub mod prelude {
    pub use super::{
        error::{MathError, MathResult},
        geometry::polygon::{
            BooleanOperation, ClipError, ClipperConfig, ConvexDecomposer, DecomposerConfig,
            DecompositionReport, Edge, Orientation, PointLocation, Polygon,
            PolygonBooleanClipper, PolygonProperties, convex_partition,
        },
        types::*,
    };
}
