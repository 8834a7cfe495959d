// src/math/geometry/polygon/mod.rs

// Deklaration der Untermodule für Polygon-spezifische Funktionalität
pub mod core; // Enthält die Polygon-Struktur selbst
pub mod interop; // Konvertierung von/nach geo
pub mod operations; // Konvexe Zerlegung und Boolean-Clipping
pub mod properties; // Enthält den PolygonProperties-Trait
pub mod validation; // Enthält den PolygonValidator und verwandte Typen

// Re-Exporte für den einfachen Zugriff auf die wichtigsten Polygon-Elemente
pub use self::core::Polygon;
pub use self::properties::{Orientation, PointLocation, PolygonProperties};
pub use self::validation::{
    PolygonValidator, QuickValidation, ValidationError, ValidationLevel, ValidationReport,
    ValidationWarning,
};

pub use self::operations::{
    boolean::{BooleanOperation, ClipError, ClipperConfig, PolygonBooleanClipper},
    decomposition::{ConvexDecomposer, DecomposerConfig, DecompositionReport, convex_partition},
    simplicial_chain::Edge,
};
