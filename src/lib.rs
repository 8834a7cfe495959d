// src/lib.rs

//! Konvexe Zerlegung und Boolean-Clipping einfacher Polygone für Pinsel-Formen.
//!
//! `math` enthält die reinen Algorithmen, `shape` die Anbindung als Bevy-Plugin.

pub mod math;
pub mod shape;

pub use math::geometry::polygon::{
    BooleanOperation, ClipError, ClipperConfig, ConvexDecomposer, DecomposerConfig,
    DecompositionReport, Polygon, PolygonBooleanClipper, PolygonProperties, convex_partition,
};
pub use math::{MathError, MathResult, types::Bounds2D};
pub use shape::{
    BuildBrushShapeRequest, ConvexShapeReady, ShapeBrushPlugin, ShapeBrushSettings,
    ShapeBuildWarning, ShapeWarningKind,
};
