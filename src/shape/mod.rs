// src/shape/mod.rs

pub mod events;
pub mod pipeline;
pub mod plugin;
pub mod resource;

pub use events::{BuildBrushShapeRequest, ConvexShapeReady, ShapeBuildWarning, ShapeWarningKind};
pub use pipeline::{ShapeBuildOutcome, build_convex_pieces};
pub use plugin::{ShapeBrushPlugin, build_brush_shapes_system};
pub use resource::ShapeBrushSettings;
