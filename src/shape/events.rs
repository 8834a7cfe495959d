// src/shape/events.rs

use crate::math::geometry::polygon::{BooleanOperation, ClipError, Polygon};
use bevy::prelude::*;

/// Anfrage, aus einer oder mehreren Umrisslinien konvexe Pinsel-Stücke zu bauen.
#[derive(Event, Debug, Clone)]
pub struct BuildBrushShapeRequest {
    pub shape_id: u64,
    pub outlines: Vec<Polygon>,
    /// Verknüpft die Umrisse von links nach rechts; `None` behandelt jeden Umriss einzeln.
    pub combine: Option<BooleanOperation>,
}

#[derive(Event, Debug, Clone)]
pub struct ConvexShapeReady {
    pub shape_id: u64,
    pub pieces: Vec<Polygon>,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct ShapeBuildWarning {
    pub shape_id: u64,
    pub kind: ShapeWarningKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeWarningKind {
    ClipFailed(ClipError),
    DecompositionDegraded {
        depth_exhausted: bool,
        stalled_splits: usize,
    },
    InvalidOutline(String),
}
