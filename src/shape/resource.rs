// src/shape/resource.rs

use crate::math::{
    error::MathResult,
    geometry::polygon::{ClipperConfig, DecomposerConfig},
};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Einstellungen für den Aufbau konvexer Pinsel-Formen.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeBrushSettings {
    pub decomposer: DecomposerConfig,
    pub clipper: ClipperConfig,
    /// Spiegelt alle Umrisse an der X-Achse (Bildschirm- vs. Weltkoordinaten).
    pub flip_vertical: bool,
}

impl ShapeBrushSettings {
    pub fn with_decomposer(mut self, decomposer: DecomposerConfig) -> Self {
        self.decomposer = decomposer;
        self
    }

    pub fn with_clipper(mut self, clipper: ClipperConfig) -> Self {
        self.clipper = clipper;
        self
    }

    pub fn with_flip_vertical(mut self, flip: bool) -> Self {
        self.flip_vertical = flip;
        self
    }

    pub fn validate(&self) -> MathResult<()> {
        self.decomposer.validate()?;
        self.clipper.validate()
    }
}
