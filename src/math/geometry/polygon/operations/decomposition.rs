// src/math/geometry/polygon/operations/decomposition.rs

//! Konvexe Zerlegung einfacher Polygone (Bayazit).
//!
//! Ein reflexer Vertex wird entweder mit dem bestbewerteten sichtbaren Vertex
//! verbunden oder, wenn kein Kandidat dazwischen liegt, mit einem Steiner-Punkt
//! in der Mitte der beiden Verlängerungs-Schnittpunkte. Beide Teile werden
//! rekursiv weiter zerlegt, bis sie konvex sind und höchstens `max_vertices`
//! Vertices haben.

use crate::math::{
    error::{MathError, MathResult},
    geometry::polygon::{
        core::Polygon,
        properties::{Orientation, PolygonProperties},
    },
    types::Vertex,
    utils::{constants, simple_geometry},
};
use bevy::log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Konfiguration der konvexen Zerlegung.
///
/// `epsilon` ist absolut: Determinanten unterhalb davon gelten als parallel.
/// Der Standardwert setzt Koordinaten in Editor-Einheiten um 1 voraus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecomposerConfig {
    /// Maximale Vertex-Anzahl eines Teilstücks; größere konvexe Stücke werden halbiert.
    pub max_vertices: usize,
    /// Rekursionsbudget. Ist es erschöpft, wird das aktuelle Stück unverändert ausgegeben.
    pub max_depth: usize,
    /// Toleranz für parallele Geraden.
    pub epsilon: f64,
}

impl DecomposerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_vertices(mut self, max_vertices: usize) -> Self {
        self.max_vertices = max_vertices;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn validate(&self) -> MathResult<()> {
        if self.max_vertices < 3 {
            return Err(MathError::InvalidConfiguration {
                message: format!(
                    "max_vertices must be at least 3, got {}",
                    self.max_vertices
                ),
            });
        }

        if self.max_depth == 0 {
            return Err(MathError::InvalidConfiguration {
                message: "max_depth must be greater than 0".to_string(),
            });
        }

        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: format!("epsilon must be positive and finite, got {}", self.epsilon),
            });
        }

        Ok(())
    }
}

impl Default for DecomposerConfig {
    fn default() -> Self {
        Self {
            max_vertices: constants::DEFAULT_MAX_POLYGON_VERTICES,
            max_depth: constants::DEFAULT_MAX_DECOMPOSITION_DEPTH,
            epsilon: constants::EPSILON,
        }
    }
}

/// Ergebnis einer Zerlegung inklusive Diagnose.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecompositionReport {
    pub pieces: Vec<Polygon>,
    /// Mindestens ein Stück wurde wegen des Rekursionsbudgets unzerlegt ausgegeben.
    pub depth_exhausted: bool,
    /// Anzahl der Teilungen ohne Fortschritt, deren Ausgangsstück ausgegeben wurde.
    pub stalled_splits: usize,
    pub max_depth_reached: usize,
}

impl DecompositionReport {
    /// `true`, wenn nicht alle Stücke garantiert konvex sind.
    pub fn is_degraded(&self) -> bool {
        self.depth_exhausted || self.stalled_splits > 0
    }
}

/// Zerlegt einfache CCW-Polygone in konvexe Teilstücke.
#[derive(Debug, Clone, Default)]
pub struct ConvexDecomposer {
    config: DecomposerConfig,
}

impl ConvexDecomposer {
    pub fn new(config: DecomposerConfig) -> MathResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DecomposerConfig {
        &self.config
    }

    /// Konvexe Teilstücke, deren Vereinigung das Eingabepolygon ergibt.
    ///
    /// Erwartet mindestens 3 Vertices gegen den Uhrzeigersinn. Konvexe Eingaben
    /// mit höchstens `max_vertices` Vertices kommen unverändert als einziges Element zurück.
    pub fn convex_partition(&self, polygon: &Polygon) -> Vec<Polygon> {
        self.decompose(polygon).pieces
    }

    /// Wie [`Self::convex_partition`], liefert aber zusätzlich die Diagnose.
    pub fn decompose(&self, polygon: &Polygon) -> DecompositionReport {
        debug_assert!(
            polygon.len() >= 3,
            "convex decomposition needs at least 3 vertices, got {}",
            polygon.len()
        );
        debug_assert!(
            polygon.orientation() != Orientation::Clockwise,
            "convex decomposition expects a counter-clockwise polygon"
        );

        let mut report = DecompositionReport::default();
        if polygon.len() < 3 {
            return report;
        }

        self.decompose_piece(polygon.clone(), 0, &mut report);

        if report.is_degraded() {
            warn!(
                "ConvexDecomposer: degraded result for {} vertices: {} pieces, depth_exhausted={}, stalled_splits={}",
                polygon.len(),
                report.pieces.len(),
                report.depth_exhausted,
                report.stalled_splits
            );
        } else {
            debug!(
                "ConvexDecomposer: {} vertices -> {} convex pieces (max depth {})",
                polygon.len(),
                report.pieces.len(),
                report.max_depth_reached
            );
        }
        report
    }

    fn decompose_piece(&self, polygon: Polygon, depth: usize, report: &mut DecompositionReport) {
        report.max_depth_reached = report.max_depth_reached.max(depth);
        let n = polygon.len() as isize;

        let reflex = (0..n).find(|&i| is_reflex(&polygon, i));
        if reflex.is_none() && polygon.len() <= self.config.max_vertices {
            report.pieces.push(polygon);
            return;
        }

        if depth >= self.config.max_depth {
            warn!(
                "ConvexDecomposer: depth budget {} exhausted, emitting piece with {} vertices unsplit",
                self.config.max_depth,
                polygon.len()
            );
            report.depth_exhausted = true;
            report.pieces.push(polygon);
            return;
        }

        let split = match reflex {
            Some(i) => self.split_at_reflex(&polygon, i),
            // Konvex, aber zu groß: nach Index halbieren
            None => Some((
                copy_range(&polygon, 0, n / 2),
                copy_range(&polygon, n / 2, 0),
            )),
        };

        let Some((lower, upper)) = split.filter(|(lower, upper)| {
            makes_progress(&polygon, lower) && makes_progress(&polygon, upper)
        }) else {
            warn!(
                "ConvexDecomposer: split of piece with {} vertices made no progress, emitting it unsplit",
                polygon.len()
            );
            report.stalled_splits += 1;
            report.pieces.push(polygon);
            return;
        };

        self.decompose_piece(lower, depth + 1, report);
        self.decompose_piece(upper, depth + 1, report);
    }

    /// Teilt das Polygon am reflexen Vertex `i`.
    /// `None`, wenn weder Schnittpunkte noch ein sichtbarer Vertex gefunden werden.
    fn split_at_reflex(&self, polygon: &Polygon, i: isize) -> Option<(Polygon, Polygon)> {
        let n = polygon.len() as isize;
        let at = |k: isize| polygon.at(k);
        let eps = self.config.epsilon;

        let mut lower: Option<(isize, Vertex, f64)> = None;
        let mut upper: Option<(isize, Vertex, f64)> = None;

        for j in 0..n {
            // Verlängerung der eingehenden Kante trifft Kante (j-1, j)
            if simple_geometry::left(at(i - 1), at(i), at(j))
                && simple_geometry::right_on(at(i - 1), at(i), at(j - 1))
            {
                if let Some(p) =
                    simple_geometry::line_intersection(at(i - 1), at(i), at(j), at(j - 1), eps)
                {
                    if simple_geometry::right(at(i + 1), at(i), p) {
                        let d = at(i).distance_squared(p);
                        if lower.is_none_or(|(_, _, best)| d < best) {
                            lower = Some((j, p, d));
                        }
                    }
                }
            }

            // Verlängerung der ausgehenden Kante trifft Kante (j, j+1)
            if simple_geometry::left(at(i + 1), at(i), at(j + 1))
                && simple_geometry::right_on(at(i + 1), at(i), at(j))
            {
                if let Some(p) =
                    simple_geometry::line_intersection(at(i + 1), at(i), at(j), at(j + 1), eps)
                {
                    if simple_geometry::left(at(i - 1), at(i), p) {
                        let d = at(i).distance_squared(p);
                        if upper.is_none_or(|(_, _, best)| d < best) {
                            upper = Some((j, p, d));
                        }
                    }
                }
            }
        }

        let ((lower_index, lower_point, _), (upper_index, upper_point, _)) = lower.zip(upper)?;

        if lower_index == (upper_index + 1) % n {
            // Kein Vertex zwischen den Schnittpunkten: Steiner-Punkt einfügen
            let steiner = (lower_point + upper_point) * 0.5;
            let mut first = copy_range(polygon, i, upper_index);
            first.push_vertex(steiner);
            let mut second = copy_range(polygon, lower_index, i);
            second.push_vertex(steiner);
            return Some((first, second));
        }

        let mut upper_index = upper_index;
        while upper_index < lower_index {
            upper_index += n;
        }

        let mut best: Option<(isize, f64)> = None;
        for j in lower_index..=upper_index {
            if !self.can_see(polygon, i, j) {
                continue;
            }
            let mut score = 1.0 / (at(i).distance_squared(at(j)) + 1.0);
            if is_reflex(polygon, j) {
                if simple_geometry::right_on(at(j - 1), at(j), at(i))
                    && simple_geometry::left_on(at(j + 1), at(j), at(i))
                {
                    score += 3.0;
                } else {
                    score += 2.0;
                }
            } else {
                score += 1.0;
            }
            if best.is_none_or(|(_, highest)| score > highest) {
                best = Some((j, score));
            }
        }

        let (best_index, _) = best?;
        Some((
            copy_range(polygon, i, best_index),
            copy_range(polygon, best_index, i),
        ))
    }

    /// Prüft, ob die Diagonale i-j innerhalb des Polygons verläuft.
    fn can_see(&self, polygon: &Polygon, i: isize, j: isize) -> bool {
        let n = polygon.len() as isize;
        let at = |k: isize| polygon.at(k);
        let (i, j) = (i.rem_euclid(n), j.rem_euclid(n));

        if is_reflex(polygon, i) {
            if simple_geometry::left_on(at(i), at(i - 1), at(j))
                && simple_geometry::right_on(at(i), at(i + 1), at(j))
            {
                return false;
            }
        } else if simple_geometry::right_on(at(i), at(i + 1), at(j))
            || simple_geometry::left_on(at(i), at(i - 1), at(j))
        {
            return false;
        }

        if is_reflex(polygon, j) {
            if simple_geometry::left_on(at(j), at(j - 1), at(i))
                && simple_geometry::right_on(at(j), at(j + 1), at(i))
            {
                return false;
            }
        } else if simple_geometry::right_on(at(j), at(j + 1), at(i))
            || simple_geometry::left_on(at(j), at(j - 1), at(i))
        {
            return false;
        }

        for k in 0..n {
            let k_next = (k + 1) % n;
            if k == i || k == j || k_next == i || k_next == j {
                continue;
            }
            if simple_geometry::segment_intersection(
                at(i),
                at(j),
                at(k),
                at(k_next),
                self.config.epsilon,
            )
            .is_some()
            {
                return false;
            }
        }
        true
    }
}

/// Zerlegt ein Polygon mit der Standardkonfiguration.
pub fn convex_partition(polygon: &Polygon) -> Vec<Polygon> {
    ConvexDecomposer::default().convex_partition(polygon)
}

fn is_reflex(polygon: &Polygon, i: isize) -> bool {
    simple_geometry::right(polygon.at(i - 1), polygon.at(i), polygon.at(i + 1))
}

/// Kopiert die Vertices von `i` bis `j` (inklusive, zyklisch).
fn copy_range(polygon: &Polygon, i: isize, mut j: isize) -> Polygon {
    let n = polygon.len() as isize;
    while j < i {
        j += n;
    }
    Polygon::from_points_unchecked((i..=j).map(|k| polygon.at(k)).collect())
}

fn makes_progress(parent: &Polygon, piece: &Polygon) -> bool {
    piece.len() >= 3 && piece.len() <= parent.len() && piece.signed_area() > 0.0 && piece != parent
}
