// src/math/geometry/polygon/operations/boolean.rs

use super::simplicial_chain::{Edge, SimplicialChain, select_result_edges};
use crate::math::{
    error::{MathError, MathResult},
    geometry::polygon::core::Polygon,
    types::Vertex,
    utils::{constants, simple_geometry},
};
use bevy::log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Boolean-Operationstypen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BooleanOperation {
    /// Union (A ∪ B)
    Union,
    /// Difference (A - B)
    Difference,
    /// Intersection (A ∩ B)
    Intersection,
}

/// Statuscode einer Clipping-Operation. Wird immer zusammen mit dem
/// (eventuell unvollständigen) Ergebnis geliefert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClipError {
    #[default]
    None,
    /// Mindestens ein Ergebnisring hat weniger als 3 Vertices.
    DegeneratedOutput,
    /// Eine Eingabe ist nicht einfach (Selbstüberschneidung, < 3 Vertices).
    NonSimpleInput,
    /// Die ausgewählten Kanten ließen sich nicht zu geschlossenen Ringen verbinden.
    BrokenResult,
}

impl ClipError {
    pub fn is_ok(&self) -> bool {
        *self == ClipError::None
    }
}

impl fmt::Display for ClipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ClipError::None => "no error",
            ClipError::DegeneratedOutput => "result contains a loop with fewer than 3 vertices",
            ClipError::NonSimpleInput => "input polygon is not simple",
            ClipError::BrokenResult => "result edges do not form closed loops",
        };
        f.write_str(message)
    }
}

/// Konfiguration des Boolean-Clippers.
///
/// Alle Toleranzen sind absolut und auf Editor-Einheiten um 1 abgestimmt.
/// Mit den Standardwerten fallen Vertices näher als etwa `3.5e-4` zusammen;
/// Umrisse mit kürzeren Kanten müssen vorher skaliert oder die Toleranzen
/// angepasst werden.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipperConfig {
    /// Toleranz der Determinante beim Segmentschnitt.
    pub epsilon: f64,
    /// Quadrierter Abstand, unter dem Vertices zusammenfallen.
    pub vertex_epsilon_sq: f64,
    /// Sinus-Toleranz für das Entfernen kollinearer Vertices im Ergebnis.
    pub collinear_tolerance: f64,
    /// Prüft beide Eingaben auf Einfachheit.
    pub validate_input: bool,
    /// Obergrenze für Schritte beim Zusammensetzen der Ringe.
    pub max_walk_steps: usize,
}

impl ClipperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_vertex_epsilon_sq(mut self, vertex_epsilon_sq: f64) -> Self {
        self.vertex_epsilon_sq = vertex_epsilon_sq;
        self
    }

    pub fn with_collinear_tolerance(mut self, tolerance: f64) -> Self {
        self.collinear_tolerance = tolerance;
        self
    }

    pub fn with_input_validation(mut self, validate: bool) -> Self {
        self.validate_input = validate;
        self
    }

    pub fn with_max_walk_steps(mut self, steps: usize) -> Self {
        self.max_walk_steps = steps;
        self
    }

    pub fn validate(&self) -> MathResult<()> {
        for (name, value) in [
            ("epsilon", self.epsilon),
            ("vertex_epsilon_sq", self.vertex_epsilon_sq),
            ("collinear_tolerance", self.collinear_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MathError::InvalidConfiguration {
                    message: format!("{name} must be finite and non-negative, got {value}"),
                });
            }
        }

        if self.max_walk_steps == 0 {
            return Err(MathError::InvalidConfiguration {
                message: "max_walk_steps must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for ClipperConfig {
    fn default() -> Self {
        Self {
            epsilon: constants::EPSILON,
            vertex_epsilon_sq: constants::VERTEX_EPSILON_SQUARED,
            collinear_tolerance: constants::COLLINEAR_TOLERANCE,
            validate_input: true,
            max_walk_steps: constants::DEFAULT_MAX_WALK_STEPS,
        }
    }
}

/// Boolean-Engine für einfache Polygone (simpliziale Ketten).
///
/// Ergebnisringe folgen der Kettenrichtung: Außenränder laufen gegen den
/// Uhrzeigersinn, Löcher (z. B. bei A - B mit B vollständig in A) im Uhrzeigersinn.
#[derive(Debug, Clone, Default)]
pub struct PolygonBooleanClipper {
    config: ClipperConfig,
}

impl PolygonBooleanClipper {
    pub fn new(config: ClipperConfig) -> MathResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ClipperConfig {
        &self.config
    }

    pub fn union(&self, subject: &Polygon, clip: &Polygon) -> (Vec<Polygon>, ClipError) {
        self.execute(subject, clip, BooleanOperation::Union)
    }

    pub fn difference(&self, subject: &Polygon, clip: &Polygon) -> (Vec<Polygon>, ClipError) {
        self.execute(subject, clip, BooleanOperation::Difference)
    }

    pub fn intersect(&self, subject: &Polygon, clip: &Polygon) -> (Vec<Polygon>, ClipError) {
        self.execute(subject, clip, BooleanOperation::Intersection)
    }

    /// Führt eine Boolean-Operation durch.
    pub fn execute(
        &self,
        subject: &Polygon,
        clip: &Polygon,
        operation: BooleanOperation,
    ) -> (Vec<Polygon>, ClipError) {
        let inputs_usable = subject.len() >= 3 && clip.len() >= 3;
        if !inputs_usable
            || (self.config.validate_input && (!subject.is_simple() || !clip.is_simple()))
        {
            warn!(
                "PolygonBooleanClipper: {:?} rejected non-simple input ({} / {} vertices)",
                operation,
                subject.len(),
                clip.len()
            );
            return (Vec::new(), ClipError::NonSimpleInput);
        }

        let (Some(subject_bounds), Some(clip_bounds)) = (subject.bounds(), clip.bounds()) else {
            return (Vec::new(), ClipError::NonSimpleInput);
        };
        if operation == BooleanOperation::Intersection && !subject_bounds.intersects(&clip_bounds) {
            debug!("PolygonBooleanClipper: bounding boxes are disjoint, empty intersection");
            return (Vec::new(), ClipError::None);
        }

        // 1. Schnittpunkte in beide Ringe einfügen
        let (mut subject, mut clip) = self.insert_intersections(subject, clip);
        subject.remove_near_duplicates(self.config.vertex_epsilon_sq);
        clip.remove_near_duplicates(self.config.vertex_epsilon_sq);

        // 2. In den positiven Quadranten verschieben, damit der Ursprung außerhalb liegt
        let offset = Vertex::ONE - subject_bounds.union(&clip_bounds).min;
        subject.translate(offset);
        clip.translate(offset);
        subject.force_counter_clockwise();
        clip.force_counter_clockwise();

        // 3. Ketten bilden und Ergebniskanten auswählen
        let subject_chain = SimplicialChain::from_polygon(&subject);
        let clip_chain = SimplicialChain::from_polygon(&clip);
        let edges = select_result_edges(
            &subject_chain,
            &clip_chain,
            operation,
            self.config.vertex_epsilon_sq,
            self.config.epsilon,
        );

        // 4. Ringe zusammensetzen und zurückverschieben
        let (loops, error) = self.build_loops(edges);
        let (result, error) = self.finish_loops(loops, error, offset);

        debug!(
            "PolygonBooleanClipper: {:?} of {} and {} vertices -> {} polygon(s), status {:?}",
            operation,
            subject.len(),
            clip.len(),
            result.len(),
            error
        );
        (result, error)
    }

    /// Verschiebt die Ringe zurück und entfernt kollineare Vertices.
    /// Ringe mit weniger als 3 Vertices bleiben erhalten und werden als
    /// `DegeneratedOutput` gemeldet.
    fn finish_loops(
        &self,
        loops: Vec<Polygon>,
        error: ClipError,
        offset: Vertex,
    ) -> (Vec<Polygon>, ClipError) {
        let result: Vec<Polygon> = loops
            .into_iter()
            .map(|mut polygon| {
                polygon.translate(-offset);
                polygon.collinear_simplified(self.config.collinear_tolerance)
            })
            .collect();

        if error.is_ok() && result.iter().any(|p| p.len() < 3) {
            return (result, ClipError::DegeneratedOutput);
        }
        (result, error)
    }

    /// Fügt alle Kantenschnittpunkte, die echt im Inneren einer Kante liegen,
    /// sortiert nach ihrer Position in die Ringe ein.
    fn insert_intersections(&self, subject: &Polygon, clip: &Polygon) -> (Polygon, Polygon) {
        let mut subject_hits: Vec<Vec<(f64, Vertex)>> = vec![Vec::new(); subject.len()];
        let mut clip_hits: Vec<Vec<(f64, Vertex)>> = vec![Vec::new(); clip.len()];

        for (i, (a0, a1)) in subject.edges().enumerate() {
            for (j, (b0, b1)) in clip.edges().enumerate() {
                let Some(point) =
                    simple_geometry::segment_intersection(a0, a1, b0, b1, self.config.epsilon)
                else {
                    continue;
                };

                let alpha = simple_geometry::squared_alpha(a0, a1, point);
                if alpha > 0.0 && alpha < 1.0 {
                    subject_hits[i].push((alpha, point));
                }
                let alpha = simple_geometry::squared_alpha(b0, b1, point);
                if alpha > 0.0 && alpha < 1.0 {
                    clip_hits[j].push((alpha, point));
                }
            }
        }

        (
            splice_hits(subject, subject_hits),
            splice_hits(clip, clip_hits),
        )
    }

    /// Verbindet die Ergebniskanten gierig zu geschlossenen Ringen.
    ///
    /// Bleiben Kanten übrig, die sich nicht anschließen lassen, wird
    /// `BrokenResult` gemeldet; bis dahin geschlossene Ringe bleiben erhalten.
    fn build_loops(&self, mut edges: Vec<Edge>) -> (Vec<Polygon>, ClipError) {
        let eps_sq = self.config.vertex_epsilon_sq;
        let mut loops = Vec::new();
        let mut steps = 0usize;

        while !edges.is_empty() {
            let first = edges.remove(0);
            let mut ring = vec![first.start, first.end];

            loop {
                steps += 1;
                if steps > self.config.max_walk_steps {
                    warn!(
                        "PolygonBooleanClipper: walk exceeded {} steps",
                        self.config.max_walk_steps
                    );
                    return (loops, ClipError::BrokenResult);
                }

                let Some(&tail) = ring.last() else {
                    break;
                };
                let forward = edges
                    .iter()
                    .position(|e| e.start.distance_squared(tail) <= eps_sq);
                let next = match forward {
                    Some(index) => edges.remove(index).end,
                    None => match edges
                        .iter()
                        .position(|e| e.end.distance_squared(tail) <= eps_sq)
                    {
                        Some(index) => edges.remove(index).start,
                        None => {
                            warn!(
                                "PolygonBooleanClipper: open chain with {} vertices, {} edges left",
                                ring.len(),
                                edges.len()
                            );
                            return (loops, ClipError::BrokenResult);
                        }
                    },
                };

                if next.distance_squared(ring[0]) <= eps_sq {
                    break;
                }
                ring.push(next);
            }

            loops.push(Polygon::from_points_unchecked(ring));
        }

        (loops, ClipError::None)
    }
}

fn splice_hits(polygon: &Polygon, hits: Vec<Vec<(f64, Vertex)>>) -> Polygon {
    let mut vertices = Vec::with_capacity(polygon.len() + hits.iter().map(Vec::len).sum::<usize>());
    for (&vertex, mut edge_hits) in polygon.vertices().iter().zip(hits) {
        vertices.push(vertex);
        edge_hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        vertices.extend(edge_hits.into_iter().map(|(_, point)| point));
    }
    Polygon::from_points_unchecked(vertices)
}
