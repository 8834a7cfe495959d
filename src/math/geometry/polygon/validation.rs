// src/math/geometry/polygon/validation.rs

use crate::math::geometry::polygon::{
    core::Polygon,
    properties::{Orientation, PolygonProperties},
};
use crate::math::types::Vertex;
use crate::math::utils::{constants, simple_geometry};

/// Verschiedene Validierungsebenen für Polygone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationLevel {
    Basic,    // Nur grundlegende Checks (Punkt-Anzahl, endliche Koordinaten).
    Standard, // Zusätzlich Selbstüberschneidungen und degenerierte Kanten.
}

/// Ergebnis einer Polygon-Validierung.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    fn new() -> Self {
        Self {
            is_valid: true, // Annahme: gültig, bis Fehler gefunden werden
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn add_error(&mut self, error: ValidationError) {
        self.is_valid = false;
        self.errors.push(error);
    }

    fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// Mögliche Fehler, die ein Polygon ungültig machen.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    InsufficientVertices {
        count: usize,
        minimum: usize,
    },
    NonFiniteVertex {
        vertex_index: usize,
        vertex: Vertex,
    },
    DegenerateEdge {
        vertex_index1: usize,
        vertex_index2: usize,
        length: f64,
    },
    SelfIntersection {
        edge1_indices: (usize, usize),
        edge2_indices: (usize, usize),
        intersection_point: Vertex,
    },
}

/// Warnungen bezüglich potenzieller Probleme, die das Polygon nicht ungültig machen.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationWarning {
    SmallArea { area: f64 },
    ClockwiseOrientation, // Wenn CCW erwartet wird
}

/// Validator für Polygone.
pub struct PolygonValidator {
    level: ValidationLevel,
    tolerance: f64,
}

impl PolygonValidator {
    pub fn new(level: ValidationLevel) -> Self {
        Self {
            level,
            tolerance: constants::EPSILON,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn validate(&self, polygon: &Polygon) -> ValidationReport {
        let mut report = ValidationReport::new();

        // --- Basic Validation ---
        self.validate_vertex_count(polygon, &mut report);
        self.validate_vertex_values(polygon, &mut report);

        if !report.is_valid || self.level == ValidationLevel::Basic {
            return report;
        }

        // --- Standard Validation (benötigt gültige Basis) ---
        self.validate_edge_lengths(polygon, &mut report);
        self.validate_self_intersections(polygon, &mut report);

        if report.is_valid {
            let area = polygon.area();
            if area < self.tolerance {
                report.add_warning(ValidationWarning::SmallArea { area });
            }
            if polygon.orientation() == Orientation::Clockwise {
                report.add_warning(ValidationWarning::ClockwiseOrientation);
            }
        }

        report
    }

    fn validate_vertex_count(&self, polygon: &Polygon, report: &mut ValidationReport) {
        if polygon.len() < 3 {
            report.add_error(ValidationError::InsufficientVertices {
                count: polygon.len(),
                minimum: 3,
            });
        }
    }

    fn validate_vertex_values(&self, polygon: &Polygon, report: &mut ValidationReport) {
        for (i, &vertex) in polygon.vertices().iter().enumerate() {
            if !vertex.x.is_finite() || !vertex.y.is_finite() {
                report.add_error(ValidationError::NonFiniteVertex {
                    vertex_index: i,
                    vertex,
                });
            }
        }
    }

    fn validate_edge_lengths(&self, polygon: &Polygon, report: &mut ValidationReport) {
        for i in 0..polygon.len() {
            let j = polygon.next_index(i);
            let length = polygon.vertices()[i].distance(polygon.vertices()[j]);
            if length * length <= self.tolerance {
                report.add_error(ValidationError::DegenerateEdge {
                    vertex_index1: i,
                    vertex_index2: j,
                    length,
                });
            }
        }
    }

    fn validate_self_intersections(&self, polygon: &Polygon, report: &mut ValidationReport) {
        let vertices = polygon.vertices();
        let n = vertices.len();

        for i in 0..n {
            let i_next = polygon.next_index(i);
            let (p1, p2) = (vertices[i], vertices[i_next]);

            // Benachbarte Kante: nur eine Rückwärtsspitze (Überlappung) ist ein Fehler
            let after = vertices[polygon.next_index(i_next)];
            if n > 3
                && simple_geometry::point_on_segment(p1, p2, after, self.tolerance)
                && after.distance_squared(p2) > self.tolerance
            {
                report.add_error(ValidationError::SelfIntersection {
                    edge1_indices: (i, i_next),
                    edge2_indices: (i_next, polygon.next_index(i_next)),
                    intersection_point: after,
                });
                return;
            }

            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue; // Schließende Kante ist zu Kante 0 benachbart
                }
                let j_next = polygon.next_index(j);
                let (p3, p4) = (vertices[j], vertices[j_next]);

                if let Some(point) = self.edge_contact(p1, p2, p3, p4) {
                    report.add_error(ValidationError::SelfIntersection {
                        edge1_indices: (i, i_next),
                        edge2_indices: (j, j_next),
                        intersection_point: point,
                    });
                    // Ein Fehler reicht
                    return;
                }
            }
        }
    }

    /// Berührung oder Schnitt zweier nicht benachbarter Kanten.
    fn edge_contact(&self, p1: Vertex, p2: Vertex, p3: Vertex, p4: Vertex) -> Option<Vertex> {
        if let Some(point) = simple_geometry::segment_intersection(p1, p2, p3, p4, self.tolerance)
        {
            return Some(point);
        }
        // Parallele Überlappung oder Berührung in einem Endpunkt
        [(p1, p2, p3), (p1, p2, p4), (p3, p4, p1), (p3, p4, p2)]
            .into_iter()
            .find(|&(start, end, point)| {
                simple_geometry::point_on_segment(start, end, point, self.tolerance)
            })
            .map(|(_, _, point)| point)
    }
}

/// Schnellvalidierungsfunktionen.
pub struct QuickValidation;

impl QuickValidation {
    pub fn is_valid_basic(polygon: &Polygon) -> bool {
        PolygonValidator::new(ValidationLevel::Basic)
            .validate(polygon)
            .is_valid
    }

    pub fn has_self_intersections(polygon: &Polygon) -> bool {
        let report = PolygonValidator::new(ValidationLevel::Standard).validate(polygon);
        report
            .errors
            .iter()
            .any(|e| matches!(e, ValidationError::SelfIntersection { .. }))
    }

    pub fn get_validation_report(polygon: &Polygon, level: ValidationLevel) -> ValidationReport {
        PolygonValidator::new(level).validate(polygon)
    }
}

impl Polygon {
    /// Einfaches Polygon: mindestens 3 endliche Vertices, keine Kanten der Länge null
    /// und keine Selbstüberschneidung oder -berührung.
    pub fn is_simple(&self) -> bool {
        PolygonValidator::new(ValidationLevel::Standard)
            .validate(self)
            .is_valid
    }
}
