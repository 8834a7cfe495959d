// src/math/geometry/polygon/operations/simplicial_chain.rs

//! Simpliziale Ketten für das Polygon-Clipping.
//!
//! Jede Kante (s, e) eines Rings bildet mit dem Ursprung das Dreieck (O, s, e)
//! und bekommt als Koeffizient das Vorzeichen seiner Fläche. Für einen Punkt
//! außerhalb aller Strahlen ergibt die Summe der Koeffizienten der Dreiecke, die
//! ihn enthalten, die Windungszahl. Liegt der Punkt auf einem Strahl O→s oder
//! O→e, zählt das Dreieck halb. Gerechnet wird in halben Einheiten als `i32`.

use super::boolean::BooleanOperation;
use crate::math::{
    geometry::polygon::{
        core::Polygon,
        properties::{PointLocation, PolygonProperties},
    },
    types::Vertex,
    utils::simple_geometry,
};

/// Eine volle Einheit der charakteristischen Funktion in halben Einheiten.
pub(crate) const FULL: i32 = 2;

/// Gerichtete Kante eines Rings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: Vertex,
    pub end: Vertex,
}

impl Edge {
    pub fn new(start: Vertex, end: Vertex) -> Self {
        Self { start, end }
    }

    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    pub fn center(&self) -> Vertex {
        (self.start + self.end) * 0.5
    }

    /// Gleiche Richtung und Endpunkte innerhalb von `epsilon_squared`.
    pub fn coincides(&self, other: &Edge, epsilon_squared: f64) -> bool {
        self.start.distance_squared(other.start) <= epsilon_squared
            && self.end.distance_squared(other.end) <= epsilon_squared
    }
}

/// Kantenliste eines Rings samt Simplex-Koeffizienten.
#[derive(Debug, Clone)]
pub(crate) struct SimplicialChain {
    edges: Vec<Edge>,
    coefficients: Vec<i32>,
}

impl SimplicialChain {
    pub(crate) fn from_polygon(polygon: &Polygon) -> Self {
        let edges: Vec<Edge> = polygon.edges().map(|(s, e)| Edge::new(s, e)).collect();
        let coefficients = edges
            .iter()
            .map(|edge| simplex_coefficient(Vertex::ZERO, edge.start, edge.end))
            .collect();
        Self {
            edges,
            coefficients,
        }
    }

    pub(crate) fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub(crate) fn contains(&self, edge: &Edge, epsilon_squared: f64) -> bool {
        self.edges.iter().any(|e| e.coincides(edge, epsilon_squared))
    }

    /// Summe der Beta-Beiträge aller Kanten in halben Einheiten.
    pub(crate) fn characteristic(&self, point: Vertex, tolerance: f64) -> i32 {
        self.edges
            .iter()
            .zip(&self.coefficients)
            .map(|(edge, &coefficient)| beta(point, edge, coefficient, tolerance))
            .sum()
    }
}

/// Vorzeichen der Dreiecksfläche (a, b, c): -1, 0 oder 1.
pub(crate) fn simplex_coefficient(a: Vertex, b: Vertex, c: Vertex) -> i32 {
    let area = simple_geometry::signed_area2(a, b, c);
    if area < 0.0 {
        -1
    } else if area > 0.0 {
        1
    } else {
        0
    }
}

/// Beitrag eines Simplex (O, start, end) am Punkt, in halben Einheiten.
pub(crate) fn beta(point: Vertex, edge: &Edge, coefficient: i32, tolerance: f64) -> i32 {
    let on_ray = simple_geometry::point_on_segment(Vertex::ZERO, edge.start, point, tolerance)
        || simple_geometry::point_on_segment(Vertex::ZERO, edge.end, point, tolerance);
    if on_ray {
        return coefficient;
    }

    let simplex = Polygon::from_points_unchecked(vec![Vertex::ZERO, edge.start, edge.end]);
    if simplex.point_location(point) == PointLocation::Inside {
        coefficient * FULL
    } else {
        0
    }
}

/// Wählt die Kanten beider Ketten aus, die den Rand des Ergebnisses bilden.
///
/// Gemeinsame Kanten werden nicht über die charakteristische Funktion bewertet:
/// gleichgerichtete bleiben bei Vereinigung und Schnitt einmal erhalten,
/// gegenläufige heben sich bei der Vereinigung auf.
pub(crate) fn select_result_edges(
    subject: &SimplicialChain,
    clip: &SimplicialChain,
    operation: BooleanOperation,
    epsilon_squared: f64,
    tolerance: f64,
) -> Vec<Edge> {
    let mut result: Vec<Edge> = Vec::new();

    for edge in subject.edges() {
        let shared_reversed = clip.contains(&edge.reversed(), epsilon_squared);
        let character = if clip.contains(edge, epsilon_squared) {
            FULL
        } else if shared_reversed && operation == BooleanOperation::Union {
            FULL
        } else if shared_reversed {
            0
        } else {
            clip.characteristic(edge.center(), tolerance)
        };

        let keep = match operation {
            BooleanOperation::Intersection => character == FULL,
            BooleanOperation::Union | BooleanOperation::Difference => character == 0,
        };
        if keep {
            result.push(*edge);
        }
    }

    for edge in clip.edges() {
        let already_selected = result.iter().any(|e| {
            e.coincides(edge, epsilon_squared) || e.coincides(&edge.reversed(), epsilon_squared)
        });
        if already_selected {
            continue;
        }

        let character = if subject.contains(&edge.reversed(), epsilon_squared)
            && operation == BooleanOperation::Union
        {
            FULL
        } else if subject.contains(edge, epsilon_squared)
            || subject.contains(&edge.reversed(), epsilon_squared)
        {
            0
        } else {
            subject.characteristic(edge.center(), tolerance)
        };

        match operation {
            BooleanOperation::Intersection if character == FULL => result.push(*edge),
            BooleanOperation::Difference if character == FULL => result.push(edge.reversed()),
            BooleanOperation::Union if character == 0 => result.push(*edge),
            _ => {}
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::utils::constants;

    fn square(min: (f64, f64), size: f64) -> Polygon {
        let (x, y) = min;
        Polygon::new(vec![
            Vertex::new(x, y),
            Vertex::new(x + size, y),
            Vertex::new(x + size, y + size),
            Vertex::new(x, y + size),
        ])
        .unwrap()
    }

    #[test]
    fn test_edge_helpers() {
        let edge = Edge::new(Vertex::new(1.0, 1.0), Vertex::new(3.0, 1.0));
        assert_eq!(edge.center(), Vertex::new(2.0, 1.0));
        assert_eq!(edge.reversed().start, edge.end);
        assert!(edge.coincides(&Edge::new(Vertex::new(1.0, 1.0 + 1e-6), edge.end), 1e-9));
        assert!(!edge.coincides(&edge.reversed(), 1e-9));
    }

    #[test]
    fn test_simplex_coefficient_signs() {
        let o = Vertex::ZERO;
        assert_eq!(simplex_coefficient(o, Vertex::new(1.0, 0.0), Vertex::new(0.0, 1.0)), 1);
        assert_eq!(simplex_coefficient(o, Vertex::new(0.0, 1.0), Vertex::new(1.0, 0.0)), -1);
        assert_eq!(simplex_coefficient(o, Vertex::new(1.0, 1.0), Vertex::new(2.0, 2.0)), 0);
    }

    #[test]
    fn test_beta_half_units() {
        let edge = Edge::new(Vertex::new(4.0, 0.0), Vertex::new(0.0, 4.0));
        // Im Inneren des Dreiecks (O, start, end)
        assert_eq!(beta(Vertex::new(1.0, 1.0), &edge, 1, constants::EPSILON), FULL);
        // Auf dem Strahl O→start
        assert_eq!(beta(Vertex::new(2.0, 0.0), &edge, 1, constants::EPSILON), 1);
        // Außerhalb
        assert_eq!(beta(Vertex::new(3.0, 3.0), &edge, 1, constants::EPSILON), 0);
    }

    #[test]
    fn test_characteristic_is_winding_number() {
        let chain = SimplicialChain::from_polygon(&square((1.0, 1.0), 2.0));
        assert_eq!(chain.characteristic(Vertex::new(2.0, 1.5), constants::EPSILON), FULL);
        // Auf dem Strahl zur Ecke (3, 3): zwei halbe Beiträge
        assert_eq!(chain.characteristic(Vertex::new(2.0, 2.0), constants::EPSILON), FULL);
        assert_eq!(chain.characteristic(Vertex::new(4.0, 2.0), constants::EPSILON), 0);
        assert_eq!(chain.characteristic(Vertex::new(0.5, 0.5), constants::EPSILON), 0);
    }

    #[test]
    fn test_shared_reversed_edges_cancel_in_union() {
        let left = SimplicialChain::from_polygon(&square((1.0, 1.0), 1.0));
        let right = SimplicialChain::from_polygon(&square((2.0, 1.0), 1.0));
        let shared = Edge::new(Vertex::new(2.0, 1.0), Vertex::new(2.0, 2.0));

        let edges = select_result_edges(
            &left,
            &right,
            BooleanOperation::Union,
            constants::VERTEX_EPSILON_SQUARED,
            constants::EPSILON,
        );
        assert_eq!(edges.len(), 6);
        assert!(!edges.iter().any(|e| e.coincides(&shared, 1e-12)
            || e.coincides(&shared.reversed(), 1e-12)));
    }

    #[test]
    fn test_shared_same_direction_edges_survive_once() {
        let a = SimplicialChain::from_polygon(&square((1.0, 1.0), 2.0));
        let b = SimplicialChain::from_polygon(&square((1.0, 1.0), 2.0));
        let union = select_result_edges(
            &a,
            &b,
            BooleanOperation::Union,
            constants::VERTEX_EPSILON_SQUARED,
            constants::EPSILON,
        );
        assert_eq!(union.len(), 4);

        let intersection = select_result_edges(
            &a,
            &b,
            BooleanOperation::Intersection,
            constants::VERTEX_EPSILON_SQUARED,
            constants::EPSILON,
        );
        assert_eq!(intersection.len(), 4);
    }
}
