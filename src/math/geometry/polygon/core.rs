// src/math/geometry/polygon/core.rs

use crate::math::{
    error::*,
    types::{Bounds2D, Vertex},
    utils::{constants, simple_geometry},
};
use std::fmt;

/// Polygon-Struktur: ein geschlossener, zyklischer Ring von 2D-Vertices.
///
/// Der Ring speichert keinen duplizierten Endpunkt; die Kante vom letzten zum
/// ersten Vertex ist implizit. Indizes werden modulo `len()` behandelt.
/// Gegen den Uhrzeigersinn (CCW) bedeutet Außenkontur.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vertex>,
}

impl Polygon {
    /// Erstellt ein neues Polygon aus einer Liste von Vertices.
    /// Ein explizit duplizierter Endpunkt (erster == letzter) wird entfernt.
    /// Benötigt mindestens 3 Vertices mit endlichen Koordinaten.
    pub fn new(mut vertices: Vec<Vertex>) -> MathResult<Self> {
        if vertices.len() > 3 {
            if let (Some(first), Some(last)) = (vertices.first(), vertices.last()) {
                if first.distance_squared(*last) < constants::VERTEX_EPSILON_SQUARED {
                    vertices.pop();
                }
            }
        }

        if let Some(index) = vertices
            .iter()
            .position(|v| !v.x.is_finite() || !v.y.is_finite())
        {
            return Err(MathError::NonFiniteVertex { index });
        }

        if vertices.len() < 3 {
            return Err(MathError::InsufficientPoints {
                expected: 3,
                actual: vertices.len(),
            });
        }

        Ok(Self { vertices })
    }

    /// Baut ein Polygon ohne Prüfungen. Die Algorithmen erzeugen damit Zwischen-
    /// und Ergebnisringe, die (als degeneriert gemeldet) weniger als 3 Vertices haben dürfen.
    pub(crate) fn from_points_unchecked(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }

    pub(crate) fn push_vertex(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    /// Gibt einen Slice der Vertices zurück.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Anzahl der Vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Prüft, ob das Polygon keine Vertices hat.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex mit zyklischem Index; negative und zu große Indizes werden umgebrochen.
    /// Darf nur auf nicht-leeren Polygonen aufgerufen werden.
    pub fn at(&self, index: isize) -> Vertex {
        let n = self.vertices.len() as isize;
        self.vertices[index.rem_euclid(n) as usize]
    }

    pub fn next_index(&self, index: usize) -> usize {
        if index + 1 >= self.vertices.len() {
            0
        } else {
            index + 1
        }
    }

    pub fn previous_index(&self, index: usize) -> usize {
        if index == 0 {
            self.vertices.len().saturating_sub(1)
        } else {
            index - 1
        }
    }

    /// Iteriert über alle Kanten (start, end), inklusive der schließenden Kante.
    pub fn edges(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        (0..self.vertices.len()).map(|i| (self.vertices[i], self.vertices[self.next_index(i)]))
    }

    /// Berechnet die Bounding Box des Polygons.
    /// Gibt `None` zurück, wenn das Polygon leer ist.
    pub fn bounds(&self) -> Option<Bounds2D> {
        Bounds2D::from_points_iter(self.vertices.iter().copied())
    }

    /// Verschiebt alle Vertices.
    pub fn translate(&mut self, offset: Vertex) {
        for vertex in &mut self.vertices {
            *vertex += offset;
        }
    }

    pub fn translated(&self, offset: Vertex) -> Self {
        let mut copy = self.clone();
        copy.translate(offset);
        copy
    }

    /// Kehrt die Reihenfolge der Vertices um.
    pub fn reverse(&mut self) {
        self.vertices.reverse();
    }

    /// Erstellt eine Kopie des Polygons mit umgekehrter Vertex-Reihenfolge.
    pub fn reversed(&self) -> Self {
        let mut copy = self.clone();
        copy.reverse();
        copy
    }

    /// Stellt sicher, dass der Ring gegen den Uhrzeigersinn läuft.
    /// Gibt `true` zurück, wenn umgekehrt wurde.
    pub fn force_counter_clockwise(&mut self) -> bool {
        if self.vertices.len() < 3 || self.signed_area_doubled() > 0.0 {
            return false;
        }
        self.reverse();
        true
    }

    /// Spiegelt an der X-Achse (y → -y) und kehrt den Ring um, damit die
    /// Orientierung erhalten bleibt.
    pub fn flip_vertical(&mut self) {
        for vertex in &mut self.vertices {
            vertex.y = -vertex.y;
        }
        self.reverse();
    }

    /// Entfernt benachbarte Vertices, deren quadrierter Abstand `<= epsilon_squared` ist
    /// (zyklisch, inklusive letzter/erster Vertex). Verhindert Kanten der Länge null.
    pub fn remove_near_duplicates(&mut self, epsilon_squared: f64) {
        let mut cleaned: Vec<Vertex> = Vec::with_capacity(self.vertices.len());
        for &vertex in &self.vertices {
            if cleaned
                .last()
                .is_none_or(|last| last.distance_squared(vertex) > epsilon_squared)
            {
                cleaned.push(vertex);
            }
        }
        while cleaned.len() > 1 {
            match (cleaned.first(), cleaned.last()) {
                (Some(first), Some(last)) if first.distance_squared(*last) <= epsilon_squared => {
                    cleaned.pop();
                }
                _ => break,
            }
        }
        self.vertices = cleaned;
    }

    /// Liefert ein neues Polygon ohne Vertices, an denen sich die Richtung nicht ändert.
    ///
    /// Ein Vertex gilt als kollinear, wenn der Sinus des Knickwinkels zwischen
    /// eingehender und ausgehender Kante `<= tolerance` ist und beide Kanten in
    /// dieselbe Richtung zeigen. Spitzen (Richtungsumkehr) bleiben erhalten.
    /// Polygone mit höchstens 3 Vertices werden unverändert zurückgegeben.
    pub fn collinear_simplified(&self, tolerance: f64) -> Self {
        let n = self.vertices.len();
        if n <= 3 {
            return self.clone();
        }

        let simplified = (0..n)
            .filter(|&i| {
                let prev = self.vertices[self.previous_index(i)];
                let current = self.vertices[i];
                let next = self.vertices[self.next_index(i)];
                !is_collinear_pass_through(prev, current, next, tolerance)
            })
            .map(|i| self.vertices[i])
            .collect();

        Self::from_points_unchecked(simplified)
    }

    /// Doppelte vorzeichenbehaftete Fläche (Shoelace). Positiv für CCW.
    pub(crate) fn signed_area_doubled(&self) -> f64 {
        self.edges()
            .map(|(p1, p2)| simple_geometry::cross_product_2d(p1, p2))
            .sum()
    }
}

fn is_collinear_pass_through(prev: Vertex, current: Vertex, next: Vertex, tolerance: f64) -> bool {
    let incoming = current - prev;
    let outgoing = next - current;
    let scale = incoming.length() * outgoing.length();
    if scale == 0.0 {
        // Doppelter Punkt: trägt keine Richtung
        return true;
    }
    let sine = simple_geometry::cross_product_2d(incoming, outgoing) / scale;
    sine.abs() <= tolerance && incoming.dot(outgoing) > 0.0
}

/// Display-Implementierung für Debugging.
impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon({} vertices)", self.vertices.len())
    }
}

/// Konvertierung von `Vec<Vertex>` zu `Polygon`.
impl TryFrom<Vec<Vertex>> for Polygon {
    type Error = MathError;

    fn try_from(vertices: Vec<Vertex>) -> Result<Self, Self::Error> {
        Self::new(vertices)
    }
}

/// Konvertierung von `Polygon` zu `Vec<Vertex>`.
impl From<Polygon> for Vec<Vertex> {
    fn from(polygon: Polygon) -> Self {
        polygon.vertices
    }
}

impl IntoIterator for Polygon {
    type Item = Vertex;
    type IntoIter = std::vec::IntoIter<Vertex>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.into_iter()
    }
}

impl<'a> IntoIterator for &'a Polygon {
    type Item = &'a Vertex;
    type IntoIter = std::slice::Iter<'a, Vertex>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::new(vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(1.0, 0.0),
            Vertex::new(1.0, 1.0),
            Vertex::new(0.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_rejects_too_few_points() {
        let err = Polygon::new(vec![Vertex::ZERO, Vertex::X]).unwrap_err();
        assert_eq!(
            err,
            MathError::InsufficientPoints {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_new_rejects_non_finite() {
        let err = Polygon::new(vec![Vertex::ZERO, Vertex::new(f64::NAN, 1.0), Vertex::Y]);
        assert_eq!(err.unwrap_err(), MathError::NonFiniteVertex { index: 1 });
    }

    #[test]
    fn test_new_drops_explicit_closing_vertex() {
        let polygon = Polygon::new(vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(1.0, 0.0),
            Vertex::new(1.0, 1.0),
            Vertex::new(0.0, 0.0),
        ])
        .unwrap();
        // Ein Dreieck mit explizitem Endpunkt bleibt ein Dreieck
        assert_eq!(polygon.len(), 3);
    }

    #[test]
    fn test_cyclic_access() {
        let polygon = square();
        assert_eq!(polygon.at(-1), Vertex::new(0.0, 1.0));
        assert_eq!(polygon.at(4), Vertex::new(0.0, 0.0));
        assert_eq!(polygon.at(9), Vertex::new(1.0, 0.0));
        assert_eq!(polygon.next_index(3), 0);
        assert_eq!(polygon.previous_index(0), 3);
        assert_eq!(polygon.edges().count(), 4);
    }

    #[test]
    fn test_force_counter_clockwise() {
        let mut polygon = square().reversed();
        assert!(polygon.force_counter_clockwise());
        assert!(polygon.signed_area_doubled() > 0.0);
        assert!(!polygon.force_counter_clockwise());
    }

    #[test]
    fn test_flip_vertical_keeps_winding() {
        let mut polygon = square();
        polygon.flip_vertical();
        assert!(polygon.signed_area_doubled() > 0.0);
        assert!(polygon.vertices().iter().all(|v| v.y <= 0.0));
    }

    #[test]
    fn test_remove_near_duplicates() {
        let mut polygon = Polygon::from_points_unchecked(vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(1.0, 0.0),
            Vertex::new(1.0 + 1e-6, 0.0),
            Vertex::new(1.0, 1.0),
            Vertex::new(0.0, 1.0),
            Vertex::new(0.0, 1e-6),
        ]);
        polygon.remove_near_duplicates(constants::VERTEX_EPSILON_SQUARED);
        assert_eq!(polygon.len(), 4);
        assert_eq!(polygon.vertices()[0], Vertex::new(0.0, 0.0));
    }

    #[test]
    fn test_collinear_simplified() {
        let polygon = Polygon::new(vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(1.0, 0.0),
            Vertex::new(2.0, 0.0),
            Vertex::new(2.0, 1.0),
            Vertex::new(2.0, 2.0),
            Vertex::new(0.0, 2.0),
        ])
        .unwrap();
        let simplified = polygon.collinear_simplified(constants::COLLINEAR_TOLERANCE);
        assert_eq!(
            simplified.vertices(),
            &[
                Vertex::new(0.0, 0.0),
                Vertex::new(2.0, 0.0),
                Vertex::new(2.0, 2.0),
                Vertex::new(0.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_collinear_simplified_keeps_corners() {
        let polygon = square();
        assert_eq!(
            polygon.collinear_simplified(constants::COLLINEAR_TOLERANCE),
            polygon
        );
    }

    #[test]
    fn test_translate() {
        let polygon = square().translated(Vertex::new(2.0, -1.0));
        let bounds = polygon.bounds().unwrap();
        assert_eq!(bounds.min, Vertex::new(2.0, -1.0));
        assert_eq!(bounds.max, Vertex::new(3.0, 0.0));
    }
}
