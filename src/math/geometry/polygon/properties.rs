// src/math/geometry/polygon/properties.rs

use crate::math::geometry::polygon::core::Polygon; // Zugriff auf die Polygon-Struktur
use crate::math::types::Vertex;
use crate::math::utils::{constants, simple_geometry};

/// Trait für geometrische Eigenschaften von Polygonen.
pub trait PolygonProperties {
    /// Vorzeichenbehaftete Fläche (Shoelace). Positiv für CCW.
    fn signed_area(&self) -> f64;

    /// Betrag der Fläche.
    fn area(&self) -> f64;

    /// Berechnet den Umfang des Polygons.
    fn perimeter(&self) -> f64;

    /// Lage eines Punktes relativ zum Polygon (Winding-Number mit Randprüfung).
    fn point_location(&self, point: Vertex) -> PointLocation;

    /// Prüft, ob ein Punkt echt innerhalb des Polygons liegt. Randpunkte zählen nicht.
    fn contains_point(&self, point: Vertex) -> bool;

    /// Prüft, ob das Polygon konvex ist.
    /// Kollineare Vertices werden ignoriert; alle echten Knicke müssen dieselbe Richtung haben.
    fn is_convex(&self) -> bool;

    /// Bestimmt die Orientierung des Polygons anhand des Vorzeichens der Fläche.
    fn orientation(&self) -> Orientation;

    fn is_counter_clockwise(&self) -> bool {
        self.orientation() == Orientation::CounterClockwise
    }

    /// Berechnet den geometrischen Schwerpunkt (Zentroid) des Polygons.
    /// Gibt `None` zurück, wenn das Polygon weniger als 3 Vertices hat oder die Fläche null ist.
    fn geometric_centroid(&self) -> Option<Vertex>;
}

/// Gibt die Orientierung eines Polygons an.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    Collinear, // Alle Punkte liegen auf einer Linie
}

/// Lage eines Punktes bezüglich eines Polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointLocation {
    Inside,
    OnBoundary,
    Outside,
}

impl PolygonProperties for Polygon {
    fn signed_area(&self) -> f64 {
        if self.len() < 3 {
            return 0.0;
        }
        self.signed_area_doubled() * 0.5
    }

    fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    fn perimeter(&self) -> f64 {
        if self.len() < 2 {
            return 0.0;
        }
        self.edges().map(|(p1, p2)| p1.distance(p2)).sum()
    }

    fn point_location(&self, point: Vertex) -> PointLocation {
        if self.len() < 3 {
            return PointLocation::Outside;
        }

        let mut winding = 0i32;
        for (a, b) in self.edges() {
            if simple_geometry::point_on_segment(a, b, point, constants::EPSILON) {
                return PointLocation::OnBoundary;
            }
            if a.y <= point.y {
                if b.y > point.y && simple_geometry::left(a, b, point) {
                    winding += 1;
                }
            } else if b.y <= point.y && simple_geometry::right(a, b, point) {
                winding -= 1;
            }
        }

        if winding != 0 {
            PointLocation::Inside
        } else {
            PointLocation::Outside
        }
    }

    fn contains_point(&self, point: Vertex) -> bool {
        self.point_location(point) == PointLocation::Inside
    }

    fn is_convex(&self) -> bool {
        let n = self.len();
        if n < 3 {
            return false; // Nicht genug Punkte für eine Fläche
        }

        let mut sign_of_cross_product: Option<bool> = None;

        for i in 0..n {
            let p1 = self.at(i as isize);
            let p2 = self.at(i as isize + 1);
            let p3 = self.at(i as isize + 2);

            let incoming = p2 - p1;
            let outgoing = p3 - p2;
            let cross = simple_geometry::cross_product_2d(incoming, outgoing);
            let scale = incoming.length() * outgoing.length();

            if cross.abs() > constants::EPSILON * scale {
                // Nur nicht-kollineare Punkte betrachten
                let current_sign = cross > 0.0;
                match sign_of_cross_product {
                    Some(expected_sign) if expected_sign != current_sign => return false,
                    Some(_) => {}
                    None => sign_of_cross_product = Some(current_sign),
                }
            }
        }
        // Eine reine Linie hat keinen echten Knick und ist daher keine konvexe Fläche.
        sign_of_cross_product.is_some()
    }

    fn orientation(&self) -> Orientation {
        if self.len() < 3 {
            return Orientation::Collinear;
        }

        let signed_area_doubled = self.signed_area_doubled();
        if signed_area_doubled.abs() < constants::EPSILON * constants::EPSILON {
            Orientation::Collinear
        } else if signed_area_doubled > 0.0 {
            Orientation::CounterClockwise // Standardorientierung für positive Fläche
        } else {
            Orientation::Clockwise
        }
    }

    fn geometric_centroid(&self) -> Option<Vertex> {
        if self.len() < 3 {
            return None;
        }

        let signed_area_doubled = self.signed_area_doubled();
        if signed_area_doubled.abs() < constants::EPSILON * constants::EPSILON {
            return None;
        }

        let weighted = self.edges().fold(Vertex::ZERO, |acc, (p1, p2)| {
            acc + (p1 + p2) * simple_geometry::cross_product_2d(p1, p2)
        });

        Some(weighted / (3.0 * signed_area_doubled)) // 1 / (6 * Fläche)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn l_shape() -> Polygon {
        Polygon::new(vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(2.0, 0.0),
            Vertex::new(2.0, 1.0),
            Vertex::new(1.0, 1.0),
            Vertex::new(1.0, 2.0),
            Vertex::new(0.0, 2.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_area_and_orientation() {
        let polygon = l_shape();
        assert_relative_eq!(polygon.signed_area(), 3.0);
        assert_relative_eq!(polygon.reversed().signed_area(), -3.0);
        assert_relative_eq!(polygon.area(), 3.0);
        assert_relative_eq!(polygon.perimeter(), 8.0);
        assert_eq!(polygon.orientation(), Orientation::CounterClockwise);
        assert_eq!(polygon.reversed().orientation(), Orientation::Clockwise);
        assert!(polygon.is_counter_clockwise());
    }

    #[test]
    fn test_convexity() {
        assert!(!l_shape().is_convex());

        let square_with_midpoint = Polygon::new(vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(0.5, 0.0),
            Vertex::new(1.0, 0.0),
            Vertex::new(1.0, 1.0),
            Vertex::new(0.0, 1.0),
        ])
        .unwrap();
        assert!(square_with_midpoint.is_convex());
        assert!(square_with_midpoint.reversed().is_convex());
    }

    #[test]
    fn test_point_location() {
        let polygon = l_shape();
        assert_eq!(
            polygon.point_location(Vertex::new(0.5, 0.5)),
            PointLocation::Inside
        );
        assert_eq!(
            polygon.point_location(Vertex::new(1.5, 1.5)),
            PointLocation::Outside
        );
        assert_eq!(
            polygon.point_location(Vertex::new(1.0, 1.5)),
            PointLocation::OnBoundary
        );
        assert!(polygon.contains_point(Vertex::new(1.5, 0.5)));
        // Orientierung spielt für die Lage keine Rolle
        assert!(polygon.reversed().contains_point(Vertex::new(0.5, 1.5)));
    }

    #[test]
    fn test_geometric_centroid() {
        let square = Polygon::new(vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(2.0, 0.0),
            Vertex::new(2.0, 2.0),
            Vertex::new(0.0, 2.0),
        ])
        .unwrap();
        let centroid = square.geometric_centroid().unwrap();
        assert_relative_eq!(centroid.x, 1.0);
        assert_relative_eq!(centroid.y, 1.0);
    }
}
