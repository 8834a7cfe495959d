// src/math/geometry/polygon/interop.rs

//! Konvertierung zwischen [`Polygon`] und `geo::Polygon<f64>`.
//!
//! `geo` kennt Löcher (interiors); die Pinsel-Polygone sind einfache Ringe.
//! Ein `geo`-Polygon mit Löchern wird daher abgelehnt.

use crate::math::{
    error::{MathError, MathResult},
    geometry::polygon::core::Polygon,
    types::Vertex,
};
use geo::{Coord, LineString};

impl From<&Polygon> for geo::Polygon<f64> {
    fn from(polygon: &Polygon) -> Self {
        let exterior: LineString<f64> = polygon
            .vertices()
            .iter()
            .map(|v| Coord { x: v.x, y: v.y })
            .collect();
        // geo schließt den Ring selbst
        geo::Polygon::new(exterior, Vec::new())
    }
}

impl TryFrom<&geo::Polygon<f64>> for Polygon {
    type Error = MathError;

    fn try_from(polygon: &geo::Polygon<f64>) -> MathResult<Self> {
        if !polygon.interiors().is_empty() {
            return Err(MathError::InvalidConfiguration {
                message: format!(
                    "polygon with {} interior ring(s) cannot be represented",
                    polygon.interiors().len()
                ),
            });
        }

        let vertices = polygon
            .exterior()
            .coords()
            .map(|c| Vertex::new(c.x, c.y))
            .collect();
        Polygon::new(vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::geometry::polygon::properties::PolygonProperties;
    use approx::assert_relative_eq;
    use geo::Area;

    #[test]
    fn test_to_geo_preserves_area() {
        let polygon = Polygon::new(vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(2.0, 0.0),
            Vertex::new(2.0, 1.0),
            Vertex::new(1.0, 1.0),
            Vertex::new(1.0, 2.0),
            Vertex::new(0.0, 2.0),
        ])
        .unwrap();
        let geo_polygon = geo::Polygon::from(&polygon);
        assert_relative_eq!(geo_polygon.signed_area(), polygon.signed_area());
        // Geschlossener Ring: erster Punkt wird wiederholt
        assert_eq!(geo_polygon.exterior().0.len(), polygon.len() + 1);
    }

    #[test]
    fn test_from_geo_drops_closing_coordinate() {
        let geo_polygon = geo::Polygon::new(
            LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]),
            Vec::new(),
        );
        let polygon = Polygon::try_from(&geo_polygon).unwrap();
        assert_eq!(polygon.len(), 3);
        assert_relative_eq!(polygon.area(), 0.5);
    }

    #[test]
    fn test_from_geo_rejects_holes() {
        let geo_polygon = geo::Polygon::new(
            LineString::from(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]),
            vec![LineString::from(vec![
                (1.0, 1.0),
                (2.0, 1.0),
                (2.0, 2.0),
                (1.0, 2.0),
            ])],
        );
        assert!(matches!(
            Polygon::try_from(&geo_polygon),
            Err(MathError::InvalidConfiguration { .. })
        ));
    }
}
