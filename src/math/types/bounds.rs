// src/math/types/bounds.rs

use crate::math::types::Vertex;
use std::fmt;

/// 2D Bounding Box (Axis-Aligned Bounding Box)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2D {
    pub min: Vertex,
    pub max: Vertex,
}

impl Bounds2D {
    /// Erstellt eine Bounding Box die alle Punkte umschließt
    pub fn from_points_iter<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vertex>,
    {
        let mut points_iter = points.into_iter();
        let first_point = points_iter.next()?;

        let (min, max) = points_iter.fold((first_point, first_point), |(min, max), point| {
            (min.min(point), max.max(point))
        });

        Some(Self { min, max })
    }

    /// Prüft ob ein Punkt in der Bounding Box liegt (Rand eingeschlossen)
    pub fn contains_point(&self, point: Vertex) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Prüft ob sich zwei Bounding Boxes überschneiden (Berührung zählt)
    pub fn intersects(&self, other: &Bounds2D) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Vereinigt zwei Bounding Boxes
    pub fn union(&self, other: &Bounds2D) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

impl fmt::Display for Bounds2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bounds2D({:?} to {:?})", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_points() {
        let bounds = Bounds2D::from_points_iter(vec![
            Vertex::new(1.0, -2.0),
            Vertex::new(-3.0, 4.0),
            Vertex::new(0.5, 0.5),
        ])
        .unwrap();
        assert_eq!(bounds.min, Vertex::new(-3.0, -2.0));
        assert_eq!(bounds.max, Vertex::new(1.0, 4.0));

        assert!(Bounds2D::from_points_iter(Vec::<Vertex>::new()).is_none());
    }

    #[test]
    fn test_bounds_intersection_and_union() {
        let bounds = |p: Vertex, q: Vertex| Bounds2D::from_points_iter([p, q]).unwrap();
        let a = bounds(Vertex::ONE, Vertex::ZERO);
        let b = bounds(Vertex::splat(0.5), Vertex::splat(2.0));
        let c = bounds(Vertex::splat(3.0), Vertex::splat(4.0));

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert_eq!(a.union(&c).max, Vertex::splat(4.0));
        assert!(a.contains_point(Vertex::new(1.0, 0.0)));
        assert!(!a.contains_point(Vertex::new(1.5, 0.5)));
    }
}
