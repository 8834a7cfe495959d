// src/math/utils.rs

/// Mathematische Konstanten und Toleranzen
pub mod constants {
    /// Maschinen-Epsilon von f32; Toleranz für parallele Linien und Determinanten.
    pub const EPSILON: f64 = 1.192_092_896e-7;
    /// Quadrierter Abstand, unter dem zwei Vertices als identisch gelten.
    pub const VERTEX_EPSILON_SQUARED: f64 = 1.192_092_896e-7;
    /// Toleranz für die Kollinearitätsprüfung (relativ zu den Kantenlängen).
    pub const COLLINEAR_TOLERANCE: f64 = 1e-9;
    /// Standardmäßige maximale Vertex-Anzahl eines konvexen Teilstücks.
    pub const DEFAULT_MAX_POLYGON_VERTICES: usize = 1024;
    /// Standardmäßiges Rekursionsbudget der konvexen Zerlegung.
    pub const DEFAULT_MAX_DECOMPOSITION_DEPTH: usize = 800;
    /// Obergrenze für Schritte beim Zusammensetzen der Clipping-Kantenkette.
    pub const DEFAULT_MAX_WALK_STEPS: usize = 1_000_000;
}

/// Orientierungstests und Linien-Schnittpunkte
pub mod simple_geometry {
    use bevy::math::DVec2;
    use geo::kernels::{Kernel, Orientation, RobustKernel};

    /// Doppelte vorzeichenbehaftete Dreiecksfläche (a, b, c).
    /// Positiv, wenn `c` links der gerichteten Geraden a→b liegt.
    pub fn signed_area2(a: DVec2, b: DVec2, c: DVec2) -> f64 {
        cross_product_2d(b - a, c - a)
    }

    /// Exakte Orientierung von `c` bezüglich der gerichteten Geraden a→b.
    pub fn orientation(a: DVec2, b: DVec2, c: DVec2) -> Orientation {
        RobustKernel::orient2d(to_coord(a), to_coord(b), to_coord(c))
    }

    fn to_coord(v: DVec2) -> geo::Coord<f64> {
        geo::Coord { x: v.x, y: v.y }
    }

    pub fn left(a: DVec2, b: DVec2, c: DVec2) -> bool {
        orientation(a, b, c) == Orientation::CounterClockwise
    }

    pub fn left_on(a: DVec2, b: DVec2, c: DVec2) -> bool {
        orientation(a, b, c) != Orientation::Clockwise
    }

    pub fn right(a: DVec2, b: DVec2, c: DVec2) -> bool {
        orientation(a, b, c) == Orientation::Clockwise
    }

    pub fn right_on(a: DVec2, b: DVec2, c: DVec2) -> bool {
        orientation(a, b, c) != Orientation::CounterClockwise
    }

    /// Berechnet das Kreuzprodukt zweier 2D-Vektoren (Skalar)
    pub fn cross_product_2d(a: DVec2, b: DVec2) -> f64 {
        a.x * b.y - a.y * b.x
    }

    /// Schnittpunkt der unendlichen Geraden p1-p2 und q1-q2.
    /// Gibt `None` zurück, wenn die Geraden (nahezu) parallel sind.
    pub fn line_intersection(
        p1: DVec2,
        p2: DVec2,
        q1: DVec2,
        q2: DVec2,
        epsilon: f64,
    ) -> Option<DVec2> {
        let a1 = p2.y - p1.y;
        let b1 = p1.x - p2.x;
        let c1 = a1 * p1.x + b1 * p1.y;
        let a2 = q2.y - q1.y;
        let b2 = q1.x - q2.x;
        let c2 = a2 * q1.x + b2 * q1.y;
        let det = a1 * b2 - a2 * b1;

        if det.abs() <= epsilon {
            return None;
        }
        Some(DVec2::new(
            (b2 * c1 - b1 * c2) / det,
            (a1 * c2 - a2 * c1) / det,
        ))
    }

    /// Schnittpunkt der Segmente p1-p2 und p3-p4, Endpunkte eingeschlossen.
    /// Ein Treffer genau im gemeinsamen Startpunkt (beide Parameter 0) zählt nicht.
    pub fn segment_intersection(
        p1: DVec2,
        p2: DVec2,
        p3: DVec2,
        p4: DVec2,
        epsilon: f64,
    ) -> Option<DVec2> {
        let a = p4.y - p3.y;
        let b = p2.x - p1.x;
        let c = p4.x - p3.x;
        let d = p2.y - p1.y;
        let denom = a * b - c * d;

        if denom.abs() <= epsilon {
            return None;
        }

        let e = p1.y - p3.y;
        let f = p1.x - p3.x;
        let ua = (c * e - a * f) / denom;
        if !(0.0..=1.0).contains(&ua) {
            return None;
        }
        let ub = (b * e - d * f) / denom;
        if !(0.0..=1.0).contains(&ub) {
            return None;
        }
        if ua == 0.0 && ub == 0.0 {
            return None;
        }
        Some(DVec2::new(p1.x + ua * b, p1.y + ua * d))
    }

    /// Prüft ob `point` auf dem Segment start-end liegt (Endpunkte eingeschlossen).
    pub fn point_on_segment(start: DVec2, end: DVec2, point: DVec2, tolerance: f64) -> bool {
        let segment = end - start;
        signed_area2(start, end, point).abs() <= tolerance
            && (point - start).dot(segment) >= 0.0
            && (point - end).dot(segment) <= 0.0
    }

    /// Quadratischer Abstand-Anteil von `point` entlang start→end (0 am Start, 1 am Ende).
    pub fn squared_alpha(start: DVec2, end: DVec2, point: DVec2) -> f64 {
        (point - start).length_squared() / (end - start).length_squared()
    }
}
