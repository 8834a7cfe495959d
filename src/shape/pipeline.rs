// src/shape/pipeline.rs

use super::{
    events::{BuildBrushShapeRequest, ShapeWarningKind},
    resource::ShapeBrushSettings,
};
use crate::math::{
    error::MathResult,
    geometry::polygon::{
        BooleanOperation, ConvexDecomposer, PointLocation, Polygon, PolygonBooleanClipper,
        PolygonProperties, PolygonValidator, ValidationLevel,
    },
};
use bevy::log::debug;

/// Ergebnis einer Pinsel-Anfrage ohne ECS-Bezug.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeBuildOutcome {
    pub pieces: Vec<Polygon>,
    pub warnings: Vec<ShapeWarningKind>,
}

/// Baut die konvexen Stücke einer Anfrage.
///
/// Ablauf: optionales Spiegeln, Bereinigen und Prüfen jedes Umrisses, CCW
/// erzwingen, optionale Boolean-Verknüpfung von links nach rechts, Zerlegung.
/// Ergebnisringe im Uhrzeigersinn sind Löcher. Konvexe Stücke können kein Loch
/// aussparen, daher wird jede Außenkontur, die ein Loch umschließt, mit einer
/// Warnung verworfen.
pub fn build_convex_pieces(
    settings: &ShapeBrushSettings,
    request: &BuildBrushShapeRequest,
) -> MathResult<ShapeBuildOutcome> {
    let decomposer = ConvexDecomposer::new(settings.decomposer)?;
    let clipper = PolygonBooleanClipper::new(settings.clipper)?;
    let mut outcome = ShapeBuildOutcome::default();

    let outlines = prepare_outlines(settings, request, &mut outcome.warnings);
    let shapes = match request.combine {
        Some(operation) => combine(&clipper, outlines, operation, &mut outcome.warnings),
        None => outlines,
    };

    let (outers, holes): (Vec<Polygon>, Vec<Polygon>) = shapes
        .into_iter()
        .filter(|shape| shape.len() >= 3)
        .partition(|shape| shape.signed_area() > 0.0);

    for shape in outers {
        let enclosed = holes.iter().filter(|hole| encloses(&shape, hole)).count();
        if enclosed > 0 {
            outcome.warnings.push(ShapeWarningKind::InvalidOutline(format!(
                "shape with {} vertices encloses {enclosed} hole(s)",
                shape.len()
            )));
            continue;
        }

        let report = decomposer.decompose(&shape);
        if report.is_degraded() {
            outcome.warnings.push(ShapeWarningKind::DecompositionDegraded {
                depth_exhausted: report.depth_exhausted,
                stalled_splits: report.stalled_splits,
            });
        }
        outcome.pieces.extend(report.pieces);
    }

    debug!(
        "build_convex_pieces: shape {} -> {} pieces, {} warnings",
        request.shape_id,
        outcome.pieces.len(),
        outcome.warnings.len()
    );
    Ok(outcome)
}

/// `true`, wenn das Loch innerhalb der Außenkontur liegt.
fn encloses(outer: &Polygon, hole: &Polygon) -> bool {
    let Some(bounds) = outer.bounds() else {
        return false;
    };
    // Eckpunkte dürfen die Außenkontur berühren, Kantenmitten entscheiden dann
    hole.vertices()
        .iter()
        .copied()
        .chain(hole.edges().map(|(start, end)| (start + end) * 0.5))
        .filter(|point| bounds.contains_point(*point))
        .any(|point| outer.point_location(point) == PointLocation::Inside)
}

fn prepare_outlines(
    settings: &ShapeBrushSettings,
    request: &BuildBrushShapeRequest,
    warnings: &mut Vec<ShapeWarningKind>,
) -> Vec<Polygon> {
    let validator = PolygonValidator::new(ValidationLevel::Standard)
        .with_tolerance(settings.clipper.vertex_epsilon_sq);
    let mut outlines = Vec::with_capacity(request.outlines.len());

    for (index, outline) in request.outlines.iter().enumerate() {
        let mut outline = outline.clone();
        if settings.flip_vertical {
            outline.flip_vertical();
        }
        outline.remove_near_duplicates(settings.clipper.vertex_epsilon_sq);

        let report = validator.validate(&outline);
        if let Some(error) = report.errors.first() {
            warnings.push(ShapeWarningKind::InvalidOutline(format!(
                "outline {index}: {error:?}"
            )));
            continue;
        }

        outline.force_counter_clockwise();
        outlines.push(outline);
    }
    outlines
}

/// Verknüpft die Umrisse von links nach rechts.
fn combine(
    clipper: &PolygonBooleanClipper,
    outlines: Vec<Polygon>,
    operation: BooleanOperation,
    warnings: &mut Vec<ShapeWarningKind>,
) -> Vec<Polygon> {
    let mut outlines = outlines.into_iter();
    let Some(first) = outlines.next() else {
        return Vec::new();
    };

    let mut current = vec![first];
    for outline in outlines {
        current = match operation {
            BooleanOperation::Union => union_into(clipper, current, outline, warnings),
            // Die bisherigen Stücke sind disjunkt: jedes einzeln beschneiden
            BooleanOperation::Intersection | BooleanOperation::Difference => current
                .iter()
                .flat_map(|shape| {
                    if shape.signed_area() < 0.0 {
                        return clip_hole(clipper, shape, &outline, operation, warnings);
                    }
                    let (result, error) = clipper.execute(shape, &outline, operation);
                    if !error.is_ok() {
                        warnings.push(ShapeWarningKind::ClipFailed(error));
                    }
                    result
                })
                .collect(),
        };
    }
    current
}

/// Vereinigt `outline` mit allen Stücken, die es berührt; der Rest bleibt unverändert.
fn union_into(
    clipper: &PolygonBooleanClipper,
    current: Vec<Polygon>,
    outline: Polygon,
    warnings: &mut Vec<ShapeWarningKind>,
) -> Vec<Polygon> {
    let mut merged = outline.clone();
    let mut result = Vec::with_capacity(current.len() + 1);

    for shape in current {
        if shape.signed_area() < 0.0 {
            result.extend(clip_hole(
                clipper,
                &shape,
                &outline,
                BooleanOperation::Union,
                warnings,
            ));
            continue;
        }

        let (loops, error) = clipper.union(&shape, &merged);
        if !error.is_ok() {
            warnings.push(ShapeWarningKind::ClipFailed(error));
            result.push(shape);
            continue;
        }

        let (outer, holes): (Vec<Polygon>, Vec<Polygon>) =
            loops.into_iter().partition(|p| p.signed_area() > 0.0);
        match <[Polygon; 1]>::try_from(outer) {
            Ok([single]) => {
                merged = single;
                result.extend(holes);
            }
            // Disjunkt: beide bleiben getrennt
            Err(_) => result.push(shape),
        }
    }

    result.push(merged);
    result
}

/// Passt ein Loch (CW) an die Verknüpfung mit `outline` an.
///
/// Vereinigung füllt den überdeckten Teil des Lochs, Schnitt behält nur den
/// Teil innerhalb von `outline`, Differenz lässt das Loch unverändert.
fn clip_hole(
    clipper: &PolygonBooleanClipper,
    hole: &Polygon,
    outline: &Polygon,
    operation: BooleanOperation,
    warnings: &mut Vec<ShapeWarningKind>,
) -> Vec<Polygon> {
    let hole_operation = match operation {
        BooleanOperation::Union => BooleanOperation::Difference,
        BooleanOperation::Intersection => BooleanOperation::Intersection,
        BooleanOperation::Difference => return vec![hole.clone()],
    };

    let (loops, error) = clipper.execute(&hole.reversed(), outline, hole_operation);
    if !error.is_ok() {
        warnings.push(ShapeWarningKind::ClipFailed(error));
        return vec![hole.clone()];
    }

    // Innere Ringe wären Inseln im Loch; die deckt `outline` selbst ab
    loops
        .into_iter()
        .filter(|p| p.signed_area() > 0.0)
        .map(|p| p.reversed())
        .collect()
}
