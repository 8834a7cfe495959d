// src/shape/plugin.rs

//! Bevy-`Plugin`, das Umrisslinien aus dem Editor in konvexe Pinsel-Stücke zerlegt.

use super::{
    events::{BuildBrushShapeRequest, ConvexShapeReady, ShapeBuildWarning},
    pipeline::build_convex_pieces,
    resource::ShapeBrushSettings,
};
use bevy::prelude::*;

/// Registriert `ShapeBrushSettings`, die Ein- und Ausgabe-Events und das
/// Verarbeitungssystem.
pub struct ShapeBrushPlugin;

impl Plugin for ShapeBrushPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ShapeBrushSettings>()
            .add_event::<BuildBrushShapeRequest>()
            .add_event::<ConvexShapeReady>()
            .add_event::<ShapeBuildWarning>()
            .add_systems(Update, build_brush_shapes_system);
    }
}

/// Verarbeitet alle `BuildBrushShapeRequest`s dieses Frames.
///
/// Für jede Anfrage wird genau ein `ConvexShapeReady` gesendet (eventuell ohne
/// Stücke) und pro Problem ein `ShapeBuildWarning`. Ungültige Einstellungen
/// werden geloggt; die Anfrage wird dann verworfen.
pub fn build_brush_shapes_system(
    settings: Res<ShapeBrushSettings>,
    mut requests: EventReader<BuildBrushShapeRequest>,
    mut ready: EventWriter<ConvexShapeReady>,
    mut warnings: EventWriter<ShapeBuildWarning>,
) {
    for request in requests.read() {
        let outcome = match build_convex_pieces(&settings, request) {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(
                    "ShapeBrushPlugin: shape {} skipped, invalid settings: {}",
                    request.shape_id, err
                );
                continue;
            }
        };

        for kind in outcome.warnings {
            warn!("ShapeBrushPlugin: shape {}: {:?}", request.shape_id, kind);
            warnings.send(ShapeBuildWarning {
                shape_id: request.shape_id,
                kind,
            });
        }

        info!(
            "ShapeBrushPlugin: shape {} built from {} outline(s) into {} convex piece(s)",
            request.shape_id,
            request.outlines.len(),
            outcome.pieces.len()
        );
        ready.send(ConvexShapeReady {
            shape_id: request.shape_id,
            pieces: outcome.pieces,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{geometry::polygon::Polygon, types::Vertex};
    use crate::shape::events::ShapeWarningKind;
    use bevy::ecs::event::Events;

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

    fn drain<E: Event + Clone>(app: &App) -> Vec<E> {
        let events = app.world.resource::<Events<E>>();
        let mut reader = events.get_reader();
        reader.read(events).cloned().collect()
    }

    #[test]
    fn test_plugin_answers_requests() {
        let mut app = App::new();
        app.add_plugins(ShapeBrushPlugin);

        app.world
            .resource_mut::<Events<BuildBrushShapeRequest>>()
            .send(BuildBrushShapeRequest {
                shape_id: 7,
                outlines: vec![l_shape()],
                combine: None,
            });
        app.update();

        let ready = drain::<ConvexShapeReady>(&app);
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].shape_id, 7);
        assert_eq!(ready[0].pieces.len(), 2);
        assert!(drain::<ShapeBuildWarning>(&app).is_empty());
    }

    #[test]
    fn test_plugin_reports_invalid_outline() {
        let mut app = App::new();
        app.add_plugins(ShapeBrushPlugin);

        let bow_tie = Polygon::new(vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(1.0, 1.0),
            Vertex::new(1.0, 0.0),
            Vertex::new(0.0, 1.0),
        ])
        .unwrap();
        app.world
            .resource_mut::<Events<BuildBrushShapeRequest>>()
            .send(BuildBrushShapeRequest {
                shape_id: 3,
                outlines: vec![bow_tie],
                combine: None,
            });
        app.update();

        let ready = drain::<ConvexShapeReady>(&app);
        assert_eq!(ready.len(), 1);
        assert!(ready[0].pieces.is_empty());

        let warnings = drain::<ShapeBuildWarning>(&app);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            warnings[0].kind,
            ShapeWarningKind::InvalidOutline(_)
        ));
    }
}
