//! Sicht eines Reisenden auf ein Gleis.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use trackway_types::{
    angle::Angle, direction::Direction, position::Position, transform::Transform, vector::Vector,
};

use crate::bezier::BezierCurve;

/// Welcher Weg durch ein Gleis genommen wird.
///
/// Nur bei [`Points`](crate::points::Points), die über die Weichen-Spitze befahren werden,
/// ist [`Route::Diverging`] möglich.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// Der gerade bzw. einzige Weg.
    Through,
    /// Der abzweigende Weg einer Weiche.
    Diverging,
}

/// Geometrie des Weges, den ein Reisender durch ein Gleis nimmt, in Welt-Koordinaten.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Placement {
    /// Gerade Strecke.
    Line {
        /// Startpunkt.
        start: Vector,
        /// Endpunkt.
        end: Vector,
    },
    /// Kreisbogen in der Ebene `z = centre.z`.
    Arc {
        /// Mittelpunkt.
        centre: Vector,
        /// Radius.
        radius: f32,
        /// Winkel des Startpunktes, vom Mittelpunkt aus.
        start: Angle,
        /// Überstrichener Winkel, positiv gegen den Uhrzeigersinn.
        sweep: Angle,
    },
    /// Bezier-Kurve mit vorberechneter Länge.
    Curve {
        /// Die Kurve.
        curve: BezierCurve,
        /// Ihre Bogenlänge.
        length: f32,
    },
}

impl Placement {
    /// Erzeuge eine [`Placement::Curve`], die Länge wird approximiert.
    #[must_use]
    pub fn curve(curve: BezierCurve) -> Self {
        Placement::Curve { curve, length: curve.length() }
    }

    /// Länge des Weges.
    #[must_use]
    pub fn length(&self) -> f32 {
        match self {
            Placement::Line { start, end } => start.distance(end),
            // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
            #[allow(clippy::arithmetic_side_effects)]
            Placement::Arc { radius, sweep, .. } => radius * sweep.abs().0,
            Placement::Curve { length, .. } => *length,
        }
    }

    /// Anteil `delta / length` zwischen 0 und 1.
    fn parameter(&self, delta: f32) -> f32 {
        let länge = self.length();
        if länge <= f32::EPSILON {
            0.
        } else {
            // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
            #[allow(clippy::arithmetic_side_effects)]
            (delta / länge).clamp(0., 1.)
        }
    }

    /// Punkt nach `delta` zurückgelegter Strecke.
    #[must_use]
    pub fn point(&self, delta: f32) -> Vector {
        let t = self.parameter(delta);
        match self {
            // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
            #[allow(clippy::arithmetic_side_effects)]
            Placement::Line { start, end } => *start + (*end - *start) * t,
            Placement::Arc { centre, radius, start, sweep } => {
                let winkel = *start + *sweep * t;
                *centre + Vector::new(winkel.cos(), winkel.sin(), 0.) * *radius
            },
            Placement::Curve { curve, .. } => curve.point(t),
        }
    }

    /// Tangente (nicht normiert) nach `delta` zurückgelegter Strecke.
    #[must_use]
    pub fn tangent(&self, delta: f32) -> Vector {
        let t = self.parameter(delta);
        match self {
            Placement::Line { start, end } => *end - *start,
            Placement::Arc { start, sweep, .. } => {
                let winkel = *start + *sweep * t;
                let tangente = Vector::new(-winkel.sin(), winkel.cos(), 0.);
                if sweep.0 < 0. {
                    -tangente
                } else {
                    tangente
                }
            },
            Placement::Curve { curve, .. } => curve.derivative(t),
        }
    }

    /// Alle Kacheln, die der Weg berührt, in Fahrt-Reihenfolge.
    ///
    /// Es wird mit mindestens 8 Punkten pro Längeneinheit abgetastet,
    /// jeweils in der Mitte eines Abschnitts.
    #[must_use]
    pub fn tiles(&self) -> Vec<Position> {
        // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
        // Die Anzahl ist positiv und klein.
        #[allow(
            clippy::arithmetic_side_effects,
            clippy::as_conversions,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let abschnitte = {
            let anzahl = ((self.length() * 8.).ceil() as u16).max(8);
            anzahl.saturating_add(anzahl % 2)
        };
        let länge = self.length();
        (0..abschnitte)
            .map(|i| {
                // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
                #[allow(clippy::arithmetic_side_effects)]
                let delta = (f32::from(i) + 0.5) / f32::from(abschnitte) * länge;
                Position::containing(self.point(delta))
            })
            .dedup()
            .unique()
            .collect()
    }
}

/// Die Sicht eines Reisenden auf ein Gleis, ab dem Betreten bis zum Verlassen.
///
/// Ein Gleis selbst speichert keinen Zustand eines Reisenden,
/// alles nötige wird im [`TravelToken`] mitgeführt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelToken {
    /// Die Kachel, auf der das Gleis betreten wurde.
    pub position: Position,
    /// Die Richtung beim Betreten.
    pub direction: Direction,
    /// Der zurückgelegte Weg durch das Gleis.
    pub placement: Placement,
    /// Der gewählte Weg.
    pub route: Route,
    /// Anzahl möglicher Ausgänge aus dieser Richtung.
    pub num_exits: usize,
}

impl TravelToken {
    /// Erzeuge einen Token für einen eindeutigen Weg.
    #[must_use]
    pub fn through(position: Position, direction: Direction, placement: Placement) -> Self {
        TravelToken { position, direction, placement, route: Route::Through, num_exits: 1 }
    }

    /// Länge des Weges.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.placement.length()
    }

    /// Position und Ausrichtung nach `delta` zurückgelegter Strecke.
    #[must_use]
    pub fn transform(&self, delta: f32) -> Transform {
        Transform::from_tangent(self.placement.point(delta), self.placement.tangent(delta))
    }

    /// Steigung (Höhe pro horizontaler Strecke) nach `delta` zurückgelegter Strecke.
    #[must_use]
    pub fn gradient(&self, delta: f32) -> f32 {
        let tangente = self.placement.tangent(delta);
        let horizontal = tangente.horizontal_length();
        if horizontal <= f32::EPSILON {
            0.
        } else {
            // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
            #[allow(clippy::arithmetic_side_effects)]
            {
                tangente.z / horizontal
            }
        }
    }
}
