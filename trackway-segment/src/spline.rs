//! Allgemeines Gleis zwischen zwei beliebigen Kacheln.

use serde::{Deserialize, Serialize};

use trackway_types::{connection::Connection, direction::Direction, position::Position, vector::Vector};

use crate::{
    bezier::BezierCurve,
    error::TrackError,
    token::{Placement, TravelToken},
};

pub(crate) const NAME: &str = "Spline";

/// Eine Bezier-Kurve vom Ursprung zur Kachel `origin + delta`.
///
/// Am Ursprung wird in Richtung `entry` eingefahren, am anderen Ende in Richtung `exit` verlassen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spline {
    delta: Position,
    entry: Direction,
    exit: Direction,
}

/// Verschiebung eines Kachel-Schrittes in Richtung `direction`, in Welt-Koordinaten.
fn schritt(direction: Direction) -> Vector {
    let (x, y) = direction.tile_step();
    // Werte liegen in -1..=1.
    #[allow(clippy::as_conversions, clippy::cast_precision_loss)]
    Vector::new(x as f32, y as f32, 0.)
}

impl Spline {
    /// Erzeuge ein neues Spline-Gleis.
    ///
    /// ## Errors
    ///
    /// Start und Ende liegen auf der selben Kachel.
    pub fn new(
        delta: Position,
        entry: impl Into<Direction>,
        exit: impl Into<Direction>,
    ) -> Result<Self, TrackError> {
        if delta == Position::ORIGIN {
            return Err(TrackError::InvalidShape {
                kind: NAME,
                reason: "Start und Ende liegen auf der selben Kachel",
            });
        }
        Ok(Spline { delta, entry: entry.into(), exit: exit.into() })
    }

    /// Verschiebung vom Ursprung zum anderen Ende.
    #[must_use]
    pub fn delta(&self) -> Position {
        self.delta
    }

    /// Fahrtrichtung beim Einfahren am Ursprung.
    #[must_use]
    pub fn entry(&self) -> Direction {
        self.entry
    }

    /// Fahrtrichtung beim Verlassen am anderen Ende.
    #[must_use]
    pub fn exit(&self) -> Direction {
        self.exit
    }

    /// Das andere Ende.
    #[must_use]
    pub fn far_end(&self, origin: Position) -> Position {
        origin + self.delta
    }

    pub(crate) fn kurve(&self, origin: Position, height: f32) -> BezierCurve {
        let start = origin.centre(height) - schritt(self.entry) * 0.5;
        let ende = self.far_end(origin).centre(height) + schritt(self.exit) * 0.5;
        // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
        #[allow(clippy::arithmetic_side_effects)]
        let drittel = start.distance(&ende) / 3.;
        BezierCurve::new(
            start,
            start + self.entry.vector() * drittel,
            ende - self.exit.vector() * drittel,
            ende,
        )
    }

    fn vorwärts(&self, direction: Direction) -> Option<bool> {
        if direction == self.entry {
            Some(true)
        } else if direction == -self.exit {
            Some(false)
        } else {
            None
        }
    }

    pub(crate) fn accepts(&self, direction: Direction) -> bool {
        self.vorwärts(direction).is_some()
    }

    pub(crate) fn token(
        &self,
        origin: Position,
        height: f32,
        position: Position,
        direction: Direction,
    ) -> Result<TravelToken, TrackError> {
        let vorwärts = self.vorwärts(direction).ok_or(TrackError::InvalidDirection {
            kind: NAME,
            position,
            direction,
        })?;
        let kurve = self.kurve(origin, height);
        let kurve = if vorwärts { kurve } else { kurve.reversed() };
        Ok(TravelToken::through(position, direction, Placement::curve(kurve)))
    }

    pub(crate) fn next_position(
        &self,
        origin: Position,
        token: &TravelToken,
    ) -> Result<Connection, TrackError> {
        let step = |position: Position, direction: Direction| {
            let (dx, dy) = direction.tile_step();
            Connection { position: position.offset(dx, dy), direction }
        };
        match self.vorwärts(token.direction) {
            Some(true) => Ok(step(self.far_end(origin), self.exit)),
            Some(false) => Ok(step(origin, -self.entry)),
            None => Err(TrackError::InvalidDirection {
                kind: NAME,
                position: token.position,
                direction: token.direction,
            }),
        }
    }

    pub(crate) fn endpoints(&self, origin: Position) -> Vec<Position> {
        vec![origin, self.far_end(origin)]
    }
}
