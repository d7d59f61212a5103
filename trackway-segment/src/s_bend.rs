//! S-Kurve zum seitlichen Versatz.

use serde::{Deserialize, Serialize};

use trackway_types::{
    connection::Connection, direction::Direction, heading::Heading, position::Position,
};

use crate::{
    bezier::BezierCurve,
    error::TrackError,
    token::{Placement, TravelToken},
};

pub(crate) const NAME: &str = "S-Kurve";

/// Eine S-Kurve entlang einer Achse.
///
/// Sie belegt `straight_len` Kacheln in Richtung `axis` und endet `offset` Kacheln
/// seitlich versetzt (positiv nach links).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SBend {
    axis: Heading,
    straight_len: i32,
    offset: i32,
}

impl SBend {
    /// Erzeuge eine neue S-Kurve.
    ///
    /// ## Errors
    ///
    /// Die Achse ist keine der vier Achsen-Richtungen, die Länge kleiner als 2,
    /// oder es gibt keinen Versatz.
    pub fn new(axis: Heading, straight_len: i32, offset: i32) -> Result<Self, TrackError> {
        let ungültig = |reason| TrackError::InvalidShape { kind: NAME, reason };
        if !axis.is_orthogonal() {
            return Err(ungültig("S-Kurven liegen entlang einer Achse"));
        }
        if straight_len < 2 {
            return Err(ungültig("S-Kurven sind mindestens 2 Kacheln lang"));
        }
        if offset == 0 {
            return Err(ungültig("S-Kurven ohne Versatz sind Geraden"));
        }
        Ok(SBend { axis, straight_len, offset })
    }

    /// Die Fahrtrichtung ab dem Ursprung.
    #[must_use]
    pub fn axis(&self) -> Heading {
        self.axis
    }

    /// Länge in Richtung der Achse, in Kacheln.
    #[must_use]
    pub fn straight_len(&self) -> i32 {
        self.straight_len
    }

    /// Seitlicher Versatz, positiv nach links.
    #[must_use]
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Das andere Ende.
    #[must_use]
    pub fn far_end(&self, origin: Position) -> Position {
        origin
            .stepped(self.axis, self.straight_len.saturating_sub(1))
            .stepped(self.axis.left(), self.offset)
    }

    pub(crate) fn kurve(&self, origin: Position, height: f32) -> BezierCurve {
        let a = self.axis.step_vector();
        let start = origin.centre(height) - a * 0.5;
        let ende = self.far_end(origin).centre(height) + a * 0.5;
        // Die Länge ist klein genug, um exakt als f32 dargestellt zu werden.
        #[allow(clippy::as_conversions, clippy::cast_precision_loss)]
        let halb = self.straight_len as f32 * 0.5;
        BezierCurve::new(start, start + a * halb, ende - a * halb, ende)
    }

    fn vorwärts(&self, direction: Direction) -> Option<bool> {
        let heading = Heading::from_direction(direction)?;
        if heading == self.axis {
            Some(true)
        } else if heading == self.axis.reversed() {
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
        match self.vorwärts(token.direction) {
            Some(true) => Ok(Connection::step(self.far_end(origin), self.axis)),
            Some(false) => Ok(Connection::step(origin, self.axis.reversed())),
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
