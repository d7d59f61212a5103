//! Steigung über zwei Kacheln.

use serde::{Deserialize, Serialize};

use trackway_types::{
    connection::Connection, direction::Direction, heading::Heading, position::Position,
    vector::Vector,
};

use crate::{
    bezier::BezierCurve,
    error::TrackError,
    token::{Placement, TravelToken},
};

pub(crate) const NAME: &str = "Steigung";

/// Anteil der horizontalen Strecke, um den die Kontrollpunkte verschoben werden.
const KONTROLLE: f32 = 2. / 3.;

/// Eine Steigung, zwei Kacheln lang.
///
/// In Richtung `axis` steigt das Gleis um `2 * slope_at`.
/// `slope_before` und `slope_after` sind die Steigungen der angrenzenden Gleise,
/// die Kurve geht tangential in diese über.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slope {
    axis: Heading,
    slope_at: f32,
    slope_before: f32,
    slope_after: f32,
}

impl Slope {
    /// Erzeuge eine neue Steigung.
    ///
    /// ## Errors
    ///
    /// Die Achse ist keine der vier Achsen-Richtungen, oder eine Steigung ist nicht endlich.
    pub fn new(
        axis: Heading,
        slope_at: f32,
        slope_before: f32,
        slope_after: f32,
    ) -> Result<Self, TrackError> {
        if !axis.is_orthogonal() {
            return Err(TrackError::InvalidShape {
                kind: NAME,
                reason: "Steigungen liegen entlang einer Achse",
            });
        }
        if [slope_at, slope_before, slope_after].iter().any(|steigung| !steigung.is_finite()) {
            return Err(TrackError::InvalidShape { kind: NAME, reason: "Steigung ist nicht endlich" });
        }
        Ok(Slope { axis, slope_at, slope_before, slope_after })
    }

    /// Richtung, in die das Gleis ansteigt.
    #[must_use]
    pub fn axis(&self) -> Heading {
        self.axis
    }

    /// Steigung pro Kachel.
    #[must_use]
    pub fn slope_at(&self) -> f32 {
        self.slope_at
    }

    /// Steigung des vorherigen Gleises.
    #[must_use]
    pub fn slope_before(&self) -> f32 {
        self.slope_before
    }

    /// Steigung des folgenden Gleises.
    #[must_use]
    pub fn slope_after(&self) -> f32 {
        self.slope_after
    }

    /// Höhen-Unterschied zwischen beiden Enden.
    #[must_use]
    pub fn rise(&self) -> f32 {
        // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
        #[allow(clippy::arithmetic_side_effects)]
        {
            2. * self.slope_at
        }
    }

    /// Die Kurve in Richtung `axis`.
    pub(crate) fn kurve(&self, origin: Position, height: f32) -> BezierCurve {
        let a = self.axis.step_vector();
        let oben = Vector::new(0., 0., 1.);
        let start = origin.centre(height) - a * 0.5;
        let ende = origin.centre(height) + a * 1.5 + oben * self.rise();
        // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
        #[allow(clippy::arithmetic_side_effects)]
        BezierCurve::new(
            start,
            start + a * KONTROLLE + oben * (KONTROLLE * self.slope_before),
            ende - a * KONTROLLE - oben * (KONTROLLE * self.slope_after),
            ende,
        )
    }

    fn bergauf(&self, direction: Direction) -> Option<bool> {
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
        self.bergauf(direction).is_some()
    }

    pub(crate) fn token(
        &self,
        origin: Position,
        height: f32,
        position: Position,
        direction: Direction,
    ) -> Result<TravelToken, TrackError> {
        let bergauf = self.bergauf(direction).ok_or(TrackError::InvalidDirection {
            kind: NAME,
            position,
            direction,
        })?;
        let kurve = self.kurve(origin, height);
        let kurve = if bergauf { kurve } else { kurve.reversed() };
        Ok(TravelToken::through(position, direction, Placement::curve(kurve)))
    }

    pub(crate) fn next_position(
        &self,
        origin: Position,
        token: &TravelToken,
    ) -> Result<Connection, TrackError> {
        match self.bergauf(token.direction) {
            Some(true) => Ok(Connection::step(origin.stepped(self.axis, 1), self.axis)),
            Some(false) => Ok(Connection::step(origin, self.axis.reversed())),
            None => Err(TrackError::InvalidDirection {
                kind: NAME,
                position: token.position,
                direction: token.direction,
            }),
        }
    }

    pub(crate) fn endpoints(&self, origin: Position) -> Vec<Position> {
        vec![origin, origin.stepped(self.axis, 1)]
    }
}
