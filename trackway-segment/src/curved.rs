//! Viertelkreis-Kurve.

use std::f32::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use trackway_types::{
    angle::Angle, connection::Connection, direction::Direction, heading::Heading,
    position::Position,
};

use crate::{
    error::TrackError,
    token::{Placement, TravelToken},
};

pub(crate) const NAME: &str = "Kurve";

/// Eine 90°-Kurve, die einen `radius × radius` großen Kachel-Block belegt.
///
/// Der geometrische Radius beträgt `radius - 0.5`, sodass Start und Ende
/// jeweils in der Mitte einer Kachel-Kante liegen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Curved {
    start_angle: i32,
    end_angle: i32,
    radius: i32,
}

impl Curved {
    /// Erzeuge eine neue Kurve.
    ///
    /// `start_angle` ist die Fahrtrichtung beim Einfahren am Ursprung (Vielfaches von 90°),
    /// `end_angle` die Fahrtrichtung beim Verlassen (`start_angle ± 90°`).
    ///
    /// ## Errors
    ///
    /// Die Winkel passen nicht zum Raster, oder der Radius ist kleiner als 1.
    pub fn new(start_angle: i32, end_angle: i32, radius: i32) -> Result<Self, TrackError> {
        let ungültig = |reason| TrackError::InvalidShape { kind: NAME, reason };
        if radius < 1 {
            return Err(ungültig("Radius muss mindestens 1 sein"));
        }
        if start_angle.rem_euclid(90) != 0 {
            return Err(ungültig("Start-Winkel muss ein Vielfaches von 90° sein"));
        }
        let differenz = end_angle.saturating_sub(start_angle).rem_euclid(360);
        if differenz != 90 && differenz != 270 {
            return Err(ungültig("Kurven drehen um genau 90°"));
        }
        Ok(Curved {
            start_angle: start_angle.rem_euclid(360),
            end_angle: end_angle.rem_euclid(360),
            radius,
        })
    }

    /// Fahrtrichtung beim Einfahren am Ursprung, in Grad.
    #[must_use]
    pub fn start_angle(&self) -> i32 {
        self.start_angle
    }

    /// Fahrtrichtung beim Verlassen am anderen Ende, in Grad.
    #[must_use]
    pub fn end_angle(&self) -> i32 {
        self.end_angle
    }

    /// Radius in Kacheln.
    #[must_use]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Geometrischer Radius.
    #[must_use]
    // Radien sind klein genug, um exakt als f32 dargestellt zu werden.
    #[allow(clippy::as_conversions, clippy::cast_precision_loss)]
    pub fn geometric_radius(&self) -> f32 {
        self.radius as f32 - 0.5
    }

    /// Gegen den Uhrzeigersinn (+1) oder im Uhrzeigersinn (-1)?
    fn drehung(&self) -> i32 {
        if self.end_angle.saturating_sub(self.start_angle).rem_euclid(360) == 90 {
            1
        } else {
            -1
        }
    }

    /// Fahrtrichtung am Ursprung.
    fn einfahrt(&self) -> Heading {
        Heading::from_degrees(self.start_angle).unwrap_or(Heading::PlusX)
    }

    /// Fahrtrichtung am Ursprung.
    #[must_use]
    pub fn entry_direction(&self) -> Direction {
        self.einfahrt().direction()
    }

    /// Richtung vom Ursprung zum Mittelpunkt, gleichzeitig die Fahrtrichtung am anderen Ende.
    fn seitlich(&self) -> Heading {
        self.einfahrt().rotated(self.drehung().saturating_mul(2))
    }

    /// Die Kachel am anderen Ende.
    pub(crate) fn exit_tile(&self, origin: Position) -> Position {
        let schritte = self.radius.saturating_sub(1);
        origin.stepped(self.einfahrt(), schritte).stepped(self.seitlich(), schritte)
    }

    /// Vorwärts (ab Ursprung) oder Rückwärts (ab dem anderen Ende)?
    fn vorwärts(&self, direction: Direction) -> Option<bool> {
        let heading = Heading::from_direction(direction)?;
        if heading == self.einfahrt() {
            Some(true)
        } else if heading == self.seitlich().reversed() {
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
        let einfahrt = self.einfahrt();
        let seitlich = self.seitlich();
        let radius = self.geometric_radius();
        let start = origin.centre(height) - einfahrt.step_vector() * 0.5;
        let centre = start + seitlich.step_vector() * radius;
        // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
        #[allow(
            clippy::arithmetic_side_effects,
            clippy::as_conversions,
            clippy::cast_precision_loss
        )]
        let viertel = Angle(FRAC_PI_2 * self.drehung() as f32);
        let placement = if vorwärts {
            Placement::Arc { centre, radius, start: seitlich.reversed().angle(), sweep: viertel }
        } else {
            Placement::Arc { centre, radius, start: einfahrt.angle(), sweep: -viertel }
        };
        Ok(TravelToken::through(position, direction, placement))
    }

    pub(crate) fn next_position(
        &self,
        origin: Position,
        token: &TravelToken,
    ) -> Result<Connection, TrackError> {
        match self.vorwärts(token.direction) {
            Some(true) => Ok(Connection::step(self.exit_tile(origin), self.seitlich())),
            Some(false) => Ok(Connection::step(origin, self.einfahrt().reversed())),
            None => Err(TrackError::InvalidDirection {
                kind: NAME,
                position: token.position,
                direction: token.direction,
            }),
        }
    }

    /// Länge der Kurve.
    #[must_use]
    pub fn length(&self) -> f32 {
        // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
        #[allow(clippy::arithmetic_side_effects)]
        {
            FRAC_PI_2 * self.geometric_radius()
        }
    }
}
