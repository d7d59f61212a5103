//! Weiche mit gerader und abzweigender Fahrbahn.

use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use trackway_types::{
    connection::Connection, direction::Direction, heading::Heading, position::Position,
    vector::Vector,
};

use crate::{
    bezier::BezierCurve,
    error::TrackError,
    token::{Placement, Route, TravelToken},
};

pub(crate) const NAME: &str = "Weiche";

/// Länge der geraden Fahrbahn, in Kacheln.
pub const LENGTH: i32 = 3;

/// Stellung einer Weiche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PointsState {
    /// Geradeaus.
    #[default]
    NotTaken,
    /// Abzweigend.
    Taken,
}

/// Reihenfolge der Stellungen für [`Points::next_state`].
const REIHENFOLGE: [PointsState; 2] = [PointsState::NotTaken, PointsState::Taken];

/// Eine Weiche entlang einer Achse.
///
/// Die Spitze liegt am Ursprung, die gerade Fahrbahn endet
/// [`LENGTH`]` - 1` Kacheln weiter, die abzweigende Fahrbahn eine Kachel seitlich daneben.
/// Ohne Spiegelung zweigt die Weiche nach links ab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Points {
    axis: Heading,
    reflected: bool,
    /// Die Stellung wird nicht gespeichert, geladene Weichen stehen auf [`PointsState::NotTaken`].
    #[serde(skip)]
    state: PointsState,
}

/// Länge der abzweigenden Fahrbahn für jede Kombination aus Achse und Spiegelung.
static KURVEN_LÄNGEN: Lazy<[f32; 8]> = Lazy::new(|| {
    let mut längen = [0.; 8];
    for (index, länge) in längen.iter_mut().enumerate() {
        // index < 8
        #[allow(clippy::as_conversions, clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let axis = Heading::PlusX.rotated((index / 2 * 2) as i32);
        let points = Points { axis, reflected: index % 2 == 1, state: PointsState::NotTaken };
        *länge = points.kurve(Position::ORIGIN, 0.).length();
    }
    längen
});

impl Points {
    /// Erzeuge eine neue Weiche in Stellung [`PointsState::NotTaken`].
    ///
    /// ## Errors
    ///
    /// Die Achse ist keine der vier Achsen-Richtungen.
    pub fn new(axis: Heading, reflected: bool) -> Result<Self, TrackError> {
        if !axis.is_orthogonal() {
            return Err(TrackError::InvalidShape {
                kind: NAME,
                reason: "Weichen liegen entlang einer Achse",
            });
        }
        Ok(Points { axis, reflected, state: PointsState::NotTaken })
    }

    /// Die Fahrtrichtung ab der Spitze.
    #[must_use]
    pub fn axis(&self) -> Heading {
        self.axis
    }

    /// Zweigt die Weiche nach rechts ab?
    #[must_use]
    pub fn reflected(&self) -> bool {
        self.reflected
    }

    /// Die aktuelle Stellung.
    #[must_use]
    pub fn state(&self) -> PointsState {
        self.state
    }

    /// Richtung der Abzweigung.
    fn seitlich(&self) -> Heading {
        if self.reflected {
            self.axis.right()
        } else {
            self.axis.left()
        }
    }

    /// Ende der geraden Fahrbahn.
    #[must_use]
    pub fn straight_endpoint(&self, origin: Position) -> Position {
        origin.stepped(self.axis, LENGTH.saturating_sub(1))
    }

    /// Ende der abzweigenden Fahrbahn.
    #[must_use]
    pub fn displaced_endpoint(&self, origin: Position) -> Position {
        self.straight_endpoint(origin).stepped(self.seitlich(), 1)
    }

    /// Die abzweigende Fahrbahn, ab der Spitze.
    fn kurve(&self, origin: Position, height: f32) -> BezierCurve {
        let mitte = origin.centre(height);
        let a = self.axis.step_vector();
        let l = self.seitlich().step_vector();
        let punkt = |entlang: f32, quer: f32| -> Vector { mitte + a * entlang + l * quer };
        BezierCurve::new(punkt(-0.5, 0.), punkt(1., 0.), punkt(1., 1.), punkt(2.5, 1.))
    }

    /// Index in [`KURVEN_LÄNGEN`].
    fn längen_index(&self) -> usize {
        // degrees_i32 ist ein Vielfaches von 90 in 0..360.
        #[allow(clippy::as_conversions, clippy::cast_sign_loss)]
        let achse = (self.axis.degrees_i32() / 90) as usize;
        achse.saturating_mul(2).saturating_add(usize::from(self.reflected))
    }

    /// Länge der abzweigenden Fahrbahn.
    #[must_use]
    pub fn curve_length(&self) -> f32 {
        KURVEN_LÄNGEN.get(self.längen_index()).copied().unwrap_or_default()
    }

    fn abzweigend(&self, origin: Position, height: f32) -> Placement {
        Placement::Curve { curve: self.kurve(origin, height), length: self.curve_length() }
    }

    fn gerade(&self, origin: Position, height: f32) -> Placement {
        let mitte = origin.centre(height);
        let a = self.axis.step_vector();
        Placement::Line { start: mitte - a * 0.5, end: mitte + a * 2.5 }
    }

    pub(crate) fn accepts(&self, direction: Direction) -> bool {
        Heading::from_direction(direction)
            .is_some_and(|heading| heading == self.axis || heading == self.axis.reversed())
    }

    pub(crate) fn token(
        &self,
        origin: Position,
        height: f32,
        position: Position,
        direction: Direction,
    ) -> Result<TravelToken, TrackError> {
        let ungültig = TrackError::InvalidDirection { kind: NAME, position, direction };
        let heading = Heading::from_direction(direction).ok_or(ungültig)?;
        if heading == self.axis {
            if position != origin {
                return Err(ungültig);
            }
            let (placement, route) = match self.state {
                PointsState::NotTaken => (self.gerade(origin, height), Route::Through),
                PointsState::Taken => (self.abzweigend(origin, height), Route::Diverging),
            };
            Ok(TravelToken { position, direction, placement, route, num_exits: 2 })
        } else if heading == self.axis.reversed() {
            let placement = if position == self.straight_endpoint(origin) {
                match self.gerade(origin, height) {
                    Placement::Line { start, end } => Placement::Line { start: end, end: start },
                    placement => placement,
                }
            } else if position == self.displaced_endpoint(origin) {
                Placement::Curve {
                    curve: self.kurve(origin, height).reversed(),
                    length: self.curve_length(),
                }
            } else {
                return Err(ungültig);
            };
            Ok(TravelToken::through(position, direction, placement))
        } else {
            Err(ungültig)
        }
    }

    pub(crate) fn next_position(
        &self,
        origin: Position,
        token: &TravelToken,
    ) -> Result<Connection, TrackError> {
        let heading = Heading::from_direction(token.direction).ok_or(TrackError::InvalidDirection {
            kind: NAME,
            position: token.position,
            direction: token.direction,
        })?;
        if heading == self.axis {
            let ende = match token.route {
                Route::Through => self.straight_endpoint(origin),
                Route::Diverging => self.displaced_endpoint(origin),
            };
            Ok(Connection::step(ende, self.axis))
        } else if heading == self.axis.reversed() {
            Ok(Connection::step(origin, heading))
        } else {
            Err(TrackError::InvalidDirection {
                kind: NAME,
                position: token.position,
                direction: token.direction,
            })
        }
    }

    pub(crate) fn endpoints(&self, origin: Position) -> Vec<Position> {
        vec![origin, self.straight_endpoint(origin), self.displaced_endpoint(origin)]
    }

    pub(crate) fn placements(&self, origin: Position, height: f32) -> [Placement; 2] {
        [self.gerade(origin, height), self.abzweigend(origin, height)]
    }

    /// Stelle die Weiche um einen Schritt in `richtung` (±1) der Reihenfolge weiter.
    ///
    /// Bei gespiegelten Weichen ist die Reihenfolge umgekehrt.
    fn schalten(&mut self, richtung: isize) {
        let richtung = if self.reflected { richtung.saturating_neg() } else { richtung };
        let aktuell = REIHENFOLGE.iter().position(|state| *state == self.state).unwrap_or(0);
        // Die Länge von REIHENFOLGE passt in isize.
        #[allow(clippy::as_conversions, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
        let neu = (aktuell as isize).saturating_add(richtung).rem_euclid(REIHENFOLGE.len() as isize)
            as usize;
        let vorher = self.state;
        self.state = REIHENFOLGE.get(neu).copied().unwrap_or_default();
        debug!("Weiche {:?} (gespiegelt: {}) {vorher:?} -> {:?}", self.axis, self.reflected, self.state);
    }

    /// Stelle die Weiche auf die nächste Stellung.
    pub fn next_state(&mut self) {
        self.schalten(1);
    }

    /// Stelle die Weiche auf die vorherige Stellung.
    pub fn prev_state(&mut self) {
        self.schalten(-1);
    }
}
