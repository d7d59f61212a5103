//! Gerade, eine Kachel lang.

use serde::{Deserialize, Serialize};

use trackway_types::{
    connection::Connection, direction::Direction, heading::Heading, position::Position,
};

use crate::{
    crossover::Crossover,
    error::TrackError,
    points::{Points, LENGTH},
    segment::Shape,
    token::{Placement, TravelToken},
};

/// Name für Fehlermeldungen.
pub(crate) const NAME: &str = "Gerade";

/// Eine Gerade entlang einer Achse oder Diagonalen.
///
/// Die Achse wird normalisiert, sodass `+x` und `-x` die selbe Gerade beschreiben.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Straight {
    axis: Heading,
}

impl Straight {
    /// Erzeuge eine neue Gerade.
    #[must_use]
    pub fn new(axis: Heading) -> Self {
        let axis = match axis {
            Heading::MinusX | Heading::MinusY | Heading::MinusXMinusY | Heading::MinusXPlusY => {
                axis.reversed()
            },
            _ => axis,
        };
        Straight { axis }
    }

    /// Die (normalisierte) Achse.
    #[must_use]
    pub fn axis(&self) -> Heading {
        self.axis
    }

    /// Verläuft die Gerade diagonal?
    #[must_use]
    pub fn is_diagonal(&self) -> bool {
        !self.axis.is_orthogonal()
    }

    pub(crate) fn accepts(&self, direction: Direction) -> Option<Heading> {
        Heading::from_direction(direction)
            .filter(|heading| *heading == self.axis || *heading == self.axis.reversed())
    }

    pub(crate) fn token(
        &self,
        origin: Position,
        height: f32,
        position: Position,
        direction: Direction,
    ) -> Result<TravelToken, TrackError> {
        let heading = self.accepts(direction).ok_or(TrackError::InvalidDirection {
            kind: NAME,
            position,
            direction,
        })?;
        let halber_schritt = heading.step_vector() * 0.5;
        let mitte = origin.centre(height);
        let placement = Placement::Line { start: mitte - halber_schritt, end: mitte + halber_schritt };
        Ok(TravelToken::through(position, direction, placement))
    }

    pub(crate) fn next_position(
        &self,
        origin: Position,
        token: &TravelToken,
    ) -> Result<Connection, TrackError> {
        let heading = self.accepts(token.direction).ok_or(TrackError::InvalidDirection {
            kind: NAME,
            position: token.position,
            direction: token.direction,
        })?;
        Ok(Connection::step(origin, heading))
    }

    /// Neue Form und ihr Ursprung, falls die Gerade bei `origin` einen Ausgang
    /// auf Kachel `at` in Richtung `direction` bekommen kann.
    pub(crate) fn merge(
        &self,
        origin: Position,
        at: Position,
        direction: Direction,
    ) -> Option<(Shape, Position)> {
        if self.is_diagonal() {
            return None;
        }
        let heading = Heading::from_direction(direction).filter(|heading| heading.is_orthogonal())?;
        let entlang = heading == self.axis || heading == self.axis.reversed();
        if at == origin {
            return (!entlang).then_some((Shape::Crossover(Crossover), origin));
        }
        if !entlang {
            return None;
        }
        let weiche = |reflected| Points::new(heading, reflected).ok().map(Shape::Points);
        let weiter = LENGTH.saturating_sub(1);
        for (seitlich, reflected) in [(heading.left(), false), (heading.right(), true)] {
            // Die Gerade liegt an der Spitze.
            if at == origin.stepped(heading, weiter).stepped(seitlich, 1) {
                return weiche(reflected).map(|shape| (shape, origin));
            }
            // Die Gerade liegt am geraden Ende.
            if at == origin.stepped(seitlich, 1) {
                let spitze = origin.stepped(heading, weiter.saturating_neg());
                return weiche(reflected).map(|shape| (shape, spitze));
            }
        }
        None
    }
}
