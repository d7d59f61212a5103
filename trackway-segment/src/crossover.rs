//! Kreuzung zweier Geraden auf einer Kachel.

use serde::{Deserialize, Serialize};

use trackway_types::{
    connection::Connection, direction::Direction, heading::Heading, position::Position,
};

use crate::{
    error::TrackError,
    token::{Placement, TravelToken},
};

pub(crate) const NAME: &str = "Kreuzung";

/// Kreuzung einer Geraden in x-Richtung mit einer Geraden in y-Richtung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Crossover;

impl Crossover {
    pub(crate) fn accepts(direction: Direction) -> Option<Heading> {
        Heading::from_direction(direction).filter(|heading| heading.is_orthogonal())
    }

    pub(crate) fn token(
        origin: Position,
        height: f32,
        position: Position,
        direction: Direction,
    ) -> Result<TravelToken, TrackError> {
        let heading = Crossover::accepts(direction).ok_or(TrackError::InvalidDirection {
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
        origin: Position,
        token: &TravelToken,
    ) -> Result<Connection, TrackError> {
        let heading = Crossover::accepts(token.direction).ok_or(TrackError::InvalidDirection {
            kind: NAME,
            position: token.position,
            direction: token.direction,
        })?;
        Ok(Connection::step(origin, heading))
    }
}
