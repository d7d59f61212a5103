//! Verbindung zwischen zwei Gleisen.

use serde::{Deserialize, Serialize};

use crate::{direction::Direction, heading::Heading, position::Position};

/// Wo und in welche Richtung ein Reisender ein Gleis verlässt,
/// bzw. das nächste Gleis betritt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Die Kachel.
    pub position: Position,
    /// Die Bewegungs-Richtung.
    pub direction: Direction,
}

impl Connection {
    /// Erzeuge eine neue [`Connection`].
    #[must_use]
    pub fn new(position: Position, direction: impl Into<Direction>) -> Self {
        Connection { position, direction: direction.into() }
    }

    /// Die Verbindung eine Kachel hinter `self`, in umgekehrter Richtung.
    ///
    /// Wird verwendet, um beim Rückwärts-Fahren über eine Gleis-Grenze zu wechseln.
    #[must_use]
    pub fn reversed_behind(&self) -> Self {
        let (dx, dy) = self.direction.tile_step();
        Connection {
            position: self.position.offset(dx.saturating_neg(), dy.saturating_neg()),
            direction: -self.direction,
        }
    }

    /// Die Verbindung, die ein Gleis in Richtung `heading` eine Kachel weiter verlässt.
    #[must_use]
    pub fn step(position: Position, heading: Heading) -> Self {
        Connection { position: position.stepped(heading, 1), direction: heading.direction() }
    }
}
