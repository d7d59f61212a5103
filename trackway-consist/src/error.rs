//! Fehler beim Bewegen eines Zuges.

use thiserror::Error;

use trackway_map::MapError;
use trackway_segment::TrackError;
use trackway_types::{direction::Direction, position::Position};

/// Fehler beim Bewegen eines [`Train`](crate::Train).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MoveError {
    /// Der Zug hat eine Kachel ohne Gleis erreicht.
    #[error("Zug ist bei {position} in Richtung {direction:?} entgleist!")]
    RanOffTrack {
        /// Die Kachel ohne Gleis.
        position: Position,
        /// Die Bewegungs-Richtung.
        direction: Direction,
    },
    /// Die Strecke ist keine endliche Zahl.
    #[error("Ungültige Strecke: {0}")]
    InvalidDistance(f32),
    /// Ein Gleis kann nicht in der gewünschten Richtung befahren werden.
    #[error(transparent)]
    Track(#[from] TrackError),
    /// Fehler beim Zugriff auf die Karte.
    #[error(transparent)]
    Map(#[from] MapError),
}
