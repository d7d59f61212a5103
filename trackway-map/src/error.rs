//! Fehler beim Bearbeiten einer Karte.

use thiserror::Error;

use trackway_id::UnknownId;
use trackway_segment::TrackError;
use trackway_types::position::Position;

/// Fehler beim Bearbeiten einer [`Map`](crate::Map).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MapError {
    /// Die Kachel liegt außerhalb der Karte.
    #[error("Kachel {0} liegt außerhalb der Karte!")]
    OutOfBounds(Position),
    /// Auf der Kachel liegt kein Gleis.
    #[error("Auf Kachel {0} liegt kein Gleis!")]
    NoTrack(Position),
    /// Auf der Kachel liegt bereits ein Gleis.
    #[error("Auf Kachel {0} liegt bereits ein Gleis!")]
    Occupied(Position),
    /// Das Gelände der Kachel passt nicht zum Gleis.
    #[error("Das Gelände bei {0} ist nicht eben!")]
    NotLevel(Position),
    /// Das Gelände unter einem Gleis darf nicht verändert werden.
    #[error("Das Gelände bei {0} ist durch ein Gleis gesperrt!")]
    TerrainConflict(Position),
    /// Fehler eines Gleises.
    #[error(transparent)]
    Track(#[from] TrackError),
    /// Ein Gleis existiert nicht mehr.
    #[error(transparent)]
    UnknownSegment(#[from] UnknownId),
}
