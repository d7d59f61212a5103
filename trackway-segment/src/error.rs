//! Fehler bei der Abfrage eines Gleises.

use thiserror::Error;

use trackway_types::{direction::Direction, position::Position};

/// Fehler bei der Abfrage oder Konstruktion eines Gleises.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TrackError {
    /// Das Gleis kann in dieser Richtung nicht befahren werden.
    #[error("{kind} bei {position} kann nicht in Richtung {direction:?} befahren werden!")]
    InvalidDirection {
        /// Art des Gleises.
        kind: &'static str,
        /// Die angefragte Kachel.
        position: Position,
        /// Die angefragte Richtung.
        direction: Direction,
    },
    /// Die Parameter beschreiben kein gültiges Gleis.
    #[error("Ungültige Parameter für {kind}: {reason}")]
    InvalidShape {
        /// Art des Gleises.
        kind: &'static str,
        /// Beschreibung des Problems.
        reason: &'static str,
    },
}
