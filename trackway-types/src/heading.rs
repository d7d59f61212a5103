//! Die acht Himmelsrichtungen eines Kachel-Rasters (Achsen und Diagonalen).

use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};

use crate::{angle::Angle, direction::Direction, vector::Vector};

/// Eine der acht Achsen- oder Diagonal-Richtungen.
///
/// Die Reihenfolge der Varianten entspricht einer Drehung gegen den Uhrzeigersinn in 45°-Schritten,
/// beginnend bei `+x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Sequence, Serialize, Deserialize)]
pub enum Heading {
    /// `(1, 0)`
    PlusX,
    /// `(1, 1)`
    PlusXPlusY,
    /// `(0, 1)`
    PlusY,
    /// `(-1, 1)`
    MinusXPlusY,
    /// `(-1, 0)`
    MinusX,
    /// `(-1, -1)`
    MinusXMinusY,
    /// `(0, -1)`
    MinusY,
    /// `(1, -1)`
    PlusXMinusY,
}

/// Alle Varianten in Dreh-Reihenfolge.
const ALLE: [Heading; 8] = [
    Heading::PlusX,
    Heading::PlusXPlusY,
    Heading::PlusY,
    Heading::MinusXPlusY,
    Heading::MinusX,
    Heading::MinusXMinusY,
    Heading::MinusY,
    Heading::PlusXMinusY,
];

impl Heading {
    /// Index in [`ALLE`].
    fn index(self) -> usize {
        match self {
            Heading::PlusX => 0,
            Heading::PlusXPlusY => 1,
            Heading::PlusY => 2,
            Heading::MinusXPlusY => 3,
            Heading::MinusX => 4,
            Heading::MinusXMinusY => 5,
            Heading::MinusY => 6,
            Heading::PlusXMinusY => 7,
        }
    }

    /// Um `achtel` 45°-Schritte gegen den Uhrzeigersinn gedreht.
    #[must_use]
    pub fn rotated(self, achtel: i32) -> Self {
        // Ergebnis von rem_euclid liegt in 0..8.
        #[allow(clippy::as_conversions, clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let index = (self.index() as i32).saturating_add(achtel).rem_euclid(8) as usize;
        #[allow(clippy::indexing_slicing)]
        ALLE[index]
    }

    /// Um 90° gegen den Uhrzeigersinn gedreht.
    #[must_use]
    pub fn left(self) -> Self {
        self.rotated(2)
    }

    /// Um 90° im Uhrzeigersinn gedreht.
    #[must_use]
    pub fn right(self) -> Self {
        self.rotated(-2)
    }

    /// Die entgegengesetzte Richtung.
    #[must_use]
    pub fn reversed(self) -> Self {
        self.rotated(4)
    }

    /// Liegt die Richtung auf der x- oder y-Achse?
    #[must_use]
    pub fn is_orthogonal(self) -> bool {
        self.index() % 2 == 0
    }

    /// Verschiebung der Kachel-Koordinaten bei einem Schritt.
    #[must_use]
    pub fn step(self) -> (i32, i32) {
        match self {
            Heading::PlusX => (1, 0),
            Heading::PlusXPlusY => (1, 1),
            Heading::PlusY => (0, 1),
            Heading::MinusXPlusY => (-1, 1),
            Heading::MinusX => (-1, 0),
            Heading::MinusXMinusY => (-1, -1),
            Heading::MinusY => (0, -1),
            Heading::PlusXMinusY => (1, -1),
        }
    }

    /// Verschiebung eines Schrittes in Welt-Koordinaten.
    ///
    /// Für Diagonalen hat der Vektor die Länge `√2`.
    #[must_use]
    pub fn step_vector(self) -> Vector {
        let (x, y) = self.step();
        // Werte liegen in -1..=1.
        #[allow(clippy::as_conversions, clippy::cast_precision_loss)]
        Vector::new(x as f32, y as f32, 0.)
    }

    /// Einheitsvektor in dieser Richtung.
    #[must_use]
    pub fn direction(self) -> Direction {
        let (x, y) = self.step();
        // Werte liegen in -1..=1.
        #[allow(clippy::as_conversions, clippy::cast_precision_loss)]
        Direction::new(x as f32, y as f32, 0.)
    }

    /// Winkel zur x-Achse (gegen den Uhrzeigersinn).
    #[must_use]
    // Werte liegen in 0..=315.
    #[allow(clippy::as_conversions, clippy::cast_precision_loss)]
    pub fn angle(self) -> Angle {
        Angle::degrees(self.degrees_i32() as f32)
    }

    /// Winkel zur x-Achse in ganzen Grad.
    #[must_use]
    // index() < 8
    #[allow(clippy::as_conversions, clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn degrees_i32(self) -> i32 {
        (self.index() as i32).saturating_mul(45)
    }

    /// Die Richtung zu einem Winkel in ganzen Grad, falls dieser ein Vielfaches von 45° ist.
    #[must_use]
    // Ergebnis von rem_euclid liegt in 0..8.
    #[allow(clippy::as_conversions, clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn from_degrees(grad: i32) -> Option<Self> {
        (grad % 45 == 0).then(|| ALLE.get((grad / 45).rem_euclid(8) as usize).copied()).flatten()
    }

    /// Die Richtung, deren Schritt die Vorzeichen von `(dx, dy)` hat.
    ///
    /// Für `(0, 0)` gibt es keine Richtung.
    #[must_use]
    pub fn from_step(dx: i32, dy: i32) -> Option<Self> {
        let schritt = (dx.signum(), dy.signum());
        ALLE.into_iter().find(|heading| heading.step() == schritt)
    }

    /// Die Richtung, die (bis auf die Toleranz von [`Direction`]) mit `direction` übereinstimmt.
    #[must_use]
    pub fn from_direction(direction: Direction) -> Option<Self> {
        ALLE.into_iter().find(|heading| heading.direction() == direction)
    }

    /// Die nächstgelegene Richtung zu `direction`, ignoriert die z-Komponente.
    #[must_use]
    pub fn nearest(direction: Direction) -> Self {
        let grad = direction.yaw().to_degrees().round();
        // Winkel liegen in [-180, 180].
        #[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
        let achtel = (grad / 45.).round() as i32;
        Heading::PlusX.rotated(achtel)
    }
}
