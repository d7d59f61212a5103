//! Ganzzahlige Koordinaten einer Kachel.

use std::{
    fmt::{self, Display, Formatter},
    ops::{Add, Neg, Sub},
};

use serde::{Deserialize, Serialize};

use crate::{heading::Heading, vector::Vector};

/// Ganzzahlige Koordinate einer Kachel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// x-Koordinate.
    pub x: i32,
    /// y-Koordinate.
    pub y: i32,
}

impl Position {
    /// Erzeuge eine neue [`Position`].
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Der Ursprung `(0, 0)`.
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    /// Die um `(dx, dy)` verschobene Position.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Position { x: self.x.saturating_add(dx), y: self.y.saturating_add(dy) }
    }

    /// Die um `anzahl` Schritte in Richtung `heading` verschobene Position.
    #[must_use]
    pub fn stepped(self, heading: Heading, anzahl: i32) -> Self {
        let (dx, dy) = heading.step();
        self.offset(dx.saturating_mul(anzahl), dy.saturating_mul(anzahl))
    }

    /// Mittelpunkt der Kachel in Welt-Koordinaten, auf Höhe `z`.
    #[must_use]
    // Kachel-Koordinaten sind klein genug, um exakt als f32 dargestellt zu werden.
    #[allow(clippy::as_conversions, clippy::cast_precision_loss)]
    pub fn centre(self, z: f32) -> Vector {
        Vector { x: self.x as f32, y: self.y as f32, z }
    }

    /// Die Kachel, die einen Punkt in Welt-Koordinaten enthält.
    #[must_use]
    // Gerundete Welt-Koordinaten liegen im i32-Bereich.
    #[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
    pub fn containing(punkt: Vector) -> Self {
        Position { x: punkt.x.round() as i32, y: punkt.y.round() as i32 }
    }
}

impl Add for Position {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.offset(rhs.x, rhs.y)
    }
}

impl Sub for Position {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Position { x: self.x.saturating_sub(rhs.x), y: self.y.saturating_sub(rhs.y) }
    }
}

impl Neg for Position {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Position { x: self.x.saturating_neg(), y: self.y.saturating_neg() }
    }
}

impl Display for Position {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.x, self.y)
    }
}
