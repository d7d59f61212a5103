//! Normierte Bewegungs-Richtungen mit ungefährem Vergleich.

use std::ops::Neg;

use serde::{Deserialize, Serialize};

use crate::{angle::Angle, heading::Heading, vector::Vector};

/// Toleranz für den Vergleich zweier [`Richtungen`](Direction).
pub const TOLERANCE: f32 = 0.001;

/// Normierter 3-dimensionaler Richtungs-Vektor.
///
/// Für Gleise auf dem Raster ist die Richtung eine der acht [`Headings`](Heading),
/// für allgemeine Spline-Gleise ein beliebiger Einheitsvektor.
///
/// Die [`PartialEq`]-Instanz vergleicht komponentenweise mit [`TOLERANCE`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Direction {
    /// x-Komponente.
    x: f32,
    /// y-Komponente.
    y: f32,
    /// z-Komponente (Höhe).
    z: f32,
}

impl Direction {
    /// Erzeuge eine neue, auf Länge 1 normierte Richtung.
    ///
    /// Der Null-Vektor wird zu `+x`.
    #[must_use]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        let vector = Vector { x, y, z };
        let länge = vector.length();
        if länge <= f32::EPSILON {
            Direction { x: 1., y: 0., z: 0. }
        } else {
            // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
            #[allow(clippy::arithmetic_side_effects)]
            Direction { x: x / länge, y: y / länge, z: z / länge }
        }
    }

    /// `+x`
    pub const X: Direction = Direction { x: 1., y: 0., z: 0. };

    /// `+y`
    pub const Y: Direction = Direction { x: 0., y: 1., z: 0. };

    /// x-Komponente.
    #[must_use]
    pub fn x(&self) -> f32 {
        self.x
    }

    /// y-Komponente.
    #[must_use]
    pub fn y(&self) -> f32 {
        self.y
    }

    /// z-Komponente.
    #[must_use]
    pub fn z(&self) -> f32 {
        self.z
    }

    /// Die Richtung als [`Vector`].
    #[must_use]
    pub fn vector(&self) -> Vector {
        Vector { x: self.x, y: self.y, z: self.z }
    }

    /// Winkel der Projektion auf die Ebene zur x-Achse.
    #[must_use]
    pub fn yaw(&self) -> Angle {
        Angle::atan2(self.y, self.x)
    }

    /// Die Kachel-Verschiebung eines Schrittes in diese Richtung.
    ///
    /// Für beliebige Richtungen wird die nächstgelegene [`Heading`] verwendet.
    #[must_use]
    pub fn tile_step(&self) -> (i32, i32) {
        Heading::from_direction(*self).unwrap_or_else(|| Heading::nearest(*self)).step()
    }

    /// Ist die Richtung (bis auf die Toleranz) eine der acht [`Headings`](Heading)?
    #[must_use]
    pub fn heading(&self) -> Option<Heading> {
        Heading::from_direction(*self)
    }
}

impl PartialEq for Direction {
    fn eq(&self, other: &Self) -> bool {
        // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
        #[allow(clippy::arithmetic_side_effects)]
        {
            (self.x - other.x).abs() < TOLERANCE
                && (self.y - other.y).abs() < TOLERANCE
                && (self.z - other.z).abs() < TOLERANCE
        }
    }
}

impl Neg for Direction {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Direction { x: -self.x, y: -self.y, z: -self.z }
    }
}

impl From<Heading> for Direction {
    fn from(heading: Heading) -> Self {
        heading.direction()
    }
}
