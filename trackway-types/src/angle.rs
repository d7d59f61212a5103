//! Winkel im Bogenmaß.

use std::{
    f32::consts,
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

/// τ = 2. * π, eine ganze Umdrehung.
pub const TAU: Angle = Angle(consts::TAU);

/// π, eine halbe Umdrehung.
pub const PI: Angle = Angle(consts::PI);

/// π / 2., eine viertel Umdrehung.
pub const FRAC_PI_2: Angle = Angle(consts::FRAC_PI_2);

/// 0
pub const ZERO: Angle = Angle(0.);

/// Winkel \[`Bogenmaß`\], gegen den Uhrzeigersinn gemessen.
///
/// Die [`PartialEq`]- und [`PartialOrd`]-Instanzen sind abgeleitet und normalisieren die Winkel NICHT,
/// bevor sie verglichen werden.
#[derive(Debug, PartialEq, Clone, Copy, PartialOrd, Default, Serialize, Deserialize)]
pub struct Angle(pub f32);

impl Angle {
    /// Erzeuge einen Winkel aus dem Gradmaß.
    #[must_use]
    pub fn degrees(grad: f32) -> Self {
        Angle(grad.to_radians())
    }

    /// Der Winkel im Gradmaß.
    #[must_use]
    pub fn to_degrees(self) -> f32 {
        self.0.to_degrees()
    }

    /// Winkel des Punktes `(x, y)` zur x-Achse.
    #[must_use]
    pub fn atan2(y: f32, x: f32) -> Self {
        Angle(y.atan2(x))
    }

    /// Absoluter Wert.
    #[must_use]
    pub fn abs(self) -> Self {
        Angle(self.0.abs())
    }

    /// Normalisiert in den äquivalenten Bereich zu [-π,π).
    #[must_use]
    pub fn normalized(mut self) -> Self {
        while self < -PI {
            self += TAU;
        }
        while self >= PI {
            self -= TAU;
        }
        self
    }

    /// Kosinus
    #[must_use]
    pub fn cos(self) -> f32 {
        self.0.cos()
    }

    /// Sinus
    #[must_use]
    pub fn sin(self) -> f32 {
        self.0.sin()
    }
}

impl AddAssign for Angle {
    fn add_assign(&mut self, rhs: Angle) {
        // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
        #[allow(clippy::arithmetic_side_effects)]
        {
            self.0 += rhs.0;
        }
    }
}

impl Add for Angle {
    type Output = Self;

    fn add(mut self, rhs: Angle) -> Self::Output {
        self += rhs;
        self
    }
}

impl SubAssign for Angle {
    fn sub_assign(&mut self, rhs: Angle) {
        // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
        #[allow(clippy::arithmetic_side_effects)]
        {
            self.0 -= rhs.0;
        }
    }
}

impl Sub for Angle {
    type Output = Self;

    fn sub(mut self, rhs: Angle) -> Self::Output {
        self -= rhs;
        self
    }
}

impl Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Angle(-self.0)
    }
}

impl Mul<f32> for Angle {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
        #[allow(clippy::arithmetic_side_effects)]
        Angle(self.0 * rhs)
    }
}
