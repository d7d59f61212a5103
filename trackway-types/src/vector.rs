//! Vektoren über [`f32`] mit allen Funktionen für einen 3-dimensionalen Vektorraum.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::angle::Angle;

/// Vektoren über [`f32`] mit allen Funktionen für einen 3-dimensionalen Vektorraum.
///
/// Addition zwischen Vektoren formen einen abelsche Gruppe
/// mit dem [`null_vector`](Vector::null_vector) als neutrales Element.
///
/// Multiplikation mit einem Skalar befolgt Distributivgesetzte mit der Addition von Vektoren.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    /// x-Koordinate des Vektors.
    pub x: f32,
    /// y-Koordinate des Vektors.
    pub y: f32,
    /// z-Koordinate (Höhe) des Vektors.
    pub z: f32,
}

impl Vector {
    /// Nullvektor.
    ///
    /// - additiv neutrales Element.
    /// - Resultat einer Multiplikation mit `0.`.
    #[must_use]
    pub const fn null_vector() -> Self {
        Vector { x: 0., y: 0., z: 0. }
    }

    /// Erzeuge einen neuen Vektor.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vector { x, y, z }
    }

    /// Skalarprodukt zweier Vektoren.
    ///
    /// Insbesondere gilt `self.length() == self.dot(self).sqrt()`
    #[must_use]
    pub fn dot(&self, other: &Self) -> f32 {
        // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
        #[allow(clippy::arithmetic_side_effects)]
        {
            self.x * other.x + self.y * other.y + self.z * other.z
        }
    }

    /// Länge eines Vektors (euklidische Metrik).
    #[must_use]
    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Länge der Projektion auf die xy-Ebene.
    #[must_use]
    pub fn horizontal_length(&self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Abstand zweier Punkte.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f32 {
        (*other - *self).length()
    }

    /// Einheitsvektor mit identischer Richtung.
    ///
    /// Erzeugt [NaN](f32::NAN)-Werte, wenn die Methode auf einen Vektor mit Länge `0` angewendet wird.
    #[must_use]
    pub fn normalized(self) -> Self {
        // Wie f32: Schlimmstenfalls wird ein NaN-Wert erzeugt.
        #[allow(clippy::arithmetic_side_effects)]
        {
            self / self.length()
        }
    }

    /// Erzeuge einen Vektor, der um `winkel` gegen den Uhrzeigersinn um die z-Achse rotiert ist.
    #[must_use]
    pub fn rotated_z(self, winkel: Angle) -> Self {
        let Vector { x, y, z } = self;
        let cos = winkel.cos();
        let sin = winkel.sin();
        // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
        #[allow(clippy::arithmetic_side_effects)]
        Vector { x: cos * x - sin * y, y: sin * x + cos * y, z }
    }
}

// Ein Vektor-Raum ist eine (additive) abelsche Gruppe
// Halbgruppe
impl AddAssign<&Self> for Vector {
    fn add_assign(&mut self, rhs: &Self) {
        // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
        #[allow(clippy::arithmetic_side_effects)]
        {
            self.x += rhs.x;
            self.y += rhs.y;
            self.z += rhs.z;
        }
    }
}

impl AddAssign<Self> for Vector {
    fn add_assign(&mut self, rhs: Self) {
        *self += &rhs;
    }
}

impl<T> Add<T> for Vector
where
    Vector: AddAssign<T>,
{
    type Output = Self;

    fn add(mut self, rhs: T) -> Self::Output {
        self += rhs;
        self
    }
}

// inverses Element
impl Neg for Vector {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Vector { x: -self.x, y: -self.y, z: -self.z }
    }
}

impl SubAssign<Self> for Vector {
    fn sub_assign(&mut self, rhs: Self) {
        // Addition des inversen über [Neg::neg].
        #[allow(clippy::suspicious_op_assign_impl)]
        {
            *self += rhs.neg();
        }
    }
}

impl SubAssign<&Self> for Vector {
    fn sub_assign(&mut self, rhs: &Self) {
        *self -= *rhs;
    }
}

impl<T> Sub<T> for Vector
where
    Vector: SubAssign<T>,
{
    type Output = Self;

    fn sub(mut self, rhs: T) -> Self::Output {
        self -= rhs;
        self
    }
}

// Multiplikation/Division mit Skalar
impl MulAssign<f32> for Vector {
    fn mul_assign(&mut self, rhs: f32) {
        // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
        #[allow(clippy::arithmetic_side_effects)]
        {
            self.x *= rhs;
            self.y *= rhs;
            self.z *= rhs;
        }
    }
}

impl Mul<f32> for Vector {
    type Output = Self;

    fn mul(mut self, rhs: f32) -> Self::Output {
        self *= rhs;
        self
    }
}

impl Mul<Vector> for f32 {
    type Output = Vector;

    fn mul(self, rhs: Vector) -> Self::Output {
        rhs * self
    }
}

impl DivAssign<f32> for Vector {
    fn div_assign(&mut self, rhs: f32) {
        // Wie f32: Schlimmstenfalls wird ein NaN-Wert erzeugt.
        #[allow(clippy::arithmetic_side_effects)]
        {
            self.x /= rhs;
            self.y /= rhs;
            self.z /= rhs;
        }
    }
}

impl Div<f32> for Vector {
    type Output = Self;

    fn div(mut self, rhs: f32) -> Self::Output {
        self /= rhs;
        self
    }
}
