//! Platzierung eines Objektes in Welt-Koordinaten.

use serde::{Deserialize, Serialize};

use crate::{
    angle::{Angle, PI},
    vector::Vector,
};

/// Position und Ausrichtung in Welt-Koordinaten.
///
/// Zuerst wird um die y-Achse geneigt (`pitch`, positiv bergauf),
/// dann um die z-Achse gedreht (`yaw`), zuletzt verschoben.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    /// Verschiebung des Mittelpunkts.
    pub translation: Vector,
    /// Drehung um die z-Achse, gegen den Uhrzeigersinn ab der x-Achse.
    pub yaw: Angle,
    /// Neigung gegenüber der Ebene.
    pub pitch: Angle,
}

impl Transform {
    /// Erzeuge eine [`Transform`] aus einem Punkt und der Tangente in diesem Punkt.
    #[must_use]
    pub fn from_tangent(translation: Vector, tangente: Vector) -> Self {
        let horizontal = tangente.horizontal_length();
        Transform {
            translation,
            yaw: Angle::atan2(tangente.y, tangente.x),
            pitch: Angle::atan2(tangente.z, horizontal),
        }
    }

    /// Die selbe Position, aber in die Gegenrichtung ausgerichtet.
    #[must_use]
    pub fn turned_around(self) -> Self {
        Transform {
            translation: self.translation,
            yaw: (self.yaw + PI).normalized(),
            pitch: -self.pitch,
        }
    }
}
