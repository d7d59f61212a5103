//! Kubische Bezier-Kurven.

use serde::{Deserialize, Serialize};

use trackway_types::vector::Vector;

/// Anzahl Sehnen für die Approximation der Bogenlänge.
const SEHNEN: u16 = 100;

/// Eine kubische Bezier-Kurve mit vier Kontrollpunkten.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BezierCurve {
    /// Die Kontrollpunkte, beginnend beim Startpunkt.
    pub points: [Vector; 4],
}

impl BezierCurve {
    /// Erzeuge eine neue Kurve aus Start, zwei Kontrollpunkten und Ende.
    #[must_use]
    pub const fn new(start: Vector, kontrolle0: Vector, kontrolle1: Vector, ende: Vector) -> Self {
        BezierCurve { points: [start, kontrolle0, kontrolle1, ende] }
    }

    /// Punkt der Kurve zum Parameter `t ∈ [0, 1]`.
    #[must_use]
    pub fn point(&self, t: f32) -> Vector {
        let [p0, p1, p2, p3] = self.points;
        // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
        #[allow(clippy::arithmetic_side_effects)]
        {
            let s = 1. - t;
            p0 * (s * s * s) + p1 * (3. * s * s * t) + p2 * (3. * s * t * t) + p3 * (t * t * t)
        }
    }

    /// Ableitung (Tangente, nicht normiert) der Kurve zum Parameter `t ∈ [0, 1]`.
    #[must_use]
    pub fn derivative(&self, t: f32) -> Vector {
        let [p0, p1, p2, p3] = self.points;
        // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
        #[allow(clippy::arithmetic_side_effects)]
        {
            let s = 1. - t;
            (p1 - p0) * (3. * s * s) + (p2 - p1) * (6. * s * t) + (p3 - p2) * (3. * t * t)
        }
    }

    /// Approximierte Bogenlänge als Summe von [`SEHNEN`] Sehnen-Längen.
    #[must_use]
    pub fn length(&self) -> f32 {
        let mut länge = 0.;
        let mut letzter = self.point(0.);
        for i in 1..=SEHNEN {
            let punkt = self.point(f32::from(i) / f32::from(SEHNEN));
            länge += letzter.distance(&punkt);
            letzter = punkt;
        }
        länge
    }

    /// Punkt der Kurve, seitlich um `abstand` verschoben (positiv links der Fahrtrichtung).
    ///
    /// Die Verschiebung erfolgt in der xy-Ebene senkrecht zur Tangente.
    #[must_use]
    pub fn offset(&self, t: f32, abstand: f32) -> Vector {
        let tangente = self.derivative(t);
        let horizontal = tangente.horizontal_length();
        if horizontal <= f32::EPSILON {
            return self.point(t);
        }
        // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
        #[allow(clippy::arithmetic_side_effects)]
        let normale = Vector { x: -tangente.y / horizontal, y: tangente.x / horizontal, z: 0. };
        self.point(t) + normale * abstand
    }

    /// Die selbe Kurve in entgegengesetzter Richtung.
    #[must_use]
    pub fn reversed(self) -> Self {
        let [p0, p1, p2, p3] = self.points;
        BezierCurve { points: [p3, p2, p1, p0] }
    }
}
