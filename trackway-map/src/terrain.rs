//! Höhen-Karte des Geländes.
//!
//! Höhen werden an den Ecken der Kacheln gespeichert,
//! eine Karte mit `w × d` Kacheln hat also `(w + 1) × (d + 1)` Ecken.
//! Ecke `(cx, cy)` liegt in Welt-Koordinaten bei `(cx - 0.5, cy - 0.5)`.

use serde::{Deserialize, Serialize};

use trackway_types::{heading::Heading, position::Position};

/// Versatz der vier Ecken einer Kachel, gegen den Uhrzeigersinn ab links unten.
const ECKEN: [(i32, i32); 4] = [(0, 0), (1, 0), (1, 1), (0, 1)];

/// Höhen-Karte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    width: u16,
    depth: u16,
    heights: Vec<f32>,
}

impl Terrain {
    /// Ebenes Gelände auf Höhe 0.
    #[must_use]
    pub fn flat(width: u16, depth: u16) -> Self {
        let anzahl = usize::from(width)
            .saturating_add(1)
            .saturating_mul(usize::from(depth).saturating_add(1));
        Terrain { width, depth, heights: vec![0.; anzahl] }
    }

    /// Breite und Tiefe in Kacheln.
    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.depth)
    }

    /// Passen die gespeicherten Höhen zur Größe?
    pub(crate) fn is_consistent(&self) -> bool {
        let anzahl = usize::from(self.width)
            .saturating_add(1)
            .saturating_mul(usize::from(self.depth).saturating_add(1));
        self.heights.len() == anzahl
    }

    fn corner_index(&self, cx: i32, cy: i32) -> Option<usize> {
        let cx = usize::try_from(cx).ok().filter(|cx| *cx <= usize::from(self.width))?;
        let cy = usize::try_from(cy).ok().filter(|cy| *cy <= usize::from(self.depth))?;
        Some(cy.saturating_mul(usize::from(self.width).saturating_add(1)).saturating_add(cx))
    }

    /// Höhe der Ecke `(cx, cy)`.
    #[must_use]
    pub fn corner(&self, cx: i32, cy: i32) -> Option<f32> {
        self.corner_index(cx, cy).and_then(|index| self.heights.get(index)).copied()
    }

    fn corner_mut(&mut self, cx: i32, cy: i32) -> Option<&mut f32> {
        self.corner_index(cx, cy).and_then(|index| self.heights.get_mut(index))
    }

    /// Die Ecken einer Kachel, gegen den Uhrzeigersinn ab links unten.
    pub(crate) fn corner_positions(position: Position) -> [(i32, i32); 4] {
        ECKEN.map(|(dx, dy)| (position.x.saturating_add(dx), position.y.saturating_add(dy)))
    }

    /// Die Höhen der Ecken einer Kachel, gegen den Uhrzeigersinn ab links unten.
    #[must_use]
    pub fn corners(&self, position: Position) -> Option<[f32; 4]> {
        let [a, b, c, d] = Terrain::corner_positions(position);
        Some([
            self.corner(a.0, a.1)?,
            self.corner(b.0, b.1)?,
            self.corner(c.0, c.1)?,
            self.corner(d.0, d.1)?,
        ])
    }

    /// Haben alle Ecken der Kachel die selbe Höhe?
    #[must_use]
    pub fn is_level(&self, position: Position) -> bool {
        self.corners(position).is_some_and(|[a, b, c, d]| {
            // Ecken werden nur gesetzt, nicht berechnet.
            #[allow(clippy::float_cmp)]
            {
                a == b && b == c && c == d
            }
        })
    }

    /// Niedrigste Höhe der Kachel.
    #[must_use]
    pub fn tile_height(&self, position: Position) -> Option<f32> {
        self.corners(position).map(|ecken| ecken.into_iter().fold(f32::INFINITY, f32::min))
    }

    /// Steigung der Kachel in Richtung `heading` (Höhe pro Strecke).
    ///
    /// Außerhalb der Karte ist das Gelände eben.
    #[must_use]
    pub fn slope_at(&self, position: Position, heading: Heading) -> f32 {
        let Some(ecken) = self.corners(position) else {
            return 0.;
        };
        let (sx, sy) = heading.step();
        let mut vorne = (0., 0_u8);
        let mut hinten = (0., 0_u8);
        for ((dx, dy), höhe) in ECKEN.into_iter().zip(ecken) {
            // Ecken-Versatz relativ zur Kachel-Mitte, verdoppelt: -1 oder 1.
            let richtung = (dx.saturating_mul(2).saturating_sub(1))
                .saturating_mul(sx)
                .saturating_add((dy.saturating_mul(2).saturating_sub(1)).saturating_mul(sy));
            // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
            #[allow(clippy::arithmetic_side_effects)]
            if richtung > 0 {
                vorne = (vorne.0 + höhe, vorne.1.saturating_add(1));
            } else if richtung < 0 {
                hinten = (hinten.0 + höhe, hinten.1.saturating_add(1));
            }
        }
        if vorne.1 == 0 || hinten.1 == 0 {
            return 0.;
        }
        // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
        #[allow(clippy::arithmetic_side_effects)]
        {
            (vorne.0 / f32::from(vorne.1) - hinten.0 / f32::from(hinten.1))
                / heading.step_vector().length()
        }
    }

    /// Steigung der Kachel vor `position` (entgegen `heading`).
    #[must_use]
    pub fn slope_before(&self, position: Position, heading: Heading) -> f32 {
        self.slope_at(position.stepped(heading, -1), heading)
    }

    /// Steigung der Kachel nach `position` (in Richtung `heading`).
    #[must_use]
    pub fn slope_after(&self, position: Position, heading: Heading) -> f32 {
        self.slope_at(position.stepped(heading, 1), heading)
    }

    /// Verändere die Höhe aller Ecken einer Kachel um `betrag`.
    pub(crate) fn raise(&mut self, position: Position, betrag: f32) {
        for (cx, cy) in Terrain::corner_positions(position) {
            if let Some(höhe) = self.corner_mut(cx, cy) {
                // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
                #[allow(clippy::arithmetic_side_effects)]
                {
                    *höhe += betrag;
                }
            }
        }
    }

    /// Setze alle Ecken einer Kachel auf ihre niedrigste Höhe.
    pub(crate) fn level(&mut self, position: Position) {
        let Some(ziel) = self.tile_height(position) else {
            return;
        };
        for (cx, cy) in Terrain::corner_positions(position) {
            if let Some(höhe) = self.corner_mut(cx, cy) {
                *höhe = ziel;
            }
        }
    }

    /// Setze die Höhe einer einzelnen Ecke.
    pub(crate) fn set_corner(&mut self, cx: i32, cy: i32, höhe: f32) -> bool {
        self.corner_mut(cx, cy).map(|ecke| *ecke = höhe).is_some()
    }
}
