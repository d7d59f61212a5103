//! Gleise zeichnen und mit vorhandenen Gleisen zusammenführen.

use enum_iterator::all;
use log::{debug, warn};

use trackway_segment::{
    curved::Curved, s_bend::SBend, slope::Slope, spline::Spline, straight::Straight, Merge,
    Segment, Shape,
};
use trackway_types::{
    connection::Connection, direction::Direction, heading::Heading, position::Position,
};

use crate::{
    error::MapError,
    map::{Map, SegmentId},
};

/// Toleranz beim Vergleich von Gelände-Steigungen.
const STEIGUNG_TOLERANZ: f32 = 0.001;

/// Die vier Achsen-Richtungen.
const ACHSEN: [Heading; 4] = [Heading::PlusX, Heading::PlusY, Heading::MinusX, Heading::MinusY];

/// Ergebnis von [`Map::merge_exit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Das Gleis hatte bereits einen passenden Ausgang.
    Unchanged,
    /// Das Gleis wurde durch ein neues Gleis ersetzt.
    Replaced(SegmentId),
    /// Eine Zusammenführung ist nicht möglich, die Karte ist unverändert.
    Rejected,
}

/// Ergebnis beim Zeichnen eines Gleises.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceOutcome {
    /// Neue oder ersetzte Gleise.
    Placed(Vec<SegmentId>),
    /// Alle Gleise waren bereits vorhanden.
    Unchanged,
    /// Auf der Kachel liegt ein Gleis, mit dem nicht zusammengeführt werden kann.
    MergeRejected(Position),
    /// Das Gleis passt nicht auf die Karte.
    Rejected(MapError),
}

impl From<Result<SegmentId, MapError>> for PlaceOutcome {
    fn from(ergebnis: Result<SegmentId, MapError>) -> Self {
        match ergebnis {
            Ok(id) => PlaceOutcome::Placed(vec![id]),
            Err(fehler) => {
                warn!("Gleis kann nicht platziert werden: {fehler}");
                PlaceOutcome::Rejected(fehler)
            },
        }
    }
}

/// Kann `alt` vollständig durch `neu` ersetzt werden?
///
/// Geraden entlang der Achse einer Weiche gehen in dieser auf.
fn subsumable(alt: &Segment, neu: &Segment) -> bool {
    match (alt.shape(), neu.shape()) {
        (Shape::Straight(gerade), Shape::Points(weiche)) => {
            gerade.axis() == Straight::new(weiche.axis()).axis()
        },
        _ => false,
    }
}

/// Die Hauptrichtung einer Verschiebung.
fn dominant(dx: i32, dy: i32) -> Option<Heading> {
    if dx.unsigned_abs() >= dy.unsigned_abs() {
        Heading::from_step(dx, 0)
    } else {
        Heading::from_step(0, dy)
    }
}

impl Map {
    /// Prüfe, dass das Gelände unter `segment` eben und auf Höhe des Ursprungs ist.
    fn check_level(&self, segment: &Segment) -> Result<(), MapError> {
        let origin = segment.origin();
        let höhe = self.terrain.tile_height(origin).ok_or(MapError::OutOfBounds(origin))?;
        for position in segment.footprint() {
            let eben = self.terrain.is_level(position)
                && self
                    .terrain
                    .tile_height(position)
                    .is_some_and(|h| (h - höhe).abs() < STEIGUNG_TOLERANZ);
            if !eben {
                return Err(MapError::NotLevel(position));
            }
        }
        Ok(())
    }

    /// Lege ein neues Gleis mit Ursprung `origin` auf freie, ebene Kacheln.
    pub fn place(&mut self, origin: Position, shape: impl Into<Shape>) -> PlaceOutcome {
        let segment = Segment::placed(shape, origin, 0.);
        let ergebnis = self
            .check_free(&segment, &[])
            .and_then(|()| self.check_level(&segment))
            .and_then(|()| self.set_track_at(origin, segment));
        ergebnis.into()
    }

    /// Füge dem Gleis auf Kachel `anchor` einen Ausgang auf Kachel `at` in Richtung `direction` hinzu.
    ///
    /// Muss das Gleis dafür ersetzt werden, müssen alle neu belegten Kacheln frei und eben sein,
    /// oder eine Gerade entlang der Achse der neuen Weiche enthalten.
    ///
    /// ## Errors
    ///
    /// Auf `anchor` liegt kein Gleis, oder das neue Gleis passt nicht auf die Karte.
    pub fn merge_exit(
        &mut self,
        anchor: Position,
        at: Position,
        direction: Direction,
    ) -> Result<MergeOutcome, MapError> {
        let id = self.track_id_at(anchor).ok_or(MapError::NoTrack(anchor))?;
        let segment = *self.track_at(anchor)?;
        let neu = match segment.merge_exit(at, direction) {
            Merge::Unchanged => return Ok(MergeOutcome::Unchanged),
            Merge::Rejected => {
                warn!(
                    "{} bei {} kann keinen Ausgang bei {at} in Richtung {direction:?} bekommen.",
                    segment.kind(),
                    segment.origin()
                );
                return Ok(MergeOutcome::Rejected);
            },
            Merge::Replace(neu) => neu,
        };
        let mut ersetzt = vec![id];
        for position in neu.footprint() {
            if !self.contains(position) {
                return Err(MapError::OutOfBounds(position));
            }
            match self.track_id_at(position) {
                Some(andere) if ersetzt.contains(&andere) => {},
                Some(andere) => match self.segment(andere) {
                    Some(alt) if subsumable(alt, &neu) => ersetzt.push(andere),
                    _ => return Err(MapError::Occupied(position)),
                },
                None => {},
            }
        }
        self.check_level(&neu)?;
        let mut entfernt = Vec::new();
        for alt in ersetzt {
            entfernt.push(self.erase_segment(alt, anchor)?);
        }
        match self.set_track_at(neu.origin(), neu) {
            Ok(neu_id) => {
                debug!("{} Gleise durch {} ersetzt.", entfernt.len(), neu.kind());
                Ok(MergeOutcome::Replaced(neu_id))
            },
            Err(fehler) => {
                for alt in entfernt {
                    let _ = self.set_track_at(alt.origin(), alt)?;
                }
                Err(fehler)
            },
        }
    }

    /// Richtung, in der ein vorhandenes Gleis die Kachel `position` erreicht.
    ///
    /// Das Gleis der Nachbar-Kachel muss von einem seiner Enden aus
    /// bei `position` in Richtung `heading` verlassen werden.
    fn infer_entry(&self, position: Position) -> Option<Heading> {
        all::<Heading>().find(|heading| {
            let nachbar = position.stepped(*heading, -1);
            let ziel = Connection::step(nachbar, *heading);
            self.track_at(nachbar).is_ok_and(|segment| {
                let enden = segment.endpoints();
                enden.contains(&nachbar)
                    && enden.iter().any(|eingang| {
                        all::<Heading>().any(|richtung| {
                            segment
                                .travel_token(*eingang, richtung.direction())
                                .and_then(|token| segment.next_position(&token))
                                .is_ok_and(|connection| connection == ziel)
                        })
                    })
            })
        })
    }

    /// Richtung, in der ein vorhandenes Gleis von Kachel `position` aus befahren werden kann.
    fn infer_exit(&self, position: Position) -> Option<Heading> {
        all::<Heading>().find(|heading| {
            let nachbar = position.stepped(*heading, 1);
            self.track_at(nachbar).is_ok_and(|segment| {
                segment.endpoints().contains(&nachbar)
                    && segment.travel_token(nachbar, heading.direction()).is_ok()
            })
        })
    }

    /// Zeichne ein Gleis von Kachel `begin` zu Kachel `end`.
    ///
    /// - Beginnt der Strich auf einer Geraden und endet am abzweigenden Ende einer möglichen Weiche,
    ///   wird die Gerade zur Weiche.
    /// - Liegen beide Kacheln auf einer Achse (mit `modifier` auch auf einer Diagonalen)
    ///   entsteht eine Reihe von Geraden, vorhandene Gleise werden zusammengeführt.
    /// - Bei gleichem Abstand in x- und y-Richtung entsteht eine 90°-Kurve.
    /// - Sonst entsteht eine S-Kurve, falls Ein- und Ausfahrt parallel zu einer Achse sind,
    ///   ansonsten (oder mit `modifier`) ein Spline.
    ///
    /// Ein- und Ausfahrt-Richtung werden aus angrenzenden Gleisen bestimmt.
    pub fn draw_track(&mut self, begin: Position, end: Position, modifier: bool) -> PlaceOutcome {
        for position in [begin, end] {
            if !self.contains(position) {
                warn!("Gleis kann nicht gezeichnet werden: {position} liegt außerhalb der Karte.");
                return PlaceOutcome::Rejected(MapError::OutOfBounds(position));
            }
        }
        if let Some(ergebnis) = self.draw_branch(begin, end) {
            return ergebnis;
        }
        let delta = end - begin;
        let (dx, dy) = (delta.x, delta.y);
        let entlang = if dx == 0 || dy == 0 || (modifier && dx.abs() == dy.abs()) {
            Heading::from_step(dx, dy)
                .or_else(|| self.infer_entry(begin).filter(|heading| heading.is_orthogonal()))
                .or(Some(Heading::PlusX))
        } else {
            None
        };
        if let Some(heading) = entlang {
            let anzahl = dx.abs().max(dy.abs());
            return self.straight_run(begin, heading, anzahl);
        }
        let entry = self.infer_entry(begin);
        let shape: Result<Shape, _> = if !modifier && dx.abs() == dy.abs() {
            let sx = Heading::from_step(dx, 0).unwrap_or(Heading::PlusX);
            let sy = Heading::from_step(0, dy).unwrap_or(Heading::PlusY);
            let (h, l) = if entry == Some(sy) { (sy, sx) } else { (sx, sy) };
            Curved::new(h.degrees_i32(), l.degrees_i32(), dx.abs().saturating_add(1))
                .map(Shape::from)
        } else {
            let entry = entry.or_else(|| dominant(dx, dy)).unwrap_or(Heading::PlusX);
            let exit = self.infer_exit(end).unwrap_or(entry);
            let (sx, sy) = entry.step();
            let (lx, ly) = entry.left().step();
            let vorwärts = dx.saturating_mul(sx).saturating_add(dy.saturating_mul(sy));
            let seitlich = dx.saturating_mul(lx).saturating_add(dy.saturating_mul(ly));
            if !modifier && entry.is_orthogonal() && entry == exit && vorwärts >= 1 {
                SBend::new(entry, vorwärts.saturating_add(1), seitlich).map(Shape::from)
            } else {
                Spline::new(delta, entry, exit).map(Shape::from)
            }
        };
        match shape {
            Ok(shape) => self.place(begin, shape),
            Err(fehler) => {
                warn!("Gleis kann nicht gezeichnet werden: {fehler}");
                PlaceOutcome::Rejected(fehler.into())
            },
        }
    }

    /// Mache aus der Geraden bei `begin` eine Weiche, deren abzweigendes Ende bei `end` liegt.
    ///
    /// [`None`], falls es keine passende Weiche gibt.
    fn draw_branch(&mut self, begin: Position, end: Position) -> Option<PlaceOutcome> {
        if begin == end {
            return None;
        }
        let segment = *self.track_at(begin).ok()?;
        if !matches!(segment.shape(), Shape::Straight(_)) {
            return None;
        }
        let mut letzter_fehler = None;
        for heading in ACHSEN {
            if !matches!(segment.merge_exit(end, heading.direction()), Merge::Replace(_)) {
                continue;
            }
            match self.merge_exit(begin, end, heading.direction()) {
                Ok(MergeOutcome::Replaced(id)) => return Some(PlaceOutcome::Placed(vec![id])),
                Ok(MergeOutcome::Unchanged) => return Some(PlaceOutcome::Unchanged),
                Ok(MergeOutcome::Rejected) => {},
                Err(fehler) => letzter_fehler = Some(fehler),
            }
        }
        letzter_fehler.map(|fehler| {
            warn!("Weiche bei {begin} kann nicht platziert werden: {fehler}");
            PlaceOutcome::Rejected(fehler)
        })
    }

    /// Zeichne `anzahl + 1` Geraden ab `begin` in Richtung `heading`.
    ///
    /// Entweder werden alle Geraden platziert bzw. zusammengeführt, oder keine.
    fn straight_run(&mut self, begin: Position, heading: Heading, anzahl: i32) -> PlaceOutcome {
        let direction = heading.direction();
        let Some(höhe) = self.terrain.tile_height(begin) else {
            return PlaceOutcome::Rejected(MapError::OutOfBounds(begin));
        };
        let mut neu = Vec::new();
        let mut zusammenführen = Vec::new();
        for position in (0..=anzahl).map(|i| begin.stepped(heading, i)) {
            match self.track_at(position) {
                Ok(segment) => match segment.merge_exit(position, direction) {
                    Merge::Unchanged => {},
                    Merge::Replace(_) => zusammenführen.push(position),
                    Merge::Rejected => {
                        warn!(
                            "{} bei {position} kann nicht mit einer Geraden zusammengeführt werden.",
                            segment.kind()
                        );
                        return PlaceOutcome::MergeRejected(position);
                    },
                },
                Err(_) => {
                    let eben = self.terrain.is_level(position)
                        && self
                            .terrain
                            .tile_height(position)
                            .is_some_and(|h| (h - höhe).abs() < STEIGUNG_TOLERANZ);
                    if !eben {
                        warn!("Gerade kann nicht platziert werden: {position} ist nicht eben.");
                        return PlaceOutcome::Rejected(MapError::NotLevel(position));
                    }
                    neu.push(position);
                },
            }
        }
        let mut ids = Vec::new();
        for position in zusammenführen {
            match self.merge_exit(position, position, direction) {
                Ok(MergeOutcome::Replaced(id)) => ids.push(id),
                Ok(MergeOutcome::Unchanged | MergeOutcome::Rejected) => {},
                Err(fehler) => return PlaceOutcome::Rejected(fehler),
            }
        }
        for position in neu {
            match self.set_track_at(position, Segment::new(Straight::new(heading))) {
                Ok(id) => ids.push(id),
                Err(fehler) => return PlaceOutcome::Rejected(fehler),
            }
        }
        if ids.is_empty() {
            PlaceOutcome::Unchanged
        } else {
            PlaceOutcome::Placed(ids)
        }
    }

    /// Zeichne eine Steigung ab Kachel `at` in Richtung `heading`, passend zum Gelände.
    ///
    /// Beide Kacheln müssen in Richtung `heading` gleich stark geneigt und seitlich eben sein.
    /// Die Enden folgen den Steigungen der angrenzenden Kacheln.
    pub fn draw_slope(&mut self, at: Position, heading: Heading) -> PlaceOutcome {
        let (origin, axis) = if self.slope_at(at, heading) >= 0. {
            (at, heading)
        } else {
            (at.stepped(heading, 1), heading.reversed())
        };
        let steigung = self.slope_at(origin, axis);
        for position in [origin, origin.stepped(axis, 1)] {
            if !self.contains(position) {
                return PlaceOutcome::Rejected(MapError::OutOfBounds(position));
            }
            let passend = (self.slope_at(position, axis) - steigung).abs() < STEIGUNG_TOLERANZ
                && self.slope_at(position, axis.left()).abs() < STEIGUNG_TOLERANZ;
            if !passend {
                warn!("Steigung kann nicht platziert werden: Gelände bei {position} passt nicht.");
                return PlaceOutcome::Rejected(MapError::NotLevel(position));
            }
        }
        let vorher = self.slope_before(origin, axis);
        let nachher = self.slope_after(origin.stepped(axis, 1), axis);
        let slope = match Slope::new(axis, steigung, vorher, nachher) {
            Ok(slope) => slope,
            Err(fehler) => {
                warn!("Steigung kann nicht platziert werden: {fehler}");
                return PlaceOutcome::Rejected(fehler.into());
            },
        };
        let segment = Segment::placed(slope, origin, 0.);
        self.check_free(&segment, &[]).and_then(|()| self.set_track_at(origin, segment)).into()
    }
}
