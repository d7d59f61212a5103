//! Kachel-Tabelle mit Gleisen, Gelände und Bahnhöfen.

use std::collections::BTreeSet;

use itertools::Itertools;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use trackway_id::{Arena, Id, Released};
use trackway_segment::Segment;
use trackway_types::{connection::Connection, heading::Heading, position::Position};

use crate::{error::MapError, terrain::Terrain};

/// Identifiziert ein Gleis auf einer [`Map`].
pub type SegmentId = Id<Segment>;

/// Ein Bahnhof aus mehreren Bahnsteig-Kacheln.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    /// Der Name.
    pub name: String,
    /// Alle Bahnsteig-Kacheln.
    pub tiles: BTreeSet<Position>,
}

/// Eine Kachel der Karte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tile {
    /// Das Gleis auf dieser Kachel.
    track: Option<SegmentId>,
    /// Anzahl Gleise, die das Gelände der Kachel sperren.
    locked: usize,
    /// Index des Bahnhofs in [`Map::stations`].
    station: Option<usize>,
}

/// Eine rechteckige Karte aus `width × depth` Kacheln.
///
/// Jedes Gleis wird einmal gespeichert und ist an alle von ihm belegten Kacheln gebunden.
/// Erst wenn keine Kachel mehr auf ein Gleis verweist wird es entfernt.
#[derive(Debug, Clone)]
pub struct Map {
    width: u16,
    depth: u16,
    tiles: Vec<Tile>,
    pub(crate) terrain: Terrain,
    pub(crate) segments: Arena<Segment>,
    pub(crate) stations: Vec<Station>,
    start: Connection,
}

impl Map {
    /// Erzeuge eine leere, ebene Karte.
    ///
    /// Der Start-Punkt für Züge ist Kachel `(0, 0)` in Richtung `+x`.
    #[must_use]
    pub fn new(width: u16, depth: u16) -> Self {
        let anzahl = usize::from(width).saturating_mul(usize::from(depth));
        Map {
            width,
            depth,
            tiles: vec![Tile::default(); anzahl],
            terrain: Terrain::flat(width, depth),
            segments: Arena::new(),
            stations: Vec::new(),
            start: Connection::new(Position::ORIGIN, Heading::PlusX),
        }
    }

    /// Breite in Kacheln.
    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Tiefe in Kacheln.
    #[must_use]
    pub fn depth(&self) -> u16 {
        self.depth
    }

    /// Liegt die Kachel auf der Karte?
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.index(position).is_some()
    }

    fn index(&self, position: Position) -> Option<usize> {
        let x = usize::try_from(position.x).ok().filter(|x| *x < usize::from(self.width))?;
        let y = usize::try_from(position.y).ok().filter(|y| *y < usize::from(self.depth))?;
        Some(y.saturating_mul(usize::from(self.width)).saturating_add(x))
    }

    fn tile(&self, position: Position) -> Option<&Tile> {
        self.index(position).and_then(|index| self.tiles.get(index))
    }

    fn tile_mut(&mut self, position: Position) -> Result<&mut Tile, MapError> {
        self.index(position)
            .and_then(|index| self.tiles.get_mut(index))
            .ok_or(MapError::OutOfBounds(position))
    }

    /// Das Gelände.
    #[must_use]
    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    /// Liegt auf der Kachel ein Gleis?
    #[must_use]
    pub fn is_valid_track(&self, position: Position) -> bool {
        self.track_id_at(position).is_some()
    }

    /// Die Id des Gleises auf der Kachel.
    #[must_use]
    pub fn track_id_at(&self, position: Position) -> Option<SegmentId> {
        self.tile(position).and_then(|tile| tile.track)
    }

    /// Das Gleis auf der Kachel.
    ///
    /// ## Errors
    ///
    /// Auf der Kachel liegt kein Gleis.
    pub fn track_at(&self, position: Position) -> Result<&Segment, MapError> {
        self.track_id_at(position)
            .and_then(|id| self.segments.get(id))
            .ok_or(MapError::NoTrack(position))
    }

    /// Das Gleis zur `id`.
    #[must_use]
    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(id)
    }

    /// Alle Gleise.
    pub fn segments(&self) -> impl Iterator<Item = (SegmentId, &Segment)> {
        self.segments.iter()
    }

    /// Prüfe, ob `segment` bei `position` Platz hätte.
    ///
    /// Kacheln, auf denen eines der Gleise aus `ersetzt` liegt, gelten als frei.
    pub(crate) fn check_free(
        &self,
        segment: &Segment,
        ersetzt: &[SegmentId],
    ) -> Result<(), MapError> {
        for position in segment.footprint() {
            let tile = self.tile(position).ok_or(MapError::OutOfBounds(position))?;
            if let Some(id) = tile.track {
                if !ersetzt.contains(&id) {
                    return Err(MapError::Occupied(position));
                }
            }
        }
        Ok(())
    }

    /// Lege ein Gleis mit Ursprung `position` auf die Karte.
    ///
    /// Die Höhe des Gleises ist die niedrigste Gelände-Höhe der Kachel.
    /// Das Gelände unter allen belegten Kacheln wird gesperrt.
    ///
    /// ## Errors
    ///
    /// Eine belegte Kachel liegt außerhalb der Karte oder ist bereits belegt.
    pub fn set_track_at(
        &mut self,
        position: Position,
        mut segment: Segment,
    ) -> Result<SegmentId, MapError> {
        let height =
            self.terrain.tile_height(position).ok_or(MapError::OutOfBounds(position))?;
        segment.set_origin(position, height);
        self.check_free(&segment, &[])?;
        let footprint = segment.footprint();
        let locked = segment.height_locked();
        let kind = segment.kind();
        let id = self.segments.insert(segment);
        for tile_position in footprint {
            let _ = self.segments.anchor(id)?;
            self.tile_mut(tile_position)?.track = Some(id);
        }
        for tile_position in locked {
            let tile = self.tile_mut(tile_position)?;
            tile.locked = tile.locked.saturating_add(1);
        }
        debug!("{kind} bei {position} hinzugefügt ({id:?}).");
        Ok(id)
    }

    /// Entferne das Gleis auf der Kachel, inklusive aller weiteren von ihm belegten Kacheln.
    ///
    /// ## Errors
    ///
    /// Auf der Kachel liegt kein Gleis.
    pub fn erase_tile(&mut self, position: Position) -> Result<Segment, MapError> {
        let id = self.track_id_at(position).ok_or(MapError::NoTrack(position))?;
        self.erase_segment(id, position)
    }

    /// Entferne das Gleis `id`, das auf Kachel `position` liegt, von allen Kacheln.
    pub(crate) fn erase_segment(
        &mut self,
        id: SegmentId,
        position: Position,
    ) -> Result<Segment, MapError> {
        let segment = *self.segments.get(id).ok_or(MapError::NoTrack(position))?;
        for tile_position in segment.height_locked() {
            let tile = self.tile_mut(tile_position)?;
            tile.locked = tile.locked.saturating_sub(1);
        }
        let mut entfernt = None;
        for tile_position in segment.footprint() {
            let tile = self.tile_mut(tile_position)?;
            if tile.track != Some(id) {
                continue;
            }
            tile.track = None;
            match self.segments.release(id)? {
                Released::StillAnchored(anker) => trace!("{id:?} hat noch {anker} Anker."),
                Released::Destroyed(segment) => entfernt = Some(segment),
            }
        }
        let entfernt = entfernt.or_else(|| self.segments.remove(id)).unwrap_or(segment);
        debug!("{} bei {} entfernt ({id:?}).", entfernt.kind(), entfernt.origin());
        Ok(entfernt)
    }

    /// Stelle das Gleis auf der Kachel auf die nächste Stellung.
    ///
    /// ## Errors
    ///
    /// Auf der Kachel liegt kein Gleis.
    pub fn next_state_at(&mut self, position: Position) -> Result<(), MapError> {
        let id = self.track_id_at(position).ok_or(MapError::NoTrack(position))?;
        self.segments.get_mut(id).ok_or(MapError::NoTrack(position))?.next_state();
        Ok(())
    }

    /// Stelle das Gleis auf der Kachel auf die vorherige Stellung.
    ///
    /// ## Errors
    ///
    /// Auf der Kachel liegt kein Gleis.
    pub fn prev_state_at(&mut self, position: Position) -> Result<(), MapError> {
        let id = self.track_id_at(position).ok_or(MapError::NoTrack(position))?;
        self.segments.get_mut(id).ok_or(MapError::NoTrack(position))?.prev_state();
        Ok(())
    }

    /// Ist das Gelände der Kachel durch ein Gleis gesperrt?
    #[must_use]
    pub fn is_locked(&self, position: Position) -> bool {
        self.tile(position).is_some_and(|tile| tile.locked > 0)
    }

    /// Prüfe, dass keine Kachel an den Ecken `ecken` gesperrt ist.
    fn check_corners_unlocked(
        &self,
        ecken: impl IntoIterator<Item = (i32, i32)>,
    ) -> Result<(), MapError> {
        let gesperrt = ecken
            .into_iter()
            .flat_map(|(cx, cy)| {
                [(0, 0), (-1, 0), (0, -1), (-1, -1)]
                    .map(|(dx, dy)| Position::new(cx.saturating_add(dx), cy.saturating_add(dy)))
            })
            .unique()
            .find(|position| self.is_locked(*position));
        match gesperrt {
            Some(position) => {
                warn!("Gelände bei {position} ist durch ein Gleis gesperrt.");
                Err(MapError::TerrainConflict(position))
            },
            None => Ok(()),
        }
    }

    /// Hebe (oder senke) alle Ecken der Kachel um `betrag`.
    ///
    /// ## Errors
    ///
    /// Die Kachel liegt außerhalb der Karte, oder eine angrenzende Kachel ist gesperrt.
    pub fn raise_tile(&mut self, position: Position, betrag: f32) -> Result<(), MapError> {
        if !self.contains(position) {
            return Err(MapError::OutOfBounds(position));
        }
        self.check_corners_unlocked(Terrain::corner_positions(position))?;
        self.terrain.raise(position, betrag);
        Ok(())
    }

    /// Setze alle Ecken der Kachel auf ihre niedrigste Höhe.
    ///
    /// ## Errors
    ///
    /// Die Kachel liegt außerhalb der Karte, oder eine angrenzende Kachel ist gesperrt.
    pub fn level_tile(&mut self, position: Position) -> Result<(), MapError> {
        if !self.contains(position) {
            return Err(MapError::OutOfBounds(position));
        }
        self.check_corners_unlocked(Terrain::corner_positions(position))?;
        self.terrain.level(position);
        Ok(())
    }

    /// Setze die Höhe einer einzelnen Ecke.
    ///
    /// ## Errors
    ///
    /// Die Ecke liegt außerhalb der Karte, oder eine angrenzende Kachel ist gesperrt.
    pub fn set_corner_height(&mut self, cx: i32, cy: i32, höhe: f32) -> Result<(), MapError> {
        self.check_corners_unlocked([(cx, cy)])?;
        if self.terrain.set_corner(cx, cy, höhe) {
            Ok(())
        } else {
            Err(MapError::OutOfBounds(Position::new(cx, cy)))
        }
    }

    /// Steigung des Geländes auf der Kachel in Richtung `heading`.
    #[must_use]
    pub fn slope_at(&self, position: Position, heading: Heading) -> f32 {
        self.terrain.slope_at(position, heading)
    }

    /// Steigung des Geländes auf der Kachel vor `position`.
    #[must_use]
    pub fn slope_before(&self, position: Position, heading: Heading) -> f32 {
        self.terrain.slope_before(position, heading)
    }

    /// Steigung des Geländes auf der Kachel nach `position`.
    #[must_use]
    pub fn slope_after(&self, position: Position, heading: Heading) -> f32 {
        self.terrain.slope_after(position, heading)
    }

    /// Füge einen Bahnhof hinzu.
    ///
    /// ## Errors
    ///
    /// Eine Kachel liegt außerhalb der Karte.
    pub fn add_station(
        &mut self,
        name: impl Into<String>,
        tiles: impl IntoIterator<Item = Position>,
    ) -> Result<usize, MapError> {
        let station = Station { name: name.into(), tiles: tiles.into_iter().collect() };
        if let Some(position) = station.tiles.iter().find(|position| !self.contains(**position)) {
            return Err(MapError::OutOfBounds(*position));
        }
        let index = self.stations.len();
        for position in &station.tiles {
            self.tile_mut(*position)?.station = Some(index);
        }
        debug!("Bahnhof {} mit {} Bahnsteigen hinzugefügt.", station.name, station.tiles.len());
        self.stations.push(station);
        Ok(index)
    }

    /// Der Bahnhof, zu dem die Kachel gehört.
    #[must_use]
    pub fn station_at(&self, position: Position) -> Option<&Station> {
        self.tile(position).and_then(|tile| tile.station).and_then(|index| self.stations.get(index))
    }

    /// Alle Bahnhöfe.
    #[must_use]
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Start-Punkt für neue Züge.
    #[must_use]
    pub fn start(&self) -> Connection {
        self.start
    }

    /// Setze den Start-Punkt für neue Züge.
    pub fn set_start(&mut self, start: Connection) {
        self.start = start;
    }
}
