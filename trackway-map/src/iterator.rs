//! Vorausschau entlang der Gleise.

use std::iter::FusedIterator;

use log::trace;

use trackway_segment::token::TravelToken;
use trackway_types::{connection::Connection, direction::Direction, position::Position};

use crate::{error::MapError, map::Map, SegmentId};

/// Maximale Anzahl Schritte eines [`TrackIterator`].
pub const STEP_BOUND: usize = 10;

/// Einordnung des nächsten Gleises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Das Gleis kann normal befahren werden.
    Ok,
    /// Kein (passendes) Gleis, die Strecke endet.
    NoMore,
    /// Das Gleis liegt an einem Bahnhof.
    Station,
    /// Das Gleis hat mehrere Stellungen.
    Choice,
}

/// Ein Schritt des [`TrackIterator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Wo das nächste Gleis betreten wird.
    pub connection: Connection,
    /// Das nächste Gleis, falls vorhanden.
    pub segment: Option<SegmentId>,
    /// Einordnung des nächsten Gleises.
    pub status: Status,
}

/// Folgt den Gleisen ab einem Start-Gleis, ohne die Karte zu verändern.
///
/// Nach höchstens [`STEP_BOUND`] Schritten, oder nach einem [`Status::NoMore`], endet der Iterator.
#[derive(Debug, Clone)]
pub struct TrackIterator<'t> {
    map: &'t Map,
    start: (SegmentId, TravelToken),
    aktuell: Option<(SegmentId, TravelToken)>,
    schritte: usize,
}

/// Starte einen [`TrackIterator`] auf dem Gleis bei `position` in Richtung `direction`.
///
/// ## Errors
///
/// Auf der Kachel liegt kein Gleis, oder es kann nicht in Richtung `direction` befahren werden.
pub fn iterate_track(
    map: &Map,
    position: Position,
    direction: Direction,
) -> Result<TrackIterator<'_>, MapError> {
    let id = map.track_id_at(position).ok_or(MapError::NoTrack(position))?;
    let token = map.track_at(position)?.travel_token(position, direction)?;
    Ok(TrackIterator { map, start: (id, token), aktuell: Some((id, token)), schritte: 0 })
}

impl TrackIterator<'_> {
    /// Beginne erneut beim Start-Gleis.
    pub fn restart(&mut self) {
        self.aktuell = Some(self.start);
        self.schritte = 0;
    }

    /// Der erste Schritt, der nicht [`Status::Ok`] ist.
    pub fn first_warning(&mut self) -> Option<Step> {
        self.find(|step| step.status != Status::Ok)
    }
}

impl Iterator for TrackIterator<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Self::Item> {
        if self.schritte >= STEP_BOUND {
            return None;
        }
        let (id, token) = self.aktuell.take()?;
        self.schritte = self.schritte.saturating_add(1);
        let segment = self.map.segment(id)?;
        let connection = match segment.next_position(&token) {
            Ok(connection) => connection,
            Err(fehler) => {
                trace!("Vorausschau endet: {fehler}");
                let connection = Connection::new(token.position, token.direction);
                return Some(Step { connection, segment: None, status: Status::NoMore });
            },
        };
        let nächstes = self.map.track_id_at(connection.position).and_then(|id| {
            let segment = self.map.segment(id)?;
            let token = segment.travel_token(connection.position, connection.direction).ok()?;
            Some((id, segment, token))
        });
        let Some((nächste_id, nächstes_segment, nächster_token)) = nächstes else {
            return Some(Step { connection, segment: None, status: Status::NoMore });
        };
        let status = if nächstes_segment
            .endpoints()
            .iter()
            .any(|position| self.map.station_at(*position).is_some())
        {
            Status::Station
        } else if nächstes_segment.has_multiple_states() {
            Status::Choice
        } else {
            Status::Ok
        };
        self.aktuell = Some((nächste_id, nächster_token));
        Some(Step { connection, segment: Some(nächste_id), status })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.aktuell.is_some() {
            (0, Some(STEP_BOUND.saturating_sub(self.schritte)))
        } else {
            (0, Some(0))
        }
    }
}

impl FusedIterator for TrackIterator<'_> {}
