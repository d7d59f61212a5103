//! speichern und laden Methode für [`Map`].

use std::{fs, io, path::Path};

use bincode::config::{
    DefaultOptions, FixintEncoding, Options, RejectTrailing, WithOtherIntEncoding,
    WithOtherTrailing,
};
use log::{debug, error};
use nonempty::NonEmpty;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use trackway_segment::Segment;
use trackway_types::connection::Connection;

use crate::{
    error::MapError,
    map::{Map, Station},
    terrain::Terrain,
};

/// [`bincode`]-Optionen, bei denen trailing bytes abgelehnt werden.
///
/// Im Gegensatz zu [`DefaultOptions`] verwendet [die Standard-Funktion](bincode::deserialize) fixint-encoding.
/// <https://docs.rs/bincode/latest/bincode/config/index.html#options-struct-vs-bincode-functions>
static BINCODE_OPTIONS: Lazy<
    WithOtherTrailing<WithOtherIntEncoding<DefaultOptions, FixintEncoding>, RejectTrailing>,
> = Lazy::new(|| DefaultOptions::new().with_fixint_encoding().reject_trailing_bytes());

/// Aktuelle Version des Speicherformats.
const VERSION: u8 = 1;

/// Serialisierbare Repräsentation einer [`Map`].
///
/// Jedes Gleis wird genau einmal gespeichert, zusammen mit seiner Ursprungs-Kachel.
#[derive(Debug, Serialize, Deserialize)]
struct MapSerialisiert {
    version: u8,
    terrain: Terrain,
    segments: Vec<Segment>,
    stations: Vec<Station>,
    start: Connection,
}

/// Fehler beim [`Speichern`](Map::save) oder [`Laden`](Map::load).
#[derive(Debug, Error)]
pub enum SaveError {
    /// Ein IO-Fehler.
    #[error("IO-Fehler: {0}")]
    Io(#[from] io::Error),
    /// Fehler beim (De-)Serialisieren.
    #[error("Fehler beim (De-)Serialisieren: {0}")]
    Bincode(#[from] bincode::Error),
    /// Die gespeicherte Version ist unbekannt.
    #[error("Unbekannte Version {0} des Speicherformats!")]
    UnknownVersion(u8),
    /// Die gespeicherte Höhen-Karte passt nicht zur Größe.
    #[error("Die Höhen-Karte hat eine ungültige Größe!")]
    InvalidTerrain,
    /// Nicht alle Gleise oder Bahnhöfe konnten wiederhergestellt werden.
    #[error("{} Fehler beim Wiederherstellen, zuerst: {}", .0.len(), .0.head)]
    Map(NonEmpty<MapError>),
}

impl Map {
    /// Speichere die Karte in einer Datei.
    ///
    /// Die Stellung von Weichen wird nicht gespeichert.
    ///
    /// ## Errors
    ///
    /// Fehler beim Erstellen der Datei oder beim Serialisieren.
    pub fn save(&self, pfad: impl AsRef<Path>) -> Result<(), SaveError> {
        let serialisiert = MapSerialisiert {
            version: VERSION,
            terrain: self.terrain.clone(),
            segments: self.segments.iter().map(|(_id, segment)| *segment).collect(),
            stations: self.stations.clone(),
            start: self.start(),
        };
        let file = fs::File::create(pfad)?;
        BINCODE_OPTIONS.serialize_into(file, &serialisiert)?;
        debug!("{} Gleise gespeichert.", serialisiert.segments.len());
        Ok(())
    }

    /// Lade eine Karte aus einer Datei.
    ///
    /// Alle Gleise werden erneut platziert, das Gelände unter ihnen erneut gesperrt.
    ///
    /// ## Errors
    ///
    /// Fehler beim Lesen der Datei, beim Deserialisieren oder beim Wiederherstellen der Gleise.
    pub fn load(pfad: impl AsRef<Path>) -> Result<Map, SaveError> {
        let content = fs::read(pfad)?;
        let MapSerialisiert { version, terrain, segments, stations, start } =
            BINCODE_OPTIONS.deserialize(content.as_slice())?;
        if version != VERSION {
            return Err(SaveError::UnknownVersion(version));
        }
        if !terrain.is_consistent() {
            return Err(SaveError::InvalidTerrain);
        }
        let (width, depth) = terrain.size();
        let mut map = Map::new(width, depth);
        map.terrain = terrain;
        map.set_start(start);
        let mut fehler = Vec::new();
        for Station { name, tiles } in stations {
            if let Err(station_fehler) = map.add_station(name, tiles) {
                fehler.push(station_fehler);
            }
        }
        for segment in segments {
            if let Err(segment_fehler) = map.set_track_at(segment.origin(), segment) {
                error!(
                    "{} bei {} kann nicht geladen werden: {segment_fehler}",
                    segment.kind(),
                    segment.origin()
                );
                fehler.push(segment_fehler);
            }
        }
        match NonEmpty::from_vec(fehler) {
            None => Ok(map),
            Some(fehler) => Err(SaveError::Map(fehler)),
        }
    }
}
