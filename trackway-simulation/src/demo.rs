//! Eine Beispiel-Strecke, falls keine Datei geladen wird.

use trackway_map::{Map, MapError, PlaceOutcome};
use trackway_segment::{curved::Curved, straight::Straight, Shape};
use trackway_types::{connection::Connection, heading::Heading, position::Position};

/// Breite der Beispiel-Karte.
const BREITE: u16 = 16;
/// Tiefe der Beispiel-Karte.
const TIEFE: u16 = 10;
/// Radius der Kurven.
const RADIUS: i32 = 3;

/// Wandle das Ergebnis eines Editor-Befehls in einen [`Result`] um.
fn platziert(ergebnis: PlaceOutcome) -> Result<(), MapError> {
    match ergebnis {
        PlaceOutcome::Placed(_) | PlaceOutcome::Unchanged => Ok(()),
        PlaceOutcome::MergeRejected(position) => Err(MapError::Occupied(position)),
        PlaceOutcome::Rejected(fehler) => Err(fehler),
    }
}

/// Lege ein Gleis mit Ursprung `origin`.
fn platziere(map: &mut Map, origin: Position, shape: impl Into<Shape>) -> Result<(), MapError> {
    platziert(map.place(origin, shape))
}

/// Ein Oval mit einem Abstellgleis, einem Bahnhof und einem Hügel in der Mitte.
///
/// Der Start-Punkt liegt auf der unteren Geraden in Richtung `+x`.
///
/// ## Errors
///
/// Programmierfehler, die Strecke passt nicht auf die Karte.
pub fn demo_layout() -> Result<Map, MapError> {
    let mut map = Map::new(BREITE, TIEFE);
    // Gegen den Uhrzeigersinn, beginnend mit der unteren Geraden.
    platziert(map.draw_track(Position::new(4, 1), Position::new(9, 1), false))?;
    platziere(&mut map, Position::new(10, 1), Curved::new(0, 90, RADIUS)?)?;
    platziert(map.draw_track(Position::new(12, 4), Position::new(12, 5), false))?;
    platziere(&mut map, Position::new(12, 6), Curved::new(90, 180, RADIUS)?)?;
    platziert(map.draw_track(Position::new(9, 8), Position::new(4, 8), false))?;
    platziere(&mut map, Position::new(3, 8), Curved::new(180, 270, RADIUS)?)?;
    platziert(map.draw_track(Position::new(1, 5), Position::new(1, 4), false))?;
    platziere(&mut map, Position::new(1, 3), Curved::new(270, 0, RADIUS)?)?;

    // Abstellgleis, die Gerade bei (6, 1) wird zur Weiche.
    platziert(map.draw_track(Position::new(6, 1), Position::new(8, 2), false))?;
    platziere(&mut map, Position::new(9, 2), Straight::new(Heading::PlusX))?;

    let _ = map.add_station("Hauptbahnhof", [Position::new(5, 8), Position::new(6, 8)])?;
    map.raise_tile(Position::new(7, 5), 0.5)?;
    map.set_start(Connection::new(Position::new(4, 1), Heading::PlusX));
    Ok(map)
}
