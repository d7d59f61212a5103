//! Tests für Karte, Editor, Vorausschau und Speichern.

use std::{env, error::Error, fs};

use trackway_segment::{
    curved::Curved,
    points::{Points, PointsState},
    straight::Straight,
    Segment, Shape,
};
use trackway_test_util::{expect_eq, expect_true, init_test_logging};
use trackway_types::{
    connection::Connection, direction::Direction, heading::Heading, position::Position,
};

use crate::{
    iterate_track, iterator::STEP_BOUND, Map, MapError, PlaceOutcome, SaveError, Status,
};

fn shape_at(map: &Map, position: Position) -> Option<Shape> {
    map.track_at(position).ok().map(|segment| *segment.shape())
}

fn expect_placed(ergebnis: PlaceOutcome) -> Result<usize, Box<dyn Error>> {
    match ergebnis {
        PlaceOutcome::Placed(ids) => Ok(ids.len()),
        andere => Err(format!("Platziertes Gleis erwartet, {andere:?} erhalten").into()),
    }
}

/// Ein Kreis aus vier Kurven mit Radius 1 auf den Kacheln `(0..=1, 1..=2)`.
fn kreis(map: &mut Map) -> Result<(), Box<dyn Error>> {
    for (position, start, ende) in [
        (Position::new(1, 1), 0, 90),
        (Position::new(1, 2), 90, 180),
        (Position::new(0, 2), 180, 270),
        (Position::new(0, 1), 270, 0),
    ] {
        let _ = expect_placed(map.place(position, Curved::new(start, ende, 1)?))?;
    }
    Ok(())
}

#[test]
fn gleis_über_mehrere_kacheln() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let mut map = Map::new(8, 8);
    let _ = expect_placed(map.place(Position::new(2, 2), Curved::new(0, 90, 2)?))?;
    let id = map.track_id_at(Position::new(2, 2));
    expect_true(id.is_some())?;
    expect_eq(map.track_id_at(Position::new(3, 2)), id)?;
    expect_eq(map.track_id_at(Position::new(3, 3)), id)?;
    expect_true(!map.is_valid_track(Position::new(2, 3)))?;
    expect_true(map.is_locked(Position::new(3, 3)))?;
    expect_eq(map.segments().count(), 1)?;

    let entfernt = map.erase_tile(Position::new(3, 2))?;
    expect_eq(entfernt.origin(), Position::new(2, 2))?;
    for position in [Position::new(2, 2), Position::new(3, 2), Position::new(3, 3)] {
        expect_true(!map.is_valid_track(position))?;
        expect_true(!map.is_locked(position))?;
    }
    expect_eq(map.segments().count(), 0)?;
    expect_eq(
        map.erase_tile(Position::new(2, 2)).err(),
        Some(MapError::NoTrack(Position::new(2, 2))),
    )?;
    Ok(())
}

#[test]
fn belegte_kacheln_und_rand() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let mut map = Map::new(4, 4);
    let _ = map.set_track_at(Position::new(1, 1), Segment::new(Straight::new(Heading::PlusX)))?;
    expect_eq(
        map.set_track_at(Position::new(1, 1), Segment::new(Straight::new(Heading::PlusY))).err(),
        Some(MapError::Occupied(Position::new(1, 1))),
    )?;
    expect_true(matches!(
        map.place(Position::new(3, 3), Curved::new(0, 90, 2)?),
        PlaceOutcome::Rejected(MapError::OutOfBounds(_))
    ))?;
    expect_eq(
        map.draw_track(Position::new(0, 0), Position::new(5, 0), false),
        PlaceOutcome::Rejected(MapError::OutOfBounds(Position::new(5, 0))),
    )?;
    expect_true(map.track_at(Position::new(0, 0)).is_err())?;
    Ok(())
}

#[test]
fn gelände_unter_gleisen_gesperrt() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let mut map = Map::new(8, 8);
    let _ = expect_placed(map.draw_track(Position::new(2, 2), Position::new(3, 2), false))?;
    expect_eq(
        map.raise_tile(Position::new(2, 2), 1.).err(),
        Some(MapError::TerrainConflict(Position::new(2, 2))),
    )?;
    // Teilt sich eine Ecke mit (3, 2).
    let konflikt = map.raise_tile(Position::new(4, 3), 1.);
    expect_true(matches!(konflikt, Err(MapError::TerrainConflict(_))))?;
    map.raise_tile(Position::new(6, 6), 1.)?;
    expect_true(map.terrain().is_level(Position::new(6, 6)))?;
    expect_true(!map.terrain().is_level(Position::new(5, 6)))?;
    map.level_tile(Position::new(5, 6))?;
    expect_true(map.terrain().is_level(Position::new(5, 6)))?;
    expect_eq(
        map.draw_track(Position::new(4, 6), Position::new(7, 6), false),
        PlaceOutcome::Rejected(MapError::NotLevel(Position::new(6, 6))),
    )?;
    expect_true(!map.is_valid_track(Position::new(4, 6)))?;

    let _ = map.erase_tile(Position::new(2, 2))?;
    let _ = map.erase_tile(Position::new(3, 2))?;
    map.raise_tile(Position::new(2, 2), 1.)?;
    Ok(())
}

#[test]
fn geraden_und_kreuzung() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let mut map = Map::new(8, 8);
    expect_eq(expect_placed(map.draw_track(Position::new(0, 2), Position::new(4, 2), false))?, 5)?;
    expect_eq(map.draw_track(Position::new(0, 2), Position::new(4, 2), false), PlaceOutcome::Unchanged)?;
    expect_eq(expect_placed(map.draw_track(Position::new(2, 0), Position::new(2, 4), false))?, 5)?;
    expect_true(matches!(shape_at(&map, Position::new(2, 2)), Some(Shape::Crossover(_))))?;
    expect_eq(map.segments().count(), 9)?;

    let _ = expect_placed(map.draw_track(Position::new(5, 5), Position::new(7, 7), true))?;
    expect_eq(
        shape_at(&map, Position::new(6, 6)),
        Some(Shape::Straight(Straight::new(Heading::PlusXPlusY))),
    )?;
    expect_eq(
        map.draw_track(Position::new(5, 7), Position::new(7, 5), true),
        PlaceOutcome::MergeRejected(Position::new(6, 6)),
    )?;
    expect_true(!map.is_valid_track(Position::new(5, 7)))?;
    Ok(())
}

#[test]
fn abzweigung_wird_weiche() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let mut map = Map::new(10, 10);
    let _ = expect_placed(map.draw_track(Position::new(2, 5), Position::new(8, 5), false))?;
    let _ = expect_placed(map.draw_track(Position::new(4, 5), Position::new(6, 6), false))?;
    let weiche = map.track_id_at(Position::new(4, 5));
    for position in [Position::new(5, 5), Position::new(6, 5), Position::new(6, 6)] {
        expect_eq(map.track_id_at(position), weiche)?;
    }
    expect_eq(
        shape_at(&map, Position::new(4, 5)),
        Some(Shape::Points(Points::new(Heading::PlusX, false)?)),
    )?;
    expect_eq(
        shape_at(&map, Position::new(7, 5)),
        Some(Shape::Straight(Straight::new(Heading::PlusX))),
    )?;
    expect_eq(map.segments().count(), 5)?;

    map.next_state_at(Position::new(6, 6))?;
    let Some(Shape::Points(points)) = shape_at(&map, Position::new(4, 5)) else {
        return Err("Weiche erwartet".into());
    };
    expect_eq(points.state(), PointsState::Taken)?;

    map.prev_state_at(Position::new(5, 5))?;
    let Some(Shape::Points(points)) = shape_at(&map, Position::new(4, 5)) else {
        return Err("Weiche erwartet".into());
    };
    expect_eq(points.state(), PointsState::NotTaken)?;
    expect_eq(map.prev_state_at(Position::new(0, 0)), Err(MapError::NoTrack(Position::new(0, 0))))?;
    Ok(())
}

#[test]
fn kurven_und_s_kurven() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let mut map = Map::new(10, 10);
    let _ = expect_placed(map.draw_track(Position::new(0, 0), Position::new(2, 2), false))?;
    expect_eq(shape_at(&map, Position::new(0, 0)), Some(Shape::Curved(Curved::new(0, 90, 3)?)))?;
    expect_true(map.is_valid_track(Position::new(2, 2)))?;

    let _ = expect_placed(map.draw_track(Position::new(4, 0), Position::new(8, 1), false))?;
    expect_true(matches!(shape_at(&map, Position::new(4, 0)), Some(Shape::SBend(_))))?;
    expect_eq(map.track_id_at(Position::new(8, 1)), map.track_id_at(Position::new(4, 0)))?;

    let _ = expect_placed(map.draw_track(Position::new(0, 5), Position::new(4, 8), true))?;
    expect_true(matches!(shape_at(&map, Position::new(0, 5)), Some(Shape::Spline(_))))?;
    Ok(())
}

#[test]
fn strich_zu_diagonalem_gleis_wird_spline() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let mut map = Map::new(10, 10);
    let _ = expect_placed(map.place(Position::new(6, 6), Straight::new(Heading::PlusXPlusY)))?;
    let _ = expect_placed(map.draw_track(Position::new(1, 2), Position::new(5, 5), false))?;
    let Some(Shape::Spline(spline)) = shape_at(&map, Position::new(1, 2)) else {
        return Err("Spline erwartet".into());
    };
    expect_eq(spline.entry(), Heading::PlusX.direction())?;
    expect_eq(spline.exit(), Heading::PlusXPlusY.direction())?;

    let mut iterator = iterate_track(&map, Position::new(1, 2), Direction::X)?;
    let erster = iterator.next().map(|schritt| (schritt.connection.position, schritt.segment));
    expect_eq(erster, Some((Position::new(6, 6), map.track_id_at(Position::new(6, 6)))))?;
    Ok(())
}

#[test]
fn steigung_folgt_dem_gelände() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let richtungen = [(Position::new(1, 1), Heading::PlusX), (Position::new(2, 1), Heading::MinusX)];
    for (at, heading) in richtungen {
        let mut map = Map::new(6, 3);
        for cy in 0..=3 {
            for (cx, höhe) in [(2, 0.25), (3, 0.5), (4, 0.5), (5, 0.5), (6, 0.5)] {
                map.set_corner_height(cx, cy, höhe)?;
            }
        }
        let _ = expect_placed(map.draw_slope(at, heading))?;
        let segment = map.track_at(Position::new(1, 1))?;
        expect_eq(segment.origin(), Position::new(1, 1))?;
        let Shape::Slope(slope) = segment.shape() else {
            return Err("Steigung erwartet".into());
        };
        expect_eq(slope.axis(), Heading::PlusX)?;
        expect_eq(slope.slope_at(), 0.25)?;
        expect_eq(map.track_id_at(Position::new(2, 1)), map.track_id_at(Position::new(1, 1)))?;
        let konflikt = map.raise_tile(Position::new(3, 1), 0.5);
        expect_true(matches!(konflikt, Err(MapError::TerrainConflict(_))))?;
        expect_true(matches!(
            map.draw_slope(Position::new(0, 1), Heading::PlusX),
            PlaceOutcome::Rejected(MapError::NotLevel(_))
        ))?;
    }
    Ok(())
}

#[test]
fn vorausschau_endet_im_kreis() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let mut map = Map::new(4, 4);
    kreis(&mut map)?;
    let mut iterator = iterate_track(&map, Position::new(1, 1), Direction::X)?;
    let schritte: Vec<_> = iterator.by_ref().collect();
    expect_eq(schritte.len(), STEP_BOUND)?;
    expect_true(schritte.iter().all(|schritt| schritt.status == Status::Ok))?;
    expect_eq(schritte.first().map(|schritt| schritt.connection.position), Some(Position::new(1, 2)))?;
    expect_eq(iterator.next(), None)?;
    iterator.restart();
    expect_eq(iterator.count(), STEP_BOUND)?;
    Ok(())
}

#[test]
fn vorausschau_bahnhof_weiche_ende() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let mut map = Map::new(12, 4);
    let _ = expect_placed(map.draw_track(Position::new(0, 0), Position::new(3, 0), false))?;
    let mut iterator = iterate_track(&map, Position::new(0, 0), Direction::X)?;
    let status: Vec<_> = iterator.by_ref().map(|schritt| schritt.status).collect();
    expect_eq(status, vec![Status::Ok, Status::Ok, Status::Ok, Status::NoMore])?;

    let _ = map.add_station("Nord", [Position::new(2, 0)])?;
    let station = map.station_at(Position::new(2, 0));
    expect_eq(station.map(|station| station.name.clone()), Some(String::from("Nord")))?;
    let mut iterator = iterate_track(&map, Position::new(0, 0), Direction::X)?;
    let warnung = iterator.first_warning();
    expect_eq(
        warnung.map(|schritt| (schritt.connection.position, schritt.status)),
        Some((Position::new(2, 0), Status::Station)),
    )?;

    let _ = expect_placed(map.draw_track(Position::new(4, 0), Position::new(10, 0), false))?;
    let _ = expect_placed(map.draw_track(Position::new(6, 0), Position::new(8, 1), false))?;
    let mut iterator = iterate_track(&map, Position::new(5, 0), Direction::X)?;
    expect_eq(iterator.first_warning().map(|schritt| schritt.status), Some(Status::Choice))?;

    expect_eq(
        iterate_track(&map, Position::new(11, 3), Direction::X).err(),
        Some(MapError::NoTrack(Position::new(11, 3))),
    )?;
    expect_true(matches!(
        iterate_track(&map, Position::new(4, 0), Direction::Y),
        Err(MapError::Track(_))
    ))?;
    Ok(())
}

#[test]
fn speichern_und_laden() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let mut map = Map::new(12, 6);
    let _ = expect_placed(map.draw_track(Position::new(1, 1), Position::new(9, 1), false))?;
    let _ = expect_placed(map.draw_track(Position::new(3, 1), Position::new(5, 2), false))?;
    map.next_state_at(Position::new(3, 1))?;
    let _ = map.add_station("Süd", [Position::new(8, 1), Position::new(9, 1)])?;
    map.set_start(Connection::new(Position::new(1, 1), Heading::PlusX));
    map.raise_tile(Position::new(10, 4), 0.5)?;

    let pfad = env::temp_dir().join(format!("trackway-test-{}.bin", std::process::id()));
    map.save(&pfad)?;
    let geladen = Map::load(&pfad);
    fs::remove_file(&pfad)?;
    let geladen = geladen?;

    expect_eq(geladen.segments().count(), map.segments().count())?;
    expect_eq(geladen.start(), map.start())?;
    expect_eq(geladen.terrain().clone(), map.terrain().clone())?;
    expect_eq(geladen.stations().to_vec(), map.stations().to_vec())?;
    expect_true(geladen.is_locked(Position::new(4, 2)))?;
    expect_eq(
        shape_at(&geladen, Position::new(4, 2)),
        Some(Shape::Points(Points::new(Heading::PlusX, false)?)),
    )?;
    // Weichen verlieren beim Speichern ihre Stellung.
    for position in (0..12).flat_map(|x| (0..6).map(move |y| Position::new(x, y))) {
        match shape_at(&map, position) {
            Some(Shape::Points(_)) => {},
            gleis => expect_eq(shape_at(&geladen, position), gleis)?,
        }
    }
    let fehlt = Map::load(env::temp_dir().join("trackway-gibt-es-nicht.bin"));
    expect_true(matches!(fehlt, Err(SaveError::Io(_))))?;
    Ok(())
}
