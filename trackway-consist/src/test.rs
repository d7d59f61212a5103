//! Tests für die Bewegung von Zügen.

use std::error::Error;

use nonempty::NonEmpty;

use trackway_map::{Map, PlaceOutcome, Status};
use trackway_segment::{curved::Curved, straight::Straight, Segment};
use trackway_test_util::{expect_approx, expect_eq, expect_true, init_test_logging};
use trackway_types::{
    connection::Connection, direction::Direction, heading::Heading, position::Position,
};

use crate::{make_train, MoveError, Sign, Vehicle};

/// Eine gerade Strecke von `(0, 0)` bis `(länge - 1, 0)`.
fn gerade_strecke(länge: i32) -> Result<Map, Box<dyn Error>> {
    let mut map = Map::new(8, 4);
    for x in 0..länge {
        let gerade = Segment::new(Straight::new(Heading::PlusX));
        let _ = map.set_track_at(Position::new(x, 0), gerade)?;
    }
    Ok(map)
}

/// Ein Kreis aus vier Viertel-Kurven mit Radius 1, Start bei `(1, 1)` in Richtung `+x`.
fn kreis() -> Result<Map, Box<dyn Error>> {
    let mut map = Map::new(4, 4);
    for (position, start, ende) in [
        (Position::new(1, 1), 0, 90),
        (Position::new(1, 2), 90, 180),
        (Position::new(0, 2), 180, 270),
        (Position::new(0, 1), 270, 0),
    ] {
        let _ = map.set_track_at(position, Segment::new(Curved::new(start, ende, 1)?))?;
    }
    map.set_start(Connection::new(Position::new(1, 1), Heading::PlusX));
    Ok(map)
}

fn lok() -> NonEmpty<Vehicle> {
    NonEmpty::new(Vehicle::engine("Lok"))
}

#[test]
fn bewegung_auf_einem_gleis() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let map = gerade_strecke(6)?;
    let mut train = make_train(&map, lok())?;
    expect_eq(train.move_by(&map, 0.275)?, 0)?;
    expect_eq(Some(train.engine().segment()), map.track_id_at(Position::new(0, 0)))?;
    expect_approx(train.engine().delta(), 0.275)?;
    expect_approx(train.engine().transform().translation.x, -0.225)?;
    Ok(())
}

#[test]
fn genau_ein_wechsel_pro_gleis() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let map = gerade_strecke(6)?;
    let mut train = make_train(&map, lok())?;
    expect_eq(train.move_by(&map, 1.)?, 1)?;
    expect_eq(Some(train.engine().segment()), map.track_id_at(Position::new(1, 0)))?;
    expect_eq(train.engine().delta(), 0.)?;
    expect_eq(train.move_by(&map, 2.)?, 2)?;
    expect_eq(Some(train.engine().segment()), map.track_id_at(Position::new(3, 0)))?;
    Ok(())
}

#[test]
fn rückwärts_zurück_zum_anfang() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let map = gerade_strecke(6)?;
    let mut train = make_train(&map, lok())?;
    let _ = train.move_by(&map, 0.3)?;
    let segment = train.engine().segment();
    let vorher = train.engine().transform();

    expect_eq(train.move_by(&map, 1.)?, 1)?;
    expect_eq(train.move_by(&map, -1.)?, 1)?;
    let engine = train.engine();
    expect_eq(engine.segment(), segment)?;
    expect_eq(engine.sign(), Sign::Minus)?;
    expect_approx(engine.delta(), 0.7)?;
    let nachher = engine.transform();
    expect_approx(nachher.translation.x, vorher.translation.x)?;
    expect_approx(nachher.translation.y, vorher.translation.y)?;
    expect_eq(train.head_connection(&map)?, Connection::new(Position::new(0, 0), Heading::PlusX))?;

    expect_eq(
        train.move_by(&map, -0.5).err(),
        Some(MoveError::RanOffTrack { position: Position::new(-1, 0), direction: -Direction::X }),
    )?;
    Ok(())
}

#[test]
fn entgleisen_am_ende_der_strecke() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let map = gerade_strecke(6)?;
    let mut train = make_train(&map, lok())?;
    expect_eq(
        train.move_by(&map, 10.).err(),
        Some(MoveError::RanOffTrack { position: Position::new(6, 0), direction: Direction::X }),
    )?;

    let leer = Map::new(4, 4);
    expect_eq(
        make_train(&leer, lok()).err(),
        Some(MoveError::RanOffTrack { position: Position::new(0, 0), direction: Direction::X }),
    )?;
    Ok(())
}

#[test]
fn wagen_reihen_sich_hinter_der_lok_auf() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let map = gerade_strecke(6)?;
    let fahrzeuge = NonEmpty {
        head: Vehicle::engine("Lok"),
        tail: vec![Vehicle::wagon("Wagen 1"), Vehicle::wagon("Wagen 2")],
    };
    let train = make_train(&map, fahrzeuge)?;
    let x: Vec<f32> =
        train.parts().iter().map(|part| part.transform().translation.x).collect();
    expect_eq(x.len(), 3)?;
    if let [vorne, wagen_1, wagen_2] = x.as_slice() {
        expect_approx(vorne - wagen_1, 1.15)?;
        expect_approx(wagen_1 - wagen_2, 0.95)?;
        expect_approx(*wagen_2, -0.5)?;
    }
    expect_eq(Some(train.engine().segment()), map.track_id_at(Position::new(2, 0)))?;
    Ok(())
}

#[test]
fn hangabtrieb_bergauf() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let mut map = Map::new(6, 3);
    for cy in 0..=3 {
        for (cx, höhe) in [(2, 0.25), (3, 0.5), (4, 0.5), (5, 0.5), (6, 0.5)] {
            map.set_corner_height(cx, cy, höhe)?;
        }
    }
    let gerade = Segment::new(Straight::new(Heading::PlusX));
    let _ = map.set_track_at(Position::new(0, 1), gerade)?;
    let steigung = map.draw_slope(Position::new(1, 1), Heading::PlusX);
    expect_true(matches!(steigung, PlaceOutcome::Placed(_)))?;
    map.set_start(Connection::new(Position::new(0, 1), Heading::PlusX));

    let mut train = make_train(&map, lok())?;
    expect_eq(train.grade_force(), 0.)?;
    let _ = train.move_by(&map, 1.5)?;
    expect_eq(Some(train.engine().segment()), map.track_id_at(Position::new(1, 1)))?;
    let bergauf = train.grade_force();
    expect_true(bergauf < 0.)?;

    let _ = train.move_by(&map, -1.)?;
    expect_eq(Some(train.engine().segment()), map.track_id_at(Position::new(0, 1)))?;
    expect_eq(train.engine().sign(), Sign::Minus)?;
    expect_approx(train.grade_force(), 0.)?;
    Ok(())
}

#[test]
fn vorausschau_von_der_lok() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let mut map = gerade_strecke(5)?;
    let train = make_train(&map, lok())?;
    let warnung = train.look_ahead(&map)?;
    expect_eq(
        warnung.map(|schritt| (schritt.connection.position, schritt.status)),
        Some((Position::new(5, 0), Status::NoMore)),
    )?;

    let _ = map.add_station("Ost", [Position::new(3, 0)])?;
    let warnung = train.look_ahead(&map)?;
    expect_eq(
        warnung.map(|schritt| (schritt.connection.position, schritt.status)),
        Some((Position::new(3, 0), Status::Station)),
    )?;
    Ok(())
}

#[test]
fn eine_gleislänge_vor_und_zurück() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let mut map = gerade_strecke(6)?;
    map.set_start(Connection::new(Position::new(1, 0), Heading::PlusX));
    let mut train = make_train(&map, lok())?;
    let segment = train.engine().segment();
    expect_eq(Some(segment), map.track_id_at(Position::new(1, 0)))?;

    expect_eq(train.move_by(&map, 1.)?, 1)?;
    expect_eq(train.move_by(&map, -1.)?, 1)?;
    let engine = train.engine();
    expect_eq(engine.segment(), segment)?;
    expect_eq(engine.delta(), 0.)?;
    expect_eq(engine.sign(), Sign::Plus)?;
    expect_approx(engine.transform().translation.x, 0.5)?;
    expect_eq(train.head_connection(&map)?, Connection::new(Position::new(1, 0), Heading::PlusX))?;
    Ok(())
}

#[test]
fn eine_gleislänge_zurück_ohne_gleis_dahinter() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let map = gerade_strecke(6)?;
    let mut train = make_train(&map, lok())?;
    let segment = train.engine().segment();

    let _ = train.move_by(&map, 1.)?;
    let _ = train.move_by(&map, -1.)?;
    let engine = train.engine();
    expect_eq(engine.segment(), segment)?;
    expect_eq(engine.delta(), 0.)?;
    expect_eq(engine.sign(), Sign::Plus)?;
    expect_approx(engine.transform().translation.x, -0.5)?;

    expect_eq(
        train.move_by(&map, -0.1).err(),
        Some(MoveError::RanOffTrack { position: Position::new(-1, 0), direction: -Direction::X }),
    )?;
    Ok(())
}

#[test]
fn eine_kurve_vor_und_zurück() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let map = kreis()?;
    let mut train = make_train(&map, lok())?;
    let segment = train.engine().segment();
    let vorher = train.engine().transform();
    let länge = train.engine().token().length();

    expect_eq(train.move_by(&map, länge)?, 1)?;
    expect_eq(Some(train.engine().segment()), map.track_id_at(Position::new(1, 2)))?;
    expect_eq(train.move_by(&map, -länge)?, 1)?;
    let engine = train.engine();
    expect_eq(engine.segment(), segment)?;
    expect_eq(engine.delta(), 0.)?;
    expect_eq(engine.sign(), Sign::Plus)?;
    expect_approx(engine.transform().translation.x, vorher.translation.x)?;
    expect_approx(engine.transform().translation.y, vorher.translation.y)?;
    Ok(())
}

#[test]
fn sehr_weite_fahrt_im_kreis() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let map = kreis()?;
    let mut train = make_train(&map, lok())?;
    let wechsel = train.move_by(&map, 5.0e6)?;
    expect_true(wechsel > 3_000_000)?;
    let engine = train.engine();
    expect_true(engine.delta() >= 0. && engine.delta() <= engine.token().length())?;
    let kacheln = [Position::new(1, 1), Position::new(1, 2), Position::new(0, 2), Position::new(0, 1)];
    expect_true(kacheln.iter().any(|kachel| map.track_id_at(*kachel) == Some(engine.segment())))?;
    Ok(())
}

#[test]
fn ungültige_strecke() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let map = gerade_strecke(6)?;
    let mut train = make_train(&map, lok())?;
    for distance in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
        expect_true(matches!(train.move_by(&map, distance), Err(MoveError::InvalidDistance(_))))?;
    }
    expect_eq(train.move_by(&map, 0.)?, 0)?;
    expect_eq(train.engine().delta(), 0.)?;
    Ok(())
}
