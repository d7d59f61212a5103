//! Tests für [`Segment::merge_exit`].

use std::error::Error;

use trackway_test_util::{expect_eq, expect_true, init_test_logging};
use trackway_types::{direction::Direction, heading::Heading, position::Position};

use crate::{
    crossover::Crossover, curved::Curved, points::Points, straight::Straight, Merge, Segment,
    Shape,
};

const P: Position = Position::new(5, 5);

fn gerade_x() -> Segment {
    Segment::placed(Straight::new(Heading::PlusX), P, 0.)
}

/// Erwarte eine Weiche mit Ursprung `origin`, deren abzweigendes Ende bei `at` liegt.
fn expect_weiche(
    merge: Merge,
    origin: Position,
    axis: Heading,
    reflected: bool,
    at: Position,
) -> Result<(), Box<dyn Error>> {
    let Merge::Replace(segment) = &merge else {
        return Err(format!("Weiche erwartet, {merge:?} erhalten").into());
    };
    expect_eq(segment.origin(), origin)?;
    expect_eq(*segment.shape(), Shape::Points(Points::new(axis, reflected)?))?;
    let Shape::Points(points) = segment.shape() else {
        return Err("Weiche erwartet".into());
    };
    expect_eq(points.displaced_endpoint(origin), at)?;
    expect_true(segment.endpoints().contains(&P))?;
    Ok(())
}

#[test]
fn vorhandener_ausgang_bleibt() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let segment = gerade_x();
    expect_eq(segment.merge_exit(P, Direction::X), Merge::Unchanged)?;
    expect_eq(segment.merge_exit(P, -Direction::X), Merge::Unchanged)?;
    Ok(())
}

#[test]
fn senkrechte_geraden_werden_kreuzung() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    expect_eq(gerade_x().merge_exit(P, Direction::Y), Merge::Replace(Segment::placed(Crossover, P, 0.)))?;
    let gerade_y = Segment::placed(Straight::new(Heading::MinusY), P, 0.);
    expect_eq(gerade_y.merge_exit(P, -Direction::X), Merge::Replace(Segment::placed(Crossover, P, 0.)))?;
    Ok(())
}

#[test]
fn abzweigung_an_der_spitze() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let segment = gerade_x();
    let fälle = [
        (P.offset(2, 1), Heading::PlusX, false),
        (P.offset(2, -1), Heading::PlusX, true),
        (P.offset(-2, -1), Heading::MinusX, false),
        (P.offset(-2, 1), Heading::MinusX, true),
    ];
    for (at, axis, reflected) in fälle {
        expect_weiche(segment.merge_exit(at, axis.direction()), P, axis, reflected, at)?;
    }
    Ok(())
}

#[test]
fn abzweigung_am_geraden_ende() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let segment = gerade_x();
    let fälle = [
        (P.offset(0, 1), Heading::PlusX, false, P.offset(-2, 0)),
        (P.offset(0, -1), Heading::PlusX, true, P.offset(-2, 0)),
        (P.offset(0, -1), Heading::MinusX, false, P.offset(2, 0)),
        (P.offset(0, 1), Heading::MinusX, true, P.offset(2, 0)),
    ];
    for (at, axis, reflected, origin) in fälle {
        expect_weiche(segment.merge_exit(at, axis.direction()), origin, axis, reflected, at)?;
    }
    Ok(())
}

#[test]
fn abzweigung_in_y_richtung() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let segment = Segment::placed(Straight::new(Heading::PlusY), P, 0.);
    expect_weiche(segment.merge_exit(P.offset(-1, 2), Direction::Y), P, Heading::PlusY, false, P.offset(-1, 2))?;
    expect_weiche(segment.merge_exit(P.offset(1, 2), Direction::Y), P, Heading::PlusY, true, P.offset(1, 2))?;
    Ok(())
}

#[test]
fn keine_zusammenführung() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let segment = gerade_x();
    expect_eq(segment.merge_exit(P.offset(3, 1), Direction::X), Merge::Rejected)?;
    expect_eq(segment.merge_exit(P.offset(2, 1), Direction::Y), Merge::Rejected)?;
    expect_eq(segment.merge_exit(P, Heading::PlusXPlusY.direction()), Merge::Rejected)?;

    let diagonal = Segment::placed(Straight::new(Heading::PlusXPlusY), P, 0.);
    expect_eq(diagonal.merge_exit(P, Heading::PlusXMinusY.direction()), Merge::Rejected)?;

    let kurve = Segment::placed(Curved::new(0, 90, 2)?, P, 0.);
    expect_eq(kurve.merge_exit(P, Direction::X), Merge::Unchanged)?;
    expect_eq(kurve.merge_exit(P, Direction::Y), Merge::Rejected)?;
    expect_eq(kurve.merge_exit(P.offset(1, 0), Direction::X), Merge::Rejected)?;
    Ok(())
}
