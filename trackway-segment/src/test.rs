//! Tests für Geometrie und Richtungen der einzelnen Gleis-Arten.

use std::{
    error::Error,
    f32::consts::{FRAC_PI_2, SQRT_2},
};

use trackway_test_util::{
    expect_approx, expect_eq, expect_true, init_test_logging, Expectation,
};
use trackway_types::{
    connection::Connection, direction::Direction, heading::Heading, position::Position,
    vector::Vector,
};

use crate::{
    bezier::BezierCurve, crossover::Crossover, curved::Curved, s_bend::SBend, slope::Slope,
    spline::Spline, straight::Straight, Segment, TrackError,
};

fn expect_vector(a: Vector, b: Vector) -> Result<(), Expectation> {
    expect_approx(a.x, b.x)?;
    expect_approx(a.y, b.y)?;
    expect_approx(a.z, b.z)?;
    Ok(())
}

#[test]
fn bezier_gerade() -> Result<(), Expectation> {
    let kurve = BezierCurve::new(
        Vector::new(0., 0., 0.),
        Vector::new(1., 0., 0.),
        Vector::new(2., 0., 0.),
        Vector::new(3., 0., 0.),
    );
    expect_approx(kurve.length(), 3.)?;
    expect_vector(kurve.point(0.5), Vector::new(1.5, 0., 0.))?;
    expect_vector(kurve.derivative(0.25), Vector::new(3., 0., 0.))?;
    expect_vector(kurve.offset(0.5, 1.), Vector::new(1.5, 1., 0.))?;
    expect_vector(kurve.reversed().point(0.), Vector::new(3., 0., 0.))?;
    Ok(())
}

#[test]
fn bezier_länge_mindestens_sehne() -> Result<(), Expectation> {
    let kurve = BezierCurve::new(
        Vector::new(0., 0., 0.),
        Vector::new(0., 2., 0.),
        Vector::new(2., 2., 0.),
        Vector::new(2., 0., 0.),
    );
    expect_true(kurve.length() > 2.)?;
    expect_true(kurve.length() < 6.)?;
    expect_approx(kurve.length(), kurve.reversed().length())?;
    Ok(())
}

#[test]
fn gerade() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let segment = Segment::placed(Straight::new(Heading::MinusX), Position::new(4, 2), 0.);
    let token = segment.travel_token(Position::new(4, 2), Direction::X)?;
    expect_approx(segment.segment_length(&token), 1.)?;
    expect_eq(
        segment.next_position(&token)?,
        Connection::new(Position::new(5, 2), Heading::PlusX),
    )?;
    let zurück = segment.travel_token(Position::new(4, 2), -Direction::X)?;
    expect_eq(
        segment.next_position(&zurück)?,
        Connection::new(Position::new(3, 2), Heading::MinusX),
    )?;
    expect_true(!segment.is_valid_direction(Direction::Y))?;
    expect_true(matches!(
        segment.travel_token(Position::new(4, 2), Direction::Y),
        Err(TrackError::InvalidDirection { .. })
    ))?;
    expect_eq(segment.endpoints(), vec![Position::new(4, 2)])?;
    expect_eq(segment.covers(), Vec::new())?;
    Ok(())
}

#[test]
fn diagonale_gerade() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let segment = Segment::new(Straight::new(Heading::PlusXPlusY));
    let token = segment.travel_token(Position::ORIGIN, Heading::MinusXMinusY.direction())?;
    expect_approx(token.length(), SQRT_2)?;
    expect_eq(
        segment.next_position(&token)?,
        Connection::new(Position::new(-1, -1), Heading::MinusXMinusY),
    )?;
    expect_eq(segment.covers(), Vec::new())?;
    Ok(())
}

#[test]
fn kurve_radius_eins() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let segment = Segment::new(Curved::new(0, 90, 1)?);
    let token = segment.travel_token(Position::ORIGIN, Direction::X)?;
    expect_approx(token.length(), FRAC_PI_2 * 0.5)?;
    expect_eq(segment.next_position(&token)?, Connection::new(Position::new(0, 1), Heading::PlusY))?;
    let zurück = segment.travel_token(Position::ORIGIN, -Direction::Y)?;
    expect_eq(
        segment.next_position(&zurück)?,
        Connection::new(Position::new(-1, 0), Heading::MinusX),
    )?;
    expect_eq(segment.endpoints(), vec![Position::ORIGIN])?;
    expect_true(!segment.is_valid_direction(Direction::Y))?;
    Ok(())
}

#[test]
fn kurve_radius_zwei() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let segment = Segment::new(Curved::new(0, 90, 2)?);
    let token = segment.travel_token(Position::ORIGIN, Direction::X)?;
    expect_approx(token.length(), FRAC_PI_2 * 1.5)?;
    expect_eq(segment.next_position(&token)?, Connection::new(Position::new(1, 2), Heading::PlusY))?;
    expect_vector(token.transform(0.).translation, Vector::new(-0.5, 0., 0.))?;
    expect_vector(token.transform(token.length()).translation, Vector::new(1., 1.5, 0.))?;
    expect_approx(token.transform(0.).yaw.0, 0.)?;
    expect_approx(token.transform(token.length()).yaw.0, FRAC_PI_2)?;
    expect_eq(segment.endpoints(), vec![Position::ORIGIN, Position::new(1, 1)])?;
    expect_eq(segment.covers(), vec![Position::new(1, 0)])?;
    Ok(())
}

#[test]
fn kurve_im_uhrzeigersinn() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let segment = Segment::new(Curved::new(90, 0, 1)?);
    let token = segment.travel_token(Position::ORIGIN, Direction::Y)?;
    expect_eq(segment.next_position(&token)?, Connection::new(Position::new(1, 0), Heading::PlusX))?;
    let zurück = segment.travel_token(Position::ORIGIN, -Direction::X)?;
    expect_eq(
        segment.next_position(&zurück)?,
        Connection::new(Position::new(0, -1), Heading::MinusY),
    )?;
    Ok(())
}

#[test]
fn ungültige_kurven() -> Result<(), Box<dyn Error>> {
    expect_true(Curved::new(0, 45, 1).is_err())?;
    expect_true(Curved::new(0, 180, 1).is_err())?;
    expect_true(Curved::new(0, 90, 0).is_err())?;
    expect_true(Curved::new(30, 120, 1).is_err())?;
    expect_true(Curved::new(270, 0, 1).is_ok())?;
    Ok(())
}

#[test]
fn kreuzung() -> Result<(), Box<dyn Error>> {
    let segment = Segment::placed(Crossover, Position::new(1, 1), 0.);
    for heading in [Heading::PlusX, Heading::PlusY, Heading::MinusX, Heading::MinusY] {
        let token = segment.travel_token(Position::new(1, 1), heading.direction())?;
        expect_eq(
            segment.next_position(&token)?,
            Connection::step(Position::new(1, 1), heading),
        )?;
    }
    expect_true(!segment.is_valid_direction(Heading::PlusXPlusY.direction()))?;
    Ok(())
}

#[test]
fn steigung() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let segment = Segment::new(Slope::new(Heading::PlusX, 0.25, 0., 0.)?);
    let bergauf = segment.travel_token(Position::ORIGIN, Direction::X)?;
    expect_approx(bergauf.transform(bergauf.length()).translation.z, 0.5)?;
    expect_approx(bergauf.gradient(bergauf.length() * 0.5), 0.375)?;
    expect_approx(bergauf.gradient(0.), 0.)?;
    expect_true(bergauf.transform(bergauf.length() * 0.5).pitch.0 > 0.)?;
    expect_eq(segment.next_position(&bergauf)?, Connection::new(Position::new(2, 0), Heading::PlusX))?;

    let bergab = segment.travel_token(Position::new(1, 0), -Direction::X)?;
    expect_approx(bergab.gradient(bergab.length() * 0.5), -0.375)?;
    expect_approx(bergab.length(), bergauf.length())?;
    expect_eq(segment.next_position(&bergab)?, Connection::new(Position::new(-1, 0), Heading::MinusX))?;

    expect_eq(segment.endpoints(), vec![Position::ORIGIN, Position::new(1, 0)])?;
    expect_eq(segment.covers(), Vec::new())?;
    expect_true(Slope::new(Heading::PlusXPlusY, 0.25, 0., 0.).is_err())?;
    Ok(())
}

#[test]
fn s_kurve() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let segment = Segment::new(SBend::new(Heading::PlusX, 3, 1)?);
    let token = segment.travel_token(Position::ORIGIN, Direction::X)?;
    expect_eq(segment.next_position(&token)?, Connection::new(Position::new(3, 1), Heading::PlusX))?;
    let zurück = segment.travel_token(Position::new(2, 1), -Direction::X)?;
    expect_eq(
        segment.next_position(&zurück)?,
        Connection::new(Position::new(-1, 0), Heading::MinusX),
    )?;
    expect_eq(segment.endpoints(), vec![Position::ORIGIN, Position::new(2, 1)])?;
    expect_true(token.length() > 3.)?;
    let footprint = segment.footprint();
    expect_true(footprint.contains(&Position::new(1, 0)) || footprint.contains(&Position::new(1, 1)))?;
    expect_true(SBend::new(Heading::PlusX, 3, 0).is_err())?;
    Ok(())
}

#[test]
fn spline() -> Result<(), Box<dyn Error>> {
    init_test_logging();

    let segment = Segment::new(Spline::new(Position::new(3, 2), Heading::PlusX, Heading::PlusY)?);
    let token = segment.travel_token(Position::ORIGIN, Direction::X)?;
    expect_eq(segment.next_position(&token)?, Connection::new(Position::new(3, 3), Heading::PlusY))?;
    expect_vector(token.transform(token.length()).translation, Vector::new(3., 2.5, 0.))?;
    let zurück = segment.travel_token(Position::new(3, 2), -Direction::Y)?;
    expect_eq(
        segment.next_position(&zurück)?,
        Connection::new(Position::new(-1, 0), Heading::MinusX),
    )?;
    expect_true(!segment.is_valid_direction(Direction::Y))?;
    expect_true(Spline::new(Position::ORIGIN, Heading::PlusX, Heading::PlusX).is_err())?;
    Ok(())
}

#[test]
fn nur_weichen_haben_stellungen() -> Result<(), Box<dyn Error>> {
    let mut segment = Segment::new(Straight::new(Heading::PlusX));
    let vorher = segment;
    segment.next_state();
    segment.prev_state();
    expect_true(!segment.has_multiple_states())?;
    expect_eq(segment, vorher)?;
    Ok(())
}
