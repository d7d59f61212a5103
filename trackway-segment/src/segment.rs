//! Ein Gleis auf dem Raster: Ursprung, Höhe und Form.

use itertools::Itertools;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use trackway_types::{connection::Connection, direction::Direction, position::Position};

use crate::{
    crossover::{self, Crossover},
    curved::{self, Curved},
    error::TrackError,
    points::{self, Points},
    s_bend::{self, SBend},
    slope::{self, Slope},
    spline::{self, Spline},
    straight::{self, Straight},
    token::{Placement, TravelToken},
};

/// Die Form eines Gleises.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Eine Gerade.
    Straight(Straight),
    /// Eine 90°-Kurve.
    Curved(Curved),
    /// Eine Kreuzung.
    Crossover(Crossover),
    /// Eine Weiche.
    Points(Points),
    /// Eine Steigung.
    Slope(Slope),
    /// Eine S-Kurve.
    SBend(SBend),
    /// Ein allgemeines Gleis.
    Spline(Spline),
}

impl Shape {
    /// Name der Gleis-Art.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Straight(_) => straight::NAME,
            Shape::Curved(_) => curved::NAME,
            Shape::Crossover(_) => crossover::NAME,
            Shape::Points(_) => points::NAME,
            Shape::Slope(_) => slope::NAME,
            Shape::SBend(_) => s_bend::NAME,
            Shape::Spline(_) => spline::NAME,
        }
    }
}

macro_rules! impl_from_shape {
    ($($variant: ident),*) => {
        $(
            impl From<$variant> for Shape {
                fn from(shape: $variant) -> Self {
                    Shape::$variant(shape)
                }
            }
        )*
    };
}
impl_from_shape! {Straight, Curved, Crossover, Points, Slope, SBend, Spline}

/// Ergebnis von [`Segment::merge_exit`].
#[derive(Debug, Clone, PartialEq)]
pub enum Merge {
    /// Das Gleis hat bereits einen passenden Ausgang.
    Unchanged,
    /// Das Gleis wird durch ein neues Gleis ersetzt, das es einschließt.
    Replace(Segment),
    /// Eine Zusammenführung ist nicht möglich.
    Rejected,
}

/// Ein Gleis mit Ursprungs-Kachel und Höhe.
///
/// Ein Gleis kennt keine Reisenden, alle Informationen über eine Fahrt
/// werden über einen [`TravelToken`] übergeben.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    origin: Position,
    height: f32,
    shape: Shape,
}

impl Segment {
    /// Erzeuge ein neues Gleis am Ursprung, auf Höhe 0.
    #[must_use]
    pub fn new(shape: impl Into<Shape>) -> Self {
        Segment { origin: Position::ORIGIN, height: 0., shape: shape.into() }
    }

    /// Erzeuge ein neues Gleis mit Ursprung `origin` auf Höhe `height`.
    #[must_use]
    pub fn placed(shape: impl Into<Shape>, origin: Position, height: f32) -> Self {
        Segment { origin, height, shape: shape.into() }
    }

    /// Verschiebe das Gleis.
    pub fn set_origin(&mut self, origin: Position, height: f32) {
        self.origin = origin;
        self.height = height;
    }

    /// Die Ursprungs-Kachel.
    #[must_use]
    pub fn origin(&self) -> Position {
        self.origin
    }

    /// Höhe des Ursprungs.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Die Form.
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Name der Gleis-Art.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.shape.kind()
    }

    /// Länge des Weges, den `token` beschreibt.
    #[must_use]
    pub fn segment_length(&self, token: &TravelToken) -> f32 {
        token.length()
    }

    /// Betrete das Gleis auf Kachel `position` in Richtung `direction`.
    ///
    /// ## Errors
    ///
    /// Das Gleis kann in dieser Richtung (bei einer Weiche: von dieser Kachel) nicht befahren werden.
    pub fn travel_token(
        &self,
        position: Position,
        direction: Direction,
    ) -> Result<TravelToken, TrackError> {
        let Segment { origin, height, shape } = *self;
        match shape {
            Shape::Straight(straight) => straight.token(origin, height, position, direction),
            Shape::Curved(curved) => curved.token(origin, height, position, direction),
            Shape::Crossover(Crossover) => Crossover::token(origin, height, position, direction),
            Shape::Points(points) => points.token(origin, height, position, direction),
            Shape::Slope(slope) => slope.token(origin, height, position, direction),
            Shape::SBend(s_bend) => s_bend.token(origin, height, position, direction),
            Shape::Spline(spline) => spline.token(origin, height, position, direction),
        }
    }

    /// Kann das Gleis in Richtung `direction` befahren werden?
    #[must_use]
    pub fn is_valid_direction(&self, direction: Direction) -> bool {
        match &self.shape {
            Shape::Straight(straight) => straight.accepts(direction).is_some(),
            Shape::Curved(curved) => curved.accepts(direction),
            Shape::Crossover(Crossover) => Crossover::accepts(direction).is_some(),
            Shape::Points(points) => points.accepts(direction),
            Shape::Slope(slope) => slope.accepts(direction),
            Shape::SBend(s_bend) => s_bend.accepts(direction),
            Shape::Spline(spline) => spline.accepts(direction),
        }
    }

    /// Wo und in welche Richtung ein Reisender mit `token` das Gleis verlässt.
    ///
    /// ## Errors
    ///
    /// `token` gehört nicht zu diesem Gleis.
    pub fn next_position(&self, token: &TravelToken) -> Result<Connection, TrackError> {
        let origin = self.origin;
        match &self.shape {
            Shape::Straight(straight) => straight.next_position(origin, token),
            Shape::Curved(curved) => curved.next_position(origin, token),
            Shape::Crossover(Crossover) => Crossover::next_position(origin, token),
            Shape::Points(points) => points.next_position(origin, token),
            Shape::Slope(slope) => slope.next_position(origin, token),
            Shape::SBend(s_bend) => s_bend.next_position(origin, token),
            Shape::Spline(spline) => spline.next_position(origin, token),
        }
    }

    /// Alle Kacheln, an denen das Gleis betreten oder verlassen werden kann.
    #[must_use]
    pub fn endpoints(&self) -> Vec<Position> {
        let origin = self.origin;
        match &self.shape {
            Shape::Straight(_) | Shape::Crossover(_) => vec![origin],
            Shape::Curved(curved) => {
                vec![origin, curved.exit_tile(origin)].into_iter().unique().collect()
            },
            Shape::Points(points) => points.endpoints(origin),
            Shape::Slope(slope) => slope.endpoints(origin),
            Shape::SBend(s_bend) => s_bend.endpoints(origin),
            Shape::Spline(spline) => spline.endpoints(origin).into_iter().unique().collect(),
        }
    }

    /// Alle möglichen Wege durch das Gleis, jeweils ab dem Ursprung.
    fn placements(&self) -> Vec<Placement> {
        let Segment { origin, height, shape } = *self;
        let vorwärts = |direction: Direction| {
            self.travel_token(origin, direction).map(|token| token.placement).into_iter()
        };
        match shape {
            Shape::Crossover(Crossover) => Vec::new(),
            Shape::Points(points) => points.placements(origin, height).to_vec(),
            Shape::Straight(straight) => vorwärts(straight.axis().direction()).collect(),
            Shape::Curved(curved) => vorwärts(curved.entry_direction()).collect(),
            Shape::Slope(slope) => vorwärts(slope.axis().direction()).collect(),
            Shape::SBend(s_bend) => vorwärts(s_bend.axis().direction()).collect(),
            Shape::Spline(spline) => vorwärts(spline.entry()).collect(),
        }
    }

    /// Alle vom Gleis belegten Kacheln, die keine [Endpunkte](Segment::endpoints) sind.
    #[must_use]
    pub fn covers(&self) -> Vec<Position> {
        let endpoints = self.endpoints();
        self.placements()
            .iter()
            .flat_map(Placement::tiles)
            .filter(|position| !endpoints.contains(position))
            .unique()
            .collect()
    }

    /// Alle vom Gleis belegten Kacheln.
    #[must_use]
    pub fn footprint(&self) -> Vec<Position> {
        self.endpoints().into_iter().chain(self.covers()).unique().collect()
    }

    /// Kacheln, deren Gelände-Höhe nicht mehr verändert werden darf.
    #[must_use]
    pub fn height_locked(&self) -> Vec<Position> {
        self.footprint()
    }

    /// Hat das Gleis mehrere Stellungen?
    #[must_use]
    pub fn has_multiple_states(&self) -> bool {
        matches!(self.shape, Shape::Points(_))
    }

    /// Wechsle zur nächsten Stellung.
    ///
    /// Gleise mit nur einer Stellung bleiben unverändert.
    pub fn next_state(&mut self) {
        if let Shape::Points(points) = &mut self.shape {
            points.next_state();
        } else {
            trace!("{} bei {} hat keine Stellungen.", self.kind(), self.origin);
        }
    }

    /// Wechsle zur vorherigen Stellung.
    ///
    /// Gleise mit nur einer Stellung bleiben unverändert.
    pub fn prev_state(&mut self) {
        if let Shape::Points(points) = &mut self.shape {
            points.prev_state();
        } else {
            trace!("{} bei {} hat keine Stellungen.", self.kind(), self.origin);
        }
    }

    /// Versuche, dem Gleis einen Ausgang auf Kachel `at` in Richtung `direction` hinzuzufügen.
    ///
    /// - Ist `at` ein Endpunkt und `direction` bereits erlaubt, bleibt das Gleis unverändert.
    /// - Eine Gerade entlang einer Achse wird mit einer senkrechten Gerade auf ihrer Kachel
    ///   zu einer [`Crossover`].
    /// - Eine Gerade entlang einer Achse wird zu einer [`Points`],
    ///   wenn `at` das abzweigende Ende einer Weiche ist, deren Spitze oder gerades Ende
    ///   auf der Kachel der Geraden liegt. `direction` ist dabei die Fahrtrichtung
    ///   von der Spitze weg.
    /// - Sonst ist keine Zusammenführung möglich.
    #[must_use]
    pub fn merge_exit(&self, at: Position, direction: Direction) -> Merge {
        if self.endpoints().contains(&at) && self.is_valid_direction(direction) {
            return Merge::Unchanged;
        }
        let ergebnis = match &self.shape {
            Shape::Straight(straight) => straight.merge(self.origin, at, direction),
            _ => None,
        };
        match ergebnis {
            Some((shape, origin)) => {
                let neu = Segment::placed(shape, origin, self.height);
                debug!("{} bei {} wird zu {} bei {origin}.", self.kind(), self.origin, neu.kind());
                Merge::Replace(neu)
            },
            None => {
                trace!(
                    "{} bei {} kann keinen Ausgang bei {at} in Richtung {direction:?} bekommen.",
                    self.kind(),
                    self.origin
                );
                Merge::Rejected
            },
        }
    }
}

#[cfg(test)]
mod test;
