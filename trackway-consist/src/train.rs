//! Bewegung eines Zuges über die Gleise einer Karte.

use log::{debug, trace};
use nonempty::NonEmpty;

use trackway_map::{iterate_track, iterator::Step, Map, MapError, SegmentId};
use trackway_segment::token::TravelToken;
use trackway_types::{connection::Connection, transform::Transform};

use crate::{error::MoveError, vehicle::Vehicle};

/// Maximale Strecke, um die ein Teil am Stück bewegt wird.
///
/// Kürzer als jedes Gleis, damit pro Schritt höchstens ein Gleis-Wechsel notwendig ist.
const SCHRITT: f32 = 0.25;

/// Abstand zum Ende eines Gleises, ab dem ein Fahrzeug als genau am Ende stehend gilt.
const TOLERANZ: f32 = 1e-5;

/// Abstand zwischen zwei Fahrzeugen.
pub const SEPARATION: f32 = 0.15;

/// Erdbeschleunigung.
pub const GRAVITY: f32 = 9.81;

/// Bewegungs-Richtung eines [`Part`] relativ zu seinem [`TravelToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Vorwärts fahren bewegt entlang des [`TravelToken`].
    Plus,
    /// Vorwärts fahren bewegt entgegen des [`TravelToken`].
    Minus,
}

impl Sign {
    /// Der zugehörige Faktor, `1` oder `-1`.
    #[must_use]
    pub fn factor(self) -> f32 {
        match self {
            Sign::Plus => 1.,
            Sign::Minus => -1.,
        }
    }

    /// Die umgekehrte Richtung.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Sign::Plus => Sign::Minus,
            Sign::Minus => Sign::Plus,
        }
    }
}

/// Betrete das Gleis bei `connection`.
fn betrete(map: &Map, connection: Connection) -> Result<(SegmentId, TravelToken), MoveError> {
    let Connection { position, direction } = connection;
    let Some(id) = map.track_id_at(position) else {
        return Err(MoveError::RanOffTrack { position, direction });
    };
    let token = map.track_at(position)?.travel_token(position, direction)?;
    Ok((id, token))
}

/// Ein Fahrzeug eines Zuges und seine Position auf den Gleisen.
#[derive(Debug, Clone)]
pub struct Part {
    /// Das Fahrzeug.
    vehicle: Vehicle,
    /// Das aktuelle Gleis.
    segment: SegmentId,
    /// Wie das aktuelle Gleis betreten wurde.
    token: TravelToken,
    /// Zurückgelegte Strecke auf dem aktuellen Gleis, in `[0, token.length())`.
    ///
    /// Nur bei [`Sign::Minus`] ist `token.length()` möglich, falls das Gleis
    /// in Gegenrichtung einen anderen Weg nehmen würde.
    delta: f32,
    /// Bewegungs-Richtung relativ zu `token`.
    sign: Sign,
}

impl Part {
    /// Setze ein Fahrzeug an den Anfang des Gleises bei `connection`.
    fn enter(map: &Map, vehicle: Vehicle, connection: Connection) -> Result<Self, MoveError> {
        let (segment, token) = betrete(map, connection)?;
        Ok(Part { vehicle, segment, token, delta: 0., sign: Sign::Plus })
    }

    /// Das Fahrzeug.
    #[must_use]
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// Das aktuelle Gleis.
    #[must_use]
    pub fn segment(&self) -> SegmentId {
        self.segment
    }

    /// Wie das aktuelle Gleis betreten wurde.
    #[must_use]
    pub fn token(&self) -> &TravelToken {
        &self.token
    }

    /// Zurückgelegte Strecke auf dem aktuellen Gleis, gemessen ab [`token`](Part::token).
    #[must_use]
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Bewegungs-Richtung relativ zum [`token`](Part::token).
    #[must_use]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Position und Ausrichtung in Welt-Koordinaten, in Fahrtrichtung des Zuges.
    #[must_use]
    pub fn transform(&self) -> Transform {
        let transform = self.token.transform(self.delta);
        match self.sign {
            Sign::Plus => transform,
            Sign::Minus => transform.turned_around(),
        }
    }

    /// Steigung in Fahrtrichtung des Zuges.
    #[must_use]
    pub fn gradient(&self) -> f32 {
        // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
        #[allow(clippy::arithmetic_side_effects)]
        {
            self.token.gradient(self.delta) * self.sign.factor()
        }
    }

    /// Bewege das Fahrzeug um `distance` (negativ: rückwärts).
    ///
    /// Die Strecke wird in gleich lange Schritte von höchstens [`SCHRITT`] aufgeteilt.
    /// Gibt die Anzahl an Gleis-Wechseln zurück.
    fn advance(&mut self, map: &Map, distance: f32) -> Result<usize, MoveError> {
        if !distance.is_finite() {
            return Err(MoveError::InvalidDistance(distance));
        }
        // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
        #[allow(clippy::arithmetic_side_effects)]
        let anzahl = (distance.abs() / SCHRITT).ceil();
        if anzahl < 1. {
            return Ok(0);
        }
        // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
        #[allow(clippy::arithmetic_side_effects)]
        let schritt = distance / anzahl;
        // Endliche, positive Anzahl, zu große Werte werden zu u64::MAX.
        #[allow(clippy::as_conversions, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let anzahl = anzahl as u64;
        let mut wechsel = 0_usize;
        for _ in 0..anzahl {
            // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
            #[allow(clippy::arithmetic_side_effects)]
            {
                self.delta += schritt * self.sign.factor();
            }
            wechsel = wechsel.saturating_add(self.transition(map)?);
        }
        Ok(wechsel)
    }

    /// Wechsle auf das nächste bzw. vorherige Gleis, bis `delta` wieder auf dem Gleis liegt.
    fn transition(&mut self, map: &Map) -> Result<usize, MoveError> {
        let mut wechsel = 0_usize;
        loop {
            let länge = self.token.length();
            // Rundungsfehler an den Gleis-Enden.
            let mut am_ende = false;
            if self.delta.abs() <= TOLERANZ {
                self.delta = 0.;
            } else if (self.delta - länge).abs() <= TOLERANZ {
                self.delta = länge;
                am_ende = true;
            }
            if am_ende && self.sign == Sign::Minus {
                if !self.wende_bezug(map)? {
                    trace!(
                        "{} bleibt am Ende des Gleises bei {}.",
                        self.vehicle.name,
                        self.token.position
                    );
                }
                return Ok(wechsel);
            } else if self.delta >= länge {
                let segment =
                    map.segment(self.segment).ok_or(MapError::NoTrack(self.token.position))?;
                let connection = segment.next_position(&self.token)?;
                (self.segment, self.token) = betrete(map, connection)?;
                // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
                #[allow(clippy::arithmetic_side_effects)]
                {
                    self.delta -= länge;
                }
            } else if self.delta < 0. {
                // Rückwärts über die Grenze: das vorherige Gleis wird in Gegenrichtung befahren.
                let connection =
                    Connection::new(self.token.position, self.token.direction).reversed_behind();
                (self.segment, self.token) = betrete(map, connection)?;
                self.delta = -self.delta;
                self.sign = self.sign.flipped();
            } else {
                return Ok(wechsel);
            }
            trace!(
                "{} wechselt auf Gleis bei {} ({:?}).",
                self.vehicle.name,
                self.token.position,
                self.sign
            );
            wechsel = wechsel.saturating_add(1);
        }
    }

    /// Steht das Fahrzeug am Ende des Tokens, drücke die Position bezüglich
    /// des Tokens in Gegenrichtung aus (`delta == 0`, umgekehrtes Vorzeichen).
    ///
    /// Gibt `false` zurück, wenn das Gleis in Gegenrichtung einen anderen Weg nehmen würde,
    /// z.B. weil eine Weiche inzwischen umgestellt wurde.
    fn wende_bezug(&mut self, map: &Map) -> Result<bool, MoveError> {
        let segment = map.segment(self.segment).ok_or(MapError::NoTrack(self.token.position))?;
        let eingang = segment.next_position(&self.token)?.reversed_behind();
        let Ok((id, gegen)) = betrete(map, eingang) else {
            return Ok(false);
        };
        let zurück = segment.next_position(&gegen)?.reversed_behind();
        if id != self.segment || zurück != Connection::new(self.token.position, self.token.direction)
        {
            return Ok(false);
        }
        self.token = gegen;
        self.delta = 0.;
        self.sign = self.sign.flipped();
        Ok(true)
    }
}

/// Ein Zug aus mindestens einem Fahrzeug, die Lokomotive zuerst.
#[derive(Debug, Clone)]
pub struct Train {
    /// Die Fahrzeuge, vorne beginnend.
    parts: NonEmpty<Part>,
}

/// Stelle einen Zug am Start-Punkt der Karte auf.
///
/// Alle Fahrzeuge betreten die Karte am Start-Punkt,
/// der Zug wird jeweils um die Länge des vorherigen Fahrzeugs und [`SEPARATION`] vorwärts bewegt.
///
/// ## Errors
///
/// Am Start-Punkt liegt kein passendes Gleis, oder der Zug entgleist beim Aufstellen.
pub fn make_train(map: &Map, vehicles: NonEmpty<Vehicle>) -> Result<Train, MoveError> {
    let start = map.start();
    let NonEmpty { head, tail } = vehicles;
    let mut vorgänger_länge = head.length;
    let mut train = Train { parts: NonEmpty::new(Part::enter(map, head, start)?) };
    for vehicle in tail {
        // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
        #[allow(clippy::arithmetic_side_effects)]
        let abstand = vorgänger_länge + SEPARATION;
        let _ = train.move_by(map, abstand)?;
        vorgänger_länge = vehicle.length;
        train.parts.push(Part::enter(map, vehicle, start)?);
    }
    debug!("Zug mit {} Fahrzeugen bei {} aufgestellt.", train.parts.len(), start.position);
    Ok(train)
}

impl Train {
    /// Alle Fahrzeuge, vorne beginnend.
    #[must_use]
    pub fn parts(&self) -> &NonEmpty<Part> {
        &self.parts
    }

    /// Das vorderste Fahrzeug.
    #[must_use]
    pub fn engine(&self) -> &Part {
        &self.parts.head
    }

    /// Bewege alle Fahrzeuge um `distance` (negativ: rückwärts).
    ///
    /// Gibt die Anzahl an Gleis-Wechseln aller Fahrzeuge zurück.
    ///
    /// ## Errors
    ///
    /// Ein Fahrzeug erreicht eine Kachel ohne (passendes) Gleis.
    pub fn move_by(&mut self, map: &Map, distance: f32) -> Result<usize, MoveError> {
        let mut wechsel = 0_usize;
        for part in self.parts.iter_mut() {
            wechsel = wechsel.saturating_add(part.advance(map, distance)?);
        }
        Ok(wechsel)
    }

    /// Hangabtriebskraft aller Fahrzeuge in Fahrtrichtung.
    #[must_use]
    pub fn grade_force(&self) -> f32 {
        self.parts
            .iter()
            .map(|part| {
                // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
                #[allow(clippy::arithmetic_side_effects)]
                {
                    -GRAVITY * part.gradient() * part.vehicle.mass
                }
            })
            .sum()
    }

    /// Wie das aktuelle Gleis der Lokomotive in Fahrtrichtung betreten wurde.
    ///
    /// ## Errors
    ///
    /// Das Gleis der Lokomotive existiert nicht mehr.
    pub fn head_connection(&self, map: &Map) -> Result<Connection, MoveError> {
        let engine = self.engine();
        let token = engine.token;
        match engine.sign {
            Sign::Plus => Ok(Connection::new(token.position, token.direction)),
            Sign::Minus => {
                let segment =
                    map.segment(engine.segment).ok_or(MapError::NoTrack(token.position))?;
                Ok(segment.next_position(&token)?.reversed_behind())
            },
        }
    }

    /// Die erste Warnung entlang der Strecke vor der Lokomotive.
    ///
    /// ## Errors
    ///
    /// Das Gleis der Lokomotive existiert nicht mehr.
    pub fn look_ahead(&self, map: &Map) -> Result<Option<Step>, MoveError> {
        let Connection { position, direction } = self.head_connection(map)?;
        let mut iterator = iterate_track(map, position, direction)?;
        Ok(iterator.first_warning())
    }
}
