//! Frame-basierte Simulation eines Zuges auf einer Karte.

#![allow(clippy::pub_use)]

use flexi_logger::{Duplicate, FileSpec, FlexiLoggerError, LogSpecBuilder, Logger, LoggerHandle};
use log::{debug, error, info, warn, LevelFilter};
use nonempty::NonEmpty;
use thiserror::Error;

use trackway_args::Args;
use trackway_consist::{make_train, MoveError, Train, Vehicle};
use trackway_map::{iterator::Step, Map, MapError, SaveError, Status};
use trackway_types::position::Position;

pub mod demo;

pub use self::demo::demo_layout;


/// Bei der [`Ausführung`](run) potentiell auftretende Fehler.
#[derive(Debug, Error)]
pub enum Error {
    /// Ein Fehler beim starten des Loggers.
    #[error("Logger konnte nicht gestartet werden: {0}")]
    Logger(#[from] FlexiLoggerError),
    /// Ein Fehler beim Laden der Strecke.
    #[error("Strecke konnte nicht geladen werden: {0}")]
    Load(SaveError),
    /// Ein Fehler beim Speichern der Strecke.
    #[error("Strecke konnte nicht gespeichert werden: {0}")]
    Save(SaveError),
    /// Ein Fehler beim Erstellen der Strecke.
    #[error(transparent)]
    Map(#[from] MapError),
    /// Ein Fehler beim Bewegen des Zuges.
    #[error(transparent)]
    Move(#[from] MoveError),
}

/// Starte den Logger, optional mit zusätzlicher Ausgabe in eine Datei.
fn start_logger(verbose: bool, log_datei: bool) -> Result<LoggerHandle, FlexiLoggerError> {
    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    let mut log_spec_builder = LogSpecBuilder::new();
    let _ = log_spec_builder.default(LevelFilter::Error).module("trackway", log_level);
    let log_spec = log_spec_builder.finalize();
    let logger_base = Logger::with(log_spec);
    let logger = if log_datei {
        logger_base
            .log_to_file(FileSpec::default().directory("log"))
            .duplicate_to_stderr(Duplicate::All)
    } else {
        logger_base.log_to_stderr()
    };
    logger.start()
}

/// Ein Zug, der auf einer Karte fährt.
#[derive(Debug)]
pub struct Simulation {
    /// Die Karte.
    map: Map,
    /// Der Zug.
    train: Train,
    /// Geschwindigkeit in Kacheln pro Sekunde.
    speed: f32,
    /// Die zuletzt gemeldete Warnung der Vorausschau.
    letzte_warnung: Option<(Position, Status)>,
}

impl Simulation {
    /// Stelle einen Zug aus einer Lokomotive und `wagen` Wagen am Start-Punkt der Karte auf.
    ///
    /// ## Errors
    ///
    /// Der Zug kann nicht aufgestellt werden.
    pub fn new(map: Map, wagen: usize, speed: f32) -> Result<Self, MoveError> {
        let vehicles = NonEmpty {
            head: Vehicle::engine("Lok"),
            tail: (1..=wagen).map(|nummer| Vehicle::wagon(format!("Wagen {nummer}"))).collect(),
        };
        let train = make_train(&map, vehicles)?;
        let mut simulation = Simulation { map, train, speed, letzte_warnung: None };
        simulation.check_look_ahead()?;
        Ok(simulation)
    }

    /// Die Karte.
    #[must_use]
    pub fn map(&self) -> &Map {
        &self.map
    }

    /// Der Zug.
    #[must_use]
    pub fn train(&self) -> &Train {
        &self.train
    }

    /// Bewege den Zug für `dt` Sekunden.
    ///
    /// Gibt die Hangabtriebskraft nach der Bewegung zurück.
    ///
    /// ## Errors
    ///
    /// Der Zug ist entgleist.
    pub fn tick(&mut self, dt: f32) -> Result<f32, MoveError> {
        // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
        #[allow(clippy::arithmetic_side_effects)]
        let strecke = self.speed * dt;
        let wechsel = self.train.move_by(&self.map, strecke)?;
        if wechsel > 0 {
            self.check_look_ahead()?;
        }
        Ok(self.train.grade_force())
    }

    /// Melde die erste Warnung vor dem Zug, falls sie neu ist.
    fn check_look_ahead(&mut self) -> Result<(), MoveError> {
        let warnung = self
            .train
            .look_ahead(&self.map)?
            .map(|Step { connection, status, .. }| (connection.position, status));
        if warnung != self.letzte_warnung {
            match warnung {
                Some((position, Status::NoMore)) => warn!("Strecke endet voraus bei {position}."),
                Some((position, Status::Station)) => info!("Bahnhof voraus bei {position}."),
                Some((position, Status::Choice)) => info!("Weiche voraus bei {position}."),
                Some((_, Status::Ok)) | None => {},
            }
            self.letzte_warnung = warnung;
        }
        Ok(())
    }

    /// Beende die Simulation und gebe die Karte zurück.
    #[must_use]
    pub fn into_map(self) -> Map {
        self.map
    }
}

/// Parse die Kommandozeilen-Argumente und führe die Simulation aus.
///
/// ## Errors
///
/// Siehe [`run`].
pub fn run_from_env() -> Result<(), Error> {
    run(Args::parse_from_env())
}

/// Führe die Simulation mit den übergebenen Argumenten aus.
///
/// ## Errors
///
/// Der Logger kann nicht gestartet werden, die Strecke kann nicht geladen oder gespeichert werden,
/// oder der Zug entgleist.
pub fn run(args: Args) -> Result<(), Error> {
    let logger_handle = start_logger(args.verbose, args.log_datei)?;
    let ergebnis = simuliere(&args);
    if let Err(fehler) = &ergebnis {
        error!("Simulation abgebrochen: {fehler}");
    }
    // explizit drop aufrufen, damit logger_handle auf jeden Fall lang genug in scope bleibt.
    drop(logger_handle);
    ergebnis
}

/// Lade die Strecke, fahre alle Schritte und speichere das Ergebnis.
fn simuliere(args: &Args) -> Result<(), Error> {
    let map = match &args.pfad {
        Some(pfad) => Map::load(pfad).map_err(Error::Load)?,
        None => demo_layout()?,
    };
    let mut simulation = Simulation::new(map, args.wagen, args.geschwindigkeit)?;
    let ticks = args.ticks();
    for tick in 0..ticks {
        let kraft = simulation.tick(args.takt)?;
        debug!("Schritt {tick}: Hangabtriebskraft {kraft}");
    }
    let translation = simulation.train().engine().transform().translation;
    info!(
        "Nach {ticks} Schritten steht die Lokomotive bei ({:.2}, {:.2}).",
        translation.x, translation.y
    );
    if let Some(pfad) = &args.speichern {
        simulation.into_map().save(pfad).map_err(Error::Save)?;
    }
    Ok(())
}
