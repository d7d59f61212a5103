//! Kommandozeilen-Argumente.

// Zu viele/große dependencies, um das wirklich zu vermeiden.
#![allow(clippy::multiple_crate_versions)]
// Durch derive-Macro für Parse ausgelöst.
#![allow(clippy::shadow_unrelated)]

use std::{env, num::NonZeroI32};

use kommandozeilen_argumente::Parse;

#[derive(Debug, Clone, Parse)]
/// Simulation einer Spielzeug-Eisenbahn auf einem Kachel-Raster.
#[kommandozeilen_argumente(sprache: deutsch, version, hilfe(lang: [hilfe, help], kurz: h))]
pub struct Args {
    /// Lade bei Programmstart die angegebene Datei, ansonsten eine Beispiel-Strecke.
    #[kommandozeilen_argumente(kurz, meta_var: DATEI)]
    pub pfad: Option<String>,

    /// Speichere die Strecke nach der Simulation in der angegebenen Datei.
    #[kommandozeilen_argumente(kurz, meta_var: DATEI)]
    pub speichern: Option<String>,

    /// Geschwindigkeit des Zuges in Kacheln pro Sekunde.
    #[kommandozeilen_argumente(standard: 2., kurz, meta_var: KACHELN)]
    pub geschwindigkeit: f32,

    /// Simulierte Dauer in Sekunden.
    #[kommandozeilen_argumente(standard: 10., kurz, meta_var: SEKUNDEN)]
    pub dauer: f32,

    /// Länge eines Simulations-Schrittes in Sekunden.
    #[kommandozeilen_argumente(standard: 0.1, kurz, meta_var: SEKUNDEN)]
    pub takt: f32,

    /// Anzahl Wagen hinter der Lokomotive.
    #[kommandozeilen_argumente(standard: 3, kurz, meta_var: ANZAHL)]
    pub wagen: usize,

    /// Zeige zusätzliche Informationen in der Konsole an.
    pub verbose: bool,

    /// Speichere Log-Nachrichten zusätzlich in einer Datei.
    #[kommandozeilen_argumente(kurz: l, invertiere_präfix: keine)]
    pub log_datei: bool,
}

impl Args {
    /// Parse Kommandozeilen-Argumente.
    /// Ein einzelnes Argument (das nicht mit "-" beginnt) wird als Pfad interpretiert.
    ///
    /// ## Panics
    ///
    /// Programmierfehler, wenn [`NonZeroI32::new`] [`None`] für den Exit-Code zurückgibt.
    #[must_use]
    pub fn parse_from_env() -> Self {
        let mut args: Vec<_> = env::args_os().skip(1).collect();
        if args.len() == 1
            && !args
                .first()
                .and_then(|os_string| os_string.to_str())
                .is_some_and(|string| string.starts_with('-'))
        {
            // Einzelnes Argument, dass nicht mit '-' beginnt.
            args.insert(0, "--pfad".to_owned().into());
        }
        Args::parse_mit_fehlermeldung(args.into_iter(), NonZeroI32::new(1).expect("1 != 0"))
    }

    /// Anzahl an Simulations-Schritten für [`dauer`](Args::dauer) und [`takt`](Args::takt).
    #[must_use]
    pub fn ticks(&self) -> u32 {
        if self.takt <= 0. || !self.dauer.is_finite() {
            return 0;
        }
        // Wie f32: Schlimmstenfalls kommt es zu Genauigkeits-Problemen.
        #[allow(clippy::arithmetic_side_effects)]
        let anzahl = (self.dauer / self.takt).round();
        // Negative Werte werden zu 0, zu große zu u32::MAX.
        #[allow(clippy::as_conversions, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            anzahl as u32
        }
    }
}

#[cfg(test)]
mod test;
