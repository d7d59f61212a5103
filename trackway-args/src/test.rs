//! Tests für abgeleitete Werte der Kommandozeilen-Argumente.

use crate::Args;

fn args(dauer: f32, takt: f32) -> Args {
    Args {
        pfad: None,
        speichern: None,
        geschwindigkeit: 2.,
        dauer,
        takt,
        wagen: 3,
        verbose: false,
        log_datei: false,
    }
}

#[test]
fn anzahl_schritte() {
    assert_eq!(args(10., 0.1).ticks(), 100, "10 Sekunden mit 0.1 Sekunden pro Schritt");
    assert_eq!(args(2., 0.5).ticks(), 4, "2 Sekunden mit 0.5 Sekunden pro Schritt");
}

#[test]
fn ungültiger_takt() {
    assert_eq!(args(10., 0.).ticks(), 0, "Ohne Takt gibt es keine Schritte");
    assert_eq!(args(-1., 0.1).ticks(), 0, "Negative Dauer gibt keine Schritte");
    assert_eq!(args(f32::INFINITY, 0.1).ticks(), 0, "Unendliche Dauer wird ignoriert");
}
