//! Simulation einer Spielzeug-Eisenbahn auf einem Kachel-Raster.

// Zu viele/große dependencies, um das wirklich zu vermeiden.
#![allow(clippy::multiple_crate_versions)]

fn main() -> Result<(), trackway_simulation::Error> {
    trackway_simulation::run_from_env()
}
