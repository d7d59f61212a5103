//! Grundlegende Typen für ein Gleisnetz auf einem Kachel-Raster.
//!
//! Kacheln werden über ganzzahlige [`Positionen`](position::Position) adressiert,
//! die Mitte der Kachel `(x, y)` liegt in Welt-Koordinaten bei `(x, y, 0)`.
//! Die z-Achse zeigt nach oben.

pub mod angle;
pub mod connection;
pub mod direction;
pub mod heading;
pub mod position;
pub mod transform;
pub mod vector;
