//! Karte aus Kacheln mit Gleisen, Gelände und Bahnhöfen.
//!
//! Neben der Verwaltung der Gleise enthält die Karte den Editor zum Zeichnen neuer Gleise
//! und den [`TrackIterator`](iterator::TrackIterator) zur Vorausschau.

#![allow(clippy::pub_use)]

pub mod editor;
pub mod error;
pub mod iterator;
pub mod map;
pub mod save;
pub mod terrain;

pub use self::{
    editor::{MergeOutcome, PlaceOutcome},
    error::MapError,
    iterator::{iterate_track, Status, TrackIterator},
    map::{Map, SegmentId, Station},
    save::SaveError,
};

#[cfg(test)]
mod test;
