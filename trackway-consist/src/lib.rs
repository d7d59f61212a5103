//! Züge aus mehreren Fahrzeugen, die sich entlang der Gleise einer Karte bewegen.

#![allow(clippy::pub_use)]

pub mod error;
pub mod train;
pub mod vehicle;

pub use self::{
    error::MoveError,
    train::{make_train, Part, Sign, Train},
    vehicle::{Vehicle, VehicleKind},
};

#[cfg(test)]
mod test;
