//! Gleise auf einem Kachel-Raster.
//!
//! Jedes [`Segment`] beschreibt selbst, in welche Richtungen es befahren werden kann,
//! wo es verlassen wird und welchen Weg ein Reisender dabei zurücklegt.
//! Ein Reisender hält dafür einen [`TravelToken`](token::TravelToken).

pub mod bezier;
pub mod crossover;
pub mod curved;
pub mod error;
pub mod points;
pub mod s_bend;
pub mod segment;
pub mod slope;
pub mod spline;
pub mod straight;
pub mod token;

#[allow(clippy::pub_use)]
pub use self::{
    error::TrackError,
    segment::{Merge, Segment, Shape},
};

#[cfg(test)]
mod test;
