//! Fahrzeuge eines Zuges.

/// Art eines [`Vehicle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleKind {
    /// Eine Lokomotive.
    Engine,
    /// Ein Wagen.
    Wagon,
}

/// Ein einzelnes Fahrzeug.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    /// Der Name.
    pub name: String,
    /// Die Art.
    pub kind: VehicleKind,
    /// Länge in Kacheln.
    pub length: f32,
    /// Masse in Tonnen.
    pub mass: f32,
}

impl Vehicle {
    /// Eine Lokomotive mit Standard-Werten.
    #[must_use]
    pub fn engine(name: impl Into<String>) -> Self {
        Vehicle { name: name.into(), kind: VehicleKind::Engine, length: 1.0, mass: 60. }
    }

    /// Ein Wagen mit Standard-Werten.
    #[must_use]
    pub fn wagon(name: impl Into<String>) -> Self {
        Vehicle { name: name.into(), kind: VehicleKind::Wagon, length: 0.8, mass: 20. }
    }
}
