//! Ids zur Identifikation der Gleise und ein Arena-Speicher, der sie vergibt.
//!
//! Ein Gleis wird von allen Kacheln referenziert, die es belegt.
//! Jede Kachel hält einen Anker ([`Arena::anchor`]); das Gleis wird erst entfernt,
//! wenn der letzte Anker freigegeben wurde ([`Arena::release`]).

use std::{
    any::type_name,
    cmp::Ordering,
    fmt::{self, Debug, Formatter},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use log::{error, trace};
use thiserror::Error;

#[cfg(test)]
mod test;

/// Zahlen-typ, der über [`Id::representation`] erhalten werden kann.
pub type Representation = u32;

/// Eine eindeutige [`Id`] für einen Eintrag vom Typ `T` in einer [`Arena`].
///
/// Wird ein Eintrag entfernt, kann seine Repräsentation wiederverwendet werden.
/// Die Generation unterscheidet die alte von der neuen [`Id`].
pub struct Id<T> {
    /// Index in der [`Arena`].
    index: Representation,
    /// Generation des Index zum Zeitpunkt der Erzeugung.
    generation: Representation,
    /// [`PhantomData`]
    phantom: PhantomData<fn() -> T>,
}

impl<T> Debug for Id<T> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "Id<{}>({}#{})", type_name::<T>(), self.index, self.generation)
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.index, self.generation).cmp(&(other.index, other.generation))
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> Id<T> {
    /// Erhalte eine Zahl für die [`Id`].
    ///
    /// Zwei gleichzeitig existierende [`Ids`](Id) einer [`Arena`] geben unterschiedliche Zahlen zurück.
    /// Sobald der Eintrag entfernt wurde kann es sein, dass eine andere [`Id`] die selbe Zahl zurückgibt.
    #[must_use]
    pub fn representation(&self) -> Representation {
        self.index
    }
}

/// Die [`Id`] gehört zu keinem (nicht mehr) existierenden Eintrag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unbekannte Id {index}#{generation} für den Typ {type_name}!")]
pub struct UnknownId {
    /// Index der unbekannten [`Id`].
    pub index: Representation,
    /// Generation der unbekannten [`Id`].
    pub generation: Representation,
    /// Der [`Typ-Name`](type_name) des Eintrags.
    pub type_name: &'static str,
}

impl UnknownId {
    /// Erzeuge einen neuen [`UnknownId`]-Fehler.
    fn für<T>(id: Id<T>) -> Self {
        UnknownId { index: id.index, generation: id.generation, type_name: type_name::<T>() }
    }
}

/// Ergebnis von [`Arena::release`].
#[derive(Debug, Clone, PartialEq)]
pub enum Released<T> {
    /// Es existieren noch weitere Anker.
    StillAnchored(usize),
    /// Der letzte Anker wurde freigegeben, der Eintrag wurde entfernt.
    Destroyed(T),
}

/// Ein Platz in der [`Arena`].
#[derive(Debug, Clone)]
struct Slot<T> {
    /// Aktuelle Generation des Platzes.
    generation: Representation,
    /// Der gespeicherte Eintrag mit Anzahl seiner Anker.
    eintrag: Option<(T, usize)>,
}

/// Speicher für Einträge vom Typ `T`, adressiert über [`Ids`](Id).
#[derive(Debug, Clone)]
pub struct Arena<T> {
    /// Alle Plätze, belegt oder frei.
    slots: Vec<Slot<T>>,
    /// Indizes freier Plätze.
    frei: Vec<Representation>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Arena { slots: Vec::new(), frei: Vec::new() }
    }
}

impl<T> Arena<T> {
    /// Erzeuge eine leere [`Arena`].
    #[must_use]
    pub fn new() -> Self {
        Arena::default()
    }

    /// Füge einen neuen Eintrag (ohne Anker) hinzu.
    ///
    /// ## Panics
    ///
    /// Wenn mehr als [`Representation::MAX`] Einträge gleichzeitig existieren.
    pub fn insert(&mut self, wert: T) -> Id<T> {
        let id = if let Some(index) = self.frei.pop() {
            let slot = self.slot_mut(index).expect("Freier Index existiert in der Arena.");
            slot.generation = slot.generation.wrapping_add(1);
            slot.eintrag = Some((wert, 0));
            Id { index, generation: slot.generation, phantom: PhantomData }
        } else {
            let index = Representation::try_from(self.slots.len())
                .expect("Weniger als u32::MAX Einträge in der Arena.");
            self.slots.push(Slot { generation: 0, eintrag: Some((wert, 0)) });
            Id { index, generation: 0, phantom: PhantomData }
        };
        trace!("Neue {id:?}.");
        id
    }

    /// Der Platz zum `index`.
    fn slot_mut(&mut self, index: Representation) -> Option<&mut Slot<T>> {
        usize::try_from(index).ok().and_then(|index| self.slots.get_mut(index))
    }

    /// Der belegte Platz zur `id`.
    fn eintrag(&self, id: Id<T>) -> Option<&(T, usize)> {
        usize::try_from(id.index)
            .ok()
            .and_then(|index| self.slots.get(index))
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.eintrag.as_ref())
    }

    /// Der belegte Platz zur `id`.
    fn eintrag_mut(&mut self, id: Id<T>) -> Option<&mut (T, usize)> {
        self.slot_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.eintrag.as_mut())
    }

    /// Der Eintrag zur `id`.
    #[must_use]
    pub fn get(&self, id: Id<T>) -> Option<&T> {
        self.eintrag(id).map(|(wert, _anker)| wert)
    }

    /// Der Eintrag zur `id`.
    pub fn get_mut(&mut self, id: Id<T>) -> Option<&mut T> {
        self.eintrag_mut(id).map(|(wert, _anker)| wert)
    }

    /// Existiert ein Eintrag zur `id`?
    #[must_use]
    pub fn contains(&self, id: Id<T>) -> bool {
        self.eintrag(id).is_some()
    }

    /// Anzahl der Anker des Eintrags zur `id`.
    #[must_use]
    pub fn anchors(&self, id: Id<T>) -> Option<usize> {
        self.eintrag(id).map(|(_wert, anker)| *anker)
    }

    /// Füge einen weiteren Anker für den Eintrag zur `id` hinzu.
    ///
    /// ## Errors
    ///
    /// Es existiert kein Eintrag zur `id`.
    pub fn anchor(&mut self, id: Id<T>) -> Result<usize, UnknownId> {
        let (_wert, anker) = self.eintrag_mut(id).ok_or_else(|| UnknownId::für(id))?;
        *anker = anker.saturating_add(1);
        Ok(*anker)
    }

    /// Gebe einen Anker des Eintrags zur `id` frei.
    /// Wurde der letzte Anker freigegeben wird der Eintrag entfernt.
    ///
    /// ## Errors
    ///
    /// Es existiert kein Eintrag zur `id`.
    pub fn release(&mut self, id: Id<T>) -> Result<Released<T>, UnknownId> {
        let (_wert, anker) = self.eintrag_mut(id).ok_or_else(|| UnknownId::für(id))?;
        *anker = anker.saturating_sub(1);
        if *anker > 0 {
            Ok(Released::StillAnchored(*anker))
        } else {
            self.remove(id).map(Released::Destroyed).ok_or_else(|| UnknownId::für(id))
        }
    }

    /// Entferne den Eintrag zur `id`, unabhängig von seinen Ankern.
    pub fn remove(&mut self, id: Id<T>) -> Option<T> {
        let slot = self.slot_mut(id.index).filter(|slot| slot.generation == id.generation)?;
        let (wert, anker) = slot.eintrag.take()?;
        if anker > 0 {
            error!("{id:?} wurde mit {anker} verbleibenden Ankern entfernt!");
        }
        self.frei.push(id.index);
        trace!("Entferne {id:?}.");
        Some(wert)
    }

    /// Anzahl der gespeicherten Einträge.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.eintrag.is_some()).count()
    }

    /// Ist die [`Arena`] leer?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Alle Einträge mit ihrer [`Id`].
    pub fn iter(&self) -> impl Iterator<Item = (Id<T>, &T)> {
        self.slots.iter().zip(0..).filter_map(|(slot, index)| {
            slot.eintrag.as_ref().map(|(wert, _anker)| {
                (Id { index, generation: slot.generation, phantom: PhantomData }, wert)
            })
        })
    }
}
