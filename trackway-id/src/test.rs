//! Tests für [`Arena`] und [`Id`].

use std::collections::{BTreeSet, HashSet};

use trackway_test_util::{expect_eq, expect_ne, expect_true, init_test_logging, Expectation};

use crate::{Arena, Id, Released};

#[test]
fn eindeutig() -> Result<(), Expectation> {
    init_test_logging();

    let mut arena = Arena::new();
    let ids: Vec<Id<usize>> = (0..32).map(|i| arena.insert(i)).collect();
    let num = ids.len();
    let btree_set: BTreeSet<_> = ids.iter().collect();
    let hash_set: HashSet<_> = ids.iter().collect();

    // die Anzahl an erzeugten Ids ist identisch zur Anzahl der eindeutigen Ids,
    // unabhängig der verwendeten set-Variante.
    expect_eq(num, btree_set.len())?;
    expect_eq(num, hash_set.len())?;
    expect_eq(arena.len(), 32)?;
    Ok(())
}

#[test]
fn wiederverwendete_repräsentation_neue_generation() -> Result<(), Expectation> {
    init_test_logging();

    let mut arena = Arena::new();
    let alt = arena.insert("alt");
    expect_eq(arena.remove(alt), Some("alt"))?;
    let neu = arena.insert("neu");

    // die Zahl wird wiederverwendet, die Id ist trotzdem unterschiedlich.
    expect_eq(alt.representation(), neu.representation())?;
    expect_ne(alt, neu)?;
    expect_true(arena.get(alt).is_none())?;
    expect_eq(arena.get(neu).copied(), Some("neu"))?;
    Ok(())
}

#[test]
fn letzter_anker_entfernt_eintrag() -> Result<(), Expectation> {
    init_test_logging();

    let mut arena = Arena::new();
    let id = arena.insert('g');
    for _ in 0..3 {
        let _ = arena.anchor(id).expect("Id existiert.");
    }
    expect_eq(arena.anchors(id), Some(3))?;
    expect_eq(arena.release(id), Ok(Released::StillAnchored(2)))?;
    expect_eq(arena.release(id), Ok(Released::StillAnchored(1)))?;
    expect_eq(arena.release(id), Ok(Released::Destroyed('g')))?;
    expect_true(!arena.contains(id))?;
    expect_true(arena.release(id).is_err())?;
    expect_true(arena.is_empty())?;
    Ok(())
}
