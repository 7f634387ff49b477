//! Abstract signal roles → concrete pin names.
//!
//! Peripheral modules ask for roles ("sda", "analog", "digital"), not pins.
//! The resolver owns two strategies: a direct table for singular roles, and
//! depletable pools for roles backed by several interchangeable pins. An
//! unrecognised role falls through unchanged as a literal pin request —
//! deliberate, so a module can pin itself to specific silicon, but easy to
//! misuse: a typo'd role resolves to a pin name that exists nowhere and
//! only fails later at the distributor. The [`Resolved`] tag keeps the two
//! cases distinguishable so callers can at least log the fallthrough.

use std::collections::VecDeque;

use indexmap::IndexMap;

use crate::error::{LayoutError, LayoutResult};

/// Outcome of a role resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// The role was recognised and mapped to this pin name.
    Role(String),
    /// The role was unrecognised and passed through as a literal pin name.
    Literal(String),
}

impl Resolved {
    /// The concrete pin name, whichever way it was produced.
    #[must_use]
    pub fn pin_name(&self) -> &str {
        match self {
            Self::Role(name) | Self::Literal(name) => name,
        }
    }

    /// True when resolution fell through to the literal-pin escape hatch.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

/// An ordered, depletable set of interchangeable pin names.
#[derive(Debug, Clone)]
pub struct Pool {
    candidates: VecDeque<String>,
    capacity: usize,
}

impl Pool {
    /// Creates a pool from candidate pin names, in allocation order.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let candidates: VecDeque<String> = names.into_iter().map(Into::into).collect();
        let capacity = candidates.len();
        Self {
            candidates,
            capacity,
        }
    }

    /// Removes and returns the first unused candidate, if any.
    pub fn take(&mut self) -> Option<String> {
        self.candidates.pop_front()
    }

    /// Number of candidates the pool started with.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of candidates still available.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.candidates.len()
    }
}

/// Role-resolution table for one microcontroller.
#[derive(Debug, Default)]
pub struct InterfaceMap {
    direct: IndexMap<String, String>,
    pools: IndexMap<String, Pool>,
}

impl InterfaceMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a singular role → pin mapping.
    #[must_use]
    pub fn direct(mut self, role: &str, pin: &str) -> Self {
        self.direct.insert(role.to_string(), pin.to_string());
        self
    }

    /// Adds a pooled role backed by interchangeable pins.
    #[must_use]
    pub fn pool<I, S>(mut self, role: &str, pins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pools.insert(role.to_string(), Pool::new(pins));
        self
    }

    /// Resolves a role to a pin name.
    ///
    /// Pools win over the direct table; a pooled hit permanently consumes
    /// one candidate. Unknown roles pass through as
    /// [`Resolved::Literal`].
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::PoolExhausted`] when a pooled role is out of
    /// candidates.
    pub fn resolve(&mut self, role: &str) -> LayoutResult<Resolved> {
        if let Some(pool) = self.pools.get_mut(role) {
            let capacity = pool.capacity();
            return pool
                .take()
                .map(Resolved::Role)
                .ok_or_else(|| LayoutError::pool_exhausted(role, capacity));
        }
        if let Some(pin) = self.direct.get(role) {
            return Ok(Resolved::Role(pin.clone()));
        }
        Ok(Resolved::Literal(role.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_roles_resolve_repeatably() {
        let mut map = InterfaceMap::new().direct("sda", "GP14");
        for _ in 0..3 {
            assert_eq!(
                map.resolve("sda").unwrap(),
                Resolved::Role("GP14".to_string())
            );
        }
    }

    #[test]
    fn pooled_roles_hand_out_each_candidate_once_in_order() {
        let mut map = InterfaceMap::new().pool("analog", ["A", "B"]);
        assert_eq!(map.resolve("analog").unwrap().pin_name(), "A");
        assert_eq!(map.resolve("analog").unwrap().pin_name(), "B");

        let err = map.resolve("analog").unwrap_err();
        match err {
            LayoutError::PoolExhausted { role, capacity } => {
                assert_eq!(role, "analog");
                assert_eq!(capacity, 2);
            }
            other => panic!("expected PoolExhausted, got {other}"),
        }
    }

    #[test]
    fn unknown_roles_fall_through_as_literals() {
        let mut map = InterfaceMap::new().direct("tx", "TX");
        let resolved = map.resolve("GP22").unwrap();
        assert!(resolved.is_literal());
        assert_eq!(resolved.pin_name(), "GP22");
    }

    #[test]
    fn pools_shadow_the_direct_table() {
        let mut map = InterfaceMap::new()
            .direct("tx", "TX0")
            .pool("tx", ["GP0", "GP8"]);
        assert_eq!(map.resolve("tx").unwrap().pin_name(), "GP0");
        assert_eq!(map.resolve("tx").unwrap().pin_name(), "GP8");
    }

    #[test]
    fn pool_remaining_tracks_allocations() {
        let mut pool = Pool::new(["X", "Y", "Z"]);
        assert_eq!(pool.capacity(), 3);
        assert_eq!(pool.remaining(), 3);
        pool.take();
        assert_eq!(pool.remaining(), 2);
        assert_eq!(pool.capacity(), 3);
    }
}
