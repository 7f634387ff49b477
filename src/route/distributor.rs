//! The distributor: a fan-out fixture for one escaped bus.
//!
//! Placed as a train of breakout points along a line, the distributor
//! receives a river on one side and exposes each conductor individually on
//! the other. Every breakout point owns three terminals:
//!
//! - a `pad`, facing the incoming river, escaped towards it and merged;
//! - a `rail`, the pad's 180°-turned copy, facing the consumer side — the
//!   named source endpoint for [`Distributor::via`] routing calls;
//! - a `bar`, a stub for the shared auxiliary conductor, collected once by
//!   [`Distributor::finish`].
//!
//! Point spacing is `via_radius + via_clearance + trace_width/2`, so two
//! via-routed conductors in adjacent slots can never violate clearance.

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::board::{Board, PadId};
use crate::error::{LayoutError, LayoutResult};
use crate::geom::Cursor;
use crate::route::River;

/// Reserved name of the shared auxiliary rail (raw input voltage).
pub const AUX_RAIL: &str = "VH";

/// Distance the bar stubs run when the distributor is finished. Sized so a
/// train placed mid-board reaches across the module band without leaving a
/// 100 mm panel.
const BAR_REACH: f64 = 28.0;

/// Rail label stagger: even slots sit close, odd slots further out, so
/// adjacent silkscreen labels and via drop points never collide.
fn rail_stagger(slot: usize) -> f64 {
    2.0 + 6.0 * ((slot % 2) as f64)
}

/// A fan-out fixture receiving one bus and exposing named conductors.
#[derive(Debug)]
pub struct Distributor {
    pads: Vec<PadId>,
    rails: Vec<PadId>,
    bars: Vec<PadId>,
    /// Rail name → slot index; populated by `breakout`.
    names: IndexMap<String, usize>,
    gap: f64,
}

impl Distributor {
    /// Lays out `slots` breakout points along a line starting at `start`.
    ///
    /// `slots` must be one more than the incoming river's conductor count;
    /// the extra slot carries the shared auxiliary rail. The caller checks
    /// nothing here — the mismatch surfaces in [`Self::breakout`].
    pub fn place(board: &mut Board, start: Cursor, slots: usize) -> Self {
        let gap = board.rules().breakout_gap();
        let mut train = start;
        let mut pads = Vec::with_capacity(slots);
        let mut bars = Vec::with_capacity(slots);
        for _ in 0..slots {
            bars.push(board.place_pad(train.turned_right(90.0)));
            pads.push(board.place_pad(train.turned_left(90.0)));
            train.forward(gap);
        }
        let rails = pads
            .iter()
            .map(|&p| {
                let rail = board.copy_pad(p);
                board.pad_mut(rail).left(180.0);
                rail
            })
            .collect();
        info!(slots, gap, "distributor placed");
        Self {
            pads,
            rails,
            bars,
            names: IndexMap::new(),
            gap,
        }
    }

    /// Number of breakout points.
    #[must_use]
    pub fn slots(&self) -> usize {
        self.pads.len()
    }

    /// Spacing between adjacent breakout points.
    #[must_use]
    pub const fn gap(&self) -> f64 {
        self.gap
    }

    /// Escapes `n` signal pads as a river, ready to merge with another
    /// component's bus.
    ///
    /// The reserved auxiliary slot stays behind; the remaining pads come
    /// out in slot order so that, after the merge, slot `i + 1` physically
    /// carries bus member `i` — the same correspondence
    /// [`Self::breakout`] uses for naming.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::GeometryMismatch`] if the distributor has
    /// fewer than `n` non-reserved slots.
    pub fn escape(&self, board: &Board, n: usize) -> LayoutResult<River> {
        let capacity = self.pads.len().saturating_sub(1);
        if n > capacity {
            return Err(LayoutError::geometry_mismatch(
                "distributor escape",
                capacity,
                n,
            ));
        }
        River::new(board, self.pads.iter().skip(1).take(n).copied().collect())
    }

    /// Binds the incoming bus's conductor names to this distributor's
    /// rails, slot by slot.
    ///
    /// The first slot takes the reserved auxiliary name [`AUX_RAIL`]; slot
    /// `i + 1` takes the name of bus member `i`. No copper is drawn — this
    /// is pure identity assignment, plus the staggered rail offsets and
    /// silkscreen labels that keep adjacent drop points apart.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::GeometryMismatch`] if `bus.len() + 1` differs from
    ///   the slot count (the reserved slot is the classic off-by-one).
    /// - [`LayoutError::UnnamedConductor`] if a bus member has no name.
    /// - [`LayoutError::NameCollision`] if two rails would share a name.
    pub fn breakout(&mut self, board: &mut Board, bus: &River) -> LayoutResult<()> {
        let required = bus.len() + 1;
        if self.pads.len() != required {
            return Err(LayoutError::geometry_mismatch(
                "breakout",
                required,
                self.pads.len(),
            ));
        }

        let mut names = Vec::with_capacity(required);
        names.push(AUX_RAIL.to_string());
        for (index, &member) in bus.members().iter().enumerate() {
            let name = board
                .pad(member)
                .name()
                .ok_or(LayoutError::UnnamedConductor { index })?;
            names.push(name.to_string());
        }

        for (slot, name) in names.into_iter().enumerate() {
            if self.names.insert(name.clone(), slot).is_some() {
                return Err(LayoutError::name_collision(name));
            }
            board.pad_mut(self.pads[slot]).set_name(Some(name.clone()));
            let rail = self.rails[slot];
            board.pad_mut(rail).set_name(Some(name.clone()));
            board.pad_mut(rail).forward(rail_stagger(slot));
            board.annotate(board.pad(rail).pos(), name);
        }
        debug!(rails = self.names.len(), "breakout bound rail names");
        Ok(())
    }

    /// Routes the rail carrying `name` to `target`, anywhere on the board.
    ///
    /// The fixed motion sequence — forward to the target's row, drop a via,
    /// switch copper layer, turn 90°, run sideways to the target — stays
    /// inside the rail's own `gap` corridor as long as `place` maintained
    /// the spacing invariant.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NameNotFound`] if no rail carries `name`.
    pub fn via(&self, board: &mut Board, name: &str, target: PadId) -> LayoutResult<()> {
        let &slot = self
            .names
            .get(name)
            .ok_or_else(|| LayoutError::name_not_found(name))?;
        let rail = self.rails[slot];

        let target_pos = board.pad(target).pos();
        let target_width = board.pad(target).width();
        let (sideways, forward) = board.pad(rail).seek(target_pos);

        // The rail's pending stagger segment rides along with the route.
        let mut route = board.pad(rail).route().clone();
        route.forward(forward);
        route.via();
        route.through();
        route.turn_right(90.0);
        route.forward(sideways);
        board.commit_path(&mut route, target_width);

        debug!(rail = name, forward, sideways, "via routed");
        Ok(())
    }

    /// Commits every bar stub as the shared auxiliary collector.
    ///
    /// Consumes the distributor: all `via` calls must come first, and a
    /// second `finish` cannot happen.
    pub fn finish(self, board: &mut Board) {
        for &bar in &self.bars {
            board.pad_mut(bar).forward(BAR_REACH);
            board.wire(bar, None);
        }
        info!(bars = self.bars.len(), "distributor finished");
    }

    /// Rail names bound by `breakout`, in slot order.
    #[must_use]
    pub fn rail_names(&self) -> Vec<&str> {
        self.names.keys().map(String::as_str).collect()
    }

    /// The rail pad carrying `name`, if bound.
    #[must_use]
    pub fn rail(&self, name: &str) -> Option<PadId> {
        self.names.get(name).map(|&slot| self.rails[slot])
    }
}
