//! The linear escape: one component's pins become one pitch-spaced bus.
//!
//! A component's pins are where the footprint says they are — two columns,
//! a ring, whatever. Routing wants a single straight line of conductors at
//! the board's route pitch. The escape filters out the always-bussed pins
//! (power and ground go to the pours instead), mirrors the two physical
//! sub-ranges around a pivot, and re-targets every remaining pin onto a
//! line through the pivot's turned pose.

use tracing::debug;

use crate::board::{Board, PadId};
use crate::error::{LayoutError, LayoutResult};
use crate::parts::Part;
use crate::route::River;

/// Footprint-specific escape constants.
///
/// `pivot` indexes the *filtered* pad list (exclusions already removed) and
/// names the last pad before the footprint's physical discontinuity — for a
/// two-row header, the end of the first column. `pivot_turn` rotates the
/// pivot pad's pose to face outward from the component body; `member_turn`
/// is applied to every pad before re-targeting, for footprints whose pads
/// were rotated at placement time.
#[derive(Debug, Clone, Copy)]
pub struct EscapePlan {
    /// Index of the last pre-discontinuity pad in the filtered list.
    pub pivot: usize,
    /// Turn (anticlockwise degrees) from the pivot pad's heading to the
    /// bus line direction.
    pub pivot_turn: f64,
    /// Turn applied to each pad before it is moved onto the bus line.
    pub member_turn: f64,
}

/// Escapes a part's non-excluded pads into one ordered, evenly spaced bus.
///
/// The new pitch anchor `w` is the measured distance between the pivot and
/// its filtered successor — the component's true lead spacing — so the
/// first conductors clear the component body no matter what the configured
/// route pitch is. Member order mirrors the two physical sub-ranges
/// (`[0..=pivot]` and `[pivot+1..]` each reversed) so pins fan out
/// symmetrically from the pivot.
///
/// # Errors
///
/// Returns [`LayoutError::PivotOutOfRange`] if the filtered list is too
/// short for the plan's pivot to have a successor.
pub fn escape_linear(
    board: &mut Board,
    part: &Part,
    exclude: &[&str],
    plan: &EscapePlan,
) -> LayoutResult<River> {
    let filtered: Vec<PadId> = part
        .pads()
        .iter()
        .filter(|&&id| {
            board
                .pad(id)
                .name()
                .map_or(true, |name| !exclude.contains(&name))
        })
        .copied()
        .collect();

    let n = plan.pivot;
    if n + 1 >= filtered.len() {
        return Err(LayoutError::PivotOutOfRange {
            pivot: n,
            available: filtered.len(),
        });
    }

    let pivot = board
        .pad(filtered[n])
        .cursor()
        .turned_left(plan.pivot_turn);
    let w = pivot.distance(&board.pad(filtered[n + 1]).cursor());
    let c = board.rules().route_pitch();

    let order: Vec<PadId> = filtered[..=n]
        .iter()
        .rev()
        .chain(filtered[n + 1..].iter().rev())
        .copied()
        .collect();
    let count = order.len();

    for (i, &id) in order.iter().enumerate() {
        let offset = (w / 2.0) - (c * count as f64 / 2.0) + c * i as f64;
        let target = pivot.advanced(offset).pos;
        let pad = board.pad_mut(id);
        if plan.member_turn != 0.0 {
            pad.left(plan.member_turn);
        }
        pad.goto(target);
    }

    // Every member takes the lead pad's heading: river direction
    // consistency is established here and preserved downstream.
    let lead_heading = board.pad(order[0]).heading();
    for &id in &order {
        board.pad_mut(id).set_heading(lead_heading);
    }

    debug!(
        part = part.refdes(),
        conductors = count,
        lead_spacing = w,
        pitch = c,
        "escaped part into bus"
    );
    River::new(board, order)
}
