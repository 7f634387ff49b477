//! Rivers: ordered buses of parallel conductors.
//!
//! A river is a view over pads, not an owner — it holds [`PadId`] handles
//! and borrows the board per operation. Order is semantically meaningful:
//! when two rivers are merged, members are joined index by index.
//!
//! Invariant: every member shares the heading of the first member.
//! Construction checks it, and every river-level transform preserves it.

use crate::board::{Board, PadId};
use crate::error::{LayoutError, LayoutResult};

/// An ordered, direction-consistent bundle of conductors.
#[derive(Debug, Clone)]
pub struct River {
    members: Vec<PadId>,
}

impl River {
    /// Wraps an ordered pad sequence as a river.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::HeadingMismatch`] if any member's heading
    /// differs from the first member's.
    pub fn new(board: &Board, members: Vec<PadId>) -> LayoutResult<Self> {
        if let Some(&first) = members.first() {
            let lead = board.pad(first).cursor();
            for (index, &id) in members.iter().enumerate().skip(1) {
                let cursor = board.pad(id).cursor();
                if !lead.heading_matches(&cursor) {
                    return Err(LayoutError::HeadingMismatch {
                        index,
                        expected: lead.heading,
                        actual: cursor.heading,
                    });
                }
            }
        }
        Ok(Self { members })
    }

    /// Number of conductors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when the river has no conductors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The member pads, in bus order.
    #[must_use]
    pub fn members(&self) -> &[PadId] {
        &self.members
    }

    /// Advances every member along its heading, preserving relative spacing.
    pub fn forward(&self, board: &mut Board, distance: f64) {
        for &id in &self.members {
            board.pad_mut(id).forward(distance);
        }
    }

    /// Joins this river to `other`, index by index.
    ///
    /// Each member runs one straight segment to its partner's position. As
    /// long as both buses are ordered monotonically along their lines, the
    /// resulting fan of straight conductors cannot cross itself — which is
    /// what lets two buses of different pitch merge. Headings are left
    /// untouched, so direction consistency survives.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::GeometryMismatch`] if the rivers differ in
    /// length.
    pub fn meet(&self, board: &mut Board, other: &Self) -> LayoutResult<()> {
        if self.len() != other.len() {
            return Err(LayoutError::geometry_mismatch(
                "meet",
                self.len(),
                other.len(),
            ));
        }
        for (&a, &b) in self.members.iter().zip(&other.members) {
            let target = board.pad(b).pos();
            board.pad_mut(a).goto(target);
        }
        Ok(())
    }

    /// Commits every member's pending path to copper.
    pub fn wire(&self, board: &mut Board) {
        for &id in &self.members {
            board.wire(id, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::DesignRules;
    use crate::geom::Cursor;

    const EPS: f64 = 1e-9;

    fn board() -> Board {
        Board::new(DesignRules::default(), 100.0, 100.0)
    }

    /// A bus of `n` north-facing pads spaced `pitch` apart along X.
    fn bus(board: &mut Board, n: usize, y: f64, heading: f64, pitch: f64) -> River {
        let members = (0..n)
            .map(|i| {
                board.place_pad(Cursor::with_heading(pitch * i as f64, y, heading))
            })
            .collect();
        River::new(board, members).unwrap()
    }

    #[test]
    fn construction_rejects_mixed_headings() {
        let mut b = board();
        let a = b.place_pad(Cursor::with_heading(0.0, 0.0, 90.0));
        let c = b.place_pad(Cursor::with_heading(1.0, 0.0, 180.0));
        let err = River::new(&b, vec![a, c]).unwrap_err();
        assert!(matches!(err, LayoutError::HeadingMismatch { index: 1, .. }));
    }

    #[test]
    fn forward_preserves_spacing_and_direction() {
        let mut b = board();
        let river = bus(&mut b, 4, 0.0, 90.0, 0.381);
        river.forward(&mut b, 7.0);

        let first = b.pad(river.members()[0]).cursor();
        for (i, &id) in river.members().iter().enumerate() {
            let cursor = b.pad(id).cursor();
            assert!(cursor.heading_matches(&first));
            assert!((cursor.pos.x - 0.381 * i as f64).abs() < EPS);
            assert!((cursor.pos.y - 7.0).abs() < EPS);
        }
    }

    #[test]
    fn meet_rejects_length_mismatch() {
        let mut b = board();
        let five = bus(&mut b, 5, 0.0, 90.0, 0.5);
        let four = bus(&mut b, 4, 10.0, 270.0, 0.5);
        let err = five.meet(&mut b, &four).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::GeometryMismatch {
                expected: 5,
                actual: 4,
                ..
            }
        ));
    }

    #[test]
    fn meet_lands_each_member_on_its_partner() {
        let mut b = board();
        // Two parallel buses facing each other, offset half a pitch in X.
        let up = bus(&mut b, 3, 0.0, 90.0, 0.5);
        let down = bus(&mut b, 3, 10.0, 270.0, 0.5);
        for &id in down.members() {
            let x = b.pad(id).pos().x + 0.25;
            let y = b.pad(id).pos().y;
            let heading = b.pad(id).heading();
            b.pad_mut(id).seat(Cursor::with_heading(x, y, heading));
        }

        up.meet(&mut b, &down).unwrap();

        let first = b.pad(up.members()[0]).cursor();
        for (&a, &d) in up.members().iter().zip(down.members()) {
            let joined = b.pad(a).pos();
            let partner = b.pad(d).pos();
            assert!((joined.x - partner.x).abs() < EPS);
            assert!((joined.y - partner.y).abs() < EPS);
            // Direction consistency survives the merge.
            assert!(b.pad(a).cursor().heading_matches(&first));
        }
    }

    #[test]
    fn wire_commits_one_track_per_routed_member() {
        let mut b = board();
        let river = bus(&mut b, 3, 0.0, 90.0, 0.5);
        river.forward(&mut b, 5.0);
        river.wire(&mut b);
        assert_eq!(b.tracks().len(), 3);
    }
}
