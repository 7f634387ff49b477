//! Component footprints and the part abstraction.
//!
//! A [`Part`] is an ordered set of pads fixed relative to one another when
//! the footprint is placed, plus a name-keyed lookup table. Pads are found
//! by name within their component only; renames go through the part so the
//! table stays consistent and the one-name-one-pad invariant is enforced on
//! every insert.

pub mod escape;
pub mod interface;

mod feather;
mod pico;

use indexmap::IndexMap;

use crate::board::{Board, Layer, PadId};
use crate::error::{LayoutError, LayoutResult};
use crate::geom::{inches, Cursor};
use crate::route::River;

pub use escape::{escape_linear, EscapePlan};
pub use feather::Feather;
pub use interface::{InterfaceMap, Pool, Resolved};
pub use pico::Pico;

/// A placed component: ordered pads plus name-keyed lookup.
#[derive(Debug)]
pub struct Part {
    refdes: String,
    pads: Vec<PadId>,
    by_name: IndexMap<String, PadId>,
}

impl Part {
    /// Creates an empty part with the given reference designator.
    #[must_use]
    pub fn new(refdes: impl Into<String>) -> Self {
        Self {
            refdes: refdes.into(),
            pads: Vec::new(),
            by_name: IndexMap::new(),
        }
    }

    /// Reference designator (e.g. "U1", "J3").
    #[must_use]
    pub fn refdes(&self) -> &str {
        &self.refdes
    }

    /// Allocates a pad at `pose` and appends it to the part.
    pub fn add_pad(&mut self, board: &mut Board, pose: Cursor) -> PadId {
        let id = board.place_pad(pose);
        self.pads.push(id);
        id
    }

    /// The part's pads in physical pin order.
    #[must_use]
    pub fn pads(&self) -> &[PadId] {
        &self.pads
    }

    /// Number of pads.
    #[must_use]
    pub fn pin_count(&self) -> usize {
        self.pads.len()
    }

    /// Names (or renames) a pad, keeping the lookup table consistent.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NameCollision`] if another pad of this part
    /// already holds `name`.
    pub fn name_pad(
        &mut self,
        board: &mut Board,
        id: PadId,
        name: impl Into<String>,
    ) -> LayoutResult<()> {
        let name = name.into();
        if let Some(&holder) = self.by_name.get(&name) {
            if holder != id {
                return Err(LayoutError::name_collision(name));
            }
            return Ok(());
        }
        if let Some(old) = board.pad(id).name().map(str::to_string) {
            self.by_name.shift_remove(&old);
        }
        self.by_name.insert(name.clone(), id);
        board.pad_mut(id).set_name(Some(name));
        Ok(())
    }

    /// Looks up a pad by name.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NameNotFound`] if no pad holds `name`.
    pub fn named(&self, name: &str) -> LayoutResult<PadId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| LayoutError::name_not_found(name))
    }

    /// Annotates every named pad on the silkscreen, offset `reach` mm to
    /// the pad's right.
    pub fn label_pads(&self, board: &mut Board, reach: f64) {
        for &id in &self.pads {
            if let Some(name) = board.pad(id).name().map(str::to_string) {
                let at = board.pad(id).cursor().turned_right(90.0).advanced(reach).pos;
                board.annotate(at, name);
            }
        }
    }

    /// Ties a named pad into a poured plane: an independent copy of the pad
    /// is renamed to the plane net and recorded as a thermal relief.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NameNotFound`] if no pad holds `name`.
    pub fn thermal_to_plane(
        &self,
        board: &mut Board,
        name: &str,
        net: &str,
        layer: Layer,
        spoke: f64,
    ) -> LayoutResult<()> {
        let id = self.named(name)?;
        let tie = board.copy_pad(id);
        board.pad_mut(tie).set_name(Some(net.to_string()));
        board.thermal(board.pad(tie).pos(), spoke, layer, net);
        Ok(())
    }
}

/// Places `count` pads along a line, one per `pitch` step.
pub fn train<F>(board: &mut Board, start: Cursor, count: usize, pitch: f64, mut place_one: F) -> Vec<PadId>
where
    F: FnMut(&mut Board, Cursor) -> PadId,
{
    let mut cursor = start;
    (0..count)
        .map(|_| {
            let id = place_one(board, cursor);
            cursor.forward(pitch);
            id
        })
        .collect()
}

/// A two-row through-hole header (DIP/module outline).
///
/// Pin order is the usual counterclockwise U viewed with pin 1 top-left:
/// the first row walks along the part axis on the right-hand side of the
/// walk, the second row walks back on the other side, with both rows
/// aligned at the far end (the corner the escape pivots around). Pads face
/// along their row's walk direction.
pub fn two_row_header(
    board: &mut Board,
    refdes: impl Into<String>,
    at: Cursor,
    rows: (usize, usize),
    row_sep: f64,
) -> Part {
    let pitch = inches(0.1);
    let mut part = Part::new(refdes);

    let first_start = at
        .turned_right(90.0)
        .advanced(row_sep / 2.0)
        .turned_left(90.0);
    let first = train(board, first_start, rows.0, pitch, |b, c| b.place_pad(c));

    // The second row shares the far corner with the first and walks back.
    let mut second_start = at
        .turned_left(90.0)
        .advanced(row_sep / 2.0)
        .turned_right(90.0)
        .advanced(pitch * (rows.0.saturating_sub(1)) as f64);
    second_start.left(180.0);
    let second = train(board, second_start, rows.1, pitch, |b, c| b.place_pad(c));

    for id in first.into_iter().chain(second) {
        part.pads.push(id);
    }
    part
}

/// A single-row header.
pub fn sil_header(
    board: &mut Board,
    refdes: impl Into<String>,
    at: Cursor,
    count: usize,
) -> Part {
    let pitch = inches(0.1);
    let mut part = Part::new(refdes);
    let ids = train(board, at, count, pitch, |b, c| {
        b.place_pad(c.turned_left(90.0))
    });
    part.pads.extend(ids);
    part
}

/// Chip component sizes used by the peripheral modules.
///
/// Land centre half-spans derive from the EIA body dimensions (0402: 1.0 mm
/// body, 0603: 1.6 mm body).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipSize {
    /// 0402 (1005 metric).
    C0402,
    /// 0603 (1608 metric).
    C0603,
}

impl ChipSize {
    /// Distance from component centre to each land centre.
    #[must_use]
    pub const fn half_span(self) -> f64 {
        match self {
            Self::C0402 => 0.5,
            Self::C0603 => 0.8,
        }
    }
}

/// Places a two-terminal chip component centred on `at`, pads facing
/// outward along the axis. The value string lands on the silkscreen.
pub fn chip(
    board: &mut Board,
    refdes: impl Into<String>,
    at: Cursor,
    size: ChipSize,
    value: &str,
) -> Part {
    let mut part = Part::new(refdes);
    let half = size.half_span();

    let mut tail = at;
    tail.left(180.0);
    tail.forward(half);
    part.add_pad(board, tail);

    let head = at.advanced(half);
    part.add_pad(board, head);

    board.annotate(at.pos, value);
    part
}

/// A microcontroller-class component: placeable, escapable, and able to
/// resolve abstract signal roles to concrete pin names.
pub trait Microcontroller {
    /// The underlying part.
    fn part(&self) -> &Part;

    /// Escapes the signal pins into one pitch-spaced bus.
    ///
    /// # Errors
    ///
    /// Propagates escape geometry failures.
    fn escape(&mut self, board: &mut Board) -> LayoutResult<River>;

    /// Resolves an abstract role name ("sda", "analog", ...) to a pin name.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::PoolExhausted`] when a pooled role has no
    /// candidates left.
    fn interface(&mut self, role: &str) -> LayoutResult<Resolved>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::DesignRules;

    const EPS: f64 = 1e-9;

    fn board() -> Board {
        Board::new(DesignRules::default(), 100.0, 100.0)
    }

    #[test]
    fn name_pad_rejects_collisions() {
        let mut b = board();
        let mut part = Part::new("U1");
        let a = part.add_pad(&mut b, Cursor::new(0.0, 0.0));
        let c = part.add_pad(&mut b, Cursor::new(1.0, 0.0));

        part.name_pad(&mut b, a, "SDA").unwrap();
        let err = part.name_pad(&mut b, c, "SDA").unwrap_err();
        assert!(matches!(err, LayoutError::NameCollision { .. }));
    }

    #[test]
    fn rename_releases_the_old_name() {
        let mut b = board();
        let mut part = Part::new("U1");
        let a = part.add_pad(&mut b, Cursor::new(0.0, 0.0));
        let c = part.add_pad(&mut b, Cursor::new(1.0, 0.0));

        part.name_pad(&mut b, a, "SDA").unwrap();
        part.name_pad(&mut b, a, "SCL").unwrap();
        // "SDA" is free again.
        part.name_pad(&mut b, c, "SDA").unwrap();

        assert_eq!(part.named("SCL").unwrap(), a);
        assert_eq!(part.named("SDA").unwrap(), c);
    }

    #[test]
    fn named_lookup_fails_loudly() {
        let part = Part::new("U1");
        let err = part.named("NC").unwrap_err();
        assert!(matches!(err, LayoutError::NameNotFound { .. }));
    }

    #[test]
    fn two_row_header_pin_order_is_a_counterclockwise_u() {
        let mut b = board();
        let part = two_row_header(&mut b, "U1", Cursor::with_heading(0.0, 0.0, 90.0), (4, 4), 10.0);
        assert_eq!(part.pin_count(), 8);

        // Axis heads north: first row on the east side walking north...
        let p0 = b.pad(part.pads()[0]).pos();
        let p3 = b.pad(part.pads()[3]).pos();
        assert!(p0.x > 0.0);
        assert!(p3.y > p0.y);

        // ...second row on the west side walking back south.
        let p4 = b.pad(part.pads()[4]).pos();
        let p7 = b.pad(part.pads()[7]).pos();
        assert!(p4.x < 0.0);
        assert!(p7.y < p4.y);
    }

    #[test]
    fn two_row_header_rows_share_the_far_corner() {
        let mut b = board();
        let part = two_row_header(&mut b, "U1", Cursor::with_heading(0.0, 0.0, 90.0), (4, 2), 10.0);
        // Second row aligns at the far end of the first: its first pad sits
        // level with the first row's last pad, straight across the body.
        let corner = b.pad(part.pads()[3]).pos();
        let across = b.pad(part.pads()[4]).pos();
        assert!((corner.y - across.y).abs() < EPS);
        assert!((corner.distance(across) - 10.0).abs() < EPS);
    }

    #[test]
    fn two_row_header_rows_face_along_their_walk() {
        let mut b = board();
        let part = two_row_header(&mut b, "U1", Cursor::with_heading(0.0, 0.0, 90.0), (3, 3), 8.0);
        assert!((b.pad(part.pads()[0]).heading() - 90.0).abs() < EPS);
        assert!((b.pad(part.pads()[3]).heading() - 270.0).abs() < EPS);
    }

    #[test]
    fn chip_pads_straddle_the_centre() {
        let mut b = board();
        let part = chip(&mut b, "R1", Cursor::new(10.0, 10.0), ChipSize::C0402, "4K7");
        let a = b.pad(part.pads()[0]).pos();
        let c = b.pad(part.pads()[1]).pos();
        assert!((a.x - 9.5).abs() < EPS);
        assert!((c.x - 10.5).abs() < EPS);
        assert_eq!(b.labels().len(), 1);
    }

    #[test]
    fn sil_header_spacing_is_one_tenth_inch() {
        let mut b = board();
        let part = sil_header(&mut b, "J1", Cursor::with_heading(0.0, 0.0, 0.0), 4);
        let first = b.pad(part.pads()[0]).pos();
        let second = b.pad(part.pads()[1]).pos();
        assert!((first.distance(second) - 2.54).abs() < EPS);
    }
}
