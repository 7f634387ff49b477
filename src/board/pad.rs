//! Pads: named, directed component terminals.
//!
//! A pad is a cursor with identity. It starts life where its footprint put
//! it, carries an optional name used for lookup within its component, and
//! records a pending [`Path`](crate::board::path::Path) as routing algorithms
//! walk it across the board. Copying a pad (via
//! [`Board::copy_pad`](crate::board::Board::copy_pad)) yields an independent
//! terminal at the same pose — the copy can be renamed and routed without
//! touching the original.

use crate::board::path::Path;
use crate::board::Layer;
use crate::geom::{Cursor, Point};

/// Stable handle to a pad in the board arena.
///
/// Components and rivers refer to pads by id rather than by reference, so a
/// single mutable borrow of the board suffices for any routing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PadId(pub(crate) usize);

impl PadId {
    /// Index into the board's pad arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A component terminal.
#[derive(Debug, Clone)]
pub struct Pad {
    path: Path,
    name: Option<String>,
    width: Option<f64>,
}

impl Pad {
    pub(crate) fn new(cursor: Cursor, layer: Layer) -> Self {
        Self {
            path: Path::at(cursor, layer),
            name: None,
            width: None,
        }
    }

    /// Current pose.
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.path.cursor()
    }

    /// Current position.
    #[must_use]
    pub const fn pos(&self) -> Point {
        self.path.cursor().pos
    }

    /// Current heading in degrees.
    #[must_use]
    pub const fn heading(&self) -> f64 {
        self.path.cursor().heading
    }

    /// The pad's name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sets or clears the pad's name.
    ///
    /// Pads owned by a component should be renamed through
    /// [`Part::name_pad`](crate::parts::Part::name_pad), which keeps the
    /// component's lookup table consistent; this is for loose pads (rails,
    /// plane ties) that no component tracks.
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Trace width override for conductors leaving this pad.
    #[must_use]
    pub const fn width(&self) -> Option<f64> {
        self.width
    }

    /// Overrides the trace width for conductors leaving this pad.
    pub fn set_width(&mut self, width: f64) {
        self.width = Some(width);
    }

    /// Re-seats the pad at a new pose, discarding any pending path.
    ///
    /// Placement-time operation; identity and name survive the move.
    pub fn seat(&mut self, cursor: Cursor) {
        self.path.teleport(cursor);
    }

    /// Advances the pad along its heading, recording pending copper.
    pub fn forward(&mut self, distance: f64) {
        self.path.forward(distance);
    }

    /// Turns the pad anticlockwise.
    pub fn left(&mut self, degrees: f64) {
        self.path.turn_left(degrees);
    }

    /// Turns the pad clockwise.
    pub fn right(&mut self, degrees: f64) {
        self.path.turn_right(degrees);
    }

    /// Moves the pad straight to `target`, recording pending copper.
    pub fn goto(&mut self, target: Point) {
        self.path.goto(target);
    }

    /// Forces the heading without recording any motion.
    pub fn set_heading(&mut self, heading: f64) {
        self.path.set_heading(heading);
    }

    /// Expresses `target` in the pad's frame as `(sideways, forward)`.
    #[must_use]
    pub fn seek(&self, target: Point) -> (f64, f64) {
        self.cursor().seek(target)
    }

    /// Borrows the pending path (routing extensions start from here).
    #[must_use]
    pub const fn route(&self) -> &Path {
        &self.path
    }

    pub(crate) fn route_mut(&mut self) -> &mut Path {
        &mut self.path
    }
}
