//! Pending trace paths.
//!
//! A [`Path`] is a conductor under construction: a cursor that remembers
//! where it has been. Motion appends vertices; [`Path::through`] switches the
//! copper layer mid-run; [`Path::via`] records a layer-change barrel at the
//! current position. Nothing becomes copper until the path is drained into
//! the board by a `wire` call.

use crate::board::Layer;
use crate::geom::{Cursor, Point};

/// A trace path being built up by cursor motion.
#[derive(Debug, Clone)]
pub struct Path {
    cursor: Cursor,
    layer: Layer,
    /// Completed polylines on layers the path has already left.
    segments: Vec<(Layer, Vec<Point>)>,
    /// Vertices on the current layer, starting at the segment origin.
    current: Vec<Point>,
    /// Via positions dropped along the way.
    vias: Vec<Point>,
}

/// Everything a drained path contributes to the board.
#[derive(Debug)]
pub struct PathRecord {
    /// Polylines per layer, in the order they were walked.
    pub segments: Vec<(Layer, Vec<Point>)>,
    /// Via positions.
    pub vias: Vec<Point>,
}

impl Path {
    /// Starts a path at the given pose on the given layer.
    #[must_use]
    pub fn at(cursor: Cursor, layer: Layer) -> Self {
        Self {
            cursor,
            layer,
            segments: Vec::new(),
            current: vec![cursor.pos],
            vias: Vec::new(),
        }
    }

    /// Current pose of the path head.
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Layer the path head is currently on.
    #[must_use]
    pub const fn layer(&self) -> Layer {
        self.layer
    }

    /// Overrides the head pose without recording a vertex.
    ///
    /// Used when a pad is picked up and re-seated (component placement),
    /// as opposed to routed.
    pub fn teleport(&mut self, cursor: Cursor) {
        self.cursor = cursor;
        self.segments.clear();
        self.current = vec![cursor.pos];
        self.vias.clear();
    }

    /// Rotates the head without moving it.
    pub fn turn_left(&mut self, degrees: f64) {
        self.cursor.left(degrees);
    }

    /// Rotates the head without moving it.
    pub fn turn_right(&mut self, degrees: f64) {
        self.cursor.right(degrees);
    }

    /// Sets the head's heading directly, leaving the recorded path alone.
    pub fn set_heading(&mut self, heading: f64) {
        self.cursor.heading = heading;
    }

    /// Advances the head along its heading, recording a vertex.
    pub fn forward(&mut self, distance: f64) {
        self.cursor.forward(distance);
        self.current.push(self.cursor.pos);
    }

    /// Moves the head straight to `target`, recording a vertex.
    pub fn goto(&mut self, target: Point) {
        self.cursor.pos = target;
        self.current.push(target);
    }

    /// Drops a via at the current position.
    pub fn via(&mut self) {
        self.vias.push(self.cursor.pos);
    }

    /// Switches to the opposite copper layer, starting a new segment.
    pub fn through(&mut self) {
        if self.current.len() > 1 {
            self.segments
                .push((self.layer, std::mem::take(&mut self.current)));
        }
        self.layer = self.layer.flipped();
        self.current = vec![self.cursor.pos];
    }

    /// Drains everything recorded so far, leaving the path reset at the
    /// current pose.
    pub fn drain(&mut self) -> PathRecord {
        let mut segments = std::mem::take(&mut self.segments);
        if self.current.len() > 1 {
            segments.push((self.layer, std::mem::take(&mut self.current)));
        }
        self.current = vec![self.cursor.pos];
        PathRecord {
            segments,
            vias: std::mem::take(&mut self.vias),
        }
    }

    /// True when no copper-producing motion has been recorded.
    #[must_use]
    pub fn is_pristine(&self) -> bool {
        self.segments.is_empty() && self.current.len() < 2 && self.vias.is_empty()
    }
}
