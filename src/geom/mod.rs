//! Planar geometry primitives: points and oriented cursors.
//!
//! The [`Cursor`] is the unit of spatial state threaded through every layout
//! algorithm: an oriented point supporting forward motion, turns and cheap
//! independent copies. It is a plain value type — cloning a cursor never
//! shares mutable state with the original, so branching an alternate path is
//! just `let probe = cursor;`.
//!
//! Headings are measured in degrees, anticlockwise, with 0° along +X.

use serde::{Deserialize, Serialize};

/// A 2D point in millimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate (mm).
    pub x: f64,
    /// Y coordinate (mm).
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(&self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// An oriented point: position plus heading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    /// Current position (mm).
    pub pos: Point,
    /// Heading in degrees, anticlockwise from +X.
    pub heading: f64,
}

impl Cursor {
    /// Creates a cursor at the given position, heading along +X.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            pos: Point::new(x, y),
            heading: 0.0,
        }
    }

    /// Creates a cursor with an explicit heading.
    #[must_use]
    pub const fn with_heading(x: f64, y: f64, heading: f64) -> Self {
        Self {
            pos: Point::new(x, y),
            heading,
        }
    }

    /// Advances along the current heading.
    pub fn forward(&mut self, distance: f64) -> &mut Self {
        let (sin, cos) = self.heading.to_radians().sin_cos();
        self.pos.x += distance * cos;
        self.pos.y += distance * sin;
        self
    }

    /// Turns anticlockwise by `degrees`.
    pub fn left(&mut self, degrees: f64) -> &mut Self {
        self.heading = normalise(self.heading + degrees);
        self
    }

    /// Turns clockwise by `degrees`.
    pub fn right(&mut self, degrees: f64) -> &mut Self {
        self.heading = normalise(self.heading - degrees);
        self
    }

    /// Returns a copy advanced along the heading.
    #[must_use]
    pub fn advanced(mut self, distance: f64) -> Self {
        self.forward(distance);
        self
    }

    /// Returns a copy turned anticlockwise.
    #[must_use]
    pub fn turned_left(mut self, degrees: f64) -> Self {
        self.left(degrees);
        self
    }

    /// Returns a copy turned clockwise.
    #[must_use]
    pub fn turned_right(mut self, degrees: f64) -> Self {
        self.right(degrees);
        self
    }

    /// Euclidean distance to another cursor's position.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        self.pos.distance(other.pos)
    }

    /// Expresses `target` in this cursor's frame of reference.
    ///
    /// Returns `(sideways, forward)`: `forward` is the displacement along the
    /// heading, `sideways` the displacement to the right of it. A path that
    /// moves `forward`, turns right 90° and moves `sideways` ends exactly at
    /// `target`.
    #[must_use]
    pub fn seek(&self, target: Point) -> (f64, f64) {
        let dx = target.x - self.pos.x;
        let dy = target.y - self.pos.y;
        let (sin, cos) = self.heading.to_radians().sin_cos();
        let forward = dx * cos + dy * sin;
        let sideways = dx * sin - dy * cos;
        (sideways, forward)
    }

    /// True when both cursors share a heading, modulo full turns.
    #[must_use]
    pub fn heading_matches(&self, other: &Self) -> bool {
        angle_delta(self.heading, other.heading).abs() < HEADING_EPSILON
    }
}

/// Tolerance for heading comparisons, in degrees.
const HEADING_EPSILON: f64 = 1e-9;

/// Wraps an angle into `[0, 360)`.
fn normalise(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

/// Smallest signed difference between two angles, in `[-180, 180)`.
fn angle_delta(a: f64, b: f64) -> f64 {
    (a - b + 180.0).rem_euclid(360.0) - 180.0
}

/// Converts inches to millimetres (component lead pitches are imperial).
#[must_use]
pub fn inches(value: f64) -> f64 {
    value * 25.4
}

/// Converts mils (thousandths of an inch) to millimetres.
#[must_use]
pub fn mil(value: f64) -> f64 {
    value * 0.0254
}
