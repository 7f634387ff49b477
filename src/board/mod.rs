//! Board state: design rules, the pad arena, and committed copper.
//!
//! The [`Board`] owns every [`Pad`] created during a run. Components and
//! rivers hold [`PadId`] handles into the arena, which keeps mutation simple:
//! any algorithm that needs to move pads or commit copper takes `&mut Board`
//! and nothing else.
//!
//! Copper-fill computation, manufacturing export and label rendering are
//! external collaborators; the board records their inputs (fill requests,
//! outline, annotations) without interpreting them.

pub mod pad;
pub mod path;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geom::{mil, Cursor, Point};

pub use pad::{Pad, PadId};
pub use path::{Path, PathRecord};

/// A copper or silkscreen layer, named Gerber-style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Top copper (GTL).
    #[default]
    TopCopper,
    /// Bottom copper (GBL).
    BottomCopper,
    /// Top silkscreen (GTO).
    TopSilk,
}

impl Layer {
    /// The opposite copper layer. Silkscreen has no opposite and is returned
    /// unchanged.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::TopCopper => Self::BottomCopper,
            Self::BottomCopper => Self::TopCopper,
            Self::TopSilk => Self::TopSilk,
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TopCopper => write!(f, "GTL"),
            Self::BottomCopper => write!(f, "GBL"),
            Self::TopSilk => write!(f, "GTO"),
        }
    }
}

/// Fabrication design rules, all in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesignRules {
    /// Default trace width.
    #[serde(default = "default_trace")]
    pub trace: f64,

    /// Minimum trace-to-trace clearance.
    #[serde(default = "default_space")]
    pub space: f64,

    /// Via annular diameter.
    #[serde(default = "default_via")]
    pub via: f64,

    /// Via drill diameter.
    #[serde(default = "default_via_hole")]
    pub via_hole: f64,

    /// Minimum via-to-anything clearance.
    #[serde(default = "default_via_space")]
    pub via_space: f64,

    /// Silkscreen stroke width.
    #[serde(default = "default_silk")]
    pub silk: f64,
}

impl Default for DesignRules {
    fn default() -> Self {
        Self {
            trace: default_trace(),
            space: default_space(),
            via: default_via(),
            via_hole: default_via_hole(),
            via_space: default_via_space(),
            silk: default_silk(),
        }
    }
}

impl DesignRules {
    /// Centre-to-centre pitch of adjacent conductors in an escaped bus.
    #[must_use]
    pub fn route_pitch(&self) -> f64 {
        self.trace + self.space
    }

    /// Spacing between adjacent distributor breakout points.
    ///
    /// `via_radius + via_clearance + trace_width / 2` guarantees two
    /// via-routed conductors in adjacent slots never violate clearance.
    #[must_use]
    pub fn breakout_gap(&self) -> f64 {
        (self.via / 2.0) + self.via_space + (self.trace / 2.0)
    }
}

fn default_trace() -> f64 {
    0.127
}

fn default_space() -> f64 {
    0.254
}

fn default_via() -> f64 {
    0.6
}

fn default_via_hole() -> f64 {
    0.3
}

fn default_via_space() -> f64 {
    0.2
}

fn default_silk() -> f64 {
    mil(6.0)
}

/// A committed conductor: a polyline of copper at a fixed width.
#[derive(Debug, Clone, Serialize)]
pub struct Track {
    /// Layer the conductor lives on.
    pub layer: Layer,
    /// Conductor width (mm).
    pub width: f64,
    /// Vertices of the polyline.
    pub points: Vec<Point>,
}

/// A committed via barrel.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Via {
    /// Barrel centre.
    pub at: Point,
    /// Annular diameter (mm).
    pub diameter: f64,
    /// Drill diameter (mm).
    pub hole: f64,
}

/// A silkscreen annotation.
#[derive(Debug, Clone, Serialize)]
pub struct Label {
    /// Anchor position.
    pub at: Point,
    /// Text content.
    pub text: String,
}

/// A mounting hole.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Hole {
    /// Hole centre.
    pub at: Point,
    /// Drill diameter (mm).
    pub drill: f64,
    /// Copper keep-out diameter (mm).
    pub keepout: f64,
}

/// A request for the external fill engine: pour `net` over `layer`.
#[derive(Debug, Clone, Serialize)]
pub struct CopperFill {
    /// Layer to pour.
    pub layer: Layer,
    /// Net the pour connects to.
    pub net: String,
}

/// A thermal-relief tie from a pad into a poured plane.
#[derive(Debug, Clone, Serialize)]
pub struct Thermal {
    /// Tie centre.
    pub at: Point,
    /// Spoke length (mm).
    pub spoke: f64,
    /// Layer of the plane being tied into.
    pub layer: Layer,
    /// Net of the plane.
    pub net: String,
}

/// The board under construction.
#[derive(Debug)]
pub struct Board {
    rules: DesignRules,
    size: (f64, f64),
    pads: Vec<Pad>,
    tracks: Vec<Track>,
    vias: Vec<Via>,
    labels: Vec<Label>,
    holes: Vec<Hole>,
    fills: Vec<CopperFill>,
    thermals: Vec<Thermal>,
    outlined: bool,
}

impl Board {
    /// Creates an empty board of the given extent.
    #[must_use]
    pub fn new(rules: DesignRules, width: f64, height: f64) -> Self {
        Self {
            rules,
            size: (width, height),
            pads: Vec::new(),
            tracks: Vec::new(),
            vias: Vec::new(),
            labels: Vec::new(),
            holes: Vec::new(),
            fills: Vec::new(),
            thermals: Vec::new(),
            outlined: false,
        }
    }

    /// The board's design rules.
    #[must_use]
    pub const fn rules(&self) -> &DesignRules {
        &self.rules
    }

    /// Board extent as `(width, height)` in mm.
    #[must_use]
    pub const fn size(&self) -> (f64, f64) {
        self.size
    }

    /// Allocates a new pad at the given pose on the top copper layer.
    pub fn place_pad(&mut self, cursor: Cursor) -> PadId {
        self.pads.push(Pad::new(cursor, Layer::TopCopper));
        PadId(self.pads.len() - 1)
    }

    /// Allocates an independent copy of a pad: same pose, name and width,
    /// fresh pending path.
    pub fn copy_pad(&mut self, id: PadId) -> PadId {
        let source = &self.pads[id.0];
        let mut copy = Pad::new(source.cursor(), source.route().layer());
        copy.set_name(source.name().map(str::to_string));
        if let Some(w) = source.width() {
            copy.set_width(w);
        }
        self.pads.push(copy);
        PadId(self.pads.len() - 1)
    }

    /// Borrows a pad.
    #[must_use]
    pub fn pad(&self, id: PadId) -> &Pad {
        &self.pads[id.0]
    }

    /// Mutably borrows a pad.
    pub fn pad_mut(&mut self, id: PadId) -> &mut Pad {
        &mut self.pads[id.0]
    }

    /// Number of pads in the arena.
    #[must_use]
    pub fn pad_count(&self) -> usize {
        self.pads.len()
    }

    /// Commits a pad's pending path to copper.
    ///
    /// Width resolution order: explicit `width`, then the pad's override,
    /// then the design-rule default.
    pub fn wire(&mut self, id: PadId, width: Option<f64>) {
        let resolved = width
            .or_else(|| self.pads[id.0].width())
            .unwrap_or(self.rules.trace);
        let record = self.pads[id.0].route_mut().drain();
        self.commit(record, resolved);
    }

    /// Commits a standalone path (transient routing cursors).
    pub fn commit_path(&mut self, path: &mut Path, width: Option<f64>) {
        let resolved = width.unwrap_or(self.rules.trace);
        let record = path.drain();
        self.commit(record, resolved);
    }

    fn commit(&mut self, record: PathRecord, width: f64) {
        for (layer, points) in record.segments {
            debug!(layer = %layer, vertices = points.len(), width, "committing track");
            self.tracks.push(Track {
                layer,
                width,
                points,
            });
        }
        for at in record.vias {
            self.vias.push(Via {
                at,
                diameter: self.rules.via,
                hole: self.rules.via_hole,
            });
        }
    }

    /// Records a silkscreen annotation.
    pub fn annotate(&mut self, at: Point, text: impl Into<String>) {
        self.labels.push(Label {
            at,
            text: text.into(),
        });
    }

    /// Records a mounting hole.
    pub fn hole(&mut self, at: Point, drill: f64, keepout: f64) {
        self.holes.push(Hole { at, drill, keepout });
    }

    /// Records the rectangular board outline. Idempotent.
    pub fn outline(&mut self) {
        self.outlined = true;
    }

    /// True once the outline has been recorded.
    #[must_use]
    pub const fn is_outlined(&self) -> bool {
        self.outlined
    }

    /// Requests a copper pour of `net` over `layer`.
    pub fn fill(&mut self, layer: Layer, net: impl Into<String>) {
        self.fills.push(CopperFill {
            layer,
            net: net.into(),
        });
    }

    /// Records a thermal tie from `at` into the `net` plane on `layer`.
    pub fn thermal(&mut self, at: Point, spoke: f64, layer: Layer, net: impl Into<String>) {
        self.thermals.push(Thermal {
            at,
            spoke,
            layer,
            net: net.into(),
        });
    }

    /// Committed conductors.
    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Committed vias.
    #[must_use]
    pub fn vias(&self) -> &[Via] {
        &self.vias
    }

    /// Silkscreen annotations.
    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Mounting holes.
    #[must_use]
    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    /// Pending copper-fill requests.
    #[must_use]
    pub fn fills(&self) -> &[CopperFill] {
        &self.fills
    }

    /// Thermal ties.
    #[must_use]
    pub fn thermals(&self) -> &[Thermal] {
        &self.thermals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn board() -> Board {
        Board::new(DesignRules::default(), 100.0, 100.0)
    }

    #[test]
    fn breakout_gap_meets_clearance_bound() {
        let rules = DesignRules::default();
        let bound = (rules.via / 2.0) + rules.via_space + (rules.trace / 2.0);
        assert!(rules.breakout_gap() >= bound - EPS);
    }

    #[test]
    fn route_pitch_is_trace_plus_space() {
        let rules = DesignRules::default();
        assert!((rules.route_pitch() - 0.381).abs() < EPS);
    }

    #[test]
    fn wire_uses_width_resolution_order() {
        let mut b = board();
        let id = b.place_pad(Cursor::new(0.0, 0.0));
        b.pad_mut(id).forward(1.0);
        b.wire(id, None);
        assert!((b.tracks()[0].width - 0.127).abs() < EPS);

        let wide = b.place_pad(Cursor::new(5.0, 5.0));
        b.pad_mut(wide).set_width(0.5);
        b.pad_mut(wide).forward(1.0);
        b.wire(wide, None);
        assert!((b.tracks()[1].width - 0.5).abs() < EPS);

        let explicit = b.place_pad(Cursor::new(9.0, 9.0));
        b.pad_mut(explicit).set_width(0.5);
        b.pad_mut(explicit).forward(1.0);
        b.wire(explicit, Some(0.3));
        assert!((b.tracks()[2].width - 0.3).abs() < EPS);
    }

    #[test]
    fn wire_twice_commits_nothing_new() {
        let mut b = board();
        let id = b.place_pad(Cursor::new(0.0, 0.0));
        b.pad_mut(id).forward(2.0);
        b.wire(id, None);
        b.wire(id, None);
        assert_eq!(b.tracks().len(), 1);
    }

    #[test]
    fn copy_pad_is_independent() {
        let mut b = board();
        let original = b.place_pad(Cursor::new(1.0, 2.0));
        b.pad_mut(original).set_name(Some("GND".to_string()));
        let copy = b.copy_pad(original);

        b.pad_mut(copy).forward(3.0);
        assert_eq!(b.pad(copy).name(), Some("GND"));
        assert!((b.pad(original).pos().x - 1.0).abs() < EPS);
        assert!(b.pad(original).route().is_pristine());
    }

    #[test]
    fn via_records_carry_design_rule_dimensions() {
        let mut b = board();
        let id = b.place_pad(Cursor::new(0.0, 0.0));
        b.pad_mut(id).forward(1.0);
        {
            let pad = b.pad_mut(id);
            pad.route_mut().via();
            pad.route_mut().through();
        }
        b.pad_mut(id).forward(1.0);
        b.wire(id, None);

        assert_eq!(b.vias().len(), 1);
        assert!((b.vias()[0].diameter - 0.6).abs() < EPS);
        assert!((b.vias()[0].hole - 0.3).abs() < EPS);
    }

    #[test]
    fn layer_flip_is_an_involution() {
        assert_eq!(Layer::TopCopper.flipped(), Layer::BottomCopper);
        assert_eq!(Layer::BottomCopper.flipped(), Layer::TopCopper);
        assert_eq!(Layer::TopSilk.flipped(), Layer::TopSilk);
    }
}
