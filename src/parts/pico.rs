//! Raspberry Pi Pico microcontroller module (two-row, 20 + 20 pins).

use crate::board::{Board, Layer};
use crate::error::LayoutResult;
use crate::geom::Cursor;
use crate::parts::escape::{escape_linear, EscapePlan};
use crate::parts::interface::{InterfaceMap, Resolved};
use crate::parts::{two_row_header, Microcontroller, Part};
use crate::route::River;

/// Row separation of the Pico's castellated edge pads.
const ROW_SEP: f64 = 17.78;

/// Pin names in physical pin order. Ground pins get distinct suffixes so
/// the one-name-one-pad invariant holds; all of them are bussed anyway.
const PIN_NAMES: [&str; 40] = [
    "GP0", "GP1", "GND", "GP2", "GP3", "GP4", "GP5", "GND2", "GP6", "GP7", "GP8", "GP9", "GND3",
    "GP10", "GP11", "GP12", "GP13", "GND4", "GP14", "GP15", "GP16", "GP17", "GND5", "GP18",
    "GP19", "GP20", "GP21", "GND6", "GP22", "RUN", "GP26", "GP27", "GND7", "GP28", "ADC_VREF",
    "3V3_OUT", "3V3_EN", "GND8", "VSYS", "VBUS",
];

/// Pins bussed to the pours instead of escaping with the signal bus.
const BUSSED: [&str; 9] = [
    "GND", "GND2", "GND3", "GND4", "GND5", "GND6", "GND7", "GND8", "3V3_OUT",
];

/// The 20-pin column loses four grounds to the pours, leaving 16 signal
/// pads before the corner; the pivot is the last of them. Pads are rotated
/// a quarter turn at placement (labels run along the column), so escape
/// turns each member back and swings the pivot a half turn to face the
/// bus line outward.
const ESCAPE: EscapePlan = EscapePlan {
    pivot: 15,
    pivot_turn: 180.0,
    member_turn: 90.0,
};

/// A Raspberry Pi Pico module.
#[derive(Debug)]
pub struct Pico {
    part: Part,
    interface: InterfaceMap,
}

impl Pico {
    /// Places the module with its pin-1 corner walking from `at`.
    ///
    /// # Errors
    ///
    /// Propagates pad naming failures.
    pub fn place(board: &mut Board, at: Cursor) -> LayoutResult<Self> {
        let mut part = two_row_header(board, "U1", at, (20, 20), ROW_SEP);
        for (&id, &name) in part.pads().to_vec().iter().zip(PIN_NAMES.iter()) {
            board.pad_mut(id).right(90.0);
            part.name_pad(board, id, name)?;
        }
        part.label_pads(board, 5.0);

        for ground in &BUSSED[..8] {
            part.thermal_to_plane(board, ground, "GND", Layer::BottomCopper, 1.3)?;
        }
        part.thermal_to_plane(board, "3V3_OUT", "3V3", Layer::TopCopper, 1.3)?;

        let interface = InterfaceMap::new()
            .pool("analog", ["GP26", "GP27", "GP28"])
            .pool("digital", ["GP10", "GP11", "GP12", "GP13", "GP14"])
            .pool("tx", ["GP0", "GP8"])
            .pool("rx", ["GP1", "GP9"])
            .direct("sda", "GP14")
            .direct("scl", "GP15")
            .direct("5v", "VSYS");

        Ok(Self { part, interface })
    }
}

impl Microcontroller for Pico {
    fn part(&self) -> &Part {
        &self.part
    }

    fn escape(&mut self, board: &mut Board) -> LayoutResult<River> {
        escape_linear(board, &self.part, &BUSSED, &ESCAPE)
    }

    fn interface(&mut self, role: &str) -> LayoutResult<Resolved> {
        self.interface.resolve(role)
    }
}
