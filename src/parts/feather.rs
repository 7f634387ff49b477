//! Adafruit Feather-class microcontroller module (two-row, 16 + 12 pins).

use crate::board::{Board, Layer};
use crate::error::LayoutResult;
use crate::geom::{inches, Cursor};
use crate::parts::escape::{escape_linear, EscapePlan};
use crate::parts::interface::{InterfaceMap, Resolved};
use crate::parts::{two_row_header, Microcontroller, Part};
use crate::route::River;

/// Pin names in physical pin order (16-pin column, then 12-pin column).
const PIN_NAMES: [&str; 28] = [
    "RESET", "3V", "AREF", "GND", "A0", "A1", "A2", "A3", "A4", "A5", "SCK", "MOSI", "MISO", "RX",
    "TX", "D4", "SDA", "SCL", "D5", "D6", "D9", "D10", "D11", "D12", "D13", "USB", "EN", "BAT",
];

/// Pins bussed to the pours instead of escaping with the signal bus.
const BUSSED: [&str; 2] = ["GND", "3V"];

/// The 16-pin column loses GND and 3V to the pours, leaving 14 signal pads
/// before the corner; the pivot is the last of them.
const ESCAPE: EscapePlan = EscapePlan {
    pivot: 13,
    pivot_turn: 90.0,
    member_turn: 0.0,
};

/// A Feather-class module: 0.8 in row separation, 28 castellated pins.
#[derive(Debug)]
pub struct Feather {
    part: Part,
    interface: InterfaceMap,
}

impl Feather {
    /// Places the module with its pin-1 corner walking from `at`.
    ///
    /// # Errors
    ///
    /// Propagates pad naming failures.
    pub fn place(board: &mut Board, at: Cursor) -> LayoutResult<Self> {
        let mut part = two_row_header(board, "U1", at, (16, 12), inches(0.8));
        for (&id, &name) in part.pads().to_vec().iter().zip(PIN_NAMES.iter()) {
            part.name_pad(board, id, name)?;
        }
        part.label_pads(board, 3.0);

        part.thermal_to_plane(board, "GND", "GND", Layer::BottomCopper, 1.3)?;
        part.thermal_to_plane(board, "3V", "3V3", Layer::TopCopper, 1.3)?;

        let interface = InterfaceMap::new()
            .direct("tx", "TX")
            .direct("rx", "RX")
            .direct("sda", "SDA")
            .direct("scl", "SCL")
            .direct("sck", "SCK")
            .direct("mosi", "MOSI")
            .direct("miso", "MISO")
            .direct("d5", "D5")
            .direct("d6", "D6")
            .direct("d9", "D9")
            .direct("d10", "D10")
            .direct("5v", "BAT")
            .direct("analog", "A0");

        Ok(Self { part, interface })
    }
}

impl Microcontroller for Feather {
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
