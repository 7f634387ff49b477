//! Board assembly: the protoboard orchestrator.
//!
//! A [`Protoboard`] is one deterministic construction pass: place the
//! microcontroller, escape it, place the distributor over the escaped bus,
//! break the bus out by name, then add peripheral modules one at a time.
//! Each module hands back `(role, pad)` pairs; the assembler resolves every
//! role against the microcontroller's interface and issues one distributor
//! `via` call per pair. `finish` commits the shared bars, the pours and the
//! outline, and yields the finished board.
//!
//! The scene is fixed: microcontroller bottom-left with its bus escaping
//! north, distributor train just above it, bar field running north from the
//! train, peripheral modules along the top edge where the rails face.

use tracing::{debug, info};

use crate::board::{Board, DesignRules, Layer, PadId};
use crate::error::LayoutResult;
use crate::geom::Cursor;
use crate::modules;
use crate::parts::{Feather, Microcontroller, Pico};
use crate::route::Distributor;

/// Signals a peripheral module wants connected: `(role, pad)` pairs, in
/// the order the module cares to route them.
pub type ModuleSignals = Vec<(String, PadId)>;

/// Which microcontroller anchors the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum McuKind {
    /// Adafruit Feather-class module.
    Feather,
    /// Raspberry Pi Pico.
    Pico,
}

/// A predefined board to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardVariant {
    /// Pico + I2C sensor header + sensed power entry + LoRa modem.
    CoopMonitor,
    /// Pico + power entry + GPS + large 7-segment driver + switch input.
    LargeClock,
}

/// Board extent for every variant, in mm.
const BOARD_SIZE: (f64, f64) = (100.0, 100.0);

/// Microcontroller placement: bottom-left, axis walking north.
const MCU_AT: Cursor = Cursor::with_heading(16.0, 14.0, 90.0);

/// Corner mounting holes: drill and copper keep-out diameters.
const MOUNT_DRILL: f64 = 2.7;
const MOUNT_KEEPOUT: f64 = 6.0;

/// First module slot along the top edge.
const EDGE_START: f64 = 26.0;

/// The top-edge line modules are placed against.
const EDGE_Y: f64 = 96.0;

/// One board assembly in progress.
pub struct Protoboard {
    board: Board,
    mcu: Box<dyn Microcontroller>,
    distributor: Distributor,
    edge: f64,
}

impl Protoboard {
    /// Starts an assembly: outline, mounting holes, microcontroller,
    /// distributor, breakout and bus merge.
    ///
    /// # Errors
    ///
    /// Propagates any geometry or naming failure from the escape, breakout
    /// or merge steps.
    pub fn new(rules: DesignRules, kind: McuKind) -> LayoutResult<Self> {
        let mut board = Board::new(rules, BOARD_SIZE.0, BOARD_SIZE.1);
        board.outline();
        for x in [4.0, BOARD_SIZE.0 - 4.0] {
            for y in [4.0, BOARD_SIZE.1 - 4.0] {
                board.hole(crate::geom::Point::new(x, y), MOUNT_DRILL, MOUNT_KEEPOUT);
            }
        }

        // The distributor train runs west just north of the escaped bus, so
        // its rails and bars face the module band at the top of the board.
        let (mut mcu, du_at): (Box<dyn Microcontroller>, Cursor) = match kind {
            McuKind::Feather => (
                Box::new(Feather::place(&mut board, MCU_AT)?),
                Cursor::with_heading(22.0, 56.0, 180.0),
            ),
            McuKind::Pico => (
                Box::new(Pico::place(&mut board, MCU_AT)?),
                Cursor::with_heading(22.0, 66.0, 180.0),
            ),
        };
        info!(mcu = ?kind, "microcontroller placed");

        let mb = mcu.escape(&mut board)?;
        let mut distributor = Distributor::place(&mut board, du_at, mb.len() + 1);
        let md = distributor.escape(&board, mb.len())?;
        distributor.breakout(&mut board, &mb)?;
        md.meet(&mut board, &mb)?;
        md.wire(&mut board);
        mb.wire(&mut board);
        info!(conductors = mb.len(), "bus broken out");

        Ok(Self {
            board,
            mcu,
            distributor,
            edge: EDGE_START,
        })
    }

    /// The board under construction.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access for module constructors.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Allocates the next `width`-mm module slot along the top edge.
    ///
    /// The returned cursor sits at the slot's west end on the edge line,
    /// heading east, with the rail field to its south.
    pub fn next_slot(&mut self, width: f64) -> Cursor {
        let slot = Cursor::new(self.edge, EDGE_Y);
        self.edge += width;
        slot
    }

    /// Builds one peripheral module and routes every signal it requests.
    ///
    /// # Errors
    ///
    /// Propagates module construction failures, pool exhaustion from role
    /// resolution, and unknown rail names from routing.
    pub fn add_module<F>(&mut self, module: F) -> LayoutResult<()>
    where
        F: FnOnce(&mut Self) -> LayoutResult<ModuleSignals>,
    {
        let signals = module(self)?;
        for (role, pad) in signals {
            let resolved = self.mcu.interface(&role)?;
            if resolved.is_literal() {
                debug!(role = %role, "role passed through as a literal pin name");
            }
            self.distributor
                .via(&mut self.board, resolved.pin_name(), pad)?;
        }
        Ok(())
    }

    /// Finalises the board: commits the shared bars and requests the power
    /// pours. Consumes the assembly; there is nothing to add afterwards.
    #[must_use]
    pub fn finish(self) -> Board {
        let Self {
            mut board,
            distributor,
            ..
        } = self;
        distributor.finish(&mut board);
        board.fill(Layer::TopCopper, "3V3");
        board.fill(Layer::BottomCopper, "GND");
        info!("board assembly finished");
        board
    }
}

/// Builds one of the predefined board variants.
///
/// # Errors
///
/// Propagates any layout failure; a failed variant produces no board.
pub fn build_variant(variant: BoardVariant, rules: DesignRules) -> LayoutResult<Board> {
    match variant {
        BoardVariant::CoopMonitor => {
            let mut pb = Protoboard::new(rules, McuKind::Pico)?;
            pb.add_module(modules::i2c::header)?;
            pb.add_module(modules::i2c::pullups)?;
            pb.add_module(|pb| modules::power::vin(pb, true))?;
            pb.add_module(modules::lora::rylr896)?;
            Ok(pb.finish())
        }
        BoardVariant::LargeClock => {
            let mut pb = Protoboard::new(rules, McuKind::Pico)?;
            pb.add_module(|pb| modules::power::vin(pb, false))?;
            pb.add_module(modules::gps::neo_6m)?;
            pb.add_module(modules::display::seven_seg)?;
            pb.add_module(modules::input::switch)?;
            Ok(pb.finish())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembly_places_mcu_and_distributor() {
        let pb = Protoboard::new(DesignRules::default(), McuKind::Pico).unwrap();
        // 40 mcu pads, plus thermals' copies, plus 3 terminals per
        // distributor slot (32 slots for the 31-conductor bus).
        assert!(pb.board().pad_count() > 40 + 32 * 3);
        assert!(pb.board().is_outlined());
        assert_eq!(pb.board().holes().len(), 4);
    }

    #[test]
    fn feather_assembly_builds_too() {
        let pb = Protoboard::new(DesignRules::default(), McuKind::Feather).unwrap();
        assert!(pb.board().pad_count() > 28);
    }

    #[test]
    fn slots_advance_east() {
        let mut pb = Protoboard::new(DesignRules::default(), McuKind::Pico).unwrap();
        let a = pb.next_slot(12.0);
        let b = pb.next_slot(12.0);
        assert!((b.pos.x - a.pos.x - 12.0).abs() < 1e-9);
    }

    #[test]
    fn finish_requests_both_pours() {
        let pb = Protoboard::new(DesignRules::default(), McuKind::Pico).unwrap();
        let board = pb.finish();
        assert_eq!(board.fills().len(), 2);
    }
}
