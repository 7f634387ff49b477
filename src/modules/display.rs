//! Large 7-segment display driver connector.
//!
//! The display itself hangs off-board; this module exposes its shift
//! register interface (latch, clock, serial) plus logic and segment
//! supplies. The 12 V segment supply draws from the shared auxiliary rail.

use crate::assembly::{ModuleSignals, Protoboard};
use crate::board::Layer;
use crate::error::LayoutResult;
use crate::parts::sil_header;
use crate::route::distributor::AUX_RAIL;

/// Six-pin display connector.
pub fn seven_seg(pb: &mut Protoboard) -> LayoutResult<ModuleSignals> {
    let slot = pb.next_slot(18.0);
    let board = pb.board_mut();

    let mut conn = sil_header(board, "J3", slot, 6);
    for (&id, &name) in conn
        .pads()
        .to_vec()
        .iter()
        .zip(["GND", "LAT", "CLK", "SER", "5V", "12V"].iter())
    {
        conn.name_pad(board, id, name)?;
    }
    conn.label_pads(board, 2.0);
    conn.thermal_to_plane(board, "GND", "GND", Layer::BottomCopper, 1.3)?;

    Ok(vec![
        ("digital".to_string(), conn.named("LAT")?),
        ("digital".to_string(), conn.named("CLK")?),
        ("digital".to_string(), conn.named("SER")?),
        ("5v".to_string(), conn.named("5V")?),
        (AUX_RAIL.to_string(), conn.named("12V")?),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::McuKind;
    use crate::board::DesignRules;

    #[test]
    fn display_draws_three_digital_lines() {
        let mut pb = Protoboard::new(DesignRules::default(), McuKind::Pico).unwrap();
        let signals = seven_seg(&mut pb).unwrap();
        let digital = signals.iter().filter(|(r, _)| r == "digital").count();
        assert_eq!(digital, 3);
    }

    #[test]
    fn segment_supply_rides_the_aux_rail() {
        let mut pb = Protoboard::new(DesignRules::default(), McuKind::Pico).unwrap();
        let signals = seven_seg(&mut pb).unwrap();
        assert!(signals.iter().any(|(r, _)| r == AUX_RAIL));
    }
}
