//! I2C bus consumers: a sensor breakout header and the bus pull-ups.

use crate::assembly::{ModuleSignals, Protoboard};
use crate::board::Layer;
use crate::error::LayoutResult;
use crate::parts::{chip, sil_header, ChipSize};

/// A four-pin I2C sensor breakout header.
pub fn header(pb: &mut Protoboard) -> LayoutResult<ModuleSignals> {
    let slot = pb.next_slot(13.0);
    let board = pb.board_mut();

    let mut conn = sil_header(board, "J2", slot, 4);
    for (&id, &name) in conn
        .pads()
        .to_vec()
        .iter()
        .zip(["VCC", "GND", "SDA", "SCL"].iter())
    {
        conn.name_pad(board, id, name)?;
    }
    conn.label_pads(board, 2.0);
    conn.thermal_to_plane(board, "VCC", "3V3", Layer::TopCopper, 1.3)?;
    conn.thermal_to_plane(board, "GND", "GND", Layer::BottomCopper, 1.3)?;

    Ok(vec![
        ("sda".to_string(), conn.named("SDA")?),
        ("scl".to_string(), conn.named("SCL")?),
    ])
}

/// 4.7 kΩ pull-ups to 3V3 for both I2C lines.
pub fn pullups(pb: &mut Protoboard) -> LayoutResult<ModuleSignals> {
    let slot = pb.next_slot(5.0);
    let board = pb.board_mut();

    // Two 0402 resistors standing south of the edge line, free ends up.
    let mut at = slot;
    at.right(90.0);
    at.forward(6.0);
    let r0 = chip(board, "R3", at, ChipSize::C0402, "4K7");
    at.forward(3.0);
    let r1 = chip(board, "R4", at, ChipSize::C0402, "4K7");

    for r in [&r0, &r1] {
        let supply = r.pads()[1];
        board.pad_mut(supply).set_name(Some("3V3".to_string()));
        board.pad_mut(supply).forward(1.0);
        board.wire(supply, None);
        board.thermal(board.pad(supply).pos(), 1.3, Layer::TopCopper, "3V3");
    }

    Ok(vec![
        ("sda".to_string(), r0.pads()[0]),
        ("scl".to_string(), r1.pads()[0]),
    ])
}
