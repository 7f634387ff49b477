//! u-blox NEO-6M GPS receiver module.

use crate::assembly::{ModuleSignals, Protoboard};
use crate::board::Layer;
use crate::error::LayoutResult;
use crate::parts::sil_header;

/// Five-pin GPS receiver: PPS pulse, UART pair, power.
pub fn neo_6m(pb: &mut Protoboard) -> LayoutResult<ModuleSignals> {
    let slot = pb.next_slot(28.0);
    let board = pb.board_mut();

    let mut conn = sil_header(board, "U3", slot, 5);
    for (&id, &name) in conn
        .pads()
        .to_vec()
        .iter()
        .zip(["PPS", "RXD", "TXD", "GND", "VCC"].iter())
    {
        conn.name_pad(board, id, name)?;
    }
    conn.label_pads(board, 2.0);
    conn.thermal_to_plane(board, "GND", "GND", Layer::BottomCopper, 1.3)?;

    let body = slot.advanced(14.0).turned_right(90.0).advanced(5.0).pos;
    board.annotate(body, "NEO-6M");

    Ok(vec![
        ("digital".to_string(), conn.named("PPS")?),
        ("rx".to_string(), conn.named("RXD")?),
        ("tx".to_string(), conn.named("TXD")?),
        ("5v".to_string(), conn.named("VCC")?),
    ])
}
