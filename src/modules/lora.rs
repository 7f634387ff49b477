//! REYAX RYLR896 LoRa modem module.

use crate::assembly::{ModuleSignals, Protoboard};
use crate::board::Layer;
use crate::error::LayoutResult;
use crate::parts::sil_header;

/// Six-pin LoRa modem. The UART is crossed here: the microcontroller's
/// transmit pin drives the modem's RXD and vice versa.
pub fn rylr896(pb: &mut Protoboard) -> LayoutResult<ModuleSignals> {
    let slot = pb.next_slot(18.0);
    let board = pb.board_mut();

    let mut conn = sil_header(board, "U4", slot, 6);
    for (&id, &name) in conn
        .pads()
        .to_vec()
        .iter()
        .zip(["VDD", "NRST", "RXD", "TXD", "BUSY", "GND"].iter())
    {
        conn.name_pad(board, id, name)?;
    }
    conn.label_pads(board, 2.0);
    conn.thermal_to_plane(board, "VDD", "3V3", Layer::TopCopper, 1.3)?;
    conn.thermal_to_plane(board, "GND", "GND", Layer::BottomCopper, 1.3)?;

    Ok(vec![
        ("tx".to_string(), conn.named("RXD")?),
        ("rx".to_string(), conn.named("TXD")?),
    ])
}
