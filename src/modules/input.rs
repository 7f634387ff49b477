//! Switch input connector.

use crate::assembly::{ModuleSignals, Protoboard};
use crate::board::Layer;
use crate::error::LayoutResult;
use crate::parts::sil_header;

/// Two-pin switch to ground; the live side takes a pooled digital pin.
pub fn switch(pb: &mut Protoboard) -> LayoutResult<ModuleSignals> {
    let slot = pb.next_slot(7.0);
    let board = pb.board_mut();

    let mut conn = sil_header(board, "J4", slot, 2);
    for (&id, &name) in conn.pads().to_vec().iter().zip(["GND", "SW"].iter()) {
        conn.name_pad(board, id, name)?;
    }
    conn.thermal_to_plane(board, "GND", "GND", Layer::BottomCopper, 1.3)?;

    Ok(vec![("digital".to_string(), conn.named("SW")?)])
}
