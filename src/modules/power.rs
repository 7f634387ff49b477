//! Power entry: screw terminal, linear regulator, optional sense divider.
//!
//! The raw input voltage lands on the shared auxiliary rail ("VH") so other
//! modules can draw it; the regulator output feeds the microcontroller's
//! 5 V input. With sensing enabled, a 4K7/330 divider taps the raw rail
//! into an analog pin so firmware can watch the supply.

use crate::assembly::{ModuleSignals, Protoboard};
use crate::board::Layer;
use crate::error::LayoutResult;
use crate::parts::{chip, sil_header, ChipSize};
use crate::route::distributor::AUX_RAIL;

/// Trace width for the supply runs.
const SUPPLY_WIDTH: f64 = 0.5;

/// Power entry module.
pub fn vin(pb: &mut Protoboard, sensing: bool) -> LayoutResult<ModuleSignals> {
    let slot = pb.next_slot(16.0);
    let board = pb.board_mut();

    // Screw terminal on the edge line; fat pads, fat traces.
    let mut j1 = sil_header(board, "J1", slot, 2);
    for (&id, &name) in j1.pads().to_vec().iter().zip(["GND", "VIN"].iter()) {
        j1.name_pad(board, id, name)?;
        board.pad_mut(id).set_width(SUPPLY_WIDTH);
    }
    j1.label_pads(board, 2.0);
    j1.thermal_to_plane(board, "GND", "GND", Layer::BottomCopper, 1.5)?;
    let vin_pad = j1.named("VIN")?;

    // Linear regulator a step south, input towards the terminal.
    let mut reg_at = slot;
    reg_at.right(90.0);
    reg_at.forward(8.0);
    reg_at.left(90.0);
    let mut reg = sil_header(board, "U2", reg_at, 3);
    for (&id, &name) in reg.pads().to_vec().iter().zip(["VI", "GND", "VO"].iter()) {
        reg.name_pad(board, id, name)?;
    }
    reg.label_pads(board, 2.0);
    reg.thermal_to_plane(board, "GND", "GND", Layer::BottomCopper, 1.3)?;

    // Decoupling on both sides of the regulator.
    let mut cap_at = reg_at;
    cap_at.right(90.0);
    cap_at.forward(4.0);
    cap_at.left(90.0);
    let c_in = chip(board, "C1", cap_at, ChipSize::C0603, "4.7 uF");
    cap_at.forward(5.0);
    let c_out = chip(board, "C2", cap_at, ChipSize::C0603, "22 uF");
    for (cap, pin) in [(&c_in, "VI"), (&c_out, "VO")] {
        let sense = cap.pads()[0];
        let target = board.pad(reg.named(pin)?).pos();
        board.pad_mut(sense).goto(target);
        board.wire(sense, None);

        let ground = cap.pads()[1];
        board.pad_mut(ground).set_name(Some("GND".to_string()));
        board.thermal(board.pad(ground).pos(), 1.3, Layer::BottomCopper, "GND");
    }

    // Feed the regulator from the terminal.
    let feed = board.copy_pad(vin_pad);
    let reg_in = board.pad(reg.named("VI")?).pos();
    board.pad_mut(feed).goto(reg_in);
    board.wire(feed, Some(SUPPLY_WIDTH));

    // Raw rail tap: drop to the bottom layer where the aux rail routes.
    let tap = board.copy_pad(vin_pad);
    {
        let pad = board.pad_mut(tap);
        pad.route_mut().via();
        pad.route_mut().through();
        pad.forward(1.0);
    }
    board.wire(tap, Some(SUPPLY_WIDTH));

    let mut signals = vec![
        ("5v".to_string(), reg.named("VO")?),
        (AUX_RAIL.to_string(), tap),
    ];

    if sensing {
        // 4K7 over 330 divider from the raw rail to ground.
        let mut div_at = reg_at;
        div_at.right(90.0);
        div_at.forward(5.0);
        div_at.left(90.0);
        div_at.forward(9.0);
        let r2 = chip(board, "R2", div_at, ChipSize::C0402, "4K7");
        div_at.forward(4.0);
        let r1 = chip(board, "R1", div_at, ChipSize::C0402, "330");

        let raw = board.copy_pad(vin_pad);
        let top = board.pad(r2.pads()[0]).pos();
        board.pad_mut(raw).goto(top);
        board.wire(raw, None);

        // Junction between the resistors is the sense point.
        let junction = r1.pads()[0];
        let mid = board.pad(junction).pos();
        board.pad_mut(r2.pads()[1]).goto(mid);
        board.wire(r2.pads()[1], None);

        let ground = r1.pads()[1];
        board.pad_mut(ground).set_name(Some("GND".to_string()));
        board.thermal(board.pad(ground).pos(), 1.3, Layer::BottomCopper, "GND");

        signals.push(("analog".to_string(), junction));
    }

    Ok(signals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::McuKind;
    use crate::board::DesignRules;

    #[test]
    fn sensing_adds_the_analog_tap() {
        let mut pb = Protoboard::new(DesignRules::default(), McuKind::Pico).unwrap();
        let signals = vin(&mut pb, true).unwrap();
        let roles: Vec<&str> = signals.iter().map(|(r, _)| r.as_str()).collect();
        assert_eq!(roles, ["5v", AUX_RAIL, "analog"]);
    }

    #[test]
    fn without_sensing_only_power_roles_remain() {
        let mut pb = Protoboard::new(DesignRules::default(), McuKind::Pico).unwrap();
        let signals = vin(&mut pb, false).unwrap();
        let roles: Vec<&str> = signals.iter().map(|(r, _)| r.as_str()).collect();
        assert_eq!(roles, ["5v", AUX_RAIL]);
    }

    #[test]
    fn supply_runs_are_wide() {
        let mut pb = Protoboard::new(DesignRules::default(), McuKind::Pico).unwrap();
        let tracks_before = pb.board().tracks().len();
        vin(&mut pb, false).unwrap();
        let wide = pb.board().tracks()[tracks_before..]
            .iter()
            .filter(|t| (t.width - SUPPLY_WIDTH).abs() < 1e-9)
            .count();
        assert!(wide >= 2);
    }
}
