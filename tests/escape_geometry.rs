//! Escape geometry across real footprints.

use copperflow::board::{Board, DesignRules};
use copperflow::geom::Cursor;
use copperflow::parts::{Feather, Microcontroller, Pico};

const EPS: f64 = 1e-9;

fn board() -> Board {
    Board::new(DesignRules::default(), 100.0, 100.0)
}

fn mcu_at() -> Cursor {
    Cursor::with_heading(16.0, 14.0, 90.0)
}

#[test]
fn pico_escape_spacing_matches_the_route_pitch() {
    let mut board = board();
    let pitch = board.rules().route_pitch();
    let mut mcu = Pico::place(&mut board, mcu_at()).unwrap();
    let river = mcu.escape(&mut board).unwrap();

    let positions: Vec<_> = river
        .members()
        .iter()
        .map(|&id| board.pad(id).pos())
        .collect();
    for pair in positions.windows(2) {
        assert!(
            (pair[0].distance(pair[1]) - pitch).abs() < EPS,
            "adjacent bus conductors must sit exactly one pitch apart"
        );
    }
}

#[test]
fn feather_escape_spacing_matches_the_route_pitch() {
    let mut board = board();
    let pitch = board.rules().route_pitch();
    let mut mcu = Feather::place(&mut board, mcu_at()).unwrap();
    let river = mcu.escape(&mut board).unwrap();

    let positions: Vec<_> = river
        .members()
        .iter()
        .map(|&id| board.pad(id).pos())
        .collect();
    for pair in positions.windows(2) {
        assert!((pair[0].distance(pair[1]) - pitch).abs() < EPS);
    }
}

#[test]
fn escaped_bus_is_direction_consistent_and_stays_so() {
    let mut board = board();
    let mut mcu = Pico::place(&mut board, mcu_at()).unwrap();
    let river = mcu.escape(&mut board).unwrap();

    let check = |board: &Board| {
        let first = board.pad(river.members()[0]).cursor();
        for &id in river.members() {
            assert!(board.pad(id).cursor().heading_matches(&first));
        }
    };
    check(&board);

    river.forward(&mut board, 4.0);
    check(&board);
}

#[test]
fn bussed_power_pins_never_join_the_bus() {
    let mut board = board();
    let mut mcu = Pico::place(&mut board, mcu_at()).unwrap();
    let river = mcu.escape(&mut board).unwrap();

    for &id in river.members() {
        let name = board.pad(id).name().unwrap();
        assert!(!name.starts_with("GND"));
        assert_ne!(name, "3V3_OUT");
    }
}

#[test]
fn escaped_bus_lies_on_one_line() {
    let mut board = board();
    let mut mcu = Feather::place(&mut board, mcu_at()).unwrap();
    let river = mcu.escape(&mut board).unwrap();

    // All members share the bus line's other coordinate: with the bus
    // spread east-west, every conductor starts at the same northing.
    let first_y = board.pad(river.members()[0]).pos().y;
    for &id in river.members() {
        assert!((board.pad(id).pos().y - first_y).abs() < EPS);
    }
}
