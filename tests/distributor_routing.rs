//! Breakout/via round trip: every role a microcontroller supports routes
//! to exactly one conductor terminating at its target.

use copperflow::board::{Board, DesignRules, PadId};
use copperflow::error::LayoutError;
use copperflow::geom::Cursor;
use copperflow::parts::{Microcontroller, Pico};
use copperflow::route::{Distributor, River};

const EPS: f64 = 1e-9;

/// Builds the standard scene: placed Pico, escaped bus, distributor broken
/// out over it, rivers merged and wired.
fn scene() -> (Board, Pico, Distributor) {
    let mut board = Board::new(DesignRules::default(), 100.0, 100.0);
    let mut mcu = Pico::place(&mut board, Cursor::with_heading(16.0, 14.0, 90.0)).unwrap();
    let mb = mcu.escape(&mut board).unwrap();

    let mut du = Distributor::place(
        &mut board,
        Cursor::with_heading(22.0, 66.0, 180.0),
        mb.len() + 1,
    );
    let md = du.escape(&board, mb.len()).unwrap();
    du.breakout(&mut board, &mb).unwrap();
    md.meet(&mut board, &mb).unwrap();
    md.wire(&mut board);
    mb.wire(&mut board);

    (board, mcu, du)
}

/// A via target in the module band at the top of the board.
fn target(board: &mut Board, index: usize) -> PadId {
    board.place_pad(Cursor::new(30.0 + 2.0 * index as f64, 88.0 + (index % 5) as f64))
}

#[test]
fn every_supported_role_routes_one_conductor_to_its_target() {
    let (mut board, mut mcu, du) = scene();

    let roles = [
        "sda", "scl", "5v", "tx", "rx", "analog", "analog", "analog", "digital", "digital",
        "digital", "digital", "digital",
    ];

    for (i, role) in roles.iter().enumerate() {
        let pad = target(&mut board, i);
        let expected = board.pad(pad).pos();
        let resolved = mcu.interface(role).unwrap();
        let vias_before = board.vias().len();

        du.via(&mut board, resolved.pin_name(), pad).unwrap();

        // One via per routing call, and the conductor ends at the target.
        assert_eq!(board.vias().len(), vias_before + 1);
        let end = *board.tracks().last().unwrap().points.last().unwrap();
        assert!((end.x - expected.x).abs() < EPS);
        assert!((end.y - expected.y).abs() < EPS);
    }
}

#[test]
fn no_two_routes_share_a_via_location() {
    let (mut board, mut mcu, du) = scene();

    for (i, role) in ["sda", "scl", "tx", "rx", "5v"].iter().enumerate() {
        let pad = target(&mut board, i);
        let resolved = mcu.interface(role).unwrap();
        du.via(&mut board, resolved.pin_name(), pad).unwrap();
    }

    let vias = board.vias();
    for i in 0..vias.len() {
        for j in (i + 1)..vias.len() {
            assert!(
                vias[i].at.distance(vias[j].at) > EPS,
                "via {i} and via {j} coincide"
            );
        }
    }
}

#[test]
fn rail_names_mirror_the_bus_plus_the_aux_slot() {
    let (board, _mcu, du) = scene();

    let names = du.rail_names();
    assert_eq!(names[0], "VH");
    assert_eq!(names.len(), 32);

    // A name produced by breakout resolves to a rail; every rail name is
    // unique by construction of the binding map.
    assert!(du.rail("GP15").is_some());
    assert!(du.rail("GND").is_none());

    // Unknown names fail loudly through via as well.
    let mut board = board;
    let pad = board.place_pad(Cursor::new(50.0, 90.0));
    let err = du.via(&mut board, "BOGUS", pad).unwrap_err();
    assert!(matches!(err, LayoutError::NameNotFound { .. }));
}

#[test]
fn undersized_distributor_fails_the_breakout() {
    let mut board = Board::new(DesignRules::default(), 100.0, 100.0);
    let members: Vec<PadId> = (0..5)
        .map(|i| {
            let id = board.place_pad(Cursor::with_heading(30.0 + f64::from(i), 50.0, 90.0));
            board.pad_mut(id).set_name(Some(format!("S{i}")));
            id
        })
        .collect();
    let bus = River::new(&board, members).unwrap();

    // Five slots for five conductors: the reserved slot is missing.
    let mut du = Distributor::place(&mut board, Cursor::with_heading(40.0, 60.0, 180.0), 5);
    let err = du.breakout(&mut board, &bus).unwrap_err();
    assert!(matches!(
        err,
        LayoutError::GeometryMismatch {
            expected: 6,
            actual: 5,
            ..
        }
    ));
}

#[test]
fn meet_rejects_bus_length_mismatch() {
    let (mut board, mut mcu, _du) = scene();

    let mb = {
        // A second, shorter bus cannot merge with the full escape.
        let members: Vec<PadId> = (0..3)
            .map(|i| board.place_pad(Cursor::with_heading(60.0 + f64::from(i), 50.0, 90.0)))
            .collect();
        River::new(&board, members).unwrap()
    };
    let full = mcu.escape(&mut board).unwrap();
    let err = mb.meet(&mut board, &full).unwrap_err();
    assert!(matches!(err, LayoutError::GeometryMismatch { .. }));
}
