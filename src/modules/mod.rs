//! Peripheral module constructors.
//!
//! Each module is a plain function taking the assembly in progress: it
//! claims a slot along the module band, places its parts, ties its power
//! pins to the pours, and returns the `(role, pad)` pairs it wants the
//! assembler to route. Roles go through the microcontroller's interface
//! resolver; the assembler issues one distributor `via` call per pair.

pub mod display;
pub mod gps;
pub mod i2c;
pub mod input;
pub mod lora;
pub mod power;
