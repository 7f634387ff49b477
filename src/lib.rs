//! copperflow: cursor-driven PCB layout generator
//!
//! This library builds printed-circuit-board layouts as one deterministic
//! construction pass: components are placed by walking oriented cursors
//! around a board, each component's pins are escaped into an ordered,
//! pitch-spaced bus, and a distributor fixture fans the bus out by name to
//! whatever peripheral modules the board variant asks for.
//!
//! # Architecture
//!
//! The flow, leaf to root:
//!
//! - **Escape**: a component's physically-fixed pins become one linear bus
//! - **River**: the bus as a first-class routable object
//! - **Distributor**: receives the river, exposes each conductor by name
//! - **Interface resolver**: abstract signal roles → concrete pin names
//! - **Assembler**: modules request roles, the distributor routes them
//!
//! # Modules
//!
//! - [`geom`] — points and oriented cursors
//! - [`board`] — design rules, the pad arena, committed copper
//! - [`route`] — rivers and the distributor
//! - [`parts`] — footprints, the escape algorithm, microcontrollers
//! - [`modules`] — peripheral module constructors
//! - [`assembly`] — board variants and the orchestrator
//! - [`config`] — configuration loading and validation
//! - [`export`] — SVG preview output
//! - [`error`] — error types

pub mod assembly;
pub mod board;
pub mod config;
pub mod error;
pub mod export;
pub mod geom;
pub mod modules;
pub mod parts;
pub mod route;
