//! Bus-level routing: rivers and the distributor.
//!
//! A [`River`] treats an ordered set of parallel conductors as one routable
//! object; the [`Distributor`] receives a river and fans its conductors out
//! to arbitrary consumers by name.

pub mod distributor;
pub mod river;

pub use distributor::Distributor;
pub use river::River;
