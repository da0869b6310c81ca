//! Circuit graph representation: nets, gates and their connectivity

mod fault;
mod gates;
mod graph;
pub mod stats;

pub use fault::Fault;
pub use gates::{GateKind, Logic};
pub use graph::{Circuit, Gate, Net};
