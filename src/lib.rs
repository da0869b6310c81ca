//! Stuck-at fault analysis tools for combinational circuits
//!
//! This crate provides fault simulation and test pattern generation for gate-level
//! netlists under the single stuck-at fault model, the workhorse abstraction of
//! digital circuit testing.
//!
//! # Usage
//!
//! Three engines operate on the same [`Circuit`] datastructure:
//! * event-driven three-valued [logic simulation](https://en.wikipedia.org/wiki/Logic_simulation),
//! * [deductive fault simulation](https://en.wikipedia.org/wiki/Fault_coverage), which computes
//!   every fault detected by a vector in a single pass by propagating fault lists as sets,
//! * [test pattern generation](https://en.wikipedia.org/wiki/Automatic_test_pattern_generation)
//!   with the PODEM branch-and-bound search, which either finds a test vector for a target
//!   fault or proves it undetectable.
//!
//! ```bash
//! # Show available commands
//! stuckat help
//! # Show statistics about a circuit
//! stuckat show mydesign.net
//! # Simulate a batch of input vectors
//! stuckat sim mydesign.net -i vectors.txt -o outputs.txt
//! # Fault simulate the same batch and report coverage
//! stuckat fsim mydesign.net -i vectors.txt -o detected.txt
//! # Generate test patterns for every stuck-at fault
//! stuckat atpg mydesign.net -o patterns.txt
//! ```
//!
//! # Datastructures
//!
//! [`Circuit`] is a flat gate-level netlist over six gate kinds (Buf, Inv, And, Or,
//! Nand, Nor). Nets carry 1-based ids as found in the netlist files, and hold their
//! simulation state directly: a three-valued [`Logic`] level and a fault divergence
//! flag. Every gate drives exactly one net, and the circuit is combinational.
//!
//! A [`Fault`] is a net id plus the value it is stuck at. Fault universes are plain
//! sorted vectors; the deductive engine manipulates them through
//! [`FaultSet`](sim::FaultSet), which provides the set algebra that fault list
//! propagation is built on.
//!
//! For example, here is a one-bit multiplexer:
//! ```
//! # use stuckat::{Circuit, GateKind};
//! let circuit = Circuit::build(
//!     vec![
//!         (GateKind::Inv, vec![3], 4),
//!         (GateKind::And, vec![1, 3], 5),
//!         (GateKind::And, vec![2, 4], 6),
//!         (GateKind::Or, vec![5, 6], 7),
//!     ],
//!     vec![1, 2, 3],
//!     vec![7],
//! ).unwrap();
//! assert_eq!(circuit.nb_gates(), 4);
//! ```

#![warn(missing_docs)]

pub mod atpg;
pub mod circuit;
pub mod errors;
pub mod io;
pub mod sim;

pub use circuit::{Circuit, Fault, Gate, GateKind, Logic, Net};
pub use errors::{ConfigError, MalformedNetlist};
