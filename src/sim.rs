//! Simulation of a circuit: fault-free logic simulation and deductive fault simulation

mod deductive;
mod logic_sim;

pub use deductive::{deductive_simulate, fault_coverage, FaultSet};
pub use logic_sim::{
    apply_vector, detects_fault, output_values, propagate, simulate, simulate_with_fault,
};
