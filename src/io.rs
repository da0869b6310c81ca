//! Read and write circuits, vectors and fault lists to files

mod netlist;
mod patterns;

use std::fs::File;
use std::path::PathBuf;

pub use netlist::{read_netlist, write_netlist};
pub use patterns::{
    read_faults, read_vectors, write_detected_faults, write_output_values, write_test_vectors,
};

use crate::{Circuit, Fault};

/// Read a circuit from a netlist file
pub fn read_netlist_file(path: &PathBuf) -> Circuit {
    let f = File::open(path).unwrap();
    read_netlist(f).unwrap()
}

/// Write a circuit to a netlist file
pub fn write_netlist_file(path: &PathBuf, circuit: &Circuit) {
    let mut f = File::create(path).unwrap();
    write_netlist(&mut f, circuit);
}

/// Read input vectors from a file
pub fn read_vectors_file(path: &PathBuf) -> Vec<Vec<bool>> {
    let f = File::open(path).unwrap();
    read_vectors(f).unwrap()
}

/// Read a fault list from a file
pub fn read_faults_file(path: &PathBuf) -> Vec<Fault> {
    let f = File::open(path).unwrap();
    read_faults(f).unwrap()
}
