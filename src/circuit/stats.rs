//! Compute circuit statistics
//!
//! ```
//! # use stuckat::Circuit;
//! # let c = Circuit::new();
//! use stuckat::circuit::stats::stats;
//! let stats = stats(&c);
//!
//! // Show the statistics
//! println!("{}", stats);
//! ```

use std::fmt;

use crate::circuit::{Circuit, GateKind};

/// Number of nets, I/Os and gates of each kind in a circuit
#[derive(Clone, Debug, Default)]
pub struct CircuitStats {
    /// Number of nets
    pub nb_nets: usize,
    /// Number of primary inputs
    pub nb_inputs: usize,
    /// Number of primary outputs
    pub nb_outputs: usize,
    /// Number of Buf gates
    pub nb_buf: usize,
    /// Number of Inv gates
    pub nb_inv: usize,
    /// Number of And gates
    pub nb_and: usize,
    /// Number of Or gates
    pub nb_or: usize,
    /// Number of Nand gates
    pub nb_nand: usize,
    /// Number of Nor gates
    pub nb_nor: usize,
}

impl CircuitStats {
    /// Total number of gates
    pub fn nb_gates(&self) -> usize {
        self.nb_buf + self.nb_inv + self.nb_and + self.nb_or + self.nb_nand + self.nb_nor
    }
}

impl fmt::Display for CircuitStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nets: {}", self.nb_nets)?;
        writeln!(f, "Inputs: {}", self.nb_inputs)?;
        writeln!(f, "Outputs: {}", self.nb_outputs)?;
        writeln!(f, "Gates: {}", self.nb_gates())?;
        for (name, nb) in [
            ("Buf", self.nb_buf),
            ("Inv", self.nb_inv),
            ("And", self.nb_and),
            ("Or", self.nb_or),
            ("Nand", self.nb_nand),
            ("Nor", self.nb_nor),
        ] {
            if nb != 0 {
                writeln!(f, "  {}: {}", name, nb)?;
            }
        }
        Ok(())
    }
}

/// Compute the statistics of a circuit
pub fn stats(circuit: &Circuit) -> CircuitStats {
    let mut ret = CircuitStats {
        nb_nets: circuit.nb_nets(),
        nb_inputs: circuit.nb_inputs(),
        nb_outputs: circuit.nb_outputs(),
        ..CircuitStats::default()
    };
    for i in 0..circuit.nb_gates() {
        match circuit.gate(i).kind() {
            GateKind::Buf => ret.nb_buf += 1,
            GateKind::Inv => ret.nb_inv += 1,
            GateKind::And => ret.nb_and += 1,
            GateKind::Or => ret.nb_or += 1,
            GateKind::Nand => ret.nb_nand += 1,
            GateKind::Nor => ret.nb_nor += 1,
        }
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::stats;
    use crate::circuit::{Circuit, GateKind};

    #[test]
    fn test_stats() {
        let c = Circuit::build(
            vec![
                (GateKind::And, vec![1, 2], 3),
                (GateKind::Nand, vec![1, 3], 4),
                (GateKind::Inv, vec![4], 5),
            ],
            vec![1, 2],
            vec![5],
        )
        .unwrap();
        let s = stats(&c);
        assert_eq!(s.nb_nets, 5);
        assert_eq!(s.nb_gates(), 3);
        assert_eq!(s.nb_and, 1);
        assert_eq!(s.nb_nand, 1);
        assert_eq!(s.nb_inv, 1);
        assert_eq!(s.nb_buf, 0);
    }
}
