use core::fmt;

use crate::circuit::{Fault, GateKind, Logic};
use crate::errors::MalformedNetlist;

/// A wire of the circuit
///
/// Either a primary input or the output of exactly one gate. The value and
/// fault flag are per-trial state, reset between vectors and ATPG targets.
#[derive(Debug, Clone, Default)]
pub struct Net {
    driver: Option<usize>,
    fanout: Vec<usize>,
    /// Current logic value carried by the net
    pub value: Logic,
    /// Whether the net currently diverges from its fault-free value (PODEM)
    pub faulty: bool,
}

impl Net {
    /// Index of the gate driving this net, if any
    pub fn driver(&self) -> Option<usize> {
        self.driver
    }

    /// Gates consuming this net as an input, in declaration order
    pub fn fanout(&self) -> &[usize] {
        &self.fanout
    }
}

/// A combinational cell with 1 or 2 inputs and one output
#[derive(Debug, Clone)]
pub struct Gate {
    kind: GateKind,
    inputs: Vec<usize>,
    output: usize,
    /// Whether the gate has been pushed in the current worklist pass
    pub(crate) queued: bool,
}

impl Gate {
    /// The kind of the gate
    pub fn kind(&self) -> GateKind {
        self.kind
    }

    /// Input net ids, in declaration order
    pub fn inputs(&self) -> &[usize] {
        &self.inputs
    }

    /// Output net id
    pub fn output(&self) -> usize {
        self.output
    }
}

/// Gate-level netlist with dense net and gate arenas
///
/// Nets use the 1-based ids of the netlist; both nets and gates refer to each
/// other by index only. Topology is immutable after construction, only the
/// per-trial value and flag fields mutate.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    nets: Vec<Net>,
    gates: Vec<Gate>,
    inputs: Vec<usize>,
    outputs: Vec<usize>,
}

impl Circuit {
    /// Create an empty circuit
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a circuit from gate declarations and the primary I/O lists
    pub fn build(
        decls: Vec<(GateKind, Vec<usize>, usize)>,
        inputs: Vec<usize>,
        outputs: Vec<usize>,
    ) -> Result<Circuit, MalformedNetlist> {
        let mut ret = Circuit::new();
        for (kind, ins, out) in decls {
            ret.add_gate(kind, &ins, out)?;
        }
        for i in inputs {
            ret.add_input(i)?;
        }
        for o in outputs {
            ret.add_output(o)?;
        }
        ret.check();
        Ok(ret)
    }

    /// Return the number of nets
    pub fn nb_nets(&self) -> usize {
        self.nets.len()
    }

    /// Return the number of gates
    pub fn nb_gates(&self) -> usize {
        self.gates.len()
    }

    /// Return the number of primary inputs
    pub fn nb_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Return the number of primary outputs
    pub fn nb_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Get the net with the given 1-based id
    pub fn net(&self, id: usize) -> &Net {
        &self.nets[id - 1]
    }

    /// Get the net with the given 1-based id, mutably
    pub fn net_mut(&mut self, id: usize) -> &mut Net {
        &mut self.nets[id - 1]
    }

    /// Get the gate at the given index
    pub fn gate(&self, i: usize) -> &Gate {
        &self.gates[i]
    }

    /// Primary input net ids, in declaration order
    pub fn inputs(&self) -> &[usize] {
        &self.inputs
    }

    /// Primary output net ids, in declaration order
    pub fn outputs(&self) -> &[usize] {
        &self.outputs
    }

    /// Returns whether a 1-based net id exists in the circuit
    pub fn is_valid_net(&self, id: usize) -> bool {
        id >= 1 && id <= self.nets.len()
    }

    /// Grow the net arena so the given id resolves to a record
    fn touch(&mut self, id: usize) -> Result<(), MalformedNetlist> {
        if id == 0 {
            return Err(MalformedNetlist::InvalidNetId(id));
        }
        if id > self.nets.len() {
            self.nets.resize_with(id, Net::default);
        }
        Ok(())
    }

    /// Add a gate declaration; nets are created lazily on first reference
    pub fn add_gate(
        &mut self,
        kind: GateKind,
        inputs: &[usize],
        output: usize,
    ) -> Result<usize, MalformedNetlist> {
        if inputs.len() != kind.nb_inputs() {
            return Err(MalformedNetlist::WrongArity {
                kind,
                got: inputs.len(),
            });
        }
        let index = self.gates.len();
        for &i in inputs {
            self.touch(i)?;
            let fanout = &mut self.net_mut(i).fanout;
            if !fanout.contains(&index) {
                fanout.push(index);
            }
        }
        self.touch(output)?;
        let out = self.net_mut(output);
        if out.driver.is_some() {
            return Err(MalformedNetlist::DuplicateDriver(output));
        }
        out.driver = Some(index);
        self.gates.push(Gate {
            kind,
            inputs: inputs.to_vec(),
            output,
            queued: false,
        });
        Ok(index)
    }

    /// Declare a primary input net
    pub fn add_input(&mut self, id: usize) -> Result<(), MalformedNetlist> {
        self.touch(id)?;
        self.inputs.push(id);
        Ok(())
    }

    /// Declare a primary output net
    pub fn add_output(&mut self, id: usize) -> Result<(), MalformedNetlist> {
        self.touch(id)?;
        self.outputs.push(id);
        Ok(())
    }

    /// Reset all per-trial state: net values, fault flags and queued flags
    ///
    /// Must be called between independent vectors and between ATPG targets.
    pub fn clear_trial_state(&mut self) {
        for net in &mut self.nets {
            net.value = Logic::Unknown;
            net.faulty = false;
        }
        for gate in &mut self.gates {
            gate.queued = false;
        }
    }

    /// Reset the queued flag on every gate, at the start of a worklist pass
    pub(crate) fn clear_queued(&mut self) {
        for gate in &mut self.gates {
            gate.queued = false;
        }
    }

    /// Mark a gate as queued; returns whether it was already queued
    pub(crate) fn mark_queued(&mut self, i: usize) -> bool {
        let was = self.gates[i].queued;
        self.gates[i].queued = true;
        was
    }

    /// Returns whether all input nets of a gate carry assigned values
    pub(crate) fn all_inputs_assigned(&self, i: usize) -> bool {
        self.gates[i]
            .inputs
            .iter()
            .all(|&n| self.net(n).value.is_assigned())
    }

    /// Force the fault's net to its stuck value (direct fault injection)
    pub(crate) fn force_fault(&mut self, fault: Fault) {
        self.net_mut(fault.net).value = Logic::from(fault.value);
    }

    /// Check consistency of the datastructure
    pub fn check(&self) {
        for (i, g) in self.gates.iter().enumerate() {
            assert_eq!(g.inputs.len(), g.kind.nb_inputs());
            assert_eq!(self.net(g.output).driver, Some(i), "Bad driver on net {}", g.output);
            for &n in &g.inputs {
                assert!(
                    self.net(n).fanout.contains(&i),
                    "Gate {} missing from fanout of net {}",
                    i,
                    n
                );
            }
        }
        for &id in self.inputs.iter().chain(self.outputs.iter()) {
            assert!(self.is_valid_net(id), "Invalid I/O net {}", id);
        }
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit with {} nets, {} gates, {} inputs, {} outputs:",
            self.nb_nets(),
            self.nb_gates(),
            self.nb_inputs(),
            self.nb_outputs()
        )?;
        for g in &self.gates {
            let ins: Vec<String> = g.inputs.iter().map(|n| n.to_string()).collect();
            writeln!(f, "\t{} {} -> {}", g.kind, ins.join(" "), g.output)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Circuit;
    use crate::circuit::GateKind;
    use crate::errors::MalformedNetlist;

    #[test]
    fn test_build() {
        let c = Circuit::build(
            vec![
                (GateKind::And, vec![1, 2], 4),
                (GateKind::Inv, vec![4], 5),
                (GateKind::Or, vec![4, 3], 6),
            ],
            vec![1, 2, 3],
            vec![5, 6],
        )
        .unwrap();
        assert_eq!(c.nb_nets(), 6);
        assert_eq!(c.nb_gates(), 3);
        assert_eq!(c.nb_inputs(), 3);
        assert_eq!(c.nb_outputs(), 2);
        assert_eq!(c.net(4).driver(), Some(0));
        assert_eq!(c.net(1).driver(), None);
        // Fanout in declaration order
        assert_eq!(c.net(4).fanout(), &[1, 2]);
        assert_eq!(c.gate(0).inputs(), &[1, 2]);
        assert_eq!(c.gate(0).output(), 4);
    }

    #[test]
    fn test_duplicate_driver() {
        let mut c = Circuit::new();
        c.add_gate(GateKind::And, &[1, 2], 3).unwrap();
        let err = c.add_gate(GateKind::Or, &[1, 2], 3).unwrap_err();
        assert_eq!(err, MalformedNetlist::DuplicateDriver(3));
    }

    #[test]
    fn test_wrong_arity() {
        let mut c = Circuit::new();
        let err = c.add_gate(GateKind::Inv, &[1, 2], 3).unwrap_err();
        assert_eq!(
            err,
            MalformedNetlist::WrongArity {
                kind: GateKind::Inv,
                got: 2
            }
        );
        let err = c.add_gate(GateKind::Nand, &[1], 3).unwrap_err();
        assert_eq!(
            err,
            MalformedNetlist::WrongArity {
                kind: GateKind::Nand,
                got: 1
            }
        );
    }

    #[test]
    fn test_invalid_net_id() {
        let mut c = Circuit::new();
        let err = c.add_gate(GateKind::Buf, &[0], 2).unwrap_err();
        assert_eq!(err, MalformedNetlist::InvalidNetId(0));
    }

    #[test]
    fn test_clear_trial_state() {
        use crate::circuit::Logic;
        let mut c = Circuit::build(
            vec![(GateKind::Buf, vec![1], 2)],
            vec![1],
            vec![2],
        )
        .unwrap();
        c.net_mut(1).value = Logic::One;
        c.net_mut(2).faulty = true;
        c.clear_trial_state();
        assert_eq!(c.net(1).value, Logic::Unknown);
        assert!(!c.net(2).faulty);
    }
}
