use fxhash::FxHashSet;
use itertools::Itertools;

use crate::circuit::{Circuit, Fault, Logic};
use crate::sim::logic_sim;

/// Sorted, duplicate-free set of faults, supporting merge-based set algebra
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaultSet(Vec<Fault>);

impl FaultSet {
    /// Create an empty fault set
    pub fn new() -> FaultSet {
        FaultSet(Vec::new())
    }

    /// Create a fault set holding a single fault
    pub fn singleton(f: Fault) -> FaultSet {
        FaultSet(vec![f])
    }

    /// Create a fault set from an arbitrary vector of faults
    pub fn from_vec(mut v: Vec<Fault>) -> FaultSet {
        v.sort();
        v.dedup();
        FaultSet(v)
    }

    /// Number of faults in the set
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns whether the set contains the given fault
    pub fn contains(&self, f: &Fault) -> bool {
        self.0.binary_search(f).is_ok()
    }

    /// Iterate over the faults in order
    pub fn iter(&self) -> impl Iterator<Item = &Fault> {
        self.0.iter()
    }

    /// Faults present in either set
    pub fn union(&self, other: &FaultSet) -> FaultSet {
        FaultSet(
            self.0
                .iter()
                .merge(other.0.iter())
                .dedup()
                .copied()
                .collect(),
        )
    }

    /// Faults present in both sets
    pub fn intersection(&self, other: &FaultSet) -> FaultSet {
        let mut ret = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.0.len() && j < other.0.len() {
            match self.0[i].cmp(&other.0[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    ret.push(self.0[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        FaultSet(ret)
    }

    /// Faults present in this set but not in the other
    pub fn difference(&self, other: &FaultSet) -> FaultSet {
        let mut ret = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.0.len() {
            if j >= other.0.len() {
                ret.extend_from_slice(&self.0[i..]);
                break;
            }
            match self.0[i].cmp(&other.0[j]) {
                std::cmp::Ordering::Less => {
                    ret.push(self.0[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
            }
        }
        FaultSet(ret)
    }

    /// Consume the set into its sorted vector
    pub fn into_vec(self) -> Vec<Fault> {
        self.0
    }
}

/// Compute the fault list driven onto a gate's output net
fn gate_fault_list(
    circuit: &Circuit,
    gate: usize,
    lists: &[FaultSet],
    universe: &FxHashSet<Fault>,
) -> FaultSet {
    let g = circuit.gate(gate);
    let out = g.output();
    let mut result = if g.inputs().len() == 1 {
        lists[g.inputs()[0] - 1].clone()
    } else {
        let (in1, in2) = (g.inputs()[0], g.inputs()[1]);
        let v1 = circuit.net(in1).value;
        let v2 = circuit.net(in2).value;
        let c = Logic::from(g.kind().controlling_value().unwrap());
        let (l1, l2) = (&lists[in1 - 1], &lists[in2 - 1]);
        if v1 == c && v2 == c {
            // Either input alone still forces the controlling value
            l1.intersection(l2)
        } else if v1 == c {
            // Faults corrupting the non-controlling input as well are masked
            l1.difference(l2)
        } else if v2 == c {
            l2.difference(l1)
        } else {
            l1.union(l2)
        }
    };
    // Local fault on the output line, if it is part of the global universe
    if let Some(v) = circuit.net(out).value.to_bool() {
        let local = Fault::new(out, !v);
        if universe.contains(&local) {
            result = result.union(&FaultSet::singleton(local));
        }
    }
    result
}

/// Deductive fault simulation of the currently applied vector
///
/// Requires the fault-free net values to be in place (one logic simulation
/// pass). Returns the sorted, deduplicated set of faults from the universe
/// that the vector detects at some primary output. The per-net fault lists
/// are discarded on return.
pub fn deductive_simulate(circuit: &mut Circuit, universe: &[Fault]) -> Vec<Fault> {
    let members: FxHashSet<Fault> = universe.iter().copied().collect();
    let nb_nets = circuit.nb_nets();
    let mut lists: Vec<FaultSet> = vec![FaultSet::new(); nb_nets];
    let mut computed = vec![false; nb_nets];

    // The only fault observable at an unconstrained input line is the
    // opposite of the applied value
    for &pi in circuit.inputs() {
        if let Some(v) = circuit.net(pi).value.to_bool() {
            lists[pi - 1] = FaultSet::singleton(Fault::new(pi, !v));
        }
        computed[pi - 1] = true;
    }

    circuit.clear_queued();
    let mut stack = Vec::new();
    let seeds: Vec<usize> = circuit
        .inputs()
        .iter()
        .flat_map(|&pi| circuit.net(pi).fanout().iter().copied())
        .collect();
    for g in seeds {
        if gate_ready(circuit, &computed, g) && !circuit.mark_queued(g) {
            stack.push(g);
        }
    }

    while let Some(gi) = stack.pop() {
        let out = circuit.gate(gi).output();
        lists[out - 1] = gate_fault_list(circuit, gi, &lists, &members);
        computed[out - 1] = true;
        let fanout: Vec<usize> = circuit.net(out).fanout().to_vec();
        for succ in fanout {
            if gate_ready(circuit, &computed, succ) && !circuit.mark_queued(succ) {
                stack.push(succ);
            }
        }
    }

    let mut detected = FaultSet::new();
    for &o in circuit.outputs() {
        detected = detected.union(&lists[o - 1]);
    }
    detected.into_vec()
}

/// A gate is ready once every input net's fault list has been computed
fn gate_ready(circuit: &Circuit, computed: &[bool], gate: usize) -> bool {
    circuit
        .gate(gate)
        .inputs()
        .iter()
        .all(|&n| computed[n - 1])
}

/// Faults from the universe detected by any vector of the batch
///
/// A vector whose length does not match the primary input count is reported
/// and skipped; the rest of the batch is still processed.
pub fn fault_coverage(
    circuit: &mut Circuit,
    vectors: &[Vec<bool>],
    universe: &[Fault],
) -> Vec<Fault> {
    let mut detected = FaultSet::new();
    for (i, v) in vectors.iter().enumerate() {
        match logic_sim::simulate(circuit, v) {
            Ok(_) => {
                let d = deductive_simulate(circuit, universe);
                detected = detected.union(&FaultSet::from_vec(d));
            }
            Err(err) => eprintln!("Skipping vector {}: {}", i + 1, err),
        }
    }
    detected.into_vec()
}
