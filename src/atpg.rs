//! Test pattern generation using the PODEM algorithm

use kdam::{tqdm, BarExt};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::circuit::{Circuit, Fault, Logic};
use crate::errors::ConfigError;

/// Result of an ATPG run for one target fault
///
/// Undetectable is a normal outcome, not an error: no primary-input
/// assignment sensitizes and propagates the fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A test vector exposing the fault, one value per primary input;
    /// Unknown bits are don't-care
    Detected(Vec<Logic>),
    /// No test vector exists for the fault
    Undetectable,
}

/// Run PODEM for a single target fault
///
/// Returns a primary-input assignment whose application makes some primary
/// output diverge from its fault-free value, or Undetectable once the whole
/// decision tree is exhausted. The circuit's trial state is reset on entry.
pub fn podem(circuit: &mut Circuit, target: Fault) -> Result<Outcome, ConfigError> {
    if !circuit.is_valid_net(target.net) {
        return Err(ConfigError::UnknownNet(target.net));
    }
    circuit.clear_trial_state();
    if search(circuit, target, 0) {
        let vector = circuit
            .inputs()
            .iter()
            .map(|&pi| circuit.net(pi).value)
            .collect();
        Ok(Outcome::Detected(vector))
    } else {
        Ok(Outcome::Undetectable)
    }
}

/// Recursive decision procedure over primary-input assignments
fn search(circuit: &mut Circuit, target: Fault, depth: usize) -> bool {
    if circuit.outputs().iter().any(|&o| circuit.net(o).faulty) {
        return true;
    }
    // Each level assigns one primary input; anything deeper means the
    // netlist is not the acyclic circuit we assume
    if depth > circuit.nb_inputs() {
        return false;
    }
    let Some((obj_net, obj_val)) = objective(circuit, target) else {
        return false;
    };
    let Some((pi, val)) = backtrace(circuit, obj_net, obj_val) else {
        return false;
    };
    imply(circuit, target, pi, Logic::from(val));
    if search(circuit, target, depth + 1) {
        return true;
    }
    imply(circuit, target, pi, Logic::from(!val));
    if search(circuit, target, depth + 1) {
        return true;
    }
    // Neither polarity helps: concede the input as don't-care and let the
    // caller try its own complementary branch
    imply(circuit, target, pi, Logic::Unknown);
    false
}

/// Pick the next (net, value) goal
///
/// Activate the fault site first; afterwards pick the first D-frontier gate
/// in declaration order and aim the non-controlling value at its unassigned
/// input.
fn objective(circuit: &Circuit, target: Fault) -> Option<(usize, bool)> {
    if !circuit.net(target.net).value.is_assigned() {
        return Some((target.net, !target.value));
    }
    for i in 0..circuit.nb_gates() {
        let g = circuit.gate(i);
        if circuit.net(g.output()).value.is_assigned() || g.inputs().len() != 2 {
            continue;
        }
        let c = g.kind().controlling_value().unwrap();
        let (in1, in2) = (g.inputs()[0], g.inputs()[1]);
        if circuit.net(in1).faulty && !circuit.net(in2).value.is_assigned() {
            return Some((in2, !c));
        }
        if circuit.net(in2).faulty && !circuit.net(in1).value.is_assigned() {
            return Some((in1, !c));
        }
    }
    None
}

/// Map an objective to a primary-input assignment
///
/// Follows the first unassigned input of each driving gate, accumulating the
/// inversion parity. A driving gate with no unassigned input is a dead end.
fn backtrace(circuit: &Circuit, net: usize, value: bool) -> Option<(usize, bool)> {
    let mut net = net;
    let mut value = value;
    while let Some(d) = circuit.net(net).driver() {
        let g = circuit.gate(d);
        value ^= g.kind().is_inverting();
        let next = g
            .inputs()
            .iter()
            .find(|&&n| !circuit.net(n).value.is_assigned())?;
        net = *next;
    }
    Some((net, value))
}

/// Assign a primary input and propagate values and fault flags
///
/// Derived net values are recomputed from the assigned inputs; fault flags
/// are sticky for the duration of the run.
fn imply(circuit: &mut Circuit, target: Fault, pi: usize, value: Logic) {
    circuit.net_mut(pi).value = value;
    if pi == target.net {
        circuit.net_mut(pi).faulty = true;
    }
    for id in 1..=circuit.nb_nets() {
        if circuit.net(id).driver().is_some() {
            circuit.net_mut(id).value = Logic::Unknown;
        }
    }
    fault_propagate(circuit, target);
}

/// Fault-aware forward propagation
///
/// Same worklist discipline as the fault-free simulator, with two additions:
/// a gate also becomes ready when one input carries a non-faulty controlling
/// value, and fault flags are propagated under the masking rule. The target
/// fault is injected logically at its site.
fn fault_propagate(circuit: &mut Circuit, target: Fault) {
    circuit.clear_queued();
    let mut stack = Vec::new();
    for gi in 0..circuit.nb_gates() {
        if gate_ready(circuit, gi) && !circuit.mark_queued(gi) {
            stack.push(gi);
        }
    }
    while let Some(gi) = stack.pop() {
        evaluate_gate(circuit, target, gi);
        let out = circuit.gate(gi).output();
        let fanout: Vec<usize> = circuit.net(out).fanout().to_vec();
        for succ in fanout {
            if gate_ready(circuit, succ) && !circuit.mark_queued(succ) {
                stack.push(succ);
            }
        }
    }
}

/// A gate is ready when its output is unassigned and either all inputs are
/// assigned or one input carries a controlling value that is not faulty
fn gate_ready(circuit: &Circuit, gate: usize) -> bool {
    let g = circuit.gate(gate);
    if circuit.net(g.output()).value.is_assigned() {
        return false;
    }
    if let Some(c) = g.kind().controlling_value() {
        for &n in g.inputs() {
            if circuit.net(n).value == Logic::from(c) && !circuit.net(n).faulty {
                return true;
            }
        }
    }
    circuit.all_inputs_assigned(gate)
}

/// Evaluate one gate: value, fault flag, and fault injection at the site
fn evaluate_gate(circuit: &mut Circuit, target: Fault, gate: usize) {
    let g = circuit.gate(gate);
    let kind = g.kind();
    let out = g.output();
    let ins: Vec<usize> = g.inputs().to_vec();
    let vals: Vec<Logic> = ins.iter().map(|&n| circuit.net(n).value).collect();
    circuit.net_mut(out).value = kind.eval(&vals);

    if ins.len() == 1 {
        circuit.net_mut(out).faulty = circuit.net(ins[0]).faulty;
    } else {
        // A faulty input propagates unless the other input masks it with a
        // controlling value (an unassigned input does not mask)
        let c = Logic::from(kind.controlling_value().unwrap());
        let f1 = circuit.net(ins[0]).faulty && circuit.net(ins[1]).value != c;
        let f2 = circuit.net(ins[1]).faulty && circuit.net(ins[0]).value != c;
        if f1 || f2 {
            circuit.net_mut(out).faulty = true;
        }
    }
    // Logical injection of the target fault at its site
    if out == target.net && circuit.net(out).value != Logic::from(target.value) {
        circuit.net_mut(out).faulty = true;
    }
}

/// Run PODEM over a whole fault list, with progress reporting
pub fn generate_test_patterns(
    circuit: &mut Circuit,
    faults: &[Fault],
) -> Vec<(Fault, Result<Outcome, ConfigError>)> {
    let mut progress = tqdm!(total = faults.len());
    progress.set_description("Faults processed");
    let mut nb_detected = 0;
    let mut nb_undetectable = 0;
    let mut ret = Vec::new();
    for &f in faults {
        let outcome = podem(circuit, f);
        match &outcome {
            Ok(Outcome::Detected(_)) => nb_detected += 1,
            Ok(Outcome::Undetectable) => nb_undetectable += 1,
            Err(_) => (),
        }
        ret.push((f, outcome));
        progress.update(1).unwrap();
    }
    progress
        .write(format!(
            "Found test vectors for {}/{} faults, {} undetectable",
            nb_detected,
            faults.len(),
            nb_undetectable
        ))
        .unwrap();
    ret
}

/// Generate random input vectors for fault simulation
pub fn generate_random_vectors(nb_inputs: usize, nb_vectors: usize, seed: u64) -> Vec<Vec<bool>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut ret = Vec::new();
    for _ in 0..nb_vectors {
        ret.push((0..nb_inputs).map(|_| rng.gen()).collect());
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::{generate_random_vectors, podem, Outcome};
    use crate::circuit::{Circuit, Fault, GateKind, Logic};
    use crate::errors::ConfigError;
    use crate::sim::detects_fault;

    /// Turn a PODEM vector into bits, filling don't-cares with 0
    fn to_bits(vector: &[Logic]) -> Vec<bool> {
        vector
            .iter()
            .map(|v| v.to_bool().unwrap_or(false))
            .collect()
    }

    #[test]
    fn test_single_inverter() {
        // 1 -> INV -> 2 (output); stuck-at-0 on net 1 needs vector "1"
        let mut c = Circuit::build(vec![(GateKind::Inv, vec![1], 2)], vec![1], vec![2]).unwrap();
        let outcome = podem(&mut c, Fault::new(1, false)).unwrap();
        assert_eq!(outcome, Outcome::Detected(vec![Logic::One]));
        let outcome = podem(&mut c, Fault::new(1, true)).unwrap();
        assert_eq!(outcome, Outcome::Detected(vec![Logic::Zero]));
    }

    #[test]
    fn test_and_gate_targets() {
        let mut c = Circuit::build(
            vec![(GateKind::And, vec![1, 2], 3)],
            vec![1, 2],
            vec![3],
        )
        .unwrap();
        // Exciting stuck-at-0 on an input needs both inputs high
        let outcome = podem(&mut c, Fault::new(1, false)).unwrap();
        assert_eq!(outcome, Outcome::Detected(vec![Logic::One, Logic::One]));
        // Stuck-at-1 on the output needs the output low
        match podem(&mut c, Fault::new(3, true)).unwrap() {
            Outcome::Detected(v) => {
                assert!(detects_fault(&mut c, &to_bits(&v), Fault::new(3, true)).unwrap());
            }
            Outcome::Undetectable => panic!("Fault must be detectable"),
        }
    }

    #[test]
    fn test_soundness_on_all_faults() {
        // Every Detected vector must flip an output under direct injection
        // (fanout-free circuit, where the single fault flag is exact)
        let mut c = Circuit::build(
            vec![
                (GateKind::And, vec![1, 2], 5),
                (GateKind::Nor, vec![3, 4], 6),
                (GateKind::Or, vec![5, 6], 7),
                (GateKind::Inv, vec![7], 8),
            ],
            vec![1, 2, 3, 4],
            vec![8],
        )
        .unwrap();
        for f in Fault::all(&c) {
            if let Outcome::Detected(v) = podem(&mut c, f).unwrap() {
                assert!(
                    detects_fault(&mut c, &to_bits(&v), f).unwrap(),
                    "Vector for {} does not expose it",
                    f
                );
            }
        }
    }

    #[test]
    fn test_undetectable_fault() {
        // Net 4 is tied low by AND(1, !1), masking net 3's path: a fault on
        // net 3 can never reach the output
        let mut c = Circuit::build(
            vec![
                (GateKind::Inv, vec![1], 2),
                (GateKind::And, vec![1, 2], 4),
                (GateKind::And, vec![3, 4], 5),
            ],
            vec![1, 3],
            vec![5],
        )
        .unwrap();
        let outcome = podem(&mut c, Fault::new(3, false)).unwrap();
        assert_eq!(outcome, Outcome::Undetectable);
        let outcome = podem(&mut c, Fault::new(3, true)).unwrap();
        assert_eq!(outcome, Outcome::Undetectable);
    }

    #[test]
    fn test_idempotent_reset() {
        let mut c = Circuit::build(
            vec![
                (GateKind::Nand, vec![1, 2], 3),
                (GateKind::Nand, vec![1, 3], 4),
                (GateKind::Nand, vec![2, 3], 5),
                (GateKind::Nand, vec![4, 5], 6),
            ],
            vec![1, 2],
            vec![6],
        )
        .unwrap();
        for f in Fault::all(&c) {
            let first = podem(&mut c, f).unwrap();
            let second = podem(&mut c, f).unwrap();
            assert_eq!(first, second, "Outcome changed on rerun for {}", f);
        }
    }

    #[test]
    fn test_unknown_net() {
        let mut c = Circuit::build(vec![(GateKind::Buf, vec![1], 2)], vec![1], vec![2]).unwrap();
        let err = podem(&mut c, Fault::new(9, false)).unwrap_err();
        assert_eq!(err, ConfigError::UnknownNet(9));
    }

    #[test]
    fn test_random_vectors() {
        let v = generate_random_vectors(5, 8, 42);
        assert_eq!(v.len(), 8);
        assert!(v.iter().all(|p| p.len() == 5));
        // Seeded generation is reproducible
        assert_eq!(v, generate_random_vectors(5, 8, 42));
    }
}
