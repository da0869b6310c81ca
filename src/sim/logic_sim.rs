use crate::circuit::{Circuit, Fault, Logic};
use crate::errors::ConfigError;

/// Reset the trial state and assign an input vector to the primary inputs
///
/// The vector is in primary-input declaration order.
pub fn apply_vector(circuit: &mut Circuit, bits: &[bool]) -> Result<(), ConfigError> {
    if bits.len() != circuit.nb_inputs() {
        return Err(ConfigError::VectorLength {
            expected: circuit.nb_inputs(),
            got: bits.len(),
        });
    }
    circuit.clear_trial_state();
    let ids: Vec<usize> = circuit.inputs().to_vec();
    for (id, &b) in ids.iter().zip(bits.iter()) {
        circuit.net_mut(*id).value = Logic::from(b);
    }
    Ok(())
}

/// Forward-propagate net values from the assigned primary inputs
///
/// Worklist pass: a gate is pushed once all its inputs are assigned and fires
/// at most once. Values are written in place on the nets.
pub fn propagate(circuit: &mut Circuit) {
    propagate_inner(circuit, None);
}

fn propagate_inner(circuit: &mut Circuit, stuck: Option<Fault>) {
    circuit.clear_queued();
    let mut stack = Vec::new();

    // Seed with the fanout of the primary inputs (and of the forced net,
    // which may not be reachable through its driver)
    let mut seeds: Vec<usize> = circuit
        .inputs()
        .iter()
        .flat_map(|&pi| circuit.net(pi).fanout().iter().copied())
        .collect();
    if let Some(f) = stuck {
        seeds.extend_from_slice(circuit.net(f.net).fanout());
    }
    for g in seeds {
        if circuit.all_inputs_assigned(g) && !circuit.mark_queued(g) {
            stack.push(g);
        }
    }

    while let Some(gi) = stack.pop() {
        let gate = circuit.gate(gi);
        let vals: Vec<Logic> = gate.inputs().iter().map(|&n| circuit.net(n).value).collect();
        let out = gate.output();
        let mut val = gate.kind().eval(&vals);
        if let Some(f) = stuck {
            if f.net == out {
                val = Logic::from(f.value);
            }
        }
        circuit.net_mut(out).value = val;
        let fanout: Vec<usize> = circuit.net(out).fanout().to_vec();
        for succ in fanout {
            if circuit.all_inputs_assigned(succ) && !circuit.mark_queued(succ) {
                stack.push(succ);
            }
        }
    }
}

/// Read the current primary-output values, in declaration order
pub fn output_values(circuit: &Circuit) -> Vec<Logic> {
    circuit.outputs().iter().map(|&o| circuit.net(o).value).collect()
}

/// Simulate one input vector; return the primary-output values
pub fn simulate(circuit: &mut Circuit, bits: &[bool]) -> Result<Vec<Logic>, ConfigError> {
    apply_vector(circuit, bits)?;
    propagate(circuit);
    Ok(output_values(circuit))
}

/// Simulate one input vector with a stuck-at fault forced on its net
///
/// The fault net holds the stuck value regardless of what drives it.
pub fn simulate_with_fault(
    circuit: &mut Circuit,
    bits: &[bool],
    fault: Fault,
) -> Result<Vec<Logic>, ConfigError> {
    if !circuit.is_valid_net(fault.net) {
        return Err(ConfigError::UnknownNet(fault.net));
    }
    apply_vector(circuit, bits)?;
    circuit.force_fault(fault);
    propagate_inner(circuit, Some(fault));
    Ok(output_values(circuit))
}

/// Whether the given fault is detected by the vector
///
/// Compares the fault-free and faulted primary-output values.
pub fn detects_fault(
    circuit: &mut Circuit,
    bits: &[bool],
    fault: Fault,
) -> Result<bool, ConfigError> {
    let good = simulate(circuit, bits)?;
    let bad = simulate_with_fault(circuit, bits, fault)?;
    Ok(good.iter().zip(bad.iter()).any(|(a, b)| a != b))
}
