use std::fmt;

use crate::circuit::Circuit;

/// A single stuck-at fault: the given net held permanently at a value
///
/// Ordering is lexicographic by (net, value); all fault-set algebra relies
/// on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fault {
    /// Net carrying the fault (1-based id)
    pub net: usize,
    /// Stuck value
    pub value: bool,
}

impl Fault {
    /// Create a fault from a net id and a stuck value
    pub fn new(net: usize, value: bool) -> Fault {
        Fault { net, value }
    }

    /// The exhaustive fault universe: both stuck-at faults on every net
    pub fn all(circuit: &Circuit) -> Vec<Fault> {
        let mut ret = Vec::new();
        for net in 1..=circuit.nb_nets() {
            for value in [false, true] {
                ret.push(Fault::new(net, value));
            }
        }
        ret
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Net {} stuck at {}", self.net, i32::from(self.value))
    }
}

#[cfg(test)]
mod tests {
    use super::Fault;
    use crate::circuit::{Circuit, GateKind};

    #[test]
    fn test_ordering() {
        let mut faults = vec![
            Fault::new(3, false),
            Fault::new(1, true),
            Fault::new(1, false),
            Fault::new(2, true),
        ];
        faults.sort();
        assert_eq!(
            faults,
            vec![
                Fault::new(1, false),
                Fault::new(1, true),
                Fault::new(2, true),
                Fault::new(3, false),
            ]
        );
    }

    #[test]
    fn test_all() {
        let c = Circuit::build(
            vec![(GateKind::And, vec![1, 2], 3)],
            vec![1, 2],
            vec![3],
        )
        .unwrap();
        let all = Fault::all(&c);
        assert_eq!(all.len(), 6);
        assert!(all.windows(2).all(|w| w[0] < w[1]));
        assert!(all.contains(&Fault::new(3, true)));
    }
}
