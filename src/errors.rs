//! Error types for circuit construction and per-trial configuration

use std::error::Error;
use std::fmt;

use crate::circuit::GateKind;

/// Structural violation found while building a circuit graph
///
/// These are fatal for the circuit being loaded: no simulation is attempted
/// on a malformed netlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedNetlist {
    /// A gate keyword that is not one of the supported kinds
    UnknownGate(String),
    /// A gate declared with the wrong number of inputs for its kind
    WrongArity {
        /// Gate kind of the offending declaration
        kind: GateKind,
        /// Number of inputs actually declared
        got: usize,
    },
    /// Two gates declared with the same output net
    DuplicateDriver(usize),
    /// A net id outside the 1-based numbering
    InvalidNetId(usize),
    /// A line that could not be parsed as a declaration
    Syntax(String),
}

impl fmt::Display for MalformedNetlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedNetlist::UnknownGate(kw) => write!(f, "Unknown gate keyword {}", kw),
            MalformedNetlist::WrongArity { kind, got } => {
                write!(
                    f,
                    "{} gate takes {} input(s), got {}",
                    kind,
                    kind.nb_inputs(),
                    got
                )
            }
            MalformedNetlist::DuplicateDriver(net) => {
                write!(f, "Net {} is driven by more than one gate", net)
            }
            MalformedNetlist::InvalidNetId(net) => write!(f, "Invalid net id {}", net),
            MalformedNetlist::Syntax(line) => write!(f, "Unparsable netlist line: {}", line),
        }
    }
}

impl Error for MalformedNetlist {}

/// Per-vector or per-fault error that does not abort the rest of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An input vector whose length differs from the primary input count
    VectorLength {
        /// Number of primary inputs of the circuit
        expected: usize,
        /// Length of the offending vector
        got: usize,
    },
    /// A fault naming a net that does not exist in the circuit
    UnknownNet(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::VectorLength { expected, got } => {
                write!(f, "Vector has {} bits, circuit has {} inputs", got, expected)
            }
            ConfigError::UnknownNet(net) => write!(f, "Net {} does not exist", net),
        }
    }
}

impl Error for ConfigError {}
