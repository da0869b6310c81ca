use std::fmt;
use std::ops::Not;

/// Three-valued logic level carried by a net
///
/// Unknown behaves as a don't-care: it propagates through a gate unless a
/// controlling value on another input short-circuits the evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Logic {
    /// Logic low
    Zero,
    /// Logic high
    One,
    /// Unassigned or don't-care
    #[default]
    Unknown,
}

impl Logic {
    /// Returns whether the value is 0 or 1
    pub fn is_assigned(self) -> bool {
        self != Logic::Unknown
    }

    /// Convert to a boolean, if assigned
    pub fn to_bool(self) -> Option<bool> {
        match self {
            Logic::Zero => Some(false),
            Logic::One => Some(true),
            Logic::Unknown => None,
        }
    }
}

impl From<bool> for Logic {
    fn from(b: bool) -> Logic {
        if b {
            Logic::One
        } else {
            Logic::Zero
        }
    }
}

impl Not for Logic {
    type Output = Logic;
    fn not(self) -> Logic {
        match self {
            Logic::Zero => Logic::One,
            Logic::One => Logic::Zero,
            Logic::Unknown => Logic::Unknown,
        }
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Logic::Zero => write!(f, "0"),
            Logic::One => write!(f, "1"),
            Logic::Unknown => write!(f, "X"),
        }
    }
}

/// Supported combinational gate kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    /// Buffer, out = in
    Buf,
    /// Inverter, out = !in
    Inv,
    /// 2-input And
    And,
    /// 2-input Or
    Or,
    /// 2-input Nand
    Nand,
    /// 2-input Nor
    Nor,
}

impl GateKind {
    /// Parse a netlist keyword into a gate kind
    pub fn from_keyword(kw: &str) -> Option<GateKind> {
        match kw {
            "BUF" => Some(GateKind::Buf),
            "INV" => Some(GateKind::Inv),
            "AND" => Some(GateKind::And),
            "OR" => Some(GateKind::Or),
            "NAND" => Some(GateKind::Nand),
            "NOR" => Some(GateKind::Nor),
            _ => None,
        }
    }

    /// The netlist keyword for the gate kind
    pub fn keyword(self) -> &'static str {
        match self {
            GateKind::Buf => "BUF",
            GateKind::Inv => "INV",
            GateKind::And => "AND",
            GateKind::Or => "OR",
            GateKind::Nand => "NAND",
            GateKind::Nor => "NOR",
        }
    }

    /// Number of inputs for the gate kind
    pub fn nb_inputs(self) -> usize {
        match self {
            GateKind::Buf | GateKind::Inv => 1,
            _ => 2,
        }
    }

    /// The input value that determines the output on its own, if any
    ///
    /// 0 for And/Nand, 1 for Or/Nor, none for single-input gates.
    pub fn controlling_value(self) -> Option<bool> {
        match self {
            GateKind::And | GateKind::Nand => Some(false),
            GateKind::Or | GateKind::Nor => Some(true),
            GateKind::Buf | GateKind::Inv => None,
        }
    }

    /// Returns whether the gate inverts between input and output
    pub fn is_inverting(self) -> bool {
        matches!(self, GateKind::Inv | GateKind::Nand | GateKind::Nor)
    }

    /// Evaluate a single-input gate
    pub fn eval1(self, a: Logic) -> Logic {
        match self {
            GateKind::Buf => a,
            GateKind::Inv => !a,
            _ => panic!("{} is not a single-input gate", self),
        }
    }

    /// Evaluate a two-input gate with controlling-value short-circuit
    ///
    /// A controlling input fixes the output even if the other input is
    /// Unknown; otherwise any Unknown input makes the output Unknown.
    pub fn eval2(self, a: Logic, b: Logic) -> Logic {
        let c = self
            .controlling_value()
            .unwrap_or_else(|| panic!("{} is not a two-input gate", self));
        let c = Logic::from(c);
        let out = if a == c || b == c {
            c
        } else if !a.is_assigned() || !b.is_assigned() {
            Logic::Unknown
        } else {
            !c
        };
        if self.is_inverting() {
            !out
        } else {
            out
        }
    }

    /// Evaluate the gate over a slice of input values
    pub fn eval(self, inputs: &[Logic]) -> Logic {
        match self.nb_inputs() {
            1 => self.eval1(inputs[0]),
            _ => self.eval2(inputs[0], inputs[1]),
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::{GateKind, Logic};

    #[test]
    fn test_eval1() {
        use Logic::*;
        assert_eq!(GateKind::Buf.eval1(Zero), Zero);
        assert_eq!(GateKind::Buf.eval1(One), One);
        assert_eq!(GateKind::Buf.eval1(Unknown), Unknown);
        assert_eq!(GateKind::Inv.eval1(Zero), One);
        assert_eq!(GateKind::Inv.eval1(One), Zero);
        assert_eq!(GateKind::Inv.eval1(Unknown), Unknown);
    }

    #[test]
    fn test_eval2_short_circuit() {
        use Logic::*;
        // A controlling input decides the output even with an Unknown input
        assert_eq!(GateKind::And.eval2(Zero, Unknown), Zero);
        assert_eq!(GateKind::Nand.eval2(Unknown, Zero), One);
        assert_eq!(GateKind::Or.eval2(One, Unknown), One);
        assert_eq!(GateKind::Nor.eval2(Unknown, One), Zero);
        // No controlling input: Unknown wins
        assert_eq!(GateKind::And.eval2(One, Unknown), Unknown);
        assert_eq!(GateKind::Or.eval2(Zero, Unknown), Unknown);
        assert_eq!(GateKind::Nand.eval2(Unknown, One), Unknown);
        assert_eq!(GateKind::Nor.eval2(Zero, Unknown), Unknown);
    }

    #[test]
    fn test_eval2_assigned() {
        use Logic::*;
        assert_eq!(GateKind::And.eval2(One, One), One);
        assert_eq!(GateKind::And.eval2(One, Zero), Zero);
        assert_eq!(GateKind::Or.eval2(Zero, Zero), Zero);
        assert_eq!(GateKind::Or.eval2(Zero, One), One);
        assert_eq!(GateKind::Nand.eval2(One, One), Zero);
        assert_eq!(GateKind::Nor.eval2(Zero, Zero), One);
    }

    #[test]
    fn test_controlling_value() {
        assert_eq!(GateKind::And.controlling_value(), Some(false));
        assert_eq!(GateKind::Nand.controlling_value(), Some(false));
        assert_eq!(GateKind::Or.controlling_value(), Some(true));
        assert_eq!(GateKind::Nor.controlling_value(), Some(true));
        assert_eq!(GateKind::Buf.controlling_value(), None);
        assert_eq!(GateKind::Inv.controlling_value(), None);
    }

    #[test]
    fn test_keywords() {
        for kind in [
            GateKind::Buf,
            GateKind::Inv,
            GateKind::And,
            GateKind::Or,
            GateKind::Nand,
            GateKind::Nor,
        ] {
            assert_eq!(GateKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert_eq!(GateKind::from_keyword("XOR"), None);
    }
}
