//! IO for the plain-text netlist format
//!
//! One gate per line, keyword first, input net ids, output net id last.
//! `INPUT` and `OUTPUT` lines list net ids and are terminated by `-1`:
//! ```text
//!     # This is a comment
//!     AND 1 2 4
//!     INV 4 5
//!     OR 4 3 6
//!     INPUT 1 2 3 -1
//!     OUTPUT 5 6 -1
//! ```

use std::io::{BufRead, BufReader, Read, Write};

use crate::circuit::{Circuit, GateKind};
use crate::errors::MalformedNetlist;

fn parse_net_id(tok: &str) -> Result<usize, MalformedNetlist> {
    tok.parse::<usize>()
        .map_err(|_| MalformedNetlist::Syntax(format!("Invalid net id {}", tok)))
}

/// Parse an `INPUT` or `OUTPUT` line body, stopping at the `-1` terminator
fn parse_io_list(toks: &[&str]) -> Result<Vec<usize>, MalformedNetlist> {
    let mut ids = Vec::new();
    for &tok in toks {
        if tok == "-1" {
            return Ok(ids);
        }
        ids.push(parse_net_id(tok)?);
    }
    Err(MalformedNetlist::Syntax(
        "Unterminated INPUT or OUTPUT line".to_string(),
    ))
}

/// Read a circuit in the plain-text netlist format
pub fn read_netlist<R: Read>(r: R) -> Result<Circuit, MalformedNetlist> {
    let mut decls = Vec::new();
    let mut inputs = Vec::new();
    let mut outputs = Vec::new();
    for l in BufReader::new(r).lines() {
        let Ok(s) = l else {
            return Err(MalformedNetlist::Syntax(
                "Error during file IO".to_string(),
            ));
        };
        let t = s.trim();
        if t.is_empty() || t.starts_with('#') {
            continue;
        }
        let toks: Vec<&str> = t.split_whitespace().collect();
        let kw = toks[0].to_uppercase();
        match kw.as_str() {
            "INPUT" => inputs.extend(parse_io_list(&toks[1..])?),
            "OUTPUT" => outputs.extend(parse_io_list(&toks[1..])?),
            _ => {
                let Some(kind) = GateKind::from_keyword(&kw) else {
                    return Err(MalformedNetlist::UnknownGate(toks[0].to_string()));
                };
                if toks.len() < 2 {
                    return Err(MalformedNetlist::WrongArity { kind, got: 0 });
                }
                let ids = toks[1..]
                    .iter()
                    .map(|tok| parse_net_id(tok))
                    .collect::<Result<Vec<usize>, _>>()?;
                let (out, ins) = ids.split_last().unwrap();
                decls.push((kind, ins.to_vec(), *out));
            }
        }
    }
    Circuit::build(decls, inputs, outputs)
}

/// Write a circuit in the plain-text netlist format
pub fn write_netlist<W: Write>(w: &mut W, circuit: &Circuit) {
    for i in 0..circuit.nb_gates() {
        let gate = circuit.gate(i);
        write!(w, "{}", gate.kind().keyword()).unwrap();
        for inp in gate.inputs() {
            write!(w, " {}", inp).unwrap();
        }
        writeln!(w, " {}", gate.output()).unwrap();
    }
    write!(w, "INPUT").unwrap();
    for i in circuit.inputs() {
        write!(w, " {}", i).unwrap();
    }
    writeln!(w, " -1").unwrap();
    write!(w, "OUTPUT").unwrap();
    for o in circuit.outputs() {
        write!(w, " {}", o).unwrap();
    }
    writeln!(w, " -1").unwrap();
}

#[cfg(test)]
mod tests {
    use super::{read_netlist, write_netlist};
    use crate::circuit::GateKind;
    use crate::errors::MalformedNetlist;

    #[test]
    fn test_read() {
        let src = "# small example\n\nAND 1 2 4\nINV 4 5\nOR 4 3 6\nINPUT 1 2 3 -1\nOUTPUT 5 6 -1\n";
        let c = read_netlist(src.as_bytes()).unwrap();
        assert_eq!(c.nb_nets(), 6);
        assert_eq!(c.nb_gates(), 3);
        assert_eq!(c.inputs(), &[1, 2, 3]);
        assert_eq!(c.outputs(), &[5, 6]);
        assert_eq!(c.gate(0).kind(), GateKind::And);
        assert_eq!(c.gate(1).inputs(), &[4]);
        assert_eq!(c.gate(2).output(), 6);
    }

    #[test]
    fn test_read_lowercase_keywords() {
        let src = "nand 1 2 3\ninput 1 2 -1\noutput 3 -1\n";
        let c = read_netlist(src.as_bytes()).unwrap();
        assert_eq!(c.gate(0).kind(), GateKind::Nand);
    }

    #[test]
    fn test_read_errors() {
        let err = read_netlist("XOR 1 2 3\nINPUT 1 2 -1\nOUTPUT 3 -1\n".as_bytes()).unwrap_err();
        assert_eq!(err, MalformedNetlist::UnknownGate("XOR".to_string()));
        let err = read_netlist("INV 1 2 3\nINPUT 1 2 -1\nOUTPUT 3 -1\n".as_bytes()).unwrap_err();
        assert_eq!(
            err,
            MalformedNetlist::WrongArity {
                kind: GateKind::Inv,
                got: 2
            }
        );
        let err = read_netlist("AND 1 2 3\nINPUT 1 2\nOUTPUT 3 -1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MalformedNetlist::Syntax(_)));
        let err = read_netlist("AND 1 2 3\nOR 1 2 3\nINPUT 1 2 -1\nOUTPUT 3 -1\n".as_bytes())
            .unwrap_err();
        assert_eq!(err, MalformedNetlist::DuplicateDriver(3));
    }

    #[test]
    fn test_roundtrip() {
        let src = "AND 1 2 4\nINV 4 5\nOR 4 3 6\nINPUT 1 2 3 -1\nOUTPUT 5 6 -1\n";
        let c = read_netlist(src.as_bytes()).unwrap();
        let mut buf = Vec::new();
        write_netlist(&mut buf, &c);
        assert_eq!(String::from_utf8(buf).unwrap(), src);
    }
}
