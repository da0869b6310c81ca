//! IO for input vectors, fault lists and generated test patterns

use std::io::{BufRead, BufReader, Read, Write};

use crate::circuit::{Fault, Logic};

fn read_lines<R: Read>(r: R) -> Result<Vec<String>, String> {
    let mut ret = Vec::new();
    for l in BufReader::new(r).lines() {
        let Ok(s) = l else {
            return Err("Error during file IO".to_string());
        };
        let t = s.trim().to_owned();
        if t.is_empty() || t.starts_with('#') {
            continue;
        }
        ret.push(t);
    }
    Ok(ret)
}

/// Read input vectors, one vector per line as a string of 0s and 1s
pub fn read_vectors<R: Read>(r: R) -> Result<Vec<Vec<bool>>, String> {
    let mut ret = Vec::new();
    for line in read_lines(r)? {
        let mut vector = Vec::new();
        for c in line.chars() {
            match c {
                '0' => vector.push(false),
                '1' => vector.push(true),
                c if c.is_whitespace() => (),
                _ => return Err(format!("Invalid character {} in vector {}", c, line)),
            }
        }
        ret.push(vector);
    }
    Ok(ret)
}

/// Read a fault list, one fault per line as a net id and a stuck value
pub fn read_faults<R: Read>(r: R) -> Result<Vec<Fault>, String> {
    let mut ret = Vec::new();
    for line in read_lines(r)? {
        let toks: Vec<&str> = line.split_whitespace().collect();
        if toks.len() != 2 {
            return Err(format!("Invalid fault line {}", line));
        }
        let net = toks[0]
            .parse::<usize>()
            .map_err(|_| format!("Invalid net id {}", toks[0]))?;
        let value = match toks[1] {
            "0" => false,
            "1" => true,
            _ => return Err(format!("Invalid stuck value {}", toks[1])),
        };
        ret.push(Fault::new(net, value));
    }
    Ok(ret)
}

/// Write simulated output values, one line per vector
pub fn write_output_values<W: Write>(w: &mut W, rows: &[Vec<Logic>]) {
    for row in rows {
        for v in row {
            write!(w, "{}", v).unwrap();
        }
        writeln!(w).unwrap();
    }
}

/// Write a detected fault list: the count first, then one fault per line
pub fn write_detected_faults<W: Write>(w: &mut W, faults: &[Fault]) {
    writeln!(w, "{}", faults.len()).unwrap();
    for f in faults {
        writeln!(w, "{} {}", f.net, f.value as u8).unwrap();
    }
}

/// Write generated test patterns, one line per target fault, in target order
///
/// Each line is the primary-input assignment with X for unconstrained
/// inputs, or the literal `Undetectable`.
pub fn write_test_vectors<W: Write>(w: &mut W, results: &[Option<Vec<Logic>>]) {
    for pattern in results {
        match pattern {
            Some(bits) => {
                for b in bits {
                    write!(w, "{}", b).unwrap();
                }
                writeln!(w).unwrap();
            }
            None => writeln!(w, "Undetectable").unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        read_faults, read_vectors, write_detected_faults, write_output_values, write_test_vectors,
    };
    use crate::circuit::{Fault, Logic};

    #[test]
    fn test_read_vectors() {
        let v = read_vectors("# vectors\n101\n010\n\n11 0\n".as_bytes()).unwrap();
        assert_eq!(
            v,
            vec![
                vec![true, false, true],
                vec![false, true, false],
                vec![true, true, false]
            ]
        );
        assert!(read_vectors("10X".as_bytes()).is_err());
    }

    #[test]
    fn test_read_faults() {
        let f = read_faults("4 1\n2 0\n".as_bytes()).unwrap();
        assert_eq!(f, vec![Fault::new(4, true), Fault::new(2, false)]);
        assert!(read_faults("4".as_bytes()).is_err());
        assert!(read_faults("4 2".as_bytes()).is_err());
    }

    #[test]
    fn test_write_output_values() {
        use Logic::*;
        let mut buf = Vec::new();
        write_output_values(&mut buf, &[vec![One, Zero], vec![Unknown, One]]);
        assert_eq!(String::from_utf8(buf).unwrap(), "10\nX1\n");
    }

    #[test]
    fn test_write_detected_faults() {
        let mut buf = Vec::new();
        write_detected_faults(&mut buf, &[Fault::new(4, true), Fault::new(5, false)]);
        assert_eq!(String::from_utf8(buf).unwrap(), "2\n4 1\n5 0\n");
    }

    #[test]
    fn test_write_test_vectors() {
        use Logic::*;
        let mut buf = Vec::new();
        write_test_vectors(
            &mut buf,
            &[Some(vec![One, Unknown]), None, Some(vec![Zero, Zero])],
        );
        assert_eq!(String::from_utf8(buf).unwrap(), "1X\nUndetectable\n00\n");
    }
}
