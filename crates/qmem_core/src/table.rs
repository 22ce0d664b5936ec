//! Exhaustive syndrome decode table construction.

use alloc::vec;
use alloc::vec::Vec;

use qmem_common::pauli::Pauli;

use crate::QecError;
use crate::code::CodeSpec;
use crate::pauli::PauliString;

/// Letter ordering used to break ties between equal-weight candidates.
const LETTERS: [Pauli; 3] = [Pauli::X, Pauli::Z, Pauli::Y];

/// Immutable syndrome-to-correction lookup table.
///
/// Holds one correction per syndrome value in `[0, 2^m)`. Each entry is
/// the minimum-weight Pauli error producing that syndrome, with ties
/// broken deterministically (lowest-indexed qubit support first, then X
/// before Z before Y per position). Syndrome 0 maps to the identity.
/// Unsupported syndromes (more simultaneous errors than the code's design
/// guarantee) still return their minimum-weight representative, so lookup
/// is total and never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyndromeTable {
    corrections: Vec<PauliString>,
}

impl SyndromeTable {
    /// Builds the table for a validated code.
    ///
    /// Enumerates candidate errors in increasing weight, assigning each
    /// previously unseen syndrome its first (hence minimum-weight,
    /// tie-broken) representative, until all 2^m syndromes are covered.
    /// With independent generators the syndrome map is surjective, so the
    /// search completes before the weight bound n for any well-formed
    /// code; running dry anyway reports [`QecError::DecodeTableIncomplete`].
    pub fn build(spec: &CodeSpec) -> Result<Self, QecError> {
        let n = spec.num_data_qubits();
        let total = 1usize << spec.num_generators();

        let mut entries: Vec<Option<PauliString>> = vec![None; total];
        entries[0] = Some(PauliString::identity(n));
        let mut assigned = 1;

        'search: for weight in 1..=n {
            for error in WeightClass::new(n, weight) {
                let syndrome = spec.syndrome_of(&error) as usize;
                if entries[syndrome].is_none() {
                    entries[syndrome] = Some(error);
                    assigned += 1;
                    if assigned == total {
                        break 'search;
                    }
                }
            }
        }

        if assigned < total {
            return Err(QecError::DecodeTableIncomplete { assigned, total });
        }

        Ok(Self {
            corrections: entries.into_iter().flatten().collect(),
        })
    }

    /// Correction for a measured syndrome. O(1).
    ///
    /// Panics when `syndrome >= 2^m`; an out-of-range syndrome cannot come
    /// from a correctly sized extraction round and is a programming error.
    pub fn correction(&self, syndrome: u16) -> &PauliString {
        &self.corrections[syndrome as usize]
    }

    /// Number of table entries, 2^m.
    pub fn len(&self) -> usize {
        self.corrections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corrections.is_empty()
    }

    /// Iterates `(syndrome, correction)` pairs in syndrome order.
    pub fn entries(&self) -> impl Iterator<Item = (u16, &PauliString)> {
        self.corrections
            .iter()
            .enumerate()
            .map(|(s, c)| (s as u16, c))
    }
}

/// Code distance, found by search: the minimum weight of an operator that
/// commutes with every generator yet lies outside the stabilizer group.
///
/// Returns `None` when no such operator exists, i.e. the generators pin a
/// full stabilizer state.
pub fn distance(spec: &CodeSpec) -> Option<usize> {
    let n = spec.num_data_qubits();
    for weight in 1..=n {
        for op in WeightClass::new(n, weight) {
            if spec.syndrome_of(&op) == 0 && !spec.contains_stabilizer(&op) {
                return Some(weight);
            }
        }
    }
    None
}

/// Enumerates every weight-`w` Pauli error on `n` qubits in deterministic
/// order: qubit supports lexicographically, and for each support the
/// per-position letters counting through X, Z, Y with the leftmost
/// position slowest.
struct WeightClass {
    n: usize,
    support: Vec<usize>,
    letters: Vec<usize>,
    done: bool,
}

impl WeightClass {
    fn new(n: usize, weight: usize) -> Self {
        Self {
            n,
            support: (0..weight).collect(),
            letters: vec![0; weight],
            done: weight == 0 || weight > n,
        }
    }

    fn current(&self) -> PauliString {
        let mut e = PauliString::identity(self.n);
        for (pos, &q) in self.support.iter().enumerate() {
            e.set(q, LETTERS[self.letters[pos]]);
        }
        e
    }

    fn step(&mut self) {
        let w = self.support.len();

        // Rightmost letter counts fastest.
        let mut i = w;
        while i > 0 {
            i -= 1;
            if self.letters[i] + 1 < LETTERS.len() {
                self.letters[i] += 1;
                for l in &mut self.letters[i + 1..] {
                    *l = 0;
                }
                return;
            }
        }
        self.letters.fill(0);

        // Letters exhausted: advance the support combination.
        let mut i = w;
        loop {
            if i == 0 {
                self.done = true;
                return;
            }
            i -= 1;
            if self.support[i] < self.n - w + i {
                self.support[i] += 1;
                for j in i + 1..w {
                    self.support[j] = self.support[j - 1] + 1;
                }
                return;
            }
        }
    }
}

impl Iterator for WeightClass {
    type Item = PauliString;

    fn next(&mut self) -> Option<PauliString> {
        if self.done {
            return None;
        }
        let e = self.current();
        self.step();
        Some(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::CodeSpec;
    use crate::codes;
    use alloc::string::ToString;

    #[test]
    fn weight_class_order_is_deterministic() {
        let errors: Vec<_> = WeightClass::new(3, 1).map(|e| e.to_string()).collect();
        assert_eq!(
            errors,
            ["XII", "ZII", "YII", "IXI", "IZI", "IYI", "IIX", "IIZ", "IIY"]
        );
        let first_pair: Vec<_> = WeightClass::new(3, 2).take(4).map(|e| e.to_string()).collect();
        assert_eq!(first_pair, ["XXI", "XZI", "XYI", "ZXI"]);
    }

    #[test]
    fn repetition_code_table() {
        let spec = codes::bit_flip_3();
        let table = SyndromeTable::build(&spec).unwrap();
        assert_eq!(table.len(), 4);
        assert!(table.correction(0).is_identity());
        assert_eq!(table.correction(1).to_string(), "XII");
        assert_eq!(table.correction(2).to_string(), "IIX");
        assert_eq!(table.correction(3).to_string(), "IXI");
    }

    #[test]
    fn five_qubit_table_matches_single_qubit_assignments() {
        let spec = codes::five_qubit();
        let table = SyndromeTable::build(&spec).unwrap();
        assert_eq!(table.len(), 16);
        assert!(table.correction(0).is_identity());

        let expected: [(u16, &str); 15] = [
            (8, "XIIII"),
            (1, "IXIII"),
            (3, "IIXII"),
            (6, "IIIXI"),
            (12, "IIIIX"),
            (5, "ZIIII"),
            (10, "IZIII"),
            (4, "IIZII"),
            (9, "IIIZI"),
            (2, "IIIIZ"),
            (13, "YIIII"),
            (11, "IYIII"),
            (7, "IIYII"),
            (15, "IIIYI"),
            (14, "IIIIY"),
        ];
        for (syndrome, correction) in expected {
            assert_eq!(
                table.correction(syndrome).to_string(),
                correction,
                "syndrome {}",
                syndrome
            );
        }
    }

    #[test]
    fn larger_css_code_tables_are_complete() {
        for spec in [codes::steane_7(), codes::shor_9(), codes::surface_3x3()] {
            let table = SyndromeTable::build(&spec).unwrap();
            assert_eq!(table.len(), 1 << spec.num_generators(), "{}", spec.name());
        }
    }

    #[test]
    fn rebuilds_are_bit_identical() {
        for spec in [codes::bit_flip_3(), codes::five_qubit(), codes::steane_7()] {
            assert_eq!(
                SyndromeTable::build(&spec).unwrap(),
                SyndromeTable::build(&spec).unwrap(),
                "{}",
                spec.name()
            );
        }
    }

    #[test]
    fn corrections_return_to_the_stabilizer_group() {
        // For each correctable single-qubit error, correcting must restore
        // the codeword up to a stabilizer element.
        let cases: [(CodeSpec, &[Pauli]); 5] = [
            (codes::bit_flip_3(), &[Pauli::X]),
            (codes::five_qubit(), &[Pauli::X, Pauli::Z, Pauli::Y]),
            (codes::steane_7(), &[Pauli::X, Pauli::Z, Pauli::Y]),
            (codes::shor_9(), &[Pauli::X, Pauli::Z, Pauli::Y]),
            (codes::surface_3x3(), &[Pauli::X, Pauli::Z, Pauli::Y]),
        ];
        for (spec, paulis) in cases {
            let table = SyndromeTable::build(&spec).unwrap();
            for q in 0..spec.num_data_qubits() {
                for &p in paulis {
                    let mut error = PauliString::identity(spec.num_data_qubits());
                    error.set(q, p);
                    let mut residual = error.clone();
                    residual.mul_assign(table.correction(spec.syndrome_of(&error)));
                    assert_eq!(spec.syndrome_of(&residual), 0, "{} {:?}{}", spec.name(), p, q);
                    assert!(
                        spec.contains_stabilizer(&residual),
                        "{} {:?}{} leaves a logical residue",
                        spec.name(),
                        p,
                        q
                    );
                }
            }
        }
    }

    #[test]
    fn distances_found_by_search() {
        assert_eq!(distance(&codes::bit_flip_3()), Some(1));
        assert_eq!(distance(&codes::five_qubit()), Some(3));
        assert_eq!(distance(&codes::steane_7()), Some(3));
        assert_eq!(distance(&codes::surface_3x3()), Some(3));
    }
}
