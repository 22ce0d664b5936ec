//! Validated stabilizer code specifications.

use alloc::string::String;
use alloc::vec::Vec;

use crate::pauli::PauliString;
use crate::{CodeDefect, QecError, bit_utils};

/// Syndromes are packed into a u16, which bounds the generator count.
pub const MAX_GENERATORS: usize = 16;

/// A stabilizer code: ordered generators, ordered logical operators, and
/// the derived qubit counts.
///
/// Generator order is load-bearing: generator j is measured by ancilla j
/// and reports into syndrome bit j. Logical-operator order likewise fixes
/// the logic-bit assignment during readout. Instances can only be built
/// through [`CodeSpec::new`], which validates the algebra once; everything
/// downstream relies on that and never re-checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSpec {
    name: String,
    generators: Vec<PauliString>,
    logicals: Vec<PauliString>,
    n: usize,
    m: usize,
    k: usize,
}

impl CodeSpec {
    /// Validates and constructs a code specification.
    ///
    /// Checks, in order: at least one generator, uniform operator length,
    /// pairwise generator commutation (symplectic product zero for every
    /// pair), generator independence over GF(2), the u16 syndrome-width
    /// limit, the counting constraint m <= n - k, and for every logical
    /// operator commutation with all generators plus independence from the
    /// stabilizer group. The first violated condition is reported with the
    /// offending indices.
    pub fn new(
        name: &str,
        generators: Vec<PauliString>,
        logicals: Vec<PauliString>,
    ) -> Result<Self, QecError> {
        let Some(first) = generators.first() else {
            return Err(CodeDefect::NoGenerators.into());
        };
        let n = first.len();
        let m = generators.len();
        let k = logicals.len();

        for (i, g) in generators.iter().enumerate() {
            if g.len() != n {
                return Err(CodeDefect::LengthMismatch { index: i }.into());
            }
        }
        for (i, l) in logicals.iter().enumerate() {
            if l.len() != n {
                return Err(CodeDefect::LengthMismatch { index: m + i }.into());
            }
        }

        for i in 0..m {
            for j in i + 1..m {
                if generators[i].anticommutes_with(&generators[j]) {
                    return Err(CodeDefect::AnticommutingGenerators { first: i, second: j }.into());
                }
            }
        }

        let mut basis = Gf2Basis::new();
        for (i, g) in generators.iter().enumerate() {
            if !basis.insert(g.symplectic_row()) {
                return Err(CodeDefect::DependentGenerator { index: i }.into());
            }
        }

        if m > MAX_GENERATORS {
            return Err(CodeDefect::GeneratorLimitExceeded {
                generators: m,
                max: MAX_GENERATORS,
            }
            .into());
        }
        if m + k > n {
            return Err(CodeDefect::TooManyGenerators {
                generators: m,
                data_qubits: n,
                logicals: k,
            }
            .into());
        }

        for (i, l) in logicals.iter().enumerate() {
            for (j, g) in generators.iter().enumerate() {
                if l.anticommutes_with(g) {
                    return Err(CodeDefect::LogicalAnticommutes {
                        logical: i,
                        generator: j,
                    }
                    .into());
                }
            }
            if basis.spans(l.symplectic_row()) {
                return Err(CodeDefect::LogicalInStabilizer { logical: i }.into());
            }
        }

        Ok(Self {
            name: String::from(name),
            generators,
            logicals,
            n,
            m,
            k,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of data qubits, n.
    pub fn num_data_qubits(&self) -> usize {
        self.n
    }

    /// Number of stabilizer generators, m (one ancilla per generator per
    /// round).
    pub fn num_generators(&self) -> usize {
        self.m
    }

    /// Number of logical qubits, k.
    pub fn num_logicals(&self) -> usize {
        self.k
    }

    pub fn generators(&self) -> &[PauliString] {
        &self.generators
    }

    pub fn logicals(&self) -> &[PauliString] {
        &self.logicals
    }

    pub fn logical(&self, i: usize) -> &PauliString {
        &self.logicals[i]
    }

    /// Syndrome of an error: bit j is set when the error anticommutes
    /// with generator j.
    pub fn syndrome_of(&self, error: &PauliString) -> u16 {
        let mut syndrome = 0u16;
        for (j, g) in self.generators.iter().enumerate() {
            if g.anticommutes_with(error) {
                syndrome |= 1 << j;
            }
        }
        syndrome
    }

    /// True when `op` is a product of stabilizer generators.
    pub fn contains_stabilizer(&self, op: &PauliString) -> bool {
        let mut basis = Gf2Basis::new();
        for g in &self.generators {
            basis.insert(g.symplectic_row());
        }
        basis.spans(op.symplectic_row())
    }

    // Qubit layout of synthesized circuits: data qubits first, then the
    // shared readout qubit, then one ancilla per generator.

    /// Index of the logical readout qubit.
    pub fn readout_qubit(&self) -> u16 {
        self.n as u16
    }

    /// Index of the ancilla assigned to generator j.
    pub fn ancilla_qubit(&self, j: usize) -> u16 {
        debug_assert!(j < self.m);
        (self.n + 1 + j) as u16
    }

    /// Total qubits a backend session needs for this code.
    pub fn total_qubits(&self) -> usize {
        self.n + 1 + self.m
    }
}

/// Incrementally built row basis over GF(2), used for the independence
/// and membership checks.
struct Gf2Basis {
    rows: Vec<(usize, Vec<u64>)>,
}

impl Gf2Basis {
    fn new() -> Self {
        Self { rows: Vec::new() }
    }

    fn reduce(&self, row: &mut [u64]) {
        for (pivot, basis_row) in &self.rows {
            if bit_utils::get(row, *pivot) {
                bit_utils::xor_in_place(row, basis_row);
            }
        }
    }

    /// Reduces `row` against the basis and inserts the remainder. Returns
    /// false when the row was already in the span.
    fn insert(&mut self, mut row: Vec<u64>) -> bool {
        self.reduce(&mut row);
        match bit_utils::first_set(&row) {
            Some(pivot) => {
                self.rows.push((pivot, row));
                true
            }
            None => false,
        }
    }

    /// True when `row` lies in the span of the inserted rows.
    fn spans(&self, mut row: Vec<u64>) -> bool {
        self.reduce(&mut row);
        bit_utils::is_zero(&row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> PauliString {
        PauliString::parse(s).unwrap()
    }

    #[test]
    fn rejects_anticommuting_pair_naming_it() {
        let err = CodeSpec::new("bad", alloc::vec![p("ZII"), p("XII")], alloc::vec![]);
        assert_eq!(
            err,
            Err(QecError::InvalidCode(CodeDefect::AnticommutingGenerators {
                first: 0,
                second: 1
            }))
        );
    }

    #[test]
    fn rejects_dependent_generator() {
        // ZIZ = ZZI * IZZ
        let err = CodeSpec::new("bad", alloc::vec![p("ZZI"), p("IZZ"), p("ZIZ")], alloc::vec![]);
        assert_eq!(
            err,
            Err(QecError::InvalidCode(CodeDefect::DependentGenerator {
                index: 2
            }))
        );
    }

    #[test]
    fn rejects_logical_that_anticommutes() {
        let err = CodeSpec::new(
            "bad",
            alloc::vec![p("ZZI")],
            alloc::vec![p("XII")],
        );
        assert_eq!(
            err,
            Err(QecError::InvalidCode(CodeDefect::LogicalAnticommutes {
                logical: 0,
                generator: 0
            }))
        );
    }

    #[test]
    fn rejects_logical_inside_stabilizer_group() {
        let err = CodeSpec::new(
            "bad",
            alloc::vec![p("ZZI"), p("IZZ")],
            alloc::vec![p("ZIZ")],
        );
        assert_eq!(
            err,
            Err(QecError::InvalidCode(CodeDefect::LogicalInStabilizer {
                logical: 0
            }))
        );
    }

    #[test]
    fn rejects_overfull_generator_list() {
        // Three independent commuting generators on three qubits leave no
        // room for a logical qubit.
        let err = CodeSpec::new(
            "bad",
            alloc::vec![p("ZZI"), p("IZZ"), p("XXX")],
            alloc::vec![p("ZIZ")],
        );
        assert!(matches!(
            err,
            Err(QecError::InvalidCode(CodeDefect::TooManyGenerators { .. }))
        ));
    }

    #[test]
    fn syndrome_uses_generator_order_for_bits() {
        let spec = CodeSpec::new(
            "bit_flip_3",
            alloc::vec![p("ZZI"), p("IZZ")],
            alloc::vec![p("XXX")],
        )
        .unwrap();
        assert_eq!(spec.syndrome_of(&p("XII")), 0b01);
        assert_eq!(spec.syndrome_of(&p("IXI")), 0b11);
        assert_eq!(spec.syndrome_of(&p("IIX")), 0b10);
        assert_eq!(spec.syndrome_of(&p("ZII")), 0);
    }

    #[test]
    fn stabilizer_membership() {
        let spec = CodeSpec::new(
            "bit_flip_3",
            alloc::vec![p("ZZI"), p("IZZ")],
            alloc::vec![p("XXX")],
        )
        .unwrap();
        assert!(spec.contains_stabilizer(&p("ZIZ")));
        assert!(spec.contains_stabilizer(&p("III")));
        assert!(!spec.contains_stabilizer(&p("ZII")));
        assert!(!spec.contains_stabilizer(&p("XXX")));
    }

    #[test]
    fn layout_places_readout_between_data_and_ancillas() {
        let spec = CodeSpec::new(
            "bit_flip_3",
            alloc::vec![p("ZZI"), p("IZZ")],
            alloc::vec![p("XXX")],
        )
        .unwrap();
        assert_eq!(spec.readout_qubit(), 3);
        assert_eq!(spec.ancilla_qubit(0), 4);
        assert_eq!(spec.ancilla_qubit(1), 5);
        assert_eq!(spec.total_qubits(), 6);
    }
}
