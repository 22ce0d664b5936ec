//! Pauli strings over n qubits in symplectic representation.

use alloc::vec::Vec;
use core::fmt;

use qmem_common::pauli::Pauli;

use crate::bit_utils;

/// A Pauli operator on n qubits, up to phase.
///
/// Stored as two packed bit vectors: the X-part and the Z-part, each with
/// one bit per qubit. Position q carries X when only the X-bit is set, Z
/// when only the Z-bit is set, and Y when both are. Products, commutation,
/// and weight all reduce to word-level GF(2) arithmetic on the two parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PauliString {
    x: Vec<u64>,
    z: Vec<u64>,
    len: usize,
}

impl PauliString {
    /// The identity operator on `len` qubits.
    pub fn identity(len: usize) -> Self {
        Self {
            x: bit_utils::zeroed(len),
            z: bit_utils::zeroed(len),
            len,
        }
    }

    /// Builds a string from per-qubit Pauli letters, leftmost letter on
    /// qubit 0.
    pub fn from_letters<I>(letters: I) -> Self
    where
        I: IntoIterator<Item = Pauli>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = letters.into_iter();
        let mut s = Self::identity(iter.len());
        for (q, p) in iter.enumerate() {
            s.set(q, p);
        }
        s
    }

    /// Parses a textual Pauli string such as "XZZXI".
    ///
    /// Returns `None` when a character is not one of I, X, Y, Z; the
    /// position of the bad character is not reported here because callers
    /// doing real input handling tokenize first.
    pub fn parse(text: &str) -> Option<Self> {
        let letters: Option<Vec<Pauli>> = text.chars().map(Pauli::from_letter).collect();
        Some(Self::from_letters(letters?))
    }

    /// Number of qubits this operator is defined on.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// X-component bit at qubit `q`.
    pub fn x_bit(&self, q: usize) -> bool {
        debug_assert!(q < self.len);
        bit_utils::get(&self.x, q)
    }

    /// Z-component bit at qubit `q`.
    pub fn z_bit(&self, q: usize) -> bool {
        debug_assert!(q < self.len);
        bit_utils::get(&self.z, q)
    }

    /// The Pauli letter at qubit `q`.
    pub fn pauli_at(&self, q: usize) -> Pauli {
        Pauli::from_xz(self.x_bit(q), self.z_bit(q))
    }

    /// Overwrites the letter at qubit `q`.
    pub fn set(&mut self, q: usize, p: Pauli) {
        debug_assert!(q < self.len);
        bit_utils::set(&mut self.x, q, p.has_x());
        bit_utils::set(&mut self.z, q, p.has_z());
    }

    /// Multiplies `other` into this operator (component-wise XOR; phases
    /// are not tracked).
    pub fn mul_assign(&mut self, other: &PauliString) {
        debug_assert_eq!(self.len, other.len);
        bit_utils::xor_in_place(&mut self.x, &other.x);
        bit_utils::xor_in_place(&mut self.z, &other.z);
    }

    /// Symplectic inner product over GF(2): true when the operators
    /// anticommute.
    pub fn anticommutes_with(&self, other: &PauliString) -> bool {
        debug_assert_eq!(self.len, other.len);
        bit_utils::and_parity(&self.x, &other.z) ^ bit_utils::and_parity(&self.z, &other.x)
    }

    /// True when the operators commute.
    pub fn commutes_with(&self, other: &PauliString) -> bool {
        !self.anticommutes_with(other)
    }

    /// Number of qubits acted on nontrivially.
    pub fn weight(&self) -> usize {
        self.x
            .iter()
            .zip(&self.z)
            .map(|(x, z)| (x | z).count_ones() as usize)
            .sum()
    }

    pub fn is_identity(&self) -> bool {
        bit_utils::is_zero(&self.x) && bit_utils::is_zero(&self.z)
    }

    /// True when the operator has no X-components (a Z-type operator).
    pub fn is_pure_z(&self) -> bool {
        bit_utils::is_zero(&self.x) && !bit_utils::is_zero(&self.z)
    }

    /// True when the operator has no Z-components (an X-type operator).
    pub fn is_pure_x(&self) -> bool {
        bit_utils::is_zero(&self.z) && !bit_utils::is_zero(&self.x)
    }

    /// Iterates the qubit indices the operator acts on, in increasing
    /// order.
    pub fn support(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(move |&q| self.x_bit(q) || self.z_bit(q))
    }

    /// Concatenated symplectic row (X words then Z words), used by the
    /// GF(2) rank computations in the code model.
    pub(crate) fn symplectic_row(&self) -> Vec<u64> {
        let mut row = Vec::with_capacity(self.x.len() + self.z.len());
        row.extend_from_slice(&self.x);
        row.extend_from_slice(&self.z);
        row
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for q in 0..self.len {
            write!(f, "{}", self.pauli_at(q).letter())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn parse_and_display_round_trip() {
        let s = PauliString::parse("XZZXI").unwrap();
        assert_eq!(s.len(), 5);
        assert_eq!(s.to_string(), "XZZXI");
        assert_eq!(s.pauli_at(0), Pauli::X);
        assert_eq!(s.pauli_at(2), Pauli::Z);
        assert_eq!(s.pauli_at(4), Pauli::I);
        assert!(PauliString::parse("XQ").is_none());
    }

    #[test]
    fn weight_and_support() {
        let s = PauliString::parse("IYIZX").unwrap();
        assert_eq!(s.weight(), 3);
        let support: Vec<usize> = s.support().collect();
        assert_eq!(support, [1, 3, 4]);
        assert!(!s.is_pure_z());
        assert!(PauliString::parse("IZZ").unwrap().is_pure_z());
        assert!(PauliString::parse("XXI").unwrap().is_pure_x());
    }

    #[test]
    fn commutation_follows_overlap_parity() {
        let zz = PauliString::parse("ZZI").unwrap();
        let x0 = PauliString::parse("XII").unwrap();
        let xx = PauliString::parse("XXI").unwrap();
        assert!(zz.anticommutes_with(&x0));
        assert!(zz.commutes_with(&xx));
    }

    #[test]
    fn product_cancels_common_factors() {
        let mut a = PauliString::parse("XZI").unwrap();
        let b = PauliString::parse("XZZ").unwrap();
        a.mul_assign(&b);
        assert_eq!(a.to_string(), "IIZ");
        a.mul_assign(&a.clone());
        assert!(a.is_identity());
    }
}
