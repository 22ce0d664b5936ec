//! Built-in stabilizer codes for the benchmark suite.
//!
//! Covers the repetition, five-qubit, Steane, and Shor codes plus a small
//! rotated surface-code patch. Each constructor returns an already-validated
//! [`CodeSpec`]. Generator
//! order follows the usual presentation of each code and fixes the ancilla
//! and syndrome-bit assignment. Every code registers one logical operator
//! per logical qubit, chosen X-type so the parity-readout circuit touches
//! exactly its support.

use alloc::vec::Vec;

use crate::code::CodeSpec;
use crate::pauli::PauliString;

fn parse_all(strings: &[&str]) -> Vec<PauliString> {
    strings
        .iter()
        .map(|s| PauliString::parse(s).expect("built-in Pauli literal"))
        .collect()
}

/// 3-qubit bit-flip repetition code.
///
/// Two Z-type generators detect single bit flips; phase errors are
/// unprotected. Logical readout is the parity of all three data qubits.
pub fn bit_flip_3() -> CodeSpec {
    CodeSpec::new(
        "bit_flip_3",
        parse_all(&["ZZI", "IZZ"]),
        parse_all(&["XXX"]),
    )
    .expect("built-in code is valid")
}

/// The [[5,1,3]] five-qubit code.
///
/// The smallest code correcting an arbitrary single-qubit error. All four
/// generators are cyclic shifts of XZZXI and have mixed X/Z support, so
/// their measurement circuits need the Hadamard-sandwiched ancilla form.
pub fn five_qubit() -> CodeSpec {
    CodeSpec::new(
        "five_qubit",
        parse_all(&["XZZXI", "IXZZX", "XIXZZ", "ZXIXZ"]),
        parse_all(&["XXXXX"]),
    )
    .expect("built-in code is valid")
}

/// The Steane [[7,1,3]] code.
///
/// CSS construction from the [7,4] Hamming code: three X-type and three
/// Z-type generators over the same parity-check supports.
pub fn steane_7() -> CodeSpec {
    CodeSpec::new(
        "steane_7",
        parse_all(&[
            "IIIXXXX",
            "IXXIIXX",
            "XIXIXIX",
            "IIIZZZZ",
            "IZZIIZZ",
            "ZIZIZIZ",
        ]),
        parse_all(&["XXXXXXX"]),
    )
    .expect("built-in code is valid")
}

/// The Shor [[9,1,3]] code.
///
/// Concatenation of the phase-flip code over three bit-flip blocks: six
/// weight-2 Z-type generators within the blocks and two weight-6 X-type
/// generators across neighbouring blocks.
pub fn shor_9() -> CodeSpec {
    CodeSpec::new(
        "shor_9",
        parse_all(&[
            "ZZIIIIIII",
            "IZZIIIIII",
            "IIIZZIIII",
            "IIIIZZIII",
            "IIIIIIZZI",
            "IIIIIIIZZ",
            "XXXXXXIII",
            "IIIXXXXXX",
        ]),
        parse_all(&["XXXXXXXXX"]),
    )
    .expect("built-in code is valid")
}

/// Distance-3 rotated surface-code patch on a 3x3 data grid.
///
/// Qubits are numbered row-major. Weight-4 plaquettes tile the bulk in a
/// checkerboard of Z- and X-type faces; weight-2 checks close the
/// boundaries. The Z-type generators take the plain parity-check circuit,
/// the X-type ones the Hadamard-sandwiched form. Logical readout runs down
/// the left column.
pub fn surface_3x3() -> CodeSpec {
    CodeSpec::new(
        "surface_3x3",
        parse_all(&[
            "ZIIZIIIII",
            "IZZIZZIII",
            "IIIZZIZZI",
            "IIIIIZIIZ",
            "IXXIIIIII",
            "XXIXXIIII",
            "IIIIXXIXX",
            "IIIIIIXXI",
        ]),
        parse_all(&["XIIXIIXII"]),
    )
    .expect("built-in code is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_codes_validate_with_expected_counts() {
        for (spec, n, m) in [
            (bit_flip_3(), 3, 2),
            (five_qubit(), 5, 4),
            (steane_7(), 7, 6),
            (shor_9(), 9, 8),
            (surface_3x3(), 9, 8),
        ] {
            assert_eq!(spec.num_data_qubits(), n, "{}", spec.name());
            assert_eq!(spec.num_generators(), m, "{}", spec.name());
            assert_eq!(spec.num_logicals(), 1, "{}", spec.name());
        }
    }
}
