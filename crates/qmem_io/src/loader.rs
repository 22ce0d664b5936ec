use anyhow::{Context, Result};
use bitvec::prelude::*;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Saves fixed-width shot records as packed bits.
///
/// Each record is written little-endian bit-first and padded to a byte
/// boundary, so records can be sliced back out by stride. All records
/// must share the same width for the stride arithmetic to hold.
pub fn save_readout_records<P: AsRef<Path>>(path: P, records: &[Vec<bool>]) -> Result<()> {
    let mut bits = BitVec::<u8, Lsb0>::new();
    for record in records {
        for &bit in record {
            bits.push(bit);
        }
        while bits.len() % 8 != 0 {
            bits.push(false);
        }
    }

    let mut file = File::create(&path)
        .with_context(|| format!("Failed to create {}", path.as_ref().display()))?;
    file.write_all(bits.as_raw_slice())?;
    Ok(())
}

/// Loads a packed record file as raw bits.
pub fn load_readout_records<P: AsRef<Path>>(path: P) -> Result<BitVec<u8, Lsb0>> {
    let mut file = File::open(&path)
        .with_context(|| format!("Failed to open {}", path.as_ref().display()))?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    Ok(BitVec::<u8, Lsb0>::from_vec(buffer))
}

/// Splits raw bits into records of `bits_per_record` bits each.
pub fn slice_records(raw: &BitVec<u8, Lsb0>, bits_per_record: usize) -> Vec<Vec<bool>> {
    let stride_bits = bits_per_record.div_ceil(8) * 8;
    let num_records = raw.len() / stride_bits;

    let mut records = Vec::with_capacity(num_records);
    for i in 0..num_records {
        let start = i * stride_bits;
        let slice = &raw[start..start + bits_per_record];
        records.push(slice.iter().map(|b| *b).collect());
    }
    records
}
