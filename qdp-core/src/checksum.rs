//! QDP checksum algorithm
//!
//! A table driven CRC-32 over the frame header and carried payload:
//! 1. Table entry `n` starts from `n << 24` and is shifted through 8 rounds
//! 2. A round XORs in [`POLYNOMIAL`] whenever the top bit of `data ^ accum` is set
//! 3. The running checksum shifts left a byte at a time, folding in the table
//!
//! All arithmetic is 32-bit and discards bits shifted off the top.

use tracing::trace;

/// Generator polynomial (0x56070368)
pub const POLYNOMIAL: u32 = 1_443_300_200;

/// Lookup table, computed at compile time
pub static TABLE: [u32; 256] = build_table();

/// Build the 256 entry lookup table
///
/// ```
/// use qdp_core::checksum;
///
/// let table = checksum::build_table();
/// assert_eq!(table[0], 0);
/// assert_eq!(table[1], checksum::POLYNOMIAL);
/// ```
pub const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];

    let mut count = 0;
    while count < 256 {
        let mut data = (count as u32) << 24;
        let mut accum = 0u32;

        let mut bit = 0;
        while bit < 8 {
            if ((data ^ accum) >> 31) & 1 == 1 {
                accum = (accum << 1) ^ POLYNOMIAL;
            } else {
                accum <<= 1;
            }
            data <<= 1;
            bit += 1;
        }

        table[count] = accum;
        count += 1;
    }

    table
}

/// Calculate the checksum of a byte sequence
///
/// # Examples
///
/// ```
/// use qdp_core::checksum;
///
/// // serial request header
/// let header = [0x38, 0x02, 0x00, 0x04, 0x00, 0x01, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00];
/// assert_eq!(checksum::calculate(&header), 2_625_915_688);
/// ```
pub fn calculate(bytes: &[u8]) -> u32 {
    let crc = bytes.iter().fold(0u32, |crc, &byte| {
        let index = ((crc >> 24) ^ u32::from(byte)) & 0xFF;
        (crc << 8) ^ TABLE[index as usize]
    });

    trace!(
        len = bytes.len(),
        checksum = format!("0x{:08X}", crc),
        "Calculated checksum"
    );

    crc
}

/// Verify checksum
pub fn verify(bytes: &[u8], expected: u32) -> bool {
    calculate(bytes) == expected
}
