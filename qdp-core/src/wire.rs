//! Fixed size big-endian payload blocks

use std::io::{self, Cursor, Read};

/// A packed block read straight out of a frame payload
pub(crate) trait WireBlock: Sized + Default {
    /// Encoded size in bytes
    const SIZE: usize;

    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self>;

    /// Decode the block starting at `offset`
    ///
    /// A block that runs past the end of `buf` decodes as all zeros, the same
    /// as an absent block.
    fn decode_at(buf: &[u8], offset: usize) -> Self {
        let Some(bytes) = offset
            .checked_add(Self::SIZE)
            .and_then(|end| buf.get(offset..end))
        else {
            return Self::default();
        };

        Self::read_from(&mut Cursor::new(bytes)).unwrap_or_default()
    }
}

/// Read a fixed width byte field
pub(crate) fn read_bytes<const N: usize, R: Read>(reader: &mut R) -> io::Result<[u8; N]> {
    let mut bytes = [0u8; N];
    reader.read_exact(&mut bytes)?;
    Ok(bytes)
}
