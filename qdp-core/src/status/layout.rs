//! Status block layout
//!
//! A status response carries a 20 byte header followed by the blocks whose
//! bits are set in the header bitmap, packed in bit order. Every bit has a
//! fixed width in [`BLOCK_LAYOUT`]. Bits this client does not decode have a
//! width of zero and so never move the offset, even when set; firmware that
//! actually sends those blocks will shift every later block.

use bitflags::bitflags;

bitflags! {
    /// Status blocks addressed by the header bitmap
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StatusBlocks: u32 {
        const GLOBAL = 1 << 0;
        const GPS = 1 << 1;
        const POWER_SUPPLY = 1 << 2;
        const BOOM = 1 << 3;
        const THREAD = 1 << 4;
        const PLL = 1 << 5;
        const GPS_SATELLITES = 1 << 6;
        const ARP = 1 << 7;
        const DATA_PORT_1 = 1 << 8;
        const DATA_PORT_2 = 1 << 9;
        const DATA_PORT_3 = 1 << 10;
        const DATA_PORT_4 = 1 << 11;
        const SERIAL_1 = 1 << 12;
        const SERIAL_2 = 1 << 13;
        const SERIAL_3 = 1 << 14;
        const ETHERNET = 1 << 15;

        /// Blocks decoded by this client
        const DECODED = Self::GLOBAL.bits()
            | Self::GPS.bits()
            | Self::BOOM.bits()
            | Self::DATA_PORT_1.bits()
            | Self::DATA_PORT_2.bits()
            | Self::DATA_PORT_3.bits()
            | Self::DATA_PORT_4.bits()
            | Self::ETHERNET.bits();
    }
}

/// Status header size
pub const STATUS_HEADER_SIZE: usize = 20;

/// Decoded block kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Global,
    Gps,
    Boom,
    /// Logical port index 0-3
    LogicalPort(usize),
    Ethernet,
}

/// Placement rule for one bitmap bit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    /// Decoder for the block, `None` if not decoded
    pub kind: Option<BlockKind>,

    /// Bytes the offset advances when the bit is set
    pub width: usize,
}

const fn decoded(kind: BlockKind, width: usize) -> BlockLayout {
    BlockLayout {
        kind: Some(kind),
        width,
    }
}

const SKIPPED: BlockLayout = BlockLayout {
    kind: None,
    width: 0,
};

/// Layout of bitmap bits 0-15, indexed by bit
pub static BLOCK_LAYOUT: [BlockLayout; 16] = [
    decoded(BlockKind::Global, 52),
    decoded(BlockKind::Gps, 84),
    SKIPPED,
    decoded(BlockKind::Boom, 32),
    SKIPPED,
    SKIPPED,
    SKIPPED,
    SKIPPED,
    decoded(BlockKind::LogicalPort(0), 32),
    decoded(BlockKind::LogicalPort(1), 32),
    decoded(BlockKind::LogicalPort(2), 32),
    decoded(BlockKind::LogicalPort(3), 32),
    SKIPPED,
    SKIPPED,
    SKIPPED,
    decoded(BlockKind::Ethernet, 76),
];

/// Blocks present in `bitmap`, in payload order, with their start offsets
///
/// ```
/// use qdp_core::status::layout::{self, BlockKind};
///
/// let placed: Vec<_> = layout::placements(0b11)
///     .map(|(_, block, offset)| (block.kind, offset))
///     .collect();
///
/// assert_eq!(placed, [(Some(BlockKind::Global), 20), (Some(BlockKind::Gps), 72)]);
/// ```
pub fn placements(bitmap: u32) -> impl Iterator<Item = (usize, BlockLayout, usize)> {
    BLOCK_LAYOUT
        .iter()
        .enumerate()
        .filter(move |(bit, _)| bitmap & (1u32 << *bit) != 0)
        .scan(STATUS_HEADER_SIZE, |offset, (bit, block)| {
            let start = *offset;
            *offset += block.width;
            Some((bit, *block, start))
        })
}

/// Offset just past the last block present in `bitmap`
pub fn blocks_end(bitmap: u32) -> usize {
    placements(bitmap)
        .last()
        .map_or(STATUS_HEADER_SIZE, |(_, block, start)| start + block.width)
}
