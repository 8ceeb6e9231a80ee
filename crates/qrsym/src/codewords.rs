use crate::bits::BitBuffer;
use crate::ecc::{self, Ecc};
use crate::gf256;
use crate::segment::Segment;
use crate::version::Version;

/// Serializes the given segments into the data codeword bytes for the
/// given version and error correction level: per-segment mode indicator,
/// character count and payload bits, then the terminator (up to four zero
/// bits), zero bits up to the next byte boundary, and alternating 0xEC/0x11
/// pad bytes until the capacity is reached.
///
/// The segments must fit: their total bit count at this version must not
/// exceed `8 * num_data_codewords(version, ecl)`.
pub(crate) fn pack_data_codewords(segs: &[Segment], version: Version, ecl: Ecc) -> Vec<u8> {
    let capacity_bits = ecc::num_data_codewords(version, ecl) * 8;
    let mut buf = BitBuffer::with_capacity(capacity_bits);
    for seg in segs {
        buf.append_bits(seg.mode().mode_bits(), 4);
        buf.append_bits(
            u32::try_from(seg.num_chars()).unwrap(),
            seg.mode().char_count_bits(version),
        );
        buf.append_buffer(seg.data());
    }
    debug_assert!(buf.len() <= capacity_bits);

    // Terminator, then align to a byte boundary
    let terminator = (capacity_bits - buf.len()).min(4);
    buf.append_bits(0, terminator as u8);
    let align = (8 - buf.len() % 8) % 8;
    buf.append_bits(0, align as u8);
    debug_assert_eq!(buf.len() % 8, 0);

    // Alternating pad bytes until the capacity is reached
    for &pad in [0xEC, 0x11].iter().cycle() {
        if buf.len() >= capacity_bits {
            break;
        }
        buf.append_bits(pad, 8);
    }
    buf.into_bytes()
}

/// Splits the data codewords into blocks, appends Reed-Solomon parity to
/// each block, and interleaves the blocks column by column into the raw
/// codeword sequence. The output length is exactly
/// `num_raw_data_modules(version) / 8`.
pub(crate) fn interleave_with_ecc(version: Version, ecl: Ecc, data: &[u8]) -> Vec<u8> {
    assert_eq!(
        data.len(),
        ecc::num_data_codewords(version, ecl),
        "Wrong data codeword count"
    );

    let num_blocks = ecc::num_error_correction_blocks(version, ecl);
    let block_ecc_len = ecc::ecc_codewords_per_block(version, ecl);
    let raw_codewords = ecc::num_raw_data_modules(version) / 8;
    let num_short_blocks = num_blocks - raw_codewords % num_blocks;
    let short_block_len = raw_codewords / num_blocks;

    // Split the data into short then long blocks, each with its parity.
    // Short blocks get a padding slot so every stored block has the same
    // length; the interleaver skips that slot.
    let divisor = gf256::compute_divisor(block_ecc_len);
    let mut blocks: Vec<Vec<u8>> = Vec::with_capacity(num_blocks);
    let mut consumed = 0;
    for i in 0..num_blocks {
        let data_len = short_block_len - block_ecc_len + usize::from(i >= num_short_blocks);
        let mut block = data[consumed..consumed + data_len].to_vec();
        consumed += data_len;
        let parity = gf256::compute_remainder(&block, &divisor);
        if i < num_short_blocks {
            block.push(0);
        }
        block.extend_from_slice(&parity);
        blocks.push(block);
    }
    debug_assert_eq!(consumed, data.len());

    // Interleave by column across the blocks
    let mut result = Vec::with_capacity(raw_codewords);
    for col in 0..=short_block_len {
        for (j, block) in blocks.iter().enumerate() {
            if col != short_block_len - block_ecc_len || j >= num_short_blocks {
                result.push(block[col]);
            }
        }
    }
    debug_assert_eq!(result.len(), raw_codewords);
    result
}
