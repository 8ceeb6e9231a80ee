use crate::version::Version;

/// The error correction level in a QR Code symbol.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ecc {
    /// Tolerates about 7% erroneous codewords.
    Low,
    /// Tolerates about 15% erroneous codewords.
    Medium,
    /// Tolerates about 25% erroneous codewords.
    Quartile,
    /// Tolerates about 30% erroneous codewords.
    High,
}

impl Ecc {
    /// Returns the row index of this level in the capacity tables, 0 to 3.
    pub fn ordinal(self) -> usize {
        match self {
            Ecc::Low => 0,
            Ecc::Medium => 1,
            Ecc::Quartile => 2,
            Ecc::High => 3,
        }
    }

    /// Returns the 2-bit value written into the format information.
    ///
    /// Note that this differs from the ordinal: Low = 1, Medium = 0,
    /// Quartile = 3, High = 2.
    pub fn format_bits(self) -> u8 {
        match self {
            Ecc::Low => 1,
            Ecc::Medium => 0,
            Ecc::Quartile => 3,
            Ecc::High => 2,
        }
    }
}

// Capacity tables from ISO/IEC 18004 Annex D, indexed [ecc.ordinal()][version].
// Index 0 is padding and holds an illegal sentinel.

#[rustfmt::skip]
static ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    // Version: 1,  2,  3,  4,  5,  6,  7,  8,  9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40
    [-1,  7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28, 30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30], // Low
    [-1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28], // Medium
    [-1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30, 30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30], // Quartile
    [-1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30], // High
];

#[rustfmt::skip]
static NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    // Version: 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40
    [-1, 1, 1, 1, 1, 1, 2, 2, 2, 2,  4,  4,  4,  4,  4,  6,  6,  6,  6,  7,  8,  8,  9,  9, 10, 12, 12, 12, 13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25], // Low
    [-1, 1, 1, 1, 2, 2, 4, 4, 4, 5,  5,  5,  8,  9,  9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21, 23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49], // Medium
    [-1, 1, 1, 2, 2, 4, 4, 6, 6, 8,  8,  8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68], // Quartile
    [-1, 1, 1, 2, 4, 4, 4, 5, 6, 8,  8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32, 35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81], // High
];

pub(crate) fn ecc_codewords_per_block(ver: Version, ecl: Ecc) -> usize {
    ECC_CODEWORDS_PER_BLOCK[ecl.ordinal()][usize::from(ver.value())] as usize
}

pub(crate) fn num_error_correction_blocks(ver: Version, ecl: Ecc) -> usize {
    NUM_ERROR_CORRECTION_BLOCKS[ecl.ordinal()][usize::from(ver.value())] as usize
}

/// Returns the number of data bits that can be stored in a symbol of the
/// given version after all function modules are excluded. This includes
/// remainder bits, so it might not be a multiple of 8. The result is in
/// the range [208, 29648].
pub fn num_raw_data_modules(ver: Version) -> usize {
    let ver = usize::from(ver.value());
    let mut result = (16 * ver + 128) * ver + 64;
    if ver >= 2 {
        let num_align = ver / 7 + 2;
        result -= (25 * num_align - 10) * num_align - 55;
        if ver >= 7 {
            result -= 36;
        }
    }
    debug_assert!((208..=29648).contains(&result));
    result
}

/// Returns the number of 8-bit data codewords (not error correction) held
/// by a symbol of the given version and error correction level, with
/// remainder bits discarded.
pub fn num_data_codewords(ver: Version, ecl: Ecc) -> usize {
    num_raw_data_modules(ver) / 8 - ecc_codewords_per_block(ver, ecl) * num_error_correction_blocks(ver, ecl)
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn distinguish_ordinal_from_format_bits() {
        assert_eq!(Ecc::Low.ordinal(), 0);
        assert_eq!(Ecc::High.ordinal(), 3);
        assert_eq!(Ecc::Low.format_bits(), 1);
        assert_eq!(Ecc::Medium.format_bits(), 0);
        assert_eq!(Ecc::Quartile.format_bits(), 3);
        assert_eq!(Ecc::High.format_bits(), 2);
    }

    #[test]
    fn count_raw_data_modules_at_the_extremes() {
        assert_eq!(num_raw_data_modules(Version::new(1)), 208);
        assert_eq!(num_raw_data_modules(Version::new(2)), 359);
        assert_eq!(num_raw_data_modules(Version::new(40)), 29648);
    }

    #[test]
    fn keep_raw_data_modules_within_the_standard_bounds() {
        for v in 1..=40 {
            let raw = num_raw_data_modules(Version::new(v));
            assert!((208..=29648).contains(&raw), "version {v}: {raw}");
        }
    }

    #[test]
    fn count_data_codewords_for_known_symbols() {
        assert_eq!(num_data_codewords(Version::new(1), Ecc::Low), 19);
        assert_eq!(num_data_codewords(Version::new(1), Ecc::Medium), 16);
        assert_eq!(num_data_codewords(Version::new(1), Ecc::High), 9);
        assert_eq!(num_data_codewords(Version::new(40), Ecc::Low), 2956);
    }

    #[test]
    fn never_go_negative_across_the_tables() {
        for v in 1..=40 {
            for ecl in [Ecc::Low, Ecc::Medium, Ecc::Quartile, Ecc::High] {
                let ver = Version::new(v);
                assert!(num_data_codewords(ver, ecl) * 8 <= num_raw_data_modules(ver));
            }
        }
    }
}
