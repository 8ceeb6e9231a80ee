use log::debug;

use crate::codewords;
use crate::ecc::{self, Ecc};
use crate::error::EncodeError;
use crate::mask::Mask;
use crate::matrix::MatrixBuilder;
use crate::segment::Segment;
use crate::version::Version;

/// A QR Code symbol: an immutable square grid of dark and light modules
/// covering the Model 2 standard, versions 1 to 40 and all four error
/// correction levels.
///
/// Ways to create a symbol:
///
/// - High level: pass the payload to [`QrCode::encode_text`] or
///   [`QrCode::encode_binary`].
/// - Mid level: build the segment list yourself and call
///   [`QrCode::encode_segments`] or [`QrCode::encode_segments_advanced`].
/// - Low level: supply the finished data codeword bytes (segment headers
///   and padding included, error correction excluded) to
///   [`QrCode::encode_codewords`].
///
/// Every route requires the desired error correction level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCode {
    version: Version,
    size: i32,
    ecl: Ecc,
    mask: Mask,
    // The final module colors after masking, row-major, size*size entries
    // (false = light, true = dark).
    modules: Vec<bool>,
}

impl QrCode {
    /// Encodes the given Unicode text at the given error correction level.
    ///
    /// The smallest version that fits the data is chosen automatically,
    /// and the error correction level is raised when that costs nothing.
    /// As a conservative upper bound, this function succeeds for any
    /// string of at most 738 code points at the low level.
    ///
    /// Returns an error iff the data does not fit any version.
    pub fn encode_text(text: &str, ecl: Ecc) -> Result<Self, EncodeError> {
        let segs = Segment::make_segments(text);
        QrCode::encode_segments(&segs, ecl)
    }

    /// Encodes the given binary data at the given error correction level,
    /// always in byte mode. At most 2953 bytes fit.
    ///
    /// Returns an error iff the data does not fit any version.
    pub fn encode_binary(data: &[u8], ecl: Ecc) -> Result<Self, EncodeError> {
        let segs = [Segment::make_bytes(data)];
        QrCode::encode_segments(&segs, ecl)
    }

    /// Encodes the given segments at the given error correction level,
    /// searching every version and boosting the level when free.
    ///
    /// Hand-built segment lists can switch modes to encode mixed text in
    /// less space than the single-mode factories.
    pub fn encode_segments(segs: &[Segment], ecl: Ecc) -> Result<Self, EncodeError> {
        QrCode::encode_segments_advanced(segs, ecl, Version::MIN, Version::MAX, None, true)
    }

    /// Encodes the given segments with full control over the parameters:
    /// the version range to search, a forced mask (`None` selects the best
    /// of the eight automatically, which costs eight penalty evaluations),
    /// and whether the error correction level may be raised for free.
    ///
    /// Panics if `min_version > max_version`. Returns an error iff the
    /// data does not fit any version in the range.
    pub fn encode_segments_advanced(
        segs: &[Segment],
        mut ecl: Ecc,
        min_version: Version,
        max_version: Version,
        mask: Option<Mask>,
        boost_ecl: bool,
    ) -> Result<Self, EncodeError> {
        assert!(min_version <= max_version, "Invalid version range");

        // Find the smallest version in the range that fits the data
        let mut version = min_version;
        let data_used_bits = loop {
            let capacity_bits = ecc::num_data_codewords(version, ecl) * 8;
            let used = Segment::total_bits(segs, version);
            match used {
                Some(n) if n <= capacity_bits => break n,
                _ if version >= max_version => {
                    return Err(match used {
                        Some(n) => EncodeError::DataTooLong {
                            needed: n,
                            capacity: capacity_bits,
                        },
                        None => EncodeError::SegmentTooLong,
                    });
                }
                _ => version = Version::new(version.value() + 1),
            }
        };
        debug!(
            "version {} fits {} of {} data bits",
            version.value(),
            data_used_bits,
            ecc::num_data_codewords(version, ecl) * 8
        );

        // Raise the error correction level while the data still fits
        if boost_ecl {
            for candidate in [Ecc::Medium, Ecc::Quartile, Ecc::High] {
                if data_used_bits <= ecc::num_data_codewords(version, candidate) * 8 {
                    ecl = candidate;
                }
            }
            debug!("error correction level {:?} after boosting", ecl);
        }

        let data_codewords = codewords::pack_data_codewords(segs, version, ecl);
        Ok(QrCode::encode_codewords(version, ecl, &data_codewords, mask))
    }

    /// Builds a symbol from finished data codewords: the low-level
    /// constructor beneath the factory functions.
    ///
    /// Panics unless `data_codewords.len()` equals
    /// `num_data_codewords(version, ecl)`.
    pub fn encode_codewords(
        version: Version,
        ecl: Ecc,
        data_codewords: &[u8],
        mask: Option<Mask>,
    ) -> Self {
        assert_eq!(
            data_codewords.len(),
            ecc::num_data_codewords(version, ecl),
            "Wrong data codeword count"
        );

        let mut builder = MatrixBuilder::new(version, ecl);
        let raw_codewords = codewords::interleave_with_ecc(version, ecl, data_codewords);
        builder.place_codewords(&raw_codewords);

        let mask = mask.unwrap_or_else(|| builder.choose_mask());
        builder.apply_mask(mask);
        builder.draw_format_bits(mask);

        QrCode {
            version,
            size: version.symbol_size(),
            ecl,
            mask,
            modules: builder.finish(),
        }
    }

    /// Returns this symbol's version, in the range [1, 40].
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns this symbol's side length in modules, in the range
    /// [21, 177], equal to `4 * version + 17`.
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Returns this symbol's error correction level. With boosting on,
    /// this may be higher than the level that was requested.
    pub fn error_correction_level(&self) -> Ecc {
        self.ecl
    }

    /// Returns the mask that was applied, in the range [0, 7]. Defined
    /// even when the mask was chosen automatically.
    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Returns the color of the module at the given coordinates: `true`
    /// for dark, `false` for light. The top left corner is (0, 0).
    /// Out-of-bounds coordinates read as light.
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        (0..self.size).contains(&x)
            && (0..self.size).contains(&y)
            && self.modules[(y * self.size + x) as usize]
    }
}
