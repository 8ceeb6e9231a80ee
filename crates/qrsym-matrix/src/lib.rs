//! Thin matrix-oriented wrapper over the [`qrsym`] encoder.
//!
//! [`EncodeOptions`] holds the encoding parameters as plain serializable
//! data; [`QrMatrix`] runs the encoder once and keeps an owned copy of the
//! module grid, so callers can drop the symbol type entirely and work with
//! rows of booleans.

#![forbid(unsafe_code)]

mod error;

pub use error::MatrixError;

use serde::{Deserialize, Serialize};

use qrsym::{Ecc, Mask, QrCode, Segment, Version};

/// Encoding parameters for [`QrMatrix`].
///
/// Every field is plain data: updating a parameter is a plain assignment,
/// and an untouched field simply keeps its previous value. The defaults
/// are the encoder's defaults: low error correction, the full version
/// range, automatic masking, boosting on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeOptions {
    /// Requested error correction level; the result may end up higher
    /// when boosting is on.
    pub ecc: Ecc,
    /// Smallest version to consider, 1 to 40.
    pub min_version: u8,
    /// Largest version to consider, 1 to 40.
    pub max_version: u8,
    /// Forced mask pattern in [0, 7], or `None` for automatic selection.
    pub mask: Option<u8>,
    /// Whether the error correction level may be raised for free.
    pub boost_ecc: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            ecc: Ecc::Low,
            min_version: 1,
            max_version: 40,
            mask: None,
            boost_ecc: true,
        }
    }
}

/// An owned light/dark module matrix produced from one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    size: i32,
    version: u8,
    mask: u8,
    ecc: Ecc,
    rows: Vec<Vec<bool>>,
}

impl QrMatrix {
    /// Encodes the given text with the given parameters and copies the
    /// resulting matrix out of the symbol.
    pub fn encode_text(text: &str, options: &EncodeOptions) -> Result<Self, MatrixError> {
        let segs = Segment::make_segments(text);
        Self::encode_segments(&segs, options)
    }

    /// Encodes the given bytes in byte mode with the given parameters.
    pub fn encode_binary(data: &[u8], options: &EncodeOptions) -> Result<Self, MatrixError> {
        let segs = [Segment::make_bytes(data)];
        Self::encode_segments(&segs, options)
    }

    fn encode_segments(segs: &[Segment], options: &EncodeOptions) -> Result<Self, MatrixError> {
        let qr = QrCode::encode_segments_advanced(
            segs,
            options.ecc,
            Version::new(options.min_version),
            Version::new(options.max_version),
            options.mask.map(Mask::new),
            options.boost_ecc,
        )?;
        Ok(Self::from_symbol(&qr))
    }

    fn from_symbol(qr: &QrCode) -> Self {
        let size = qr.size();
        let rows = (0..size)
            .map(|y| (0..size).map(|x| qr.get_module(x, y)).collect())
            .collect();
        Self {
            size,
            version: qr.version().value(),
            mask: qr.mask().value(),
            ecc: qr.error_correction_level(),
            rows,
        }
    }

    /// Returns the side length of the matrix in modules.
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Returns the version of the encoded symbol, 1 to 40.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Returns the mask pattern that was applied, 0 to 7.
    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Returns the error correction level of the encoded symbol.
    pub fn ecc(&self) -> Ecc {
        self.ecc
    }

    /// Returns the matrix as rows of booleans, `true` meaning dark.
    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    /// Returns the module at the given coordinates, or light when the
    /// coordinates fall outside the matrix.
    pub fn get(&self, x: i32, y: i32) -> bool {
        (0..self.size).contains(&x)
            && (0..self.size).contains(&y)
            && self.rows[y as usize][x as usize]
    }
}
