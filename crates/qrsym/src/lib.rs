//! Generates QR Code symbols from text strings and byte arrays.
//!
//! The output is the raw module matrix of a QR Code Model 2 symbol per
//! ISO/IEC 18004: all 40 versions, all 4 error correction levels, with
//! numeric, alphanumeric, byte and ECI segment encoding. Rendering is out
//! of scope; callers read modules off the symbol and paint them however
//! they like.
//!
//! Manual parameters:
//!
//! - Restrict the version search to a range; the smallest version in the
//!   range that fits the data is chosen.
//! - Force one of the eight mask patterns, or let the library score all of
//!   them and pick the best.
//! - Pin the error correction level, or allow boosting it whenever that
//!   does not grow the version.
//! - Build the segment list by hand, including ECI headers, for payloads
//!   the automatic mode selection cannot express.
//!
//! Simple operation:
//!
//! ```
//! use qrsym::{Ecc, QrCode};
//!
//! let qr = QrCode::encode_text("Hello, world!", Ecc::Medium).unwrap();
//! for y in 0..qr.size() {
//!     for x in 0..qr.size() {
//!         // paint qr.get_module(x, y)
//!     }
//! }
//! ```
//!
//! Manual operation:
//!
//! ```
//! use qrsym::{Ecc, Mask, QrCode, Segment, Version};
//!
//! let segs = Segment::make_segments("3141592653589793238462643383");
//! let qr = QrCode::encode_segments_advanced(
//!     &segs,
//!     Ecc::High,
//!     Version::new(5),
//!     Version::new(5),
//!     Some(Mask::new(2)),
//!     false,
//! )
//! .unwrap();
//! assert_eq!(qr.size(), 37);
//! ```

#![forbid(unsafe_code)]

mod bits;
mod codewords;
mod ecc;
mod error;
mod gf256;
mod mask;
mod matrix;
mod mode;
mod penalty;
mod qr_code;
mod segment;
mod version;

pub use bits::{bit_of, BitBuffer};
pub use ecc::{num_data_codewords, num_raw_data_modules, Ecc};
pub use error::EncodeError;
pub use mask::Mask;
pub use mode::Mode;
pub use qr_code::QrCode;
pub use segment::Segment;
pub use version::Version;
