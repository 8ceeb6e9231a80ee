use crate::bits::BitBuffer;
use crate::mode::Mode;
use crate::version::Version;

// All characters encodable in alphanumeric mode. The position of a
// character in this string is its 6-bit charset value.
const ALPHANUMERIC_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// A segment of character/binary/control data in a QR Code symbol.
///
/// Instances are immutable: the bit data moves in through the constructor
/// and is only handed back out by shared reference.
///
/// The mid-level way to create a segment is a factory such as
/// [`Segment::make_numeric`]. The low-level way is to pack a [`BitBuffer`]
/// by hand and call [`Segment::new`], which is also the only route for
/// kanji data, since that mode has no text factory.
///
/// Segments impose no length restrictions of their own, but QR Codes do:
/// even under the most favorable parameters a symbol holds at most 7089
/// characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    mode: Mode,
    num_chars: usize,
    data: BitBuffer,
}

impl Segment {
    /// Creates a segment with the given attributes and bit data.
    ///
    /// The character count must agree with the mode's unit of measure:
    /// digits for numeric, charset characters for alphanumeric, bytes for
    /// byte mode, kanji for kanji mode, and always 0 for ECI.
    pub fn new(mode: Mode, num_chars: usize, data: BitBuffer) -> Self {
        Self {
            mode,
            num_chars,
            data,
        }
    }

    /// Returns a segment representing the given binary data encoded in
    /// byte mode. All byte slices are acceptable; any text can be encoded
    /// this way via its UTF-8 bytes.
    pub fn make_bytes(data: &[u8]) -> Self {
        let mut bits = BitBuffer::with_capacity(data.len() * 8);
        for &b in data {
            bits.append_bits(u32::from(b), 8);
        }
        Segment::new(Mode::Byte, data.len(), bits)
    }

    /// Returns a segment representing the given string of decimal digits
    /// encoded in numeric mode.
    ///
    /// Panics if the string contains non-digit characters.
    pub fn make_numeric(text: &str) -> Self {
        let mut bits = BitBuffer::with_capacity(text.len() * 10 / 3 + 1);
        for group in text.as_bytes().chunks(3) {
            // Groups of 3, 2 and 1 digits pack into 10, 7 and 4 bits
            let mut acc: u32 = 0;
            for &digit in group {
                assert!(digit.is_ascii_digit(), "Non-digit character in numeric mode");
                acc = acc * 10 + u32::from(digit - b'0');
            }
            bits.append_bits(acc, group.len() as u8 * 3 + 1);
        }
        Segment::new(Mode::Numeric, text.len(), bits)
    }

    /// Returns a segment representing the given text encoded in
    /// alphanumeric mode. The encodable characters are 0-9, A-Z
    /// (uppercase only), space, `$`, `%`, `*`, `+`, `-`, `.`, `/`, `:`.
    ///
    /// Panics if the string contains any other character.
    pub fn make_alphanumeric(text: &str) -> Self {
        let values: Vec<u32> = text
            .chars()
            .map(|c| {
                let index = ALPHANUMERIC_CHARSET
                    .find(c)
                    .expect("Character not encodable in alphanumeric mode");
                index as u32
            })
            .collect();
        let mut bits = BitBuffer::with_capacity(text.len() * 11 / 2 + 1);
        for pair in values.chunks(2) {
            match *pair {
                [a, b] => bits.append_bits(a * 45 + b, 11),
                [a] => bits.append_bits(a, 6),
                _ => unreachable!(),
            }
        }
        Segment::new(Mode::Alphanumeric, text.len(), bits)
    }

    /// Returns a segment representing an Extended Channel Interpretation
    /// header with the given assignment value.
    ///
    /// Panics unless 0 &le; value &lt; 1000000.
    pub fn make_eci(assign_val: u32) -> Self {
        let mut bits = BitBuffer::new();
        if assign_val < 128 {
            bits.append_bits(assign_val, 8);
        } else if assign_val < 16384 {
            bits.append_bits(0b10, 2);
            bits.append_bits(assign_val, 14);
        } else if assign_val < 1_000_000 {
            bits.append_bits(0b110, 3);
            bits.append_bits(assign_val, 21);
        } else {
            panic!("ECI assignment value out of range");
        }
        Segment::new(Mode::Eci, 0, bits)
    }

    /// Returns zero or more segments representing the given Unicode text:
    /// none for the empty string, otherwise a single segment in the
    /// densest mode that covers every character, preferring numeric, then
    /// alphanumeric, then byte mode over the UTF-8 encoding.
    pub fn make_segments(text: &str) -> Vec<Self> {
        if text.is_empty() {
            vec![]
        } else if Segment::is_numeric(text) {
            vec![Segment::make_numeric(text)]
        } else if Segment::is_alphanumeric(text) {
            vec![Segment::make_alphanumeric(text)]
        } else {
            vec![Segment::make_bytes(text.as_bytes())]
        }
    }

    /// Tests whether the string can be encoded in numeric mode.
    pub fn is_numeric(text: &str) -> bool {
        text.bytes().all(|b| b.is_ascii_digit())
    }

    /// Tests whether the string can be encoded in alphanumeric mode.
    pub fn is_alphanumeric(text: &str) -> bool {
        text.chars().all(|c| ALPHANUMERIC_CHARSET.contains(c))
    }

    /// Returns the mode indicator of this segment.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the length of this segment's unencoded data: characters for
    /// numeric/alphanumeric/kanji mode, bytes for byte mode, 0 for ECI.
    /// Not the same as the bit length.
    pub fn num_chars(&self) -> usize {
        self.num_chars
    }

    /// Returns the data bits of this segment.
    pub fn data(&self) -> &BitBuffer {
        &self.data
    }

    /// Calculates the number of bits needed to encode the given segments
    /// at the given version: per segment, 4 bits of mode indicator, the
    /// version-dependent character count field, and the payload bits.
    ///
    /// Returns `None` if a segment's character count does not fit its
    /// count field at this version, which makes the total infinite.
    pub fn total_bits(segs: &[Self], version: Version) -> Option<usize> {
        let mut result: usize = 0;
        for seg in segs {
            let cc_bits = seg.mode.char_count_bits(version);
            if seg.num_chars >= 1 << cc_bits {
                return None;
            }
            result = result.checked_add(4 + usize::from(cc_bits) + seg.data.len())?;
        }
        Some(result)
    }
}

#[cfg(test)]
mod should {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collect_bits(seg: &Segment) -> String {
        (0..seg.data().len())
            .map(|i| if seg.data().get(i) { '1' } else { '0' })
            .collect()
    }

    #[test]
    fn pack_digit_groups_of_three_two_and_one() {
        // 012 -> ten bits, 345 -> ten bits, 67 -> seven bits
        let seg = Segment::make_numeric("01234567");
        assert_eq!(seg.mode(), Mode::Numeric);
        assert_eq!(seg.num_chars(), 8);
        assert_eq!(collect_bits(&seg), "000000110001010110011000011");
    }

    #[test]
    fn pack_alphanumeric_pairs_and_a_trailing_single() {
        // A=10, C=12: 10*45+12 = 462; trailing E=14 in six bits
        let seg = Segment::make_alphanumeric("ACE");
        assert_eq!(seg.num_chars(), 3);
        assert_eq!(collect_bits(&seg), "00111001110001110");
    }

    #[test]
    fn pack_bytes_verbatim() {
        let seg = Segment::make_bytes(&[0x00, 0xFF]);
        assert_eq!(seg.mode(), Mode::Byte);
        assert_eq!(seg.num_chars(), 2);
        assert_eq!(collect_bits(&seg), "0000000011111111");
    }

    #[test]
    fn widen_eci_encodings_at_the_boundaries() {
        assert_eq!(Segment::make_eci(127).data().len(), 8);
        assert_eq!(Segment::make_eci(128).data().len(), 16);
        assert_eq!(Segment::make_eci(16383).data().len(), 16);
        assert_eq!(Segment::make_eci(16384).data().len(), 24);
        assert_eq!(Segment::make_eci(999_999).data().len(), 24);
        assert_eq!(collect_bits(&Segment::make_eci(128)), "1000000010000000");
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn reject_eci_values_of_a_million_and_up() {
        Segment::make_eci(1_000_000);
    }

    #[test]
    fn choose_no_segment_for_empty_text() {
        assert!(Segment::make_segments("").is_empty());
    }

    #[test]
    fn choose_the_densest_covering_mode() {
        assert_eq!(Segment::make_segments("0123456789")[0].mode(), Mode::Numeric);
        assert_eq!(Segment::make_segments("HELLO WORLD")[0].mode(), Mode::Alphanumeric);
        assert_eq!(Segment::make_segments("a")[0].mode(), Mode::Byte);
        assert_eq!(Segment::make_segments("Hello, world!")[0].mode(), Mode::Byte);
    }

    #[test]
    fn count_utf8_bytes_not_characters() {
        let segs = Segment::make_segments("héllo");
        assert_eq!(segs[0].mode(), Mode::Byte);
        assert_eq!(segs[0].num_chars(), 6);
    }

    #[test]
    #[should_panic(expected = "Non-digit")]
    fn reject_non_digits_in_numeric_mode() {
        Segment::make_numeric("12a4");
    }

    #[test]
    #[should_panic(expected = "not encodable")]
    fn reject_lowercase_in_alphanumeric_mode() {
        Segment::make_alphanumeric("abc");
    }

    #[test]
    fn total_the_header_and_payload_bits() {
        // 8 digits at version 1: 4 + 10 + 27 bits
        let segs = [Segment::make_numeric("01234567")];
        assert_eq!(Segment::total_bits(&segs, Version::new(1)), Some(41));
        // The same segment needs a wider count field at version 27
        assert_eq!(Segment::total_bits(&segs, Version::new(27)), Some(45));
    }

    #[test]
    fn report_overflowing_counts_as_unencodable() {
        // 1024 digits cannot be counted in the 10-bit field of version 1
        let segs = [Segment::make_numeric(&"8".repeat(1024))];
        assert_eq!(Segment::total_bits(&segs, Version::new(1)), None);
        assert!(Segment::total_bits(&segs, Version::new(10)).is_some());
    }
}
