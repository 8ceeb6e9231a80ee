use thiserror::Error;

/// The error type when the supplied data does not fit any symbol version
/// in the permitted range.
///
/// Ways to handle it include lowering the error correction level, raising
/// the maximum version passed to `encode_segments_advanced`, splitting the
/// text into denser segments, or shortening the data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EncodeError {
    /// A segment's character count overflows its count field at every
    /// candidate version, so no total bit length can even be computed.
    #[error("Segment too long")]
    SegmentTooLong,

    /// The payload needs more data bits than the largest candidate version
    /// offers at the requested error correction level.
    #[error("Data too long: {needed} data bits exceed the capacity of {capacity}")]
    DataTooLong {
        /// Bits needed by the segments at the largest candidate version.
        needed: usize,
        /// Data bit capacity of the largest candidate version.
        capacity: usize,
    },
}

#[cfg(test)]
mod should {
    use super::EncodeError;

    #[test]
    fn describe_capacity_overflow_in_the_message() {
        let message = EncodeError::DataTooLong {
            needed: 23652,
            capacity: 23648,
        }
        .to_string();
        assert!(message.starts_with("Data too long"), "{message}");
    }
}
