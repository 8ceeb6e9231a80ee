/// A symbol version number between 1 and 40 (inclusive).
///
/// The version fixes the side length of the symbol: `4 * version + 17`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Version(u8);

impl Version {
    /// The smallest version defined by the QR Code Model 2 standard.
    pub const MIN: Version = Version(1);

    /// The largest version defined by the QR Code Model 2 standard.
    pub const MAX: Version = Version(40);

    /// Creates a version object from the given number.
    ///
    /// Panics if the number is outside the range [1, 40].
    pub fn new(ver: u8) -> Self {
        assert!(
            (Version::MIN.0..=Version::MAX.0).contains(&ver),
            "Version number out of range"
        );
        Self(ver)
    }

    /// Returns the version number, in the range [1, 40].
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the symbol side length for this version, in the range [21, 177].
    pub const fn symbol_size(self) -> i32 {
        self.0 as i32 * 4 + 17
    }
}

#[cfg(test)]
mod should {
    use super::Version;

    #[test]
    fn accept_the_full_standard_range() {
        assert_eq!(Version::new(1), Version::MIN);
        assert_eq!(Version::new(40), Version::MAX);
    }

    #[test]
    fn derive_the_symbol_size() {
        assert_eq!(Version::new(1).symbol_size(), 21);
        assert_eq!(Version::new(40).symbol_size(), 177);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn reject_version_zero() {
        Version::new(0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn reject_versions_past_forty() {
        Version::new(41);
    }
}
