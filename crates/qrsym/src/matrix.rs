use log::debug;

use crate::bits::bit_of;
use crate::ecc::{self, Ecc};
use crate::mask::Mask;
use crate::penalty::{RunHistory, PENALTY_N1, PENALTY_N2, PENALTY_N3, PENALTY_N4};
use crate::version::Version;

/// Work-in-progress module grid for one symbol.
///
/// The builder owns both the module colors and the function-pattern marker
/// grid. The marker grid never leaves this type: masking consults it on
/// every XOR, and [`MatrixBuilder::finish`] drops it, so a finished symbol
/// cannot have its function patterns disturbed.
pub(crate) struct MatrixBuilder {
    version: Version,
    ecl: Ecc,
    size: i32,
    modules: Vec<bool>,
    is_function: Vec<bool>,
}

impl MatrixBuilder {
    /// Allocates an all-light grid and draws every function pattern:
    /// timing, finders, alignment, format (with a placeholder mask) and
    /// version information.
    pub(crate) fn new(version: Version, ecl: Ecc) -> Self {
        let size = version.symbol_size();
        let cells = (size * size) as usize;
        let mut builder = Self {
            version,
            ecl,
            size,
            modules: vec![false; cells],
            is_function: vec![false; cells],
        };
        builder.draw_function_patterns();
        builder
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.size + x) as usize
    }

    fn module(&self, x: i32, y: i32) -> bool {
        self.modules[self.index(x, y)]
    }

    // Sets the color of a module and marks it as a function module.
    // Coordinates must be in bounds.
    fn set_function(&mut self, x: i32, y: i32, dark: bool) {
        let index = self.index(x, y);
        self.modules[index] = dark;
        self.is_function[index] = true;
    }

    /// Consumes the builder, returning the module grid and dropping the
    /// function-marker grid.
    pub(crate) fn finish(self) -> Vec<bool> {
        self.modules
    }

    /*---- Function patterns ----*/

    fn draw_function_patterns(&mut self) {
        let size = self.size;

        // Timing patterns along row 6 and column 6, dark at even indices
        for i in 0..size {
            self.set_function(6, i, i % 2 == 0);
            self.set_function(i, 6, i % 2 == 0);
        }

        // Finder patterns in three corners, overwriting some timing modules
        self.draw_finder(3, 3);
        self.draw_finder(size - 4, 3);
        self.draw_finder(3, size - 4);

        // Alignment patterns on a grid, skipping the three finder corners
        let positions = self.alignment_positions();
        let last = positions.len().saturating_sub(1);
        for (i, &px) in positions.iter().enumerate() {
            for (j, &py) in positions.iter().enumerate() {
                if (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0) {
                    continue;
                }
                self.draw_alignment(px, py);
            }
        }

        // Placeholder format bits, overwritten once the mask is chosen
        self.draw_format_bits(Mask::new(0));
        self.draw_version_info();
    }

    // Draws a 9*9 finder pattern including the separator border, centered
    // at (x, y). Modules may fall out of bounds and are clipped.
    fn draw_finder(&mut self, x: i32, y: i32) {
        for dy in -4..=4 {
            for dx in -4..=4 {
                let (xx, yy) = (x + dx, y + dy);
                if (0..self.size).contains(&xx) && (0..self.size).contains(&yy) {
                    let dist = dx.abs().max(dy.abs()); // Chebyshev distance
                    self.set_function(xx, yy, dist != 2 && dist != 4);
                }
            }
        }
    }

    // Draws a 5*5 alignment pattern centered at (x, y), which must be
    // far enough from the edge that every module is in bounds.
    fn draw_alignment(&mut self, x: i32, y: i32) {
        for dy in -2..=2 {
            for dx in -2..=2 {
                self.set_function(x + dx, y + dy, dx.abs().max(dy.abs()) != 1);
            }
        }
    }

    // Returns the ascending list of alignment pattern center positions for
    // this version, used on both axes. The first is always 6 and the last
    // is always size - 7.
    fn alignment_positions(&self) -> Vec<i32> {
        let ver = i32::from(self.version.value());
        if ver == 1 {
            return vec![];
        }
        let num_align = ver / 7 + 2;
        let step = if ver == 32 {
            26
        } else {
            {
                let numer = ver * 4 + 4;
                let denom = num_align * 2 - 2;
                (numer + denom - 1) / denom * 2
            }
        };
        let mut positions: Vec<i32> = (0..num_align - 1).map(|i| self.size - 7 - i * step).collect();
        positions.push(6);
        positions.reverse();
        positions
    }

    /// Draws both copies of the format information for the given mask:
    /// a 15-bit word of (format bits, mask) protected by a BCH(15,5)
    /// remainder over generator 0x537, XORed with the fixed pattern 0x5412.
    pub(crate) fn draw_format_bits(&mut self, mask: Mask) {
        let data = u32::from(self.ecl.format_bits() << 3 | mask.value());
        let mut rem = data;
        for _ in 0..10 {
            rem = (rem << 1) ^ ((rem >> 9) * 0x537);
        }
        let bits = (data << 10 | rem) ^ 0x5412;
        debug_assert_eq!(bits >> 15, 0);

        // First copy, wrapped around the top-left finder
        for i in 0..6 {
            self.set_function(8, i, bit_of(bits, i));
        }
        self.set_function(8, 7, bit_of(bits, 6));
        self.set_function(8, 8, bit_of(bits, 7));
        self.set_function(7, 8, bit_of(bits, 8));
        for i in 9..15 {
            self.set_function(14 - i, 8, bit_of(bits, i));
        }

        // Second copy, split between the top-right and bottom-left corners
        let size = self.size;
        for i in 0..8 {
            self.set_function(size - 1 - i, 8, bit_of(bits, i));
        }
        for i in 8..15 {
            self.set_function(8, size - 15 + i, bit_of(bits, i));
        }
        self.set_function(8, size - 8, true); // dark module
    }

    // Draws both copies of the version information for versions 7 and up:
    // an 18-bit word of the version number protected by a BCH(18,6)
    // remainder over generator 0x1F25, in two transposed 3*6 blocks.
    fn draw_version_info(&mut self) {
        if self.version.value() < 7 {
            return;
        }
        let data = u32::from(self.version.value());
        let mut rem = data;
        for _ in 0..12 {
            rem = (rem << 1) ^ ((rem >> 11) * 0x1F25);
        }
        let bits = data << 12 | rem;
        debug_assert_eq!(bits >> 18, 0);

        for i in 0..18 {
            let bit = bit_of(bits, i);
            let a = self.size - 11 + i % 3;
            let b = i / 3;
            self.set_function(a, b, bit);
            self.set_function(b, a, bit);
        }
    }

    /*---- Codeword placement and masking ----*/

    /// Draws the interleaved codeword bits over the data area in the
    /// standard zig-zag order: two-module columns right to left, skipping
    /// the vertical timing column, alternating upward and downward.
    /// Remainder modules past the last bit stay light.
    pub(crate) fn place_codewords(&mut self, data: &[u8]) {
        assert_eq!(
            data.len(),
            ecc::num_raw_data_modules(self.version) / 8,
            "Wrong codeword count"
        );

        let mut i = 0; // bit index into data
        let mut right = self.size - 1;
        while right >= 1 {
            if right == 6 {
                right = 5; // skip the vertical timing column
            }
            let upward = (right + 1) & 2 == 0;
            for vert in 0..self.size {
                let y = if upward { self.size - 1 - vert } else { vert };
                for x in [right, right - 1] {
                    let index = self.index(x, y);
                    if !self.is_function[index] && i < data.len() * 8 {
                        self.modules[index] = bit_of(u32::from(data[i >> 3]), 7 - (i as i32 & 7));
                        i += 1;
                    }
                }
            }
            right -= 2;
        }
        debug_assert_eq!(i, data.len() * 8);
    }

    /// XORs the mask pattern over every non-function module. Applying the
    /// same mask twice restores the grid; a finished symbol must have had
    /// exactly one mask applied.
    pub(crate) fn apply_mask(&mut self, mask: Mask) {
        for y in 0..self.size {
            for x in 0..self.size {
                let index = self.index(x, y);
                if mask.inverts_at(x, y) && !self.is_function[index] {
                    self.modules[index] ^= true;
                }
            }
        }
    }

    /// Tries all eight masks on the drawn codewords and returns the one
    /// with the lowest penalty score, ties going to the smallest pattern
    /// number. The grid is left unmasked.
    pub(crate) fn choose_mask(&mut self) -> Mask {
        let mut best: Option<(Mask, i32)> = None;
        for pattern in 0..8 {
            let mask = Mask::new(pattern);
            self.apply_mask(mask);
            self.draw_format_bits(mask);
            let score = self.penalty_score();
            if best.map_or(true, |(_, lowest)| score < lowest) {
                best = Some((mask, score));
            }
            self.apply_mask(mask); // XOR undoes the trial
        }
        let (mask, score) = best.unwrap();
        debug!("mask pattern {} selected, penalty {}", mask.value(), score);
        mask
    }

    /*---- Penalty scoring ----*/

    // Scores one row or column for rules N1 (runs of five or more) and
    // N3 (finder-like sequences).
    fn line_penalty(&self, colors: impl Iterator<Item = bool>) -> i32 {
        let mut result = 0;
        let mut run_color = false;
        let mut run_len = 0i32;
        let mut history = RunHistory::new(self.size);
        for color in colors {
            if color == run_color {
                run_len += 1;
                if run_len == 5 {
                    result += PENALTY_N1;
                } else if run_len > 5 {
                    result += 1;
                }
            } else {
                history.push(run_len);
                if !run_color {
                    result += history.finder_like_count() * PENALTY_N3;
                }
                run_color = color;
                run_len = 1;
            }
        }
        result + history.terminate_and_count(run_color, run_len) * PENALTY_N3
    }

    /// Computes the penalty score of the current grid state, used to rank
    /// mask candidates.
    pub(crate) fn penalty_score(&self) -> i32 {
        let size = self.size;
        let mut result = 0;

        // Rules 1 and 3 over every row, then every column
        for y in 0..size {
            result += self.line_penalty((0..size).map(|x| self.module(x, y)));
        }
        for x in 0..size {
            result += self.line_penalty((0..size).map(|y| self.module(x, y)));
        }

        // Rule 2: 2*2 blocks of a single color
        for y in 0..size - 1 {
            for x in 0..size - 1 {
                let color = self.module(x, y);
                if color == self.module(x + 1, y)
                    && color == self.module(x, y + 1)
                    && color == self.module(x + 1, y + 1)
                {
                    result += PENALTY_N2;
                }
            }
        }

        // Rule 4: deviation of the dark module fraction from one half
        let dark: i32 = self.modules.iter().map(|&m| i32::from(m)).sum();
        let total = size * size;
        let k = ((dark * 20 - total * 10).abs() + total - 1) / total - 1;
        debug_assert!((0..=9).contains(&k));
        result + k * PENALTY_N4
    }
}

#[cfg(test)]
mod should {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn place_the_timing_patterns_on_row_and_column_six() {
        let builder = MatrixBuilder::new(Version::new(2), Ecc::Low);
        for i in 8..builder.size - 8 {
            assert_eq!(builder.module(6, i), i % 2 == 0, "column at {i}");
            assert_eq!(builder.module(i, 6), i % 2 == 0, "row at {i}");
        }
    }

    #[test]
    fn center_the_finder_rings_in_three_corners() {
        let builder = MatrixBuilder::new(Version::new(1), Ecc::Low);
        for (cx, cy) in [(3, 3), (17, 3), (3, 17)] {
            assert!(builder.module(cx, cy), "center at {cx},{cy}");
            assert!(!builder.module(cx + 2, cy), "white ring at {cx},{cy}");
            assert!(builder.module(cx + 3, cy), "outer ring at {cx},{cy}");
        }
    }

    #[test]
    fn space_alignment_patterns_per_version() {
        for (ver, expected) in [
            (1, vec![]),
            (2, vec![6, 18]),
            (7, vec![6, 22, 38]),
            (32, vec![6, 34, 60, 86, 112, 138]),
            (40, vec![6, 30, 58, 86, 114, 142, 170]),
        ] {
            let builder = MatrixBuilder::new(Version::new(ver), Ecc::Low);
            assert_eq!(builder.alignment_positions(), expected, "version {ver}");
        }
    }

    #[test]
    fn keep_the_dark_module_dark() {
        for ver in [1, 7, 40] {
            let builder = MatrixBuilder::new(Version::new(ver), Ecc::Medium);
            assert!(builder.module(8, builder.size - 8));
        }
    }

    #[test]
    fn restore_the_grid_when_a_mask_is_applied_twice() {
        let version = Version::new(3);
        let ecl = Ecc::Quartile;
        let mut builder = MatrixBuilder::new(version, ecl);
        let data = vec![0x5A; ecc::num_data_codewords(version, ecl)];
        let raw = crate::codewords::interleave_with_ecc(version, ecl, &data);
        builder.place_codewords(&raw);
        let before = builder.modules.clone();
        for pattern in 0..8 {
            builder.apply_mask(Mask::new(pattern));
            assert_ne!(builder.modules, before);
            builder.apply_mask(Mask::new(pattern));
            assert_eq!(builder.modules, before, "mask {pattern}");
        }
    }

    #[test]
    fn never_mask_function_modules() {
        let mut builder = MatrixBuilder::new(Version::new(1), Ecc::Low);
        let before = builder.modules.clone();
        builder.apply_mask(Mask::new(0));
        // Without codewords drawn, every set module is a function module
        for (index, &marked) in builder.is_function.iter().enumerate() {
            if marked {
                assert_eq!(builder.modules[index], before[index]);
            }
        }
    }
}
