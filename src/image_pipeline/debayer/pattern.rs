//! Bayer pattern layouts and the per-cell site lookup.

use std::fmt;
use std::str::FromStr;

use crate::image_pipeline::common::error::ConversionError;
use crate::image_pipeline::mosaic::Site;

/// The four standard 2x2 Bayer layouts, named by reading the top-left cell
/// row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BayerPattern {
    #[default]
    Rggb,
    Bggr,
    Gbrg,
    Grbg,
}

/// Mosaic coordinates of the four sensor sites that make up one output pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSites {
    pub red: Site,
    pub green1: Site,
    pub green2: Site,
    pub blue: Site,
}

const fn offsets(red: (usize, usize), green1: (usize, usize), green2: (usize, usize), blue: (usize, usize)) -> CellSites {
    CellSites {
        red: Site::new(red.0, red.1),
        green1: Site::new(green1.0, green1.1),
        green2: Site::new(green2.0, green2.1),
        blue: Site::new(blue.0, blue.1),
    }
}

// (col, row) offsets inside the cell
const RGGB: CellSites = offsets((0, 0), (1, 0), (0, 1), (1, 1));
const BGGR: CellSites = offsets((1, 1), (1, 0), (0, 1), (0, 0));
const GBRG: CellSites = offsets((0, 1), (0, 0), (1, 1), (1, 0));
const GRBG: CellSites = offsets((1, 0), (0, 0), (1, 1), (0, 1));

impl BayerPattern {
    pub const ALL: [BayerPattern; 4] = [
        BayerPattern::Rggb,
        BayerPattern::Bggr,
        BayerPattern::Gbrg,
        BayerPattern::Grbg,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BayerPattern::Rggb => "RGGB",
            BayerPattern::Bggr => "BGGR",
            BayerPattern::Gbrg => "GBRG",
            BayerPattern::Grbg => "GRBG",
        }
    }

    /// Persisted parameter index.
    pub fn index(self) -> u32 {
        match self {
            BayerPattern::Rggb => 0,
            BayerPattern::Bggr => 1,
            BayerPattern::Gbrg => 2,
            BayerPattern::Grbg => 3,
        }
    }

    /// Site offsets within a single 2x2 cell.
    pub fn offsets(self) -> CellSites {
        match self {
            BayerPattern::Rggb => RGGB,
            BayerPattern::Bggr => BGGR,
            BayerPattern::Gbrg => GBRG,
            BayerPattern::Grbg => GRBG,
        }
    }

    /// Mosaic sites feeding output pixel `(col, row)`.
    ///
    /// The cell origin is `(2 * col, 2 * row)`.
    #[inline]
    pub fn resolve(self, col: usize, row: usize) -> CellSites {
        let base_col = col * 2;
        let base_row = row * 2;
        let at = |offset: Site| Site::new(base_col + offset.col, base_row + offset.row);
        let cell = self.offsets();
        CellSites {
            red: at(cell.red),
            green1: at(cell.green1),
            green2: at(cell.green2),
            blue: at(cell.blue),
        }
    }
}

impl fmt::Display for BayerPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BayerPattern {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BayerPattern::ALL
            .into_iter()
            .find(|pattern| pattern.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConversionError::InvalidPattern(s.to_string()))
    }
}

impl TryFrom<u32> for BayerPattern {
    type Error = ConversionError;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        BayerPattern::ALL
            .into_iter()
            .find(|pattern| pattern.index() == index)
            .ok_or_else(|| ConversionError::InvalidPattern(format!("parameter index {index}")))
    }
}
