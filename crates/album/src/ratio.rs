//! Target aspect ratios for export.

use std::fmt;
use std::str::FromStr;

use crate::error::AlbumError;

/// A `W:H` aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

/// Square export (`1:1`).
pub const SQUARE: AspectRatio = AspectRatio::new(1, 1);

/// Portrait export (`9:16`).
pub const PORTRAIT: AspectRatio = AspectRatio::new(9, 16);

/// The ratios the download surface offers.
pub const EXPORT_RATIOS: &[AspectRatio] = &[SQUARE, PORTRAIT];

impl AspectRatio {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height.
    pub fn value(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Filename-safe form, e.g. `1x1`.
    pub fn file_tag(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

impl FromStr for AspectRatio {
    type Err = AlbumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AlbumError::InvalidRatio(s.to_string());

        let (w, h) = s.split_once(':').ok_or_else(invalid)?;
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_the_export_ratios() {
        assert_eq!("1:1".parse::<AspectRatio>().unwrap(), SQUARE);
        assert_eq!("9:16".parse::<AspectRatio>().unwrap(), PORTRAIT);
    }

    #[test]
    fn rejects_malformed_strings() {
        for input in ["", "1", "1:", ":1", "0:1", "1:0", "a:b", "1:1:1"] {
            assert_matches!(
                input.parse::<AspectRatio>(),
                Err(AlbumError::InvalidRatio(_)),
                "input {input:?} should be rejected"
            );
        }
    }

    #[test]
    fn value_and_display() {
        assert_eq!(SQUARE.value(), 1.0);
        assert_eq!(PORTRAIT.value(), 9.0 / 16.0);
        assert_eq!(PORTRAIT.to_string(), "9:16");
        assert_eq!(PORTRAIT.file_tag(), "9x16");
    }
}
