//! A1 cell and range notation

use std::fmt;

use crate::error::StoreError;

/// Zero-based cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub const TOP_LEFT: CellRef = CellRef { row: 0, col: 0 };

    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Parse `A1`-style notation (`B12`, `AA3`).
    pub fn parse(s: &str) -> Result<Self, StoreError> {
        let invalid = || StoreError::InvalidRange(s.to_string());

        let split = s
            .find(|c: char| c.is_ascii_digit())
            .filter(|&i| i > 0)
            .ok_or_else(invalid)?;
        let (letters, digits) = s.split_at(split);

        let mut col = 0usize;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(invalid());
            }
            let v = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
            col = col
                .checked_mul(26)
                .and_then(|n| n.checked_add(v))
                .ok_or_else(invalid)?;
        }

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let row: usize = digits.parse().map_err(|_| invalid())?;
        if row == 0 {
            return Err(invalid());
        }

        Ok(Self {
            row: row - 1,
            col: col - 1,
        })
    }

    fn column_letters(mut col: usize) -> String {
        let mut letters = Vec::new();
        col += 1;
        while col > 0 {
            let rem = (col - 1) % 26;
            letters.push(b'A' + rem as u8);
            col = (col - 1) / 26;
        }
        letters.reverse();
        String::from_utf8_lossy(&letters).into_owned()
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::column_letters(self.col), self.row + 1)
    }
}

/// Inclusive rectangle of cells, e.g. `A1:B1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeSpec {
    pub start: CellRef,
    pub end: CellRef,
}

impl RangeSpec {
    /// Parse `A1:B2`, or a single cell `A1`. Corners may be given in any order.
    pub fn parse(s: &str) -> Result<Self, StoreError> {
        let (a, b) = match s.split_once(':') {
            Some((a, b)) => (CellRef::parse(a)?, CellRef::parse(b)?),
            None => {
                let c = CellRef::parse(s)?;
                (c, c)
            }
        };
        Ok(Self {
            start: CellRef::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellRef::new(a.row.max(b.row), a.col.max(b.col)),
        })
    }

    pub fn rows(&self) -> std::ops::RangeInclusive<usize> {
        self.start.row..=self.end.row
    }

    pub fn cols(&self) -> std::ops::RangeInclusive<usize> {
        self.start.col..=self.end.col
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}

impl std::str::FromStr for RangeSpec {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
