//! Report value type and its calendar date

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::error::DateParseError;

/// Textual form of every report date, e.g. `15/03/2024`.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Report classification. Not used for dispatch yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReportKind {
    #[default]
    Unknown,
    Default,
    Custom,
}

impl ReportKind {
    /// Parse kind from string name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "unknown" => Some(Self::Unknown),
            "default" => Some(Self::Default),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Default => "default",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar date of a report, parsed from the strict `DD/MM/YYYY` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReportDate(NaiveDate);

impl ReportDate {
    /// Parse `DD/MM/YYYY`: exactly 10 characters, zero-padded day and month.
    pub fn parse(s: &str) -> Result<Self, DateParseError> {
        let err = |reason| DateParseError {
            input: s.to_string(),
            reason,
        };

        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[2] != b'/' || bytes[5] != b'/' {
            return Err(err("expected DD/MM/YYYY"));
        }
        if !bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit())
        {
            return Err(err("expected DD/MM/YYYY"));
        }

        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Self)
            .map_err(|_| err("no such calendar date"))
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Four-digit year, the name of the yearly group.
    pub fn year_label(&self) -> String {
        format!("{:04}", self.year())
    }

    /// `MM/YYYY`, the title of the monthly subgroup.
    pub fn month_year(&self) -> String {
        format!("{:02}/{:04}", self.month(), self.year())
    }

    /// 0-based month, the id of the monthly subgroup.
    pub fn subgroup_id(&self) -> i32 {
        self.month() as i32 - 1
    }
}

impl fmt::Display for ReportDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl std::str::FromStr for ReportDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// One unit of work: a dated, flat delimited report body.
///
/// Stages never mutate a report; they build a new one through
/// [`Report::with_body`] or [`Report::with_kind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    name: String,
    date: ReportDate,
    kind: ReportKind,
    body: String,
}

impl Report {
    pub fn new(
        name: impl Into<String>,
        kind: ReportKind,
        date: ReportDate,
        body: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            date,
            kind,
            body: body.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> ReportDate {
        self.date
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Copy of this report with `body` replaced.
    pub fn with_body(&self, body: impl Into<String>) -> Self {
        Self {
            name: self.name.clone(),
            date: self.date,
            kind: self.kind,
            body: body.into(),
        }
    }

    /// Copy of this report re-classified as `kind`.
    pub fn with_kind(&self, kind: ReportKind) -> Self {
        Self {
            kind,
            ..self.clone()
        }
    }
}
