//! Section segmentation and reassembly
//!
//! A report body is a sequence of `\n`-terminated rows whose first cell
//! names the section (report page) the row belongs to:
//!
//! ```text
//! ALPHA,1,2        ALPHA -> "1,2\n3,4\n"
//! BETA,x      =>   BETA  -> "x\n"
//! ALPHA,3,4
//! ```
//!
//! [`split`] groups rows by that first cell, keeping first-occurrence
//! order; [`join`] puts the section name back in front of every row.

use indexmap::IndexMap;

pub const ROW_SEPARATOR: char = '\n';
pub const CELL_SEPARATOR: char = ',';

/// One named block of a report: every row remainder that shared a first cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Raw first-cell token, exactly as it appeared in the body.
    pub name: String,
    /// Row remainders, each `\n`-terminated, in encounter order.
    pub rows: String,
}

impl Section {
    pub fn row_count(&self) -> usize {
        self.rows.matches(ROW_SEPARATOR).count()
    }
}

/// Sections in first-occurrence order, addressable by raw name.
#[derive(Debug, Default, Clone)]
pub struct Sections {
    map: IndexMap<String, Section>,
}

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row remainder to `name`, creating the section at the end if new.
    pub fn push_row(&mut self, name: &str, remainder: &str) {
        let rows = &mut self
            .map
            .entry(name.to_string())
            .or_insert_with(|| Section {
                name: name.to_string(),
                rows: String::new(),
            })
            .rows;
        rows.push_str(remainder);
        rows.push(ROW_SEPARATOR);
    }

    pub fn get(&self, name: &str) -> Option<&Section> {
        self.map.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Values<'_, String, Section> {
        self.map.values()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<'a> IntoIterator for &'a Sections {
    type Item = &'a Section;
    type IntoIter = indexmap::map::Values<'a, String, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.values()
    }
}

/// Split a flat report body into sections.
///
/// Rows with an empty first cell (including the empty tail after a final
/// `\n`) contribute to no section. Malformed rows are never an error.
pub fn split(body: &str) -> Sections {
    let mut sections = Sections::new();
    for row in body.split(ROW_SEPARATOR) {
        let (name, remainder) = row.split_once(CELL_SEPARATOR).unwrap_or((row, ""));
        if name.is_empty() {
            continue;
        }
        sections.push_row(name, remainder);
    }
    log::debug!("split report into {} sections", sections.len());
    sections
}

/// Re-prefix every row of `rows` with `name`.
///
/// `rows` is `\n`-separated; a single trailing `\n` does not start another
/// row, and empty input yields no rows.
///
/// Every emitted row gets a cell separator after the name, so a row that
/// held only its name (`Header`) comes back as `Header,`. [`split`] gives
/// such a row the same empty remainder as `Header,` and the two cannot be
/// told apart.
pub fn join(name: &str, rows: &str) -> String {
    let mut out = String::with_capacity(rows.len() + name.len() * 4);
    if rows.is_empty() {
        return out;
    }
    let rows = rows.strip_suffix(ROW_SEPARATOR).unwrap_or(rows);
    for row in rows.split(ROW_SEPARATOR) {
        out.push_str(name);
        out.push(CELL_SEPARATOR);
        out.push_str(row);
        out.push(ROW_SEPARATOR);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_groups_by_first_cell() {
        let sections = split("ALPHA,1,2\nBETA,x\nALPHA,3,4\n");
        let names: Vec<_> = sections.names().collect();
        assert_eq!(names, vec!["ALPHA", "BETA"]);
        assert_eq!(sections.get("ALPHA").unwrap().rows, "1,2\n3,4\n");
        assert_eq!(sections.get("BETA").unwrap().rows, "x\n");
    }

    #[test]
    fn split_order_is_first_occurrence() {
        let sections = split("C,1\nA,1\nB,1\nA,2\nC,2\nB,2\nD,1\n");
        let names: Vec<_> = sections.names().collect();
        assert_eq!(names, vec!["C", "A", "B", "D"]);
        assert_eq!(sections.get("C").unwrap().row_count(), 2);
        assert_eq!(sections.get("D").unwrap().row_count(), 1);
    }

    #[test]
    fn split_name_is_case_sensitive() {
        let sections = split("Fees,1\nFEES,2\n");
        assert_eq!(sections.len(), 2);
    }

    #[test]
    fn split_skips_empty_names() {
        let sections = split("\n,orphan\nA,1\n\n");
        let names: Vec<_> = sections.names().collect();
        assert_eq!(names, vec!["A"]);
    }

    #[test]
    fn split_row_without_cells() {
        let sections = split("Header\n");
        assert_eq!(sections.get("Header").unwrap().rows, "\n");
    }

    #[test]
    fn split_keeps_empty_cells() {
        let sections = split("A,1,,3,\n");
        assert_eq!(sections.get("A").unwrap().rows, "1,,3,\n");
    }

    #[test]
    fn split_empty_body() {
        assert!(split("").is_empty());
    }

    #[test]
    fn join_prefixes_every_row() {
        assert_eq!(join("ALPHA", "1,2\n3,4\n"), "ALPHA,1,2\nALPHA,3,4\n");
    }

    #[test]
    fn join_without_trailing_separator() {
        assert_eq!(join("B", "x\ny"), "B,x\nB,y\n");
    }

    #[test]
    fn join_empty_rows() {
        assert_eq!(join("A", ""), "");
    }

    #[test]
    fn identity_round_trip_groups_interleaved_rows() {
        let body = "ALPHA,1,2\nBETA,x\nALPHA,3,4\n";
        let out: String = split(body).iter().map(|s| join(&s.name, &s.rows)).collect();
        assert_eq!(out, "ALPHA,1,2\nALPHA,3,4\nBETA,x\n");
    }

    #[test]
    fn name_only_row_gains_separator() {
        let body = "Header\nFees,1\n";
        let out: String = split(body).iter().map(|s| join(&s.name, &s.rows)).collect();
        assert_eq!(out, "Header,\nFees,1\n");
    }

    #[test]
    fn push_row_appends_to_existing_section() {
        let mut sections = Sections::new();
        sections.push_row("A", "1");
        sections.push_row("B", "x");
        sections.push_row("A", "2");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections.get("A").unwrap().rows, "1\n2\n");
        let names: Vec<_> = (&sections).into_iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn identity_round_trip_preserves_every_row() {
        let body = "Fees,Header,Amount\nESG,Score,7\nFees,Data,\"1,000\"\nESG,Note,\n";
        let out: String = split(body).iter().map(|s| join(&s.name, &s.rows)).collect();

        let mut expected: Vec<&str> = body.lines().collect();
        let mut actual: Vec<&str> = out.lines().collect();
        expected.sort();
        actual.sort();
        assert_eq!(actual, expected);
    }
}
