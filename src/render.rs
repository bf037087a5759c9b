//! Text rendering of a `CostMatrix`, with the traceback path highlighted.
//!
//! ```text
//! +---+-----+-----+
//! |   |     |   b |
//! +===+=====+=====+
//! |   | *0* |   1 |
//! +---+-----+-----+
//! | a | *1* |   2 |
//! +---+-----+-----+
//! | b |   2 | *1* |
//! +---+-----+-----+
//! ```

use crate::{byte_char, prelude::*, CostMatrix};
use itertools::Itertools;
use std::fmt::{self, Display};

/// A table with the symbols of `a` labelling the rows and the symbols of `b`
/// labelling the columns.
pub struct Grid<'a> {
    m: &'a CostMatrix,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    highlight: HashSet<Pos>,
}

impl<'a> Grid<'a> {
    pub fn new<A: Display, B: Display>(
        m: &'a CostMatrix,
        a: impl IntoIterator<Item = A>,
        b: impl IntoIterator<Item = B>,
    ) -> Self {
        Grid {
            m,
            row_labels: a.into_iter().map(|x| x.to_string()).collect(),
            col_labels: b.into_iter().map(|x| x.to_string()).collect(),
            highlight: HashSet::default(),
        }
    }

    pub fn from_bytes(m: &'a CostMatrix, a: Seq, b: Seq) -> Self {
        Self::new(m, a.iter().map(|&c| byte_char(c)), b.iter().map(|&c| byte_char(c)))
    }

    /// Mark the given cells, e.g. a traceback path.
    pub fn highlight(mut self, cells: &[Pos]) -> Self {
        self.highlight.extend(cells.iter().copied());
        self
    }

    fn table(&self) -> Vec<Vec<String>> {
        let mut table = Vec::with_capacity(self.m.rows() + 1);
        // Header: two empty corner cells, then one column per symbol of `b`.
        table.push(
            ["", ""]
                .into_iter()
                .map(String::from)
                .chain(self.col_labels.iter().cloned())
                .collect_vec(),
        );
        for (i, row) in self.m.iter_rows().enumerate() {
            let label = match i {
                0 => String::new(),
                _ => self.row_labels.get(i - 1).cloned().unwrap_or_default(),
            };
            let cells = row.iter().enumerate().map(|(j, c)| {
                if self.highlight.contains(&Pos(i, j)) {
                    format!("*{c}*")
                } else {
                    c.to_string()
                }
            });
            table.push(std::iter::once(label).chain(cells).collect_vec());
        }
        table
    }
}

impl Display for Grid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table();
        let ncols = table.iter().map(|r| r.len()).max().unwrap_or(0);
        let widths = (0..ncols)
            .map(|j| {
                table
                    .iter()
                    .filter_map(|r| r.get(j))
                    .map(|c| c.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect_vec();
        let line = |fill: &str| {
            format!(
                "+{}+",
                widths.iter().map(|w| fill.repeat(w + 2)).join("+")
            )
        };
        let empty = String::new();

        writeln!(f, "{}", line("-"))?;
        for (r, row) in table.iter().enumerate() {
            let cells = widths
                .iter()
                .enumerate()
                .map(|(j, &w)| format!(" {:>w$} ", row.get(j).unwrap_or(&empty)))
                .join("|");
            writeln!(f, "|{cells}|")?;
            writeln!(f, "{}", line(if r == 0 { "=" } else { "-" }))?;
        }
        Ok(())
    }
}
