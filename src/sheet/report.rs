//! Summary of a generated sheet.

use std::fmt;

/// What a sheet run produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SheetReport {
    /// Number of labels placed (each once on the front sequence).
    pub labels: usize,
    pub front_pages: usize,
    /// Mirrored back pages; zero for single-sided sheets.
    pub back_pages: usize,
    /// Labels in the first row of the first page.
    pub labels_per_row: usize,
    /// Rows on the first page.
    pub rows_per_page: usize,
}

impl SheetReport {
    /// Total pages in emission order.
    pub fn total_pages(&self) -> usize {
        self.front_pages + self.back_pages
    }
}

impl fmt::Display for SheetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sheet summary:")?;
        writeln!(f, "  Labels:         {}", self.labels)?;
        writeln!(f, "  Front pages:    {}", self.front_pages)?;
        writeln!(f, "  Back pages:     {}", self.back_pages)?;
        writeln!(f, "  Total pages:    {}", self.total_pages())?;
        writeln!(
            f,
            "  Layout:         {} per row, {} rows per page",
            self.labels_per_row, self.rows_per_page
        )
    }
}
