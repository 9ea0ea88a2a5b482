//! Bracketed, column-aligned matrix layout

use crate::symbolic::SymMatrix;

/// Lay out a matrix as text lines with aligned columns
///
/// Multi-row matrices get ⎡ ⎢ ⎣ brackets, a single row gets `[ ]`.
pub fn matrix_lines(m: &SymMatrix) -> Vec<String> {
    let cells: Vec<Vec<String>> = (0..m.nrows())
        .map(|i| (0..m.ncols()).map(|j| m.get(i, j).to_string()).collect())
        .collect();

    let widths: Vec<usize> = (0..m.ncols())
        .map(|j| {
            cells
                .iter()
                .map(|row| row[j].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let rows = cells.len();
    cells
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let (open, close) = match (rows, i) {
                (1, _) => ('[', ']'),
                (_, 0) => ('⎡', '⎤'),
                (_, i) if i + 1 == rows => ('⎣', '⎦'),
                _ => ('⎢', '⎥'),
            };
            let body = row
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| center(cell, width))
                .collect::<Vec<_>>()
                .join("  ");
            format!("{}{}{}", open, body, close)
        })
        .collect()
}

fn center(cell: &str, width: usize) -> String {
    let pad = width.saturating_sub(cell.chars().count());
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), cell, " ".repeat(pad - left))
}
