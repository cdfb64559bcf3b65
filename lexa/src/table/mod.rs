use std::cmp::max;

/// A left-aligned plain-text table. Rows may have different lengths; every column is
/// padded to the width of its widest cell, measured in chars.
#[derive(Default, Debug, Clone)]
pub struct Table {
    widths: Vec<usize>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn push_row(&mut self, row: Vec<String>) {
        if row.len() > self.widths.len() {
            self.widths.resize(row.len(), 0);
        }
        self.widths
            .iter_mut()
            .zip(&row)
            .for_each(|(width, cell)| *width = max(*width, cell.chars().count()));
        self.rows.push(row);
    }

    pub fn render(&self, sep: &str) -> String {
        let pad = |cell: &str, width: usize| {
            let len = cell.chars().count();
            if len < width {
                format!("{}{}", cell, " ".repeat(width - len))
            } else {
                cell.to_string()
            }
        };
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&self.widths)
                    .map(|(cell, &width)| format!("{}{sep}", pad(cell, width)))
                    .collect::<Vec<_>>()
                    .join("")
                    .trim_end()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_align_to_widest_cell() {
        let mut table = Table::default();
        table.push_row(vec!["a".into(), "long".into()]);
        table.push_row(vec!["second".into(), "b".into()]);
        let rendered = table.render(" ");
        assert_eq!(rendered, "a      long\nsecond b");
    }
}
