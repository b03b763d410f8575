use regex::Regex;

/// Parsed sample rows for one logical table.
///
/// Cells are untyped at parse time: `None` marks an explicit SQL NULL, any
/// other value is kept as the trimmed source string. Type coercion happens at
/// materialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowBlock {
    /// Logical table name from the block header, case preserved.
    pub table: String,
    /// Column names from the block's header row.
    pub columns: Vec<String>,
    /// Data rows in source order; each row has exactly `columns.len()` cells.
    pub rows: Vec<Vec<Option<String>>>,
}

impl RowBlock {
    /// Index of a header column by exact name.
    ///
    /// The rightmost occurrence wins when the header repeats a name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().rposition(|c| c == name)
    }
}

/// Parse `<name> table:` ASCII data blocks out of a sample-input text.
///
/// A block is its header line, any non-pipe filler (including `+---+`
/// borders), one pipe-delimited header row naming the columns, optional
/// borders, then data rows. The block ends at a blank line, the next block
/// header, or end of input. Data rows whose cell count does not match the
/// header are dropped. A repeated block name replaces the earlier block while
/// keeping its original position.
pub fn parse_input_tables(text: &str) -> Vec<RowBlock> {
    let header = Regex::new(r"(?i)^([A-Za-z0-9_]+)\s+table:\s*$").expect("valid block header regex");

    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let lines: Vec<&str> = text.lines().collect();
    let mut blocks: Vec<RowBlock> = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let Some(cap) = header.captures(lines[i].trim()) else {
            i += 1;
            continue;
        };
        let table = cap[1].to_string();
        i += 1;

        // Seek the pipe-delimited header row, skipping borders and filler.
        while i < lines.len() && !lines[i].trim().starts_with('|') {
            i += 1;
        }
        if i >= lines.len() {
            break;
        }
        let columns = split_cells(lines[i].trim());
        i += 1;

        while i < lines.len() && lines[i].trim().starts_with('+') {
            i += 1;
        }

        let mut rows = Vec::new();
        while i < lines.len() {
            let line = lines[i].trim();
            if line.is_empty() || header.is_match(line) {
                break;
            }
            if !line.starts_with('|') {
                i += 1;
                continue;
            }
            let cells = split_cells(line);
            if cells.len() == columns.len() {
                rows.push(cells.into_iter().map(parse_cell).collect());
            }
            i += 1;
        }

        let block = RowBlock {
            table,
            columns,
            rows,
        };
        if let Some(existing) = blocks.iter_mut().find(|b| b.table == block.table) {
            *existing = block;
        } else {
            blocks.push(block);
        }
    }
    blocks
}

fn split_cells(line: &str) -> Vec<String> {
    line.trim_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

fn parse_cell(cell: String) -> Option<String> {
    if cell.eq_ignore_ascii_case("null") {
        None
    } else {
        Some(cell)
    }
}
