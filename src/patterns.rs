use crate::grid::GridView;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("pattern contains no cells")]
    Empty,
    #[error("unexpected character {ch:?} at line {line}, column {column}")]
    UnexpectedChar { line: usize, column: usize, ch: char },
    #[error("{rows}x{cols} pattern does not fit a {grid_size}x{grid_size} grid")]
    DoesNotFit { rows: usize, cols: usize, grid_size: usize },
    #[error("unknown pattern '{0}'")]
    Unknown(String),
}

/// Built-in start pattern. Cells are (row, col) offsets from the grid centre.
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i32, i32)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "single",
        cells: &[(0, 0)],
    },
    Pattern {
        name: "blinker",
        cells: &[(0, -1), (0, 0), (0, 1)],
    },
    Pattern {
        name: "block",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
    },
    Pattern {
        name: "glider",
        cells: &[(-1, 0), (0, 1), (1, -1), (1, 0), (1, 1)],
    },
    Pattern {
        name: "toad",
        cells: &[(0, -1), (0, 0), (0, 1), (1, -2), (1, -1), (1, 0)],
    },
    Pattern {
        name: "beacon",
        cells: &[(-1, -1), (-1, 0), (0, -1), (0, 0), (1, 1), (1, 2), (2, 1), (2, 2)],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(-1, 0), (-1, 1), (0, -1), (0, 0), (1, 0)],
    },
    Pattern {
        name: "lwss",
        cells: &[
            (-1, -1), (-1, 2),
            (0, -2),
            (1, -2), (1, 2),
            (2, -2), (2, -1), (2, 0), (2, 1),
        ],
    },
];

/// Look up a built-in pattern, ignoring case
pub fn find_pattern(name: &str) -> Result<&'static Pattern, PatternError> {
    PATTERNS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| PatternError::Unknown(name.to_string()))
}

impl Pattern {
    /// Absolute cells when the pattern is placed on the centre of a `grid_size` grid
    pub fn cells_centered(&self, grid_size: usize) -> Result<Vec<(usize, usize)>, PatternError> {
        let mid = (grid_size / 2) as i64;
        let size = grid_size as i64;

        let mut cells = Vec::with_capacity(self.cells.len());
        for &(d_row, d_col) in self.cells {
            let (row, col) = (mid + d_row as i64, mid + d_col as i64);
            if row < 0 || row >= size || col < 0 || col >= size {
                let (rows, cols) = self.bounds();
                return Err(PatternError::DoesNotFit { rows, cols, grid_size });
            }
            cells.push((row as usize, col as usize));
        }
        Ok(cells)
    }

    /// Bounding box as (rows, cols)
    pub fn bounds(&self) -> (usize, usize) {
        let span = |values: Vec<i32>| {
            let min = values.iter().min().copied().unwrap_or(0);
            let max = values.iter().max().copied().unwrap_or(0);
            (max - min + 1) as usize
        };
        (
            span(self.cells.iter().map(|c| c.0).collect()),
            span(self.cells.iter().map(|c| c.1).collect()),
        )
    }
}

/// Pattern read from plaintext. `alive` holds offsets from the top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPattern {
    pub rows: usize,
    pub cols: usize,
    pub alive: Vec<(usize, usize)>,
}

/// Parse the plaintext pattern format.
///
/// `O` (or `*`) is a live cell, `.` a dead one, lines starting with `!` are
/// comments. Short lines are padded with dead cells. Blank lines at either
/// end are dropped; blank lines in between are dead rows.
pub fn parse_plaintext(text: &str) -> Result<ParsedPattern, PatternError> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.starts_with('!'))
        .map(|(i, line)| (i + 1, line.trim_end()))
        .collect();

    let first = lines.iter().position(|(_, l)| !l.is_empty());
    let last = lines.iter().rposition(|(_, l)| !l.is_empty());
    let (Some(first), Some(last)) = (first, last) else {
        return Err(PatternError::Empty);
    };
    let body = &lines[first..=last];

    let mut alive = Vec::new();
    let mut cols = 0;
    for (row, &(line_no, line)) in body.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            match ch {
                'O' | '*' => alive.push((row, col)),
                '.' => {}
                _ => {
                    return Err(PatternError::UnexpectedChar {
                        line: line_no,
                        column: col + 1,
                        ch,
                    })
                }
            }
        }
        cols = cols.max(line.chars().count());
    }

    if alive.is_empty() {
        return Err(PatternError::Empty);
    }

    Ok(ParsedPattern {
        rows: body.len(),
        cols,
        alive,
    })
}

impl ParsedPattern {
    /// Absolute cells with the pattern's bounding box centred on the grid
    pub fn place_centered(&self, grid_size: usize) -> Result<Vec<(usize, usize)>, PatternError> {
        if self.rows > grid_size || self.cols > grid_size {
            return Err(PatternError::DoesNotFit {
                rows: self.rows,
                cols: self.cols,
                grid_size,
            });
        }
        let mid = grid_size / 2;
        let top = mid - self.rows / 2;
        let left = mid - self.cols / 2;
        Ok(self.alive.iter().map(|&(r, c)| (top + r, left + c)).collect())
    }
}

/// Render a view as plaintext rows of `O` and `.`
pub fn format_plaintext(view: &GridView) -> String {
    let n = view.size();
    let mut result = String::with_capacity(n * (n + 1));
    for row in 0..n {
        for col in 0..n {
            result.push(if view.get(row, col).is_alive() { 'O' } else { '.' });
        }
        result.push('\n');
    }
    result
}
