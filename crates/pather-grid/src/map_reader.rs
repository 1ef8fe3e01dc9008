use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::num::ParseIntError;
use std::path::Path;

use thiserror::Error;

use crate::{Grid, GridGraph, EIGHT_CONNECTED};

/// Failure to read an octile text map.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read map")]
    Io(#[from] io::Error),

    #[error("unexpected end of file")]
    UnexpectedEof,

    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("line {line}: invalid number")]
    InvalidNumber {
        line: usize,
        #[source]
        source: ParseIntError,
    },
}

/// Largest map accepted, in cells.
pub const MAX_MAP_CELLS: usize = 1 << 26;

fn malformed(line: usize, message: impl Into<String>) -> MapError {
    MapError::Malformed {
        line,
        message: message.into(),
    }
}

fn field(line: usize, text: Option<&str>) -> Result<(&str, &str), MapError> {
    let Some(text) = text else {
        return Err(MapError::UnexpectedEof);
    };
    let mut tokens = text.split_whitespace();

    let Some(tok1) = tokens.next() else {
        return Err(malformed(line, "unexpected end of line"));
    };
    let Some(tok2) = tokens.next() else {
        return Err(malformed(line, "unexpected end of line"));
    };
    let None = tokens.next() else {
        return Err(malformed(line, "unexpected trailing text"));
    };

    Ok((tok1, tok2))
}

fn dimension(line: usize, text: Option<&str>, name: &str) -> Result<i32, MapError> {
    let (key, value) = field(line, text)?;
    if key != name {
        return Err(malformed(line, format!("expected {name}, got {key}")));
    }
    let value: i32 = value
        .parse()
        .map_err(|source| MapError::InvalidNumber { line, source })?;
    if value < 0 {
        return Err(malformed(line, format!("negative {name}")));
    }
    Ok(value)
}

/// Reads a map in the octile text format: a `type octile`, `height N`, `width M`, `map` header
/// followed by one line per row. `.`, `G` and `S` are passable; everything else is blocked.
///
/// The result is 8-connected with unit entry costs. Missing rows and columns are blocked.
pub fn read_grid_map(reader: impl BufRead) -> Result<GridGraph, MapError> {
    let mut lines = reader.lines();
    let mut next_line = move || lines.next().transpose();

    let type_line = next_line()?;
    let (type_, octile) = field(1, type_line.as_deref())?;
    if type_ != "type" {
        return Err(malformed(1, "expected first line to be type"));
    }
    if octile != "octile" {
        return Err(malformed(1, "expected type to be octile"));
    }

    let height = dimension(2, next_line()?.as_deref(), "height")?;
    let width = dimension(3, next_line()?.as_deref(), "width")?;
    match (width as usize).checked_mul(height as usize) {
        Some(cells) if cells <= MAX_MAP_CELLS => {}
        _ => {
            return Err(malformed(
                3,
                format!("map of {width}x{height} exceeds {MAX_MAP_CELLS} cells"),
            ))
        }
    }

    match next_line()?.as_deref().map(str::trim_end) {
        Some("map") => {}
        Some(_) => return Err(malformed(4, "expected map token")),
        None => return Err(MapError::UnexpectedEof),
    }

    let mut cells = Grid::new(width, height, |_, _| None);
    let mut y = 0;
    while let Some(row) = next_line()? {
        let row = row.trim_end();
        if y >= height {
            if row.is_empty() {
                continue;
            }
            return Err(malformed(5 + y as usize, "too many lines of map"));
        }
        for (x, cell) in row.chars().enumerate() {
            if x as i32 >= width {
                return Err(malformed(5 + y as usize, "too many columns of map"));
            }
            if matches!(cell, '.' | 'G' | 'S') {
                cells[(x as i32, y)] = Some(1.0);
            }
        }
        y += 1;
    }

    tracing::debug!(width, height, "read grid map");
    Ok(GridGraph::new(cells, EIGHT_CONNECTED))
}

/// Reads an octile text map from a file. See [`read_grid_map`].
pub fn read_grid_map_file(path: impl AsRef<Path>) -> Result<GridGraph, MapError> {
    read_grid_map(BufReader::new(File::open(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_octile_map() {
        let text = "type octile\nheight 3\nwidth 4\nmap\n....\n.@@G\nS.T\n";
        let graph = read_grid_map(text.as_bytes()).unwrap();
        assert_eq!((graph.width(), graph.height()), (4, 3));
        assert!(graph.is_passable(3, 1));
        assert!(!graph.is_passable(1, 1));
        assert!(graph.is_passable(0, 2));
        assert!(!graph.is_passable(2, 2));
        assert!(!graph.is_passable(3, 2));
        assert_eq!(graph.connectivity(), EIGHT_CONNECTED);
    }

    #[test]
    fn rejects_bad_headers() {
        let err = read_grid_map("type tile\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MapError::Malformed { line: 1, .. }));

        let err = read_grid_map("type octile\nheight x\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MapError::InvalidNumber { line: 2, .. }));

        let err = read_grid_map("type octile\nheight 1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MapError::UnexpectedEof));

        let err = read_grid_map("type octile\nheight 1\nwidth 1 2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MapError::Malformed { line: 3, .. }));
    }

    #[test]
    fn rejects_huge_dimensions() {
        let text = "type octile\nheight 2000000000\nwidth 2000000000\nmap\n";
        let err = read_grid_map(text.as_bytes()).unwrap_err();
        assert!(matches!(err, MapError::Malformed { line: 3, .. }));

        let text = "type octile\nheight 8193\nwidth 8192\nmap\n";
        let err = read_grid_map(text.as_bytes()).unwrap_err();
        assert!(matches!(err, MapError::Malformed { line: 3, .. }));
    }

    #[test]
    fn rejects_oversized_rows() {
        let err = read_grid_map("type octile\nheight 1\nwidth 2\nmap\n...\n".as_bytes())
            .unwrap_err();
        assert_eq!(err.to_string(), "line 5: too many columns of map");

        let err = read_grid_map("type octile\nheight 1\nwidth 2\nmap\n..\n..\n".as_bytes())
            .unwrap_err();
        assert_eq!(err.to_string(), "line 6: too many lines of map");
    }
}
