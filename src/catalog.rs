//! Catalog loader - reads the table of valid triples
//!
//! The catalog is read once at startup and never changes afterwards.
//! Required cells are trimmed and must be non-empty. Color cells go
//! through [`normalize`]; a color column absent from the header is
//! filled with the default gray.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use thiserror::Error;

use crate::color::{normalize, HexColor};
use crate::config::Columns;

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file not found.
    #[error("catalog file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read the file.
    #[error("failed to read catalog {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed delimited data.
    #[error("failed to parse catalog {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Required column not found in the header.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// Required cell missing or blank.
    #[error("empty '{column}' value on line {line} of {path}")]
    EmptyField {
        column: String,
        line: u64,
        path: PathBuf,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// One valid combination with its display colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Triple {
    pub first: String,
    pub second: String,
    pub third: String,
    pub color_first: HexColor,
    pub color_second: HexColor,
    pub color_third: HexColor,
}

/// The full table of triples, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    rows: Vec<Triple>,
}

/// Resolved header positions
struct Layout {
    first: usize,
    second: usize,
    third: usize,
    color_first: Option<usize>,
    color_second: Option<usize>,
    color_third: Option<usize>,
}

impl Catalog {
    pub fn new(rows: Vec<Triple>) -> Self {
        Self { rows }
    }

    /// Load the catalog from a delimited file
    pub fn load(path: &Path, columns: &Columns, delimiter: u8) -> Result<Self> {
        tracing::info!(path = %path.display(), "Loading catalog");

        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CatalogError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                CatalogError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let catalog = Self::from_reader(file, path, columns, delimiter)?;
        tracing::info!(path = %path.display(), rows = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Parse a catalog from any reader. `origin` only labels errors.
    pub fn from_reader<R: Read>(
        reader: R,
        origin: &Path,
        columns: &Columns,
        delimiter: u8,
    ) -> Result<Self> {
        let csv_err = |source: csv::Error| CatalogError::CsvParse {
            path: origin.to_path_buf(),
            source,
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers().map_err(csv_err)?.clone();
        let layout = Layout::resolve(&headers, columns, origin)?;

        for (name, idx) in [
            (&columns.color_first, layout.color_first),
            (&columns.color_second, layout.color_second),
            (&columns.color_third, layout.color_third),
        ] {
            if idx.is_none() {
                tracing::debug!("Column '{}' absent, filling with default color", name);
            }
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_err)?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let required = |idx: usize, column: &str| -> Result<String> {
                match record.get(idx).map(str::trim) {
                    Some(value) if !value.is_empty() => Ok(value.to_string()),
                    _ => Err(CatalogError::EmptyField {
                        column: column.to_string(),
                        line,
                        path: origin.to_path_buf(),
                    }),
                }
            };
            let color = |idx: Option<usize>| normalize(idx.and_then(|i| record.get(i)));

            rows.push(Triple {
                first: required(layout.first, columns.first.as_str())?,
                second: required(layout.second, columns.second.as_str())?,
                third: required(layout.third, columns.third.as_str())?,
                color_first: color(layout.color_first),
                color_second: color(layout.color_second),
                color_third: color(layout.color_third),
            });
        }

        tracing::debug!("Parsed {} catalog rows from {:?}", rows.len(), origin);
        Ok(Self::new(rows))
    }

    pub fn rows(&self) -> &[Triple] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Layout {
    fn resolve(headers: &StringRecord, columns: &Columns, origin: &Path) -> Result<Self> {
        let names: Vec<&str> = headers
            .iter()
            .map(|h| h.trim_matches('\u{feff}').trim())
            .collect();
        let find = |column: &str| names.iter().position(|name| *name == column);
        let require = |column: &str| {
            find(column).ok_or_else(|| CatalogError::MissingColumn {
                column: column.to_string(),
                path: origin.to_path_buf(),
            })
        };

        Ok(Self {
            first: require(columns.first.as_str())?,
            second: require(columns.second.as_str())?,
            third: require(columns.third.as_str())?,
            color_first: find(columns.color_first.as_str()),
            color_second: find(columns.color_second.as_str()),
            color_third: find(columns.color_third.as_str()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DEFAULT_COLOR;
    use std::io::Write;

    fn parse(data: &str) -> Result<Catalog> {
        Catalog::from_reader(data.as_bytes(), Path::new("test.csv"), &Columns::default(), b',')
    }

    #[test]
    fn test_trims_required_fields() {
        let catalog = parse("A,B,C\n  Lemon , Mint,Basil  \n").unwrap();
        let row = &catalog.rows()[0];
        assert_eq!(row.first, "Lemon");
        assert_eq!(row.second, "Mint");
        assert_eq!(row.third, "Basil");
    }

    #[test]
    fn test_missing_color_columns_default_to_gray() {
        let catalog = parse("A,B,C\nLemon,Mint,Basil\n").unwrap();
        let row = &catalog.rows()[0];
        assert_eq!(row.color_first.as_str(), DEFAULT_COLOR);
        assert_eq!(row.color_second.as_str(), DEFAULT_COLOR);
        assert_eq!(row.color_third.as_str(), DEFAULT_COLOR);
    }

    #[test]
    fn test_color_columns_are_normalized() {
        let catalog = parse(
            "A,B,C,Color_A,Color_B,Color_C\nLemon,Mint,Basil,FFF,#12345,\n",
        )
        .unwrap();
        let row = &catalog.rows()[0];
        assert_eq!(row.color_first.as_str(), "#FFF");
        assert_eq!(row.color_second.as_str(), DEFAULT_COLOR);
        assert_eq!(row.color_third.as_str(), DEFAULT_COLOR);
    }

    #[test]
    fn test_column_order_and_bom() {
        let catalog = parse("\u{feff}Color_B,C , B,A\n#000000,Basil,Mint,Lemon\n").unwrap();
        let row = &catalog.rows()[0];
        assert_eq!(row.first, "Lemon");
        assert_eq!(row.third, "Basil");
        assert_eq!(row.color_second.as_str(), "#000000");
    }

    #[test]
    fn test_missing_required_column() {
        let err = parse("A,B\nLemon,Mint\n").unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn { ref column, .. } if column == "C"));
    }

    #[test]
    fn test_empty_required_field() {
        let err = parse("A,B,C\nLemon,Mint,Basil\nLemon,  ,Thyme\n").unwrap_err();
        match err {
            CatalogError::EmptyField { column, line, .. } => {
                assert_eq!(column, "B");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_short_row_is_rejected() {
        let err = parse("A,B,C\nLemon,Mint\n").unwrap_err();
        assert!(matches!(err, CatalogError::EmptyField { ref column, .. } if column == "C"));
    }

    #[test]
    fn test_header_only_is_empty() {
        let catalog = parse("A,B,C\n").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_custom_columns_and_delimiter() {
        let columns = Columns {
            first: "Base".to_string(),
            second: "Pair".to_string(),
            third: "Top".to_string(),
            ..Columns::default()
        };
        let data = "Base;Pair;Top;Color_A\nLemon;Mint;Basil;#ABC\n";
        let catalog =
            Catalog::from_reader(data.as_bytes(), Path::new("x.csv"), &columns, b';').unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.rows()[0].color_first.as_str(), "#ABC");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "A,B,C").unwrap();
        writeln!(file, "Lemon,Mint,Basil").unwrap();
        writeln!(file, "Lemon,Mint,Thyme").unwrap();

        let catalog = Catalog::load(file.path(), &Columns::default(), b',').unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        let err = Catalog::load(&path, &Columns::default(), b',').unwrap_err();
        assert!(matches!(err, CatalogError::FileNotFound { .. }));
        assert!(err.to_string().starts_with("catalog file not found"));
    }
}
