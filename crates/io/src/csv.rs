// CSV/TSV import of the legacy exports

use std::io::Read;
use std::path::Path;

use carex_metrics::{Cell, Table};

use crate::error::IoError;

/// Read a delimited file into a table named `name`. The delimiter is
/// sniffed; the first record is the header row.
pub fn read_table(path: &Path, name: &str) -> Result<Table, IoError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    log::debug!(
        "{}: reading CSV with delimiter {:?}",
        path.display(),
        delimiter as char
    );
    table_from_str(&content, delimiter, name).map_err(|message| IoError::Csv {
        path: path.to_path_buf(),
        message,
    })
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (semicolon, tab, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
pub fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b';', b'\t', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).take(10).collect();

    if sample_lines.is_empty() {
        return b';';
    }

    let mut best = b';';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                ::csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // The header line must split
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // Lines agreeing with the header, weighted by field count
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Read file and convert to UTF-8 if needed (legacy exports are Latin-1 / Windows-1252).
pub fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    let mut file = std::fs::File::open(path).map_err(|e| IoError::open(path, e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| IoError::open(path, e))?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(s)),
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            log::info!("{}: not UTF-8, decoded as Windows-1252", path.display());
            Ok(decoded.into_owned())
        }
    }
}

/// Parse delimited text. Every field becomes a text cell; blank fields are
/// empty cells. Blank lines are skipped.
pub fn table_from_str(content: &str, delimiter: u8, name: &str) -> Result<Table, String> {
    let mut reader = ::csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records();
    let headers = match records.next() {
        Some(first) => first
            .map_err(|e| e.to_string())?
            .iter()
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    };

    let mut table = Table::new(name, headers);
    for result in records {
        let record = result.map_err(|e| e.to_string())?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        table.push_row(
            record
                .iter()
                .map(|field| {
                    if field.trim().is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_sniff_semicolon_delimiter() {
        let content = "Vendedor;Mes;Valor Total USD\nAna;6;1.234,56\nBeto;6;500\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_sniff_comma_delimiter() {
        let content = "Vendedor,Mes,Valor Total USD\nAna,6,1234.56\nBeto,6,500\n";
        assert_eq!(sniff_delimiter(content), b',');
    }

    #[test]
    fn test_sniff_tab_delimiter() {
        let content = "Vendedor\tMes\tValor\nAna\t6\t10\n";
        assert_eq!(sniff_delimiter(content), b'\t');
    }

    #[test]
    fn test_sniff_semicolon_with_decimal_commas() {
        // Locale decimals put commas inside unquoted values
        let content = "Vendedor;Valor\nAna;1.234,56\nBeto;12,5\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_sniff_empty_defaults_to_semicolon() {
        assert_eq!(sniff_delimiter(""), b';');
    }

    #[test]
    fn test_table_from_str() {
        let table = table_from_str(" Vendedor ;Valor\nAna;1.234,56\n;\nBeto;\n", b';', "Budget").unwrap();
        assert_eq!(table.name, "Budget");
        assert_eq!(table.headers(), &["Vendedor".to_string(), "Valor".to_string()]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, 1), &Cell::Text("1.234,56".into()));
        assert_eq!(table.cell(1, 1), &Cell::Empty);
    }

    #[test]
    fn test_windows_1252_fallback() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bd.csv");
        // "Año;País" in Windows-1252
        fs::write(&path, b"A\xf1o;Pa\xeds\n2024;Per\xfa\n").unwrap();

        let table = read_table(&path, "BD").unwrap();
        assert_eq!(table.headers(), &["Año".to_string(), "País".to_string()]);
        assert_eq!(table.cell(0, 1), &Cell::Text("Perú".into()));
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bd.csv");
        fs::write(&path, "\u{feff}Año;Mes\n2024;6\n").unwrap();

        let table = read_table(&path, "BD").unwrap();
        assert_eq!(table.column("Año"), Some(0));
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let dir = tempdir().unwrap();
        let err = read_table(&dir.path().join("nope.csv"), "BD").unwrap_err();
        assert!(matches!(err, IoError::Open { .. }));
    }
}
