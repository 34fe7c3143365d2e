// ==========================================
// Carga de pedidos - CSV file parser
// ==========================================
// Turns the raw upload bytes into the header row plus positional data
// rows. Header resolution (BOM, case, positional fallback) is the field
// mapper's job; this stage only deals with CSV structure.
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;

/// One data row: raw cell values in file order plus the physical line
/// number (header = line 1, first data row = line 2).
#[derive(Debug, Clone)]
pub struct RawRow {
    pub values: Vec<String>,
    pub line_number: usize,
}

/// Parsed file: headers as they appeared, and every non-blank data row.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

pub struct CsvParser;

impl CsvParser {
    /// Parse CSV bytes. The first record is always the header.
    ///
    /// Rows are kept in file order; fully blank rows are skipped but
    /// still advance the physical line number.
    pub fn parse(&self, content: &[u8]) -> ImportResult<ParsedFile> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // tolerate ragged row lengths
            .from_reader(content);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|_| ImportError::ArchivoVacio)?
            .iter()
            .map(|h| h.to_string())
            .collect();

        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(ImportError::ArchivoVacio);
        }

        let mut rows = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            let values: Vec<String> = record.iter().map(|v| v.trim().to_string()).collect();

            if values.iter().all(|v| v.is_empty()) {
                continue;
            }

            // header occupies line 1
            rows.push(RawRow {
                values,
                line_number: idx + 2,
            });
        }

        Ok(ParsedFile { headers, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headers_and_rows_with_line_numbers() {
        let content = b"numeroPedido,clienteId\nPED001,CLI-123\nPED002,CLI-456\n";
        let parsed = CsvParser.parse(content).unwrap();

        assert_eq!(parsed.headers, vec!["numeroPedido", "clienteId"]);
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0].line_number, 2);
        assert_eq!(parsed.rows[1].line_number, 3);
        assert_eq!(parsed.rows[0].values, vec!["PED001", "CLI-123"]);
    }

    #[test]
    fn skips_fully_blank_rows() {
        let content = b"numeroPedido,clienteId\nPED001,CLI-123\n,\nPED002,CLI-456\n";
        let parsed = CsvParser.parse(content).unwrap();

        assert_eq!(parsed.rows.len(), 2);
        // the blank physical line still counts
        assert_eq!(parsed.rows[1].line_number, 4);
    }

    #[test]
    fn trims_cell_values() {
        let content = b"numeroPedido,clienteId\n  PED001 , CLI-123 \n";
        let parsed = CsvParser.parse(content).unwrap();
        assert_eq!(parsed.rows[0].values, vec!["PED001", "CLI-123"]);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            CsvParser.parse(b""),
            Err(ImportError::ArchivoVacio)
        ));
    }

    #[test]
    fn header_only_file_yields_zero_rows() {
        let parsed = CsvParser
            .parse(b"numeroPedido,clienteId,fechaEntrega,estado,zonaEntrega,requiereRefrigeracion\n")
            .unwrap();
        assert!(parsed.rows.is_empty());
    }
}
