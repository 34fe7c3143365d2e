// ==========================================
// Carga de pedidos - tolerant field mapper
// ==========================================
// Resolves each expected column against the headers actually present:
//   (a) exact header-name match
//   (b) match after stripping a leading BOM + whitespace, case-insensitive
//   (c) positional fallback in the canonical column order
// A required field that resolves nowhere fails the row with a mapping
// error naming the field and the headers seen.
// ==========================================

use crate::importer::file_parser::RawRow;

/// Canonical column order; position is the index fallback.
pub const CANONICAL_COLUMNS: [&str; 6] = [
    "numeroPedido",
    "clienteId",
    "fechaEntrega",
    "estado",
    "zonaEntrega",
    "requiereRefrigeracion",
];

/// Row values resolved by field name, still untyped.
#[derive(Debug, Clone)]
pub struct RawPedidoRecord {
    pub numero_pedido: String,
    pub cliente_id: String,
    pub fecha_entrega: String,
    pub estado: String,
    pub zona_entrega: String,
    pub requiere_refrigeracion: String,
    pub line_number: usize,
}

/// Mapping failure: which field could not be resolved, against which
/// headers.
#[derive(Debug, Clone)]
pub struct MappingError {
    pub field: String,
    pub headers_seen: Vec<String>,
}

impl std::fmt::Display for MappingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "No se pudo mapear el campo '{}', cabeceras encontradas: {:?}",
            self.field, self.headers_seen
        )
    }
}

pub struct FieldMapper {
    headers: Vec<String>,
    // normalized header -> column index, first occurrence wins
    normalized: Vec<(String, usize)>,
}

fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{FEFF}')
        .trim()
        .to_lowercase()
}

impl FieldMapper {
    /// Build a mapper for one file's header row.
    pub fn new(headers: &[String]) -> Self {
        let normalized = headers
            .iter()
            .enumerate()
            .map(|(idx, h)| (normalize_header(h), idx))
            .collect();
        Self {
            headers: headers.to_vec(),
            normalized,
        }
    }

    /// Resolve one expected field for a row, or None if neither header
    /// matching nor the positional fallback reaches a cell.
    fn resolve(&self, row: &RawRow, field: &str) -> Option<String> {
        // (a) exact header match
        if let Some(idx) = self.headers.iter().position(|h| h == field) {
            if let Some(value) = row.values.get(idx) {
                return Some(value.clone());
            }
        }

        // (b) BOM-stripped, trimmed, case-insensitive match
        let wanted = normalize_header(field);
        if let Some((_, idx)) = self.normalized.iter().find(|(h, _)| *h == wanted) {
            if let Some(value) = row.values.get(*idx) {
                return Some(value.clone());
            }
        }

        // (c) positional fallback
        let position = CANONICAL_COLUMNS.iter().position(|c| *c == field)?;
        row.values.get(position).cloned()
    }

    fn require(&self, row: &RawRow, field: &str) -> Result<String, MappingError> {
        self.resolve(row, field).ok_or_else(|| MappingError {
            field: field.to_string(),
            headers_seen: self.headers.clone(),
        })
    }

    /// Map one data row to the untyped record.
    pub fn map_row(&self, row: &RawRow) -> Result<RawPedidoRecord, MappingError> {
        Ok(RawPedidoRecord {
            numero_pedido: self.require(row, "numeroPedido")?,
            cliente_id: self.require(row, "clienteId")?,
            fecha_entrega: self.require(row, "fechaEntrega")?,
            estado: self.require(row, "estado")?,
            zona_entrega: self.require(row, "zonaEntrega")?,
            requiere_refrigeracion: self.require(row, "requiereRefrigeracion")?,
            line_number: row.line_number,
        })
    }
}
