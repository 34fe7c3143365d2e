// ==========================================
// Carga de pedidos - typed row parser
// ==========================================
// Converts the mapped string fields into typed values. Strict on date
// and estado; permissive on the refrigeration flag unless strict mode
// is configured. Failures are row-level and carry the offending text.
// ==========================================

use crate::domain::pedido::{EstadoPedido, PedidoCandidato};
use crate::importer::field_mapper::RawPedidoRecord;
use chrono::NaiveDate;

/// Typed-conversion failure for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRowError {
    pub motivo: String,
}

impl std::fmt::Display for ParseRowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.motivo)
    }
}

pub struct RowParser {
    /// Strict mode: unrecognized refrigeration text errors instead of
    /// coercing to false.
    strict_refrigeracion: bool,
}

impl RowParser {
    pub fn new(strict_refrigeracion: bool) -> Self {
        Self { strict_refrigeracion }
    }

    /// Parse one mapped record into a candidate order.
    pub fn parse(&self, record: RawPedidoRecord) -> Result<PedidoCandidato, ParseRowError> {
        let fecha_entrega = self.parse_fecha(&record.fecha_entrega)?;
        let estado = self.parse_estado(&record.estado)?;
        let requiere_refrigeracion = self.parse_refrigeracion(&record.requiere_refrigeracion)?;

        Ok(PedidoCandidato {
            numero_pedido: record.numero_pedido.trim().to_string(),
            cliente_id: record.cliente_id.trim().to_string(),
            zona_id: record.zona_entrega.trim().to_string(),
            fecha_entrega: Some(fecha_entrega),
            estado: Some(estado),
            requiere_refrigeracion,
        })
    }

    /// ISO 8601 calendar date, nothing else. chrono's `%Y-%m-%d` would
    /// also accept non-padded input like `2030-1-1`, so the exact
    /// `NNNN-NN-NN` shape is enforced first.
    fn parse_fecha(&self, raw: &str) -> Result<NaiveDate, ParseRowError> {
        let valor = raw.trim();
        let bien_formada = valor.len() == 10
            && valor.bytes().enumerate().all(|(i, b)| match i {
                4 | 7 => b == b'-',
                _ => b.is_ascii_digit(),
            });
        if !bien_formada {
            return Err(ParseRowError {
                motivo: format!("Formato de fecha inválido: {}", raw),
            });
        }
        NaiveDate::parse_from_str(valor, "%Y-%m-%d").map_err(|_| ParseRowError {
            motivo: format!("Formato de fecha inválido: {}", raw),
        })
    }

    fn parse_estado(&self, raw: &str) -> Result<EstadoPedido, ParseRowError> {
        EstadoPedido::parse(raw).ok_or_else(|| ParseRowError {
            motivo: format!("Estado inválido: {}", raw),
        })
    }

    /// Permissive text-to-boolean coercion. Blank counts as false.
    fn parse_refrigeracion(&self, raw: &str) -> Result<bool, ParseRowError> {
        match raw.trim().to_lowercase().as_str() {
            "true" | "1" | "si" | "sí" | "yes" | "y" => Ok(true),
            "false" | "0" | "no" | "n" | "" => Ok(false),
            other if self.strict_refrigeracion => Err(ParseRowError {
                motivo: format!("Valor de refrigeración no reconocido: {}", other),
            }),
            // historic behavior: typos silently mean "no refrigeration"
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fecha: &str, estado: &str, refrigeracion: &str) -> RawPedidoRecord {
        RawPedidoRecord {
            numero_pedido: "PED001".to_string(),
            cliente_id: "CLI-123".to_string(),
            fecha_entrega: fecha.to_string(),
            estado: estado.to_string(),
            zona_entrega: "ZONA1".to_string(),
            requiere_refrigeracion: refrigeracion.to_string(),
            line_number: 2,
        }
    }

    #[test]
    fn parses_a_clean_row() {
        let parser = RowParser::new(false);
        let candidato = parser.parse(record("2030-05-20", "pendiente", "true")).unwrap();

        assert_eq!(candidato.numero_pedido, "PED001");
        assert_eq!(
            candidato.fecha_entrega,
            Some(NaiveDate::from_ymd_opt(2030, 5, 20).unwrap())
        );
        assert_eq!(candidato.estado, Some(EstadoPedido::Pendiente));
        assert!(candidato.requiere_refrigeracion);
    }

    #[test]
    fn rejects_non_iso_dates_with_raw_text() {
        let parser = RowParser::new(false);

        let err = parser.parse(record("2024-13-45", "PENDIENTE", "false")).unwrap_err();
        assert!(err.motivo.contains("Formato de fecha inválido"));
        assert!(err.motivo.contains("2024-13-45"));

        assert!(parser.parse(record("20/01/2030", "PENDIENTE", "false")).is_err());
        assert!(parser.parse(record("20300120", "PENDIENTE", "false")).is_err());
    }

    #[test]
    fn rejects_non_zero_padded_dates() {
        // full NNNN-NN-NN shape required; bare %Y-%m-%d parsing would
        // let these through
        let parser = RowParser::new(false);
        assert!(parser.parse(record("2030-1-1", "PENDIENTE", "false")).is_err());
        assert!(parser.parse(record("2030-01-1", "PENDIENTE", "false")).is_err());
        assert!(parser.parse(record("30-01-01", "PENDIENTE", "false")).is_err());
        assert!(parser.parse(record("2030-01-01", "PENDIENTE", "false")).is_ok());
    }

    #[test]
    fn rejects_unknown_estado_naming_the_text() {
        let parser = RowParser::new(false);
        let err = parser.parse(record("2030-01-01", "CANCELADO", "false")).unwrap_err();
        assert!(err.motivo.contains("Estado inválido"));
        assert!(err.motivo.contains("CANCELADO"));

        assert!(parser.parse(record("2030-01-01", "", "false")).is_err());
    }

    #[test]
    fn refrigeracion_accepts_permissive_truthy_forms() {
        let parser = RowParser::new(false);
        for raw in ["true", "TRUE", "1", "si", "Sí", "yes", "Y"] {
            let candidato = parser.parse(record("2030-01-01", "PENDIENTE", raw)).unwrap();
            assert!(candidato.requiere_refrigeracion, "raw = {raw}");
        }
        for raw in ["false", "0", "no", "N", ""] {
            let candidato = parser.parse(record("2030-01-01", "PENDIENTE", raw)).unwrap();
            assert!(!candidato.requiere_refrigeracion, "raw = {raw}");
        }
    }

    #[test]
    fn unrecognized_refrigeracion_defaults_to_false_in_lenient_mode() {
        let parser = RowParser::new(false);
        let candidato = parser.parse(record("2030-01-01", "PENDIENTE", "talvez")).unwrap();
        assert!(!candidato.requiere_refrigeracion);
    }

    #[test]
    fn unrecognized_refrigeracion_errors_in_strict_mode() {
        let parser = RowParser::new(true);
        let err = parser.parse(record("2030-01-01", "PENDIENTE", "talvez")).unwrap_err();
        assert!(err.motivo.contains("refrigeración"));
    }
}
