// ==========================================
// Carga de pedidos - load record & processing result
// ==========================================
// CargaIdempotente is the idempotency-ledger row: one per successful
// file commit, keyed by (idempotency_key, archivo_hash).
// CargaPedidosResult is the transient per-request report returned to
// the caller; wire names keep the original camelCase contract.
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// CargaIdempotente
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CargaIdempotente {
    pub id: Uuid,
    pub idempotency_key: String,
    /// SHA-256 of the raw upload bytes, lowercase hex.
    pub archivo_hash: String,
    /// Serialized CargaPedidosResult of the committed load.
    pub resultado_json: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CargaIdempotente {
    pub fn new(idempotency_key: String, archivo_hash: String, resultado_json: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            idempotency_key,
            archivo_hash,
            resultado_json,
            created_at: Utc::now(),
        }
    }
}

// ==========================================
// ErrorProcesamiento
// ==========================================
/// One row-level failure: physical line number (header = line 1),
/// human-readable reason, stable error code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorProcesamiento {
    pub numero_linea: usize,
    pub motivo: String,
    pub error_code: String,
}

impl ErrorProcesamiento {
    pub fn new(numero_linea: usize, motivo: impl Into<String>, error_code: impl Into<String>) -> Self {
        Self {
            numero_linea,
            motivo: motivo.into(),
            error_code: error_code.into(),
        }
    }
}

// ==========================================
// CargaPedidosResult
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CargaPedidosResult {
    pub total_procesados: usize,
    pub guardados: usize,
    pub con_error: usize,
    pub errores: Vec<ErrorProcesamiento>,
}

impl CargaPedidosResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row error; con_error tracks the list length.
    pub fn agregar_error(&mut self, error: ErrorProcesamiento) {
        self.errores.push(error);
        self.con_error = self.errores.len();
    }

    pub fn tiene_errores(&self) -> bool {
        !self.errores.is_empty()
    }
}
