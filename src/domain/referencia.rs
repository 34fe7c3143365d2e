// ==========================================
// Carga de pedidos - reference directories
// ==========================================
// Read-only lookup data. The pipeline consults these, never mutates
// them.
// ==========================================

use serde::{Deserialize, Serialize};

/// Client reference entry: only what the validation rules need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cliente {
    pub id: String,
    pub activo: bool,
}

/// Delivery zone reference entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zona {
    pub id: String,
    pub soporta_refrigeracion: bool,
}
