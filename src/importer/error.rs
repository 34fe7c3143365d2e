// ==========================================
// Carga de pedidos - import error types
// ==========================================
// thiserror enum for everything that can abort a load request. Row
// errors never land here; they are collected in CargaPedidosResult and
// the scan always completes.
// ==========================================

use crate::repository::RepositoryError;
use thiserror::Error;

/// Fatal errors of the ingestion pipeline.
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== Admission control =====
    /// Same (idempotency_key, archivo_hash) pair already committed.
    /// Conflict-class failure: nothing was parsed or persisted.
    #[error("Carga duplicada: el archivo ya fue procesado con esta clave de idempotencia")]
    CargaDuplicada,

    /// The store rejected a business number at commit time (lost race
    /// with a concurrent load). Same meaning as the pre-checked
    /// DUPLICADO failure.
    #[error("Numero de pedido ya existe en la base de datos: {0}")]
    PedidoDuplicado(String),

    // ===== Input =====
    #[error("Archivo sin cabecera o vacío")]
    ArchivoVacio,

    #[error("Error de lectura del archivo: {0}")]
    FileReadError(String),

    #[error("Error al parsear CSV: {0}")]
    CsvParseError(#[from] csv::Error),

    // ===== Infrastructure =====
    #[error("Error de almacenamiento: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

/// Result alias for the import layer.
pub type ImportResult<T> = Result<T, ImportError>;

// ==========================================
// Row-level error codes
// ==========================================
// Stable codes carried by ErrorProcesamiento entries. Kept as plain
// constants: they are part of the wire contract, not of the Rust type
// system.
pub mod codigos {
    pub const PEDIDO_NULO: &str = "PEDIDO_NULO";
    pub const NUMERO_PEDIDO_INVALIDO: &str = "NUMERO_PEDIDO_INVALIDO";
    pub const ESTADO_INVALIDO: &str = "ESTADO_INVALIDO";
    pub const FECHA_INVALIDA: &str = "FECHA_INVALIDA";
    pub const CLIENTE_NO_EXISTE: &str = "CLIENTE_NO_EXISTE";
    pub const CLIENTE_INACTIVO: &str = "CLIENTE_INACTIVO";
    pub const ZONA_NO_EXISTE: &str = "ZONA_NO_EXISTE";
    pub const ZONA_NO_PERMITE_REFRIGERACION: &str = "ZONA_NO_PERMITE_REFRIGERACION";
    pub const DUPLICADO_EN_ARCHIVO: &str = "DUPLICADO_EN_ARCHIVO";
    pub const DUPLICADO: &str = "DUPLICADO";
    /// Mapping and type-conversion failures (historic catch-all code).
    pub const ERROR_DESCONOCIDO: &str = "ERROR_DESCONOCIDO";
}
