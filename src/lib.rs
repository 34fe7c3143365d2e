// ==========================================
// Carga de pedidos - core library
// ==========================================
// Batch CSV order ingestion: idempotent uploads, tolerant column
// mapping, ordered domain validation, all-or-nothing persistence.
// Stack: Rust + SQLite
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and value types
pub mod domain;

// Repository layer - data access
pub mod repository;

// Import layer - the ingestion pipeline
pub mod importer;

// Configuration layer
pub mod config;

// Database infrastructure (connection init / unified PRAGMAs)
pub mod db;

// Logging
pub mod logging;

// ==========================================
// Re-export core types
// ==========================================

// Domain entities
pub use domain::{
    CargaIdempotente, CargaPedidosResult, Cliente, ErrorProcesamiento, EstadoPedido, Pedido,
    PedidoCandidato, Zona,
};

// Pipeline
pub use importer::{
    codigos, CargarPedidosUseCase, CsvParser, FieldMapper, ImportError, ImportResult,
    InFileDuplicateDetector, PedidoLoader, PedidoValidator, RowParser,
};

// Configuration
pub use config::{ImportConfig, MAX_BATCH_SIZE, MIN_BATCH_SIZE};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "carga-pedidos";
