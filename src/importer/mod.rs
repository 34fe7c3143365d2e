// ==========================================
// Carga de pedidos - import pipeline
// ==========================================

pub mod duplicates;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod fingerprint;
pub mod loader;
pub mod row_parser;
pub mod validator;

pub use duplicates::InFileDuplicateDetector;
pub use error::{codigos, ImportError, ImportResult};
pub use field_mapper::{FieldMapper, MappingError, RawPedidoRecord, CANONICAL_COLUMNS};
pub use file_parser::{CsvParser, ParsedFile, RawRow};
pub use fingerprint::fingerprint;
pub use loader::{CargarPedidosUseCase, PedidoLoader};
pub use row_parser::{ParseRowError, RowParser};
pub use validator::{ContextoValidacion, PedidoValidationError, PedidoValidator};
