// ==========================================
// Carga de pedidos - data access layer
// ==========================================
// Ports (traits) plus their SQLite adapters. Red line: repositories do
// CRUD only, no business rules.
// ==========================================

pub mod carga_repo;
pub mod error;
pub mod pedido_repo;
pub mod persister;
pub mod referencia_repo;

pub use carga_repo::{CargaRepository, SqliteCargaRepository};
pub use error::{RepoResult, RepositoryError};
pub use pedido_repo::{PedidoRepository, SqlitePedidoRepository};
pub use persister::{BatchPersister, SqliteBatchPersister};
pub use referencia_repo::{
    ClienteRepository, SqliteClienteRepository, SqliteZonaRepository, ZonaRepository,
};
