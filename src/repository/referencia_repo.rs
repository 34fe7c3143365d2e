// ==========================================
// Carga de pedidos - reference directory ports
// ==========================================
// Client and zone lookup. Read-only: the pipeline never writes these
// tables. Repository red line: data access only, no business rules.
// ==========================================

use crate::domain::referencia::{Cliente, Zona};
use crate::repository::error::{RepoResult, RepositoryError};
use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// Ports
// ==========================================

#[async_trait]
pub trait ClienteRepository: Send + Sync {
    /// Lookup by id; `None` when the client does not exist.
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Cliente>>;
}

#[async_trait]
pub trait ZonaRepository: Send + Sync {
    /// Lookup by id; `None` when the zone does not exist.
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Zona>>;
}

// ==========================================
// SQLite adapters
// ==========================================

pub struct SqliteClienteRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteClienteRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepoResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

#[async_trait]
impl ClienteRepository for SqliteClienteRepository {
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Cliente>> {
        let conn = self.get_conn()?;
        let cliente = conn
            .query_row(
                "SELECT id, activo FROM clientes WHERE id = ?1",
                [id],
                |row| {
                    Ok(Cliente {
                        id: row.get(0)?,
                        activo: row.get::<_, i64>(1)? != 0,
                    })
                },
            )
            .optional()?;
        Ok(cliente)
    }
}

pub struct SqliteZonaRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteZonaRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepoResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

#[async_trait]
impl ZonaRepository for SqliteZonaRepository {
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Zona>> {
        let conn = self.get_conn()?;
        let zona = conn
            .query_row(
                "SELECT id, soporta_refrigeracion FROM zonas WHERE id = ?1",
                [id],
                |row| {
                    Ok(Zona {
                        id: row.get(0)?,
                        soporta_refrigeracion: row.get::<_, i64>(1)? != 0,
                    })
                },
            )
            .optional()?;
        Ok(zona)
    }
}
