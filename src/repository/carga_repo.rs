// ==========================================
// Carga de pedidos - idempotency ledger port
// ==========================================
// Admission-control reads are keyed by the (idempotency_key,
// archivo_hash) pair; the write side lives in the batch persister so it
// shares the load's transaction.
// ==========================================

use crate::domain::carga::CargaIdempotente;
use crate::repository::error::{RepoResult, RepositoryError};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[async_trait]
pub trait CargaRepository: Send + Sync {
    /// Lookup by the exact (token, fingerprint) pair. The token alone is
    /// NOT a key: same token with a different fingerprint is a new,
    /// legitimate submission.
    async fn find_by_key_and_hash(
        &self,
        idempotency_key: &str,
        archivo_hash: &str,
    ) -> RepoResult<Option<CargaIdempotente>>;
}

pub struct SqliteCargaRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCargaRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepoResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Insert the ledger record inside the caller's transaction.
    pub fn insert_carga_tx(tx: &Transaction<'_>, carga: &CargaIdempotente) -> RepoResult<()> {
        tx.execute(
            r#"
            INSERT INTO cargas_idempotentes (
                id, idempotency_key, archivo_hash, resultado_json, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                carga.id.to_string(),
                carga.idempotency_key,
                carga.archivo_hash,
                carga.resultado_json,
                carga.created_at,
            ],
        )?;
        Ok(())
    }
}

#[async_trait]
impl CargaRepository for SqliteCargaRepository {
    async fn find_by_key_and_hash(
        &self,
        idempotency_key: &str,
        archivo_hash: &str,
    ) -> RepoResult<Option<CargaIdempotente>> {
        let conn = self.get_conn()?;
        let carga = conn
            .query_row(
                r#"
                SELECT id, idempotency_key, archivo_hash, resultado_json, created_at
                FROM cargas_idempotentes
                WHERE idempotency_key = ?1 AND archivo_hash = ?2
                "#,
                params![idempotency_key, archivo_hash],
                |row| {
                    let id: String = row.get(0)?;
                    Ok(CargaIdempotente {
                        id: Uuid::parse_str(&id).unwrap_or_else(|_| Uuid::nil()),
                        idempotency_key: row.get(1)?,
                        archivo_hash: row.get(2)?,
                        resultado_json: row.get(3)?,
                        created_at: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(carga)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn test_conn() -> Arc<Mutex<Connection>> {
        let conn = Connection::open_in_memory().unwrap();
        db::init_schema(&conn).unwrap();
        Arc::new(Mutex::new(conn))
    }

    #[tokio::test]
    async fn keyed_by_token_and_hash_pair() {
        let conn = test_conn();
        {
            let mut guard = conn.lock().unwrap();
            let tx = guard.transaction().unwrap();
            let carga = CargaIdempotente::new("key-1".to_string(), "hash-a".to_string(), None);
            SqliteCargaRepository::insert_carga_tx(&tx, &carga).unwrap();
            tx.commit().unwrap();
        }

        let repo = SqliteCargaRepository::new(conn);
        assert!(repo.find_by_key_and_hash("key-1", "hash-a").await.unwrap().is_some());
        // same token, different fingerprint: not a hit
        assert!(repo.find_by_key_and_hash("key-1", "hash-b").await.unwrap().is_none());
        assert!(repo.find_by_key_and_hash("key-2", "hash-a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn pair_uniqueness_is_enforced_by_the_store() {
        let conn = test_conn();
        let mut guard = conn.lock().unwrap();
        let tx = guard.transaction().unwrap();

        let primera = CargaIdempotente::new("key-1".to_string(), "hash-a".to_string(), None);
        SqliteCargaRepository::insert_carga_tx(&tx, &primera).unwrap();

        let repetida = CargaIdempotente::new("key-1".to_string(), "hash-a".to_string(), None);
        assert!(matches!(
            SqliteCargaRepository::insert_carga_tx(&tx, &repetida),
            Err(crate::repository::RepositoryError::UniqueConstraintViolation(_))
        ));
    }
}
