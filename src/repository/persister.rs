// ==========================================
// Carga de pedidos - batch persister
// ==========================================
// The transaction boundary of a load: every chunk insert plus the
// idempotency-ledger write commits or rolls back as one unit. SQLite
// has no ambient transaction manager, so this adapter owns the
// rusqlite transaction explicitly.
// ==========================================

use crate::domain::carga::CargaIdempotente;
use crate::domain::pedido::Pedido;
use crate::repository::carga_repo::SqliteCargaRepository;
use crate::repository::error::{RepoResult, RepositoryError};
use crate::repository::pedido_repo::SqlitePedidoRepository;
use async_trait::async_trait;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tracing::debug;

#[async_trait]
pub trait BatchPersister: Send + Sync {
    /// Persist the validated orders in consecutive chunks of
    /// `chunk_size`, then the ledger record, atomically. Returns the
    /// number of orders written.
    async fn persist(
        &self,
        pedidos: &[Pedido],
        chunk_size: usize,
        carga: &CargaIdempotente,
    ) -> RepoResult<usize>;
}

pub struct SqliteBatchPersister {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteBatchPersister {
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
impl BatchPersister for SqliteBatchPersister {
    async fn persist(
        &self,
        pedidos: &[Pedido],
        chunk_size: usize,
        carga: &CargaIdempotente,
    ) -> RepoResult<usize> {
        let chunk_size = chunk_size.max(1);
        let mut guard = self.get_conn()?;
        let tx = guard
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let mut total = 0;
        for (idx, chunk) in pedidos.chunks(chunk_size).enumerate() {
            total += SqlitePedidoRepository::insert_pedidos_tx(&tx, chunk)?;
            debug!(chunk = idx, rows = chunk.len(), "chunk insertado");
        }

        SqliteCargaRepository::insert_carga_tx(&tx, carga)?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::domain::pedido::EstadoPedido;
    use chrono::NaiveDate;

    fn pedido(numero: &str) -> Pedido {
        Pedido::new(
            numero.to_string(),
            "CLI-123".to_string(),
            "ZONA1".to_string(),
            NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            EstadoPedido::Pendiente,
            false,
        )
    }

    fn test_conn() -> Arc<Mutex<Connection>> {
        let conn = Connection::open_in_memory().unwrap();
        db::init_schema(&conn).unwrap();
        db::seed_reference_data(&conn).unwrap();
        Arc::new(Mutex::new(conn))
    }

    fn count(conn: &Arc<Mutex<Connection>>, table: &str) -> i64 {
        let guard = conn.lock().unwrap();
        guard
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
            .unwrap()
    }

    #[tokio::test]
    async fn persists_orders_and_ledger_record_together() {
        let conn = test_conn();
        let persister = SqliteBatchPersister::new(conn.clone());
        let carga = CargaIdempotente::new("key-1".to_string(), "hash-a".to_string(), None);

        let saved = persister
            .persist(&[pedido("PED001"), pedido("PED002"), pedido("PED003")], 500, &carga)
            .await
            .unwrap();

        assert_eq!(saved, 3);
        assert_eq!(count(&conn, "pedidos"), 3);
        assert_eq!(count(&conn, "cargas_idempotentes"), 1);
    }

    #[tokio::test]
    async fn ledger_conflict_rolls_back_the_orders_too() {
        let conn = test_conn();
        let persister = SqliteBatchPersister::new(conn.clone());

        let carga = CargaIdempotente::new("key-1".to_string(), "hash-a".to_string(), None);
        persister.persist(&[pedido("PED001")], 500, &carga).await.unwrap();

        // same (key, hash) pair again: the whole transaction must fail,
        // leaving the new order unwritten
        let repetida = CargaIdempotente::new("key-1".to_string(), "hash-a".to_string(), None);
        let result = persister.persist(&[pedido("PED002")], 500, &repetida).await;

        assert!(matches!(
            result,
            Err(RepositoryError::UniqueConstraintViolation(_))
        ));
        assert_eq!(count(&conn, "pedidos"), 1);
        assert_eq!(count(&conn, "cargas_idempotentes"), 1);
    }

    #[tokio::test]
    async fn empty_batch_still_writes_the_ledger_record() {
        let conn = test_conn();
        let persister = SqliteBatchPersister::new(conn.clone());
        let carga = CargaIdempotente::new("key-1".to_string(), "hash-a".to_string(), None);

        let saved = persister.persist(&[], 500, &carga).await.unwrap();
        assert_eq!(saved, 0);
        assert_eq!(count(&conn, "cargas_idempotentes"), 1);
    }

    #[tokio::test]
    async fn poisoned_lock_fails_the_persist_instead_of_panicking() {
        let conn = test_conn();

        let poisoner = conn.clone();
        std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison");
        })
        .join()
        .unwrap_err();

        let persister = SqliteBatchPersister::new(conn);
        let carga = CargaIdempotente::new("key-1".to_string(), "hash-a".to_string(), None);
        let result = persister.persist(&[pedido("PED001")], 500, &carga).await;

        assert!(matches!(result, Err(RepositoryError::LockError(_))));
    }
}
