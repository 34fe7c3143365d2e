// ==========================================
// Carga de pedidos - order store port
// ==========================================
// Existence check by business number plus the transactional insert
// helper used by the batch persister. The insert helper takes a
// Transaction so all chunks of one load share a single boundary.
// ==========================================

use crate::domain::pedido::Pedido;
use crate::repository::error::{RepoResult, RepositoryError};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, Transaction};
use std::sync::{Arc, Mutex};

#[async_trait]
pub trait PedidoRepository: Send + Sync {
    /// True if an order with this business number is already persisted.
    async fn exists_by_numero_pedido(&self, numero_pedido: &str) -> RepoResult<bool>;
}

pub struct SqlitePedidoRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqlitePedidoRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepoResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Insert one chunk of orders inside the caller's transaction.
    pub fn insert_pedidos_tx(tx: &Transaction<'_>, pedidos: &[Pedido]) -> RepoResult<usize> {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO pedidos (
                id, numero_pedido, cliente_id, zona_id, fecha_entrega,
                estado, requiere_refrigeracion, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )?;

        let now = Utc::now();
        let mut count = 0;
        for pedido in pedidos {
            stmt.execute(params![
                pedido.id.to_string(),
                pedido.numero_pedido,
                pedido.cliente_id,
                pedido.zona_id,
                pedido.fecha_entrega.format("%Y-%m-%d").to_string(),
                pedido.estado.as_str(),
                pedido.requiere_refrigeracion as i64,
                now,
                now,
            ])?;
            count += 1;
        }
        Ok(count)
    }
}

#[async_trait]
impl PedidoRepository for SqlitePedidoRepository {
    async fn exists_by_numero_pedido(&self, numero_pedido: &str) -> RepoResult<bool> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM pedidos WHERE numero_pedido = ?1",
            [numero_pedido],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}
