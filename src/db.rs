// ==========================================
// Carga de pedidos - SQLite connection setup
// ==========================================
// Goals:
// - unify PRAGMA behavior for every Connection::open in the crate
//   (foreign_keys must be enabled per connection)
// - unify busy_timeout to tame sporadic busy errors on concurrent loads
// - bootstrap the schema with the uniqueness constraints the pipeline
//   relies on (numero_pedido, (idempotency_key, archivo_hash))
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// Default busy_timeout in milliseconds.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Apply the unified PRAGMA set to a connection.
///
/// foreign_keys and busy_timeout are per-connection settings, so every
/// open path must go through here.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a SQLite connection with the unified configuration applied.
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Create the tables this pipeline reads and writes.
///
/// Idempotent (`IF NOT EXISTS`); safe to call on every startup.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS clientes (
            id     TEXT PRIMARY KEY,
            activo INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS zonas (
            id                    TEXT PRIMARY KEY,
            soporta_refrigeracion INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS pedidos (
            id                     TEXT PRIMARY KEY,
            numero_pedido          TEXT NOT NULL UNIQUE,
            cliente_id             TEXT NOT NULL REFERENCES clientes(id),
            zona_id                TEXT NOT NULL REFERENCES zonas(id),
            fecha_entrega          TEXT NOT NULL,
            estado                 TEXT NOT NULL
                CHECK (estado IN ('PENDIENTE', 'CONFIRMADO', 'ENTREGADO')),
            requiere_refrigeracion INTEGER NOT NULL DEFAULT 0,
            created_at             TEXT NOT NULL,
            updated_at             TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS cargas_idempotentes (
            id              TEXT PRIMARY KEY,
            idempotency_key TEXT NOT NULL,
            archivo_hash    TEXT NOT NULL,
            resultado_json  TEXT,
            created_at      TEXT NOT NULL,
            UNIQUE (idempotency_key, archivo_hash)
        );
        "#,
    )
}

/// Seed the reference directories with the demo data set when empty.
///
/// Mirrors the fixture clients and zones the service has always shipped
/// with; a no-op once either table has rows.
pub fn seed_reference_data(conn: &Connection) -> rusqlite::Result<()> {
    let cliente_count: i64 = conn.query_row("SELECT COUNT(*) FROM clientes", [], |r| r.get(0))?;
    if cliente_count == 0 {
        for id in ["CLI-123", "CLI-456", "CLI-789", "CLI-999", "CLI-001"] {
            conn.execute(
                "INSERT INTO clientes (id, activo) VALUES (?1, 1)",
                [id],
            )?;
        }
    }

    let zona_count: i64 = conn.query_row("SELECT COUNT(*) FROM zonas", [], |r| r.get(0))?;
    if zona_count == 0 {
        for (id, refrigerada) in [
            ("ZONA1", 1),
            ("ZONA2", 0),
            ("ZONA3", 1),
            ("ZONA5", 0),
            ("ZONA9", 1),
        ] {
            conn.execute(
                "INSERT INTO zonas (id, soporta_refrigeracion) VALUES (?1, ?2)",
                rusqlite::params![id, refrigerada],
            )?;
        }
    }

    Ok(())
}
