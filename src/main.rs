// Command-line entry point: load one CSV of pedidos into a SQLite store
// under an idempotency token and print the processing report as JSON.
//
// Usage:
//   cargo run -- <db_path> <csv_path> <idempotency_key> [batch_size]
//
// The database is created and seeded with the demo reference data on
// first use.

use anyhow::{anyhow, Context};
use pedidos_ingest::config::ImportConfig;
use pedidos_ingest::db::{init_schema, open_sqlite_connection, seed_reference_data};
use pedidos_ingest::importer::{CargarPedidosUseCase, ImportError, PedidoLoader};
use pedidos_ingest::logging;
use pedidos_ingest::repository::{
    SqliteBatchPersister, SqliteCargaRepository, SqliteClienteRepository, SqlitePedidoRepository,
    SqliteZonaRepository,
};
use std::sync::{Arc, Mutex};
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let db_path = args.next().unwrap_or_else(|| "pedidos.db".to_string());
    let csv_path = args
        .next()
        .ok_or_else(|| anyhow!("falta la ruta del archivo CSV"))?;
    let idempotency_key = args
        .next()
        .ok_or_else(|| anyhow!("falta la clave de idempotencia"))?;
    let batch_size = args
        .next()
        .map(|s| s.parse::<usize>())
        .transpose()
        .context("batch_size inválido")?
        .unwrap_or(500);

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;
    seed_reference_data(&conn)?;
    let conn = Arc::new(Mutex::new(conn));

    let config = ImportConfig {
        batch_size,
        ..Default::default()
    };
    let loader = PedidoLoader::new(
        SqliteClienteRepository::new(conn.clone()),
        SqliteZonaRepository::new(conn.clone()),
        SqlitePedidoRepository::new(conn.clone()),
        SqliteCargaRepository::new(conn.clone()),
        SqliteBatchPersister::new(conn),
        config,
    );

    let contenido = std::fs::read(&csv_path).map_err(ImportError::from)?;
    match loader.cargar_pedidos(&contenido, &idempotency_key).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(ImportError::CargaDuplicada) => {
            eprintln!("Carga duplicada: archivo ya procesado con esta clave de idempotencia");
            std::process::exit(1);
        }
        Err(e) => {
            error!(error = %e, "carga fallida");
            Err(e.into())
        }
    }
}
