// ==========================================
// Carga de pedidos - load orchestration
// ==========================================
// Pipeline per upload, strictly in file order:
//   fingerprint -> idempotency guard (short-circuit)
//   per row: map -> parse -> validate -> in-file dup -> storage dup
//   aggregate -> all-or-nothing persist -> ledger write
// Row errors never abort the scan; the caller gets the complete error
// report in one round trip.
// ==========================================

use crate::config::{business_today, ImportConfig};
use crate::domain::carga::{CargaIdempotente, CargaPedidosResult, ErrorProcesamiento};
use crate::importer::duplicates::InFileDuplicateDetector;
use crate::importer::error::{codigos, ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::CsvParser;
use crate::importer::fingerprint::fingerprint;
use crate::importer::row_parser::RowParser;
use crate::importer::validator::{ContextoValidacion, PedidoValidator};
use crate::repository::{
    BatchPersister, CargaRepository, ClienteRepository, PedidoRepository, RepositoryError,
    ZonaRepository,
};
use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

// ==========================================
// Use-case port
// ==========================================
#[async_trait]
pub trait CargarPedidosUseCase: Send + Sync {
    /// Process one uploaded file under a caller-supplied idempotency
    /// token. Returns the processing report, or a fatal error
    /// (duplicate load / infrastructure).
    async fn cargar_pedidos(
        &self,
        contenido: &[u8],
        idempotency_key: &str,
    ) -> ImportResult<CargaPedidosResult>;
}

// ==========================================
// PedidoLoader
// ==========================================
pub struct PedidoLoader<C, Z, P, L, B>
where
    C: ClienteRepository,
    Z: ZonaRepository,
    P: PedidoRepository,
    L: CargaRepository,
    B: BatchPersister,
{
    clientes: C,
    zonas: Z,
    pedidos: P,
    cargas: L,
    persister: B,
    config: ImportConfig,
}

impl<C, Z, P, L, B> PedidoLoader<C, Z, P, L, B>
where
    C: ClienteRepository,
    Z: ZonaRepository,
    P: PedidoRepository,
    L: CargaRepository,
    B: BatchPersister,
{
    pub fn new(clientes: C, zonas: Z, pedidos: P, cargas: L, persister: B, config: ImportConfig) -> Self {
        Self {
            clientes,
            zonas,
            pedidos,
            cargas,
            persister,
            config,
        }
    }
}

#[async_trait]
impl<C, Z, P, L, B> CargarPedidosUseCase for PedidoLoader<C, Z, P, L, B>
where
    C: ClienteRepository,
    Z: ZonaRepository,
    P: PedidoRepository,
    L: CargaRepository,
    B: BatchPersister,
{
    #[instrument(skip(self, contenido), fields(bytes = contenido.len()))]
    async fn cargar_pedidos(
        &self,
        contenido: &[u8],
        idempotency_key: &str,
    ) -> ImportResult<CargaPedidosResult> {
        // === step 1: fingerprint + idempotency guard ===
        let archivo_hash = fingerprint(contenido);
        debug!(hash = %archivo_hash, "huella calculada");

        if self
            .cargas
            .find_by_key_and_hash(idempotency_key, &archivo_hash)
            .await?
            .is_some()
        {
            warn!(key = %idempotency_key, "carga duplicada rechazada antes de parsear");
            return Err(ImportError::CargaDuplicada);
        }

        // === step 2: parse file structure ===
        let parsed = CsvParser.parse(contenido)?;
        info!(filas = parsed.rows.len(), "archivo parseado");

        let mapper = FieldMapper::new(&parsed.headers);
        let row_parser = RowParser::new(self.config.strict_refrigeracion);
        let validator = PedidoValidator;
        let mut detector = InFileDuplicateDetector::new();
        let hoy = business_today();

        let mut result = CargaPedidosResult::new();
        let mut validos = Vec::new();

        // === step 3: per-row pipeline, file order ===
        for row in &parsed.rows {
            let linea = row.line_number;

            let raw = match mapper.map_row(row) {
                Ok(raw) => raw,
                Err(e) => {
                    result.agregar_error(ErrorProcesamiento::new(
                        linea,
                        e.to_string(),
                        codigos::ERROR_DESCONOCIDO,
                    ));
                    continue;
                }
            };

            let candidato = match row_parser.parse(raw) {
                Ok(candidato) => candidato,
                Err(e) => {
                    result.agregar_error(ErrorProcesamiento::new(
                        linea,
                        e.motivo,
                        codigos::ERROR_DESCONOCIDO,
                    ));
                    continue;
                }
            };

            let contexto = ContextoValidacion {
                cliente: self.clientes.find_by_id(&candidato.cliente_id).await?,
                zona: self.zonas.find_by_id(&candidato.zona_id).await?,
                hoy,
            };

            if let Err(e) = validator.validar(Some(&candidato), &contexto) {
                result.agregar_error(ErrorProcesamiento::new(linea, e.motivo, e.codigo));
                continue;
            }

            let numero = candidato.numero_pedido.clone();

            if detector.es_duplicado(&numero) {
                result.agregar_error(ErrorProcesamiento::new(
                    linea,
                    format!("Numero de pedido duplicado en el archivo: {numero}"),
                    codigos::DUPLICADO_EN_ARCHIVO,
                ));
                continue;
            }

            if self.pedidos.exists_by_numero_pedido(&numero).await? {
                result.agregar_error(ErrorProcesamiento::new(
                    linea,
                    format!("Numero de pedido ya existe en la base de datos: {numero}"),
                    codigos::DUPLICADO,
                ));
                continue;
            }

            detector.admitir(&numero);
            validos.push(candidato.into_pedido());
        }

        // === step 4: aggregate + commit decision ===
        result.total_procesados = parsed.rows.len();
        result.guardados = 0;

        if result.tiene_errores() {
            // all-or-nothing: one bad row blocks the whole file
            info!(
                total = result.total_procesados,
                errores = result.con_error,
                "archivo rechazado, nada persistido"
            );
            return Ok(result);
        }

        // === step 5: chunked persist + ledger write, one transaction ===
        result.guardados = validos.len();
        let carga = CargaIdempotente::new(
            idempotency_key.to_string(),
            archivo_hash,
            serde_json::to_string(&result).ok(),
        );

        match self
            .persister
            .persist(&validos, self.config.effective_batch_size(), &carga)
            .await
        {
            Ok(guardados) => result.guardados = guardados,
            // a uniqueness violation at commit time means we lost a race;
            // same meaning as the pre-checked duplicates
            Err(RepositoryError::UniqueConstraintViolation(msg)) => {
                warn!(error = %msg, "violación de unicidad al persistir");
                return Err(if msg.contains("cargas_idempotentes") {
                    ImportError::CargaDuplicada
                } else {
                    ImportError::PedidoDuplicado(msg)
                });
            }
            Err(e) => return Err(e.into()),
        }

        info!(
            total = result.total_procesados,
            guardados = result.guardados,
            "carga completada"
        );
        Ok(result)
    }
}
