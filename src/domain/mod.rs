// ==========================================
// Carga de pedidos - domain layer
// ==========================================
// Entities and value types. No I/O here.
// ==========================================

pub mod carga;
pub mod pedido;
pub mod referencia;

pub use carga::{CargaIdempotente, CargaPedidosResult, ErrorProcesamiento};
pub use pedido::{EstadoPedido, Pedido, PedidoCandidato};
pub use referencia::{Cliente, Zona};
