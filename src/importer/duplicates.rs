// ==========================================
// Carga de pedidos - in-file duplicate detector
// ==========================================
// Seen-set over business numbers within one file. A number is marked
// seen only once its row fully validated, so a first occurrence that
// failed validation does not shadow later rows.
// ==========================================

use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct InFileDuplicateDetector {
    vistos: HashSet<String>,
}

impl InFileDuplicateDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if this business number already passed the pipeline earlier
    /// in the current file.
    pub fn es_duplicado(&self, numero_pedido: &str) -> bool {
        self.vistos.contains(numero_pedido)
    }

    /// Record a fully validated business number.
    pub fn admitir(&mut self, numero_pedido: &str) {
        self.vistos.insert(numero_pedido.to_string());
    }
}
