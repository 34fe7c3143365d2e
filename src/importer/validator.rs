// ==========================================
// Carga de pedidos - domain validator
// ==========================================
// Pure rule engine: the sequential guard-clause chain is modeled as an
// ordered table of (code, predicate) rules so each rule can be tested
// in isolation and future rules slot in without touching the rest.
// Reference lookups happen before validation; the context carries the
// resolved Cliente/Zona plus the injected business "today".
// ==========================================

use crate::domain::pedido::PedidoCandidato;
use crate::domain::referencia::{Cliente, Zona};
use crate::importer::error::codigos;
use chrono::NaiveDate;

/// Resolved collaborators for one row. `None` means the referenced
/// entity does not exist in its directory.
#[derive(Debug, Clone)]
pub struct ContextoValidacion {
    pub cliente: Option<Cliente>,
    pub zona: Option<Zona>,
    /// Business-timezone "today"; injected, never read from the clock
    /// here.
    pub hoy: NaiveDate,
}

/// Rule-chain failure: stable code plus human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PedidoValidationError {
    pub codigo: &'static str,
    pub motivo: String,
}

impl PedidoValidationError {
    fn new(codigo: &'static str, motivo: impl Into<String>) -> Self {
        Self {
            codigo,
            motivo: motivo.into(),
        }
    }
}

type Regla = fn(&PedidoCandidato, &ContextoValidacion) -> Result<(), PedidoValidationError>;

/// Rule order is part of the contract: first failure wins.
const REGLAS: [Regla; 7] = [
    regla_numero_pedido,
    regla_estado,
    regla_fecha_entrega,
    regla_cliente_existe,
    regla_cliente_activo,
    regla_zona_existe,
    regla_refrigeracion,
];

pub struct PedidoValidator;

impl PedidoValidator {
    /// Run the full rule chain. An absent candidate is rejected before
    /// any field rule runs.
    pub fn validar(
        &self,
        pedido: Option<&PedidoCandidato>,
        contexto: &ContextoValidacion,
    ) -> Result<(), PedidoValidationError> {
        let pedido = pedido.ok_or_else(|| {
            PedidoValidationError::new(codigos::PEDIDO_NULO, "El pedido no puede ser nulo")
        })?;

        for regla in REGLAS {
            regla(pedido, contexto)?;
        }
        Ok(())
    }
}

fn regla_numero_pedido(
    pedido: &PedidoCandidato,
    _ctx: &ContextoValidacion,
) -> Result<(), PedidoValidationError> {
    let numero = pedido.numero_pedido.trim();
    if numero.is_empty() {
        return Err(PedidoValidationError::new(
            codigos::NUMERO_PEDIDO_INVALIDO,
            "numeroPedido es obligatorio",
        ));
    }
    // exactly [A-Za-z0-9]+, no symbols, no whitespace
    if !pedido.numero_pedido.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(PedidoValidationError::new(
            codigos::NUMERO_PEDIDO_INVALIDO,
            "numeroPedido debe ser alfanumérico (A-Z, a-z, 0-9) sin espacios ni símbolos",
        ));
    }
    Ok(())
}

fn regla_estado(
    pedido: &PedidoCandidato,
    _ctx: &ContextoValidacion,
) -> Result<(), PedidoValidationError> {
    // the parser guarantees presence for rows coming through the
    // pipeline; re-checked for candidates built elsewhere
    if pedido.estado.is_none() {
        return Err(PedidoValidationError::new(
            codigos::ESTADO_INVALIDO,
            "estado es obligatorio y debe ser PENDIENTE|CONFIRMADO|ENTREGADO",
        ));
    }
    Ok(())
}

fn regla_fecha_entrega(
    pedido: &PedidoCandidato,
    ctx: &ContextoValidacion,
) -> Result<(), PedidoValidationError> {
    let fecha = pedido.fecha_entrega.ok_or_else(|| {
        PedidoValidationError::new(codigos::FECHA_INVALIDA, "fechaEntrega es obligatoria")
    })?;
    if fecha < ctx.hoy {
        return Err(PedidoValidationError::new(
            codigos::FECHA_INVALIDA,
            "fechaEntrega no puede ser anterior a la fecha actual (America/Lima)",
        ));
    }
    Ok(())
}

fn regla_cliente_existe(
    _pedido: &PedidoCandidato,
    ctx: &ContextoValidacion,
) -> Result<(), PedidoValidationError> {
    if ctx.cliente.is_none() {
        return Err(PedidoValidationError::new(
            codigos::CLIENTE_NO_EXISTE,
            "El cliente no existe",
        ));
    }
    Ok(())
}

fn regla_cliente_activo(
    _pedido: &PedidoCandidato,
    ctx: &ContextoValidacion,
) -> Result<(), PedidoValidationError> {
    if let Some(cliente) = &ctx.cliente {
        if !cliente.activo {
            return Err(PedidoValidationError::new(
                codigos::CLIENTE_INACTIVO,
                "El cliente no está activo",
            ));
        }
    }
    Ok(())
}

fn regla_zona_existe(
    _pedido: &PedidoCandidato,
    ctx: &ContextoValidacion,
) -> Result<(), PedidoValidationError> {
    if ctx.zona.is_none() {
        return Err(PedidoValidationError::new(
            codigos::ZONA_NO_EXISTE,
            "La zona no existe",
        ));
    }
    Ok(())
}

fn regla_refrigeracion(
    pedido: &PedidoCandidato,
    ctx: &ContextoValidacion,
) -> Result<(), PedidoValidationError> {
    if let Some(zona) = &ctx.zona {
        if pedido.requiere_refrigeracion && !zona.soporta_refrigeracion {
            return Err(PedidoValidationError::new(
                codigos::ZONA_NO_PERMITE_REFRIGERACION,
                "Esta zona no admite pedidos con refrigeración",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pedido::EstadoPedido;

    fn candidato(numero: &str) -> PedidoCandidato {
        PedidoCandidato {
            numero_pedido: numero.to_string(),
            cliente_id: "CLI-123".to_string(),
            zona_id: "ZONA1".to_string(),
            fecha_entrega: NaiveDate::from_ymd_opt(2030, 1, 1),
            estado: Some(EstadoPedido::Pendiente),
            requiere_refrigeracion: false,
        }
    }

    fn contexto() -> ContextoValidacion {
        ContextoValidacion {
            cliente: Some(Cliente {
                id: "CLI-123".to_string(),
                activo: true,
            }),
            zona: Some(Zona {
                id: "ZONA1".to_string(),
                soporta_refrigeracion: true,
            }),
            hoy: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
        }
    }

    fn codigo(pedido: &PedidoCandidato, ctx: &ContextoValidacion) -> &'static str {
        PedidoValidator.validar(Some(pedido), ctx).unwrap_err().codigo
    }

    #[test]
    fn valid_candidate_passes_the_whole_chain() {
        assert!(PedidoValidator.validar(Some(&candidato("PED001")), &contexto()).is_ok());
    }

    #[test]
    fn absent_candidate_is_pedido_nulo() {
        let err = PedidoValidator.validar(None, &contexto()).unwrap_err();
        assert_eq!(err.codigo, codigos::PEDIDO_NULO);
    }

    #[test]
    fn numero_must_be_non_blank_alphanumeric() {
        assert_eq!(codigo(&candidato(""), &contexto()), codigos::NUMERO_PEDIDO_INVALIDO);
        assert_eq!(codigo(&candidato("   "), &contexto()), codigos::NUMERO_PEDIDO_INVALIDO);
        assert_eq!(codigo(&candidato("PED-001"), &contexto()), codigos::NUMERO_PEDIDO_INVALIDO);
        assert_eq!(codigo(&candidato("PED 01"), &contexto()), codigos::NUMERO_PEDIDO_INVALIDO);
        assert_eq!(codigo(&candidato("PED_01"), &contexto()), codigos::NUMERO_PEDIDO_INVALIDO);

        assert!(PedidoValidator.validar(Some(&candidato("abc123XYZ")), &contexto()).is_ok());
    }

    #[test]
    fn missing_estado_is_rejected() {
        let mut pedido = candidato("PED001");
        pedido.estado = None;
        assert_eq!(codigo(&pedido, &contexto()), codigos::ESTADO_INVALIDO);
    }

    #[test]
    fn fecha_today_is_accepted_one_day_earlier_is_not() {
        let ctx = contexto();

        let mut pedido = candidato("PED001");
        pedido.fecha_entrega = Some(ctx.hoy);
        assert!(PedidoValidator.validar(Some(&pedido), &ctx).is_ok());

        pedido.fecha_entrega = Some(ctx.hoy.pred_opt().unwrap());
        assert_eq!(codigo(&pedido, &ctx), codigos::FECHA_INVALIDA);

        pedido.fecha_entrega = None;
        assert_eq!(codigo(&pedido, &ctx), codigos::FECHA_INVALIDA);
    }

    #[test]
    fn unknown_cliente_then_inactive_cliente() {
        let pedido = candidato("PED001");

        let mut ctx = contexto();
        ctx.cliente = None;
        assert_eq!(codigo(&pedido, &ctx), codigos::CLIENTE_NO_EXISTE);

        let mut ctx = contexto();
        ctx.cliente.as_mut().unwrap().activo = false;
        assert_eq!(codigo(&pedido, &ctx), codigos::CLIENTE_INACTIVO);
    }

    #[test]
    fn unknown_zona_is_rejected() {
        let mut ctx = contexto();
        ctx.zona = None;
        assert_eq!(codigo(&candidato("PED001"), &ctx), codigos::ZONA_NO_EXISTE);
    }

    #[test]
    fn refrigeration_requires_capable_zona() {
        let mut pedido = candidato("PED001");
        pedido.requiere_refrigeracion = true;

        let mut ctx = contexto();
        ctx.zona.as_mut().unwrap().soporta_refrigeracion = false;
        assert_eq!(codigo(&pedido, &ctx), codigos::ZONA_NO_PERMITE_REFRIGERACION);

        // zone without refrigeration is fine when the order doesn't ask for it
        pedido.requiere_refrigeracion = false;
        assert!(PedidoValidator.validar(Some(&pedido), &ctx).is_ok());
    }

    #[test]
    fn rule_order_first_failure_wins() {
        // bad numero + inactive cliente: numero rule fires first
        let mut ctx = contexto();
        ctx.cliente.as_mut().unwrap().activo = false;
        assert_eq!(codigo(&candidato("PED 001"), &ctx), codigos::NUMERO_PEDIDO_INVALIDO);
    }
}
