//! Payment domain model.
//!
//! # Invariants
//! - `valor` is the charged amount in BRL; revenue aggregation only ever
//!   sums `pago` (paid) and `pendente` (pending) entries.

use serde::{Deserialize, Serialize};

/// Payment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pendente,
    Pago,
    Cancelado,
    Reembolsado,
}

/// Settlement method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Dinheiro,
    CartaoCredito,
    CartaoDebito,
    Pix,
    Convenio,
    Transferencia,
}

/// Charge raised against one patient, optionally tied to an appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub patient_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<String>,
    pub valor: f64,
    pub descricao: String,
    pub forma_pagamento: PaymentMethod,
    pub status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_pagamento: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_vencimento: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero_recibo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Payment creation payload.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub patient_id: String,
    pub appointment_id: Option<String>,
    pub valor: f64,
    pub descricao: String,
    pub forma_pagamento: PaymentMethod,
    pub status: PaymentStatus,
    pub data_pagamento: Option<String>,
    pub data_vencimento: Option<String>,
    pub numero_recibo: Option<String>,
    pub observacoes: Option<String>,
}

impl NewPayment {
    pub fn into_payment(self, id: String, now: String) -> Payment {
        Payment {
            id,
            patient_id: self.patient_id,
            appointment_id: self.appointment_id,
            valor: self.valor,
            descricao: self.descricao,
            forma_pagamento: self.forma_pagamento,
            status: self.status,
            data_pagamento: self.data_pagamento,
            data_vencimento: self.data_vencimento,
            numero_recibo: self.numero_recibo,
            observacoes: self.observacoes,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Partial update for a payment. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct PaymentPatch {
    pub appointment_id: Option<String>,
    pub valor: Option<f64>,
    pub descricao: Option<String>,
    pub forma_pagamento: Option<PaymentMethod>,
    pub status: Option<PaymentStatus>,
    pub data_pagamento: Option<String>,
    pub data_vencimento: Option<String>,
    pub numero_recibo: Option<String>,
    pub observacoes: Option<String>,
}

impl PaymentPatch {
    pub fn apply_to(&self, payment: &mut Payment) {
        if let Some(v) = &self.appointment_id {
            payment.appointment_id = Some(v.clone());
        }
        if let Some(v) = self.valor {
            payment.valor = v;
        }
        if let Some(v) = &self.descricao {
            payment.descricao = v.clone();
        }
        if let Some(v) = self.forma_pagamento {
            payment.forma_pagamento = v;
        }
        if let Some(v) = self.status {
            payment.status = v;
        }
        if let Some(v) = &self.data_pagamento {
            payment.data_pagamento = Some(v.clone());
        }
        if let Some(v) = &self.data_vencimento {
            payment.data_vencimento = Some(v.clone());
        }
        if let Some(v) = &self.numero_recibo {
            payment.numero_recibo = Some(v.clone());
        }
        if let Some(v) = &self.observacoes {
            payment.observacoes = Some(v.clone());
        }
    }
}
