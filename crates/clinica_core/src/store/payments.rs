//! Payment operations. No preconditions beyond id lookup.

use crate::model::{NewPayment, Payment, PaymentPatch};

use super::{iso_now, new_id, ClinicStore};

impl ClinicStore {
    pub fn add_payment(&mut self, data: NewPayment) -> Payment {
        let payment = data.into_payment(new_id(), iso_now());
        self.payments.push(payment.clone());
        payment
    }

    /// Merges `patch`; silent no-op when the id is unknown.
    pub fn update_payment(&mut self, id: &str, patch: &PaymentPatch) {
        if let Some(payment) = self.payments.iter_mut().find(|p| p.id == id) {
            patch.apply_to(payment);
            payment.updated_at = iso_now();
        }
    }

    pub fn remove_payment(&mut self, id: &str) {
        self.payments.retain(|p| p.id != id);
    }

    pub fn get_payment(&self, id: &str) -> Option<&Payment> {
        self.payments.iter().find(|p| p.id == id)
    }

    pub fn list_payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn payments_by_patient(&self, patient_id: &str) -> Vec<&Payment> {
        self.payments
            .iter()
            .filter(|p| p.patient_id == patient_id)
            .collect()
    }
}
