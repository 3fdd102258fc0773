use crate::Customer;
use crm_core::Editable;
use serde::{Deserialize, Serialize};

/// The owner-profile popup: contact details editable as a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfileDto {
    pub title: String,
    pub department: String,
    pub email: String,
    pub phone: String,
}

impl Editable<Customer> for CustomerProfileDto {
    fn from_entity(customer: &Customer) -> Self {
        Self {
            title: customer.title.clone().unwrap_or_default(),
            department: customer.department.clone().unwrap_or_default(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
        }
    }

    fn apply_to(self, customer: &mut Customer) {
        customer.title = Some(self.title).filter(|t| !t.trim().is_empty());
        customer.department = Some(self.department).filter(|d| !d.trim().is_empty());
        customer.email = self.email;
        customer.phone = self.phone;
    }
}
