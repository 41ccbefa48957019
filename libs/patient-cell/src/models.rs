use serde::{Deserialize, Serialize};

use shared_models::Address;

pub const PATIENT_NOT_FOUND: &str = "Patient not found";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub cpf: String,
    pub address: Address,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPatient {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub cpf: String,
    pub address: Address,
}

impl NewPatient {
    pub fn with_id(self, id: i64) -> Patient {
        Patient {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            cpf: self.cpf,
            address: self.address,
            active: true,
        }
    }
}
