#![allow(dead_code)]

use doctor_cell::models::{RegisterDoctorRequest, Specialty};
use shared_models::Address;

pub fn address() -> Address {
    Address {
        street: "Rua das Flores".to_string(),
        district: "Bairro Exemplo".to_string(),
        postal_code: "01000000".to_string(),
        city: "São Paulo".to_string(),
        state: "SP".to_string(),
        complement: Some("Apto 123".to_string()),
        number: Some("123".to_string()),
    }
}

pub fn register_request(name: &str, email: &str, crm: &str, specialty: Specialty) -> RegisterDoctorRequest {
    RegisterDoctorRequest {
        name: name.to_string(),
        email: email.to_string(),
        phone: "1199999999".to_string(),
        crm: crm.to_string(),
        specialty,
        address: address(),
    }
}

pub fn jose() -> RegisterDoctorRequest {
    register_request("Jose da Silva", "jose.medico@voll.med", "53455", Specialty::Dermatology)
}

pub fn maria() -> RegisterDoctorRequest {
    register_request("Maria da Silva", "maria.medico@voll.med", "53456", Specialty::Gynecology)
}
