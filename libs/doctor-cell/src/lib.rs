pub mod handlers;
pub mod models;
pub mod repository;
pub mod router;
pub mod services;

pub use models::*;
pub use repository::{DoctorRepository, InMemoryDoctorRepository, SupabaseDoctorRepository};
pub use services::DoctorService;
