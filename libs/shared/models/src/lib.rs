pub mod address;
pub mod auth;
pub mod error;
pub mod pagination;

pub use address::Address;
pub use error::{AppError, FieldError};
pub use pagination::{Page, PageRequest, Sort, SortDirection};
