use async_trait::async_trait;

use shared_database::DatabaseError;
use shared_models::{Page, PageRequest};

use crate::models::{Doctor, NewDoctor};

pub mod memory;
pub mod supabase;

pub use memory::InMemoryDoctorRepository;
pub use supabase::SupabaseDoctorRepository;

pub type RepositoryResult<T> = Result<T, DatabaseError>;

/// Storage for doctor records, keyed by surrogate id.
///
/// `insert` must reject a duplicate `crm` or `email` with
/// `DatabaseError::UniqueViolation` whose detail names the column; that
/// rejection is the authoritative uniqueness check; `exists_by_*` are
/// only fast-path lookups.
#[async_trait]
pub trait DoctorRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Doctor>>;

    async fn exists_by_crm(&self, crm: &str) -> RepositoryResult<bool>;

    async fn exists_by_email(&self, email: &str) -> RepositoryResult<bool>;

    /// Active doctors only, ordered and sliced as `page` asks.
    async fn find_all_active(&self, page: &PageRequest) -> RepositoryResult<Page<Doctor>>;

    async fn insert(&self, doctor: NewDoctor) -> RepositoryResult<Doctor>;

    /// Writes `name`, `phone` and `address` of an existing record and returns
    /// the stored row. The `active` flag is left as the store has it.
    async fn update_profile(&self, doctor: &Doctor) -> RepositoryResult<Doctor>;

    /// Clears the `active` flag. Nothing else on the record changes.
    async fn deactivate(&self, id: i64) -> RepositoryResult<()>;
}
