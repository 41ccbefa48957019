use std::fmt;

use serde::{Deserialize, Serialize};

use shared_models::{Address, AppError, FieldError, PageRequest, Sort};

pub const DOCTOR_NOT_FOUND: &str = "Doctor not found";
pub const DUPLICATE_CRM_MESSAGE: &str = "A doctor with this CRM already exists";
pub const DUPLICATE_EMAIL_MESSAGE: &str = "A doctor with this email already exists";

/// Columns a doctor listing may be sorted by.
pub const SORTABLE_FIELDS: &[&str] = &["name", "email", "crm", "specialty", "id"];
pub const DEFAULT_SORT_FIELD: &str = "name";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Specialty {
    Orthopedics,
    Cardiology,
    Gynecology,
    Dermatology,
}

impl Specialty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Specialty::Orthopedics => "ORTHOPEDICS",
            Specialty::Cardiology => "CARDIOLOGY",
            Specialty::Gynecology => "GYNECOLOGY",
            Specialty::Dermatology => "DERMATOLOGY",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub crm: String,
    pub specialty: Specialty,
    pub address: Address,
    pub active: bool,
}

impl Doctor {
    /// Overwrites each slot the request carries; absent fields stay as they are.
    pub fn apply_update(&mut self, request: UpdateDoctorRequest) {
        if let Some(name) = request.name {
            self.name = name;
        }
        if let Some(phone) = request.phone {
            self.phone = phone;
        }
        if let Some(address) = request.address {
            self.address = address;
        }
    }
}

/// A doctor that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDoctor {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub crm: String,
    pub specialty: Specialty,
    pub address: Address,
    pub active: bool,
}

impl NewDoctor {
    pub fn with_id(self, id: i64) -> Doctor {
        Doctor {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            crm: self.crm,
            specialty: self.specialty,
            address: self.address,
            active: self.active,
        }
    }
}

impl From<RegisterDoctorRequest> for NewDoctor {
    fn from(request: RegisterDoctorRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            phone: request.phone,
            crm: request.crm,
            specialty: request.specialty,
            address: request.address,
            active: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterDoctorRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub crm: String,
    pub specialty: Specialty,
    pub address: Address,
}

impl RegisterDoctorRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors: Vec<FieldError> = [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("crm", &self.crm),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| FieldError::new(field, "must not be blank"))
        .collect();

        errors.extend(self.address.blank_fields("address"));

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationFailed(errors))
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDoctorRequest {
    pub id: i64,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
}

impl UpdateDoctorRequest {
    /// Present fields must not be blank; absent ones are fine.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();

        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            errors.push(FieldError::new("name", "must not be blank"));
        }
        if self.phone.as_deref().is_some_and(|p| p.trim().is_empty()) {
            errors.push(FieldError::new("phone", "must not be blank"));
        }
        if let Some(address) = &self.address {
            errors.extend(address.blank_fields("address"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationFailed(errors))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorDetail {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub crm: String,
    pub phone: String,
    pub specialty: Specialty,
    pub address: Address,
    pub active: bool,
}

impl From<Doctor> for DoctorDetail {
    fn from(doctor: Doctor) -> Self {
        Self {
            id: doctor.id,
            name: doctor.name,
            email: doctor.email,
            crm: doctor.crm,
            phone: doctor.phone,
            specialty: doctor.specialty,
            address: doctor.address,
            active: doctor.active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorListItem {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub crm: String,
    pub specialty: Specialty,
}

impl From<Doctor> for DoctorListItem {
    fn from(doctor: Doctor) -> Self {
        Self {
            id: doctor.id,
            name: doctor.name,
            email: doctor.email,
            crm: doctor.crm,
            specialty: doctor.specialty,
        }
    }
}

// Query string of the listing endpoint: ?page=0&size=10&sort=name,asc
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoctorListQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

impl DoctorListQuery {
    pub fn into_page_request(self, default_size: u32) -> PageRequest {
        let sort = self
            .sort
            .as_deref()
            .and_then(Sort::parse)
            .unwrap_or_else(|| Sort::asc(DEFAULT_SORT_FIELD));

        PageRequest::new(self.page.unwrap_or(0), self.size.unwrap_or(default_size), sort)
            .restrict_sort(SORTABLE_FIELDS, DEFAULT_SORT_FIELD)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use shared_models::SortDirection;

    use super::*;

    fn address() -> Address {
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

    fn doctor() -> Doctor {
        NewDoctor {
            name: "João da Silva".to_string(),
            email: "joao@voll.med".to_string(),
            phone: "11999999999".to_string(),
            crm: "12345".to_string(),
            specialty: Specialty::Cardiology,
            address: address(),
            active: true,
        }
        .with_id(1)
    }

    #[test]
    fn test_specialty_wire_format() {
        assert_eq!(serde_json::to_string(&Specialty::Dermatology).unwrap(), "\"DERMATOLOGY\"");
        let parsed: Specialty = serde_json::from_str("\"GYNECOLOGY\"").unwrap();
        assert_eq!(parsed, Specialty::Gynecology);
    }

    #[test]
    fn test_apply_update_only_touches_present_fields() {
        let mut doctor = doctor();
        doctor.apply_update(UpdateDoctorRequest {
            id: 1,
            phone: Some("11988888888".to_string()),
            ..Default::default()
        });

        assert_eq!(doctor.phone, "11988888888");
        assert_eq!(doctor.name, "João da Silva");
        assert_eq!(doctor.address, address());
    }

    #[test]
    fn test_apply_update_replaces_address_wholesale() {
        let mut doctor = doctor();
        let new_address = Address {
            complement: None,
            number: None,
            city: "Rio de Janeiro".to_string(),
            state: "RJ".to_string(),
            ..address()
        };
        doctor.apply_update(UpdateDoctorRequest {
            id: 1,
            address: Some(new_address.clone()),
            ..Default::default()
        });

        assert_eq!(doctor.address, new_address);
        assert_eq!(doctor.address.complement, None);
    }

    #[test]
    fn test_register_validation_reports_each_blank_field() {
        let request = RegisterDoctorRequest {
            name: " ".to_string(),
            email: "joao@voll.med".to_string(),
            phone: "".to_string(),
            crm: "12345".to_string(),
            specialty: Specialty::Cardiology,
            address: Address { city: String::new(), ..address() },
        };

        assert_matches!(request.validate(), Err(AppError::ValidationFailed(errors)) => {
            let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
            assert_eq!(fields, vec!["name", "phone", "address.city"]);
        });
    }

    #[test]
    fn test_update_validation_ignores_absent_fields() {
        assert!(UpdateDoctorRequest { id: 1, ..Default::default() }.validate().is_ok());
        assert_matches!(
            UpdateDoctorRequest { id: 1, name: Some(String::new()), ..Default::default() }.validate(),
            Err(AppError::ValidationFailed(_))
        );
    }

    #[test]
    fn test_list_query_defaults() {
        let request = DoctorListQuery::default().into_page_request(10);
        assert_eq!(request.page, 0);
        assert_eq!(request.size, 10);
        assert_eq!(request.sort.property, "name");
        assert_eq!(request.sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_list_query_rejects_unknown_sort_field() {
        let query = DoctorListQuery {
            page: Some(2),
            size: Some(5),
            sort: Some("address,desc".to_string()),
        };
        let request = query.into_page_request(10);
        assert_eq!(request.page, 2);
        assert_eq!(request.size, 5);
        assert_eq!(request.sort.property, "name");
        assert_eq!(request.sort.direction, SortDirection::Desc);
    }
}
