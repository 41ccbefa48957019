use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use patient_cell::{InMemoryPatientRepository, NewPatient, PatientRepository, SupabasePatientRepository};
use shared_database::DatabaseError;
use shared_utils::test_utils::{MockSupabaseResponses, TestConfig};

fn new_patient(cpf: &str) -> NewPatient {
    NewPatient {
        name: "Carlos Pereira".to_string(),
        email: "carlos@voll.med".to_string(),
        phone: "11988887777".to_string(),
        cpf: cpf.to_string(),
        address: serde_json::from_value(MockSupabaseResponses::address_json()).unwrap(),
    }
}

#[tokio::test]
async fn test_in_memory_insert_and_find() {
    let repository = InMemoryPatientRepository::new();

    let patient = repository.insert(new_patient("12345678900")).await.unwrap();

    assert_eq!(patient.id, 1);
    assert!(patient.active);
    assert_eq!(repository.find_by_id(1).await.unwrap(), Some(patient));
    assert_eq!(repository.find_by_id(2).await.unwrap(), None);
}

#[tokio::test]
async fn test_in_memory_rejects_duplicate_cpf() {
    let repository = InMemoryPatientRepository::new();
    repository.insert(new_patient("12345678900")).await.unwrap();

    assert_matches!(
        repository.insert(new_patient("12345678900")).await,
        Err(DatabaseError::UniqueViolation { .. })
    );
}

#[tokio::test]
async fn test_supabase_find_by_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/patients"))
        .and(query_param("id", "eq.3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::patient_row(3, "Carlos Pereira")
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/patients"))
        .and(query_param("id", "eq.4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let repository = SupabasePatientRepository::new(&TestConfig::with_supabase_url(&mock_server.uri()).to_app_config());

    let patient = repository.find_by_id(3).await.unwrap().unwrap();
    assert_eq!(patient.name, "Carlos Pereira");
    assert!(repository.find_by_id(4).await.unwrap().is_none());
}
