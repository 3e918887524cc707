use portfolio_core::{EmployeeStore, NewEmployee, ResourceError};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store(server: &MockServer) -> EmployeeStore {
    EmployeeStore::new(&format!("{}/employees", server.uri()))
}

fn ana() -> NewEmployee {
    NewEmployee {
        name: "Ana".into(),
        age: "31".into(),
        email: "ana@example.com".into(),
        role: "Dev".into(),
        salary: "5000".into(),
    }
}

#[tokio::test]
async fn test_list_employees() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Ana", "age": "31", "email": "ana@example.com", "role": "Dev", "salary": "5000" }
        ])))
        .mount(&server)
        .await;

    let employees = store(&server).list().await.unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].id, Some(1));
    assert_eq!(employees[0].fields, ana());
}

#[tokio::test]
async fn test_list_failure_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = store(&server).list().await.unwrap_err();
    assert_eq!(err.to_string(), "Erro ao buscar funcionários");
}

#[tokio::test]
async fn test_create_posts_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/employees"))
        .and(body_json(json!({
            "name": "Ana", "age": "31", "email": "ana@example.com", "role": "Dev", "salary": "5000"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 2 })))
        .expect(1)
        .mount(&server)
        .await;

    store(&server).create(&ana()).await.unwrap();
}

#[tokio::test]
async fn test_update_surfaces_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/employees/4"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "Email já cadastrado" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = store(&server).update(4, &ana()).await.unwrap_err();
    assert!(matches!(err, ResourceError::Rejected(ref m) if m == "Email já cadastrado"));
}

#[tokio::test]
async fn test_delete_falls_back_to_default_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/employees/9"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let err = store(&server).delete(9).await.unwrap_err();
    assert_eq!(err.to_string(), "Erro ao deletar funcionário");
}

#[tokio::test]
async fn test_delete_success() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/employees/9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    store(&server).delete(9).await.unwrap();
}
