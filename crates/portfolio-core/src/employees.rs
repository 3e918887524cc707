//! Client for the employee table's REST resource
//!
//! A plain create/read/update/delete collection returning JSON. Failures carry
//! the `error` string from the response body when the server sends one.

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const FETCH_FAILED: &str = "Erro ao buscar funcionários";
pub const SAVE_FAILED: &str = "Erro desconhecido";
pub const DELETE_FAILED: &str = "Erro ao deletar funcionário";

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("{0}")]
    Rejected(String),

    #[error("{context}: {source}")]
    Transport {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

/// Editable fields of an employee, as typed into the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub age: String,
    pub email: String,
    pub role: String,
    pub salary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(flatten)]
    pub fields: NewEmployee,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Clone)]
pub struct EmployeeStore {
    client: Client,
    base_url: String,
}

impl EmployeeStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/{}", self.base_url, id)
    }

    pub async fn list(&self) -> Result<Vec<Employee>, ResourceError> {
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .map_err(|source| ResourceError::Transport {
                context: FETCH_FAILED,
                source,
            })?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "employee list request failed");
            return Err(ResourceError::Rejected(FETCH_FAILED.to_string()));
        }

        response
            .json()
            .await
            .map_err(|source| ResourceError::Transport {
                context: FETCH_FAILED,
                source,
            })
    }

    pub async fn create(&self, employee: &NewEmployee) -> Result<(), ResourceError> {
        let request = self.client.post(&self.base_url).json(employee);
        let response = send(request, SAVE_FAILED).await?;
        check(response, SAVE_FAILED).await
    }

    pub async fn update(&self, id: u64, employee: &NewEmployee) -> Result<(), ResourceError> {
        let request = self.client.put(self.item_url(id)).json(employee);
        let response = send(request, SAVE_FAILED).await?;
        check(response, SAVE_FAILED).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), ResourceError> {
        let request = self.client.delete(self.item_url(id));
        let response = send(request, DELETE_FAILED).await?;
        check(response, DELETE_FAILED).await
    }
}

async fn send(
    request: reqwest::RequestBuilder,
    context: &'static str,
) -> Result<Response, ResourceError> {
    request
        .send()
        .await
        .map_err(|source| ResourceError::Transport { context, source })
}

/// Turn a non-success response into `Rejected`, preferring the body's `error`.
async fn check(response: Response, fallback: &str) -> Result<(), ResourceError> {
    if response.status().is_success() {
        return Ok(());
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());

    tracing::warn!(%status, %message, "employee request rejected");
    Err(ResourceError::Rejected(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_wire_format_flattens_fields() {
        let employee: Employee = serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "Ana",
            "age": "31",
            "email": "ana@example.com",
            "role": "Dev",
            "salary": "5000"
        }))
        .unwrap();

        assert_eq!(employee.id, Some(7));
        assert_eq!(employee.fields.name, "Ana");
        assert_eq!(employee.fields.salary, "5000");
    }

    #[test]
    fn test_item_url_strips_trailing_slash() {
        let store = EmployeeStore::new("http://localhost:3001/employees/");
        assert_eq!(store.item_url(3), "http://localhost:3001/employees/3");
    }
}
