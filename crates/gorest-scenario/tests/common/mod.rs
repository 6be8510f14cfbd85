//! In-memory stand-in for the user API

use std::{
    collections::BTreeMap,
    sync::Mutex,
    time::Instant,
};

use async_trait::async_trait;
use gorest_fixtures::{User, UserStatus};
use gorest_http::{
    header::{HeaderMap, AUTHORIZATION},
    HttpClientTrait, HttpError, Method, ResponseEnvelope, StatusCode,
};
use serde_json::{json, Value};

/// Behaves like the GoRest user endpoints, with switches for misbehaviour.
#[derive(Default)]
pub struct FakeUserApi {
    state: Mutex<State>,
    /// Reject creates with 422
    reject_creates: bool,
    /// Keep users around after DELETE
    ignore_deletes: bool,
    /// Answer DELETE with 204 and a JSON body
    delete_with_body: bool,
}

#[derive(Default)]
struct State {
    next_id: u64,
    users: BTreeMap<u64, User>,
    calls: Vec<(Method, String)>,
}

impl FakeUserApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting_creates() -> Self {
        Self {
            reject_creates: true,
            ..Self::default()
        }
    }

    pub fn ignoring_deletes() -> Self {
        Self {
            ignore_deletes: true,
            ..Self::default()
        }
    }

    pub fn deleting_with_body() -> Self {
        Self {
            delete_with_body: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(Method, String)> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn user_count(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }

    fn handle(&self, method: &Method, path: &str, body: Option<&Value>) -> (StatusCode, Value) {
        let mut state = self.state.lock().unwrap();
        state.calls.push((method.clone(), path.to_string()));

        let id = path
            .strip_prefix("/users/")
            .and_then(|id| id.parse::<u64>().ok());

        match (method.as_str(), id) {
            ("POST", None) if self.reject_creates => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!([{"field": "email", "message": "has already been taken"}]),
            ),
            ("POST", None) => {
                state.next_id += 1;
                let mut user = body.cloned().unwrap_or(Value::Null);
                user["id"] = json!(7000 + state.next_id);
                let user: User = serde_json::from_value(user).unwrap();
                state.users.insert(user.id, user.clone());
                (StatusCode::CREATED, serde_json::to_value(user).unwrap())
            }
            ("GET", None) => {
                // The real API always has other users around.
                let mut users: Vec<Value> = state
                    .users
                    .values()
                    .map(|user| serde_json::to_value(user).unwrap())
                    .collect();
                users.push(json!({
                    "id": 1, "name": "Seed User", "email": "seed@example.com",
                    "gender": "male", "status": "active"
                }));
                (StatusCode::OK, Value::Array(users))
            }
            ("GET", Some(id)) => match state.users.get(&id) {
                Some(user) => (StatusCode::OK, serde_json::to_value(user).unwrap()),
                None => not_found(),
            },
            ("PUT", Some(id)) => match state.users.get_mut(&id) {
                Some(user) => {
                    let body = body.cloned().unwrap_or(Value::Null);
                    user.name = body["name"].as_str().unwrap_or_default().to_string();
                    user.email = body["email"].as_str().unwrap_or_default().to_string();
                    user.status = serde_json::from_value(body["status"].clone())
                        .unwrap_or(UserStatus::Active);
                    (StatusCode::OK, serde_json::to_value(&*user).unwrap())
                }
                None => not_found(),
            },
            ("DELETE", Some(id)) => {
                let removed = if self.ignore_deletes {
                    state.users.contains_key(&id)
                } else {
                    state.users.remove(&id).is_some()
                };
                if removed && self.delete_with_body {
                    (StatusCode::NO_CONTENT, json!({"deleted": id}))
                } else if removed {
                    (StatusCode::NO_CONTENT, Value::Null)
                } else {
                    not_found()
                }
            }
            _ => not_found(),
        }
    }
}

fn not_found() -> (StatusCode, Value) {
    (StatusCode::NOT_FOUND, json!({"message": "Resource not found"}))
}

#[async_trait]
impl HttpClientTrait for FakeUserApi {
    async fn get(
        &self,
        path: &str,
        headers: &HeaderMap,
        params: &[(&str, &str)],
    ) -> gorest_http::Result<ResponseEnvelope> {
        self.request(Method::GET, path, None, headers, params).await
    }

    async fn post(
        &self,
        path: &str,
        body: &Value,
        headers: &HeaderMap,
    ) -> gorest_http::Result<ResponseEnvelope> {
        self.request(Method::POST, path, Some(body), headers, &[]).await
    }

    async fn put(
        &self,
        path: &str,
        body: &Value,
        headers: &HeaderMap,
    ) -> gorest_http::Result<ResponseEnvelope> {
        self.request(Method::PUT, path, Some(body), headers, &[]).await
    }

    async fn patch(
        &self,
        path: &str,
        body: &Value,
        headers: &HeaderMap,
    ) -> gorest_http::Result<ResponseEnvelope> {
        self.request(Method::PATCH, path, Some(body), headers, &[]).await
    }

    async fn delete(&self, path: &str, headers: &HeaderMap) -> gorest_http::Result<ResponseEnvelope> {
        self.request(Method::DELETE, path, None, headers, &[]).await
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        headers: &HeaderMap,
        _params: &[(&str, &str)],
    ) -> gorest_http::Result<ResponseEnvelope> {
        let started_at = Instant::now();
        let (status, value) = if headers.contains_key(AUTHORIZATION) {
            self.handle(&method, path, body)
        } else {
            (StatusCode::UNAUTHORIZED, json!({"message": "Authentication failed"}))
        };

        let body = if value.is_null() {
            Vec::new()
        } else {
            serde_json::to_vec(&value).unwrap()
        };
        let envelope = ResponseEnvelope::new(status, HeaderMap::new(), body, started_at, Instant::now());

        if envelope.is_success() {
            Ok(envelope)
        } else {
            Err(HttpError::Response(Box::new(envelope)))
        }
    }
}
