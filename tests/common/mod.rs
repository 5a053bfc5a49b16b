//! In-process stub of the backend row service for integration tests.
//!
//! Emulates just enough of the REST surface the app uses: per-table
//! select/insert/update/delete with eq/gte/in filters, ordering, limits,
//! count-mode responses via Content-Range, and the auth sub-service's
//! signup/logout endpoints. Rows live in a shared in-memory map so tests
//! can seed and inspect state directly.

#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct StubState {
    tables: Arc<Mutex<HashMap<String, Vec<Value>>>>,
    fail_inserts: Arc<Mutex<HashSet<String>>>,
    request_log: Arc<Mutex<Vec<String>>>,
}

pub struct StubBackend {
    pub url: String,
    state: StubState,
}

pub async fn spawn_stub() -> StubBackend {
    let state = StubState::default();
    let app = Router::new()
        .route("/rest/v1/{table}", any(rest_handler))
        .route("/auth/v1/signup", post(signup))
        .route("/auth/v1/logout", post(|| async { StatusCode::NO_CONTENT }))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubBackend {
        url: format!("http://{}", addr),
        state,
    }
}

impl StubBackend {
    /// Seed a row, filling in `id` and `created_at` when absent.
    pub fn seed(&self, table: &str, mut row: Value) -> String {
        let id = ensure_defaults(&mut row);
        self.state
            .tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(row);
        id
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.state
            .tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// Mutate every row of a table in place.
    pub fn mutate_rows(&self, table: &str, f: impl Fn(&mut Value)) {
        if let Some(rows) = self.state.tables.lock().unwrap().get_mut(table) {
            for row in rows.iter_mut() {
                f(row);
            }
        }
    }

    /// Make every insert into the table fail with a 500.
    pub fn fail_inserts_on(&self, table: &str) {
        self.state
            .fail_inserts
            .lock()
            .unwrap()
            .insert(table.to_string());
    }

    pub fn request_count(&self, needle: &str) -> usize {
        self.state
            .request_log
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.contains(needle))
            .count()
    }
}

fn ensure_defaults(row: &mut Value) -> String {
    let obj = row.as_object_mut().expect("row must be a JSON object");
    if !obj.contains_key("id") {
        obj.insert("id".into(), json!(uuid::Uuid::now_v7().to_string()));
    }
    if !obj.contains_key("created_at") {
        obj.insert("created_at".into(), json!(Utc::now().to_rfc3339()));
    }
    obj["id"].as_str().unwrap_or_default().to_string()
}

enum Op {
    Eq(String),
    Gte(String),
    In(Vec<String>),
}

struct Filter {
    column: String,
    op: Op,
}

struct ParsedQuery {
    filters: Vec<Filter>,
    order: Vec<(String, bool)>,
    limit: Option<usize>,
}

fn parse_query(params: &[(String, String)]) -> ParsedQuery {
    let mut parsed = ParsedQuery {
        filters: Vec::new(),
        order: Vec::new(),
        limit: None,
    };

    for (key, value) in params {
        match key.as_str() {
            "order" => {
                parsed.order = value
                    .split(',')
                    .filter_map(|spec| {
                        let (column, dir) = spec.rsplit_once('.')?;
                        Some((column.to_string(), dir == "asc"))
                    })
                    .collect();
            }
            "limit" => parsed.limit = value.parse().ok(),
            "select" => {}
            column => {
                let op = if let Some(v) = value.strip_prefix("eq.") {
                    Op::Eq(v.to_string())
                } else if let Some(v) = value.strip_prefix("gte.") {
                    Op::Gte(v.to_string())
                } else if let Some(v) = value
                    .strip_prefix("in.(")
                    .and_then(|v| v.strip_suffix(')'))
                {
                    Op::In(v.split(',').map(|s| s.trim_matches('"').to_string()).collect())
                } else {
                    continue;
                };
                parsed.filters.push(Filter {
                    column: column.to_string(),
                    op,
                });
            }
        }
    }

    parsed
}

fn value_eq(field: &Value, target: &str) -> bool {
    match field {
        Value::String(s) => s == target,
        Value::Number(n) => target
            .parse::<f64>()
            .map(|t| n.as_f64() == Some(t))
            .unwrap_or(false),
        Value::Bool(b) => target.parse::<bool>().map(|t| *b == t).unwrap_or(false),
        _ => false,
    }
}

fn value_gte(field: &Value, target: &str) -> bool {
    match field {
        Value::String(s) => s.as_str() >= target,
        Value::Number(n) => target
            .parse::<f64>()
            .map(|t| n.as_f64().unwrap_or(f64::MIN) >= t)
            .unwrap_or(false),
        _ => false,
    }
}

fn row_matches(row: &Value, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| {
        let field = row.get(&filter.column).unwrap_or(&Value::Null);
        match &filter.op {
            Op::Eq(v) => value_eq(field, v),
            Op::Gte(v) => value_gte(field, v),
            Op::In(vs) => vs.iter().any(|v| value_eq(field, v)),
        }
    })
}

fn compare_values(a: &Value, b: &Value) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

fn apply_order(rows: &mut [Value], order: &[(String, bool)]) {
    rows.sort_by(|a, b| {
        for (column, ascending) in order {
            let av = a.get(column).unwrap_or(&Value::Null);
            let bv = b.get(column).unwrap_or(&Value::Null);
            let cmp = compare_values(av, bv);
            let cmp = if *ascending { cmp } else { cmp.reverse() };
            if cmp != std::cmp::Ordering::Equal {
                return cmp;
            }
        }
        std::cmp::Ordering::Equal
    });
}

async fn rest_handler(
    State(state): State<StubState>,
    Path(table): Path<String>,
    method: Method,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Response {
    let body: Option<Value> = if body.is_empty() {
        None
    } else {
        serde_json::from_slice(&body).ok()
    };
    state
        .request_log
        .lock()
        .unwrap()
        .push(format!("{} /rest/v1/{}", method, table));

    let query = parse_query(&params);

    match method {
        Method::GET => {
            let tables = state.tables.lock().unwrap();
            let mut rows: Vec<Value> = tables
                .get(&table)
                .map(|rows| {
                    rows.iter()
                        .filter(|row| row_matches(row, &query.filters))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();
            apply_order(&mut rows, &query.order);

            let total = rows.len();
            if let Some(limit) = query.limit {
                rows.truncate(limit);
            }

            let wants_count = headers
                .get("prefer")
                .and_then(|v| v.to_str().ok())
                .map(|v| v.contains("count=exact"))
                .unwrap_or(false);
            if wants_count {
                rows.truncate(1);
            }

            let mut response = (StatusCode::OK, Json(rows)).into_response();
            if wants_count {
                response.headers_mut().insert(
                    "Content-Range",
                    HeaderValue::from_str(&format!("0-0/{}", total)).unwrap(),
                );
            }
            response
        }
        Method::POST => {
            if state.fail_inserts.lock().unwrap().contains(&table) {
                return (StatusCode::INTERNAL_SERVER_ERROR, "insert disabled").into_response();
            }
            let Some(payload) = body else {
                return (StatusCode::BAD_REQUEST, "missing body").into_response();
            };
            let mut inserted = Vec::new();
            let rows = match payload {
                Value::Array(rows) => rows,
                row => vec![row],
            };
            let mut tables = state.tables.lock().unwrap();
            let stored = tables.entry(table.clone()).or_default();
            for mut row in rows {
                ensure_defaults(&mut row);
                stored.push(row.clone());
                inserted.push(row);
            }
            (StatusCode::CREATED, Json(inserted)).into_response()
        }
        Method::PATCH => {
            let Some(patch) = body else {
                return (StatusCode::BAD_REQUEST, "missing body").into_response();
            };
            let mut tables = state.tables.lock().unwrap();
            let mut updated = Vec::new();
            if let Some(rows) = tables.get_mut(&table) {
                for row in rows.iter_mut() {
                    if row_matches(row, &query.filters) {
                        if let (Some(obj), Some(patch_obj)) =
                            (row.as_object_mut(), patch.as_object())
                        {
                            for (key, value) in patch_obj {
                                obj.insert(key.clone(), value.clone());
                            }
                        }
                        updated.push(row.clone());
                    }
                }
            }
            (StatusCode::OK, Json(updated)).into_response()
        }
        Method::DELETE => {
            let mut tables = state.tables.lock().unwrap();
            if let Some(rows) = tables.get_mut(&table) {
                rows.retain(|row| !row_matches(row, &query.filters));
            }
            StatusCode::NO_CONTENT.into_response()
        }
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}

async fn signup(State(state): State<StubState>, Json(payload): Json<Value>) -> Response {
    let email = payload["email"].as_str().unwrap_or_default().to_string();

    let mut tables = state.tables.lock().unwrap();
    let users = tables.entry("auth_users".to_string()).or_default();
    if users.iter().any(|u| u["email"] == json!(email)) {
        return (StatusCode::UNPROCESSABLE_ENTITY, "User already registered").into_response();
    }

    let id = uuid::Uuid::now_v7().to_string();
    users.push(json!({ "id": id, "email": email }));
    (StatusCode::OK, Json(json!({ "id": id, "email": email }))).into_response()
}
