//! In-memory fake of the Mailgun endpoints used by the integration tests.
//!
//! Every route requires HTTP Basic auth with user `api` and the configured
//! key. Failures are answered with Mailgun's `{"message": ...}` envelope.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, RawQuery, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const MOCK_API_KEY: &str = "key-mock";

#[derive(Clone, Debug, Serialize)]
pub struct StoredMessage {
    pub to: Vec<String>,
    pub fields: BTreeMap<String, String>,
    pub mime: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct MailingList {
    pub address: String,
    pub name: String,
    pub members: BTreeMap<String, Value>,
}

#[derive(Default)]
pub struct Store {
    pub domains: BTreeMap<String, Value>,
    pub lists: BTreeMap<String, MailingList>,
    pub messages: BTreeMap<String, StoredMessage>,
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
struct AppState {
    api_key: Arc<str>,
    db: Db,
}

type Fields = Form<Vec<(String, String)>>;
type ApiResult = Result<Json<Value>, ApiFailure>;

/// Error answered as `{"message": ...}`.
#[derive(Debug)]
pub struct ApiFailure(StatusCode, String);

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (self.0, Json(json!({ "message": self.1 }))).into_response()
    }
}

fn fail(status: StatusCode, message: impl Into<String>) -> ApiFailure {
    ApiFailure(status, message.into())
}

pub fn app() -> Router {
    app_with_key(MOCK_API_KEY)
}

pub fn app_with_key(api_key: &str) -> Router {
    let state = AppState {
        api_key: Arc::from(api_key),
        db: Arc::new(RwLock::new(Store::default())),
    };

    Router::new()
        .route("/v3/domains", get(list_domains).post(create_domain))
        .route("/v3/domains/{name}", get(get_domain).delete(delete_domain))
        .route(
            "/v3/domains/{name}/messages/{key}",
            get(get_message).delete(delete_message),
        )
        .route("/v3/{domain}/messages", post(send_message))
        .route("/v3/{domain}/messages.mime", post(send_mime))
        .route("/v3/{domain}/stats/total", get(total_stats))
        .route("/v4/address/validate", get(validate_address))
        .route("/v3/lists", post(create_list))
        .route("/v3/lists/{address}", get(get_list).put(update_list).delete(delete_list))
        .route("/v3/lists/{address}/members", post(add_member))
        .route(
            "/v3/lists/{address}/members/{member}",
            get(get_member).put(update_member).delete(delete_member),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_basic_auth))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn require_basic_auth(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let expected = format!("Basic {}", STANDARD.encode(format!("api:{}", state.api_key)));
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);

    if authorized {
        next.run(request).await
    } else {
        fail(StatusCode::UNAUTHORIZED, "Invalid private key").into_response()
    }
}

fn field<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
    fields.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
}

fn require<'a>(fields: &'a [(String, String)], name: &str) -> Result<&'a str, ApiFailure> {
    field(fields, name).ok_or_else(|| fail(StatusCode::BAD_REQUEST, format!("'{name}' parameter is missing")))
}

fn truthy(value: &str) -> bool {
    !matches!(value, "no" | "false")
}

async fn require_domain(db: &Db, domain: &str) -> Result<(), ApiFailure> {
    if db.read().await.domains.contains_key(domain) {
        Ok(())
    } else {
        Err(fail(StatusCode::NOT_FOUND, format!("Domain not found: {domain}")))
    }
}

// --- domains ---

async fn list_domains(State(state): State<AppState>) -> Json<Value> {
    let db = state.db.read().await;
    let items: Vec<&Value> = db.domains.values().collect();
    Json(json!({ "total_count": items.len(), "items": items }))
}

async fn create_domain(State(state): State<AppState>, Form(fields): Fields) -> ApiResult {
    let name = require(&fields, "name")?.to_string();
    let mut db = state.db.write().await;
    if db.domains.contains_key(&name) {
        return Err(fail(StatusCode::BAD_REQUEST, format!("Domain {name} already exists")));
    }
    let domain = json!({ "name": name, "state": "unverified" });
    db.domains.insert(name, domain.clone());
    Ok(Json(json!({ "message": "Domain has been created", "domain": domain })))
}

async fn get_domain(State(state): State<AppState>, Path(name): Path<String>) -> ApiResult {
    let db = state.db.read().await;
    db.domains
        .get(&name)
        .map(|domain| Json(json!({ "domain": domain })))
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Domain not found"))
}

async fn delete_domain(State(state): State<AppState>, Path(name): Path<String>) -> ApiResult {
    let mut db = state.db.write().await;
    db.domains
        .remove(&name)
        .map(|_| Json(json!({ "message": "Domain has been deleted" })))
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Domain not found"))
}

// --- messages ---

fn queued(db: &mut Store, domain: &str, message: StoredMessage) -> Json<Value> {
    let key = Uuid::new_v4().simple().to_string();
    db.messages.insert(key.clone(), message);
    Json(json!({ "id": format!("<{key}@{domain}>"), "key": key, "message": "Queued. Thank you." }))
}

async fn send_message(State(state): State<AppState>, Path(domain): Path<String>, Form(fields): Fields) -> ApiResult {
    require_domain(&state.db, &domain).await?;
    let to: Vec<String> = fields
        .iter()
        .filter(|(k, _)| k == "to")
        .map(|(_, v)| v.clone())
        .collect();
    if to.is_empty() {
        return Err(fail(StatusCode::BAD_REQUEST, "'to' parameter is missing"));
    }
    let message = StoredMessage {
        to,
        fields: fields.into_iter().filter(|(k, _)| k != "to").collect(),
        mime: None,
    };
    Ok(queued(&mut *state.db.write().await, &domain, message))
}

async fn send_mime(State(state): State<AppState>, Path(domain): Path<String>, mut multipart: Multipart) -> ApiResult {
    require_domain(&state.db, &domain).await?;
    let mut to = None;
    let mut mime = None;
    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| fail(StatusCode::BAD_REQUEST, e.body_text()))?
    {
        let name = part.name().unwrap_or_default().to_string();
        let text = part
            .text()
            .await
            .map_err(|e| fail(StatusCode::BAD_REQUEST, e.body_text()))?;
        match name.as_str() {
            "to" => to = Some(text),
            "message" => mime = Some(text),
            _ => {}
        }
    }
    let to = to.ok_or_else(|| fail(StatusCode::BAD_REQUEST, "'to' parameter is missing"))?;
    let mime = mime.ok_or_else(|| fail(StatusCode::BAD_REQUEST, "'message' parameter is missing"))?;
    let message = StoredMessage {
        to: to.split(',').map(str::to_string).collect(),
        fields: BTreeMap::new(),
        mime: Some(mime),
    };
    Ok(queued(&mut *state.db.write().await, &domain, message))
}

fn render_mime(message: &StoredMessage) -> String {
    if let Some(mime) = &message.mime {
        return mime.clone();
    }
    let get = |k: &str| message.fields.get(k).map(String::as_str).unwrap_or_default();
    format!(
        "From: {}\r\nTo: {}\r\nSubject: {}\r\n\r\n{}",
        get("from"),
        message.to.join(", "),
        get("subject"),
        get("text")
    )
}

async fn get_message(
    State(state): State<AppState>,
    Path((_domain, key)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, ApiFailure> {
    let db = state.db.read().await;
    let message = db
        .messages
        .get(&key)
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Message not found"))?;

    let wants_mime = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("message/rfc2822"));

    if wants_mime {
        Ok(([(header::CONTENT_TYPE, "message/rfc2822")], render_mime(message)).into_response())
    } else {
        Ok(Json(json!(message)).into_response())
    }
}

async fn delete_message(State(state): State<AppState>, Path((_domain, key)): Path<(String, String)>) -> ApiResult {
    let mut db = state.db.write().await;
    db.messages
        .remove(&key)
        .map(|_| Json(json!({ "message": "Message has been deleted" })))
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Message not found"))
}

// --- stats and validation ---

fn query_values(query: Option<&str>, name: &str) -> Vec<String> {
    url::form_urlencoded::parse(query.unwrap_or_default().as_bytes())
        .filter(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
        .collect()
}

async fn total_stats(State(state): State<AppState>, Path(domain): Path<String>, RawQuery(query): RawQuery) -> ApiResult {
    require_domain(&state.db, &domain).await?;
    let events = query_values(query.as_deref(), "event");
    if events.is_empty() {
        return Err(fail(StatusCode::BAD_REQUEST, "'event' parameter is required"));
    }
    let stats: Value = events.iter().map(|e| (e.clone(), json!({ "total": 0 }))).collect();
    Ok(Json(json!({ "events": events, "resolution": "day", "stats": [stats] })))
}

async fn validate_address(RawQuery(query): RawQuery) -> ApiResult {
    let address = query_values(query.as_deref(), "address")
        .into_iter()
        .next()
        .ok_or_else(|| fail(StatusCode::BAD_REQUEST, "'address' parameter is missing"))?;
    let deliverable = address
        .rsplit_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    Ok(Json(json!({
        "address": address,
        "result": if deliverable { "deliverable" } else { "undeliverable" },
        "risk": if deliverable { "low" } else { "high" },
    })))
}

// --- mailing lists ---

fn list_json(list: &MailingList) -> Value {
    json!({ "address": list.address, "name": list.name, "members_count": list.members.len() })
}

async fn create_list(State(state): State<AppState>, Form(fields): Fields) -> ApiResult {
    let address = require(&fields, "address")?.to_string();
    let list = MailingList {
        name: field(&fields, "name").unwrap_or_default().to_string(),
        address: address.clone(),
        members: BTreeMap::new(),
    };
    let body = list_json(&list);
    state.db.write().await.lists.insert(address, list);
    Ok(Json(json!({ "message": "Mailing list has been created", "list": body })))
}

async fn get_list(State(state): State<AppState>, Path(address): Path<String>) -> ApiResult {
    let db = state.db.read().await;
    let list = db
        .lists
        .get(&address)
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Mailing list not found"))?;
    Ok(Json(json!({ "list": list_json(list) })))
}

async fn update_list(State(state): State<AppState>, Path(address): Path<String>, Form(fields): Fields) -> ApiResult {
    let mut db = state.db.write().await;
    let list = db
        .lists
        .get_mut(&address)
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Mailing list not found"))?;
    if let Some(name) = field(&fields, "name") {
        list.name = name.to_string();
    }
    Ok(Json(json!({ "message": "Mailing list has been updated", "list": list_json(list) })))
}

async fn delete_list(State(state): State<AppState>, Path(address): Path<String>) -> ApiResult {
    let mut db = state.db.write().await;
    db.lists
        .remove(&address)
        .map(|_| Json(json!({ "message": "Mailing list has been deleted", "address": address })))
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Mailing list not found"))
}

async fn add_member(State(state): State<AppState>, Path(address): Path<String>, Form(fields): Fields) -> ApiResult {
    let member = require(&fields, "address")?.to_string();
    let mut db = state.db.write().await;
    let list = db
        .lists
        .get_mut(&address)
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Mailing list not found"))?;
    let body = json!({
        "address": member,
        "name": field(&fields, "name").unwrap_or_default(),
        "subscribed": field(&fields, "subscribed").map_or(true, truthy),
    });
    list.members.insert(member, body.clone());
    Ok(Json(json!({ "message": "Mailing list member has been created", "member": body })))
}

async fn get_member(State(state): State<AppState>, Path((address, member)): Path<(String, String)>) -> ApiResult {
    let db = state.db.read().await;
    db.lists
        .get(&address)
        .and_then(|list| list.members.get(&member))
        .map(|m| Json(json!({ "member": m })))
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Member not found"))
}

async fn update_member(
    State(state): State<AppState>,
    Path((address, member)): Path<(String, String)>,
    Form(fields): Fields,
) -> ApiResult {
    let mut db = state.db.write().await;
    let entry = db
        .lists
        .get_mut(&address)
        .and_then(|list| list.members.get_mut(&member))
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Member not found"))?;
    if let Some(subscribed) = field(&fields, "subscribed") {
        entry["subscribed"] = json!(truthy(subscribed));
    }
    if let Some(name) = field(&fields, "name") {
        entry["name"] = json!(name);
    }
    Ok(Json(json!({ "message": "Mailing list member has been updated", "member": entry.clone() })))
}

async fn delete_member(State(state): State<AppState>, Path((address, member)): Path<(String, String)>) -> ApiResult {
    let mut db = state.db.write().await;
    db.lists
        .get_mut(&address)
        .and_then(|list| list.members.remove(&member))
        .map(|_| Json(json!({ "message": "Mailing list member has been deleted", "member": { "address": member } })))
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Member not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_values_keeps_repeats_in_order() {
        let events = query_values(Some("event=accepted&limit=1&event=delivered"), "event");
        assert_eq!(events, vec!["accepted", "delivered"]);
    }

    #[test]
    fn query_values_decodes_components() {
        assert_eq!(
            query_values(Some("address=user%40example.com"), "address"),
            vec!["user@example.com"]
        );
        assert!(query_values(None, "address").is_empty());
    }

    #[test]
    fn truthy_accepts_yes_and_true() {
        assert!(truthy("yes"));
        assert!(truthy("true"));
        assert!(!truthy("no"));
        assert!(!truthy("false"));
    }

    #[test]
    fn render_mime_prefers_stored_mime() {
        let message = StoredMessage {
            to: vec!["a@example.com".to_string()],
            fields: BTreeMap::new(),
            mime: Some("Subject: raw\r\n\r\nbody".to_string()),
        };
        assert_eq!(render_mime(&message), "Subject: raw\r\n\r\nbody");
    }

    #[test]
    fn render_mime_builds_from_fields() {
        let message = StoredMessage {
            to: vec!["a@example.com".to_string(), "b@example.com".to_string()],
            fields: [("subject", "Hi"), ("text", "Hello"), ("from", "me@example.com")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            mime: None,
        };
        assert_eq!(
            render_mime(&message),
            "From: me@example.com\r\nTo: a@example.com, b@example.com\r\nSubject: Hi\r\n\r\nHello"
        );
    }

    #[test]
    fn failure_serializes_as_envelope() {
        let response = fail(StatusCode::NOT_FOUND, "Domain not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
