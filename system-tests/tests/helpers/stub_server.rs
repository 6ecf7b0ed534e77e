// system-tests/tests/helpers/stub_server.rs
// ============================================================================
// Module: Qualification Register Stub
// Description: In-process stub of the Qualification Register API.
// Purpose: Give the suite a live HTTP surface with controllable faults.
// Dependencies: axum, serde_json, tokio, uuid
// ============================================================================

//! ## Overview
//! A minimal in-memory rendition of the service under test: the same
//! routes, status codes, camelCase bodies, page envelopes, and
//! FastAPI-shaped error responses. Fault switches let negative suites
//! serve deliberately malformed bodies to prove the failure reports
//! pinpoint the divergence.

use std::collections::BTreeMap;
use std::net::TcpListener as StdTcpListener;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use serde_json::Value;
use serde_json::json;
use tokio::runtime::Builder;
use tokio::sync::oneshot;
use uuid::Uuid;

// ============================================================================
// SECTION: Records
// ============================================================================

/// Stored vendor row.
#[derive(Clone)]
struct VendorRecord {
    id: Uuid,
    kvk_number: String,
    trade_name: String,
    statutory_name: String,
}

/// Stored role row.
#[derive(Clone)]
struct RoleRecord {
    id: Uuid,
    name: String,
    description: Option<String>,
}

/// Stored system type row.
#[derive(Clone)]
struct SystemTypeRecord {
    id: Uuid,
    name: String,
    description: Option<String>,
}

/// Stored protocol version row.
#[derive(Clone)]
struct ProtocolVersionRecord {
    id: Uuid,
    version: String,
    description: String,
}

/// Stored protocol row with its versions.
#[derive(Clone)]
struct ProtocolRecord {
    id: Uuid,
    protocol_type: String,
    name: String,
    description: String,
    versions: Vec<ProtocolVersionRecord>,
}

/// Stored application row referencing its owner and children by id.
#[derive(Clone)]
struct ApplicationRecord {
    id: Uuid,
    vendor_id: Uuid,
    name: String,
    versions: Vec<(Uuid, String)>,
    role_ids: Vec<Uuid>,
    system_type_ids: Vec<Uuid>,
}

/// All in-memory stores.
#[derive(Default)]
struct Stores {
    vendors: BTreeMap<Uuid, VendorRecord>,
    roles: BTreeMap<Uuid, RoleRecord>,
    system_types: BTreeMap<Uuid, SystemTypeRecord>,
    protocols: BTreeMap<Uuid, ProtocolRecord>,
    applications: BTreeMap<Uuid, ApplicationRecord>,
}

// ============================================================================
// SECTION: Options and State
// ============================================================================

/// Fault switches for negative suites.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubOptions {
    /// Omit `tradeName` from vendor create responses.
    pub drop_vendor_trade_name: bool,
    /// Override the status of role create responses.
    pub role_create_status: Option<u16>,
    /// Omit `id` from role create responses.
    pub drop_role_create_id: bool,
    /// Prepend a malformed item to the system-types page.
    pub malformed_system_type_page: bool,
}

/// Shared handler state.
#[derive(Clone)]
struct StubState {
    stores: Arc<Mutex<Stores>>,
    options: StubOptions,
}

// ============================================================================
// SECTION: Handle and Spawn
// ============================================================================

/// Handle for the stub service; shuts the server down on drop.
pub struct StubHandle {
    base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    join: Option<thread::JoinHandle<()>>,
}

impl StubHandle {
    /// Returns the stub base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Drop for StubHandle {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// Spawns the stub with default behavior.
pub async fn spawn_stub() -> Result<StubHandle, String> {
    spawn_stub_with_options(StubOptions::default()).await
}

/// Spawns the stub with fault switches.
#[allow(clippy::unused_async, reason = "Async signature keeps helper API consistent in tests.")]
pub async fn spawn_stub_with_options(options: StubOptions) -> Result<StubHandle, String> {
    let listener =
        StdTcpListener::bind("127.0.0.1:0").map_err(|err| format!("stub bind failed: {err}"))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("stub listener nonblocking failed: {err}"))?;
    let addr = listener.local_addr().map_err(|err| format!("stub local addr failed: {err}"))?;
    let base_url = format!("http://{addr}");

    let state = StubState {
        stores: Arc::new(Mutex::new(Stores::default())),
        options,
    };
    let app = router(state);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = thread::spawn(move || {
        let runtime = match Builder::new_current_thread().enable_all().build() {
            Ok(runtime) => runtime,
            Err(error) => {
                let _ = error;
                return;
            }
        };
        runtime.block_on(async move {
            let listener = match tokio::net::TcpListener::from_std(listener) {
                Ok(listener) => listener,
                Err(error) => {
                    let _ = error;
                    return;
                }
            };
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            let _ = server.await;
        });
    });
    Ok(StubHandle {
        base_url,
        shutdown: Some(shutdown_tx),
        join: Some(join),
    })
}

/// Builds the full route table.
fn router(state: StubState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/vendors", get(list_vendors).post(create_vendor))
        .route("/v1/vendors/{vendor_id}", get(get_vendor).delete(delete_vendor))
        .route("/v1/vendors/kvk_number/{kvk_number}", get(get_vendor_by_kvk))
        .route("/v1/roles", get(list_roles).post(create_role))
        .route("/v1/roles/{role_id}", get(get_role).put(update_role).delete(delete_role))
        .route("/v1/system-types", get(list_system_types).post(create_system_type))
        .route(
            "/v1/system-types/{system_type_id}",
            get(get_system_type).delete(delete_system_type),
        )
        .route("/v1/protocols", get(list_protocols).post(create_protocol))
        .route("/v1/protocols/{protocol_id}", get(get_protocol).delete(delete_protocol))
        .route("/v1/protocols/{protocol_id}/versions", post(create_protocol_version))
        .route(
            "/v1/protocols/{protocol_id}/versions/{version_id}",
            delete(delete_protocol_version),
        )
        .route("/v1/applications", get(list_applications))
        .route("/v1/applications/{application_id}", get(get_application).delete(delete_application))
        .route("/v1/applications/vendors/{vendor_id}", post(register_application))
        .with_state(state)
}

// ============================================================================
// SECTION: Response Helpers
// ============================================================================

/// FastAPI-shaped 422 for a malformed UUID path parameter.
fn uuid_validation_error(param: &str) -> Response {
    let body = json!({
        "detail": [
            {
                "loc": ["path", param],
                "msg": "Input should be a valid UUID, invalid character found",
                "type": "uuid_parsing",
            },
        ],
    });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
}

/// FastAPI-shaped 422 for a missing body field.
fn body_validation_error(field: &str) -> Response {
    let body = json!({
        "detail": [
            {
                "loc": ["body", field],
                "msg": "Field required",
                "type": "missing",
            },
        ],
    });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
}

/// Not-found body with the service's message style.
fn not_found(resource: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": format!("{resource} not found") })))
        .into_response()
}

/// Internal error used when the store lock is poisoned.
fn store_unavailable() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": "store unavailable" })))
        .into_response()
}

/// Parses a UUID path parameter or produces the 422 response.
fn parse_uuid(raw: &str, param: &str) -> Result<Uuid, Response> {
    Uuid::parse_str(raw).map_err(|_| uuid_validation_error(param))
}

/// Reads a required string field from a JSON body.
fn body_string(body: &Value, field: &str) -> Result<String, Response> {
    body.get(field)
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| body_validation_error(field))
}

/// Reads a required string-array field from a JSON body.
fn body_string_list(body: &Value, field: &str) -> Result<Vec<String>, Response> {
    let entries = body.get(field).and_then(Value::as_array).ok_or_else(|| {
        body_validation_error(field)
    })?;
    let mut names = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry.as_str() {
            Some(name) => names.push(name.to_string()),
            None => return Err(body_validation_error(field)),
        }
    }
    Ok(names)
}

/// Runs a closure against the locked stores.
fn with_stores<T>(state: &StubState, f: impl FnOnce(&mut Stores) -> T) -> Result<T, Response> {
    state.stores.lock().map(|mut guard| f(&mut guard)).map_err(|_| store_unavailable())
}

/// Wraps items in the service's page envelope.
fn page(items: Vec<Value>) -> Value {
    let total = items.len();
    json!({ "items": items, "limit": 10, "offset": 0, "total": total })
}

// ============================================================================
// SECTION: DTO Rendering
// ============================================================================

/// Renders a role row.
fn role_dto(role: &RoleRecord) -> Value {
    json!({
        "id": role.id.to_string(),
        "name": role.name,
        "description": role.description,
    })
}

/// Renders a system type row.
fn system_type_dto(system_type: &SystemTypeRecord) -> Value {
    json!({
        "id": system_type.id.to_string(),
        "name": system_type.name,
        "description": system_type.description,
    })
}

/// Renders a protocol version row.
fn protocol_version_dto(version: &ProtocolVersionRecord) -> Value {
    json!({
        "id": version.id.to_string(),
        "version": version.version,
        "description": version.description,
    })
}

/// Renders a protocol row with its versions.
fn protocol_dto(protocol: &ProtocolRecord) -> Value {
    json!({
        "id": protocol.id.to_string(),
        "name": protocol.name,
        "description": protocol.description,
        "protocolType": protocol.protocol_type,
        "versions": protocol.versions.iter().map(protocol_version_dto).collect::<Vec<Value>>(),
    })
}

/// Renders an application without its owning vendor (vendor nesting).
fn application_nested_dto(stores: &Stores, application: &ApplicationRecord) -> Value {
    let roles: Vec<Value> = application
        .role_ids
        .iter()
        .filter_map(|id| stores.roles.get(id))
        .map(role_dto)
        .collect();
    let system_types: Vec<Value> = application
        .system_type_ids
        .iter()
        .filter_map(|id| stores.system_types.get(id))
        .map(system_type_dto)
        .collect();
    let versions: Vec<Value> = application
        .versions
        .iter()
        .map(|(id, version)| json!({ "id": id.to_string(), "version": version }))
        .collect();
    json!({
        "id": application.id.to_string(),
        "name": application.name,
        "versions": versions,
        "roles": roles,
        "systemTypes": system_types,
    })
}

/// Renders a vendor base body, honoring the trade-name fault switch.
fn vendor_base_dto(vendor: &VendorRecord, drop_trade_name: bool) -> Value {
    let mut body = json!({
        "id": vendor.id.to_string(),
        "kvkNumber": vendor.kvk_number,
        "tradeName": vendor.trade_name,
        "statutoryName": vendor.statutory_name,
    });
    if drop_trade_name {
        if let Some(object) = body.as_object_mut() {
            object.remove("tradeName");
        }
    }
    body
}

/// Renders a full vendor body with nested applications.
fn vendor_dto(stores: &Stores, vendor: &VendorRecord, drop_trade_name: bool) -> Value {
    let applications: Vec<Value> = stores
        .applications
        .values()
        .filter(|application| application.vendor_id == vendor.id)
        .map(|application| application_nested_dto(stores, application))
        .collect();
    let mut body = vendor_base_dto(vendor, drop_trade_name);
    if let Some(object) = body.as_object_mut() {
        object.insert("applications".to_string(), Value::Array(applications));
    }
    body
}

/// Renders a full application body with its owning vendor.
fn application_dto(stores: &Stores, application: &ApplicationRecord) -> Value {
    let mut body = application_nested_dto(stores, application);
    let vendor = stores
        .vendors
        .get(&application.vendor_id)
        .map_or(Value::Null, |vendor| vendor_base_dto(vendor, false));
    if let Some(object) = body.as_object_mut() {
        object.insert("vendor".to_string(), vendor);
    }
    body
}

// ============================================================================
// SECTION: Health Handler
// ============================================================================

/// Health probe.
async fn health() -> Response {
    (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response()
}

// ============================================================================
// SECTION: Vendor Handlers
// ============================================================================

/// POST /v1/vendors.
async fn create_vendor(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    let kvk_number = match body_string(&body, "kvkNumber") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let trade_name = match body_string(&body, "tradeName") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let statutory_name = match body_string(&body, "statutoryName") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let record = VendorRecord {
        id: Uuid::new_v4(),
        kvk_number,
        trade_name,
        statutory_name,
    };
    let drop_trade_name = state.options.drop_vendor_trade_name;
    match with_stores(&state, move |stores| {
        let body = vendor_dto(stores, &record, drop_trade_name);
        stores.vendors.insert(record.id, record);
        body
    }) {
        Ok(body) => (StatusCode::CREATED, Json(body)).into_response(),
        Err(response) => response,
    }
}

/// GET /v1/vendors.
async fn list_vendors(State(state): State<StubState>) -> Response {
    match with_stores(&state, |stores| {
        let items: Vec<Value> =
            stores.vendors.values().map(|vendor| vendor_dto(stores, vendor, false)).collect();
        page(items)
    }) {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(response) => response,
    }
}

/// GET /v1/vendors/{vendor_id}.
async fn get_vendor(State(state): State<StubState>, Path(raw_id): Path<String>) -> Response {
    let id = match parse_uuid(&raw_id, "vendor_id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match with_stores(&state, |stores| {
        stores.vendors.get(&id).map(|vendor| vendor_dto(stores, vendor, false))
    }) {
        Ok(Some(body)) => (StatusCode::OK, Json(body)).into_response(),
        Ok(None) => not_found("Vendor"),
        Err(response) => response,
    }
}

/// GET /v1/vendors/kvk_number/{kvk_number}.
async fn get_vendor_by_kvk(State(state): State<StubState>, Path(kvk): Path<String>) -> Response {
    match with_stores(&state, |stores| {
        stores
            .vendors
            .values()
            .find(|vendor| vendor.kvk_number == kvk)
            .map(|vendor| vendor_dto(stores, vendor, false))
    }) {
        Ok(Some(body)) => (StatusCode::OK, Json(body)).into_response(),
        Ok(None) => not_found("Vendor"),
        Err(response) => response,
    }
}

/// DELETE /v1/vendors/{vendor_id}.
async fn delete_vendor(State(state): State<StubState>, Path(raw_id): Path<String>) -> Response {
    let id = match parse_uuid(&raw_id, "vendor_id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    enum Outcome {
        Deleted(Value),
        HasApplications,
        Missing,
    }
    match with_stores(&state, |stores| {
        if !stores.vendors.contains_key(&id) {
            return Outcome::Missing;
        }
        if stores.applications.values().any(|application| application.vendor_id == id) {
            return Outcome::HasApplications;
        }
        stores.vendors.remove(&id).map_or(Outcome::Missing, |vendor| {
            Outcome::Deleted(vendor_base_dto(&vendor, false))
        })
    }) {
        Ok(Outcome::Deleted(mut body)) => {
            if let Some(object) = body.as_object_mut() {
                object.insert("applications".to_string(), Value::Array(Vec::new()));
            }
            (StatusCode::OK, Json(body)).into_response()
        }
        Ok(Outcome::HasApplications) => (
            StatusCode::METHOD_NOT_ALLOWED,
            Json(json!({ "detail": "Vendor cannot be deleted" })),
        )
            .into_response(),
        Ok(Outcome::Missing) => not_found("Vendor"),
        Err(response) => response,
    }
}

// ============================================================================
// SECTION: Role Handlers
// ============================================================================

/// POST /v1/roles.
async fn create_role(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    let name = match body_string(&body, "name") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let description = body.get("description").and_then(Value::as_str).map(ToString::to_string);
    let record = RoleRecord {
        id: Uuid::new_v4(),
        name,
        description,
    };
    let status = state
        .options
        .role_create_status
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::CREATED);
    let drop_id = state.options.drop_role_create_id;
    match with_stores(&state, move |stores| {
        let mut body = role_dto(&record);
        if drop_id {
            if let Some(object) = body.as_object_mut() {
                object.remove("id");
            }
        }
        stores.roles.insert(record.id, record);
        body
    }) {
        Ok(body) => (status, Json(body)).into_response(),
        Err(response) => response,
    }
}

/// GET /v1/roles.
async fn list_roles(State(state): State<StubState>) -> Response {
    match with_stores(&state, |stores| {
        page(stores.roles.values().map(role_dto).collect())
    }) {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(response) => response,
    }
}

/// GET /v1/roles/{role_id}.
async fn get_role(State(state): State<StubState>, Path(raw_id): Path<String>) -> Response {
    let id = match parse_uuid(&raw_id, "role_id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match with_stores(&state, |stores| stores.roles.get(&id).map(role_dto)) {
        Ok(Some(body)) => (StatusCode::OK, Json(body)).into_response(),
        Ok(None) => not_found("Role"),
        Err(response) => response,
    }
}

/// PUT /v1/roles/{role_id}; answers 201 like the origin service.
async fn update_role(
    State(state): State<StubState>,
    Path(raw_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let id = match parse_uuid(&raw_id, "role_id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let description = body.get("description").and_then(Value::as_str).map(ToString::to_string);
    match with_stores(&state, move |stores| {
        stores.roles.get_mut(&id).map(|role| {
            role.description = description;
            role_dto(role)
        })
    }) {
        Ok(Some(body)) => (StatusCode::CREATED, Json(body)).into_response(),
        Ok(None) => not_found("Role"),
        Err(response) => response,
    }
}

/// DELETE /v1/roles/{role_id}; returns the deleted role.
async fn delete_role(State(state): State<StubState>, Path(raw_id): Path<String>) -> Response {
    let id = match parse_uuid(&raw_id, "role_id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match with_stores(&state, |stores| stores.roles.remove(&id).as_ref().map(role_dto)) {
        Ok(Some(body)) => (StatusCode::OK, Json(body)).into_response(),
        Ok(None) => not_found("Role"),
        Err(response) => response,
    }
}

// ============================================================================
// SECTION: System Type Handlers
// ============================================================================

/// POST /v1/system-types.
async fn create_system_type(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    let name = match body_string(&body, "name") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let description = body.get("description").and_then(Value::as_str).map(ToString::to_string);
    let record = SystemTypeRecord {
        id: Uuid::new_v4(),
        name,
        description,
    };
    match with_stores(&state, move |stores| {
        let body = system_type_dto(&record);
        stores.system_types.insert(record.id, record);
        body
    }) {
        Ok(body) => (StatusCode::CREATED, Json(body)).into_response(),
        Err(response) => response,
    }
}

/// GET /v1/system-types; honors the malformed-page fault switch.
async fn list_system_types(State(state): State<StubState>) -> Response {
    let malformed = state.options.malformed_system_type_page;
    match with_stores(&state, |stores| {
        let mut items: Vec<Value> = stores.system_types.values().map(system_type_dto).collect();
        if malformed {
            items.insert(0, json!({ "id": Uuid::new_v4().to_string() }));
        }
        page(items)
    }) {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(response) => response,
    }
}

/// GET /v1/system-types/{system_type_id}.
async fn get_system_type(State(state): State<StubState>, Path(raw_id): Path<String>) -> Response {
    let id = match parse_uuid(&raw_id, "system_type_id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match with_stores(&state, |stores| stores.system_types.get(&id).map(system_type_dto)) {
        Ok(Some(body)) => (StatusCode::OK, Json(body)).into_response(),
        Ok(None) => not_found("System type"),
        Err(response) => response,
    }
}

/// DELETE /v1/system-types/{system_type_id}; 204 with an empty body.
async fn delete_system_type(
    State(state): State<StubState>,
    Path(raw_id): Path<String>,
) -> Response {
    let id = match parse_uuid(&raw_id, "system_type_id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match with_stores(&state, |stores| stores.system_types.remove(&id).is_some()) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found("System type"),
        Err(response) => response,
    }
}

// ============================================================================
// SECTION: Protocol Handlers
// ============================================================================

/// POST /v1/protocols.
async fn create_protocol(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    let protocol_type = match body_string(&body, "protocolType") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let name = match body_string(&body, "name") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let description = match body_string(&body, "description") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let record = ProtocolRecord {
        id: Uuid::new_v4(),
        protocol_type,
        name,
        description,
        versions: Vec::new(),
    };
    match with_stores(&state, move |stores| {
        let body = protocol_dto(&record);
        stores.protocols.insert(record.id, record);
        body
    }) {
        Ok(body) => (StatusCode::CREATED, Json(body)).into_response(),
        Err(response) => response,
    }
}

/// GET /v1/protocols.
async fn list_protocols(State(state): State<StubState>) -> Response {
    match with_stores(&state, |stores| {
        page(stores.protocols.values().map(protocol_dto).collect())
    }) {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(response) => response,
    }
}

/// GET /v1/protocols/{protocol_id}.
async fn get_protocol(State(state): State<StubState>, Path(raw_id): Path<String>) -> Response {
    let id = match parse_uuid(&raw_id, "protocol_id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match with_stores(&state, |stores| stores.protocols.get(&id).map(protocol_dto)) {
        Ok(Some(body)) => (StatusCode::OK, Json(body)).into_response(),
        Ok(None) => not_found("Protocol"),
        Err(response) => response,
    }
}

/// DELETE /v1/protocols/{protocol_id}; 204 with an empty body.
async fn delete_protocol(State(state): State<StubState>, Path(raw_id): Path<String>) -> Response {
    let id = match parse_uuid(&raw_id, "protocol_id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match with_stores(&state, |stores| stores.protocols.remove(&id).is_some()) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found("Protocol"),
        Err(response) => response,
    }
}

/// POST /v1/protocols/{protocol_id}/versions.
async fn create_protocol_version(
    State(state): State<StubState>,
    Path(raw_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let id = match parse_uuid(&raw_id, "protocol_id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let version = match body_string(&body, "version") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let description = match body_string(&body, "description") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let record = ProtocolVersionRecord {
        id: Uuid::new_v4(),
        version,
        description,
    };
    match with_stores(&state, move |stores| {
        stores.protocols.get_mut(&id).map(|protocol| {
            let body = protocol_version_dto(&record);
            protocol.versions.push(record);
            body
        })
    }) {
        Ok(Some(body)) => (StatusCode::CREATED, Json(body)).into_response(),
        Ok(None) => not_found("Protocol"),
        Err(response) => response,
    }
}

/// DELETE /v1/protocols/{protocol_id}/versions/{version_id}; 204 empty.
async fn delete_protocol_version(
    State(state): State<StubState>,
    Path((raw_pid, raw_vid)): Path<(String, String)>,
) -> Response {
    let protocol_id = match parse_uuid(&raw_pid, "protocol_id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let version_id = match parse_uuid(&raw_vid, "version_id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    enum Outcome {
        Deleted,
        MissingProtocol,
        MissingVersion,
    }
    match with_stores(&state, |stores| {
        let Some(protocol) = stores.protocols.get_mut(&protocol_id) else {
            return Outcome::MissingProtocol;
        };
        let before = protocol.versions.len();
        protocol.versions.retain(|version| version.id != version_id);
        if protocol.versions.len() == before {
            Outcome::MissingVersion
        } else {
            Outcome::Deleted
        }
    }) {
        Ok(Outcome::Deleted) => StatusCode::NO_CONTENT.into_response(),
        Ok(Outcome::MissingProtocol) => not_found("Protocol"),
        Ok(Outcome::MissingVersion) => not_found("Protocol version"),
        Err(response) => response,
    }
}

// ============================================================================
// SECTION: Application Handlers
// ============================================================================

/// POST /v1/applications/vendors/{vendor_id}.
async fn register_application(
    State(state): State<StubState>,
    Path(raw_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let vendor_id = match parse_uuid(&raw_id, "vendor_id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let name = match body_string(&body, "name") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let version = match body_string(&body, "version") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let role_names = match body_string_list(&body, "roles") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let system_type_names = match body_string_list(&body, "systemTypes") {
        Ok(value) => value,
        Err(response) => return response,
    };
    enum Outcome {
        Registered(Value),
        MissingVendor,
        MissingRole,
        MissingSystemType,
    }
    match with_stores(&state, move |stores| {
        if !stores.vendors.contains_key(&vendor_id) {
            return Outcome::MissingVendor;
        }
        let mut role_ids = Vec::with_capacity(role_names.len());
        for role_name in &role_names {
            match stores.roles.values().find(|role| role.name == *role_name) {
                Some(role) => role_ids.push(role.id),
                None => return Outcome::MissingRole,
            }
        }
        let mut system_type_ids = Vec::with_capacity(system_type_names.len());
        for system_type_name in &system_type_names {
            match stores
                .system_types
                .values()
                .find(|system_type| system_type.name == *system_type_name)
            {
                Some(system_type) => system_type_ids.push(system_type.id),
                None => return Outcome::MissingSystemType,
            }
        }
        let record = ApplicationRecord {
            id: Uuid::new_v4(),
            vendor_id,
            name,
            versions: vec![(Uuid::new_v4(), version)],
            role_ids,
            system_type_ids,
        };
        let body = application_dto(stores, &record);
        stores.applications.insert(record.id, record);
        Outcome::Registered(body)
    }) {
        Ok(Outcome::Registered(body)) => (StatusCode::OK, Json(body)).into_response(),
        Ok(Outcome::MissingVendor) => not_found("Vendor"),
        Ok(Outcome::MissingRole) => not_found("Role"),
        Ok(Outcome::MissingSystemType) => not_found("System type"),
        Err(response) => response,
    }
}

/// GET /v1/applications.
async fn list_applications(State(state): State<StubState>) -> Response {
    match with_stores(&state, |stores| {
        let items: Vec<Value> = stores
            .applications
            .values()
            .map(|application| application_dto(stores, application))
            .collect();
        page(items)
    }) {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(response) => response,
    }
}

/// GET /v1/applications/{application_id}.
async fn get_application(State(state): State<StubState>, Path(raw_id): Path<String>) -> Response {
    let id = match parse_uuid(&raw_id, "application_id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match with_stores(&state, |stores| {
        stores.applications.get(&id).map(|application| application_dto(stores, application))
    }) {
        Ok(Some(body)) => (StatusCode::OK, Json(body)).into_response(),
        Ok(None) => not_found("Application"),
        Err(response) => response,
    }
}

/// DELETE /v1/applications/{application_id}; returns the deleted resource.
async fn delete_application(
    State(state): State<StubState>,
    Path(raw_id): Path<String>,
) -> Response {
    let id = match parse_uuid(&raw_id, "application_id") {
        Ok(id) => id,
        Err(response) => return response,
    };
    match with_stores(&state, |stores| {
        stores.applications.remove(&id).map(|application| application_dto(stores, &application))
    }) {
        Ok(Some(body)) => (StatusCode::OK, Json(body)).into_response(),
        Ok(None) => not_found("Application"),
        Err(response) => response,
    }
}
