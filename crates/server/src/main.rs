// Copyright (C) 2026 Marten Hale
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::Date;
use tokio::sync::Mutex;
use tracing::{error, info};

use roomledger_api::{
    AdjustSoldRequest, AdjustSoldResponse, ApiError, BulkUpdateRequest, BulkUpdateResponse,
    CheckAvailabilityRequest, CheckAvailabilityResponse, DeleteInventoryRequest,
    DeleteInventoryResponse, GetCalendarRequest, GetCalendarResponse, GetInventoryRequest,
    GetInventoryResponse, RegisterPropertyRequest, RegisterPropertyResponse,
    RegisterRoomTypeRequest, RegisterRoomTypeResponse, SetFlagsRequest, SetFlagsResponse,
    bulk_update, check_availability, decrement_sold, delete_inventory, get_calendar,
    get_inventory, increment_sold, register_property, register_room_type, set_flags,
};
use roomledger_persistence::SqlitePersistence;

/// Room Ledger Server - HTTP server for the room inventory engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access. The single guarded connection serializes all
/// requests; correctness does not depend on it, as every mutation
/// re-validates inside its own database transaction. A connection pool
/// would narrow the lock scope without changing those guarantees.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for the catalog and the inventory ledger.
    persistence: Arc<Mutex<SqlitePersistence>>,
}

/// Uniform response envelope for every endpoint.
///
/// Success responses carry `data`; failures carry `error` and an
/// appropriate HTTP status.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Envelope<T> {
    /// Success indicator.
    success: bool,
    /// The response payload on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    /// The error payload on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody>,
}

impl<T> Envelope<T> {
    /// Wraps a successful payload.
    const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Error payload carried inside the envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorBody {
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<Envelope<()>> = Json(Envelope {
            success: false,
            data: None,
            error: Some(ErrorBody {
                message: self.message,
            }),
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::DomainRuleViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Busy => Self {
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Query parameters for reading an inventory range.
#[derive(Debug, Deserialize)]
struct InventoryRangeQuery {
    /// The owning property's identifier.
    property_id: i64,
    /// The room type to read.
    room_type_id: i64,
    /// The first date of the range (inclusive, ISO 8601).
    start_date: Date,
    /// The last date of the range (inclusive, ISO 8601).
    end_date: Date,
}

/// Query parameters for an availability check.
#[derive(Debug, Deserialize)]
struct AvailabilityQuery {
    /// The owning property's identifier.
    property_id: i64,
    /// The room type to evaluate.
    room_type_id: i64,
    /// The check-in date (ISO 8601).
    check_in_date: Date,
    /// The check-out date (exclusive, ISO 8601).
    check_out_date: Date,
    /// The number of rooms requested.
    rooms_requested: u32,
}

/// Query parameters for reading one calendar month.
#[derive(Debug, Deserialize)]
struct CalendarQuery {
    /// The owning property's identifier.
    property_id: i64,
    /// The room type to read.
    room_type_id: i64,
    /// The calendar year.
    year: i32,
    /// The calendar month (1-12).
    month: u8,
}

/// Health response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthData {
    /// Service status.
    status: String,
}

/// Handler for GET /health endpoint.
async fn handle_health() -> Json<Envelope<HealthData>> {
    Json(Envelope::ok(HealthData {
        status: String::from("ok"),
    }))
}

/// Handler for POST /properties endpoint.
///
/// Registers a new property.
async fn handle_register_property(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterPropertyRequest>,
) -> Result<Json<Envelope<RegisterPropertyResponse>>, HttpError> {
    info!(code = %req.code, "Handling register_property request");

    let mut persistence = app_state.persistence.lock().await;
    let response: RegisterPropertyResponse = register_property(&mut persistence, req)?;
    drop(persistence);

    info!(
        property_id = response.property_id,
        "Successfully registered property"
    );

    Ok(Json(Envelope::ok(response)))
}

/// Handler for POST `/room_types` endpoint.
///
/// Registers a new room type within a property.
async fn handle_register_room_type(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterRoomTypeRequest>,
) -> Result<Json<Envelope<RegisterRoomTypeResponse>>, HttpError> {
    info!(
        property_id = req.property_id,
        code = %req.code,
        "Handling register_room_type request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: RegisterRoomTypeResponse = register_room_type(&mut persistence, req)?;
    drop(persistence);

    info!(
        room_type_id = response.room_type_id,
        "Successfully registered room type"
    );

    Ok(Json(Envelope::ok(response)))
}

/// Handler for GET /inventory endpoint.
///
/// Returns the dense inventory calendar for an inclusive date range.
async fn handle_get_inventory(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<InventoryRangeQuery>,
) -> Result<Json<Envelope<GetInventoryResponse>>, HttpError> {
    info!(
        property_id = query.property_id,
        room_type_id = query.room_type_id,
        "Handling get_inventory request"
    );

    let request: GetInventoryRequest = GetInventoryRequest {
        property_id: query.property_id,
        room_type_id: query.room_type_id,
        start_date: query.start_date,
        end_date: query.end_date,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: GetInventoryResponse = get_inventory(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(Envelope::ok(response)))
}

/// Handler for GET /inventory/availability endpoint.
///
/// Evaluates availability for a stay over `[check_in, check_out)`.
async fn handle_check_availability(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Envelope<CheckAvailabilityResponse>>, HttpError> {
    info!(
        property_id = query.property_id,
        room_type_id = query.room_type_id,
        rooms_requested = query.rooms_requested,
        "Handling check_availability request"
    );

    let request: CheckAvailabilityRequest = CheckAvailabilityRequest {
        property_id: query.property_id,
        room_type_id: query.room_type_id,
        check_in: query.check_in_date,
        check_out: query.check_out_date,
        rooms_requested: query.rooms_requested,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: CheckAvailabilityResponse = check_availability(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(Envelope::ok(response)))
}

/// Handler for GET /inventory/calendar endpoint.
///
/// Returns one dense month of inventory.
async fn handle_get_calendar(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Envelope<GetCalendarResponse>>, HttpError> {
    info!(
        property_id = query.property_id,
        room_type_id = query.room_type_id,
        year = query.year,
        month = query.month,
        "Handling get_calendar request"
    );

    let request: GetCalendarRequest = GetCalendarRequest {
        property_id: query.property_id,
        room_type_id: query.room_type_id,
        year: query.year,
        month: query.month,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: GetCalendarResponse = get_calendar(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(Envelope::ok(response)))
}

/// Handler for POST /inventory/increment-sold endpoint.
///
/// Atomically increments the sold count across a set of dates.
async fn handle_increment_sold(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AdjustSoldRequest>,
) -> Result<Json<Envelope<AdjustSoldResponse>>, HttpError> {
    info!(
        property_id = req.property_id,
        room_type_id = req.room_type_id,
        quantity = req.quantity,
        dates = req.dates.len(),
        "Handling increment_sold request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: AdjustSoldResponse = increment_sold(&mut persistence, &req)?;
    drop(persistence);

    info!(
        modified = response.modified,
        created = response.created,
        deduplicated = response.deduplicated,
        "Successfully incremented sold counts"
    );

    Ok(Json(Envelope::ok(response)))
}

/// Handler for POST /inventory/decrement-sold endpoint.
///
/// Atomically decrements the sold count across a set of dates, clamping
/// at zero.
async fn handle_decrement_sold(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AdjustSoldRequest>,
) -> Result<Json<Envelope<AdjustSoldResponse>>, HttpError> {
    info!(
        property_id = req.property_id,
        room_type_id = req.room_type_id,
        quantity = req.quantity,
        dates = req.dates.len(),
        "Handling decrement_sold request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: AdjustSoldResponse = decrement_sold(&mut persistence, &req)?;
    drop(persistence);

    info!(
        modified = response.modified,
        underflow_dates = response.underflow_dates.len(),
        "Successfully decremented sold counts"
    );

    Ok(Json(Envelope::ok(response)))
}

/// Handler for POST /inventory/bulk-update endpoint.
///
/// Bulk-edits allow-listed ledger fields over an inclusive date range.
async fn handle_bulk_update(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<BulkUpdateRequest>,
) -> Result<Json<Envelope<BulkUpdateResponse>>, HttpError> {
    info!(
        property_id = req.property_id,
        room_type_id = req.room_type_id,
        "Handling bulk_update request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: BulkUpdateResponse = bulk_update(&mut persistence, &req)?;
    drop(persistence);

    info!(
        matched = response.matched,
        modified = response.modified,
        upserted = response.upserted,
        oversold_dates = response.oversold_dates.len(),
        "Successfully applied bulk update"
    );

    Ok(Json(Envelope::ok(response)))
}

/// Handler for POST /inventory/set-flags endpoint.
///
/// Toggles stop-sell/closed flags on a set of dates.
async fn handle_set_flags(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SetFlagsRequest>,
) -> Result<Json<Envelope<SetFlagsResponse>>, HttpError> {
    info!(
        property_id = req.property_id,
        room_type_id = req.room_type_id,
        dates = req.dates.len(),
        "Handling set_flags request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: SetFlagsResponse = set_flags(&mut persistence, &req)?;
    drop(persistence);

    info!(touched = response.touched, "Successfully set flags");

    Ok(Json(Envelope::ok(response)))
}

/// Handler for POST /inventory/delete endpoint.
///
/// Soft-deletes ledger records over an inclusive date range.
async fn handle_delete_inventory(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<DeleteInventoryRequest>,
) -> Result<Json<Envelope<DeleteInventoryResponse>>, HttpError> {
    info!(
        property_id = req.property_id,
        room_type_id = req.room_type_id,
        "Handling delete_inventory request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteInventoryResponse = delete_inventory(&mut persistence, &req)?;
    drop(persistence);

    info!(deleted = response.deleted, "Successfully deleted inventory");

    Ok(Json(Envelope::ok(response)))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/properties", post(handle_register_property))
        .route("/room_types", post(handle_register_room_type))
        .route("/inventory", get(handle_get_inventory))
        .route("/inventory/availability", get(handle_check_availability))
        .route("/inventory/calendar", get(handle_get_calendar))
        .route("/inventory/increment-sold", post(handle_increment_sold))
        .route("/inventory/decrement-sold", post(handle_decrement_sold))
        .route("/inventory/bulk-update", post(handle_bulk_update))
        .route("/inventory/set-flags", post(handle_set_flags))
        .route("/inventory/delete", post(handle_delete_inventory))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Room Ledger Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
