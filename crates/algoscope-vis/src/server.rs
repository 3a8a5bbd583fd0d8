//! Axum web server with a WebSocket command channel for the visualization.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use algoscope_core::{reference_listing, Algorithm, Dataset, Family, ReferenceListing, Step};

use crate::config::VisConfig;
use crate::driver::{Controller, Direction};
use crate::error::Result;
use crate::playback::PlaybackStatus;
use crate::session::Session;

/// Shared application state.
pub struct AppState {
    controller: Controller,
}

/// Visualization server.
pub struct VisServer {
    state: Arc<AppState>,
}

impl VisServer {
    pub fn new(controller: Controller) -> Self {
        Self {
            state: Arc::new(AppState { controller }),
        }
    }

    /// Server with a fresh session built from `config`.
    pub fn from_config(config: &VisConfig) -> Self {
        Self::new(Controller::new(Session::new(config)))
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/catalog", get(catalog_handler))
            .route("/api/session", get(session_handler))
            .route("/api/step", get(step_handler))
            .route("/api/steps", get(steps_handler))
            .route("/api/playback", get(playback_status_handler))
            .route("/api/playback/play", post(play_handler))
            .route("/api/playback/pause", post(pause_handler))
            .route("/api/playback/reset", post(reset_handler))
            .route("/api/playback/speed", post(speed_handler))
            .route("/api/playback/step", post(manual_step_handler))
            .route("/api/playback/seek", post(seek_handler))
            .route("/api/family", post(family_handler))
            .route("/api/algorithm", post(algorithm_handler))
            .route("/api/data/new", post(new_data_handler))
            .route("/api/data/array", post(custom_array_handler))
            .route("/api/data/strings", post(custom_strings_handler))
            .route("/api/reference/{algorithm}", get(reference_handler))
            // WebSocket for playback commands
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the server on the given address.
    pub async fn serve(self, addr: SocketAddr) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Visualization API running on http://{}", addr);
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct AlgorithmEntry {
    id: &'static str,
    name: &'static str,
}

impl From<Algorithm> for AlgorithmEntry {
    fn from(algorithm: Algorithm) -> Self {
        Self {
            id: algorithm.id(),
            name: algorithm.name(),
        }
    }
}

#[derive(Debug, Serialize)]
struct FamilyEntry {
    id: Family,
    name: &'static str,
    algorithms: Vec<AlgorithmEntry>,
}

async fn catalog_handler() -> Json<Vec<FamilyEntry>> {
    Json(
        Family::ALL
            .into_iter()
            .map(|family| FamilyEntry {
                id: family,
                name: family.name(),
                algorithms: family.algorithms().iter().copied().map(Into::into).collect(),
            })
            .collect(),
    )
}

#[derive(Debug, Serialize)]
struct SessionResponse {
    family: Family,
    algorithm: AlgorithmEntry,
    dataset: Dataset,
    playback: PlaybackStatus,
}

async fn session_handler(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    let session = state.controller.session().await;
    Json(SessionResponse {
        family: session.family(),
        algorithm: session.algorithm().into(),
        dataset: session.dataset().clone(),
        playback: PlaybackStatus::from(session.player()),
    })
}

/// Current frame. `step` is null before anything is loaded.
#[derive(Debug, Serialize)]
struct StepResponse {
    step: Option<Step>,
    playback: PlaybackStatus,
}

async fn current_step(state: &AppState) -> StepResponse {
    let session = state.controller.session().await;
    StepResponse {
        step: session.current_step().cloned(),
        playback: PlaybackStatus::from(session.player()),
    }
}

async fn step_handler(State(state): State<Arc<AppState>>) -> Json<StepResponse> {
    Json(current_step(&state).await)
}

async fn steps_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Step>> {
    let session = state.controller.session().await;
    Json(session.player().steps().to_vec())
}

async fn playback_status_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    Json(state.controller.status().await)
}

async fn play_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    Json(state.controller.play().await)
}

async fn pause_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    Json(state.controller.pause().await)
}

async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    Json(state.controller.reset().await)
}

#[derive(Deserialize)]
struct SpeedRequest {
    speed: u32,
}

async fn speed_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SpeedRequest>,
) -> Json<PlaybackStatus> {
    Json(state.controller.set_speed(req.speed).await)
}

#[derive(Deserialize)]
struct StepRequest {
    direction: Direction,
}

async fn manual_step_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StepRequest>,
) -> Json<PlaybackStatus> {
    Json(state.controller.step(req.direction).await)
}

#[derive(Deserialize)]
struct SeekRequest {
    index: usize,
}

async fn seek_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SeekRequest>,
) -> Json<PlaybackStatus> {
    Json(state.controller.seek(req.index).await)
}

#[derive(Deserialize)]
struct FamilyRequest {
    family: String,
}

async fn family_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FamilyRequest>,
) -> Result<Json<PlaybackStatus>> {
    let family: Family = req.family.parse()?;
    Ok(Json(state.controller.select_family(family).await))
}

#[derive(Deserialize)]
struct AlgorithmRequest {
    algorithm: String,
}

async fn algorithm_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AlgorithmRequest>,
) -> Result<Json<PlaybackStatus>> {
    let algorithm: Algorithm = req.algorithm.parse()?;
    Ok(Json(state.controller.select_algorithm(algorithm).await?))
}

async fn new_data_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    Json(state.controller.new_data().await)
}

#[derive(Deserialize)]
struct ArrayRequest {
    raw: String,
}

async fn custom_array_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ArrayRequest>,
) -> Result<Json<PlaybackStatus>> {
    Ok(Json(state.controller.set_custom_array(&req.raw).await?))
}

#[derive(Deserialize)]
struct StringsRequest {
    text: String,
    pattern: String,
}

async fn custom_strings_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StringsRequest>,
) -> Result<Json<PlaybackStatus>> {
    Ok(Json(
        state
            .controller
            .set_custom_strings(&req.text, &req.pattern)
            .await?,
    ))
}

#[derive(Debug, Serialize)]
struct ReferenceResponse {
    algorithm: AlgorithmEntry,
    listing: ReferenceListing,
}

async fn reference_handler(Path(id): Path<String>) -> Result<Json<ReferenceResponse>> {
    let algorithm: Algorithm = id.parse()?;
    let listing = reference_listing(algorithm)
        .ok_or_else(|| algoscope_core::Error::UnknownAlgorithm(id.clone()))?;
    Ok(Json(ReferenceResponse {
        algorithm: algorithm.into(),
        listing,
    }))
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    // Send the current frame on connect
    let initial = WsResponse::Step(current_step(&state).await);
    if let Ok(json) = serde_json::to_string(&initial) {
        let _ = socket.send(Message::Text(json.into())).await;
    }

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                let response = match serde_json::from_str::<WsCommand>(&text) {
                    Ok(cmd) => handle_ws_command(&state, cmd).await,
                    Err(err) => WsResponse::Error {
                        message: err.to_string(),
                    },
                };
                if let Ok(json) = serde_json::to_string(&response) {
                    if socket.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsCommand {
    GetStep,
    GetStatus,
    Play,
    Pause,
    Reset,
    Seek { index: usize },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsResponse {
    Step(StepResponse),
    Status(PlaybackStatus),
    Error { message: String },
}

async fn handle_ws_command(state: &AppState, cmd: WsCommand) -> WsResponse {
    let controller = &state.controller;
    match cmd {
        WsCommand::GetStep => WsResponse::Step(current_step(state).await),
        WsCommand::GetStatus => WsResponse::Status(controller.status().await),
        WsCommand::Play => WsResponse::Status(controller.play().await),
        WsCommand::Pause => WsResponse::Status(controller.pause().await),
        WsCommand::Reset => WsResponse::Status(controller.reset().await),
        WsCommand::Seek { index } => WsResponse::Status(controller.seek(index).await),
    }
}
