//! Simulated run handlers.
//!
//! `POST /scripts/{id}/run` replays every tick at once and returns the events.
//! `GET /scripts/{id}/run/stream` honors the tick delays and streams events as
//! Server-Sent Events. Both append to the shared console log, and both answer
//! 409 while another run is in flight.

use std::convert::Infallible;

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use futures_util::stream::{self, Stream, StreamExt};
use tokio::sync::mpsc;

use codeflow_assist::Assistant;
use codeflow_core::console::ConsoleEvent;

use crate::error::ApiError;
use crate::handlers::load_script;
use crate::schema::run::RunResponse;
use crate::state::AppState;

fn busy() -> ApiError {
    ApiError::Conflict("a simulated run is already in progress".to_string())
}

/// Runs a script in replay mode.
///
/// `POST /scripts/{id}/run`
pub async fn run_script<A: Assistant>(
    State(state): State<AppState<A>>,
    Path(id): Path<String>,
) -> Result<Json<RunResponse>, ApiError> {
    let script = load_script(&state.store, &id).await?;
    let run = state.simulator.start(&script).ok_or_else(busy)?;

    let events = run.replay();
    state.console.lock().await.extend(events.iter().cloned());
    // Released only after logging so back-to-back runs append in order.
    drop(run);

    Ok(Json(RunResponse {
        script_id: script.id,
        events,
        state: state.simulator.state(),
    }))
}

/// Runs a script on real timers, streaming `console` events then `done`.
///
/// `GET /scripts/{id}/run/stream`
pub async fn stream_script<A: Assistant>(
    State(state): State<AppState<A>>,
    Path(id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let script = load_script(&state.store, &id).await?;
    let run = state.simulator.start(&script).ok_or_else(busy)?;

    let (sse_tx, sse_rx) = mpsc::unbounded_channel::<ConsoleEvent>();

    // The task owns the run, so the simulator stays busy until every event is
    // in the console log, even if the client disconnects mid-run.
    let console = state.console.clone();
    tokio::spawn(async move {
        let (run_tx, mut run_rx) = mpsc::unbounded_channel::<ConsoleEvent>();
        let forward = async {
            while let Some(event) = run_rx.recv().await {
                console.lock().await.push(event.clone());
                let _ = sse_tx.send(event);
            }
        };
        tokio::join!(run.stream(run_tx), forward);
        drop(run);
        drop(sse_tx);
    });

    let events = stream::unfold(sse_rx, |mut rx| async move {
        let event = rx.recv().await?;
        Some((Ok(to_sse(&event)), rx))
    });
    let done = stream::once(async { Ok(Event::default().event("done").data("idle")) });

    Ok(Sse::new(events.chain(done)).keep_alive(KeepAlive::default()))
}

fn to_sse(event: &ConsoleEvent) -> Event {
    Event::default()
        .event("console")
        .json_data(event)
        .unwrap_or_else(|_| Event::default().event("console").data(event.text.clone()))
}
