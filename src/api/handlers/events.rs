use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, Sse};
use tokio::sync::broadcast;
use tokio_stream::Stream;

use crate::api::state::AppState;

/// Live feed of monitor/executor events. No replay buffer: the monitor
/// runs one process-wide cycle loop, not per-session runs, so there's
/// nothing to replay before a given connection — only to stream forward.
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.monitor.subscribe();

    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let json = serde_json::to_string(&event).unwrap_or_default();
                    yield Ok(Event::default().data(json));
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    let msg = format!("{{\"type\":\"Lagged\",\"missed\":{n}}}");
                    yield Ok(Event::default().data(msg));
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream)
}
