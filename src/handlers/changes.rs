use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};

use crate::AppState;

/// Stream entity change events to subscribed admin views. Consumers merge
/// each event into their cached lists with `apply_change_event`; a lagged
/// subscriber that missed events should re-fetch and resubscribe.
pub async fn change_feed(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.changes.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|event| match event {
        Ok(event) => {
            let data = serde_json::to_string(&event).ok()?;
            Some(Ok(Event::default().event("change").data(data)))
        }
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!(skipped, "Change feed subscriber lagged");
            Some(Ok(Event::default().event("lagged").data(skipped.to_string())))
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
