//! Server-sent event stream delivering live notifications.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, Stream, StreamExt};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, warn};

use relay_realtime::{ConnectionHandle, ConnectionId, OutboundEvent, PushChannelRegistry};

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Releases the caller's channel when the stream is dropped.
///
/// Keyed by connection id so a stale stream cannot evict a newer one.
struct ChannelGuard {
    channels: Arc<PushChannelRegistry>,
    user_key: String,
    connection_id: ConnectionId,
}

impl Drop for ChannelGuard {
    fn drop(&mut self) {
        let released = self.channels.release(&self.user_key, self.connection_id);
        debug!(
            user = %self.user_key,
            conn_id = %self.connection_id,
            released,
            "Event stream closed"
        );
    }
}

/// GET /api/events
///
/// Accepts the session token as `?token=` as well, since EventSource
/// cannot set headers.
pub async fn subscribe(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let realtime = &state.config.realtime;
    let (handle, receiver) =
        ConnectionHandle::channel(auth.email.clone(), realtime.channel_buffer_size);
    let guard = ChannelGuard {
        channels: Arc::clone(&state.channels),
        user_key: auth.email.clone(),
        connection_id: handle.id,
    };
    // Registered before the backlog is read so nothing pushed in between is lost.
    state.channels.register(Arc::new(handle));
    info!(
        user = %auth.email,
        conn_id = %guard.connection_id,
        connected = state.channels.connection_count(),
        "Event stream opened"
    );

    let backlog = state.notification_service.list(&auth).await?;
    let mut opening = vec![OutboundEvent::connected()];
    if !backlog.is_empty() {
        opening.push(OutboundEvent::Initial {
            notifications: backlog,
        });
    }

    let events = stream::iter(opening)
        .chain(ReceiverStream::new(receiver))
        .filter_map(move |event| {
            let _guard = &guard;
            futures::future::ready(to_sse(&event).map(Ok))
        });

    Ok(Sse::new(events).keep_alive(
        KeepAlive::new().interval(Duration::from_secs(realtime.keep_alive_seconds)),
    ))
}

fn to_sse(event: &OutboundEvent) -> Option<Event> {
    match event.to_json() {
        Ok(json) => Some(Event::default().data(json)),
        Err(e) => {
            warn!(event = event.event_type(), error = %e, "Dropping unserializable event");
            None
        }
    }
}
