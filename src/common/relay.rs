use std::fmt::Display;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use axum::body::Body;
use bytes::Bytes;
use futures_util::Stream;
use tracing::{info, warn};

/// Stream adapter used for every response body the gateway does not own.
///
/// Chunks are passed through one at a time so memory stays bounded by the
/// upstream chunk size. Once the caller's response has started the status
/// can no longer change, so failures and early drops are only logged.
pub struct Relay<S> {
    inner: Pin<Box<S>>,
    label: &'static str,
    user_id: i64,
    sent: u64,
    finished: bool,
}

impl<S> Relay<S> {
    pub fn new(inner: S, label: &'static str, user_id: i64) -> Self {
        Self {
            inner: Box::pin(inner),
            label,
            user_id,
            sent: 0,
            finished: false,
        }
    }
}

impl<S, E> Stream for Relay<S>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Display,
{
    type Item = Result<Bytes, E>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        if this.finished {
            return Poll::Ready(None);
        }

        match ready!(this.inner.as_mut().poll_next(cx)) {
            Some(Ok(chunk)) => {
                this.sent += chunk.len() as u64;
                Poll::Ready(Some(Ok(chunk)))
            }
            Some(Err(e)) => {
                this.finished = true;
                warn!(
                    relay = this.label,
                    user_id = this.user_id,
                    bytes = this.sent,
                    error = %e,
                    "error copying response body"
                );
                Poll::Ready(Some(Err(e)))
            }
            None => {
                this.finished = true;
                info!(
                    relay = this.label,
                    user_id = this.user_id,
                    bytes = this.sent,
                    "response body relayed"
                );
                Poll::Ready(None)
            }
        }
    }
}

impl<S> Drop for Relay<S> {
    fn drop(&mut self) {
        if !self.finished {
            warn!(
                relay = self.label,
                user_id = self.user_id,
                bytes = self.sent,
                "caller went away before the body was fully relayed"
            );
        }
    }
}

/// Wraps an upstream byte stream into a response body.
pub fn relay_body<S, E>(stream: S, label: &'static str, user_id: i64) -> Body
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Into<axum::BoxError> + Display + 'static,
{
    Body::from_stream(Relay::new(stream, label, user_id))
}
