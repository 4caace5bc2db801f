//! Per-invocation context and the sampling callback channel.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::sampling::{SamplingRequest, SamplingResponse};
use crate::{Result, ToolError};

/// Depth of the session's sampling channel.
const CALLBACK_CHANNEL_CAPACITY: usize = 8;

/// A sampling request in flight to the caller, paired with its reply slot.
pub struct SamplingEnvelope {
    /// Identifies the invocation that issued the request.
    pub correlation_id: Uuid,
    pub request: SamplingRequest,
    pub reply: oneshot::Sender<SamplingResponse>,
}

/// Handler-side endpoint of the session's sampling channel.
///
/// Attached to a context only when the caller advertised sampling
/// support during session setup; the negotiation itself happens in the
/// transport layer.
#[derive(Clone)]
pub struct CallbackChannel {
    tx: mpsc::Sender<SamplingEnvelope>,
}

impl CallbackChannel {
    /// Create a channel pair. The receiver belongs to the transport
    /// layer, which relays envelopes to the remote caller and funnels
    /// replies back through each envelope's `reply` sender.
    pub fn pair() -> (Self, mpsc::Receiver<SamplingEnvelope>) {
        let (tx, rx) = mpsc::channel(CALLBACK_CHANNEL_CAPACITY);
        (Self { tx }, rx)
    }
}

/// State owned by exactly one in-flight invocation.
///
/// Never shared between invocations; concurrent calls each get a fresh
/// context and cannot observe each other's cancellation or sampling
/// state.
pub struct InvocationContext {
    correlation_id: Uuid,
    cancel: CancellationToken,
    callback: Option<CallbackChannel>,
    sampling_in_flight: AtomicBool,
}

impl InvocationContext {
    /// Context for a caller without sampling support.
    pub fn new(cancel: CancellationToken) -> Self {
        Self::build(cancel, None)
    }

    /// Context for a caller that accepts sampling requests.
    pub fn with_callback(cancel: CancellationToken, callback: CallbackChannel) -> Self {
        Self::build(cancel, Some(callback))
    }

    fn build(cancel: CancellationToken, callback: Option<CallbackChannel>) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            cancel,
            callback,
            sampling_in_flight: AtomicBool::new(false),
        }
    }

    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    /// The invocation's cooperative cancellation signal. Timeouts are
    /// layered at the boundary as cancel-after-duration, not in here.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Whether the caller accepts sampling requests.
    pub fn supports_sampling(&self) -> bool {
        self.callback.is_some()
    }

    /// Send a sampling request to the caller and wait for its reply.
    ///
    /// Suspends only this invocation. At most one request may be in
    /// flight per invocation; a second concurrent call fails with
    /// [`ToolError::ProtocolViolation`]. Cancellation races both the
    /// send and the wait.
    pub async fn request_sampling(&self, request: SamplingRequest) -> Result<SamplingResponse> {
        let Some(callback) = &self.callback else {
            return Err(ToolError::CapabilityUnavailable(
                "caller does not support sampling".to_string(),
            ));
        };

        if self.sampling_in_flight.swap(true, Ordering::SeqCst) {
            return Err(ToolError::ProtocolViolation(
                "a sampling request is already in flight for this invocation".to_string(),
            ));
        }
        let _guard = InFlightGuard(&self.sampling_in_flight);

        let (reply_tx, reply_rx) = oneshot::channel();
        let envelope = SamplingEnvelope {
            correlation_id: self.correlation_id,
            request,
            reply: reply_tx,
        };

        tokio::select! {
            sent = callback.tx.send(envelope) => {
                if sent.is_err() {
                    return Err(ToolError::CapabilityUnavailable(
                        "sampling channel closed".to_string(),
                    ));
                }
            }
            _ = self.cancel.cancelled() => return Err(ToolError::Cancelled),
        }

        tokio::select! {
            reply = reply_rx => reply.map_err(|_| {
                ToolError::CapabilityUnavailable("sampling channel closed".to_string())
            }),
            _ = self.cancel.cancelled() => Err(ToolError::Cancelled),
        }
    }
}

/// Clears the in-flight flag when the sampling wait ends, including on
/// cancellation or when the handler drops the wait early.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
