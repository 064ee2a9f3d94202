//! In-memory transport for bsefeed tests and demos.
//!
//! [`MockTransport`] answers priming and data requests from scripted
//! [`MockBehavior`]s and records every request it sees, tagged with the
//! session it arrived on.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use bsefeed::{BseError, RequestKind, Session, Transport, WireRequest, WireResponse};

pub mod fixtures;

/// Instruction for how a request should be answered.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the provided response immediately.
    Return(WireResponse),
    /// Fail immediately with the provided error.
    Fail(BseError),
    /// Hang indefinitely (simulate a stalled connection).
    Hang,
}

/// A request as observed by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Sequence number of the session the request was sent on, from 0.
    pub session: usize,
    /// The request itself.
    pub request: WireRequest,
}

struct InternalState {
    priming: MockBehavior,
    data: MockBehavior,
    require_priming: bool,
    sessions_opened: usize,
    requests: Vec<RecordedRequest>,
}

/// Scriptable transport. Clones share state, so a test can keep a handle for
/// assertions after handing one to the client builder.
#[derive(Clone)]
pub struct MockTransport {
    state: Arc<Mutex<InternalState>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Priming answers with a plain page, data with [`fixtures::json_response`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(InternalState {
                priming: MockBehavior::Return(fixtures::priming_page_response()),
                data: MockBehavior::Return(fixtures::json_response()),
                require_priming: false,
                sessions_opened: 0,
                requests: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, InternalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Answer data requests with `response`.
    #[must_use]
    pub fn returning(self, response: WireResponse) -> Self {
        self.set_data_behavior(MockBehavior::Return(response));
        self
    }

    /// Set the behavior for priming requests.
    #[must_use]
    pub fn with_priming(self, behavior: MockBehavior) -> Self {
        self.lock().priming = behavior;
        self
    }

    /// Set the behavior for data requests.
    #[must_use]
    pub fn with_data(self, behavior: MockBehavior) -> Self {
        self.set_data_behavior(behavior);
        self
    }

    /// Answer data requests with a redirect unless the same session was
    /// primed successfully first, like the real site without its cookies.
    #[must_use]
    pub fn require_priming(self) -> Self {
        self.lock().require_priming = true;
        self
    }

    /// Change the data behavior on a live transport.
    pub fn set_data_behavior(&self, behavior: MockBehavior) {
        self.lock().data = behavior;
    }

    /// All requests seen so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Requests of one kind seen so far.
    #[must_use]
    pub fn requests_of(&self, kind: RequestKind) -> Vec<RecordedRequest> {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.request.kind == kind)
            .cloned()
            .collect()
    }

    /// Number of sessions opened so far.
    #[must_use]
    pub fn sessions_opened(&self) -> usize {
        self.lock().sessions_opened
    }
}

impl Transport for MockTransport {
    fn open_session(&self) -> Result<Box<dyn Session>, BseError> {
        let mut guard = self.lock();
        let id = guard.sessions_opened;
        guard.sessions_opened += 1;
        Ok(Box::new(MockSession {
            id,
            state: Arc::clone(&self.state),
            primed: AtomicBool::new(false),
        }))
    }
}

struct MockSession {
    id: usize,
    state: Arc<Mutex<InternalState>>,
    primed: AtomicBool,
}

/// Location the mock redirects unprimed data requests to.
pub const SESSION_EXPIRED_LOCATION: &str = "/corporates/ann.html?session=expired";

#[async_trait]
impl Session for MockSession {
    async fn get(&self, req: &WireRequest) -> Result<WireResponse, BseError> {
        let behavior = {
            let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            guard.requests.push(RecordedRequest {
                session: self.id,
                request: req.clone(),
            });
            match req.kind {
                RequestKind::Priming => guard.priming.clone(),
                RequestKind::Data
                    if guard.require_priming && !self.primed.load(Ordering::SeqCst) =>
                {
                    MockBehavior::Return(fixtures::redirect_response(SESSION_EXPIRED_LOCATION))
                }
                RequestKind::Data => guard.data.clone(),
            }
        };

        match behavior {
            MockBehavior::Return(resp) => {
                if req.kind == RequestKind::Priming {
                    self.primed.store(true, Ordering::SeqCst);
                }
                Ok(resp)
            }
            MockBehavior::Fail(e) => Err(e),
            MockBehavior::Hang => std::future::pending().await,
        }
    }
}
