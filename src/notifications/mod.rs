//! Notifications
//!
//! Short-lived, user-facing messages. Producers hold a [`NotificationBus`] handle and call
//! [`NotificationBus::publish`]; the rendering layer holds a receiver from
//! [`NotificationBus::subscribe`] and redraws whenever the active set changes.
//!
//! Inside a tokio runtime each notification gets a timer task that removes it once its ttl
//! elapses, so subscribers see it go without anyone polling. Outside a runtime expiry is
//! checked against the bus clock on the next call into the bus.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tokio::{runtime::Handle, sync::watch, task::AbortHandle};
use tracing::debug;
use uuid::Uuid;

use crate::clock::{Clock, duration_millis};

mod suppression;

pub use suppression::{DedupKey, SuppressionWindow};

/// Display time used when a request does not set one.
pub const DEFAULT_TTL: Duration = Duration::from_millis(5000);

/// Suppression window used by [`NotificationBus::publish`].
pub const DEFAULT_SUPPRESSION_WINDOW: Duration = Duration::from_millis(1000);

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Operation succeeded
    Success,

    /// Operation failed
    Error,

    /// Something the user should notice
    Warning,

    /// Neutral information
    Info,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let label = match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        };

        f.write_str(label)
    }
}

/// Unique id assigned to each published notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(Uuid);

impl Display for NotificationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// A notification as requested by a producer, before it has an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    /// Headline
    pub title: String,

    /// Optional detail line
    pub description: Option<String>,

    /// Severity
    pub severity: Severity,

    /// Display time, [`DEFAULT_TTL`] when unset
    pub ttl: Option<Duration>,
}

impl NotificationRequest {
    /// Creates a request with no description and the default ttl.
    pub fn new(title: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            description: None,
            severity,
            ttl: None,
        }
    }

    /// Success request.
    pub fn success(title: impl Into<String>) -> Self {
        Self::new(title, Severity::Success)
    }

    /// Error request.
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(title, Severity::Error)
    }

    /// Warning request.
    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(title, Severity::Warning)
    }

    /// Info request.
    pub fn info(title: impl Into<String>) -> Self {
        Self::new(title, Severity::Info)
    }

    /// Sets the detail line.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the display time.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Key used to collapse duplicates.
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey::new(&self.title, self.description.as_deref(), self.severity)
    }
}

/// An active notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Unique id
    pub id: NotificationId,

    /// Headline
    pub title: String,

    /// Optional detail line
    pub description: Option<String>,

    /// Severity
    pub severity: Severity,

    /// Display time
    pub ttl: Duration,

    /// When it was published
    pub published_at: Timestamp,
}

/// Bus timing settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationSettings {
    /// Display time for requests without their own ttl.
    pub default_ttl: Duration,

    /// Window used by [`NotificationBus::publish`].
    pub suppression_window: Duration,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL,
            suppression_window: DEFAULT_SUPPRESSION_WINDOW,
        }
    }
}

/// Process-wide notification channel.
///
/// Cloning yields another handle to the same bus.
#[derive(Debug, Clone)]
pub struct NotificationBus {
    inner: Arc<BusInner>,
}

#[derive(Debug)]
struct BusInner {
    state: Mutex<BusState>,
    sender: watch::Sender<Vec<Notification>>,
    clock: Arc<dyn Clock>,
    settings: NotificationSettings,
}

#[derive(Debug, Default)]
struct BusState {
    active: Vec<Notification>,

    /// Pending auto-removals.
    timers: FxHashMap<NotificationId, Timer>,

    suppression: SuppressionWindow,
}

#[derive(Debug)]
struct Timer {
    /// Unix millis at which the notification is due to go.
    fires_at: i64,

    /// Task that removes it, when published inside a runtime.
    task: Option<AbortHandle>,
}

impl Timer {
    fn cancel(self) {
        if let Some(task) = self.task {
            task.abort();
        }
    }
}

impl BusState {
    /// Fires every timer due at `now`, returning whether anything was removed.
    fn expire(&mut self, now: i64) -> bool {
        let due: Vec<NotificationId> = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.fires_at <= now)
            .map(|(id, _)| *id)
            .collect();

        for id in &due {
            if let Some(timer) = self.timers.remove(id) {
                timer.cancel();
            }
        }

        let before = self.active.len();
        self.active.retain(|notification| !due.contains(&notification.id));

        self.active.len() != before
    }

    /// Drops one notification and its timer, returning whether it was active.
    fn remove(&mut self, id: NotificationId) -> bool {
        if let Some(timer) = self.timers.remove(&id) {
            timer.cancel();
        }

        let before = self.active.len();
        self.active.retain(|notification| notification.id != id);

        self.active.len() != before
    }
}

impl NotificationBus {
    /// Creates a bus reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>, settings: NotificationSettings) -> Self {
        let (sender, _) = watch::channel(Vec::new());

        Self {
            inner: Arc::new(BusInner {
                state: Mutex::new(BusState::default()),
                sender,
                clock,
                settings,
            }),
        }
    }

    /// Publishes using the bus-wide suppression window.
    ///
    /// Returns the new notification's id, or `None` when it duplicated a recent one.
    pub fn publish(&self, request: NotificationRequest) -> Option<NotificationId> {
        self.publish_within(request, self.inner.settings.suppression_window)
    }

    /// Publishes using a producer-specific suppression window.
    pub fn publish_within(
        &self,
        request: NotificationRequest,
        window: Duration,
    ) -> Option<NotificationId> {
        let now = self.inner.clock.now();
        let mut state = self.lock();

        let expired = state.expire(now.as_millisecond());

        if !state.suppression.admit(request.dedup_key(), now, window) {
            debug!(title = %request.title, severity = %request.severity, "suppressed duplicate notification");

            if expired {
                self.broadcast(&state);
            }

            return None;
        }

        let id = NotificationId(Uuid::now_v7());
        let ttl = request.ttl.unwrap_or(self.inner.settings.default_ttl);

        state.timers.insert(
            id,
            Timer {
                fires_at: now.as_millisecond().saturating_add(duration_millis(ttl)),
                task: self.spawn_timer(id, ttl),
            },
        );

        state.active.push(Notification {
            id,
            title: request.title,
            description: request.description,
            severity: request.severity,
            ttl,
            published_at: now,
        });

        self.broadcast(&state);

        Some(id)
    }

    /// Removes a notification now and cancels its auto-removal.
    ///
    /// Returns whether it was still active.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        let mut state = self.lock();
        let removed = state.remove(id);

        if removed {
            self.broadcast(&state);
        }

        removed
    }

    /// Drops every notification, pending timer and suppressed key.
    pub fn clear(&self) {
        let mut state = self.lock();

        state.active.clear();
        state.suppression.clear();

        for (_, timer) in state.timers.drain() {
            timer.cancel();
        }

        self.broadcast(&state);
    }

    /// Fires due auto-removals, returning how many notifications remain active.
    pub fn tick(&self) -> usize {
        let now = self.inner.clock.now().as_millisecond();
        let mut state = self.lock();

        if state.expire(now) {
            self.broadcast(&state);
        }

        state.active.len()
    }

    /// Snapshot of the active notifications, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        self.tick();

        self.lock().active.clone()
    }

    /// Number of auto-removal timers still pending.
    pub fn pending_timers(&self) -> usize {
        self.lock().timers.len()
    }

    /// Receiver that observes the active set after every change.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.inner.sender.subscribe()
    }

    /// Schedules removal of `id` after `ttl` on the current runtime, if there is one.
    fn spawn_timer(&self, id: NotificationId, ttl: Duration) -> Option<AbortHandle> {
        let runtime = Handle::try_current().ok()?;
        let inner = Arc::downgrade(&self.inner);

        let task = runtime.spawn(async move {
            tokio::time::sleep(ttl).await;

            if let Some(bus) = Self::upgrade(&inner) {
                bus.expire(id);
            }
        });

        Some(task.abort_handle())
    }

    fn upgrade(inner: &Weak<BusInner>) -> Option<Self> {
        inner.upgrade().map(|inner| Self { inner })
    }

    fn expire(&self, id: NotificationId) {
        let mut state = self.lock();

        state.timers.remove(&id);

        let before = state.active.len();
        state.active.retain(|notification| notification.id != id);

        if state.active.len() != before {
            debug!(%id, "notification expired");

            self.broadcast(&state);
        }
    }

    fn lock(&self) -> MutexGuard<'_, BusState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn broadcast(&self, state: &BusState) {
        self.inner.sender.send_replace(state.active.clone());
    }
}
