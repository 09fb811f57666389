use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use futures_timer::Delay;
use gpui::SharedString;

use crate::motion::MotionConfig;

pub const DEFAULT_AUTO_CLOSE_MS: u32 = 5_000;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NotificationId(pub u64);

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub const fn icon(self) -> &'static str {
        match self {
            Severity::Info => "ℹ",
            Severity::Success => "✓",
            Severity::Warning => "⚠",
            Severity::Error => "✗",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NotificationPhase {
    Visible,
    Leaving,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notification {
    pub id: Option<NotificationId>,
    pub message: SharedString,
    pub severity: Severity,
    pub auto_close_ms: Option<u32>,
    pub closable: bool,
    pub phase: NotificationPhase,
}

impl Notification {
    pub fn new(message: impl Into<SharedString>) -> Self {
        Self {
            id: None,
            message: message.into(),
            severity: Severity::Info,
            auto_close_ms: Some(DEFAULT_AUTO_CLOSE_MS),
            closable: true,
            phase: NotificationPhase::Visible,
        }
    }

    pub fn success(message: impl Into<SharedString>) -> Self {
        Self::new(message).severity(Severity::Success)
    }

    pub fn error(message: impl Into<SharedString>) -> Self {
        Self::new(message).severity(Severity::Error)
    }

    pub fn severity(mut self, value: Severity) -> Self {
        self.severity = value;
        self
    }

    pub fn auto_close_ms(mut self, value: Option<u32>) -> Self {
        self.auto_close_ms = value;
        self
    }

    pub fn closable(mut self, value: bool) -> Self {
        self.closable = value;
        self
    }
}

/// Single-slot notification display. Showing a notification evicts the one
/// currently on screen, so at most one is ever visible.
#[derive(Clone, Default)]
pub struct NotificationCenter {
    next_id: Arc<AtomicU64>,
    current: Arc<RwLock<Option<Notification>>>,
    motion: MotionConfig,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_motion(mut self, motion: MotionConfig) -> Self {
        self.motion = motion;
        self
    }

    pub fn motion(&self) -> MotionConfig {
        self.motion
    }

    pub fn show(&self, mut entry: Notification) -> NotificationId {
        let id = NotificationId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        entry.id = Some(id);
        entry.phase = NotificationPhase::Visible;

        if let Some(evicted) = self.write().replace(entry) {
            log::debug!("notification {:?} evicted by {id:?}", evicted.id);
        }
        id
    }

    /// Closes `id` right away. Returns `false` when it is no longer shown.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        let mut current = self.write();
        if current.as_ref().and_then(|entry| entry.id) != Some(id) {
            return false;
        }
        *current = None;
        true
    }

    pub fn dismiss_current(&self) -> bool {
        self.write().take().is_some()
    }

    pub fn current(&self) -> Option<Notification> {
        self.read().clone()
    }

    pub fn is_visible(&self) -> bool {
        self.read().is_some()
    }

    /// Moves `id` into its exit transition.
    pub fn begin_leaving(&self, id: NotificationId) -> bool {
        let mut current = self.write();
        match current.as_mut() {
            Some(entry) if entry.id == Some(id) => {
                entry.phase = NotificationPhase::Leaving;
                true
            }
            _ => false,
        }
    }

    /// Waits out the display time of `id`, plays the exit transition and
    /// removes it, unless it was replaced or dismissed in the meantime.
    pub async fn expire(&self, id: NotificationId) {
        let auto_close = self
            .read()
            .as_ref()
            .filter(|entry| entry.id == Some(id))
            .and_then(|entry| entry.auto_close_ms);
        let Some(auto_close_ms) = auto_close else {
            return;
        };

        Delay::new(Duration::from_millis(u64::from(auto_close_ms))).await;
        if !self.begin_leaving(id) {
            return;
        }

        let exit = self.motion.exit_duration();
        if !exit.is_zero() {
            Delay::new(exit).await;
        }
        if self.dismiss(id) {
            log::trace!("notification {id:?} expired");
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Notification>> {
        match self.current.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Notification>> {
        match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
