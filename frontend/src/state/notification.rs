use std::fmt;

use crate::utils::timing::Millis;

pub const DEFAULT_DURATION_MS: Millis = 6_000;
pub const EXIT_TRANSITION_MS: Millis = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    pub fn icon_class(self) -> &'static str {
        match self {
            Severity::Info => "fas fa-info-circle",
            Severity::Success => "fas fa-check-circle",
            Severity::Warning => "fas fa-exclamation-triangle",
            Severity::Error => "fas fa-exclamation-circle",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type NotificationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Live { dismiss_at: Millis },
    Exiting { remove_at: Millis },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub created_at: Millis,
    pub duration_ms: Millis,
    phase: Phase,
}

impl Notification {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_exiting(&self) -> bool {
        matches!(self.phase, Phase::Exiting { .. })
    }

    fn deadline(&self) -> Millis {
        match self.phase {
            Phase::Live { dismiss_at } => dismiss_at,
            Phase::Exiting { remove_at } => remove_at,
        }
    }
}

/// What a caller asks for; the manager fills in id and timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastRequest {
    pub message: String,
    pub severity: Severity,
    pub duration_ms: Option<Millis>,
}

impl ToastRequest {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            duration_ms: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }

    pub fn with_duration(mut self, duration_ms: Millis) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

/// Anything that can put a toast on screen.
pub trait Notifier {
    fn notify(&mut self, request: ToastRequest);
}

/// Recording notifier, handy wherever the toast itself does not matter.
impl Notifier for Vec<ToastRequest> {
    fn notify(&mut self, request: ToastRequest) {
        self.push(request);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    Notify(ToastRequest),
    Dismiss(NotificationId),
    EscapePressed,
    Tick,
}

/// Toast lifecycle with a capacity of one live notification.
///
/// A new toast pushes any live one into its exit transition; exiting toasts
/// stay in [`NotificationManager::rendered`] until the transition has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationManager {
    default_duration_ms: Millis,
    exit_ms: Millis,
    next_id: NotificationId,
    items: Vec<Notification>,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_MS, EXIT_TRANSITION_MS)
    }
}

impl NotificationManager {
    pub fn new(default_duration_ms: Millis, exit_ms: Millis) -> Self {
        Self {
            default_duration_ms,
            exit_ms,
            next_id: 1,
            items: Vec::new(),
        }
    }

    pub fn handle(&mut self, event: NotificationEvent, now: Millis) {
        match event {
            NotificationEvent::Notify(request) => {
                self.notify(request, now);
            }
            NotificationEvent::Dismiss(id) => {
                self.dismiss(id, now);
            }
            NotificationEvent::EscapePressed => {
                self.dismiss_all(now);
            }
            NotificationEvent::Tick => self.poll(now),
        }
    }

    pub fn notify(&mut self, request: ToastRequest, now: Millis) -> NotificationId {
        self.poll(now);
        self.dismiss_all(now);

        let id = self.next_id;
        self.next_id += 1;
        let duration_ms = request.duration_ms.unwrap_or(self.default_duration_ms);
        log::debug!("toast #{} ({}): {}", id, request.severity, request.message);

        self.items.push(Notification {
            id,
            message: request.message,
            severity: request.severity,
            created_at: now,
            duration_ms,
            phase: Phase::Live {
                dismiss_at: now + duration_ms,
            },
        });
        id
    }

    /// Starts the exit transition. Returns false when the toast is already
    /// exiting or gone.
    pub fn dismiss(&mut self, id: NotificationId, now: Millis) -> bool {
        let exit_ms = self.exit_ms;
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(n) if !n.is_exiting() => {
                n.phase = Phase::Exiting {
                    remove_at: now + exit_ms,
                };
                true
            }
            _ => false,
        }
    }

    pub fn dismiss_all(&mut self, now: Millis) -> usize {
        let live: Vec<NotificationId> = self
            .items
            .iter()
            .filter(|n| !n.is_exiting())
            .map(|n| n.id)
            .collect();
        live.into_iter().filter(|id| self.dismiss(*id, now)).count()
    }

    /// Applies every deadline that has passed by `now`.
    pub fn poll(&mut self, now: Millis) {
        let exit_ms = self.exit_ms;
        for n in &mut self.items {
            if let Phase::Live { dismiss_at } = n.phase {
                if now >= dismiss_at {
                    n.phase = Phase::Exiting {
                        remove_at: dismiss_at + exit_ms,
                    };
                }
            }
        }
        self.items.retain(|n| match n.phase {
            Phase::Exiting { remove_at } => now < remove_at,
            Phase::Live { .. } => true,
        });
    }

    pub fn live(&self) -> Option<&Notification> {
        self.items.iter().find(|n| !n.is_exiting())
    }

    /// Live plus still-exiting toasts, oldest first.
    pub fn rendered(&self) -> &[Notification] {
        &self.items
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.items.iter().map(Notification::deadline).min()
    }

    /// Binds the manager to a moment in time so it can serve as a [`Notifier`].
    pub fn at(&mut self, now: Millis) -> ManagerAt<'_> {
        ManagerAt { manager: self, now }
    }
}

pub struct ManagerAt<'a> {
    manager: &'a mut NotificationManager,
    now: Millis,
}

impl Notifier for ManagerAt<'_> {
    fn notify(&mut self, request: ToastRequest) {
        self.manager.notify(request, self.now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn live_count(manager: &NotificationManager) -> usize {
        manager.rendered().iter().filter(|n| !n.is_exiting()).count()
    }

    #[test]
    fn auto_dismiss_then_removal() {
        let mut manager = NotificationManager::default();
        let id = manager.notify(ToastRequest::info("hello"), 1_000);

        manager.poll(6_999);
        assert_eq!(manager.live().map(|n| n.id), Some(id));

        manager.poll(7_000);
        assert!(manager.live().is_none());
        assert_eq!(manager.rendered().len(), 1);
        assert_eq!(manager.next_deadline(), Some(7_300));

        manager.poll(7_300);
        assert!(manager.rendered().is_empty());
        assert_eq!(manager.next_deadline(), None);
    }

    #[test]
    fn rapid_notifies_leave_exactly_one_live() {
        let mut manager = NotificationManager::default();
        let first = manager.notify(ToastRequest::error("first"), 0);
        let second = manager.notify(ToastRequest::success("second"), 5);

        assert_eq!(live_count(&manager), 1);
        assert_eq!(manager.live().map(|n| n.id), Some(second));
        assert!(manager
            .rendered()
            .iter()
            .any(|n| n.id == first && n.is_exiting()));

        manager.poll(400);
        assert_eq!(manager.rendered().len(), 1);
        assert_eq!(manager.live().map(|n| n.message.as_str()), Some("second"));
    }

    #[test]
    fn burst_of_notifies_never_accumulates() {
        let mut manager = NotificationManager::default();
        for t in 0..50 {
            manager.notify(ToastRequest::info(format!("#{t}")), t * 20);
            assert_eq!(live_count(&manager), 1);
        }
        manager.poll(50 * 20 + EXIT_TRANSITION_MS);
        assert_eq!(manager.rendered().len(), 1);
    }

    #[test]
    fn second_dismiss_is_a_noop() {
        let mut manager = NotificationManager::default();
        let id = manager.notify(ToastRequest::info("bye"), 0);
        assert!(manager.dismiss(id, 100));
        assert!(!manager.dismiss(id, 150));
        assert_eq!(manager.next_deadline(), Some(400));
    }

    #[test]
    fn escape_closes_the_live_toast() {
        let mut manager = NotificationManager::default();
        manager.handle(NotificationEvent::Notify(ToastRequest::info("x")), 0);
        manager.handle(NotificationEvent::EscapePressed, 10);
        assert!(manager.live().is_none());
        manager.handle(NotificationEvent::Tick, 310);
        assert!(manager.rendered().is_empty());
    }

    #[test]
    fn custom_duration_is_respected() {
        let mut manager = NotificationManager::default();
        manager.at(0).notify(ToastRequest::info("quick").with_duration(1_000));
        assert_eq!(manager.next_deadline(), Some(1_000));
    }

    #[test]
    fn severity_icons() {
        assert_eq!(Severity::Success.icon_class(), "fas fa-check-circle");
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::default(), Severity::Info);
    }
}
