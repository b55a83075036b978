//! Single-slot transient notification display.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::AbortHandle;

/// Default notification icon.
pub const DEFAULT_ICON: &str = "💬";

/// Icon used for failure notifications.
pub const FAILURE_ICON: &str = "!";

#[derive(Debug)]
struct Slot {
    visible: bool,
    message: String,
    icon: String,
}

impl Default for Slot {
    fn default() -> Self {
        Self { visible: false, message: String::new(), icon: DEFAULT_ICON.to_string() }
    }
}

/// One displayable notification at a time, auto-hidden after a fixed
/// duration.
///
/// A `show` while a previous message is still visible replaces it and
/// restarts the hide timer, so the new message always gets the full display
/// duration. Cheap to clone; clones share the same slot.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    slot: Arc<Mutex<Slot>>,
    hide_timer: Arc<Mutex<Option<AbortHandle>>>,
    display_duration: Duration,
}

impl NotificationCenter {
    /// Create a center with the given auto-hide duration.
    pub fn new(display_duration: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            hide_timer: Arc::new(Mutex::new(None)),
            display_duration,
        }
    }

    /// Show a message, replacing whatever is currently displayed.
    ///
    /// `icon` falls back to [`DEFAULT_ICON`]. Must be called from within a
    /// tokio runtime.
    pub fn show(&self, message: impl Into<String>, icon: Option<&str>) {
        {
            let mut slot = self.slot.lock();
            slot.message = message.into();
            slot.icon = icon.unwrap_or(DEFAULT_ICON).to_string();
            slot.visible = true;
        }

        // The previous hide timer must not cut the new message short.
        if let Some(pending) = self.hide_timer.lock().take() {
            pending.abort();
        }

        let slot = Arc::clone(&self.slot);
        let duration = self.display_duration;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            slot.lock().visible = false;
        });
        *self.hide_timer.lock() = Some(handle.abort_handle());
    }

    /// Whether a notification is currently displayed.
    pub fn visible(&self) -> bool {
        self.slot.lock().visible
    }

    /// The current (possibly hidden) message.
    pub fn message(&self) -> String {
        self.slot.lock().message.clone()
    }

    /// The current (possibly hidden) icon.
    pub fn icon(&self) -> String {
        self.slot.lock().icon.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISPLAY: Duration = Duration::from_millis(2500);

    #[tokio::test(start_paused = true)]
    async fn test_initial_state() {
        let center = NotificationCenter::new(DISPLAY);
        assert!(!center.visible());
        assert_eq!(center.message(), "");
        assert_eq!(center.icon(), DEFAULT_ICON);
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_sets_slot() {
        let center = NotificationCenter::new(DISPLAY);
        center.show("Tickets created", None);

        assert!(center.visible());
        assert_eq!(center.message(), "Tickets created");
        assert_eq!(center.icon(), DEFAULT_ICON);
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_custom_icon() {
        let center = NotificationCenter::new(DISPLAY);
        center.show("Failed to notify Sarah Lee", Some(FAILURE_ICON));
        assert_eq!(center.icon(), FAILURE_ICON);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_hide_after_duration() {
        let center = NotificationCenter::new(DISPLAY);
        center.show("Tickets created", None);
        // Let the hide task register its sleep before moving the clock.
        tokio::task::yield_now().await;

        tokio::time::advance(DISPLAY + Duration::from_millis(1)).await;
        // `advance` wakes the expired timer but does not poll the task.
        tokio::task::yield_now().await;
        assert!(!center.visible());
        // Message stays stale-but-hidden until the next show
        assert_eq!(center.message(), "Tickets created");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reshow_restarts_timer() {
        let center = NotificationCenter::new(DISPLAY);
        center.show("A", None);
        // Let the hide task register its sleep before moving the clock.
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_millis(2000)).await;
        center.show("B", None);
        tokio::task::yield_now().await;
        assert_eq!(center.message(), "B");
        assert!(center.visible());

        // One original duration from the first show: still visible, because
        // the second show restarted the timer.
        tokio::time::advance(Duration::from_millis(600)).await;
        assert!(center.visible());

        // A full duration from the second show: hidden.
        tokio::time::advance(DISPLAY).await;
        // `advance` wakes the expired timer but does not poll the task.
        tokio::task::yield_now().await;
        assert!(!center.visible());
    }
}
