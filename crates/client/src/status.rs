use parking_lot::Mutex;
use tracing::info;

/// Display collaborator for the human-readable status line.
///
/// Implementations must not call back into the marker controller; it writes
/// status while holding its state lock.
pub trait StatusDisplay: Send + Sync {
    fn show(&self, text: &str);
}

/// Keeps the most recent status text and logs each update.
#[derive(Debug, Default)]
pub struct StatusLine {
    text: Mutex<Option<String>>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> Option<String> {
        self.text.lock().clone()
    }
}

impl StatusDisplay for StatusLine {
    fn show(&self, text: &str) {
        info!("{text}");
        *self.text.lock() = Some(text.to_string());
    }
}
