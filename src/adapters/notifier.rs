use crate::core::{Notice, Notifier};

/// Surfaces notices on stderr, the terminal's stand-in for a toast.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        tracing::debug!("notice: {:?}", notice);
        eprintln!("❌ {}", notice);
    }
}
