//! Debounced search input scheduling.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Delay between the last keystroke and the search being applied.
pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(200);

/// Single-slot debouncer for the global-search input.
///
/// Each keystroke cancels the previously scheduled application and
/// schedules a fresh one; only a keystroke that survives the delay window
/// unchallenged delivers its text. A cancelled task observes cancellation
/// before producing any visible effect.
///
/// Delivered values cross to the caller over a channel rather than by
/// mutating shared state, so the single-threaded update cycle stays the
/// only place table state changes: drain with [`recv`](Self::recv) (or
/// [`try_recv`](Self::try_recv)) and feed the result to the table.
///
/// # Example
///
/// ```no_run
/// # async fn demo() {
/// use gridtable_lib::search::SearchDebouncer;
///
/// let mut debouncer = SearchDebouncer::new();
/// debouncer.input("con");
/// debouncer.input("contoso"); // cancels the pending "con"
///
/// if let Some(applied) = debouncer.recv().await {
///     assert_eq!(applied, "contoso");
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<CancellationToken>,
    tx: mpsc::UnboundedSender<String>,
    rx: mpsc::UnboundedReceiver<String>,
}

impl SearchDebouncer {
    /// Creates a debouncer with the default 200 ms window.
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_SEARCH_DELAY)
    }

    /// Creates a debouncer with a custom delay window.
    pub fn with_delay(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            pending: None,
            tx,
            rx,
        }
    }

    /// Schedules `text` to be applied after the delay window.
    ///
    /// Cancels any previously scheduled application. Must be called from
    /// within a Tokio runtime.
    pub fn input(&mut self, text: impl Into<String>) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }

        let token = CancellationToken::new();
        self.pending = Some(token.clone());

        let text = text.into();
        let tx = self.tx.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let _ = tx.send(text);
                }
            }
        });
    }

    /// Cancels any pending application without scheduling a new one.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }

    /// Waits for the next applied search value.
    pub async fn recv(&mut self) -> Option<String> {
        self.rx.recv().await
    }

    /// Returns an applied search value if one is ready.
    ///
    /// When several values are queued, callers should drain and keep the
    /// last one; applications are delivered in keystroke order.
    pub fn try_recv(&mut self) -> Option<String> {
        self.rx.try_recv().ok()
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
