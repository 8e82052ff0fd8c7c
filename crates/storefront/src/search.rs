//! Debounced catalog search.
//!
//! Rapid keystrokes are coalesced into a single deferred query: every call
//! cancels the previously scheduled delivery and schedules a new one, so a
//! burst of N keystrokes closer together than the delay yields exactly one
//! query, carrying the text of the last keystroke.
//!
//! The pending timer is the only thing that gets cancelled. Once the delay
//! has elapsed and the query text is on the channel, any request made for it
//! runs to completion - in-flight HTTP is never aborted, which leaves the
//! accepted last-response-wins ordering of the overall design intact.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Handle to the single pending deferred search, if any.
///
/// Owned by the page state and passed by value into [`debounce`]; there is
/// never more than one live handle.
pub type DebounceHandle = JoinHandle<()>;

/// Record a keystroke: cancel any pending query and schedule `text` for
/// delivery on `queries` after `delay`.
///
/// Returns the handle for the newly scheduled delivery; the caller stores it
/// and hands it back on the next keystroke.
pub fn debounce(
    previous: Option<DebounceHandle>,
    text: String,
    delay: Duration,
    queries: &mpsc::UnboundedSender<String>,
) -> DebounceHandle {
    if let Some(handle) = previous {
        handle.abort();
    }

    let queries = queries.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        // A dropped receiver means the page is gone; nothing left to do.
        let _ = queries.send(text);
    })
}
