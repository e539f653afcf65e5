//! Diagnostics callback.
//!
//! The engine never fails loudly during reconciliation; the few conditions
//! worth surfacing (a swallowed re-entrant notification, a skipped echo for
//! a specifier-less object kind) are reported through a host-installable
//! log callback instead.

use std::fmt;
use std::sync::{Mutex, OnceLock};

/// Log level for the diagnostics callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

fn log_slot() -> &'static Mutex<Option<LogCallback>> {
    static SLOT: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    SLOT.get_or_init(|| Mutex::new(None))
}

/// Install the log callback.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    let mut guard = log_slot().lock().expect("log callback lock");
    *guard = Some(Box::new(callback));
}

/// Remove the log callback.
pub fn clear_log_callback() {
    let mut guard = log_slot().lock().expect("log callback lock");
    *guard = None;
}

/// Deliver a message to the installed callback, if any.
pub(crate) fn log_args(level: LogLevel, args: fmt::Arguments<'_>) {
    if let Ok(guard) = log_slot().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, &args.to_string());
        }
    }
}

macro_rules! diag {
    ($level:expr, $($arg:tt)*) => {
        $crate::diag::log_args($level, format_args!($($arg)*))
    };
}
pub(crate) use diag;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_log_callback_receives_messages() {
        // the callback slot is global, so only count our own marker;
        // other tests in this binary may log concurrently
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);
        set_log_callback(move |_, msg| {
            if msg.contains("diag-self-test-marker") {
                count_clone.fetch_add(1, Ordering::SeqCst);
            }
        });

        diag!(LogLevel::Debug, "diag-self-test-marker {}", 42);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        clear_log_callback();
        diag!(LogLevel::Debug, "diag-self-test-marker {}", 42);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
