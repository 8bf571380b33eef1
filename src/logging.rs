//! File logging. The terminal belongs to the UI, so events go to a file.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Subscriber writing plain-text events to `file`, filtered by `RUST_LOG`.
pub fn file_subscriber(file: File) -> impl Subscriber + Send + Sync {
    tracing_subscriber::registry().with(env_filter()).with(
        fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(true),
    )
}

/// Opens (appending) the log file and installs the global subscriber.
pub fn init(path: &Path) -> color_eyre::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    file_subscriber(file).try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_land_in_file_without_ansi() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("console.log");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .unwrap();

        tracing::subscriber::with_default(file_subscriber(file), || {
            tracing::warn!(status = 500, "request failed");
        });

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("request failed"));
        assert!(contents.contains("status=500"));
        assert!(!contents.contains('\u{1b}'));
    }
}
