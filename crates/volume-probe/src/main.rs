//! volume-probe - writes a marker file into each mounted data directory,
//! then holds the process open so the container and its mounts can be
//! inspected from outside.
//!
//! A manual diagnostic: paths, contents and the hold duration are fixed.

use std::path::Path;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Marker writes attempted in order. One failure does not stop the next
/// attempt; each outcome is reported on its own.
const PROBE_TARGETS: [(&str, &str); 2] = [
    ("/data/folder1/myfile1.txt", "This is a test file in folder1."),
    ("/data/folder2/myfile2.txt", "This is a test file in folder2."),
];

/// How long the process stays alive after probing
const HOLD: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() {
    init_tracing();

    run_probes(&PROBE_TARGETS).await;

    info!(hold_secs = HOLD.as_secs(), "probe writes finished, holding");
    tokio::time::sleep(HOLD).await;
}

/// Attempt every marker write, reporting each outcome on stdout
async fn run_probes(targets: &[(&str, &str)]) -> Vec<std::io::Result<()>> {
    let mut results = Vec::with_capacity(targets.len());

    for (path, content) in targets {
        let result = write_marker(Path::new(path), content).await;
        match &result {
            Ok(()) => println!("Successfully wrote to {}", path),
            Err(e) => println!("Error writing to {}: {}", path, e),
        }
        results.push(result);
    }

    results
}

/// Create or truncate `path` and write `content` into it
async fn write_marker(path: &Path, content: &str) -> std::io::Result<()> {
    tokio::fs::write(path, content).await
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("volume_probe=info"))
        .expect("Failed to create env filter");

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_marker_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marker.txt");

        write_marker(&path, "probe content").await.unwrap();

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(written, "probe content");
    }

    #[tokio::test]
    async fn test_write_marker_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marker.txt");

        write_marker(&path, "a much longer earlier content").await.unwrap();
        write_marker(&path, "short").await.unwrap();

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(written, "short");
    }

    #[tokio::test]
    async fn test_failed_write_does_not_stop_the_next() {
        let dir = tempfile::tempdir().unwrap();

        // First target's parent directory does not exist, so it fails the
        // way an absent mount does; the second is plainly writable.
        let blocked = dir.path().join("missing-mount/marker1.txt");
        let open = dir.path().join("marker2.txt");
        let blocked_str = blocked.to_str().unwrap();
        let open_str = open.to_str().unwrap();

        let targets = [(blocked_str, "one"), (open_str, "two")];
        let results = run_probes(&targets).await;

        assert_eq!(results.len(), 2);
        assert!(results[0].is_err());
        assert!(results[1].is_ok());

        let written = tokio::fs::read_to_string(&open).await.unwrap();
        assert_eq!(written, "two");
    }
}
