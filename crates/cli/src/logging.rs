use anyhow::Result;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging for the CLI
///
/// `RUST_LOG` takes precedence over `log_level`. Events always go to stderr;
/// with `log_file` they are also written there without ANSI colors.
pub fn init_logging(log_level: Level, log_file: Option<&Path>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(log_level).into());

    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(file)
                    .with_ansi(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

fn default_filter(level: Level) -> String {
    let level = level.as_str().to_lowercase();
    format!("console={level},console_core={level},console_http={level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_workspace_crates() {
        let filter = default_filter(Level::DEBUG);
        assert_eq!(
            filter,
            "console=debug,console_core=debug,console_http=debug"
        );
        assert!(EnvFilter::try_new(&filter).is_ok());
    }

    #[test]
    fn test_log_file_receives_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("console.log");

        init_logging(Level::INFO, Some(path.as_path())).unwrap();
        tracing::info!(target: "console", "session settings loaded");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("session settings loaded"));
        assert!(!contents.contains('\u{1b}'));
    }
}
