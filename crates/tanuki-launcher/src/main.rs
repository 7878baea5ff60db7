//! Tanuki launcher extension entry point.
//!
//! Startup order:
//! 1. Initialize tracing (stderr, stdout belongs to the host)
//! 2. Load preferences from the config file and environment
//! 3. Authenticate with GitLab
//! 4. Serve host events until stdin closes

use tanuki_core::Preferences;
use tanuki_gitlab::HttpConnector;
use tanuki_launcher::{host, Extension, HostEvent};

/// Initialize the tracing subscriber for structured logging.
///
/// Log levels can be controlled via the `RUST_LOG` environment variable:
/// - `RUST_LOG=debug` - Enable debug logs for all modules
/// - `RUST_LOG=info,tanuki=debug` - Info for most, debug for tanuki crates
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tanuki=debug"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();
}

fn main() {
    init_tracing();

    let preferences = match Preferences::load() {
        Ok(preferences) => preferences,
        Err(e) => {
            tracing::error!("Failed to load preferences: {}", e);
            Preferences::default().with_env_overrides(|key| std::env::var(key).ok())
        }
    };

    let extension = Extension::new(Box::new(HttpConnector), preferences.clone());
    extension.dispatch(HostEvent::PreferencesLoaded { preferences });

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    if let Err(e) = host::run(&extension, stdin.lock(), stdout.lock()) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
