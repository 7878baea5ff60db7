//! Line-delimited JSON transport between the launcher host and the extension.
//!
//! Each input line is one [`HostEvent`]; each action produced in response is
//! written back as one line. The loop ends when the input closes.

use std::io::{BufRead, Write};

use thiserror::Error;

use crate::events::HostEvent;
use crate::extension::Extension;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Host I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode action: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Serve events from `reader` until EOF.
///
/// Malformed lines are logged and skipped; only transport failures end the
/// loop early.
pub fn run<R: BufRead, W: Write>(
    extension: &Extension,
    reader: R,
    mut writer: W,
) -> Result<(), HostError> {
    tracing::info!("Waiting for host events");

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event: HostEvent = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed event");
                continue;
            }
        };

        if let Some(action) = extension.dispatch(event) {
            serde_json::to_writer(&mut writer, &action)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
    }

    tracing::info!("Host closed the connection");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, MockApi};
    use std::io::Cursor;
    use std::sync::Arc;
    use tanuki_core::{Action, Preferences};
    use tanuki_gitlab::{ApiResult, GitLabApi};

    fn extension() -> Extension {
        let connector = |_url: &str, _token: &str| -> ApiResult<Arc<dyn GitLabApi>> {
            let mut api = MockApi::new();
            api.expect_current_user().returning(|| Ok(testing::user()));
            api.expect_groups()
                .returning(|_| Ok(vec![testing::group(3, "platform", None)]));
            Ok(Arc::new(api))
        };
        Extension::new(Box::new(connector), Preferences::default())
    }

    fn serve(input: &str) -> Vec<Action> {
        let mut output = Vec::new();
        run(&extension(), Cursor::new(input), &mut output).unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_one_line_per_action() {
        let input = concat!(
            r#"{"event":"preferences_loaded","preferences":{"kw":"gl","url":"https://gitlab.example.com","access_token":"glpat-test"}}"#,
            "\n",
            r#"{"event":"keyword_query","argument":""}"#,
            "\n",
            r#"{"event":"keyword_query","argument":"groups plat"}"#,
            "\n",
        );

        let actions = serve(input);
        assert_eq!(actions.len(), 2);

        let Action::RenderResultList { items } = &actions[0] else {
            panic!("Expected RenderResultList");
        };
        assert_eq!(items.len(), 3);

        let Action::RenderResultList { items } = &actions[1] else {
            panic!("Expected RenderResultList");
        };
        assert_eq!(items[0].title, "platform");
    }

    #[test]
    fn test_skips_blank_and_malformed_lines() {
        let input = "\n   \nnot json\n{\"event\":\"unknown\"}\n{\"event\":\"keyword_query\"}\n";

        let actions = serve(input);
        assert_eq!(actions.len(), 1);
        assert!(matches!(actions[0], Action::RenderResultList { .. }));
    }

    #[test]
    fn test_empty_input() {
        assert!(serve("").is_empty());
    }
}
