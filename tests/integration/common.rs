use std::sync::Once;

use syndesis_qe::{LiveContext, QeConfig};

static TRACING: Once = Once::new();

/// Install a tracing subscriber honouring `RUST_LOG` once per test binary.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Connect to every service named by the environment.
///
/// Panics with a pointer to the missing setting instead of skipping, so an
/// ignored test run without configuration fails loudly.
pub async fn live_context() -> LiveContext {
    init_tracing();

    let config = QeConfig::from_env().unwrap_or_else(|err| {
        panic!(
            "\n\nIntegration tests need a Syndesis installation and service accounts.\n\
             {err}\n\
             Set SYNDESIS_URL, SYNDESIS_TOKEN and point SYNDESIS_QE_CREDENTIALS at a\n\
             credentials.json containing twitter_listen, twitter_talky, salesforce and github.\n"
        )
    });

    LiveContext::connect(&config)
        .await
        .unwrap_or_else(|err| panic!("Failed to connect to services: {err}"))
}
