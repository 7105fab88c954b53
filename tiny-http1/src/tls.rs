//! Process wide TLS client configuration.
//!
//! Built once on first use, from any thread, and kept until the process exits.

use std::sync::{Arc, OnceLock};

static CLIENT_CONFIG: OnceLock<Arc<rustls::ClientConfig>> = OnceLock::new();

/// Client configuration trusting the Mozilla root certificates.
pub fn client_config() -> Arc<rustls::ClientConfig> {
    CLIENT_CONFIG
        .get_or_init(|| {
            log::debug!("initializing TLS client configuration");

            let mut root_store = rustls::RootCertStore::empty();
            root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

            let config = rustls::ClientConfig::builder()
                .with_root_certificates(root_store)
                .with_no_client_auth();

            Arc::new(config)
        })
        .clone()
}
