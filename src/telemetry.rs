//! Structured JSON logging for applications embedding the signer.
//!
//! Enabled with the `tracing` feature. `RUST_LOG` overrides the default filter.

use thiserror::Error;
use tracing::subscriber::{set_global_default, SetGlobalDefaultError};
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("failed to set logger: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("failed to set subscriber: {0}")]
    Subscriber(#[from] SetGlobalDefaultError),
}

/// Composes a subscriber that writes bunyan-formatted JSON records to `sink`.
pub fn get_subscriber<Sink>(
    name: String,
    env_filter: String,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer = BunyanFormattingLayer::new(name, sink);
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Redirects `log` records into `tracing` and installs `subscriber` globally.
///
/// Call once per process.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> Result<(), TelemetryError> {
    LogTracer::init()?;
    set_global_default(subscriber)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schnorr_single_signature::verify;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;
        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_rejections_are_logged_as_json() {
        let captured = Captured::default();
        let subscriber = get_subscriber("test".into(), "debug".into(), captured.clone());
        tracing::subscriber::with_default(subscriber, || {
            assert!(!verify(&[0u8; 63], &[0u8; 32], &[0u8; 32]));
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        let line = output
            .lines()
            .find(|line| line.contains("unexpected input length"))
            .expect("rejection event should be recorded");
        let record: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(record["name"], "test");
        assert_eq!(record["signature_len"], 63);
        assert_eq!(record["message_len"], 32);
        assert_eq!(record["public_key_len"], 32);
    }
}
