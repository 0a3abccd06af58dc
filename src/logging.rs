//! Inicializácia logovania pre binárku.
//!
//! Globálny `tracing` subscriber píše na stderr, aby stdout ostal čistý pre
//! report. Úroveň sa riadi premennou `RUST_LOG`, predvolene `info`.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

const DEFAULT_FILTER: &str = "info";

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Chyby pri inicializácii logovania
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Neplatný filter v `RUST_LOG`
    #[error("Neplatný filter logovania: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    /// Globálny subscriber už nastavil niekto iný
    #[error("Nepodarilo sa nastaviť globálny subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Nastaví globálny subscriber. Ďalšie volania nič nerobia.
///
/// `verbose` prepíše predvolenú úroveň na `debug`, ak `RUST_LOG` nie je nastavené.
pub fn init(verbose: bool) -> Result<(), LoggingError> {
    if INITIALIZED.get().is_some() {
        return Ok(());
    }

    let env_filter = build_env_filter(verbose)?;
    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let subscriber = Registry::default().with(env_filter).with(stderr_layer);
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = INITIALIZED.set(());

    tracing::debug!("Logovanie inicializované");
    Ok(())
}

fn build_env_filter(verbose: bool) -> Result<EnvFilter, LoggingError> {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(value) if !value.trim().is_empty() => Ok(EnvFilter::try_new(value)?),
        _ => {
            let level = if verbose { "debug" } else { DEFAULT_FILTER };
            Ok(EnvFilter::try_new(level)?)
        }
    }
}
