//! Startup wiring: seed data, record store and motivation source.
//!
//! Everything here runs once before the HTTP server binds. Failures that make
//! the service unusable surface as [`StartupError`]. A missing store or API
//! key is not one of them: the store reports it per request and motivation
//! falls back to the catalog.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use mockable::DefaultClock;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::AppSettings;
use crate::domain::ports::{JourneyRepository, UnconfiguredJourneyRepository};
use crate::domain::{JourneyService, MotivationService, SeedData, SeedDataError};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryJourneyRepository;
use crate::outbound::motivation::{
    MotivationHttpConfig, MotivationHttpSource, MotivationHttpSourceError,
};
use crate::outbound::persistence::{
    DbPool, DieselJourneyRepository, MigrationError, PoolConfig, PoolError,
    run_pending_migrations,
};

/// Errors returned while preparing the service.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The seed file could not be read.
    #[error("failed to read seed data at {path}: {source}")]
    SeedRead {
        /// Configured seed path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The seed file was read but is not valid seed data.
    #[error("invalid seed data: {0}")]
    Seed(#[from] SeedDataError),
    /// Pending migrations could not be applied.
    #[error("database migration failed: {0}")]
    Migration(#[from] MigrationError),
    /// The connection pool could not be built.
    #[error("database pool setup failed: {0}")]
    Pool(#[from] PoolError),
    /// The text-generation adapter could not be built.
    #[error("motivation source setup failed: {0}")]
    Motivation(#[from] MotivationHttpSourceError),
}

/// Which record store the service talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// PostgreSQL via Diesel.
    Postgres,
    /// Process-local store.
    InMemory,
    /// Nothing configured; every call reports a configuration error.
    Unconfigured,
}

impl StoreKind {
    /// Pick the store implied by `settings`.
    ///
    /// An explicit in-memory request wins over a database URL.
    pub fn from_settings(settings: &AppSettings) -> Self {
        if settings.in_memory_store {
            Self::InMemory
        } else if settings.database_url().is_some() {
            Self::Postgres
        } else {
            Self::Unconfigured
        }
    }
}

/// Service graph shared by every HTTP worker.
pub struct Application {
    /// Reconciler behind the journey ports.
    pub journey: Arc<JourneyService<dyn JourneyRepository>>,
    /// Port bundle handed to the HTTP handlers.
    pub http_state: HttpState,
}

/// Read seed data from `path`, or use the built-in default when unset.
///
/// # Errors
/// Returns [`StartupError::SeedRead`] when the file cannot be read and
/// [`StartupError::Seed`] when its contents are invalid.
pub fn load_seed_data(path: Option<&Path>) -> Result<SeedData, StartupError> {
    let Some(path) = path else {
        return Ok(SeedData::default());
    };
    let read_error = |source| StartupError::SeedRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "seed path must name a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir.read_to_string(Path::new(file_name)).map_err(read_error)?;
    let seed = SeedData::from_json(&contents)?;
    info!(path = %path.display(), "loaded seed data");
    Ok(seed)
}

/// Build the record store selected by `settings`.
///
/// For PostgreSQL this applies pending migrations before building the pool.
///
/// # Errors
/// Returns migration or pool errors for a configured database.
pub async fn build_repository(
    settings: &AppSettings,
) -> Result<Arc<dyn JourneyRepository>, StartupError> {
    match (StoreKind::from_settings(settings), settings.database_url()) {
        (StoreKind::InMemory, _) => {
            warn!("using the in-memory record store; data is lost on restart");
            Ok(Arc::new(InMemoryJourneyRepository::new(Arc::new(
                DefaultClock,
            ))))
        }
        (StoreKind::Postgres, Some(database_url)) => {
            let applied = run_pending_migrations(database_url.to_owned()).await?;
            info!(count = applied.len(), "applied pending migrations");
            let pool = DbPool::new(PoolConfig::new(database_url)).await?;
            Ok(Arc::new(DieselJourneyRepository::new(pool)))
        }
        (StoreKind::Postgres | StoreKind::Unconfigured, _) => {
            warn!(
                "no record store configured; set JOURNEY_DATABASE_URL or JOURNEY_IN_MEMORY_STORE"
            );
            Ok(Arc::new(UnconfiguredJourneyRepository))
        }
    }
}

/// Build the motivation use case, disabled when no API key is set.
///
/// # Errors
/// Returns [`StartupError::Motivation`] when the configured endpoint is not a
/// valid URL.
pub fn build_motivation(settings: &AppSettings) -> Result<MotivationService, StartupError> {
    let Some(api_key) = settings.motivation_api_key() else {
        warn!("JOURNEY_MOTIVATION_API_KEY is not set; motivational messages will be disabled");
        return Ok(MotivationService::disabled());
    };
    let source = MotivationHttpSource::new(MotivationHttpConfig {
        endpoint: settings.motivation_endpoint().to_owned(),
        model: settings.motivation_model().to_owned(),
        api_key: api_key.to_owned(),
        timeout: settings.motivation_timeout(),
    })?;
    info!(model = settings.motivation_model(), "generated motivation enabled");
    Ok(MotivationService::new(Arc::new(source)))
}

/// Assemble the service graph from `settings`.
///
/// # Errors
/// Propagates seed, store and motivation setup failures.
pub async fn build_application(settings: &AppSettings) -> Result<Application, StartupError> {
    let seed = load_seed_data(settings.seed_path.as_deref())?;
    let repository = build_repository(settings).await?;
    let motivation = build_motivation(settings)?;
    let journey: Arc<JourneyService<dyn JourneyRepository>> =
        Arc::new(JourneyService::new(repository, seed));
    let http_state = HttpState::new(journey.clone(), journey.clone(), Arc::new(motivation));
    Ok(Application {
        journey,
        http_state,
    })
}
