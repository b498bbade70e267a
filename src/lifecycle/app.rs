use crate::framework::FacadeContext;
use crate::index::IndexSink;
use crate::lifecycle::{AppConfig, ConfigError};
use crate::store::{Snapshot, StoreActor, StoreClient};
use std::fs;
use std::sync::Arc;
use tracing::{error, info};

/// Everything a command needs, passed explicitly to each of them.
///
/// `AppContext` owns the running store actor. Dropping the last
/// [`StoreClient`] stops it; [`AppContext::shutdown`] does that and waits.
///
/// ```ignore
/// let app = AppContext::load(AppConfig::profile("dev")?, Arc::new(MemoryIndex::new()))?;
/// let snapshot = app.store.snapshot().await?;
/// // ...
/// app.shutdown().await?;
/// ```
pub struct AppContext {
    pub config: AppConfig,
    pub store: StoreClient,
    pub index: Arc<dyn IndexSink>,
    handle: tokio::task::JoinHandle<()>,
}

impl AppContext {
    /// Spawns the store actor over `snapshot`. Must be called inside a Tokio
    /// runtime, with a config that passed [`AppConfig::validate`].
    pub fn start(config: AppConfig, snapshot: Snapshot, index: Arc<dyn IndexSink>) -> Self {
        let (actor, store) = StoreActor::new(config.store_buffer, snapshot);
        let handle = tokio::spawn(actor.run());
        Self {
            config,
            store,
            index,
            handle,
        }
    }

    /// Like [`start`](Self::start), reading the initial snapshot from
    /// `config.data_file` when one is set.
    pub fn load(config: AppConfig, index: Arc<dyn IndexSink>) -> Result<Self, ConfigError> {
        config.validate()?;
        let snapshot = match &config.data_file {
            Some(path) => {
                let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.clone(),
                    source,
                })?;
                let snapshot: Snapshot =
                    serde_json::from_str(&contents).map_err(|source| ConfigError::Data {
                        path: path.clone(),
                        source,
                    })?;
                info!(path = %path.display(), version = snapshot.version(), "Data loaded");
                snapshot
            }
            None => Snapshot::new(),
        };
        Ok(Self::start(config, snapshot, index))
    }

    /// Facade context whose links start with `{host}{api_url_prefix}`.
    pub fn facade_context(&self, host: &str) -> FacadeContext {
        FacadeContext::new(format!("{}{}", host, self.config.api_url_prefix))
    }

    /// Closes the store channel and waits for the actor to finish.
    pub async fn shutdown(self) -> Result<(), tokio::task::JoinError> {
        info!("Shutting down...");
        drop(self.store);
        if let Err(e) = self.handle.await {
            error!("Store task failed: {:?}", e);
            return Err(e);
        }
        info!("Shutdown complete.");
        Ok(())
    }
}
