use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::Result;
use crate::app::session::Session;
use crate::config::Config;
use crate::domain::RssFeed;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::normalizer::Normalizer;
use crate::store::sqlite::SqliteStore;
use crate::store::Store;

/// Everything a command handler works against.
pub struct AppState {
    pub store: Arc<dyn Store + Send + Sync>,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub normalizer: Normalizer,
    pub session: Session,
    /// Where handlers print their results.
    pub out: Box<dyn Write + Send + Sync>,
    config: Config,
    config_path: Option<PathBuf>,
}

impl AppState {
    /// Open the database named by `config` and remember where the config
    /// lives so session changes can be written back.
    pub fn new(config: Config, config_path: PathBuf) -> Result<Self> {
        let store = Arc::new(SqliteStore::new(config.db_path())?);
        tracing::debug!(db = %config.db_path().display(), "store opened");
        Self::assemble(store, config, Some(config_path))
    }

    /// In-memory database, no config file. Session changes stay in memory.
    pub fn in_memory() -> Result<Self> {
        let store = Arc::new(SqliteStore::in_memory()?);
        Self::assemble(store, Config::default(), None)
    }

    fn assemble(
        store: Arc<dyn Store + Send + Sync>,
        config: Config,
        config_path: Option<PathBuf>,
    ) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new());

        Ok(Self {
            store,
            fetcher,
            normalizer: Normalizer::new(),
            session: Session::from_config(&config),
            out: Box::new(std::io::stdout()),
            config,
            config_path,
        })
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn with_output<W: Write + Send + Sync + 'static>(mut self, out: W) -> Self {
        self.out = Box::new(out);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Copy the session into the config and write it to disk.
    pub fn persist_session(&mut self) -> Result<()> {
        self.config.current_user_name = self.session.current_user_name().map(String::from);

        if let Some(path) = &self.config_path {
            self.config.save(path)?;
            tracing::debug!(path = %path.display(), "session saved");
        }

        Ok(())
    }

    /// Fetch `url` and parse the body as a feed.
    pub async fn fetch_feed(&self, url: &str) -> Result<RssFeed> {
        let body = self.fetcher.fetch(url).await?;
        self.normalizer.normalize(&body)
    }
}
