//! Theme provider — the single owner of the active theme.
//!
//! Constructed once at application start and kept for the whole session.
//! Descendant views read through it; the only mutation path is
//! [`ThemeProvider::set_theme`]. Holding `&mut self` across each operation
//! gives the one-in-flight-request-per-action model for free: a superseded
//! response can never interleave with a newer one.

use cardinal_common::models::Theme;

use crate::cache::ThemeCache;
use crate::error::ClientError;
use crate::runtime::ThemeRuntime;

/// The subset of the API the provider needs. `ThemeClient` is the real
/// implementation; tests substitute a stub.
#[allow(async_fn_in_trait)]
pub trait ThemeTransport {
    async fn fetch_active(&self) -> Result<Theme, ClientError>;
    async fn save(&self, theme: &Theme) -> Result<Theme, ClientError>;
}

pub struct ThemeProvider<T: ThemeTransport> {
    transport: T,
    cache: ThemeCache,
    runtime: ThemeRuntime,
    /// Last server-confirmed (or fallback) theme.
    active: Theme,
    /// Built-in default, applied when both network and cache come up empty.
    fallback: Theme,
}

impl<T: ThemeTransport> ThemeProvider<T> {
    pub fn new(transport: T, cache: ThemeCache, fallback: Theme) -> Self {
        Self {
            transport,
            cache,
            runtime: ThemeRuntime::new(),
            active: fallback.clone(),
            fallback,
        }
    }

    /// Initial load: server theme if reachable, else cache, else the
    /// built-in default. The cache is only written on a confirmed fetch.
    pub async fn init(&mut self) {
        match self.transport.fetch_active().await {
            Ok(theme) => {
                self.runtime.apply(&theme);
                if let Err(e) = self.cache.store(&theme) {
                    tracing::warn!("Failed to cache fetched theme: {e}");
                }
                self.active = theme;
            }
            Err(e) => {
                tracing::warn!("Theme fetch failed, falling back: {e}");
                let theme = self.cache.load().unwrap_or_else(|| self.fallback.clone());
                self.runtime.apply(&theme);
                self.active = theme;
            }
        }
    }

    /// Apply optimistically, then persist. The cache and the active record
    /// advance only once the server confirms the save; on failure the
    /// runtime is rolled back so prior state is left unchanged.
    pub async fn set_theme(&mut self, theme: Theme) -> Result<(), ClientError> {
        let prior_vars = self.runtime.snapshot().clone();
        self.runtime.apply(&theme);

        match self.transport.save(&theme).await {
            Ok(confirmed) => {
                self.runtime.apply(&confirmed);
                if let Err(e) = self.cache.store(&confirmed) {
                    tracing::warn!("Failed to cache saved theme: {e}");
                }
                self.active = confirmed;
                Ok(())
            }
            Err(e) => {
                self.runtime.restore(prior_vars);
                Err(e)
            }
        }
    }

    pub fn active(&self) -> &Theme {
        &self.active
    }

    pub fn runtime(&self) -> &ThemeRuntime {
        &self.runtime
    }
}
