//! Load-on-first-use wrapper for collaborator backends.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::errors::AppError;

/// Produces a backend. Called at most once per successful load.
#[async_trait]
pub trait LibraryLoader<T: ?Sized + Send + Sync>: Send + Sync {
    async fn load(&self) -> anyhow::Result<Arc<T>>;
}

struct Builtin<T: ?Sized>(fn() -> Arc<T>);

#[async_trait]
impl<T: ?Sized + Send + Sync + 'static> LibraryLoader<T> for Builtin<T> {
    async fn load(&self) -> anyhow::Result<Arc<T>> {
        Ok((self.0)())
    }
}

/// A backend that is loaded the first time [`LazyLibrary::get`] is awaited.
///
/// Concurrent callers wait on the same load. A failed load fails only the
/// action that triggered it; nothing is retried until the next call.
pub struct LazyLibrary<T: ?Sized + Send + Sync> {
    name: &'static str,
    loader: Option<Box<dyn LibraryLoader<T>>>,
    cell: OnceCell<Arc<T>>,
}

impl<T: ?Sized + Send + Sync + 'static> LazyLibrary<T> {
    pub fn new(name: &'static str, loader: impl LibraryLoader<T> + 'static) -> Self {
        Self {
            name,
            loader: Some(Box::new(loader)),
            cell: OnceCell::new(),
        }
    }

    /// Wraps a constructor that cannot fail.
    pub fn builtin(name: &'static str, make: fn() -> Arc<T>) -> Self {
        Self::new(name, Builtin(make))
    }

    /// Already loaded; the loader is never called.
    #[cfg(test)]
    pub fn ready(name: &'static str, value: Arc<T>) -> Self {
        Self {
            name,
            loader: None,
            cell: OnceCell::from(value),
        }
    }

    #[cfg(test)]
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    pub async fn get(&self) -> Result<Arc<T>, AppError> {
        let value = self
            .cell
            .get_or_try_init(|| async {
                let Some(loader) = self.loader.as_ref() else {
                    return Err(AppError::ResourceLoad(self.name.to_string()));
                };
                match loader.load().await {
                    Ok(value) => {
                        info!("Loaded {}", self.name);
                        Ok(value)
                    }
                    Err(e) => {
                        warn!("Loading {} failed: {e:#}", self.name);
                        Err(AppError::ResourceLoad(self.name.to_string()))
                    }
                }
            })
            .await?;
        Ok(Arc::clone(value))
    }
}
