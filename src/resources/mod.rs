/**
 * This module contains all logic for fetching model files from disk or over HTTP.
 *
 * Fetching is the only place where the viewer waits on I/O. Sources return
 * `'static` futures so the caller can drive them wherever it likes (a tokio
 * worker natively, `spawn_local` on the web) and post the result back to the
 * event loop.
 */
pub mod model;

use std::{future::Future, pin::Pin};

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

/// A boxed future that can cross threads natively. On the web nothing is
/// `Send`, so the bound is dropped there.
#[cfg(not(target_arch = "wasm32"))]
pub type FetchFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;
#[cfg(target_arch = "wasm32")]
pub type FetchFuture<T> = Pin<Box<dyn Future<Output = T> + 'static>>;

#[cfg(not(target_arch = "wasm32"))]
pub type ProgressFn = Box<dyn FnMut(Progress) + Send + 'static>;
#[cfg(target_arch = "wasm32")]
pub type ProgressFn = Box<dyn FnMut(Progress) + 'static>;

/// Bytes received so far for one fetch. Advisory only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub loaded: u64,
    pub total: Option<u64>,
}

impl Progress {
    pub fn fraction(&self) -> Option<f64> {
        match self.total {
            Some(0) => Some(1.0),
            Some(total) => Some(self.loaded as f64 / total as f64),
            None => None,
        }
    }
}

pub trait AssetSource {
    /// Fetches the file at `path` (relative to the source's root).
    fn fetch(&self, path: &str, progress: ProgressFn) -> FetchFuture<anyhow::Result<Vec<u8>>>;
}

/// Reads assets from a directory on disk.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct FsSource {
    root: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FsSource {
    const CHUNK_SIZE: usize = 64 * 1024;

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl AssetSource for FsSource {
    fn fetch(
        &self,
        path: &str,
        mut progress: ProgressFn,
    ) -> FetchFuture<anyhow::Result<Vec<u8>>> {
        use anyhow::Context;
        use tokio::io::AsyncReadExt;

        let path = self.root.join(path);
        Box::pin(async move {
            let mut file = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("opening {}", path.display()))?;
            let total = file.metadata().await.ok().map(|meta| meta.len());
            let mut data = Vec::with_capacity(total.unwrap_or(0) as usize);
            let mut chunk = vec![0u8; Self::CHUNK_SIZE];
            loop {
                let read = file
                    .read(&mut chunk)
                    .await
                    .with_context(|| format!("reading {}", path.display()))?;
                if read == 0 {
                    break;
                }
                data.extend_from_slice(&chunk[..read]);
                progress(Progress {
                    loaded: data.len() as u64,
                    total,
                });
            }
            Ok(data)
        })
    }
}

/// Fetches assets relative to the page origin.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Debug, Default)]
pub struct HttpSource;

#[cfg(target_arch = "wasm32")]
fn format_url(file_name: &str) -> anyhow::Result<reqwest::Url> {
    let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let origin = window
        .location()
        .origin()
        .map_err(|_| anyhow::anyhow!("page has no origin"))?;
    let base = reqwest::Url::parse(&format!("{}/assets/", origin))?;
    Ok(base.join(file_name)?)
}

#[cfg(target_arch = "wasm32")]
impl AssetSource for HttpSource {
    fn fetch(
        &self,
        path: &str,
        mut progress: ProgressFn,
    ) -> FetchFuture<anyhow::Result<Vec<u8>>> {
        let path = path.to_string();
        Box::pin(async move {
            let url = format_url(&path)?;
            let response = reqwest::get(url).await?.error_for_status()?;
            let total = response.content_length();
            let data = response.bytes().await?.to_vec();
            progress(Progress {
                loaded: data.len() as u64,
                total,
            });
            Ok(data)
        })
    }
}
