//! Offline asset cache.
//!
//! Keeps a local snapshot of the app's companion web assets so they stay
//! readable with no network. One bucket directory per version tag under
//! the cache root; the lifecycle mirrors an installable app:
//!
//! - **install**: populate the current bucket from a fixed manifest,
//!   all-or-nothing (staged into a temp dir, renamed into place)
//! - **activate**: delete every bucket whose name is not the current
//!   version tag
//! - **fetch**: GET only, cache-first; network misses are stored back
//!   into the bucket opportunistically
//!
//! The cache runs independently of the tab controllers; they never call
//! into it and it never touches their state.

use std::path::PathBuf;

use reqwest::{Method, Url};
use thiserror::Error;
use tracing::{debug, warn};

/// Version tag naming the current bucket. Changing the manifest (or any
/// asset shape) means bumping this tag; activate evicts the rest.
pub const CACHE_VERSION: &str = "assets-v1";

/// Fixed manifest of asset paths pre-cached at install time, relative
/// to the configured base URL.
pub const ASSET_MANIFEST: &[&str] = &[
    "index.html",
    "news.html",
    "log.html",
    "style.css",
    "app.js",
    "manifest.webmanifest",
    "icons/icon-192.png",
    "icons/icon-512.png",
];

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Invalid asset base URL: {0}")]
    BadBaseUrl(String),

    #[error("Install failed fetching {path}: {reason}")]
    InstallFailed { path: String, reason: String },

    #[error("Asset not available: {path} ({status})")]
    Unavailable { path: String, status: reqwest::StatusCode },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct AssetCache {
    cache_root: PathBuf,
    version: String,
    base: Url,
    client: reqwest::Client,
}

impl AssetCache {
    pub fn new(cache_root: PathBuf, base_url: &str) -> Result<Self, AssetError> {
        // Url::join treats a base without a trailing slash as a file
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base = Url::parse(&normalized).map_err(|e| AssetError::BadBaseUrl(e.to_string()))?;
        Ok(Self {
            cache_root,
            version: CACHE_VERSION.to_string(),
            base,
            client: reqwest::Client::new(),
        })
    }

    fn bucket_dir(&self) -> PathBuf {
        self.cache_root.join(&self.version)
    }

    /// Flat entry file name: nested asset paths keep a single-level
    /// bucket directory.
    fn entry_name(path: &str) -> String {
        path.replace('/', "__")
    }

    fn entry_path(&self, path: &str) -> PathBuf {
        self.bucket_dir().join(Self::entry_name(path))
    }

    fn asset_url(&self, path: &str) -> Result<Url, AssetError> {
        self.base
            .join(path)
            .map_err(|e| AssetError::BadBaseUrl(e.to_string()))
    }

    /// Populate the current bucket from the manifest. Atomic: every
    /// asset is fetched before anything is written, staged into a
    /// `.partial` directory, and renamed over the bucket only at the
    /// end. A single failed fetch fails the whole install with the
    /// previous bucket (if any) untouched.
    pub async fn install(&self) -> Result<usize, AssetError> {
        let fetches = ASSET_MANIFEST.iter().map(|&path| self.fetch_for_install(path));
        let bodies = futures::future::try_join_all(fetches).await?;

        let staging = self.cache_root.join(format!("{}.partial", self.version));
        let _ = std::fs::remove_dir_all(&staging);
        std::fs::create_dir_all(&staging)?;
        for (path, body) in &bodies {
            std::fs::write(staging.join(Self::entry_name(path)), body)?;
        }

        let bucket = self.bucket_dir();
        let _ = std::fs::remove_dir_all(&bucket);
        std::fs::rename(&staging, &bucket)?;

        debug!(assets = bodies.len(), bucket = %bucket.display(), "Asset cache installed");
        Ok(bodies.len())
    }

    async fn fetch_for_install(&self, path: &str) -> Result<(String, Vec<u8>), AssetError> {
        let url = self.asset_url(path)?;
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(AssetError::InstallFailed {
                path: path.to_string(),
                reason: resp.status().to_string(),
            });
        }
        let body = resp.bytes().await?;
        Ok((path.to_string(), body.to_vec()))
    }

    /// Generational eviction: remove every bucket directory (including
    /// leftover `.partial` staging dirs) whose name is not the current
    /// version tag. Returns the number of directories removed.
    pub fn activate(&self) -> Result<usize, AssetError> {
        if !self.cache_root.exists() {
            return Ok(0);
        }
        let mut evicted = 0;
        for entry in std::fs::read_dir(&self.cache_root)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            if entry.file_name().to_string_lossy() != self.version {
                std::fs::remove_dir_all(entry.path())?;
                evicted += 1;
            }
        }
        if evicted > 0 {
            debug!(evicted, version = %self.version, "Evicted stale asset buckets");
        }
        Ok(evicted)
    }

    /// Cache-first GET: a cached entry is returned without consulting
    /// the network. On a miss, fetch live; a successful same-origin
    /// response is copied into the bucket asynchronously (not awaited
    /// by this path) before the body is returned. A miss with no
    /// network is an error - there is no retry.
    pub async fn fetch(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        self.request(Method::GET, path).await
    }

    /// Method-aware entry point: only GET participates in caching;
    /// anything else passes straight through to the network in both
    /// directions.
    pub async fn request(&self, method: Method, path: &str) -> Result<Vec<u8>, AssetError> {
        if method != Method::GET {
            let url = self.asset_url(path)?;
            let resp = self.client.request(method, url).send().await?;
            let status = resp.status();
            if !status.is_success() {
                return Err(AssetError::Unavailable { path: path.to_string(), status });
            }
            return Ok(resp.bytes().await?.to_vec());
        }

        let entry = self.entry_path(path);
        if entry.exists() {
            debug!(path, "Asset served from cache");
            return Ok(std::fs::read(&entry)?);
        }

        let url = self.asset_url(path)?;
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(AssetError::Unavailable { path: path.to_string(), status });
        }

        let same_origin = is_same_origin(&self.base, resp.url());
        let body = resp.bytes().await?.to_vec();

        if same_origin {
            // Fire-and-forget cache put; the response path never waits on it
            let bucket = self.bucket_dir();
            let copy = body.clone();
            let name = Self::entry_name(path);
            tokio::spawn(async move {
                if let Err(e) = std::fs::create_dir_all(&bucket)
                    .and_then(|_| std::fs::write(bucket.join(&name), &copy))
                {
                    warn!(entry = %name, error = %e, "Failed to store fetched asset");
                }
            });
        }

        Ok(body)
    }

    /// Whether an offline copy exists for every manifest asset.
    pub fn is_installed(&self) -> bool {
        ASSET_MANIFEST.iter().all(|&path| self.entry_path(path).exists())
    }
}

fn is_same_origin(a: &Url, b: &Url) -> bool {
    a.scheme() == b.scheme() && a.host_str() == b.host_str() && a.port_or_known_default() == b.port_or_known_default()
}
