//! TLS material, loaded once and cached for the life of the process.
//!
//! Changes to the files on disk after the first load are never observed.

use std::sync::Arc;
use tokio::sync::OnceCell;

use warden_common::{Result, WardenError};

use crate::settings::Settings;

/// Raw TLS file contents, each present only if its path is configured
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsMaterial {
    pub cert: Option<Vec<u8>>,
    pub key: Option<Vec<u8>>,
    pub ca: Option<Vec<u8>>,
    pub crl: Option<Vec<u8>>,
}

impl TlsMaterial {
    /// Read every configured file concurrently
    pub async fn load(settings: &Settings) -> Result<Self> {
        let [cert, key, ca, crl] = settings.tls_paths();

        let (cert, key, ca, crl) = tokio::try_join!(
            read_optional(cert),
            read_optional(key),
            read_optional(ca),
            read_optional(crl),
        )?;

        Ok(Self { cert, key, ca, crl })
    }
}

async fn read_optional(path: Option<&str>) -> Result<Option<Vec<u8>>> {
    let Some(path) = path else {
        return Ok(None);
    };

    tokio::fs::read(path)
        .await
        .map(Some)
        .map_err(|source| WardenError::TlsLoad {
            path: path.to_string(),
            source,
        })
}

/// One-time TLS loader.
///
/// The first successful [`get_or_load`](Self::get_or_load) fixes the material
/// for the lifetime of the cache; a failed load leaves it empty so the next
/// connect tries again.
#[derive(Debug, Default)]
pub struct TlsMaterialCache {
    material: OnceCell<Arc<TlsMaterial>>,
}

impl TlsMaterialCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached material, loading it on first use
    pub async fn get_or_load(&self, settings: &Settings) -> Result<Arc<TlsMaterial>> {
        self.material
            .get_or_try_init(|| async {
                let material = TlsMaterial::load(settings).await?;
                tracing::info!(
                    cert = material.cert.is_some(),
                    key = material.key.is_some(),
                    ca = material.ca.is_some(),
                    crl = material.crl.is_some(),
                    "TLS material loaded"
                );
                Ok::<_, WardenError>(Arc::new(material))
            })
            .await
            .cloned()
    }

    /// Check whether material has been loaded
    pub fn is_loaded(&self) -> bool {
        self.material.initialized()
    }
}
