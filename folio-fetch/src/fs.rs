//! Local asset directory fetcher.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

use folio_core::error::{FolioError, Result};
use folio_core::traits::ResourceFetcher;

/// Resolves identifiers to public paths of files under an asset directory.
///
/// `hero.png` resolves to `{public_prefix}/hero.png` when
/// `{assets_dir}/hero.png` exists. Identifiers may not escape the asset
/// directory.
#[derive(Clone, Debug)]
pub struct FsFetcher {
    assets_dir: PathBuf,
    public_prefix: String,
}

impl FsFetcher {
    /// Creates a fetcher over `assets_dir`, publishing handles under `public_prefix`.
    pub fn new(assets_dir: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
            public_prefix: public_prefix.into(),
        }
    }

    /// The asset directory.
    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    pub(crate) fn relative_path(&self, resource_id: &str) -> Result<PathBuf> {
        let trimmed = resource_id.trim();
        if trimmed.is_empty() {
            return Err(FolioError::MissingResourceId);
        }

        let path = Path::new(trimmed);
        let mut relative = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => relative.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(FolioError::InvalidResourceId(format!(
                        "'{}' escapes the asset directory",
                        resource_id
                    )));
                }
            }
        }

        if relative.as_os_str().is_empty() {
            return Err(FolioError::InvalidResourceId(resource_id.to_string()));
        }
        Ok(relative)
    }

    fn public_handle(&self, relative: &Path) -> String {
        let parts: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect();
        format!("{}/{}", self.public_prefix.trim_end_matches('/'), parts.join("/"))
    }
}

#[async_trait]
impl ResourceFetcher for FsFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, resource_id: &str) -> Result<String> {
        let relative = self.relative_path(resource_id)?;
        let full = self.assets_dir.join(&relative);

        match tokio::fs::metadata(&full).await {
            Ok(meta) if meta.is_file() => {
                let handle = self.public_handle(&relative);
                debug!(resource_id, handle = %handle, "Resolved local asset");
                Ok(handle)
            }
            Ok(_) => Err(FolioError::InvalidResourceId(format!(
                "'{}' is not a file",
                resource_id
            ))),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(FolioError::ResourceNotFound(resource_id.to_string()))
            }
            Err(e) => Err(FolioError::IoError(e)),
        }
    }
}
