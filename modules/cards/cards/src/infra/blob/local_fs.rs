//! Filesystem-backed blob store. Objects live at `{root}/{bucket}/{path}` and
//! are served publicly under `{public_base}/{bucket}/{path}`.

use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::domain::ports::BlobStore;
use crate::domain::upload::Bucket;

pub struct LocalBlobStore {
    root: PathBuf,
    public_base: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into().trim_end_matches('/').to_owned(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_file(&self, bucket: Bucket, path: &str) -> anyhow::Result<PathBuf> {
        let relative = Path::new(path);
        let is_plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if path.is_empty() || !is_plain {
            anyhow::bail!("invalid object path '{path}'");
        }
        Ok(self.root.join(bucket.as_str()).join(relative))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn upload(
        &self,
        bucket: Bucket,
        path: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> anyhow::Result<()> {
        let file = self.object_file(bucket, path)?;
        if let Some(parent) = file.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        tokio::fs::write(&file, &bytes)
            .await
            .with_context(|| format!("writing {}", file.display()))?;
        debug!(%bucket, path, content_type, size = bytes.len(), "Stored blob");
        Ok(())
    }

    fn public_url_of(&self, bucket: Bucket, path: &str) -> String {
        format!("{}/{bucket}/{path}", self.public_base)
    }

    async fn remove(&self, bucket: Bucket, path: &str) -> anyhow::Result<()> {
        let file = self.object_file(bucket, path)?;
        tokio::fs::remove_file(&file)
            .await
            .with_context(|| format!("removing {}", file.display()))
    }
}
