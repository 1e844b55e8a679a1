//! Memoizing wrapper around a [`TextEmbedder`].
//!
//! Batches usually reuse the same query across many URLs; the cache is keyed
//! by the BLAKE3 hash of the text so each distinct query is embedded once.

use std::sync::Arc;

use moka::sync::Cache;
use tracing::debug;

use super::capability::TextEmbedder;
use super::error::EmbeddingError;

#[inline]
fn hash_text(text: &str) -> [u8; 32] {
    *blake3::hash(text.as_bytes()).as_bytes()
}

pub struct CachedEmbedder<E> {
    inner: E,
    entries: Cache<[u8; 32], Arc<Vec<f32>>>,
}

impl<E> std::fmt::Debug for CachedEmbedder<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedEmbedder")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

impl<E: TextEmbedder> CachedEmbedder<E> {
    /// Wraps `inner`, keeping at most `capacity` embeddings.
    pub fn new(inner: E, capacity: u64) -> Self {
        Self {
            inner,
            entries: Cache::builder().max_capacity(capacity).build(),
        }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    /// Number of cached embeddings (approximate until pending tasks run).
    pub fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }
}

impl<E: TextEmbedder> TextEmbedder for CachedEmbedder<E> {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let key = hash_text(text);

        if let Some(hit) = self.entries.get(&key) {
            debug!(text_len = text.len(), "Embedding cache hit");
            return Ok(hit.as_ref().clone());
        }

        let embedding = self.inner.embed(text)?;
        self.entries.insert(key, Arc::new(embedding.clone()));
        Ok(embedding)
    }

    fn embedding_dim(&self) -> usize {
        self.inner.embedding_dim()
    }
}
