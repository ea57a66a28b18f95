use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use thiserror::Error;

use crate::engine::assets::remote_texture::TextureSlot;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResolutionError {
    #[error("stored object not found: {0}")]
    NotFound(String),
    #[error("network request failed: {0}")]
    Network(String),
    #[error("malformed object metadata: {0}")]
    Malformed(String),
}

/// A finished fetch, handed back to the main world by a background task.
pub struct FetchComplete {
    pub generation: u64,
    pub slot: TextureSlot,
    pub result: Result<Vec<u8>, ResolutionError>,
}

#[derive(Default)]
struct CompletionInbox {
    generation: u64,
    completed: Vec<FetchComplete>,
}

/// Resolves logical object names against the storage bucket and fetches
/// the bytes behind them. Each call is an independent request: no cache,
/// no in-flight dedup, no retry. Completions are queued cross-thread and
/// drained on the main schedule; bumping the generation discards
/// anything still in flight for a torn-down scene.
#[derive(Resource)]
pub struct StorageResolver {
    root: String,
    inbox: Arc<Mutex<CompletionInbox>>,
}

impl StorageResolver {
    pub fn new(root: &str) -> Self {
        Self {
            root: root.trim_end_matches('/').to_string(),
            inbox: Arc::new(Mutex::new(CompletionInbox::default())),
        }
    }

    /// Metadata URL for a bucket object. Path separators inside the
    /// object name are escaped the way the storage API expects.
    pub fn object_url(&self, object: &str) -> String {
        format!("{}/{}", self.root, object.replace('/', "%2F"))
    }

    /// Kick off one resolution: metadata request, then byte fetch of the
    /// tokenised download URL. Returns immediately; the outcome arrives
    /// through [`StorageResolver::drain`].
    pub fn request(&self, object: &str, slot: TextureSlot) {
        let url = self.object_url(object);
        let object = object.to_string();
        let inbox = self.inbox.clone();
        let generation = match self.inbox.lock() {
            Ok(inbox) => inbox.generation,
            Err(_) => return,
        };
        info!("requesting remote object {object} for {slot:?}");

        #[cfg(not(target_arch = "wasm32"))]
        {
            bevy::tasks::IoTaskPool::get_or_init(bevy::tasks::TaskPool::new)
                .spawn(async move {
                    let result = fetch_object_blocking(&url, &object);
                    push_completion(&inbox, generation, slot, result);
                })
                .detach();
        }

        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(async move {
                let result = fetch_object_async(&url, &object).await;
                push_completion(&inbox, generation, slot, result);
            });
        }
    }

    /// Abandon everything still in flight. Late completions from an
    /// earlier generation are dropped by [`StorageResolver::drain`].
    pub fn cancel_pending(&self) {
        if let Ok(mut inbox) = self.inbox.lock() {
            inbox.generation += 1;
            inbox.completed.clear();
        }
    }

    /// Take all completions belonging to the current generation.
    pub fn drain(&self) -> Vec<FetchComplete> {
        let Ok(mut inbox) = self.inbox.lock() else {
            return Vec::new();
        };
        let generation = inbox.generation;
        let completed = std::mem::take(&mut inbox.completed);
        completed
            .into_iter()
            .filter(|done| done.generation == generation)
            .collect()
    }

    #[cfg(test)]
    fn push_for_test(&self, done: FetchComplete) {
        push_completion(&self.inbox, done.generation, done.slot, done.result);
    }
}

impl Default for StorageResolver {
    fn default() -> Self {
        Self::new(constants::storage::STORAGE_BUCKET_ROOT)
    }
}

/// Scene teardown: abandon in-flight resolutions so their completions
/// never mutate slots that no longer matter.
pub fn cancel_resolutions_on_exit(
    mut exit_events: EventReader<AppExit>,
    resolver: Res<StorageResolver>,
) {
    if exit_events.read().next().is_some() {
        resolver.cancel_pending();
    }
}

fn push_completion(
    inbox: &Arc<Mutex<CompletionInbox>>,
    generation: u64,
    slot: TextureSlot,
    result: Result<Vec<u8>, ResolutionError>,
) {
    if let Ok(mut inbox) = inbox.lock() {
        inbox.completed.push(FetchComplete {
            generation,
            slot,
            result,
        });
    }
}

/// Extract the tokenised download URL from object metadata JSON.
fn parse_download_url(metadata: &str, object_url: &str) -> Result<String, ResolutionError> {
    let value: serde_json::Value = serde_json::from_str(metadata)
        .map_err(|e| ResolutionError::Malformed(e.to_string()))?;
    let token = value
        .get("downloadTokens")
        .and_then(|t| t.as_str())
        .and_then(|t| t.split(',').next())
        .ok_or_else(|| ResolutionError::Malformed("missing downloadTokens".to_string()))?;
    Ok(format!("{object_url}?alt=media&token={token}"))
}

#[cfg(not(target_arch = "wasm32"))]
fn fetch_object_blocking(object_url: &str, object: &str) -> Result<Vec<u8>, ResolutionError> {
    let response = reqwest::blocking::get(object_url)
        .map_err(|e| ResolutionError::Network(e.to_string()))?;
    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(ResolutionError::NotFound(object.to_string()));
    }
    if !response.status().is_success() {
        return Err(ResolutionError::Network(format!(
            "metadata request returned {}",
            response.status()
        )));
    }
    let metadata = response
        .text()
        .map_err(|e| ResolutionError::Network(e.to_string()))?;
    let download_url = parse_download_url(&metadata, object_url)?;

    let response = reqwest::blocking::get(&download_url)
        .map_err(|e| ResolutionError::Network(e.to_string()))?;
    if !response.status().is_success() {
        return Err(ResolutionError::Network(format!(
            "download returned {}",
            response.status()
        )));
    }
    response
        .bytes()
        .map(|b| b.to_vec())
        .map_err(|e| ResolutionError::Network(e.to_string()))
}

#[cfg(target_arch = "wasm32")]
async fn fetch_object_async(object_url: &str, object: &str) -> Result<Vec<u8>, ResolutionError> {
    let response = reqwest::get(object_url)
        .await
        .map_err(|e| ResolutionError::Network(e.to_string()))?;
    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(ResolutionError::NotFound(object.to_string()));
    }
    if !response.status().is_success() {
        return Err(ResolutionError::Network(format!(
            "metadata request returned {}",
            response.status()
        )));
    }
    let metadata = response
        .text()
        .await
        .map_err(|e| ResolutionError::Network(e.to_string()))?;
    let download_url = parse_download_url(&metadata, object_url)?;

    let response = reqwest::get(&download_url)
        .await
        .map_err(|e| ResolutionError::Network(e.to_string()))?;
    if !response.status().is_success() {
        return Err(ResolutionError::Network(format!(
            "download returned {}",
            response.status()
        )));
    }
    response
        .bytes()
        .await
        .map(|b| b.to_vec())
        .map_err(|e| ResolutionError::Network(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_url_escapes_path_separators() {
        let resolver = StorageResolver::new("https://bucket.example/o");
        assert_eq!(
            resolver.object_url("skybox/skybox_px.jpg"),
            "https://bucket.example/o/skybox%2Fskybox_px.jpg"
        );
    }

    #[test]
    fn download_url_carries_first_token() {
        let url = parse_download_url(
            r#"{"downloadTokens": "abc123,def456"}"#,
            "https://bucket.example/o/particle.jpeg",
        )
        .unwrap();
        assert_eq!(
            url,
            "https://bucket.example/o/particle.jpeg?alt=media&token=abc123"
        );
    }

    #[test]
    fn metadata_without_token_is_malformed() {
        let result = parse_download_url(r#"{"name": "particle.jpeg"}"#, "u");
        assert!(matches!(result, Err(ResolutionError::Malformed(_))));
    }

    #[test]
    fn metadata_that_is_not_json_is_malformed() {
        let result = parse_download_url("<html>404</html>", "u");
        assert!(matches!(result, Err(ResolutionError::Malformed(_))));
    }

    #[test]
    fn drain_returns_current_generation_completions() {
        let resolver = StorageResolver::new("https://bucket.example/o");
        resolver.push_for_test(FetchComplete {
            generation: 0,
            slot: TextureSlot::ParticleSprite,
            result: Ok(vec![1, 2, 3]),
        });
        let drained = resolver.drain();
        assert_eq!(drained.len(), 1);
        assert!(resolver.drain().is_empty());
    }

    #[test]
    fn cancelled_generation_completions_are_discarded() {
        let resolver = StorageResolver::new("https://bucket.example/o");
        resolver.cancel_pending();
        // a task spawned before the cancel completes late, carrying the
        // stale generation
        resolver.push_for_test(FetchComplete {
            generation: 0,
            slot: TextureSlot::FocalReflection,
            result: Ok(vec![0]),
        });
        assert!(resolver.drain().is_empty());
    }
}
