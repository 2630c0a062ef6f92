//! Concurrent model loading with an all-or-nothing barrier
//!
//! Every [`ModelRequest`] is loaded on its own worker thread. Results come back
//! over a channel and are fed into a [`LoadBarrier`], which resolves once every
//! request has succeeded (results in request order) or as soon as the first
//! one fails.
//!
//! # Example
//!
//! ```ignore
//! let requests = vec![ModelRequest::new("assets/models/1.glb", 0, 2.0)];
//! let loaded = ModelLoader::load_all::<ModelFragment>(&requests)?;
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::thread;

use serde::{Serialize, Deserialize};

use crate::asset_error::AssetError;

/// Trait for types that can be loaded from files.
///
/// The type must be `Send + 'static` so it can be produced on a worker thread.
pub trait Asset: Sized + Send + 'static {
    /// Load this asset from the given file path.
    ///
    /// # Errors
    ///
    /// Returns an [`AssetError`] if the file cannot be read or parsed.
    fn load_from_file(path: &Path) -> Result<Self, AssetError>;
}

/// One model to place on the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRequest {
    /// Model file (GLTF or GLB)
    pub path: PathBuf,
    /// Vertical slot; the model sits `slot` sections down the page
    pub slot: usize,
    /// Horizontal offset of the model
    pub offset_x: f32,
}

impl ModelRequest {
    /// Create a new request
    pub fn new(path: impl Into<PathBuf>, slot: usize, offset_x: f32) -> Self {
        Self {
            path: path.into(),
            slot,
            offset_x,
        }
    }
}

/// A successfully loaded asset together with the request that produced it
#[derive(Debug)]
pub struct LoadedAsset<A> {
    pub request: ModelRequest,
    pub asset: A,
}

/// Failure of one request, which fails the whole batch
#[derive(Debug)]
pub struct ModelLoadError {
    /// Position of the failed request in the input list
    pub index: usize,
    /// Path of the failed request
    pub path: PathBuf,
    /// Underlying cause
    pub source: AssetError,
}

impl fmt::Display for ModelLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to load model #{} ({}): {}",
            self.index,
            self.path.display(),
            self.source
        )
    }
}

impl std::error::Error for ModelLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Outcome of reporting one result to a [`LoadBarrier`]
#[derive(Debug)]
pub enum BarrierState<T, E> {
    /// Still waiting on other results
    Pending,
    /// Every slot succeeded; values are in slot order
    Complete(Vec<T>),
    /// This report was the first failure
    Failed { index: usize, error: E },
    /// The barrier already resolved; the report was dropped
    Closed,
}

/// Fan-in barrier over a fixed number of fallible results.
///
/// The barrier resolves exactly once: either with every value (in slot order,
/// regardless of arrival order) or with the first error to arrive.
pub struct LoadBarrier<T> {
    slots: Vec<Option<T>>,
    remaining: usize,
    resolved: bool,
}

impl<T> LoadBarrier<T> {
    /// Create a barrier waiting on `count` results
    pub fn new(count: usize) -> Self {
        Self {
            slots: (0..count).map(|_| None).collect(),
            remaining: count,
            resolved: false,
        }
    }

    /// First slot that has not reported a value yet
    pub fn first_pending(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Whether the barrier has already completed or failed
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Report the result for one slot
    pub fn report<E>(&mut self, index: usize, result: Result<T, E>) -> BarrierState<T, E> {
        if self.resolved {
            return BarrierState::Closed;
        }

        match result {
            Err(error) => {
                self.resolved = true;
                self.slots.clear();
                BarrierState::Failed { index, error }
            }
            Ok(value) => {
                let Some(slot) = self.slots.get_mut(index) else {
                    log::warn!("Ignoring result for unknown load slot {}", index);
                    return BarrierState::Pending;
                };
                if slot.is_some() {
                    log::warn!("Ignoring duplicate result for load slot {}", index);
                    return BarrierState::Pending;
                }
                *slot = Some(value);
                self.remaining -= 1;

                if self.remaining == 0 {
                    self.resolved = true;
                    BarrierState::Complete(self.slots.drain(..).flatten().collect())
                } else {
                    BarrierState::Pending
                }
            }
        }
    }
}

/// Loads a batch of models concurrently
pub struct ModelLoader;

impl ModelLoader {
    /// Load every request on its own worker thread and wait for the barrier.
    ///
    /// Returns as soon as the first load fails; workers still running finish
    /// on their own and their results are discarded. There is no timeout.
    pub fn load_all<A: Asset>(
        requests: &[ModelRequest],
    ) -> Result<Vec<LoadedAsset<A>>, ModelLoadError> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let (result_tx, result_rx) = channel::<(usize, Result<A, AssetError>)>();

        for (index, request) in requests.iter().enumerate() {
            let result_tx = result_tx.clone();
            let path = request.path.clone();
            thread::Builder::new()
                .name(format!("model-loader-{}", index))
                .spawn(move || {
                    let result = A::load_from_file(&path);
                    match &result {
                        Ok(_) => log::debug!("Loaded model {}", path.display()),
                        Err(e) => log::debug!("Model {} failed: {}", path.display(), e),
                    }
                    // The receiver is gone once the batch has failed
                    let _ = result_tx.send((index, result));
                })
                .map_err(|e| ModelLoadError {
                    index,
                    path: request.path.clone(),
                    source: AssetError::Io(e),
                })?;
        }
        drop(result_tx);

        let mut barrier = LoadBarrier::new(requests.len());
        while let Ok((index, result)) = result_rx.recv() {
            match barrier.report(index, result) {
                BarrierState::Pending | BarrierState::Closed => {}
                BarrierState::Complete(assets) => {
                    log::info!("All {} models loaded", assets.len());
                    return Ok(requests
                        .iter()
                        .cloned()
                        .zip(assets)
                        .map(|(request, asset)| LoadedAsset { request, asset })
                        .collect());
                }
                BarrierState::Failed { index, error } => {
                    return Err(ModelLoadError {
                        index,
                        path: requests[index].path.clone(),
                        source: error,
                    });
                }
            }
        }

        // Every sender dropped without resolving: a worker panicked
        let index = barrier.first_pending().unwrap_or(0);
        Err(ModelLoadError {
            index,
            path: requests.get(index).map(|r| r.path.clone()).unwrap_or_default(),
            source: AssetError::Parse("model loader worker exited without a result".to_string()),
        })
    }

    /// Run [`load_all`](Self::load_all) on a background thread and hand the
    /// outcome to `on_done` from that thread.
    pub fn spawn<A, F>(requests: Vec<ModelRequest>, on_done: F) -> std::io::Result<thread::JoinHandle<()>>
    where
        A: Asset,
        F: FnOnce(Result<Vec<LoadedAsset<A>>, ModelLoadError>) + Send + 'static,
    {
        thread::Builder::new()
            .name("model-loader".to_string())
            .spawn(move || on_done(Self::load_all::<A>(&requests)))
    }
}
