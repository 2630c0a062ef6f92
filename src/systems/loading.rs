//! Model loading system
//!
//! Loads run on background threads. The batch outcome comes back to the event
//! loop as an [`AppEvent`], so the scene is only ever touched from the event
//! loop thread.

use std::thread::JoinHandle;

use folio_core::{
    ColorBroadcast, LoadedAsset, ModelFragment, ModelLoadError, ModelLoader, ModelRequest,
    SceneGraph,
};
use winit::event_loop::EventLoopProxy;

use crate::scene::{SceneComposer, SectionList};
use crate::systems::AnimationDriver;

/// Outcome of a whole model batch
pub type LoadResult = Result<Vec<LoadedAsset<ModelFragment>>, ModelLoadError>;

/// Events sent to the event loop from other threads
#[derive(Debug)]
pub enum AppEvent {
    /// The model batch resolved
    ModelsLoaded(LoadResult),
}

/// Tracks the one model batch requested at startup
pub struct LoadingSystem {
    requested: usize,
    resolved: bool,
    worker: Option<JoinHandle<()>>,
}

impl LoadingSystem {
    /// A loading system that has not resolved yet, without a worker
    pub fn new(requested: usize) -> Self {
        Self {
            requested,
            resolved: false,
            worker: None,
        }
    }

    /// Start loading `requests` and post the outcome through `proxy`
    pub fn spawn(requests: Vec<ModelRequest>, proxy: EventLoopProxy<AppEvent>) -> std::io::Result<Self> {
        let mut system = Self::new(requests.len());
        log::info!("Loading {} models", requests.len());
        let worker = ModelLoader::spawn::<ModelFragment, _>(requests, move |result| {
            if proxy.send_event(AppEvent::ModelsLoaded(result)).is_err() {
                log::debug!("Event loop closed before models finished loading");
            }
        })?;
        system.worker = Some(worker);
        Ok(system)
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Accept the batch outcome.
    ///
    /// Returns the loaded models on success. A failure is logged here, once;
    /// any later delivery is ignored.
    pub fn accept(&mut self, result: LoadResult) -> Option<Vec<LoadedAsset<ModelFragment>>> {
        if self.resolved {
            log::debug!("Ignoring repeated model batch result");
            return None;
        }
        self.resolved = true;
        if let Some(worker) = self.worker.take() {
            // The worker has already sent its result and is about to exit
            let _ = worker.join();
        }

        match result {
            Ok(models) => {
                log::info!("Loaded {}/{} models", models.len(), self.requested);
                Some(models)
            }
            Err(e) => {
                log::error!("{}", e);
                None
            }
        }
    }
}

/// Handle the batch outcome: compose the page and start the driver.
///
/// Returns the new sections only when this call moved the driver from Idle to
/// Running. A failed batch or a repeated delivery leaves everything untouched.
pub fn on_models_loaded(
    loading: &mut LoadingSystem,
    result: LoadResult,
    composer: &SceneComposer,
    graph: &mut SceneGraph,
    colors: &mut ColorBroadcast,
    driver: &mut AnimationDriver,
) -> Option<SectionList> {
    let models = loading.accept(result)?;
    if driver.is_running() {
        return None;
    }
    let sections = composer.compose(models, graph, colors);
    driver.start().then_some(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::systems::DriverState;
    use folio_core::{AssetError, FragmentNode};

    fn model(slot: usize) -> LoadedAsset<ModelFragment> {
        LoadedAsset {
            request: ModelRequest::new("m.glb", slot, 0.0),
            asset: ModelFragment {
                label: "m".to_string(),
                root: FragmentNode::new("root"),
            },
        }
    }

    #[test]
    fn test_success_hands_over_models() {
        let mut loading = LoadingSystem::new(2);
        let models = loading.accept(Ok(vec![model(0), model(1)])).unwrap();
        assert_eq!(models.len(), 2);
        assert!(loading.is_resolved());
    }

    #[test]
    fn test_failure_yields_nothing() {
        let mut loading = LoadingSystem::new(3);
        let error = ModelLoadError {
            index: 1,
            path: "missing.glb".into(),
            source: AssetError::Parse("bad".to_string()),
        };
        assert!(loading.accept(Err(error)).is_none());
        assert!(loading.is_resolved());
    }

    #[test]
    fn test_only_first_result_counts() {
        let mut loading = LoadingSystem::new(1);
        assert!(loading.accept(Ok(vec![model(0)])).is_some());
        assert!(loading.accept(Ok(vec![model(0)])).is_none());
    }

    struct Page {
        loading: LoadingSystem,
        composer: SceneComposer,
        graph: SceneGraph,
        colors: ColorBroadcast,
        driver: AnimationDriver,
    }

    impl Page {
        fn new(requested: usize) -> Self {
            let config = AppConfig::default();
            Self {
                loading: LoadingSystem::new(requested),
                composer: SceneComposer::new(config.page.section_spacing),
                graph: SceneGraph::new(),
                colors: ColorBroadcast::new(config.material.color),
                driver: AnimationDriver::new(&config.animation, config.page.section_spacing),
            }
        }

        fn deliver(&mut self, result: LoadResult) -> Option<SectionList> {
            on_models_loaded(
                &mut self.loading,
                result,
                &self.composer,
                &mut self.graph,
                &mut self.colors,
                &mut self.driver,
            )
        }
    }

    #[test]
    fn test_loaded_batch_starts_driver_once() {
        let mut page = Page::new(2);
        assert_eq!(page.driver.state(), DriverState::Idle);

        let sections = page.deliver(Ok(vec![model(0), model(1)])).unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(page.driver.state(), DriverState::Running);
        let nodes = page.graph.node_count();

        // A second delivery changes nothing
        assert!(page.deliver(Ok(vec![model(0), model(1)])).is_none());
        assert_eq!(page.driver.state(), DriverState::Running);
        assert_eq!(page.graph.node_count(), nodes);
    }

    #[test]
    fn test_failed_batch_keeps_driver_idle() {
        let mut page = Page::new(3);
        let error = ModelLoadError {
            index: 2,
            path: "assets/models/3.glb".into(),
            source: AssetError::Parse("truncated".to_string()),
        };
        assert!(page.deliver(Err(error)).is_none());
        assert_eq!(page.driver.state(), DriverState::Idle);
        assert_eq!(page.graph.node_count(), 1);
        assert!(page.colors.is_empty());

        // Nothing delivered after the failure can start the page
        assert!(page.deliver(Ok(vec![model(0)])).is_none());
        assert!(!page.driver.is_running());
    }
}
