pub mod detector;
pub mod headless;
pub mod store;
pub mod traits;

pub use detector::{BoundingBox, DetectionResult, MockDetector, PerformerDetector};
pub use headless::{HeadlessCamera, HeadlessScene, NodeState, RecordingStrings};
pub use store::{FileStore, MemoryStore};
pub use traits::{Camera, KeyValueStore, Material, NodeId, Scene, StringSink};

use std::sync::Arc;

/// Everything the lens consumes from its environment, bundled once at startup.
#[derive(Clone)]
pub struct HostBindings {
    pub scene: Arc<dyn Scene>,
    pub camera: Arc<dyn Camera>,
    pub strings: Arc<dyn StringSink>,
    pub store: Arc<dyn KeyValueStore>,
    pub detector: Arc<dyn PerformerDetector>,
}
