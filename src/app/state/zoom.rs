use crate::app::config::{CameraConfig, DetectionConfig};
use crate::host::DetectionResult;
use serde::Serialize;
use tracing::trace;

/// Camera zoom and the field of view derived from it 🔭
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoomState {
    pub current_zoom: f32,
    pub fov: f32,
}

/// Confidence-gated zoom. A confident detection locks the zoom on the
/// configured target; anything weaker leaves the last value in place.
#[derive(Debug, Clone)]
pub struct ZoomController {
    state: ZoomState,
    base_fov: f32,
    target_zoom: f32,
    threshold: f32,
}

impl ZoomController {
    pub fn new(camera: &CameraConfig, detection: &DetectionConfig) -> Self {
        let initial = camera.min_zoom;
        Self {
            state: ZoomState {
                current_zoom: initial,
                fov: camera.default_fov / initial,
            },
            base_fov: camera.default_fov,
            target_zoom: camera.default_zoom.clamp(camera.min_zoom, camera.max_zoom),
            threshold: detection.confidence_threshold,
        }
    }

    pub fn state(&self) -> ZoomState {
        self.state
    }

    /// Feed one detection. Returns the new state when it changed.
    pub fn apply(&mut self, detection: &DetectionResult) -> Option<ZoomState> {
        if detection.confidence <= self.threshold {
            trace!(confidence = detection.confidence, "detection below threshold, zoom held");
            return None;
        }
        let next = ZoomState {
            current_zoom: self.target_zoom,
            fov: self.base_fov / self.target_zoom,
        };
        if next == self.state {
            return None;
        }
        self.state = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::BoundingBox;

    fn detection(confidence: f32) -> DetectionResult {
        DetectionResult {
            confidence,
            bounding_box: BoundingBox {
                x: 0.4,
                y: 0.3,
                width: 0.2,
                height: 0.4,
            },
            is_performer: true,
        }
    }

    fn controller() -> ZoomController {
        ZoomController::new(&CameraConfig::default(), &DetectionConfig::default())
    }

    #[test]
    fn test_confident_detection_locks_zoom() {
        let mut zoom = controller();
        let state = zoom.apply(&detection(0.8)).unwrap();
        assert_eq!(state.current_zoom, 2.5);
        assert_eq!(state.fov, 24.0);
    }

    #[test]
    fn test_weak_detection_holds_previous_value() {
        let mut zoom = controller();
        let before = zoom.state();
        assert_eq!(zoom.apply(&detection(0.4)), None);
        assert_eq!(zoom.state(), before);

        zoom.apply(&detection(0.9));
        assert_eq!(zoom.apply(&detection(0.1)), None);
        assert_eq!(zoom.state().current_zoom, 2.5);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut zoom = controller();
        assert_eq!(zoom.apply(&detection(0.6)), None);
    }

    #[test]
    fn test_repeated_lock_reports_no_change() {
        let mut zoom = controller();
        assert!(zoom.apply(&detection(0.8)).is_some());
        assert!(zoom.apply(&detection(0.8)).is_none());
    }

    #[test]
    fn test_target_clamped_into_zoom_range() {
        let camera = CameraConfig {
            default_zoom: 9.0,
            ..CameraConfig::default()
        };
        let mut zoom = ZoomController::new(&camera, &DetectionConfig::default());
        let state = zoom.apply(&detection(0.95)).unwrap();
        assert_eq!(state.current_zoom, 4.0);
        assert_eq!(state.fov, 15.0);
    }
}
