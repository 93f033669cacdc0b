use serde::{Deserialize, Serialize};

/// Normalized bounding box, all fields in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One frame of performer detection. Consumed immediately, never retained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub confidence: f32,
    pub bounding_box: BoundingBox,
    pub is_performer: bool,
}

/// Contract a performer detector must satisfy 🎤
pub trait PerformerDetector: Send + Sync {
    fn detect(&self) -> DetectionResult;
}

/// Stand-in detector that always reports the same centered performer.
#[derive(Debug, Clone)]
pub struct MockDetector {
    confidence: f32,
}

impl MockDetector {
    pub fn new(confidence: f32) -> Self {
        Self {
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

impl PerformerDetector for MockDetector {
    fn detect(&self) -> DetectionResult {
        DetectionResult {
            confidence: self.confidence,
            bounding_box: BoundingBox {
                x: 0.4,
                y: 0.3,
                width: 0.2,
                height: 0.4,
            },
            is_performer: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_detector_clamps_confidence() {
        assert_eq!(MockDetector::new(1.7).detect().confidence, 1.0);
        assert_eq!(MockDetector::new(-0.2).detect().confidence, 0.0);
    }

    #[test]
    fn test_mock_detector_reports_performer() {
        let result = MockDetector::new(0.8).detect();
        assert!(result.is_performer);
        assert_eq!(result.bounding_box.width, 0.2);
        assert_eq!(result.bounding_box.height, 0.4);
    }
}
