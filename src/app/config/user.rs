use crate::error::{LensError, LensResult};
use serde::{Deserialize, Serialize};

/// User-editable tunables, stored in `config.toml`.
/// Every field falls back to its default when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LensConfig {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub transition: TransitionConfig,
    #[serde(default)]
    pub lyrics: LyricsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_fov")]
    pub default_fov: f32,
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f32,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f32,
    /// Zoom applied once a performer is locked.
    #[serde(default = "default_zoom")]
    pub default_zoom: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,
    #[serde(default = "default_update_interval")]
    pub update_interval_ms: u64,
    #[serde(default = "default_mock_confidence")]
    pub mock_confidence: f32,
}

/// How one swipe is split between navigation and the lyrics toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPolicy {
    /// Both axes are tested on every swipe.
    #[default]
    Independent,
    /// Only the axis with the larger magnitude is tested.
    Dominant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: f32,
    #[serde(default)]
    pub axis_policy: AxisPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionConfig {
    #[serde(default = "default_transition_duration")]
    pub duration_ms: u64,
    /// Used when the host cannot report a viewport width.
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f32,
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LyricsConfig {
    /// Duration of the last cue of an LRC sheet (nothing follows it).
    #[serde(default = "default_display_duration")]
    pub display_duration_ms: u64,
    /// Optional LRC sheet replacing the built-in captions.
    #[serde(default)]
    pub lrc_path: Option<String>,
}

fn default_fov() -> f32 {
    60.0
}
fn default_min_zoom() -> f32 {
    1.0
}
fn default_max_zoom() -> f32 {
    4.0
}
fn default_zoom() -> f32 {
    2.5
}
fn default_confidence_threshold() -> f32 {
    0.6
}
fn default_update_interval() -> u64 {
    100
}
fn default_mock_confidence() -> f32 {
    0.8
}
fn default_swipe_threshold() -> f32 {
    0.5
}
fn default_transition_duration() -> u64 {
    300
}
fn default_viewport_width() -> f32 {
    390.0
}
fn default_frame_interval() -> u64 {
    16
}
fn default_display_duration() -> u64 {
    3000
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            default_fov: default_fov(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            default_zoom: default_zoom(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            update_interval_ms: default_update_interval(),
            mock_confidence: default_mock_confidence(),
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: default_swipe_threshold(),
            axis_policy: AxisPolicy::default(),
        }
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_transition_duration(),
            viewport_width: default_viewport_width(),
            frame_interval_ms: default_frame_interval(),
        }
    }
}

impl Default for LyricsConfig {
    fn default() -> Self {
        Self {
            display_duration_ms: default_display_duration(),
            lrc_path: None,
        }
    }
}

impl LensConfig {
    /// Reject values the loops cannot run with (zero periods, inverted zoom range).
    pub fn validate(&self) -> LensResult<()> {
        let cam = &self.camera;
        if !(cam.min_zoom > 0.0 && cam.min_zoom <= cam.max_zoom) {
            return Err(LensError::Config(format!(
                "zoom range [{}, {}] is invalid",
                cam.min_zoom, cam.max_zoom
            )));
        }
        if cam.default_fov <= 0.0 {
            return Err(LensError::Config("default_fov must be positive".into()));
        }
        if self.detection.update_interval_ms == 0 || self.transition.frame_interval_ms == 0 {
            return Err(LensError::Config("loop periods must be non-zero".into()));
        }
        if !(0.0..=1.0).contains(&self.detection.confidence_threshold) {
            return Err(LensError::Config(
                "confidence_threshold must lie in [0, 1]".into(),
            ));
        }
        if self.gesture.swipe_threshold < 0.0 {
            return Err(LensError::Config("swipe_threshold must be >= 0".into()));
        }
        if self.transition.viewport_width <= 0.0 {
            return Err(LensError::Config("viewport_width must be positive".into()));
        }
        Ok(())
    }
}
