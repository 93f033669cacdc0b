use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Opaque handle to a node owned by the host scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// Font materials the main screen can be rendered with 🔤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Material {
    RegularFont,
    DyslexiaFont,
}

impl Material {
    pub fn name(&self) -> &'static str {
        match self {
            Material::RegularFont => "regular-font",
            Material::DyslexiaFont => "dyslexia-font",
        }
    }
}

/// The host scene graph: node lookup plus the handful of mutable fields
/// the lens writes to.
pub trait Scene: Send + Sync {
    fn find_first(&self, name: &str) -> Option<NodeId>;
    fn set_transform_x(&self, node: NodeId, x: f32);
    fn set_hidden(&self, node: NodeId, hidden: bool);
    fn set_material(&self, node: NodeId, material: Material);

    /// Width of the viewport in scene units. `None` when the host cannot tell yet.
    fn viewport_width(&self) -> Option<f32> {
        None
    }
}

/// Main camera of the host 📷
pub trait Camera: Send + Sync {
    fn set_fov(&self, fov: f32);
}

/// Patch sink used to push localized strings into the rendered UI.
pub trait StringSink: Send + Sync {
    fn set_string_value(&self, key: &str, value: &str);
}

/// Scoped key-value persistence holding opaque text blobs 💾
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, blob: &str) -> Result<()>;
}
