//! In-memory host used by the demo binary and the tests. Every write the
//! lens performs is recorded so it can be inspected afterwards.

use super::traits::{Camera, Material, NodeId, Scene, StringSink};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NodeState {
    pub x: f32,
    pub hidden: bool,
    pub material: Option<Material>,
}

#[derive(Debug, Default)]
pub struct HeadlessScene {
    names: HashMap<String, NodeId>,
    nodes: Mutex<HashMap<NodeId, NodeState>>,
    width: Option<f32>,
}

impl HeadlessScene {
    pub fn new(names: &[&str], width: Option<f32>) -> Self {
        let names: HashMap<String, NodeId> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), NodeId(i as u64 + 1)))
            .collect();
        let nodes = names
            .values()
            .map(|id| (*id, NodeState::default()))
            .collect();
        Self {
            names,
            nodes: Mutex::new(nodes),
            width,
        }
    }

    /// Scene holding every node the lens resolves at startup.
    pub fn with_lens_nodes(width: f32) -> Self {
        Self::new(crate::screen::REQUIRED_NODES, Some(width))
    }

    /// Same scene minus one node, for exercising startup failures.
    pub fn without(name: &str, width: f32) -> Self {
        let names: Vec<&str> = crate::screen::REQUIRED_NODES
            .iter()
            .copied()
            .filter(|n| *n != name)
            .collect();
        Self::new(&names, Some(width))
    }

    pub fn node(&self, name: &str) -> Option<NodeState> {
        let id = self.names.get(name)?;
        self.nodes.lock().ok()?.get(id).copied()
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    fn update(&self, node: NodeId, f: impl FnOnce(&mut NodeState)) {
        if let Ok(mut nodes) = self.nodes.lock() {
            if let Some(state) = nodes.get_mut(&node) {
                f(state);
            }
        }
    }
}

impl Scene for HeadlessScene {
    fn find_first(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    fn set_transform_x(&self, node: NodeId, x: f32) {
        self.update(node, |s| s.x = x);
    }

    fn set_hidden(&self, node: NodeId, hidden: bool) {
        self.update(node, |s| s.hidden = hidden);
    }

    fn set_material(&self, node: NodeId, material: Material) {
        self.update(node, |s| s.material = Some(material));
    }

    fn viewport_width(&self) -> Option<f32> {
        self.width
    }
}

#[derive(Debug)]
pub struct HeadlessCamera {
    fov: Mutex<f32>,
}

impl HeadlessCamera {
    pub fn new(fov: f32) -> Self {
        Self {
            fov: Mutex::new(fov),
        }
    }

    pub fn fov(&self) -> f32 {
        self.fov.lock().map(|f| *f).unwrap_or_default()
    }
}

impl Camera for HeadlessCamera {
    fn set_fov(&self, fov: f32) {
        if let Ok(mut current) = self.fov.lock() {
            *current = fov;
        }
    }
}

/// String sink that keeps the latest value per key plus the full write log.
#[derive(Debug, Default)]
pub struct RecordingStrings {
    values: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<(String, String)>>,
}

impl RecordingStrings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().map(|w| w.len()).unwrap_or(0)
    }
}

impl StringSink for RecordingStrings {
    fn set_string_value(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        if let Ok(mut writes) = self.writes.lock() {
            writes.push((key.to_string(), value.to_string()));
        }
    }
}
