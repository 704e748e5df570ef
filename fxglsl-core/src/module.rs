//! The compiled module handed to the host.

use crate::error::Result;
use crate::ir::{SamplerInfo, TechniqueInfo, TextureInfo, UniformInfo};
use serde::Serialize;

/// A function exposed to a pipeline stage through an `ENTRY_POINT_<name>` stub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryPoint {
    pub name: String,
    pub is_pixel_shader: bool,
}

/// Output of one compilation unit.
#[derive(Debug, Clone, Serialize)]
pub struct Module {
    /// GLSL source text.
    #[serde(skip)]
    pub code: String,
    /// Samplers with their binding slots.
    pub samplers: Vec<SamplerInfo>,
    pub textures: Vec<TextureInfo>,
    /// Uniforms with their buffer offsets and sizes.
    pub uniforms: Vec<UniformInfo>,
    pub techniques: Vec<TechniqueInfo>,
    pub entry_points: Vec<EntryPoint>,
}

impl Module {
    /// Reflection data (everything except the source text) as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn entry_point(&self, name: &str) -> Option<&EntryPoint> {
        self.entry_points.iter().find(|ep| ep.name == name)
    }
}
