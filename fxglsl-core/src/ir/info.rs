//! Declaration records handed to the backend.
//!
//! The producer fills in the descriptive fields; the `define_*` operations
//! of the code generator fill in ids and computed placement.

use super::expr::Location;
use super::types::{Constant, Type};
use crate::naming::Id;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructMember {
    pub name: String,
    /// Field name in the output, unique within its struct
    pub unique_name: String,
    pub ty: Type,
}

impl StructMember {
    pub fn new(name: &str, ty: Type) -> Self {
        StructMember {
            name: name.to_string(),
            unique_name: name.to_string(),
            ty,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StructInfo {
    pub definition: Option<Id>,
    pub name: String,
    /// Name the struct is exported under
    pub unique_name: String,
    pub members: Vec<StructMember>,
}

impl StructInfo {
    pub fn new(name: &str, members: Vec<StructMember>) -> Self {
        StructInfo {
            definition: None,
            name: name.to_string(),
            unique_name: name.to_string(),
            members,
        }
    }
}

/// A free-standing uniform, packed into the global uniform buffer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniformInfo {
    pub name: String,
    pub ty: Type,
    /// Byte offset inside the uniform buffer
    pub offset: u32,
    /// Byte size inside the uniform buffer
    pub size: u32,
    /// Position among all uniforms of the unit
    pub member_index: u32,
    pub initializer: Option<Constant>,
}

impl UniformInfo {
    pub fn new(name: &str, ty: Type) -> Self {
        UniformInfo {
            name: name.to_string(),
            ty,
            offset: 0,
            size: 0,
            member_index: 0,
            initializer: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureFormat {
    R8,
    R16f,
    R32f,
    Rg8,
    Rg16,
    Rg16f,
    Rg32f,
    #[default]
    Rgba8,
    Rgba16,
    Rgba16f,
    Rgba32f,
    Rgb10a2,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextureInfo {
    pub id: Option<Id>,
    pub name: String,
    pub unique_name: String,
    pub semantic: String,
    pub width: u32,
    pub height: u32,
    pub levels: u32,
    pub format: TextureFormat,
}

impl TextureInfo {
    pub fn new(name: &str, width: u32, height: u32) -> Self {
        TextureInfo {
            id: None,
            name: name.to_string(),
            unique_name: name.to_string(),
            semantic: String::new(),
            width,
            height,
            levels: 1,
            format: TextureFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    MinMagMipPoint,
    MinMagPointMipLinear,
    MinPointMagLinearMipPoint,
    MinPointMagMipLinear,
    MinLinearMagMipPoint,
    MinLinearMagPointMipLinear,
    MinMagLinearMipPoint,
    #[default]
    MinMagMipLinear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressMode {
    Wrap,
    Mirror,
    #[default]
    Clamp,
    Border,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplerInfo {
    pub id: Option<Id>,
    /// Binding slot, assigned in declaration order
    pub binding: u32,
    pub name: String,
    pub unique_name: String,
    /// Texture this sampler reads from
    pub texture_name: String,
    pub filter: FilterMode,
    pub address_u: AddressMode,
    pub address_v: AddressMode,
    pub address_w: AddressMode,
    pub min_lod: f32,
    pub max_lod: f32,
    pub lod_bias: f32,
    pub srgb: bool,
}

impl SamplerInfo {
    pub fn new(name: &str, texture_name: &str) -> Self {
        SamplerInfo {
            id: None,
            binding: 0,
            name: name.to_string(),
            unique_name: name.to_string(),
            texture_name: texture_name.to_string(),
            filter: FilterMode::default(),
            address_u: AddressMode::default(),
            address_v: AddressMode::default(),
            address_w: AddressMode::default(),
            min_lod: -f32::MAX,
            max_lod: f32::MAX,
            lod_bias: 0.0,
            srgb: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamInfo {
    pub name: String,
    pub ty: Type,
    pub location: Location,
    /// Assigned when the function is defined
    pub definition: Option<Id>,
}

impl ParamInfo {
    pub fn new(name: &str, ty: Type) -> Self {
        ParamInfo {
            name: name.to_string(),
            ty,
            location: Location::default(),
            definition: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionInfo {
    pub definition: Option<Id>,
    pub name: String,
    pub unique_name: String,
    pub return_type: Type,
    pub parameters: Vec<ParamInfo>,
    pub location: Location,
}

impl FunctionInfo {
    pub fn new(name: &str, return_type: Type, parameters: Vec<ParamInfo>) -> Self {
        FunctionInfo {
            definition: None,
            name: name.to_string(),
            unique_name: name.to_string(),
            return_type,
            parameters,
            location: Location::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PassInfo {
    pub name: String,
    pub vs_entry_point: String,
    pub ps_entry_point: String,
    pub render_target_names: Vec<String>,
    pub clear_render_targets: bool,
    pub srgb_write_enable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TechniqueInfo {
    pub name: String,
    pub passes: Vec<PassInfo>,
}
