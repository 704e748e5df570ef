//! The effect IR consumed by the backend.

pub mod expr;
pub mod info;
pub mod types;

pub use expr::{BinaryOp, ControlFlags, Expression, Location, LoopFlow, Operation, UnaryOp};
pub use info::{
    AddressMode, FilterMode, FunctionInfo, ParamInfo, PassInfo, SamplerInfo, StructInfo, StructMember,
    TechniqueInfo, TextureFormat, TextureInfo, UniformInfo,
};
pub use types::{BaseType, Constant, Qualifiers, Type};
