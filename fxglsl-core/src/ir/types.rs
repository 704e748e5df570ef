//! Types and literal constants of the effect IR.

use crate::naming::Id;
use bitflags::bitflags;
use serde::{Serialize, Serializer};

/// Base kind of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseType {
    Void,
    Bool,
    Int,
    Uint,
    Float,
    Struct,
    Sampler,
}

bitflags! {
    /// Storage, interpolation and parameter-direction qualifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Qualifiers: u32 {
        const PRECISE = 1 << 0;
        const LINEAR = 1 << 1;
        const NOPERSPECTIVE = 1 << 2;
        const CENTROID = 1 << 3;
        const NOINTERPOLATION = 1 << 4;
        const IN = 1 << 5;
        const OUT = 1 << 6;
        const INOUT = Self::IN.bits() | Self::OUT.bits();
    }
}

impl Serialize for Qualifiers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.bits().serialize(serializer)
    }
}

/// A fully resolved IR type.
///
/// `rows`/`cols` describe the numeric shape: scalars are 1x1, vectors Nx1
/// and matrices RxC with both dimensions above one. `array_length` is zero
/// for non-array types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Type {
    pub base: BaseType,
    pub rows: u32,
    pub cols: u32,
    pub array_length: u32,
    pub qualifiers: Qualifiers,
    /// Struct definition for `BaseType::Struct`
    pub definition: Option<Id>,
}

impl Type {
    fn shaped(base: BaseType, rows: u32, cols: u32) -> Self {
        Type {
            base,
            rows,
            cols,
            array_length: 0,
            qualifiers: Qualifiers::empty(),
            definition: None,
        }
    }

    pub fn void() -> Self {
        Self::shaped(BaseType::Void, 0, 0)
    }

    pub fn scalar(base: BaseType) -> Self {
        Self::shaped(base, 1, 1)
    }

    pub fn vector(base: BaseType, rows: u32) -> Self {
        Self::shaped(base, rows, 1)
    }

    pub fn matrix(base: BaseType, rows: u32, cols: u32) -> Self {
        Self::shaped(base, rows, cols)
    }

    pub fn structure(definition: Id) -> Self {
        Type {
            definition: Some(definition),
            ..Self::shaped(BaseType::Struct, 0, 0)
        }
    }

    pub fn sampler() -> Self {
        Self::shaped(BaseType::Sampler, 0, 0)
    }

    /// This type as an array of `length` elements.
    pub fn array(self, length: u32) -> Self {
        Type {
            array_length: length,
            ..self
        }
    }

    pub fn with_qualifiers(self, qualifiers: Qualifiers) -> Self {
        Type { qualifiers, ..self }
    }

    /// Element type of an array type.
    pub fn element(self) -> Self {
        self.array(0)
    }

    pub fn has(&self, qualifier: Qualifiers) -> bool {
        self.qualifiers.contains(qualifier)
    }

    pub fn is_void(&self) -> bool {
        self.base == BaseType::Void
    }

    pub fn is_boolean(&self) -> bool {
        self.base == BaseType::Bool
    }

    pub fn is_integral(&self) -> bool {
        matches!(self.base, BaseType::Int | BaseType::Uint)
    }

    pub fn is_floating_point(&self) -> bool {
        self.base == BaseType::Float
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.base, BaseType::Bool | BaseType::Int | BaseType::Uint | BaseType::Float)
    }

    pub fn is_struct(&self) -> bool {
        self.base == BaseType::Struct
    }

    pub fn is_sampler(&self) -> bool {
        self.base == BaseType::Sampler
    }

    pub fn is_array(&self) -> bool {
        self.array_length > 0
    }

    pub fn is_scalar(&self) -> bool {
        self.is_numeric() && self.rows == 1 && self.cols == 1
    }

    pub fn is_vector(&self) -> bool {
        self.is_numeric() && self.rows > 1 && self.cols == 1
    }

    pub fn is_matrix(&self) -> bool {
        self.is_numeric() && self.rows > 1 && self.cols > 1
    }

    /// Number of scalar components of one element.
    pub fn components(&self) -> u32 {
        self.rows * self.cols
    }
}

/// A literal value of some [`Type`].
///
/// Numeric constants hold their components in row-major order; array
/// constants hold one nested constant per element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Constant {
    Bool(Vec<bool>),
    Int(Vec<i32>),
    Uint(Vec<u32>),
    Float(Vec<f32>),
    Array(Vec<Constant>),
}

impl Constant {
    /// Number of scalar components (elements for arrays).
    pub fn len(&self) -> usize {
        match self {
            Constant::Bool(v) => v.len(),
            Constant::Int(v) => v.len(),
            Constant::Uint(v) => v.len(),
            Constant::Float(v) => v.len(),
            Constant::Array(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The base type this constant's components belong to, if numeric.
    pub fn base(&self) -> Option<BaseType> {
        match self {
            Constant::Bool(_) => Some(BaseType::Bool),
            Constant::Int(_) => Some(BaseType::Int),
            Constant::Uint(_) => Some(BaseType::Uint),
            Constant::Float(_) => Some(BaseType::Float),
            Constant::Array(_) => None,
        }
    }
}
