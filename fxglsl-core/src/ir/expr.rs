//! Expression chains, operators and control-flow flags.

use super::types::{Constant, Type};
use crate::naming::Id;
use bitflags::bitflags;
use serde::Serialize;

/// Position in the effect source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    pub source: String,
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(line: u32, column: u32) -> Self {
        Location {
            source: String::new(),
            line,
            column,
        }
    }
}

/// One step of an access path.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Convert the value to another type.
    Cast { to: Type },
    /// Subscript by a previously computed value.
    Index { index: Id },
    /// Select member `index` of the struct `definition`.
    Member { definition: Id, index: usize },
    /// Select up to four lanes; a `None` slot ends the swizzle.
    Swizzle { lanes: [Option<u8>; 4] },
}

/// An lvalue/rvalue path such as `buffer[i].field.xyz`.
///
/// Either a base value with operations applied left to right, or an inline
/// constant. `base_ty` is the type of the base value, `ty` the type after
/// all operations.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub base: Option<Id>,
    pub base_ty: Type,
    pub ty: Type,
    pub ops: Vec<Operation>,
    pub constant: Option<Constant>,
    pub location: Location,
}

impl Expression {
    /// Plain reference to a value.
    pub fn value(base: Id, ty: Type, location: Location) -> Self {
        Expression {
            base: Some(base),
            base_ty: ty,
            ty,
            ops: Vec::new(),
            constant: None,
            location,
        }
    }

    pub fn constant(ty: Type, constant: Constant, location: Location) -> Self {
        Expression {
            base: None,
            base_ty: ty,
            ty,
            ops: Vec::new(),
            constant: Some(constant),
            location,
        }
    }

    pub fn is_constant(&self) -> bool {
        self.constant.is_some()
    }

    /// True for a bare value reference without any operations.
    pub fn is_plain_value(&self) -> bool {
        self.base.is_some() && self.constant.is_none() && self.ops.is_empty()
    }

    pub fn add_cast(mut self, to: Type) -> Self {
        self.ops.push(Operation::Cast { to });
        self.ty = to;
        self
    }

    /// Subscript an array (element), matrix (row vector) or vector (scalar).
    pub fn add_index(mut self, index: Id) -> Self {
        self.ops.push(Operation::Index { index });
        self.ty = if self.ty.is_array() {
            self.ty.element()
        } else if self.ty.is_matrix() {
            Type::vector(self.ty.base, self.ty.cols)
        } else {
            Type::scalar(self.ty.base)
        };
        self
    }

    pub fn add_member(mut self, definition: Id, index: usize, member_ty: Type) -> Self {
        self.ops.push(Operation::Member { definition, index });
        self.ty = member_ty;
        self
    }

    pub fn add_swizzle(mut self, lanes: [Option<u8>; 4]) -> Self {
        let count = lanes.iter().take_while(|lane| lane.is_some()).count() as u32;
        self.ops.push(Operation::Swizzle { lanes });
        self.ty = Type::vector(self.ty.base, count);
        self
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
    BitwiseNot,
    LogicalNot,
}

/// Binary operators, compound assignments already split by the producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    LogicalAnd,
    LogicalOr,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
}

/// How control leaves a block on an unconditional branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopFlow {
    /// Plain jump, nothing to emit.
    None,
    Break,
    Continue,
    /// Continue into the body of the following switch case.
    Fallthrough,
}

bitflags! {
    /// Hints attached to `if`, `switch` and loop statements.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ControlFlags: u32 {
        const FLATTEN = 1 << 0;
        const DONT_FLATTEN = 1 << 1;
        const UNROLL = 1 << 2;
        const DONT_UNROLL = 1 << 3;
    }
}
