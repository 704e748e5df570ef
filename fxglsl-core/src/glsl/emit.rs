//! Expression and statement emission.
//!
//! Each value-producing operation declares one `const` temporary named after
//! a fresh id. Later operations refer to earlier results only by name.

use super::block::Stmt;
use super::intrinsics::{Helper, Intrinsic};
use super::types::{array_suffix, render_constant, row_major_constructor, type_name};
use super::GlslCodegen;
use crate::error::Result;
use crate::ir::{BinaryOp, Constant, Expression, Location, Operation, Type, UnaryOp};
use crate::naming::Id;
use crate::{bail_ir, bail_ir_at, bail_unsupported_at};

/// How a binary operator is spelled for a given operand shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryLowering {
    /// `a op b`
    Infix(&'static str),
    /// `f(a, b)`
    Function(&'static str),
    /// Call of a support function emitted with the module.
    Support(Helper),
    /// Component-wise logic on boolean vectors through unsigned bit ops.
    VectorLogic(&'static str),
}

fn lower_binary(op: BinaryOp, operand: &Type) -> BinaryLowering {
    use BinaryLowering::*;

    let vector = operand.is_vector();
    match op {
        BinaryOp::Add => Infix("+"),
        BinaryOp::Sub => Infix("-"),
        BinaryOp::Mul if operand.is_matrix() => Function("matrixCompMult"),
        BinaryOp::Mul => Infix("*"),
        BinaryOp::Div => Infix("/"),
        BinaryOp::Rem if operand.is_floating_point() => Support(Helper::Fmod),
        BinaryOp::Rem => Infix("%"),
        BinaryOp::BitAnd => Infix("&"),
        BinaryOp::BitOr => Infix("|"),
        BinaryOp::BitXor => Infix("^"),
        BinaryOp::Shl => Infix("<<"),
        BinaryOp::Shr => Infix(">>"),
        BinaryOp::LogicalAnd if vector => VectorLogic("&"),
        BinaryOp::LogicalAnd => Infix("&&"),
        BinaryOp::LogicalOr if vector => VectorLogic("|"),
        BinaryOp::LogicalOr => Infix("||"),
        BinaryOp::Less if vector => Function("lessThan"),
        BinaryOp::Less => Infix("<"),
        BinaryOp::LessEqual if vector => Function("lessThanEqual"),
        BinaryOp::LessEqual => Infix("<="),
        BinaryOp::Greater if vector => Function("greaterThan"),
        BinaryOp::Greater => Infix(">"),
        BinaryOp::GreaterEqual if vector => Function("greaterThanEqual"),
        BinaryOp::GreaterEqual => Infix(">="),
        BinaryOp::Equal if vector => Function("equal"),
        BinaryOp::Equal => Infix("=="),
        BinaryOp::NotEqual if vector => Function("notEqual"),
        BinaryOp::NotEqual => Infix("!="),
    }
}

const LANES: [char; 4] = ['x', 'y', 'z', 'w'];

impl GlslCodegen {
    /// Declare `const <ty> _<id> = <value>;` in the current block.
    fn declare_temporary(&mut self, location: &Location, ty: &Type, value: String) -> Result<Id> {
        let id = self.make_id();
        let declaration = Stmt::Declare {
            id,
            ty: self.render_type(ty, false)?,
            name: self.resolve_name(id),
            array_suffix: array_suffix(ty),
            constant: true,
            init: Some(value),
        };
        self.write_location(location);
        self.code().push(declaration);
        Ok(id)
    }

    /// Spell out the access path of `chain`. Store paths skip casts and
    /// may not touch uniforms.
    fn access_path(&mut self, chain: &Expression, is_store: bool) -> Result<String> {
        let location = &chain.location;
        let Some(base) = chain.base else {
            bail_ir_at!(location, "access path without a base value");
        };

        let mut path = self.resolve_name(base);
        // Type of the path built so far
        let mut ty = chain.base_ty;

        for op in &chain.ops {
            match op {
                Operation::Cast { to } => {
                    if !is_store {
                        if to.is_array() || !to.is_numeric() {
                            bail_unsupported_at!(location, "cast to {:?}", to.base);
                        }
                        path = format!("{}({})", type_name(to)?, path);
                    }
                    ty = *to;
                }
                Operation::Index { index } => {
                    if ty.is_matrix() && !ty.is_array() {
                        // GLSL subscripts select columns; the IR selects rows
                        if is_store {
                            bail_unsupported_at!(location, "assignment to a matrix row");
                        }
                        path = format!("transpose({})[{}]", path, self.resolve_name(*index));
                    } else {
                        path = format!("{}[{}]", path, self.resolve_name(*index));
                    }
                    ty = if ty.is_array() {
                        ty.element()
                    } else if ty.is_matrix() {
                        Type::vector(ty.base, ty.cols)
                    } else {
                        Type::scalar(ty.base)
                    };
                }
                Operation::Member { definition, index } => {
                    let info = self.find_struct(*definition)?;
                    let Some(member) = info.members.get(*index) else {
                        bail_ir_at!(location, "struct {} has no member {}", info.name, index);
                    };
                    let (member_name, member_ty) = (member.name.clone(), member.ty);
                    let field = member.unique_name.clone();

                    if *definition == self.cbuffer_id {
                        if is_store {
                            bail_ir_at!(location, "uniform {} is read-only", member_name);
                        }
                        if path != self.resolve_name(self.cbuffer_id) {
                            bail_ir_at!(location, "uniform {} accessed through {}", member_name, path);
                        }
                        path = field;
                    } else {
                        path.push('.');
                        path.push_str(&field);
                    }
                    ty = member_ty;
                }
                Operation::Swizzle { lanes } => {
                    if ty.is_matrix() {
                        bail_unsupported_at!(location, "swizzle of a matrix");
                    }
                    path.push('.');
                    let mut count = 0;
                    for lane in lanes.iter().map_while(|lane| *lane) {
                        match LANES.get(lane as usize) {
                            Some(letter) => path.push(*letter),
                            None => bail_ir_at!(location, "swizzle lane {} out of range", lane),
                        }
                        count += 1;
                    }
                    if count == 0 {
                        bail_ir_at!(location, "empty swizzle");
                    }
                    ty = Type::vector(ty.base, count);
                }
            }
        }

        Ok(path)
    }

    /// Names of plain value arguments. Arguments with operations or inline
    /// constants must be loaded first.
    fn argument_names(&self, location: &Location, args: &[Expression]) -> Result<Vec<String>> {
        args.iter()
            .map(|arg| match arg.base {
                Some(base) if arg.is_plain_value() => Ok(self.resolve_name(base)),
                _ => bail_ir_at!(location, "call argument must be a plain value"),
            })
            .collect()
    }

    /// Load the value of an expression chain into a new temporary.
    pub fn emit_load(&mut self, chain: &Expression) -> Result<Id> {
        if let Some(constant) = &chain.constant {
            let value = render_constant(&chain.ty, constant)?;
            return self.declare_temporary(&chain.location, &chain.ty, value);
        }

        let path = self.access_path(chain, false)?;

        // Samplers cannot live in local variables; the id stands for the path
        if chain.ty.is_sampler() {
            let id = self.make_id();
            self.names.alias(id, &path);
            return Ok(id);
        }

        self.declare_temporary(&chain.location, &chain.ty, path)
    }

    /// Assign `value` to the location `chain` refers to.
    pub fn emit_store(&mut self, chain: &Expression, value: Id) -> Result<()> {
        if chain.is_constant() {
            bail_ir_at!(chain.location, "store into a constant");
        }

        let target = self.access_path(chain, true)?;
        let value = self.resolve_name(value);
        self.write_location(&chain.location);
        self.code().push(Stmt::Assign { target, value });
        Ok(())
    }

    pub fn emit_constant(&mut self, ty: &Type, data: &Constant) -> Result<Id> {
        if !ty.is_numeric() {
            bail_ir!("constant of non-numeric type {:?}", ty.base);
        }
        let value = render_constant(ty, data)?;
        self.declare_temporary(&Location::default(), ty, value)
    }

    pub fn emit_unary_op(&mut self, location: &Location, op: UnaryOp, res_type: &Type, value: Id) -> Result<Id> {
        let operand = self.resolve_name(value);
        let expr = match op {
            UnaryOp::Negate => format!("-({})", operand),
            UnaryOp::BitwiseNot => format!("~({})", operand),
            UnaryOp::LogicalNot if res_type.is_vector() => {
                format!("not(bvec{}({}))", res_type.rows, operand)
            }
            UnaryOp::LogicalNot => format!("!bool({})", operand),
        };
        self.declare_temporary(location, res_type, expr)
    }

    /// `operand_type` is the type both operands were converted to; it picks
    /// the lowering, `res_type` the declared result.
    pub fn emit_binary_op(
        &mut self,
        location: &Location,
        op: BinaryOp,
        res_type: &Type,
        operand_type: &Type,
        lhs: Id,
        rhs: Id,
    ) -> Result<Id> {
        let (a, b) = (self.resolve_name(lhs), self.resolve_name(rhs));

        let expr = match lower_binary(op, operand_type) {
            BinaryLowering::Infix(symbol) => format!("{} {} {}", a, symbol, b),
            BinaryLowering::Function(name) => format!("{}({}, {})", name, a, b),
            BinaryLowering::Support(helper) => {
                if operand_type.is_matrix() || operand_type.is_array() {
                    bail_unsupported_at!(location, "{:?} on {:?} matrices or arrays", op, operand_type.base);
                }
                self.helpers.insert(helper);
                format!("{}({}, {})", helper.name(), a, b)
            }
            BinaryLowering::VectorLogic(symbol) => {
                let n = operand_type.rows;
                format!("bvec{n}(uvec{n}(bvec{n}({})) {} uvec{n}(bvec{n}({})))", a, symbol, b)
            }
        };

        self.declare_temporary(location, res_type, expr)
    }

    /// `condition ? true_value : false_value`, selected per component when
    /// the condition is a vector.
    pub fn emit_ternary_op(
        &mut self,
        location: &Location,
        res_type: &Type,
        condition_type: &Type,
        condition: Id,
        true_value: Id,
        false_value: Id,
    ) -> Result<Id> {
        let c = self.resolve_name(condition);
        let t = self.resolve_name(true_value);
        let f = self.resolve_name(false_value);

        let expr = if condition_type.is_vector() {
            format!("mix({}, {}, {})", f, t, c)
        } else {
            format!("{} ? {} : {}", c, t, f)
        };
        self.declare_temporary(location, res_type, expr)
    }

    /// Call a user function. Void calls become a bare statement; the
    /// returned id then names nothing.
    pub fn emit_call(&mut self, location: &Location, function: Id, res_type: &Type, args: &[Expression]) -> Result<Id> {
        let args = self.argument_names(location, args)?;
        let call = format!("{}({})", self.resolve_name(function), args.join(", "));

        if res_type.is_void() {
            let id = self.make_id();
            self.write_location(location);
            self.code().push(Stmt::Expr(call));
            return Ok(id);
        }
        self.declare_temporary(location, res_type, call)
    }

    pub fn emit_call_intrinsic(
        &mut self,
        location: &Location,
        intrinsic: Intrinsic,
        res_type: &Type,
        args: &[Expression],
    ) -> Result<Id> {
        let names = self.argument_names(location, args)?;
        let arg_types: Vec<Type> = args.iter().map(|arg| arg.ty).collect();
        let res_type_name = if res_type.is_void() {
            "void".to_string()
        } else {
            self.render_type(&res_type.with_qualifiers(Default::default()), false)?
        };

        let expr = intrinsic.expand(&names, &arg_types, &res_type_name)?;
        if let Some(helper) = intrinsic.helper() {
            self.helpers.insert(helper);
        }

        if res_type.is_void() {
            let id = self.make_id();
            self.write_location(location);
            self.code().push(Stmt::Expr(expr));
            return Ok(id);
        }
        self.declare_temporary(location, res_type, expr)
    }

    /// Build a vector, matrix, struct or array value from its parts.
    /// Apart from array elements, every part must be a scalar.
    pub fn emit_construct(&mut self, location: &Location, ty: &Type, args: &[Expression]) -> Result<Id> {
        if let Some(arg) = args.iter().find(|arg| !arg.ty.is_scalar() && !ty.is_array()) {
            bail_ir_at!(location, "constructor argument of non-scalar type {:?}", arg.ty.base);
        }
        let args = self.argument_names(location, args)?.join(", ");

        let expr = if ty.is_array() {
            format!("{}[{}]({})", self.render_type(&ty.element(), false)?, ty.array_length, args)
        } else if ty.is_matrix() {
            type_name(ty)?;
            format!("transpose({}({}))", row_major_constructor(ty), args)
        } else {
            format!("{}({})", self.render_type(ty, false)?, args)
        };

        self.declare_temporary(location, ty, expr)
    }
}
