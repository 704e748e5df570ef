//! Spelling of IR types and constants in GLSL.
//!
//! GLSL stores matrices column-major and names them `mat<columns>x<rows>`,
//! while the IR stores them row-major and talks about rows first. An IR
//! matrix with R rows and C columns is therefore declared as `matCxR`, and
//! its values are built as `transpose(matRxC(<row-major data>))`: the inner
//! constructor consumes the IR data unchanged and the single `transpose`
//! produces the declared type.

use crate::error::Result;
use crate::ir::{BaseType, Constant, Qualifiers, Type};
use crate::naming::NameTable;
use crate::{bail_ir, bail_unsupported};

/// Render `ty` as a declaration type.
///
/// `precise` is always honored. Interpolation and direction qualifiers are
/// only written for parameters (and struct members, which GLSL treats like
/// interface fields).
pub fn render_type(ty: &Type, is_param: bool, names: &NameTable) -> Result<String> {
    let mut s = String::new();

    if ty.has(Qualifiers::PRECISE) {
        s.push_str("precise ");
    }

    if is_param {
        if ty.has(Qualifiers::LINEAR) {
            s.push_str("smooth ");
        }
        if ty.has(Qualifiers::NOPERSPECTIVE) {
            s.push_str("noperspective ");
        }
        if ty.has(Qualifiers::CENTROID) {
            s.push_str("centroid ");
        }
        if ty.has(Qualifiers::NOINTERPOLATION) {
            s.push_str("flat ");
        }

        if ty.has(Qualifiers::INOUT) {
            s.push_str("inout ");
        } else if ty.has(Qualifiers::IN) {
            s.push_str("in ");
        } else if ty.has(Qualifiers::OUT) {
            s.push_str("out ");
        }
    }

    match ty.base {
        BaseType::Struct => match ty.definition {
            Some(definition) => s.push_str(&names.resolve(definition)),
            None => bail_ir!("struct type without a definition"),
        },
        _ => s.push_str(&type_name(ty)?),
    }

    Ok(s)
}

/// Bare GLSL name of a non-struct type, without qualifiers or array suffix.
pub fn type_name(ty: &Type) -> Result<String> {
    let prefix = match ty.base {
        BaseType::Void => return Ok("void".to_string()),
        BaseType::Sampler => return Ok("sampler2D".to_string()),
        BaseType::Struct => bail_ir!("struct types have no built-in name"),
        BaseType::Bool => "b",
        BaseType::Int => "i",
        BaseType::Uint => "u",
        BaseType::Float => "",
    };

    if ty.is_matrix() {
        if ty.base != BaseType::Float {
            bail_unsupported!("{:?} matrix {}x{}", ty.base, ty.rows, ty.cols);
        }
        return Ok(format!("mat{}x{}", ty.cols, ty.rows));
    }

    if ty.is_vector() {
        if ty.rows > 4 {
            bail_ir!("vector with {} components", ty.rows);
        }
        return Ok(format!("{}vec{}", prefix, ty.rows));
    }

    Ok(match ty.base {
        BaseType::Bool => "bool",
        BaseType::Int => "int",
        BaseType::Uint => "uint",
        _ => "float",
    }
    .to_string())
}

/// Constructor name that consumes row-major matrix data (`matRxC`).
pub fn row_major_constructor(ty: &Type) -> String {
    format!("mat{}x{}", ty.rows, ty.cols)
}

/// Array declarator suffix, empty for non-arrays.
pub fn array_suffix(ty: &Type) -> String {
    if ty.is_array() {
        format!("[{}]", ty.array_length)
    } else {
        String::new()
    }
}

/// Shortest round-trip literal; non-finite values become bit patterns.
pub fn float_literal(value: f32) -> String {
    if !value.is_finite() {
        return format!("uintBitsToFloat(0x{:08X}u)", value.to_bits());
    }
    // Debug keeps a `.0` or exponent, so the result always reads as a float
    format!("{:?}", value)
}

pub fn int_literal(value: i32) -> String {
    if value == i32::MIN {
        // 2147483648 is not a valid int literal
        return "int(0x80000000u)".to_string();
    }
    value.to_string()
}

pub fn uint_literal(value: u32) -> String {
    format!("{}u", value)
}

pub fn bool_literal(value: bool) -> String {
    let literal = if value { "true" } else { "false" };
    literal.to_string()
}

/// Render a constant value of type `ty`.
pub fn render_constant(ty: &Type, data: &Constant) -> Result<String> {
    if ty.is_array() {
        let Constant::Array(elements) = data else {
            bail_ir!("array type {}[{}] with a non-array constant", type_name(&ty.element())?, ty.array_length);
        };
        if elements.len() != ty.array_length as usize {
            bail_ir!("array constant has {} elements, type expects {}", elements.len(), ty.array_length);
        }

        let element_ty = ty.element();
        let rendered = elements
            .iter()
            .map(|element| render_constant(&element_ty, element))
            .collect::<Result<Vec<_>>>()?;
        return Ok(format!("{{ {} }}", rendered.join(", ")));
    }

    if !ty.is_numeric() {
        bail_ir!("constant of non-numeric type {:?}", ty.base);
    }
    if data.base() != Some(ty.base) {
        bail_ir!("{:?} constant for a {:?} type", data.base(), ty.base);
    }
    if data.len() != ty.components() as usize {
        bail_ir!("constant has {} components, type expects {}", data.len(), ty.components());
    }

    let literals: Vec<String> = match data {
        Constant::Bool(values) => values.iter().copied().map(bool_literal).collect(),
        Constant::Int(values) => values.iter().copied().map(int_literal).collect(),
        Constant::Uint(values) => values.iter().copied().map(uint_literal).collect(),
        Constant::Float(values) => values.iter().copied().map(float_literal).collect(),
        Constant::Array(_) => bail_ir!("nested array constant for a non-array type"),
    };

    if ty.is_scalar() {
        return Ok(literals.join(""));
    }

    if ty.is_matrix() {
        // Validates the base type
        type_name(ty)?;
        return Ok(format!("transpose({}({}))", row_major_constructor(ty), literals.join(", ")));
    }

    Ok(format!("{}({})", type_name(ty)?, literals.join(", ")))
}
