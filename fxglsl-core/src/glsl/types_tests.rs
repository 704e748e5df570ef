#![cfg(test)]

use super::types::{float_literal, int_literal, render_constant, render_type, type_name};
use crate::error::CompilerError;
use crate::ir::{BaseType, Constant, Qualifiers, Type};
use crate::naming::NameTable;

fn float_n(n: u32) -> Type {
    Type::vector(BaseType::Float, n)
}

#[test]
fn test_scalar_and_vector_names() {
    assert_eq!(type_name(&Type::scalar(BaseType::Bool)).unwrap(), "bool");
    assert_eq!(type_name(&Type::scalar(BaseType::Uint)).unwrap(), "uint");
    assert_eq!(type_name(&Type::void()).unwrap(), "void");
    assert_eq!(type_name(&Type::vector(BaseType::Int, 3)).unwrap(), "ivec3");
    assert_eq!(type_name(&Type::vector(BaseType::Bool, 2)).unwrap(), "bvec2");
    assert_eq!(type_name(&Type::vector(BaseType::Uint, 4)).unwrap(), "uvec4");
    assert_eq!(type_name(&float_n(4)).unwrap(), "vec4");
    assert_eq!(type_name(&Type::sampler()).unwrap(), "sampler2D");
}

#[test]
fn test_matrix_names_put_columns_first() {
    // 2 rows, 3 columns
    assert_eq!(type_name(&Type::matrix(BaseType::Float, 2, 3)).unwrap(), "mat3x2");
    assert_eq!(type_name(&Type::matrix(BaseType::Float, 4, 4)).unwrap(), "mat4x4");
}

#[test]
fn test_integer_matrix_is_unsupported() {
    let err = type_name(&Type::matrix(BaseType::Int, 2, 2)).unwrap_err();
    assert!(matches!(err, CompilerError::Unsupported(..)));
}

#[test]
fn test_parameter_qualifier_order() {
    let names = NameTable::new();
    let all = Qualifiers::PRECISE
        | Qualifiers::LINEAR
        | Qualifiers::NOPERSPECTIVE
        | Qualifiers::CENTROID
        | Qualifiers::NOINTERPOLATION
        | Qualifiers::INOUT;
    let ty = float_n(2).with_qualifiers(all);

    assert_eq!(
        render_type(&ty, true, &names).unwrap(),
        "precise smooth noperspective centroid flat inout vec2"
    );
    // Only `precise` survives outside of parameters
    assert_eq!(render_type(&ty, false, &names).unwrap(), "precise vec2");

    let out = float_n(4).with_qualifiers(Qualifiers::OUT);
    assert_eq!(render_type(&out, true, &names).unwrap(), "out vec4");
}

#[test]
fn test_float_literals_round_trip() {
    for value in [0.0f32, 1.0, -2.5, 0.1, 1.0e-7, 3.4028235e38, 1.17549435e-38, 16777216.0] {
        let text = float_literal(value);
        assert!(text.contains('.') || text.contains('e'), "{} does not read as a float", text);
        assert_eq!(text.parse::<f32>().unwrap().to_bits(), value.to_bits());
    }
}

#[test]
fn test_non_finite_floats_use_bit_patterns() {
    assert_eq!(float_literal(f32::INFINITY), "uintBitsToFloat(0x7F800000u)");
    assert_eq!(float_literal(f32::NEG_INFINITY), "uintBitsToFloat(0xFF800000u)");
}

#[test]
fn test_integer_literals() {
    assert_eq!(int_literal(-7), "-7");
    assert_eq!(int_literal(i32::MIN), "int(0x80000000u)");
    let uint = render_constant(&Type::scalar(BaseType::Uint), &Constant::Uint(vec![u32::MAX])).unwrap();
    assert_eq!(uint, "4294967295u");
}

#[test]
fn test_vector_constant() {
    let rendered = render_constant(&float_n(3), &Constant::Float(vec![1.0, 0.5, -3.0])).unwrap();
    assert_eq!(rendered, "vec3(1.0, 0.5, -3.0)");

    let flags = render_constant(&Type::vector(BaseType::Bool, 2), &Constant::Bool(vec![true, false])).unwrap();
    assert_eq!(flags, "bvec2(true, false)");
}

#[test]
fn test_matrix_constant_is_transposed_once() {
    // Row-major 2x3: rows (1 2 3) and (4 5 6)
    let ty = Type::matrix(BaseType::Float, 2, 3);
    let data = Constant::Float(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let rendered = render_constant(&ty, &data).unwrap();
    assert_eq!(rendered, "transpose(mat2x3(1.0, 2.0, 3.0, 4.0, 5.0, 6.0))");
    assert_eq!(rendered.matches("transpose").count(), 1);
}

#[test]
fn test_array_constant() {
    let ty = Type::scalar(BaseType::Int).array(3);
    let data = Constant::Array(vec![Constant::Int(vec![1]), Constant::Int(vec![2]), Constant::Int(vec![3])]);
    assert_eq!(render_constant(&ty, &data).unwrap(), "{ 1, 2, 3 }");

    let nested = float_n(2).array(2);
    let data = Constant::Array(vec![Constant::Float(vec![0.0, 1.0]), Constant::Float(vec![2.0, 3.0])]);
    assert_eq!(render_constant(&nested, &data).unwrap(), "{ vec2(0.0, 1.0), vec2(2.0, 3.0) }");
}

#[test]
fn test_constant_shape_mismatch_is_rejected() {
    let err = render_constant(&float_n(3), &Constant::Float(vec![1.0, 2.0])).unwrap_err();
    assert!(matches!(err, CompilerError::InvalidIr(..)));

    let err = render_constant(&float_n(2), &Constant::Int(vec![1, 2])).unwrap_err();
    assert!(matches!(err, CompilerError::InvalidIr(..)));
}
