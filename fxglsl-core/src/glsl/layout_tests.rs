#![cfg(test)]

use super::GlslCodegen;
use super::layout::{LayoutAllocator, align, uniform_size};
use crate::ir::{BaseType, Location, SamplerInfo, Type, UniformInfo};

fn float() -> Type {
    Type::scalar(BaseType::Float)
}

fn float_n(n: u32) -> Type {
    Type::vector(BaseType::Float, n)
}

#[test]
fn test_align() {
    assert_eq!(align(0, 16), 0);
    assert_eq!(align(4, 16), 16);
    assert_eq!(align(16, 16), 16);
    assert_eq!(align(17, 4), 20);
    assert_eq!(align(20, 4), 20);
}

#[test]
fn test_uniform_sizes() {
    assert_eq!(uniform_size(&float()), 4);
    assert_eq!(uniform_size(&float_n(2)), 8);
    // Three rows are padded to four
    assert_eq!(uniform_size(&float_n(3)), 16);
    assert_eq!(uniform_size(&float_n(4)), 16);
    assert_eq!(uniform_size(&Type::matrix(BaseType::Float, 4, 4)), 64);
    assert_eq!(uniform_size(&Type::matrix(BaseType::Float, 3, 3)), 48);
    assert_eq!(uniform_size(&float().array(4)), 16);
}

#[test]
fn test_float4_then_float() {
    let mut layout = LayoutAllocator::new();
    assert_eq!(layout.place_uniform(&float_n(4)), (0, 16));
    assert_eq!(layout.place_uniform(&float()), (16, 4));
    assert_eq!(layout.cbuffer_size(), 20);
}

#[test]
fn test_float3_is_padded_before_next_uniform() {
    let mut layout = LayoutAllocator::new();
    assert_eq!(layout.place_uniform(&float_n(3)), (0, 16));
    // std140 would pack this at 12
    assert_eq!(layout.place_uniform(&float()), (16, 4));
}

#[test]
fn test_uniform_offsets_are_aligned_and_disjoint() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut codegen = GlslCodegen::new();
    let types = [
        float(),
        float_n(3),
        float_n(2),
        float(),
        Type::matrix(BaseType::Float, 4, 4),
        float_n(4).array(2),
        Type::scalar(BaseType::Int),
    ];

    let mut placed = Vec::new();
    for (i, ty) in types.iter().enumerate() {
        let mut info = UniformInfo::new(&format!("u{}", i), *ty);
        let id = codegen.define_uniform(&Location::default(), &mut info).unwrap();
        assert_eq!(id, codegen.globals_id());
        assert_eq!(info.member_index, i as u32);
        placed.push((info.offset, info.size));
    }

    for window in placed.windows(2) {
        assert!(window[0].0 <= window[1].0);
    }
    for (i, &(offset, size)) in placed.iter().enumerate() {
        assert_eq!(offset % size, 0, "uniform {} at {} is not aligned to {}", i, offset, size);
        for &(other_offset, other_size) in &placed[i + 1..] {
            assert!(offset + size <= other_offset || other_offset + other_size <= offset);
        }
    }
}

#[test]
fn test_uniforms_join_the_globals_struct() {
    let mut codegen = GlslCodegen::new();
    let mut time = UniformInfo::new("time", float());
    let mut tint = UniformInfo::new("tint", float_n(3));
    codegen.define_uniform(&Location::default(), &mut time).unwrap();
    codegen.define_uniform(&Location::default(), &mut tint).unwrap();

    let globals = codegen.find_struct(codegen.globals_id()).unwrap();
    assert_eq!(globals.name, "$Globals");
    assert_eq!(globals.unique_name, "_Globals");
    let members: Vec<&str> = globals.members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(members, ["time", "tint"]);
}

#[test]
fn test_non_numeric_uniform_is_rejected() {
    let mut codegen = GlslCodegen::new();
    let mut info = UniformInfo::new("tex", Type::sampler());
    assert!(codegen.define_uniform(&Location::default(), &mut info).is_err());
}

#[test]
fn test_sampler_bindings_follow_declaration_order() {
    let mut codegen = GlslCodegen::new();
    let mut bindings = Vec::new();
    for name in ["backbuffer", "depth", "history"] {
        let mut info = SamplerInfo::new(name, name);
        codegen.define_sampler(&Location::default(), &mut info).unwrap();
        bindings.push(info.binding);
    }
    assert_eq!(bindings, [0, 1, 2]);

    let module = codegen.finish().unwrap();
    let slots: Vec<u32> = module.samplers.iter().map(|s| s.binding).collect();
    assert_eq!(slots, [0, 1, 2]);
    assert!(module.code.contains("layout(binding = 1) uniform sampler2D depth;"));
}
