use fxglsl_core::glsl::Intrinsic;
use fxglsl_core::ir::{
    BaseType, BinaryOp, Constant, Expression, FunctionInfo, Location, ParamInfo, PassInfo, Qualifiers, SamplerInfo,
    TechniqueInfo, TextureInfo, Type, UniformInfo,
};
use fxglsl_core::{CodegenOptions, CompilerError, GlslCodegen, Module};

fn float_n(n: u32) -> Type {
    Type::vector(BaseType::Float, n)
}

/// Lower a tinting effect: one uniform, one sampler and a pixel shader that
/// scales the sampled color.
fn lower_tint_effect() -> Module {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut cg = GlslCodegen::with_options(CodegenOptions {
        line_directives: true,
        version: Some(450),
    });

    let mut strength = UniformInfo::new("Strength", Type::scalar(BaseType::Float));
    let globals = cg.define_uniform(&Location::new(2, 1), &mut strength).unwrap();

    let mut texture = TextureInfo::new("BackBufferTex", 1920, 1080);
    cg.define_texture(&Location::new(4, 1), &mut texture).unwrap();
    let mut sampler_info = SamplerInfo::new("BackBuffer", "BackBufferTex");
    let sampler = cg.define_sampler(&Location::new(5, 1), &mut sampler_info).unwrap();

    let mut ps = FunctionInfo::new(
        "PS_Tint",
        float_n(4),
        vec![ParamInfo::new("uv", float_n(2).with_qualifiers(Qualifiers::IN))],
    );
    cg.define_function(&Location::new(10, 1), &mut ps).unwrap();
    let body = cg.create_block();
    cg.set_block(Some(body));

    let here = Location::new(12, 5);
    let uv = ps.parameters[0].definition.unwrap();
    let sampler_ref = cg
        .emit_load(&Expression::value(sampler, Type::sampler(), here.clone()))
        .unwrap();
    let color = cg
        .emit_call_intrinsic(
            &here,
            Intrinsic::Tex2D,
            &float_n(4),
            &[
                Expression::value(sampler_ref, Type::sampler(), here.clone()),
                Expression::value(uv, float_n(2), here.clone()),
            ],
        )
        .unwrap();
    let factor = cg
        .emit_load(
            &Expression::value(globals, Type::structure(globals), here.clone()).add_member(
                globals,
                0,
                Type::scalar(BaseType::Float),
            ),
        )
        .unwrap();
    let tinted = cg
        .emit_binary_op(&here, BinaryOp::Mul, &float_n(4), &float_n(4), color, factor)
        .unwrap();
    cg.leave_block_and_return(Some(tinted));
    cg.leave_function().unwrap();
    cg.create_entry_point(&ps, true).unwrap();

    cg.define_technique(TechniqueInfo {
        name: "Tint".to_string(),
        passes: vec![PassInfo {
            name: "Main".to_string(),
            vs_entry_point: "PostProcessVS".to_string(),
            ps_entry_point: "PS_Tint".to_string(),
            ..Default::default()
        }],
    });

    cg.finish().unwrap()
}

#[test]
fn test_preamble_and_uniform_buffer() {
    let module = lower_tint_effect();
    assert!(
        module
            .code
            .starts_with("#version 450\n#extension GL_ARB_shading_language_420pack : enable\n"),
        "{}",
        module.code
    );
    assert!(module
        .code
        .contains("layout(std140, binding = 0) uniform _Globals {\n#line 2\n\tfloat _Globals_Strength;\n};\n"));
    assert!(module.code.contains("layout(binding = 0) uniform sampler2D BackBuffer;"));
}

#[test]
fn test_pixel_shader_body() {
    let module = lower_tint_effect();
    let code = &module.code;

    assert!(code.contains("#line 10\nvec4 PS_Tint(in vec2 uv)\n{\n"), "{}", code);
    assert!(code.contains("texture(BackBuffer, uv);"));
    assert!(code.contains(" = _Globals_Strength;"));
    assert!(code.contains("#ifdef ENTRY_POINT_PS_Tint\nvoid main()\n{\n}\n#endif\n"));

    // The sampler is referenced directly, never copied into a local
    assert!(!code.contains("sampler2D _"));
}

#[test]
fn test_reflection_data() {
    let module = lower_tint_effect();

    assert_eq!(module.uniforms.len(), 1);
    assert_eq!((module.uniforms[0].offset, module.uniforms[0].size), (0, 4));
    assert_eq!(module.samplers[0].binding, 0);
    assert_eq!(module.textures[0].width, 1920);

    let entry = module.entry_point("PS_Tint").unwrap();
    assert!(entry.is_pixel_shader);
    assert!(module.entry_point("PostProcessVS").is_none());

    assert_eq!(module.techniques.len(), 1);
    assert_eq!(module.techniques[0].passes[0].ps_entry_point, "PS_Tint");
}

#[test]
fn test_reflection_json() {
    let module = lower_tint_effect();
    let json = module.to_json().unwrap();

    assert!(json.contains("\"entry_points\""));
    assert!(json.contains("\"is_pixel_shader\": true"));
    assert!(json.contains("\"texture_name\": \"BackBufferTex\""));
    assert!(json.contains("\"name\": \"Tint\""));
    // Source text is not part of the reflection data
    assert!(!json.contains("uniform sampler2D"));
}

#[test]
fn test_empty_unit() {
    let module = GlslCodegen::new().finish().unwrap();
    assert_eq!(module.code, "");
    assert!(module.entry_points.is_empty());
}

#[test]
fn test_errors_carry_their_location() {
    let mut cg = GlslCodegen::new();
    let at = Location::new(7, 3);
    let value = cg
        .emit_constant(&Type::scalar(BaseType::Int), &Constant::Int(vec![1]))
        .unwrap();

    let chain = Expression::constant(Type::scalar(BaseType::Int), Constant::Int(vec![2]), at.clone());
    let err = cg.emit_store(&chain, value).unwrap_err();
    assert!(matches!(err, CompilerError::InvalidIr(..)));
    assert_eq!(err.location(), Some(&at));
}
