//! Declarations: structs, resources, uniforms, variables, functions and
//! entry points.

use super::block::Stmt;
use super::types::array_suffix;
use super::GlslCodegen;
use crate::error::Result;
use crate::ir::{FunctionInfo, Location, SamplerInfo, StructInfo, StructMember, TechniqueInfo, TextureInfo, Type, UniformInfo};
use crate::module::EntryPoint;
use crate::naming::{Id, NameTable};
use crate::{bail_ir, bail_ir_at};
use log::debug;

impl GlslCodegen {
    /// Declare a struct type. Members keep their order; an empty struct gets
    /// a placeholder field since GLSL has no empty aggregates.
    pub fn define_struct(&mut self, location: &Location, info: &mut StructInfo) -> Result<Id> {
        let definition = self.make_id();
        info.definition = Some(definition);
        info.unique_name = self.assign_name(definition, &info.unique_name);

        // Members live in their own namespace
        let mut member_names = NameTable::new();
        let mut fields = Vec::with_capacity(info.members.len().max(1));
        for member in &mut info.members {
            member.unique_name = member_names.unique(&member.name);
            fields.push(self.member_declaration(member)?);
        }
        if fields.is_empty() {
            fields.push("float _dummy".to_string());
        }

        self.write_location(location);
        self.code().push(Stmt::Struct {
            name: info.unique_name.clone(),
            fields,
        });
        self.structs.push(info.clone());

        debug!("Defined struct {} with {} members", info.unique_name, info.members.len());
        Ok(definition)
    }

    fn member_declaration(&self, member: &StructMember) -> Result<String> {
        Ok(format!(
            "{} {}{}",
            self.render_type(&member.ty, true)?,
            member.unique_name,
            array_suffix(&member.ty)
        ))
    }

    /// Register a texture. Textures are only reached through samplers, so
    /// nothing is emitted.
    pub fn define_texture(&mut self, _location: &Location, info: &mut TextureInfo) -> Result<Id> {
        let id = self.make_id();
        info.id = Some(id);
        self.textures.push(info.clone());

        debug!("Registered texture {} ({}x{})", info.unique_name, info.width, info.height);
        Ok(id)
    }

    /// Declare a sampler in the next free binding slot.
    pub fn define_sampler(&mut self, location: &Location, info: &mut SamplerInfo) -> Result<Id> {
        let id = self.make_id();
        info.id = Some(id);
        info.binding = self.layout.next_sampler_binding();
        info.unique_name = self.assign_name(id, &info.unique_name);

        self.write_location(location);
        let declaration = format!("layout(binding = {}) uniform sampler2D {};", info.binding, info.unique_name);
        self.code().push(Stmt::Raw(declaration));
        self.samplers.push(info.clone());

        debug!("Sampler {} bound to slot {}", info.unique_name, info.binding);
        Ok(id)
    }

    /// Place a uniform in the global buffer and declare its field.
    ///
    /// Returns the id of the `$Globals` struct: uniforms are accessed as
    /// members of it.
    ///
    /// Offsets come from [`LayoutAllocator`](super::layout::LayoutAllocator),
    /// which pads three-component vectors to 16 bytes. They are reflected
    /// but not written into the block, so they can differ from what a GLSL
    /// compiler assigns under std140: a `float` after a `float3` is reported
    /// at offset 16 while std140 packs it at 12. Hosts that fill the buffer
    /// from the reflected offsets should keep such uniforms apart.
    pub fn define_uniform(&mut self, location: &Location, info: &mut UniformInfo) -> Result<Id> {
        if !info.ty.is_numeric() {
            bail_ir_at!(location, "uniform {} must have a numeric type", info.name);
        }

        let (offset, size) = self.layout.place_uniform(&info.ty);
        info.offset = offset;
        info.size = size;
        info.member_index = self.uniforms.len() as u32;

        let field_name = self.uniform_field_name(&info.name);
        let field = format!("{} {}{};", self.render_type(&info.ty, false)?, field_name, array_suffix(&info.ty));

        let cbuffer = Some(self.cbuffer_id);
        if location.line > 0 {
            self.blocks.code(cbuffer).push(Stmt::Line(location.line));
        }
        self.blocks.code(cbuffer).push(Stmt::Raw(field));

        let cbuffer_id = self.cbuffer_id;
        match self.structs.iter_mut().find(|s| s.definition == Some(cbuffer_id)) {
            Some(globals) => globals.members.push(StructMember {
                name: info.name.clone(),
                unique_name: field_name,
                ty: info.ty,
            }),
            None => bail_ir!("uniform buffer struct is missing"),
        }
        self.uniforms.push(info.clone());

        debug!("Uniform {} placed at offset {} ({} bytes)", info.name, offset, size);
        Ok(self.cbuffer_id)
    }

    /// Declare a mutable variable, optionally initialized from `initializer`.
    pub fn define_variable(
        &mut self,
        location: &Location,
        ty: &Type,
        name: Option<&str>,
        initializer: Option<Id>,
    ) -> Result<Id> {
        let id = self.make_id();
        if let Some(name) = name {
            self.assign_name(id, name);
        }

        let declaration = Stmt::Declare {
            id,
            ty: self.render_type(ty, false)?,
            name: self.resolve_name(id),
            array_suffix: array_suffix(ty),
            constant: false,
            init: initializer.map(|value| self.resolve_name(value)),
        };
        self.write_location(location);
        self.code().push(declaration);

        Ok(id)
    }

    /// Write the signature of a function and open its scope. The body is
    /// attached by [`GlslCodegen::leave_function`].
    pub fn define_function(&mut self, location: &Location, info: &mut FunctionInfo) -> Result<Id> {
        let definition = self.make_id();
        info.definition = Some(definition);
        info.unique_name = self.assign_name(definition, &info.unique_name);

        let mut parameters = Vec::with_capacity(info.parameters.len());
        for param in &mut info.parameters {
            let id = self.make_id();
            param.definition = Some(id);
            let name = self.assign_name(id, &param.name);
            parameters.push(format!(
                "{} {}{}",
                self.render_type(&param.ty, true)?,
                name,
                array_suffix(&param.ty)
            ));
        }

        let signature = format!(
            "{} {}({})",
            self.render_type(&info.return_type, false)?,
            info.unique_name,
            parameters.join(", ")
        );
        self.write_location(location);
        self.code().push(Stmt::Raw(signature));

        self.scope_level += 1;
        self.functions.push(info.clone());

        debug!("Defined function {} with {} parameters", info.unique_name, info.parameters.len());
        Ok(definition)
    }

    /// Expose `function` to a pipeline stage through a guarded `main` stub.
    /// A second request for the same function is ignored.
    pub fn create_entry_point(&mut self, function: &FunctionInfo, is_pixel_shader: bool) -> Result<()> {
        if self.entry_points.iter().any(|ep| ep.name == function.unique_name) {
            return Ok(());
        }
        if function.unique_name.is_empty() {
            bail_ir_at!(function.location, "entry point for an unnamed function");
        }

        let code = self.code();
        code.push(Stmt::Directive(format!("#ifdef ENTRY_POINT_{}", function.unique_name)));
        code.push(Stmt::Raw("void main()".to_string()));
        code.push(Stmt::Body(Vec::new()));
        code.push(Stmt::Directive("#endif".to_string()));

        self.entry_points.push(EntryPoint {
            name: function.unique_name.clone(),
            is_pixel_shader,
        });

        debug!(
            "Created {} entry point {}",
            if is_pixel_shader { "pixel" } else { "vertex" },
            function.unique_name
        );
        Ok(())
    }

    /// Technique metadata is passed through to the module unchanged.
    pub fn define_technique(&mut self, info: TechniqueInfo) {
        debug!("Registered technique {} with {} passes", info.name, info.passes.len());
        self.techniques.push(info);
    }
}
