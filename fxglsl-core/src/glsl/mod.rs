//! GLSL code generation backend.
//!
//! [`GlslCodegen`] holds all state of one compilation unit. The front end
//! calls the `define_*`, `emit_*` and block operations in program order and
//! finally [`GlslCodegen::finish`] to obtain the [`Module`].

pub mod block;
mod control;
mod declare;
mod emit;
pub mod intrinsics;
pub mod layout;
pub mod types;

#[cfg(test)]
mod layout_tests;
#[cfg(test)]
mod types_tests;

pub use intrinsics::{Helper, Intrinsic};

use crate::error::Result;
use crate::ir::{FunctionInfo, Location, SamplerInfo, StructInfo, TechniqueInfo, TextureInfo, Type, UniformInfo};
use crate::module::{EntryPoint, Module};
use crate::naming::{Id, IdSource, NameTable};
use crate::{bail_ir, bail_ir_at};
use block::{BlockStore, Stmt};
use layout::LayoutAllocator;
use log::debug;
use std::collections::{BTreeSet, HashMap};

/// Name of the synthetic struct that aggregates all uniforms.
pub const GLOBALS_STRUCT: &str = "$Globals";
/// Output name of the uniform buffer.
pub const GLOBALS_NAME: &str = "_Globals";

/// Output configuration, fixed for one compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Write `#line` markers before statements.
    pub line_directives: bool,
    /// Prepend `#version` and the extensions the output relies on.
    pub version: Option<u32>,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        CodegenOptions {
            line_directives: true,
            version: None,
        }
    }
}

/// Compilation context of the GLSL backend.
pub struct GlslCodegen {
    options: CodegenOptions,
    ids: IdSource,
    names: NameTable,
    blocks: BlockStore,
    current_block: Option<Id>,
    last_block: Option<Id>,
    /// Function nesting depth, 0 outside of functions
    scope_level: u32,
    layout: LayoutAllocator,
    /// Definition of the `$Globals` struct; its block holds the buffer fields
    cbuffer_id: Id,
    structs: Vec<StructInfo>,
    functions: Vec<FunctionInfo>,
    uniforms: Vec<UniformInfo>,
    samplers: Vec<SamplerInfo>,
    textures: Vec<TextureInfo>,
    techniques: Vec<TechniqueInfo>,
    entry_points: Vec<EntryPoint>,
    /// Case block -> blocks whose statements follow it through fallthrough
    fallthrough: HashMap<Id, Vec<Id>>,
    helpers: BTreeSet<Helper>,
}

impl Default for GlslCodegen {
    fn default() -> Self {
        Self::new()
    }
}

impl GlslCodegen {
    pub fn new() -> Self {
        Self::with_options(CodegenOptions::default())
    }

    pub fn with_options(options: CodegenOptions) -> Self {
        let mut ids = IdSource::new();
        let mut names = NameTable::new();

        let cbuffer_id = ids.next();
        names.assign_reserved(cbuffer_id, GLOBALS_NAME);
        for helper in [Helper::Fmod] {
            names.reserve(helper.name());
        }

        let globals = StructInfo {
            definition: Some(cbuffer_id),
            name: GLOBALS_STRUCT.to_string(),
            unique_name: GLOBALS_NAME.to_string(),
            members: Vec::new(),
        };

        GlslCodegen {
            options,
            ids,
            names,
            blocks: BlockStore::new(),
            current_block: None,
            last_block: None,
            scope_level: 0,
            layout: LayoutAllocator::new(),
            cbuffer_id,
            structs: vec![globals],
            functions: Vec::new(),
            uniforms: Vec::new(),
            samplers: Vec::new(),
            textures: Vec::new(),
            techniques: Vec::new(),
            entry_points: Vec::new(),
            fallthrough: HashMap::new(),
            helpers: BTreeSet::new(),
        }
    }

    pub fn options(&self) -> &CodegenOptions {
        &self.options
    }

    /// A fresh id, never handed out before in this unit.
    pub fn make_id(&mut self) -> Id {
        self.ids.next()
    }

    pub fn create_block(&mut self) -> Id {
        self.make_id()
    }

    /// Record a source name for `id`; returns the name it is emitted as.
    /// An empty name leaves the id with its synthesized `_<id>` name.
    pub fn assign_name(&mut self, id: Id, name: &str) -> String {
        if name.is_empty() {
            return self.names.resolve(id);
        }
        self.names.assign(id, name)
    }

    pub fn resolve_name(&self, id: Id) -> String {
        self.names.resolve(id)
    }

    /// Id of the `$Globals` struct all uniforms belong to.
    pub fn globals_id(&self) -> Id {
        self.cbuffer_id
    }

    pub fn find_struct(&self, definition: Id) -> Result<&StructInfo> {
        match self.structs.iter().find(|s| s.definition == Some(definition)) {
            Some(info) => Ok(info),
            None => bail_ir!("unknown struct definition {}", definition),
        }
    }

    pub fn find_function(&self, definition: Id) -> Option<&FunctionInfo> {
        self.functions.iter().find(|f| f.definition == Some(definition))
    }

    /// Output name of the uniform buffer field backing the uniform `name`.
    fn uniform_field_name(&mut self, name: &str) -> String {
        let key = format!("{}.{}", GLOBALS_STRUCT, name);
        self.names.unique_keyed(&key, &format!("{}_{}", GLOBALS_NAME, name))
    }

    /// Statements of the current block (the root outside of any block).
    fn code(&mut self) -> &mut Vec<Stmt> {
        self.blocks.code(self.current_block)
    }

    fn write_location(&mut self, location: &Location) {
        if location.line > 0 {
            self.code().push(Stmt::Line(location.line));
        }
    }

    fn render_type(&self, ty: &Type, is_param: bool) -> Result<String> {
        types::render_type(ty, is_param, &self.names)
    }

    /// Assemble the module: preamble, helpers, uniform buffer, then the
    /// root block.
    pub fn finish(self) -> Result<Module> {
        if self.scope_level > 0 {
            let location = self.functions.last().map(|f| f.location.clone()).unwrap_or_default();
            bail_ir_at!(location, "function left open at end of unit");
        }

        let mut code = String::new();

        if let Some(version) = self.options.version {
            code.push_str(&format!("#version {}\n", version));
            code.push_str("#extension GL_ARB_shading_language_420pack : enable\n");
        }

        for helper in &self.helpers {
            code.push_str(helper.definition());
        }

        if self.blocks.has_statements(self.cbuffer_id) {
            let fields = self.blocks.snapshot(Some(self.cbuffer_id));
            let mut renderer = block::Renderer::new(self.options.line_directives);
            renderer.line(0, &format!("layout(std140, binding = 0) uniform {} {{", GLOBALS_NAME));
            renderer.render(&fields, 1);
            renderer.line(0, "};");
            code.push_str(&renderer.finish());
        }

        code.push_str(&block::render(self.blocks.root(), self.options.line_directives));

        debug!(
            "Finished GLSL module: {} uniforms, {} samplers, {} entry points",
            self.uniforms.len(),
            self.samplers.len(),
            self.entry_points.len()
        );

        Ok(Module {
            code,
            samplers: self.samplers,
            textures: self.textures,
            uniforms: self.uniforms,
            techniques: self.techniques,
            entry_points: self.entry_points,
        })
    }
}
