//! GLSL backend for effect programs.
//!
//! A front end drives [`GlslCodegen`] with declarations and emission calls in
//! program order; [`GlslCodegen::finish`] then yields a [`Module`] holding the
//! GLSL source plus reflection data for samplers, textures, uniforms,
//! techniques and entry points.

pub mod error;
pub mod glsl;
pub mod ir;
pub mod module;
pub mod naming;

#[cfg(test)]
mod naming_tests;

pub use error::{CompilerError, Result};
pub use glsl::{CodegenOptions, GlslCodegen};
pub use module::{EntryPoint, Module};
pub use naming::{Id, escape_identifier};
