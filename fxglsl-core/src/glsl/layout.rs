//! Physical placement of uniforms and samplers.

use crate::ir::Type;

/// Round `address` up to the next multiple of `alignment`.
pub fn align(address: u32, alignment: u32) -> u32 {
    if alignment == 0 || address % alignment == 0 {
        address
    } else {
        address + alignment - address % alignment
    }
}

/// Bytes a uniform of `ty` occupies in the std140 global buffer.
///
/// Three-row vectors and matrices are padded to four rows.
pub fn uniform_size(ty: &Type) -> u32 {
    let rows = if ty.rows == 3 { 4 } else { ty.rows };
    4 * rows * ty.cols * ty.array_length.max(1)
}

/// Running cursors for the global uniform buffer and sampler bindings.
#[derive(Debug, Default)]
pub struct LayoutAllocator {
    cbuffer_offset: u32,
    next_sampler_binding: u32,
}

impl LayoutAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a uniform of `ty`; returns `(offset, size)`.
    pub fn place_uniform(&mut self, ty: &Type) -> (u32, u32) {
        let size = uniform_size(ty);
        let offset = align(self.cbuffer_offset, size);
        self.cbuffer_offset = offset + size;
        (offset, size)
    }

    pub fn next_sampler_binding(&mut self) -> u32 {
        let binding = self.next_sampler_binding;
        self.next_sampler_binding += 1;
        binding
    }

    /// Bytes used by the global uniform buffer so far.
    pub fn cbuffer_size(&self) -> u32 {
        self.cbuffer_offset
    }
}
