//! Identifier allocation and output naming.
//!
//! Every block, value binding and definition is identified by an [`Id`].
//! The [`NameTable`] maps ids to GLSL identifiers that are safe to emit:
//! reserved words are prefixed, double underscores are rewritten, and no two
//! distinct source names share an output name within one compilation unit.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::num::NonZeroU32;

/// Opaque handle for a block, value or definition.
///
/// Ids are never zero; "no block" is expressed as `Option<Id>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Id(NonZeroU32);

impl Id {
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic id counter. The first id handed out is `1`.
#[derive(Debug, Clone)]
pub struct IdSource {
    next_id: NonZeroU32,
}

impl IdSource {
    pub fn new() -> Self {
        IdSource {
            next_id: NonZeroU32::MIN,
        }
    }

    pub fn next(&mut self) -> Id {
        let id = Id(self.next_id);
        self.next_id = self.next_id.checked_add(1).expect("id space exhausted");
        id
    }
}

impl Default for IdSource {
    fn default() -> Self {
        Self::new()
    }
}

/// GLSL keywords, built-in types, built-in functions and identifiers that
/// are reserved for future use. A source name in this set is prefixed.
const RESERVED_NAMES: &[&str] = &[
    // keywords
    "attribute", "const", "uniform", "varying", "buffer", "shared", "coherent", "volatile",
    "restrict", "readonly", "writeonly", "layout", "centroid", "flat", "smooth", "noperspective",
    "patch", "sample", "break", "continue", "do", "for", "while", "switch", "case", "default",
    "if", "else", "subroutine", "in", "out", "inout", "true", "false", "invariant", "precise",
    "discard", "return", "lowp", "mediump", "highp", "precision", "struct", "void",
    // reserved for future use
    "common", "partition", "active", "asm", "class", "union", "enum", "typedef", "template",
    "this", "resource", "goto", "inline", "noinline", "public", "static", "extern", "external",
    "interface", "long", "short", "half", "fixed", "unsigned", "superp", "input", "output",
    "ouput", "filter", "sizeof", "cast", "namespace", "using",
    // built-in types
    "bool", "int", "uint", "float", "double", "bvec2", "bvec3", "bvec4", "ivec2", "ivec3",
    "ivec4", "uvec2", "uvec3", "uvec4", "vec2", "vec3", "vec4", "dvec2", "dvec3", "dvec4",
    "mat2", "mat3", "mat4", "mat2x2", "mat2x3", "mat2x4", "mat3x2", "mat3x3", "mat3x4",
    "mat4x2", "mat4x3", "mat4x4", "sampler1D", "sampler2D", "sampler3D", "samplerCube",
    // built-in functions
    "abs", "sign", "all", "any", "sin", "sinh", "cos", "cosh", "tan", "tanh", "asin", "acos",
    "atan", "exp", "exp2", "log", "log2", "sqrt", "inversesqrt", "ceil", "floor", "fract",
    "trunc", "round", "roundEven", "radians", "degrees", "length", "normalize", "transpose",
    "determinant", "inverse", "intBitsToFloat", "uintBitsToFloat", "floatBitsToInt",
    "floatBitsToUint", "matrixCompMult", "not", "lessThan", "greaterThan", "lessThanEqual",
    "greaterThanEqual", "equal", "notEqual", "dot", "cross", "distance", "pow", "modf",
    "frexp", "ldexp", "min", "max", "mod", "step", "reflect", "refract", "faceforward",
    "fma", "mix", "clamp", "smoothstep", "isinf", "isnan", "dFdx", "dFdy", "fwidth",
    "bitCount", "bitfieldReverse", "findMSB", "findLSB", "outerProduct", "texture",
    "textureOffset", "textureLod", "textureLodOffset", "textureGrad", "textureGather",
    "textureSize", "texelFetch", "main",
];

/// Prefix that GLSL reserves for built-in variables.
const RESERVED_PREFIX: &str = "gl_";

/// Make a single identifier safe to emit.
///
/// Reserved names and names starting with `gl_` get a leading `_`; every
/// `__` (reserved by GLSL) is then replaced with `_US`. Applying the
/// function to its own output returns the output unchanged.
pub fn escape_identifier(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len() + 1);

    if name.starts_with(RESERVED_PREFIX) || RESERVED_NAMES.contains(&name) {
        escaped.push('_');
    }
    escaped.push_str(name);

    while let Some(pos) = escaped.find("__") {
        escaped.replace_range(pos..pos + 2, "_US");
    }

    escaped
}

/// Shape of the fallback name `_<id>` given to unnamed ids.
fn is_synthesized(name: &str) -> bool {
    name.len() > 1 && name.starts_with('_') && name[1..].bytes().all(|b| b.is_ascii_digit())
}

/// Output names for the ids of one compilation unit.
#[derive(Debug, Default)]
pub struct NameTable {
    /// Output name recorded for each named id
    names: HashMap<Id, String>,
    /// Source name -> output name, so repeated source names stay stable
    by_source: HashMap<String, String>,
    /// Output names already handed out
    taken: HashSet<String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a source name to its unique, escaped output name.
    pub fn unique(&mut self, source: &str) -> String {
        self.unique_keyed(source, source)
    }

    /// Like [`NameTable::unique`], but memoized under `key` while the output
    /// is derived from `preferred`. Used for backend-derived names whose key
    /// must not clash with any source name.
    pub fn unique_keyed(&mut self, key: &str, preferred: &str) -> String {
        if let Some(output) = self.by_source.get(key) {
            return output.clone();
        }

        let escaped = escape_identifier(preferred);
        // A suffix must not introduce `__`
        let stem = if escaped.ends_with('_') {
            format!("{}US", escaped)
        } else {
            escaped.clone()
        };
        let mut candidate = escaped;
        let mut suffix = 1;
        while self.taken.contains(&candidate) || is_synthesized(&candidate) {
            candidate = format!("{}_{}", stem, suffix);
            suffix += 1;
        }

        self.taken.insert(candidate.clone());
        self.by_source.insert(key.to_string(), candidate.clone());
        candidate
    }

    /// Record a name for `id`, returning the output name it will render as.
    pub fn assign(&mut self, id: Id, source: &str) -> String {
        let output = self.unique(source);
        self.names.insert(id, output.clone());
        output
    }

    /// Claim an output name for the backend itself. Source names that would
    /// escape to it are pushed to a suffixed variant instead.
    pub fn reserve(&mut self, output: &str) {
        self.taken.insert(output.to_string());
    }

    /// Bind `id` to a backend-chosen output name, claimed verbatim.
    pub fn assign_reserved(&mut self, id: Id, output: &str) {
        self.reserve(output);
        self.names.insert(id, output.to_string());
    }

    /// Make `id` render as `text`, an expression already spelled in GLSL.
    /// The text is not escaped and does not claim a name.
    pub fn alias(&mut self, id: Id, text: &str) {
        self.names.insert(id, text.to_string());
    }

    /// Output name of `id`, or `_<id>` when it was never named.
    pub fn resolve(&self, id: Id) -> String {
        match self.names.get(&id) {
            Some(name) => name.clone(),
            None => format!("_{}", id),
        }
    }
}
