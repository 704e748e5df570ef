//! Intrinsic functions and their GLSL spelling.
//!
//! Every intrinsic the front end can produce is a variant of [`Intrinsic`].
//! Overloads that need different GLSL text are separate variants, so the
//! template match below is exhaustive.

use crate::bail_ir;
use crate::error::Result;
use crate::ir::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intrinsic {
    Abs,
    Acos,
    All,
    Any,
    /// `asfloat(int)`
    AsfloatInt,
    /// `asfloat(uint)`
    AsfloatUint,
    /// `asint(float)`
    AsintFloat,
    /// `asuint(float)`
    AsuintFloat,
    Asin,
    Atan,
    Atan2,
    Ceil,
    Clamp,
    Cos,
    Cosh,
    Countbits,
    Cross,
    Ddx,
    Ddy,
    Degrees,
    Determinant,
    Distance,
    Dot,
    Exp,
    Exp2,
    Faceforward,
    Firstbithigh,
    Firstbitlow,
    Floor,
    Fmod,
    Frac,
    Fwidth,
    Isinf,
    Isnan,
    Ldexp,
    Length,
    Lerp,
    Log,
    Log10,
    Log2,
    Mad,
    Max,
    Min,
    Modf,
    Mul,
    Normalize,
    Pow,
    Radians,
    Rcp,
    Reflect,
    Refract,
    Reversebits,
    Round,
    Rsqrt,
    Saturate,
    Sign,
    Sin,
    Sincos,
    Sinh,
    Smoothstep,
    Sqrt,
    Step,
    Tan,
    Tanh,
    Transpose,
    Trunc,
    Tex2D,
    Tex2DOffset,
    Tex2DLod,
    Tex2DLodOffset,
    Tex2DGrad,
    Tex2DFetch,
    Tex2DGatherR,
    Tex2DGatherG,
    Tex2DGatherB,
    Tex2DGatherA,
    Tex2DSize,
    Tex2DSizeLod,
}

/// Support functions written once into the output when used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Helper {
    /// Floating-point remainder truncated toward zero.
    Fmod,
}

impl Helper {
    pub fn name(self) -> &'static str {
        match self {
            Helper::Fmod => "_fmod",
        }
    }

    pub fn definition(self) -> &'static str {
        match self {
            Helper::Fmod => concat!(
                "float _fmod(float x, float y) { return x - y * trunc(x / y); }\n",
                "vec2 _fmod(vec2 x, vec2 y) { return x - y * trunc(x / y); }\n",
                "vec3 _fmod(vec3 x, vec3 y) { return x - y * trunc(x / y); }\n",
                "vec4 _fmod(vec4 x, vec4 y) { return x - y * trunc(x / y); }\n",
            ),
        }
    }
}

impl Intrinsic {
    /// Number of arguments the intrinsic takes.
    pub fn arity(self) -> usize {
        use Intrinsic::*;
        match self {
            Tex2DSize => 1,
            Abs | Acos | All | Any | AsfloatInt | AsfloatUint | AsintFloat | AsuintFloat | Asin | Atan
            | Ceil | Cos | Cosh | Countbits | Ddx | Ddy | Degrees | Determinant | Exp | Exp2
            | Firstbithigh | Firstbitlow | Floor | Frac | Fwidth | Isinf | Isnan | Length | Log
            | Log10 | Log2 | Normalize | Radians | Rcp | Reversebits | Round | Rsqrt | Saturate
            | Sign | Sin | Sinh | Sqrt | Tan | Tanh | Transpose | Trunc => 1,
            Atan2 | Cross | Distance | Dot | Fmod | Ldexp | Max | Min | Modf | Mul | Pow | Reflect
            | Step | Tex2D | Tex2DLod | Tex2DFetch | Tex2DGatherR | Tex2DGatherG | Tex2DGatherB
            | Tex2DGatherA | Tex2DSizeLod => 2,
            Clamp | Faceforward | Lerp | Mad | Refract | Sincos | Smoothstep | Tex2DOffset
            | Tex2DLodOffset => 3,
            Tex2DGrad => 4,
        }
    }

    /// Helper function the expansion calls, if any.
    pub fn helper(self) -> Option<Helper> {
        match self {
            Intrinsic::Fmod => Some(Helper::Fmod),
            _ => None,
        }
    }

    /// Expand the call with already rendered argument names.
    ///
    /// `arg_types` matches `args`; `res_type_name` is the rendered result type.
    pub fn expand(self, args: &[String], arg_types: &[Type], res_type_name: &str) -> Result<String> {
        use Intrinsic::*;

        if args.len() != self.arity() || arg_types.len() != args.len() {
            bail_ir!("{:?} takes {} arguments, got {}", self, self.arity(), args.len());
        }

        let a = |i: usize| args[i].as_str();
        let call = |name: &str| format!("{}({})", name, args.join(", "));

        let text = match self {
            Abs => call("abs"),
            Acos => call("acos"),
            Asin => call("asin"),
            Atan => call("atan"),
            Ceil => call("ceil"),
            Clamp => call("clamp"),
            Cos => call("cos"),
            Cosh => call("cosh"),
            Cross => call("cross"),
            Degrees => call("degrees"),
            Determinant => call("determinant"),
            Distance => call("distance"),
            Dot => call("dot"),
            Exp => call("exp"),
            Exp2 => call("exp2"),
            Faceforward => call("faceforward"),
            Floor => call("floor"),
            Fwidth => call("fwidth"),
            Isinf => call("isinf"),
            Isnan => call("isnan"),
            Ldexp => format!("({} * exp2({}))", a(0), a(1)),
            Length => call("length"),
            Log => call("log"),
            Log2 => call("log2"),
            Max => call("max"),
            Min => call("min"),
            Modf => call("modf"),
            Normalize => call("normalize"),
            Pow => call("pow"),
            Radians => call("radians"),
            Reflect => call("reflect"),
            Refract => call("refract"),
            Round => call("round"),
            Sin => call("sin"),
            Sinh => call("sinh"),
            Smoothstep => call("smoothstep"),
            Sqrt => call("sqrt"),
            Step => call("step"),
            Tan => call("tan"),
            Tanh => call("tanh"),
            Transpose => call("transpose"),
            Trunc => call("trunc"),

            All | Any => {
                let name = if self == All { "all" } else { "any" };
                let ty = &arg_types[0];
                if ty.is_vector() {
                    format!("{}(bvec{}({}))", name, ty.rows, a(0))
                } else {
                    format!("bool({})", a(0))
                }
            }
            AsfloatInt => call("intBitsToFloat"),
            AsfloatUint => call("uintBitsToFloat"),
            AsintFloat => call("floatBitsToInt"),
            AsuintFloat => call("floatBitsToUint"),
            Atan2 => call("atan"),
            Countbits => call("bitCount"),
            Ddx => call("dFdx"),
            Ddy => call("dFdy"),
            Firstbithigh => call("findMSB"),
            Firstbitlow => call("findLSB"),
            Fmod => call(Helper::Fmod.name()),
            Frac => call("fract"),
            Lerp => call("mix"),
            Log10 => format!("(log2({}) / log2(10.0))", a(0)),
            Mad => format!("({} * {} + {})", a(0), a(1), a(2)),
            Mul => format!("({} * {})", a(0), a(1)),
            Rcp => format!("(1.0 / {})", a(0)),
            Reversebits => call("bitfieldReverse"),
            Rsqrt => call("inversesqrt"),
            Saturate => format!("clamp({}, 0.0, 1.0)", a(0)),
            Sign => format!("{}(sign({}))", res_type_name, a(0)),
            Sincos => format!("{} = sin({}), {} = cos({})", a(1), a(0), a(2), a(0)),

            Tex2D => call("texture"),
            Tex2DOffset => call("textureOffset"),
            Tex2DLod => format!("textureLod({}, {}.xy, {}.w)", a(0), a(1), a(1)),
            Tex2DLodOffset => format!("textureLodOffset({}, {}.xy, {}.w, {})", a(0), a(1), a(1), a(2)),
            Tex2DGrad => call("textureGrad"),
            Tex2DFetch => format!("texelFetch({}, {}.xy, {}.w)", a(0), a(1), a(1)),
            Tex2DGatherR => format!("textureGather({}, {}, 0)", a(0), a(1)),
            Tex2DGatherG => format!("textureGather({}, {}, 1)", a(0), a(1)),
            Tex2DGatherB => format!("textureGather({}, {}, 2)", a(0), a(1)),
            Tex2DGatherA => format!("textureGather({}, {}, 3)", a(0), a(1)),
            Tex2DSize => format!("textureSize({}, 0)", a(0)),
            Tex2DSizeLod => call("textureSize"),
        };

        Ok(text)
    }
}
