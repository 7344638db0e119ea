//! Numeric test parameters and their per-type static knowledge.
//!
//! A [`TestParam`] is a type the multi-type runner knows how to exercise:
//! it carries its numeric kind, a table of boundary values for edge-case
//! generation, a full-range random sampler, and a widening conversion to
//! the [`Scalar`] view used by kind-keyed dispatch.

use rand::rngs::StdRng;
use rand::Rng;
use std::any::Any;
use std::fmt;

/// The numeric category of a test parameter type.
///
/// Dispatch in the multi-type runner is keyed on this closed set rather
/// than on compile-time trait introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Signed fixed-width integer.
    Signed,
    /// Unsigned fixed-width integer.
    Unsigned,
    /// Binary floating point.
    Float,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Signed => write!(f, "signed integer"),
            ParamKind::Unsigned => write!(f, "unsigned integer"),
            ParamKind::Float => write!(f, "floating point"),
        }
    }
}

/// A widened, kind-tagged view of a test parameter value.
///
/// Every member of a type list converts losslessly into this view
/// (`i8`..`i128` into `Signed`, `u8`..`u128` into `Unsigned`, `f32`/`f64`
/// into `Float`), so preconditions and printers can be written once per
/// kind instead of once per concrete type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Signed(i128),
    Unsigned(u128),
    Float(f64),
}

impl Scalar {
    /// The kind this scalar was widened from.
    pub fn kind(&self) -> ParamKind {
        match self {
            Scalar::Signed(_) => ParamKind::Signed,
            Scalar::Unsigned(_) => ParamKind::Unsigned,
            Scalar::Float(_) => ParamKind::Float,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Signed(v) => write!(f, "{v}"),
            Scalar::Unsigned(v) => write!(f, "{v}"),
            Scalar::Float(v) => write!(f, "{v}"),
        }
    }
}

/// A numeric type usable as a parameter of a multi-type test run.
pub trait TestParam: Any + Clone + fmt::Debug {
    /// The numeric category dispatch resolves on.
    const KIND: ParamKind;

    /// The fixed, ordered table of boundary values for this type.
    fn edge_cases() -> Vec<Self>;

    /// Draw one value from the canonical distribution: uniform over the
    /// full representable range for integers, uniform in [0, 1) for floats.
    fn sample(rng: &mut StdRng) -> Self;

    /// Widen into the kind-tagged dispatch view.
    fn to_scalar(&self) -> Scalar;
}

macro_rules! impl_signed_param {
    ($($ty:ty),+) => {$(
        impl TestParam for $ty {
            const KIND: ParamKind = ParamKind::Signed;

            fn edge_cases() -> Vec<Self> {
                vec![
                    0,
                    1,
                    -1,
                    2,
                    -2,
                    <$ty>::MIN,
                    <$ty>::MIN + 1,
                    <$ty>::MAX,
                    <$ty>::MAX - 1,
                ]
            }

            fn sample(rng: &mut StdRng) -> Self {
                rng.gen::<$ty>()
            }

            fn to_scalar(&self) -> Scalar {
                Scalar::Signed(*self as i128)
            }
        }
    )+};
}

macro_rules! impl_unsigned_param {
    ($(($ty:ty, $signed:ty)),+) => {$(
        impl TestParam for $ty {
            const KIND: ParamKind = ParamKind::Unsigned;

            // The last three probe the signed/unsigned boundary: the
            // same-width signed MAX and its neighbours reinterpreted as
            // unsigned, so sMAX + 1 is the sign-bit value.
            fn edge_cases() -> Vec<Self> {
                vec![
                    0,
                    1,
                    2,
                    <$ty>::MAX,
                    <$ty>::MAX - 1,
                    <$signed>::MAX as $ty,
                    (<$signed>::MAX as $ty) - 1,
                    (<$signed>::MAX as $ty) + 1,
                ]
            }

            fn sample(rng: &mut StdRng) -> Self {
                rng.gen::<$ty>()
            }

            fn to_scalar(&self) -> Scalar {
                Scalar::Unsigned(*self as u128)
            }
        }
    )+};
}

impl_signed_param!(i8, i16, i32, i64, i128);
impl_unsigned_param!((u8, i8), (u16, i16), (u32, i32), (u64, i64), (u128, i128));

impl TestParam for f32 {
    const KIND: ParamKind = ParamKind::Float;

    // f32-native boundaries only. Cross-precision entries widen narrower
    // values into wider tables, never narrow wider ones down.
    fn edge_cases() -> Vec<Self> {
        vec![
            0.0,
            -0.0,
            f32::MIN_POSITIVE,
            -f32::MIN_POSITIVE,
            f32::MAX,
            f32::MIN,
            f32::EPSILON,
            f32::INFINITY,
            f32::NEG_INFINITY,
            f32::NAN,
            f32::from_bits(1),
            -f32::from_bits(1),
        ]
    }

    fn sample(rng: &mut StdRng) -> Self {
        rng.gen::<f32>()
    }

    fn to_scalar(&self) -> Scalar {
        Scalar::Float(f64::from(*self))
    }
}

impl TestParam for f64 {
    const KIND: ParamKind = ParamKind::Float;

    // Includes the f32-precision boundaries widened to f64, to probe
    // precision-boundary behaviour even at the widest type. Values that
    // widen to an identical f64 (the infinities) are listed once.
    fn edge_cases() -> Vec<Self> {
        vec![
            0.0,
            -0.0,
            f64::from(f32::MIN_POSITIVE),
            f64::MIN_POSITIVE,
            f64::from(-f32::MIN_POSITIVE),
            -f64::MIN_POSITIVE,
            f64::from(f32::MAX),
            f64::MAX,
            f64::from(f32::MIN),
            f64::MIN,
            f64::from(f32::EPSILON),
            f64::EPSILON,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NAN,
            f64::from(f32::from_bits(1)),
            f64::from_bits(1),
            f64::from(-f32::from_bits(1)),
            -f64::from_bits(1),
        ]
    }

    fn sample(rng: &mut StdRng) -> Self {
        rng.gen::<f64>()
    }

    fn to_scalar(&self) -> Scalar {
        Scalar::Float(*self)
    }
}
