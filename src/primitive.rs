use num::{Float, NumCast, Zero};
use rand::distributions::uniform::SampleUniform;
use std::{
    fmt::{Debug, Display, LowerExp},
    iter::Sum,
    num::ParseFloatError,
    ops::{Add, AddAssign, Sub, SubAssign},
    str::FromStr,
};

/// Floating point type all coordinates, sums and distances are computed in.
pub trait Primitive: Add + AddAssign + Sum + Sub + SubAssign + Zero + Float + NumCast + SampleUniform
                + FromStr<Err = ParseFloatError> + PartialOrd + Copy + Default + Display + Debug
                + Sync + Send + LowerExp + 'static + for<'a> AddAssign<&'a Self> {}
impl Primitive for f32 {}
impl Primitive for f64 {}
