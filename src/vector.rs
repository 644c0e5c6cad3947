//! Plain 2D vectors used for anchor positions and tangent handles.
//!
//! Arithmetic works against another [`Vector`], a bare scalar (applied to both axes) or a
//! [`PartialVector`] whose missing axes fall back to the operation's identity
//! (`0` for addition and subtraction, `1` for multiplication and division).

use nalgebra::Vector2;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A point or offset in curve space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    /// Horizontal component, the timeline's "time"
    pub x: f64,
    /// Vertical component, the timeline's value
    pub y: f64,
}

/// A vector which may lack either of its components.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartialVector {
    /// Horizontal component, if any
    #[cfg_attr(feature = "serde", serde(default))]
    pub x: Option<f64>,
    /// Vertical component, if any
    #[cfg_attr(feature = "serde", serde(default))]
    pub y: Option<f64>,
}

impl Vector {
    /// The origin
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    /// Create a vector from its components
    pub const fn new(x: f64, y: f64) -> Self {
        Vector { x, y }
    }

    /// Euclidean length
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Whether both components are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl PartialVector {
    /// Fill the missing components with `default`.
    pub fn or(self, default: f64) -> Vector {
        Vector::new(self.x.unwrap_or(default), self.y.unwrap_or(default))
    }
}

macro_rules! impl_vector_arithmetic {
    ($Trait:ident, $method:ident, $AssignTrait:ident, $assign:ident, $op:tt, $identity:expr) => {
        impl $Trait for Vector {
            type Output = Vector;
            fn $method(self, rhs: Vector) -> Vector {
                Vector::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }
        impl $Trait<f64> for Vector {
            type Output = Vector;
            fn $method(self, rhs: f64) -> Vector {
                Vector::new(self.x $op rhs, self.y $op rhs)
            }
        }
        impl $Trait<PartialVector> for Vector {
            type Output = Vector;
            fn $method(self, rhs: PartialVector) -> Vector {
                self $op rhs.or($identity)
            }
        }
        impl $AssignTrait for Vector {
            fn $assign(&mut self, rhs: Vector) {
                *self = *self $op rhs;
            }
        }
        impl $AssignTrait<f64> for Vector {
            fn $assign(&mut self, rhs: f64) {
                *self = *self $op rhs;
            }
        }
    };
}
impl_vector_arithmetic!(Add, add, AddAssign, add_assign, +, 0.0);
impl_vector_arithmetic!(Sub, sub, SubAssign, sub_assign, -, 0.0);
impl_vector_arithmetic!(Mul, mul, MulAssign, mul_assign, *, 1.0);
impl_vector_arithmetic!(Div, div, DivAssign, div_assign, /, 1.0);

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

/* Conversions from and to tuples and nalgebra */
impl From<(f64, f64)> for Vector {
    fn from(p: (f64, f64)) -> Self {
        Vector::new(p.0, p.1)
    }
}
impl From<Vector> for (f64, f64) {
    fn from(p: Vector) -> Self {
        (p.x, p.y)
    }
}
impl From<Vector2<f64>> for Vector {
    fn from(p: Vector2<f64>) -> Self {
        Vector::new(p.x, p.y)
    }
}
impl From<Vector> for Vector2<f64> {
    fn from(p: Vector) -> Self {
        Vector2::new(p.x, p.y)
    }
}
