//! A wrapper around [`nalgebra::Matrix`] interpreting it as a bezier curve.

use nalgebra::allocator::Allocator;
use nalgebra::dimension::{Const, Dim, DimDiff, DimName, DimSub, U1, U2};
use nalgebra::{DefaultAllocator, Matrix, OMatrix, OVector, Owned, RealField, Storage};
use num::integer::binomial;
use std::fmt;

use crate::npolynomial::Polynomial;

/// Wrapper around [`nalgebra::Matrix`] interpreting it as a bezier curve.
///
/// The curve's control points are stored as the matrix' columns.
#[derive(Clone)]
pub struct BezierCurve<T, R, C, S>(pub Matrix<T, R, C, S>);

/// Wrapper around [`nalgebra::OMatrix`] interpreting it as a bezier curve.
pub type OBezierCurve<T, R, C> = BezierCurve<T, R, C, Owned<T, R, C>>;

impl<T, R, C, S: fmt::Debug> fmt::Debug for BezierCurve<T, R, C, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.data.fmt(formatter)
    }
}

impl<T: RealField, R: Dim, C: Dim, S: Storage<T, R, C>> BezierCurve<T, R, C, S>
where
    DefaultAllocator: Allocator<T, R, U1>,
    DefaultAllocator: Allocator<T, R, C>,
{
    /// Get the point on the curve at position `t`.
    ///
    /// This method uses de castlejau's algorithm. An alternative way would be to evaluate the
    /// curve's polynomial (See `BezierCurve::polynomial`).
    pub fn castlejau_eval(&self, t: T) -> OVector<T, R> {
        let t_inv = T::one() - t.clone();
        let ncols = self.0.ncols();

        // Each step replaces column i by the interpolation of i and i + 1,
        // i + 1 is still untouched when it's read.
        let mut points = self.0.clone_owned();
        for step in 1..ncols {
            for i in 0..(ncols - step) {
                let column =
                    &points.column(i) * t_inv.clone() + &points.column(i + 1) * t.clone();
                points.set_column(i, &column);
            }
        }

        points.column(0).clone_owned()
    }
}

impl<T: RealField, R: Dim, C: Dim, S: Storage<T, R, C>> BezierCurve<T, R, C, S>
where
    DefaultAllocator: Allocator<T, R, C>, // polynomial
    DefaultAllocator: Allocator<T, C, C>, // bernstein basis
{
    /// Computes the curve's polynomial
    ///
    /// This polynomial evaluated between `0` and `1` yields the same points as its corrisponding bezier curve.
    ///
    /// If you are only interested in its derivative, use [`derivative`] to get it directly.
    ///
    /// [`derivative`]: BezierCurve::derivative
    pub fn polynomial(&self) -> Polynomial<T, R, C, Owned<T, R, C>> {
        let (rows, cols) = self.0.shape_generic();
        let mut polynomial = Matrix::zeros_generic(rows, cols);

        for (i, b) in bernstein_polynomials::<T, _>(cols).row_iter().enumerate() {
            polynomial += self.0.column(i) * b;
        }

        Polynomial(polynomial)
    }
}

impl<T: RealField, R: DimName, C: Dim, S: Storage<T, R, C>> BezierCurve<T, R, C, S>
where
    C: DimSub<U1>,
    DefaultAllocator: Allocator<T, R, DimDiff<C, U1>>, // polynomial
    DefaultAllocator: Allocator<T, DimDiff<C, U1>, DimDiff<C, U1>>, // bernstein basis
    DefaultAllocator: Allocator<T, R, U1>, // column difference
{
    /// Computes the curve's polynomial's derivative
    ///
    /// The derivative of a bezier curve is the bezier curve of degree `n - 1` over the
    /// differences of neighbouring control points, scaled by `n`.
    pub fn derivative(&self) -> Polynomial<T, R, DimDiff<C, U1>, Owned<T, R, DimDiff<C, U1>>> {
        let (rows, cols) = self.0.shape_generic();
        let cols = cols.sub(Const::<1>);
        let mut polynomial = Matrix::zeros_generic(rows, cols);

        for (i, b) in bernstein_polynomials::<T, _>(cols).row_iter().enumerate() {
            polynomial += (self.0.column(i + 1) - self.0.column(i)) * b;
        }
        polynomial *= from_usize::<T>(cols.value());

        Polynomial(polynomial)
    }

    /// Computes the curve's tangent vector at `t`
    ///
    /// *The resulting vector is not normalized!*
    pub fn tangent(&self, t: T) -> OVector<T, R> {
        self.derivative().evaluate(t)
    }
}

impl<T: RealField, C: Dim, S: Storage<T, U2, C>> BezierCurve<T, U2, C, S>
where
    C: DimSub<U1>,
    DefaultAllocator: Allocator<T, U2, C>,
    DefaultAllocator: Allocator<T, U2, DimDiff<C, U1>>,
    DefaultAllocator: Allocator<T, DimDiff<C, U1>, DimDiff<C, U1>>,
{
    /// Refines an approximation `t` of where the curve reaches the x coordinate `x`
    /// by running newton's method on `x(t) - x` a set number of iterations.
    ///
    /// `t` is kept inside `[0, 1]` and the iteration stops early on a flat tangent.
    pub fn refine_x(&self, x: T, mut t: T, iterations: usize) -> T {
        let derivative = self.derivative();
        for _ in 0..iterations {
            let slope = derivative.evaluate(t.clone()).x.clone();
            if slope.is_zero() {
                break;
            }
            let error = self.castlejau_eval(t.clone()).x.clone() - x.clone();
            t = (t - error / slope).max(T::zero()).min(T::one());
        }
        t
    }

    /// Finds the `t` at which the curve reaches the x coordinate `x` by bisecting `[0, 1]`.
    ///
    /// This assumes the curve's x coordinate to be ascending in `t`.
    /// Points left of the curve yield `0` and points right of it `1`.
    pub fn bisect_x(&self, x: T, iterations: usize) -> T {
        let two = T::one() + T::one();
        let mut lower = T::zero();
        let mut upper = T::one();
        for _ in 0..iterations {
            let middle = (lower.clone() + upper.clone()) / two.clone();
            if self.castlejau_eval(middle.clone()).x < x {
                lower = middle;
            } else {
                upper = middle;
            }
        }
        (lower + upper) / two
    }
}

/// Computes the bernstein polynomial basis for a given degree
///
/// Row `i` holds the coefficents of $b_{i,n}(t) = \binom{n}{i} t^i (1-t)^{n-i}$,
/// lowest power first, where `n + 1` is the number of columns.
pub fn bernstein_polynomials<T: RealField, C: Dim>(cols: C) -> OMatrix<T, C, C>
where
    DefaultAllocator: Allocator<T, C, C>,
{
    let mut polynomials = OMatrix::zeros_generic(cols, cols);
    let n = cols.value() - 1;

    // Expanding (1-t)^{n-i} gives the coefficent of t^j as
    // binom(n, i) * binom(n - i, j - i) * (-1)^(j - i)
    for i in 0..=n {
        let outer = binomial(n, i);
        for j in i..=n {
            let mut coefficent = from_usize::<T>(outer * binomial(n - i, j - i));
            if (j - i) % 2 == 1 {
                coefficent = -coefficent;
            }
            polynomials[(i, j)] = coefficent;
        }
    }

    polynomials
}

fn from_usize<T: RealField>(n: usize) -> T {
    let mut k = T::zero();
    for _ in 0..n {
        k += T::one();
    }
    k
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Matrix2x4, Matrix4};

    fn curve() -> OBezierCurve<f64, U2, Const<4>> {
        BezierCurve(Matrix2x4::new(0.0, 30.0, 70.0, 100.0, 0.0, 80.0, -20.0, 50.0))
    }

    #[test]
    fn cubic_bernstein_basis() {
        #[rustfmt::skip]
        let expected = Matrix4::new(
            1.0, -3.0,  3.0, -1.0,
            0.0,  3.0, -6.0,  3.0,
            0.0,  0.0,  3.0, -3.0,
            0.0,  0.0,  0.0,  1.0,
        );
        assert_eq!(bernstein_polynomials::<f64, _>(Const::<4>), expected);
    }

    #[test]
    fn polynomial_matches_castlejau() {
        let curve = curve();
        let polynomial = curve.polynomial();
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let difference = polynomial.evaluate(t) - curve.castlejau_eval(t);
            assert!(difference.norm() < 1e-9);
        }
    }

    #[test]
    fn inverts_x() {
        let curve = curve();
        let x = 42.0;
        let bisected = curve.bisect_x(x, 60);
        assert!((curve.castlejau_eval(bisected).x - x).abs() < 1e-9);

        let refined = curve.refine_x(x, 0.4, 20);
        assert!((curve.castlejau_eval(refined).x - x).abs() < 1e-9);
    }
}
