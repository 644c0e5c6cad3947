//! A wrapper around [`nalgebra::Matrix`] interpreting it as a polynomial.

use nalgebra::allocator::Allocator;
use nalgebra::dimension::{Dim, DimName, U1, U2, U3, U4};
use nalgebra::storage::{RawStorage, Storage, StorageMut};
use nalgebra::{DefaultAllocator, Dynamic, Field, Matrix, OVector, Owned, RealField, Scalar};
use smallvec::{smallvec, SmallVec};
use std::fmt;

/// Polynomial owning its coefficents.
pub type OPolynomial<T, R, C> = Polynomial<T, R, C, Owned<T, R, C>>;

/// Real roots of a polynomial up to degree 3, in no particular order
pub type Roots<T> = SmallVec<[T; 3]>;

/// Wrapper around [`nalgebra::Matrix`] interpreting it as a polynomial:
/// $p: \R \to \R^r $ where $r$ is the number of rows i.e. the generic `R` parameter
///
/// This means rows are the polynomials for each coordinate
/// and columns are the different powers' coefficents, lowest power first.
pub struct Polynomial<T, R, C, S>(pub Matrix<T, R, C, S>);

/// Relative size below which a leading coefficient is treated as zero.
///
/// The polynomial is then solved as one of the next lower degree.
pub const DEGENERACY_TOLERANCE: f64 = 1e-12;

/// Checks if two numbers are equal up to `epsilon`.
pub fn approximately<T: RealField>(a: T, b: T, epsilon: T) -> bool {
    (a - b).abs() < epsilon
}

/// Whether `leading` is negligible compared to the largest of `coefficients`
fn negligible<T: RealField>(leading: &T, coefficients: &[&T]) -> bool {
    let scale = coefficients
        .iter()
        .fold(leading.clone().abs(), |max, c| max.max((*c).clone().abs()));
    let tolerance: T = nalgebra::convert(DEGENERACY_TOLERANCE);
    leading.clone().abs() <= tolerance * scale
}

/* Eval */
impl<T: Scalar, R: DimName, C: Dim, S: Storage<T, R, C>> Polynomial<T, R, C, S> {
    /// Evaluate `self` at position `x` and store the result into `out`.
    pub fn evaluate_to<S2>(&self, x: T, out: &mut Matrix<T, R, U1, S2>)
    where
        T: Field,
        S2: StorageMut<T, R, U1>,
    {
        out.fill(T::zero());
        for i in 0..self.0.ncols() - 1 {
            let i = self.0.ncols() - 1 - i;
            *out += self.0.column(i);
            *out *= x.clone();
        }
        *out += self.0.column(0);
    }

    /// Evaluate `self` at position `x`.
    pub fn evaluate(&self, x: T) -> OVector<T, R>
    where
        T: Field,
        R: DimName,
        DefaultAllocator: Allocator<T, R>,
    {
        let mut out = OVector::from_element(T::zero());
        self.evaluate_to(x, &mut out);
        out
    }
}

/* Roots */
impl<T: Scalar, S: Storage<T, U1, U2>> Polynomial<T, U1, U2, S> {
    /// Calculate a linear polynomial's root.
    ///
    /// Constant polynomials have none (or infinitely many) and yield nothing.
    pub fn roots(&self) -> Roots<T>
    where
        T: RealField,
    {
        let t = &self.0[(0, 0)];
        let m = &self.0[(0, 1)];

        if m.is_zero() || negligible(m, &[t]) {
            smallvec![]
        } else {
            smallvec![(-t.clone()) / m.clone()]
        }
    }
}
impl<T: Scalar, S: Storage<T, U1, U3>> Polynomial<T, U1, U3, S> {
    /// Calculate a quadratic's roots.
    ///
    /// Falls back to the linear solution if the quadratic coefficient is negligible.
    pub fn roots(&self) -> Roots<T>
    where
        T: RealField,
    {
        let two = T::one() + T::one();
        let four = two.clone() + two.clone();

        let c = &self.0[(0, 0)];
        let b = &self.0[(0, 1)];
        let a = &self.0[(0, 2)];

        if negligible(a, &[b, c]) {
            return Polynomial(self.0.fixed_columns::<2>(0)).roots();
        }

        let b_squared = b.clone().powi(2);
        let d: T = b_squared.clone() - four * a.clone() * c.clone();
        let tolerance: T = nalgebra::convert(DEGENERACY_TOLERANCE);
        if approximately(d.clone(), T::zero(), tolerance * b_squared) {
            smallvec![(-b.clone()) / (two * a.clone())]
        } else if d.is_sign_negative() {
            SmallVec::new()
        } else {
            let p = -b.clone();
            let q = d.sqrt();
            let r = two * a.clone();
            smallvec![(p.clone() + q.clone()) / r.clone(), (p - q) / r]
        }
    }
}
impl<T: Scalar, S: Storage<T, U1, U4>> Polynomial<T, U1, U4, S> {
    /// Calculate a cubic's real roots using Cardano's formula.
    ///
    /// The cubic is normalized and depressed (`t = u - b/3`), then the discriminant decides between
    /// three distinct real roots (trigonometric solution), a double root or a single real root.
    /// Falls back to the quadratic solution if the cubic coefficient is negligible.
    pub fn roots(&self) -> Roots<T>
    where
        T: RealField,
    {
        let one = T::one();
        let two = one.clone() + one.clone();
        let three = two.clone() + one.clone();
        let nine = three.clone() * three.clone();
        let twenty_seven = nine.clone() * three.clone();

        let a = &self.0[(0, 3)];
        if negligible(a, &[&self.0[(0, 0)], &self.0[(0, 1)], &self.0[(0, 2)]]) {
            return Polynomial(self.0.fixed_columns::<3>(0)).roots();
        }

        // Normalize to t^3 + b t^2 + c t + d
        let b = self.0[(0, 2)].clone() / a.clone();
        let c = self.0[(0, 1)].clone() / a.clone();
        let d = self.0[(0, 0)].clone() / a.clone();

        let shift = b.clone() / three.clone();
        let p = (three.clone() * c.clone() - b.clone() * b.clone()) / three.clone();
        let p_third = p / three.clone();
        let q = (two.clone() * b.clone().powi(3) - nine * b * c + twenty_seven.clone() * d)
            / twenty_seven;
        let q_half = q.clone() / two.clone();
        let q_half_squared = q_half.clone() * q_half.clone();
        let p_third_cubed = p_third.clone().powi(3);
        let scale = q_half_squared.clone().abs() + p_third_cubed.clone().abs();
        let discriminant = q_half_squared + p_third_cubed;
        let tolerance: T = nalgebra::convert(DEGENERACY_TOLERANCE);

        if discriminant.clone().abs() <= tolerance * scale {
            // A double root next to a simple one, both equal for a triple root
            let u = (-q_half).cbrt();
            smallvec![two * u.clone() - shift.clone(), -u - shift]
        } else if discriminant.is_sign_negative() {
            // Three distinct real roots, p is negative here
            let minus_p_third = -p_third;
            let radius = minus_p_third.powi(3).sqrt();
            let cos_phi = (-q / (two.clone() * radius.clone()))
                .max(-one.clone())
                .min(one);
            let phi = cos_phi.acos();
            let amplitude = two.clone() * radius.cbrt();
            let tau = two.clone() * T::pi();

            smallvec![
                amplitude.clone() * (phi.clone() / three.clone()).cos() - shift.clone(),
                amplitude.clone() * ((phi.clone() + tau.clone()) / three.clone()).cos()
                    - shift.clone(),
                amplitude * ((phi + two * tau) / three).cos() - shift,
            ]
        } else {
            // One real root
            let root = discriminant.sqrt();
            let u = (root.clone() - q_half.clone()).cbrt();
            let v = (root + q_half).cbrt();
            smallvec![u - v - shift]
        }
    }
}
impl<T: Scalar, S: Storage<T, U1, Dynamic>> Polynomial<T, U1, Dynamic, S> {
    /// Calculate `self`'s roots.
    ///
    /// **If `self` is any polynomial other than a linear, quadratic or cubic one,
    /// this method will return no roots, since only those are supported yet.**
    pub fn roots(&self) -> Roots<T>
    where
        T: RealField,
    {
        match self.0.ncols() {
            2 => Polynomial(self.0.fixed_columns::<2>(0)).roots(),
            3 => Polynomial(self.0.fixed_columns::<3>(0)).roots(),
            4 => Polynomial(self.0.fixed_columns::<4>(0)).roots(),
            _ => SmallVec::new(),
        }
    }
}

/* Common traits */
impl<T: Scalar, R: Dim, R2: Dim, C: Dim, C2: Dim, S, S2> PartialEq<Polynomial<T, R2, C2, S2>>
    for Polynomial<T, R, C, S>
where
    S: RawStorage<T, R, C>,
    S2: RawStorage<T, R2, C2>,
{
    #[inline]
    fn eq(&self, rhs: &Polynomial<T, R2, C2, S2>) -> bool {
        self.0 == rhs.0
    }
}
impl<T, R, C, S: fmt::Debug> fmt::Debug for Polynomial<T, R, C, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        self.0.data.fmt(formatter)
    }
}

#[cfg(test)]
mod tests {
    use super::{Polynomial, Roots};
    use nalgebra::{RowDVector, RowVector3, RowVector4};

    fn sorted(roots: Roots<f64>) -> Vec<f64> {
        let mut roots = roots.into_vec();
        roots.sort_by(|x, y| x.partial_cmp(y).expect("A wild NaN appeared"));
        roots
    }

    fn assert_roots(actual: Roots<f64>, expected: &[f64]) {
        let actual = sorted(actual);
        assert_eq!(actual.len(), expected.len(), "{:?} vs {:?}", actual, expected);
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{:?} vs {:?}", actual, expected);
        }
    }

    #[test]
    fn evaluate() {
        // 1 + 2t + 3t^2
        let polynomial = Polynomial(RowVector3::new(1.0, 2.0, 3.0));
        assert_eq!(polynomial.evaluate(0.0)[0], 1.0);
        assert_eq!(polynomial.evaluate(2.0)[0], 17.0);
    }

    #[test]
    fn quadratic_roots() {
        // (t - 1)(t - 2)
        assert_roots(Polynomial(RowVector3::new(2.0, -3.0, 1.0)).roots(), &[1.0, 2.0]);
        // t^2 + 1
        assert_roots(Polynomial(RowVector3::new(1.0, 0.0, 1.0)).roots(), &[]);
        // Degenerates to 2t - 1
        assert_roots(Polynomial(RowVector3::new(-1.0, 2.0, 0.0)).roots(), &[0.5]);
    }

    #[test]
    fn cubic_three_real_roots() {
        // (t - 0.25)(t - 0.5)(t - 2) = t^3 - 2.75 t^2 + 1.625 t - 0.25
        assert_roots(
            Polynomial(RowVector4::new(-0.25, 1.625, -2.75, 1.0)).roots(),
            &[0.25, 0.5, 2.0],
        );
    }

    #[test]
    fn cubic_single_real_root() {
        // (t - 0.5)(t^2 + 1) = t^3 - 0.5 t^2 + t - 0.5
        assert_roots(
            Polynomial(RowVector4::new(-0.5, 1.0, -0.5, 1.0)).roots(),
            &[0.5],
        );
    }

    #[test]
    fn cubic_double_root() {
        // (t - 1)^2 (t - 0.5) = t^3 - 2.5 t^2 + 2 t - 0.5
        assert_roots(
            Polynomial(RowVector4::new(-0.5, 2.0, -2.5, 1.0)).roots(),
            &[0.5, 1.0],
        );
        // (t - 0.25)^2 (t - 1) = t^3 - 1.5 t^2 + 0.5625 t - 0.0625
        assert_roots(
            Polynomial(RowVector4::new(-0.0625, 0.5625, -1.5, 1.0)).roots(),
            &[0.25, 1.0],
        );
    }

    #[test]
    fn cubic_triple_root() {
        // (t - 0.5)^3
        let roots = Polynomial(RowVector4::new(-0.125, 0.75, -1.5, 1.0)).roots();
        assert!(!roots.is_empty());
        for t in roots {
            let t: f64 = t;
            assert!((t - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn degenerate_cubic() {
        // 3t - 1.5 written as a cubic
        assert_roots(
            Polynomial(RowVector4::new(-1.5, 3.0, 0.0, 0.0)).roots(),
            &[0.5],
        );
        assert_roots(
            Polynomial(RowDVector::from_row_slice(&[-1.5, 3.0, 0.0, 0.0])).roots(),
            &[0.5],
        );
    }
}
