/// The order of the Fourier series used to compute the auxiliary latitudes
/// and the transverse Mercator corrections: third order in the third
/// flattening, which keeps truncation below the nanodegree for Earth-like
/// flattenings.
pub const POLYNOMIAL_ORDER: usize = 3;

/// Two upper triangular matrices of polynomium coefficients for computing
/// the Fourier coefficients for (a.o.) the auxiliary latitudes
#[derive(Clone, Copy, Debug, Default)]
pub struct PolynomialCoefficients {
    pub fwd: [[f64; POLYNOMIAL_ORDER]; POLYNOMIAL_ORDER],
    pub inv: [[f64; POLYNOMIAL_ORDER]; POLYNOMIAL_ORDER],
}

/// The Fourier coefficients used when computing e.g. auxiliary latitudes
#[derive(Clone, Copy, Debug, Default)]
pub struct FourierCoefficients {
    pub fwd: [f64; POLYNOMIAL_ORDER],
    pub inv: [f64; POLYNOMIAL_ORDER],
}

// --- Taylor series polynomium evaluation ----

pub mod taylor {
    use super::FourierCoefficients;
    use super::PolynomialCoefficients;
    use super::POLYNOMIAL_ORDER;

    /// Compute Fourier coefficients by evaluating their corresponding
    /// Taylor polynomiums
    pub fn fourier_coefficients(
        arg: f64,
        coefficients: &PolynomialCoefficients,
    ) -> FourierCoefficients {
        let mut result = FourierCoefficients::default();
        for i in 0..POLYNOMIAL_ORDER {
            result.fwd[i] = arg * horner(arg, &coefficients.fwd[i]);
            result.inv[i] = arg * horner(arg, &coefficients.inv[i]);
        }
        result
    }

    /// Evaluate Σ cᵢ · xⁱ using Horner's scheme
    pub fn horner(arg: f64, coefficients: &[f64]) -> f64 {
        if coefficients.is_empty() {
            return 0.;
        }
        let mut coefficients = coefficients.iter().rev();
        let mut value = *(coefficients.next().unwrap());
        for c in coefficients {
            value = value.mul_add(arg, *c);
        }
        value
    }
}

// --- Fourier series summation using Clenshaw's recurrence ---

pub mod fourier {

    /// Evaluate Σ cᵢ sin( i · arg ), for i ∈ {order, ... , 1}, using Clenshaw summation
    pub fn sin(arg: f64, coefficients: &[f64]) -> f64 {
        let (sin_arg, cos_arg) = arg.sin_cos();
        let x = 2.0 * cos_arg;
        let mut c0 = 0.0;
        let mut c1 = 0.0;

        for c in coefficients.iter().rev() {
            (c1, c0) = (c0, x.mul_add(c0, c - c1));
        }
        sin_arg * c0
    }

    /// Evaluate Σ cᵢ Sin( i · arg ), for i ∈ {order, ... , 1}, using Clenshaw
    /// summation, i.e. a series of complex sines with real coefficients.
    /// `arg` is the complex angle as `[real, imaginary]`, and so is the
    /// returned sum.
    #[allow(unused_assignments)] // For symmetric initialization of hr2, hi2
    pub fn complex_sin(arg: [f64; 2], coefficients: &[f64]) -> [f64; 2] {
        // Prepare the trigonometric factors
        let (sin_r, cos_r) = arg[0].sin_cos();
        let sinh_i = arg[1].sinh();
        let cosh_i = arg[1].cosh();
        let r = 2. * cos_r * cosh_i;
        let i = -2. * sin_r * sinh_i;
        let mut coefficients = coefficients.iter().rev();

        // Handle zero length series by conventionally assigning them the sum of 0
        let Some(c) = coefficients.next() else {
            return [0.; 2];
        };

        // Initialize the recurrence coefficients
        let (mut hr2, mut hr1, mut hr) = (0., 0., *c);
        let (mut hi2, mut hi1, mut hi) = (0., 0., 0.);

        for c in coefficients {
            // Rotate the recurrence coefficients
            (hr2, hi2, hr1, hi1) = (hr1, hi1, hr, hi);

            // Update the recurrent sum
            hr = -hr2 + r * hr1 - i * hi1 + c;
            hi = -hi2 + i * hr1 + r * hi1;
        }

        // Finalize the sum
        let r = sin_r * cosh_i;
        let i = cos_r * sinh_i;
        [r * hr - i * hi, r * hi + i * hr]
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::taylor::*;
    use super::*;

    #[test]
    fn test_horner() {
        // Coefficients for 3x² + 2x + 1
        let coefficients = [1_f64, 2., 3.];
        assert_eq!(horner(1., &coefficients), 6.);
        assert_eq!(horner(2., &coefficients), 17.);
        assert_eq!(horner(-2., &coefficients), 9.);

        assert_eq!(horner(-2., &[1_f64]), 1.);
        assert_eq!(horner(-2., &[3_f64]), 3.);

        assert_eq!(horner(-2., &[]), 0.);
    }

    #[test]
    fn test_clenshaw() {
        // Coefficients for 1sin(x) + 2sin(2x) + 3sin(3x)
        let coefficients = [1., 2., 3.];
        assert_eq!(fourier::sin(0., &[]), 0.);
        assert_eq!(fourier::sin(1., &[]), 0.);

        let x = 30_f64.to_radians();
        let result = 1.0 * x.sin() + 2.0 * (2.0 * x).sin() + 3.0 * (3.0 * x).sin();
        assert!((fourier::sin(x, &coefficients) - result).abs() < 1e-14);

        // The complex sum against its brute force evaluation: with
        // z = x + iy, Σ cⱼ sin(jz) splits into sin·cosh and cos·sinh parts
        let arg = [30f64.to_radians(), 0.25];
        let mut brute = [0., 0.];
        for (j, c) in coefficients.iter().enumerate() {
            let jj = (j + 1) as f64;
            brute[0] += c * (jj * arg[0]).sin() * (jj * arg[1]).cosh();
            brute[1] += c * (jj * arg[0]).cos() * (jj * arg[1]).sinh();
        }
        let sum = fourier::complex_sin(arg, &coefficients);
        assert!((sum[0] - brute[0]).abs() < 1e-14);
        assert!((sum[1] - brute[1]).abs() < 1e-14);
    }

    #[test]
    fn test_fourier_coefficients() {
        #[rustfmt::skip]
        let p = PolynomialCoefficients {
            fwd: [
                [1. / 2., -2. / 3.,   5. / 16.],
                [0.,      13. / 48., -3. / 5.],
                [0.,      0.,        61. / 240.],
            ],
            inv: [
                [-1. / 2., 2. / 3.,   -37. / 96.],
                [0.,      -1. / 48.,  -1. / 15.],
                [0.,       0.,       -17. / 480.],
            ],
        };
        let n = 0.0016792203946287445; // third flattening of GRS80
        let c = fourier_coefficients(n, &p);
        assert!((c.fwd[0] - (n / 2. - 2. * n * n / 3. + 5. * n * n * n / 16.)).abs() < 1e-18);
        assert!((c.inv[2] - (-17. * n * n * n / 480.)).abs() < 1e-18);
    }
}
