use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;

use crate::float::Float;

pub fn new_real_buffer<T: Float>(size: usize) -> Vec<T> {
    vec![T::zero(); size]
}

pub fn new_complex_buffer<T: Float>(size: usize) -> Vec<Complex<T>> {
    vec![Complex::zero(); size]
}

/// Copy `input` into the real part of `output`, zeroing the imaginary part
/// and any tail of `output` past `input`.
pub fn copy_real_to_complex<T: Float>(input: &[T], output: &mut [Complex<T>]) {
    assert!(input.len() <= output.len());
    input.iter().zip(output.iter_mut()).for_each(|(i, o)| {
        o.re = *i;
        o.im = T::zero();
    });
    output[input.len()..]
        .iter_mut()
        .for_each(|o| *o = Complex::zero())
}

/// Write |x| of each complex value of `input` to `output`. Only the first
/// `output.len()` values of `input` are read.
pub fn modulus<T: Float>(input: &[Complex<T>], output: &mut [T]) {
    assert!(output.len() <= input.len());
    output
        .iter_mut()
        .zip(input)
        .for_each(|(o, c)| *o = (c.re * c.re + c.im * c.im).sqrt());
}

/// True when every value of `arr` is exactly zero.
pub fn is_silent<T: Float>(arr: &[T]) -> bool {
    arr.iter().all(|v| v.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_pads_with_zeros() {
        let mut output = vec![Complex::new(9.0f64, 9.0); 4];
        copy_real_to_complex(&[1., 2.], &mut output);
        assert_eq!(
            output,
            vec![
                Complex::new(1., 0.),
                Complex::new(2., 0.),
                Complex::zero(),
                Complex::zero()
            ]
        );
    }

    #[test]
    fn modulus_of_prefix() {
        let input = vec![Complex::new(3.0f64, 4.0), Complex::new(0., -2.), Complex::new(7., 7.)];
        let mut output = new_real_buffer(2);
        modulus(&input, &mut output);
        assert_eq!(output, vec![5., 2.]);
    }

    #[test]
    fn silence() {
        assert!(is_silent::<f64>(&[]));
        assert!(is_silent(&[0.0f32, -0.0, 0.0]));
        assert!(!is_silent(&[0.0f64, 1e-300]));
    }
}
