use crate::stencil::*;

/// Five-point discrete Laplacian on a uniform grid,
/// `up + down + left + right - 4 * middle`.
/// Offsets are (row, column).
pub fn laplace_2d() -> Stencil<5> {
    Stencil::new(
        [[0, 0], [-1, 0], [1, 0], [0, -1], [0, 1]],
        |args: &[f64; 5]| {
            let middle = args[0];
            let up = args[1];
            let down = args[2];
            let left = args[3];
            let right = args[4];
            up + down + left + right - 4.0 * middle
        },
    )
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn laplace_weights() {
        let s = laplace_2d();
        assert_approx_eq!(f64, s.center_weight(), -4.0);
        assert_approx_eq!(f64, s.weights().sum(), 0.0);
        for (o, w) in s.neighbors().skip(1) {
            assert_eq!(o.abs().sum(), 1);
            assert_approx_eq!(f64, w, 1.0);
        }
    }
}
