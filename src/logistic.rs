//! Logistic regression trained by fixed-count batch gradient ascent.
//!
//! The update is `w <- w + step_size * X^T (y - sigmoid(X w))`. With the
//! default step size of 1.0 the gradient is applied unscaled, which diverges
//! on large or badly scaled features; the iteration count is the only
//! stopping rule.

use log::{debug, info};
use ndarray::{array, Array1, Array2};

use crate::error::{Error, Result};

pub const DEFAULT_ITERATIONS: usize = 1000;
pub const DEFAULT_STEP_SIZE: f64 = 1.0;

pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Element-wise [`sigmoid`].
pub fn sigmoid_vec(z: &Array1<f64>) -> Array1<f64> {
    z.mapv(sigmoid)
}

/// `e^z / (1 + e^z)`, the form used when scoring held-out rows.
pub fn probability(z: f64) -> f64 {
    z.exp() / (1.0 + z.exp())
}

#[derive(Debug, Clone)]
pub struct LogisticRegression {
    weights: Array1<f64>,
    iterations: usize,
    step_size: f64,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LogisticRegression {
    /// Intercept and one coefficient, both starting at 1.
    pub fn new() -> Self {
        Self {
            weights: array![1.0, 1.0],
            iterations: DEFAULT_ITERATIONS,
            step_size: DEFAULT_STEP_SIZE,
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_step_size(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }

    pub fn with_weights(mut self, weights: Array1<f64>) -> Self {
        self.weights = weights;
        self
    }

    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    fn check_shape(&self, x: &Array2<f64>) -> Result<()> {
        if x.ncols() != self.weights.len() {
            return Err(Error::ShapeMismatch {
                expected: format!("{} columns", self.weights.len()),
                actual: format!("{} columns", x.ncols()),
            });
        }
        Ok(())
    }

    /// Runs exactly `iterations` gradient-ascent updates on the weights.
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self> {
        if x.nrows() != y.len() {
            return Err(Error::ShapeMismatch {
                expected: format!("y length = {}", x.nrows()),
                actual: format!("y length = {}", y.len()),
            });
        }
        self.check_shape(x)?;

        info!(
            "Fitting logistic regression on {} rows for {} iterations",
            x.nrows(),
            self.iterations
        );

        for iter in 0..self.iterations {
            let probabilities = sigmoid_vec(&x.dot(&self.weights));
            let error = y - &probabilities;
            let gradient = x.t().dot(&error);
            self.weights.scaled_add(self.step_size, &gradient);

            if iter % 100 == 0 {
                debug!("iteration {}: weights = {}", iter, self.weights);
            }
        }

        info!("Trained weights: {}", self.weights);
        Ok(self)
    }

    /// The linear score `X w` for each row.
    pub fn predict_linear(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        self.check_shape(x)?;
        Ok(x.dot(&self.weights))
    }

    pub fn predict_probability(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        Ok(self.predict_linear(x)?.mapv(probability))
    }

    /// Rounded probabilities; a probability of exactly 0.5 becomes 1.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        Ok(self.predict_probability(x)?.mapv(f64::round))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn separable() -> (Array2<f64>, Array1<f64>) {
        let x = Array2::from_shape_vec((4, 2), vec![1.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0])
            .unwrap();
        let y = array![0.0, 0.0, 1.0, 1.0];
        (x, y)
    }

    #[test]
    fn test_sigmoid() {
        assert_eq!(sigmoid(0.0), 0.5);
        let mut previous = sigmoid(-10.0);
        for i in -99..=100 {
            let current = sigmoid(i as f64 / 10.0);
            assert!(current > previous);
            previous = current;
        }
    }

    #[test]
    fn test_probability_matches_sigmoid() {
        for z in [-8.0, -1.5, 0.0, 0.25, 3.0, 12.0] {
            assert_relative_eq!(probability(z), sigmoid(z), epsilon = 1e-12);
        }
        let z = array![-2.0, 0.0, 2.0];
        assert_eq!(sigmoid_vec(&z)[1], 0.5);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (x, y) = separable();
        let mut first = LogisticRegression::new();
        first.fit(&x, &y).unwrap();
        let mut second = LogisticRegression::new();
        second.fit(&x, &y).unwrap();

        assert_eq!(first.weights(), second.weights());
        // the intercept is pushed negative, the coefficient positive
        assert!(first.weights()[0] < 0.0);
        assert!(first.weights()[1] > 0.0);
    }

    #[test]
    fn test_fit_separates_classes() {
        let (x, y) = separable();
        let mut model = LogisticRegression::new();
        model.fit(&x, &y).unwrap();
        assert_eq!(model.predict(&x).unwrap(), y);
    }

    #[test]
    fn test_single_iteration_update() {
        // from w = [1, 1]: p = [s(1), s(1), s(2), s(2)]
        let (x, y) = separable();
        let mut model = LogisticRegression::new().with_iterations(1);
        model.fit(&x, &y).unwrap();

        let (p1, p2) = (sigmoid(1.0), sigmoid(2.0));
        let expected_bias = 1.0 + (0.0 - p1) * 2.0 + (1.0 - p2) * 2.0;
        let expected_coef = 1.0 + (1.0 - p2) * 2.0;
        assert_relative_eq!(model.weights()[0], expected_bias, epsilon = 1e-12);
        assert_relative_eq!(model.weights()[1], expected_coef, epsilon = 1e-12);
    }

    #[test]
    fn test_step_size_scales_update() {
        let (x, y) = separable();
        let mut full = LogisticRegression::new().with_iterations(1);
        full.fit(&x, &y).unwrap();
        let mut half = LogisticRegression::new()
            .with_iterations(1)
            .with_step_size(0.5);
        half.fit(&x, &y).unwrap();

        for i in 0..2 {
            assert_relative_eq!(
                half.weights()[i] - 1.0,
                (full.weights()[i] - 1.0) / 2.0,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_zero_iterations_keeps_initial_weights() {
        let (x, y) = separable();
        let mut model = LogisticRegression::new().with_iterations(0);
        model.fit(&x, &y).unwrap();
        assert_eq!(model.weights(), &array![1.0, 1.0]);
    }

    #[test]
    fn test_half_probability_rounds_up() {
        let model = LogisticRegression::new().with_weights(array![0.0, 0.0]);
        let x = Array2::from_shape_vec((1, 2), vec![1.0, 5.0]).unwrap();
        assert_eq!(model.predict_probability(&x).unwrap()[0], 0.5);
        assert_eq!(model.predict(&x).unwrap()[0], 1.0);
    }

    #[test]
    fn test_shape_errors() {
        let (x, _) = separable();
        let mut model = LogisticRegression::new();
        assert!(matches!(
            model.fit(&x, &array![0.0, 1.0]),
            Err(Error::ShapeMismatch { .. })
        ));

        let wide = Array2::<f64>::zeros((2, 3));
        assert!(model.predict_linear(&wide).is_err());
    }
}
