use rand::Rng;
use serde::{Deserialize, Serialize};
use skyflap_engine::Action;

use crate::observation::{FEATURE_COUNT, Observation};

/// Width of the hidden layer of [`DecisionModel`].
pub const HIDDEN_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ModelShapeError {
    #[display("matrix of {rows}x{cols} does not hold {len} values")]
    ValueCount { rows: usize, cols: usize, len: usize },
    #[display("expected {expected_rows}x{expected_cols} {layer} weights, got {rows}x{cols}")]
    LayerShape {
        layer: &'static str,
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },
}

/// Row-major `f32` matrix with explicit dimensions.
///
/// Serialized as `{ "rows": .., "cols": .., "values": [..] }`; the value
/// count is checked on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    values: Vec<f32>,
}

#[derive(Deserialize)]
struct RawMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f32>,
}

impl TryFrom<RawMatrix> for Matrix {
    type Error = ModelShapeError;

    fn try_from(raw: RawMatrix) -> Result<Self, Self::Error> {
        Self::new(raw.rows, raw.cols, raw.values)
    }
}

impl Matrix {
    pub fn new(rows: usize, cols: usize, values: Vec<f32>) -> Result<Self, ModelShapeError> {
        if rows.checked_mul(cols) != Some(values.len()) {
            return Err(ModelShapeError::ValueCount {
                rows,
                cols,
                len: values.len(),
            });
        }
        Ok(Self { rows, cols, values })
    }

    /// Creates a matrix filled uniformly from `[-1, 1)`.
    pub fn random<R>(rows: usize, cols: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let values = (0..rows * cols)
            .map(|_| rng.random_range(-1.0..1.0))
            .collect();
        Self { rows, cols, values }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.values[row * self.cols + col]
    }

    fn row(&self, row: usize) -> &[f32] {
        &self.values[row * self.cols..(row + 1) * self.cols]
    }

    fn check_shape(
        &self,
        layer: &'static str,
        rows: usize,
        cols: usize,
    ) -> Result<(), ModelShapeError> {
        if (self.rows, self.cols) == (rows, cols) {
            return Ok(());
        }
        Err(ModelShapeError::LayerShape {
            layer,
            expected_rows: rows,
            expected_cols: cols,
            rows: self.rows,
            cols: self.cols,
        })
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(a, b)| a * b).sum()
}

/// Two-layer perceptron without biases: `3 → relu(10) → 1`.
///
/// The model flaps when its output is strictly positive.
///
/// # Example
///
/// ```
/// use rand::SeedableRng as _;
/// use skyflap_strategy::{DecisionModel, Observation};
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// let model = DecisionModel::random(&mut rng);
/// let obs = Observation::new(100.0, 30.0, 60.0);
/// assert_eq!(model.decide(&obs).is_flap(), model.output(&obs) > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawModel")]
pub struct DecisionModel {
    hidden_weights: Matrix,
    output_weights: Matrix,
}

#[derive(Deserialize)]
struct RawModel {
    hidden_weights: Matrix,
    output_weights: Matrix,
}

impl TryFrom<RawModel> for DecisionModel {
    type Error = ModelShapeError;

    fn try_from(raw: RawModel) -> Result<Self, Self::Error> {
        Self::new(raw.hidden_weights, raw.output_weights)
    }
}

impl DecisionModel {
    /// Builds a model from a `10 × 3` hidden and a `1 × 10` output matrix.
    pub fn new(hidden_weights: Matrix, output_weights: Matrix) -> Result<Self, ModelShapeError> {
        hidden_weights.check_shape("hidden", HIDDEN_SIZE, FEATURE_COUNT)?;
        output_weights.check_shape("output", 1, HIDDEN_SIZE)?;
        Ok(Self {
            hidden_weights,
            output_weights,
        })
    }

    /// Creates a model with every weight drawn uniformly from `[-1, 1)`.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self {
            hidden_weights: Matrix::random(HIDDEN_SIZE, FEATURE_COUNT, rng),
            output_weights: Matrix::random(1, HIDDEN_SIZE, rng),
        }
    }

    #[must_use]
    pub fn hidden_weights(&self) -> &Matrix {
        &self.hidden_weights
    }

    #[must_use]
    pub fn output_weights(&self) -> &Matrix {
        &self.output_weights
    }

    /// All weights, hidden layer first.
    pub fn weights(&self) -> impl Iterator<Item = f32> + '_ {
        self.hidden_weights
            .values
            .iter()
            .chain(&self.output_weights.values)
            .copied()
    }

    #[must_use]
    pub fn output(&self, obs: &Observation) -> f32 {
        let features = obs.features();
        let mut hidden = [0.0; HIDDEN_SIZE];
        for (i, h) in hidden.iter_mut().enumerate() {
            *h = dot(self.hidden_weights.row(i), &features).max(0.0);
        }
        dot(self.output_weights.row(0), &hidden)
    }

    #[must_use]
    pub fn decide(&self, obs: &Observation) -> Action {
        Action::from_flap(self.output(obs) > 0.0)
    }

    /// Perturbs each weight independently with the given probability.
    ///
    /// A selected weight `w` becomes `w ± u·factor·w` with `u` uniform in
    /// `[0, 1)` and the sign chosen by a fair coin. The change is relative to
    /// the weight itself, so a weight that is exactly zero stays zero forever.
    pub fn mutate<R>(&mut self, probability: f32, factor: f32, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let weights = self
            .hidden_weights
            .values
            .iter_mut()
            .chain(&mut self.output_weights.values);
        for w in weights {
            if rng.random::<f32>() < probability {
                let sign = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
                *w += sign * rng.random::<f32>() * factor * *w;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn model(seed: u64) -> DecisionModel {
        DecisionModel::random(&mut Pcg32::seed_from_u64(seed))
    }

    fn with_zeros(model: &DecisionModel) -> DecisionModel {
        let mut hidden = model.hidden_weights.values.clone();
        hidden[0] = 0.0;
        hidden[7] = 0.0;
        let mut output = model.output_weights.values.clone();
        output[3] = 0.0;
        DecisionModel::new(
            Matrix::new(HIDDEN_SIZE, FEATURE_COUNT, hidden).unwrap(),
            Matrix::new(1, HIDDEN_SIZE, output).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn random_weights_are_in_unit_range() {
        let model = model(1);
        assert_eq!(model.weights().count(), HIDDEN_SIZE * FEATURE_COUNT + HIDDEN_SIZE);
        assert!(model.weights().all(|w| (-1.0..1.0).contains(&w)));
    }

    #[test]
    fn output_is_relu_then_linear() {
        let hidden = Matrix::new(
            HIDDEN_SIZE,
            FEATURE_COUNT,
            (0..HIDDEN_SIZE * FEATURE_COUNT)
                .map(|i| if i % 3 == 0 { 1.0 } else { 0.0 })
                .collect(),
        )
        .unwrap();
        let output = Matrix::new(1, HIDDEN_SIZE, vec![1.0; HIDDEN_SIZE]).unwrap();
        let model = DecisionModel::new(hidden, output).unwrap();

        // every hidden unit copies dist_x
        assert_eq!(model.output(&Observation::new(2.0, 5.0, 7.0)), 20.0);
        assert!(model.decide(&Observation::new(2.0, 0.0, 0.0)).is_flap());
        // negative activations are clipped to zero, so the output is exactly zero
        assert_eq!(model.output(&Observation::new(-3.0, 5.0, 7.0)), 0.0);
        assert!(model.decide(&Observation::new(-3.0, 5.0, 7.0)).is_idle());
    }

    #[test]
    fn mutate_with_zero_probability_is_noop() {
        let mut rng = Pcg32::seed_from_u64(2);
        let original = model(2);
        let mut mutated = original.clone();
        for _ in 0..10 {
            mutated.mutate(0.0, 0.5, &mut rng);
        }
        assert_eq!(mutated, original);
    }

    #[test]
    fn mutate_with_full_probability_changes_every_nonzero_weight() {
        let mut rng = Pcg32::seed_from_u64(3);
        let original = model(3);
        let mut mutated = original.clone();
        mutated.mutate(1.0, 0.5, &mut rng);
        for (before, after) in original.weights().zip(mutated.weights()) {
            assert_ne!(before, after);
            // relative change is bounded by the factor
            assert!((after - before).abs() <= 0.5 * before.abs() + 1e-6);
        }
    }

    #[test]
    fn zero_weights_never_mutate() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut model = with_zeros(&model(4));
        for _ in 0..100 {
            model.mutate(1.0, 10.0, &mut rng);
        }
        assert_eq!(model.hidden_weights().get(0, 0), 0.0);
        assert_eq!(model.hidden_weights().get(2, 1), 0.0);
        assert_eq!(model.output_weights().get(0, 3), 0.0);
    }

    #[test]
    fn serializes_matrices_with_dimensions() {
        let model = model(5);
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["hidden_weights"]["rows"], 10);
        assert_eq!(json["hidden_weights"]["cols"], 3);
        assert_eq!(json["output_weights"]["values"].as_array().unwrap().len(), 10);

        let back: DecisionModel = serde_json::from_value(json).unwrap();
        assert_eq!(back, model);
    }

    #[test]
    fn rejects_mismatched_shapes() {
        let json = serde_json::json!({
            "hidden_weights": { "rows": 10, "cols": 3, "values": [0.0] },
            "output_weights": { "rows": 1, "cols": 10, "values": vec![0.0; 10] },
        });
        assert!(serde_json::from_value::<DecisionModel>(json).is_err());

        let err = DecisionModel::new(
            Matrix::new(3, 10, vec![0.0; 30]).unwrap(),
            Matrix::new(1, 10, vec![0.0; 10]).unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, ModelShapeError::LayerShape { layer: "hidden", .. }));
    }

    #[test]
    fn overflowing_dimensions_are_a_shape_error() {
        let huge = 1_usize << (usize::BITS / 2);
        let err = Matrix::new(huge, huge, Vec::new()).unwrap_err();
        assert!(matches!(err, ModelShapeError::ValueCount { len: 0, .. }));
        assert!(err.to_string().contains("does not hold 0 values"));

        let json = serde_json::json!({
            "hidden_weights": { "rows": huge, "cols": huge, "values": [] },
            "output_weights": { "rows": 1, "cols": 10, "values": vec![0.0; 10] },
        });
        assert!(serde_json::from_value::<DecisionModel>(json).is_err());
    }
}
