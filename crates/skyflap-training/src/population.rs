use rand::Rng;
use skyflap_strategy::DecisionModel;

/// One decision model per concurrently simulated actor.
///
/// Slot `i` of the population drives actor `i` of an episode. The size never
/// changes across generations.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    models: Vec<DecisionModel>,
}

impl Population {
    /// Creates `size` models with weights drawn uniformly from `[-1, 1)`.
    pub fn random<R>(size: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let models = (0..size).map(|_| DecisionModel::random(rng)).collect();
        Self { models }
    }

    #[must_use]
    pub fn from_models(models: Vec<DecisionModel>) -> Self {
        Self { models }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    #[must_use]
    pub fn models(&self) -> &[DecisionModel] {
        &self.models
    }

    #[must_use]
    pub fn model(&self, index: usize) -> &DecisionModel {
        &self.models[index]
    }

    /// Builds the next generation of the same size.
    ///
    /// Each slot copies the model of a parent picked uniformly from
    /// `parents` (population indices) and mutates the copy.
    ///
    /// # Panics
    ///
    /// Panics if `parents` is empty or names a slot outside the population.
    #[must_use]
    pub fn breed<R>(
        &self,
        parents: &[usize],
        mutation_probability: f32,
        mutation_factor: f32,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + ?Sized,
    {
        assert!(!parents.is_empty(), "parent pool must not be empty");
        let models = (0..self.models.len())
            .map(|_| {
                let parent = parents[rng.random_range(0..parents.len())];
                let mut child = self.models[parent].clone();
                child.mutate(mutation_probability, mutation_factor, rng);
                child
            })
            .collect();
        Self { models }
    }
}
