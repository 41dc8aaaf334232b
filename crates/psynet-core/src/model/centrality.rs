use std::ops::Index;

/// One non-negative centrality value per node.
///
/// Values are unnormalized counts or expectations and are only comparable
/// within a single computation on a single graph.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CentralityVector {
    values: Vec<f64>,
}

impl CentralityVector {
    /// Wrap raw values, clamping tiny negative round-off to zero.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|v| if v.is_finite() { v.max(0.0) } else { 0.0 })
                .collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn get(&self, node: usize) -> Option<f64> {
        self.values.get(node).copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Min-max normalization to `[0, 1]`.
    ///
    /// If all values are equal (including a single node), all outputs are
    /// `0.0`.
    #[must_use]
    pub fn normalized(&self) -> Self {
        if self.values.is_empty() {
            return Self::default();
        }

        let min = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;

        if !range.is_finite() || range.abs() <= f64::EPSILON {
            return Self {
                values: vec![0.0; self.values.len()],
            };
        }

        Self {
            values: self
                .values
                .iter()
                .map(|&v| ((v - min) / range).clamp(0.0, 1.0))
                .collect(),
        }
    }
}

impl Index<usize> for CentralityVector {
    type Output = f64;

    fn index(&self, node: usize) -> &f64 {
        &self.values[node]
    }
}

impl From<Vec<f64>> for CentralityVector {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}
