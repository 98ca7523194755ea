use std::iter;

use crate::game::Turn;

/// Number of sensor inputs fed to the controller network.
///
/// See [`SnakeGame::sense`](crate::game::SnakeGame::sense) for the exact
/// layout.
pub const NET_INPUTS: usize = 11;

/// Number of hidden-layer neurons.
pub const NET_HIDDEN: usize = 16;

/// Number of output neurons, one per relative turn.
pub const NET_OUTPUTS: usize = 3;

/// Length of a flattened gene vector for the fixed `[11, 16, 3]` topology.
///
/// Layout, in gene order: hidden weights (row per hidden neuron), hidden
/// biases, output weights (row per output neuron), output biases.
pub const GENES_LEN: usize =
    NET_INPUTS * NET_HIDDEN + NET_HIDDEN + NET_HIDDEN * NET_OUTPUTS + NET_OUTPUTS;

/// Fixed-topology feed-forward network decoding a gene vector into turns.
///
/// The hidden layer uses ReLU activation; the output layer is linear and the
/// highest-scoring output wins (earliest index on ties).
#[derive(Debug, Clone)]
pub struct FeedForwardNet {
    hidden_weights: Vec<f32>,
    hidden_biases: Vec<f32>,
    output_weights: Vec<f32>,
    output_biases: Vec<f32>,
}

impl FeedForwardNet {
    /// Builds a network from a flattened gene vector.
    ///
    /// # Panics
    ///
    /// Panics if `genes` does not hold exactly [`GENES_LEN`] values; passing
    /// a vector of any other length is a caller bug.
    #[must_use]
    pub fn from_genes(genes: &[f32]) -> Self {
        assert_eq!(
            genes.len(),
            GENES_LEN,
            "gene vector must hold exactly {GENES_LEN} values"
        );
        let (hidden_weights, rest) = genes.split_at(NET_INPUTS * NET_HIDDEN);
        let (hidden_biases, rest) = rest.split_at(NET_HIDDEN);
        let (output_weights, output_biases) = rest.split_at(NET_HIDDEN * NET_OUTPUTS);
        Self {
            hidden_weights: hidden_weights.to_vec(),
            hidden_biases: hidden_biases.to_vec(),
            output_weights: output_weights.to_vec(),
            output_biases: output_biases.to_vec(),
        }
    }

    /// Runs the forward pass and returns the chosen turn.
    #[must_use]
    pub fn decide(&self, inputs: &[f32; NET_INPUTS]) -> Turn {
        let hidden: Vec<f32> = self
            .hidden_weights
            .chunks_exact(NET_INPUTS)
            .zip(&self.hidden_biases)
            .map(|(row, bias)| {
                let sum: f32 = iter::zip(row, inputs).map(|(w, x)| w * x).sum();
                (sum + bias).max(0.0)
            })
            .collect();

        let outputs: Vec<f32> = self
            .output_weights
            .chunks_exact(NET_HIDDEN)
            .zip(&self.output_biases)
            .map(|(row, bias)| {
                let sum: f32 = iter::zip(row, &hidden).map(|(w, h)| w * h).sum();
                sum + bias
            })
            .collect();

        let mut choice = 0;
        for (i, value) in outputs.iter().enumerate() {
            if *value > outputs[choice] {
                choice = i;
            }
        }
        match choice {
            0 => Turn::Left,
            1 => Turn::Straight,
            _ => Turn::Right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genes_len_matches_topology() {
        // 11 * 16 + 16 + 16 * 3 + 3
        assert_eq!(GENES_LEN, 243);
    }

    #[test]
    fn test_all_zero_genes_pick_first_output() {
        let net = FeedForwardNet::from_genes(&[0.0; GENES_LEN]);
        assert_eq!(net.decide(&[0.0; NET_INPUTS]), Turn::Left);
    }

    #[test]
    fn test_output_bias_steers_decision() {
        let straight_bias = GENES_LEN - NET_OUTPUTS + 1;
        let mut genes = vec![0.0; GENES_LEN];
        genes[straight_bias] = 1.0;
        let net = FeedForwardNet::from_genes(&genes);
        assert_eq!(net.decide(&[0.0; NET_INPUTS]), Turn::Straight);

        let mut genes = vec![0.0; GENES_LEN];
        genes[straight_bias + 1] = 1.0;
        let net = FeedForwardNet::from_genes(&genes);
        assert_eq!(net.decide(&[0.0; NET_INPUTS]), Turn::Right);
    }

    #[test]
    #[should_panic(expected = "gene vector must hold exactly")]
    fn test_wrong_length_panics() {
        let _ = FeedForwardNet::from_genes(&[0.0; 10]);
    }
}
