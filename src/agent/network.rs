//! Feed-forward policy network used as a game agent
//!
//! # Architecture
//!
//! ```text
//! Input: [batch, 11]   (8 sensors + 3 food flags)
//!   ↓ Linear(11 → hidden) + tanh
//!   ↓ Linear(hidden → 3) + tanh
//! Output: [batch, 3]   (left, right, straight scores)
//! ```

use burn::{
    module::Module,
    nn::{Linear, LinearConfig},
    tensor::{Tensor, TensorData, backend::Backend},
};
use serde::{Deserialize, Serialize};

use super::{Agent, encoder::SENSOR_VECTOR_LEN};
use crate::game::COMMAND_COUNT;

/// Layer sizes of a [`PolicyNetwork`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Number of inputs (default: 11)
    pub inputs: usize,
    /// Width of the hidden layer (default: 8)
    pub hidden: usize,
    /// Number of scores produced (default: 3)
    pub outputs: usize,
}

impl PolicyConfig {
    pub fn new(hidden: usize) -> Self {
        Self {
            inputs: SENSOR_VECTOR_LEN,
            hidden,
            outputs: COMMAND_COUNT,
        }
    }

    /// Build a network with freshly initialised weights
    pub fn init<B: Backend>(&self, device: &B::Device) -> PolicyNetwork<B> {
        PolicyNetwork {
            hidden: LinearConfig::new(self.inputs, self.hidden).init(device),
            output: LinearConfig::new(self.hidden, self.outputs).init(device),
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::new(8)
    }
}

/// Two-layer perceptron mapping the sensor vector to command scores
#[derive(Module, Debug)]
pub struct PolicyNetwork<B: Backend> {
    hidden: Linear<B>,
    output: Linear<B>,
}

impl<B: Backend> PolicyNetwork<B> {
    /// Forward pass over a batch of sensor vectors `[batch, inputs]`
    pub fn forward(&self, inputs: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.hidden.forward(inputs).tanh();
        self.output.forward(x).tanh()
    }

    /// Number of inputs the first layer accepts
    pub fn input_len(&self) -> usize {
        self.hidden.weight.dims()[0]
    }
}

impl<B: Backend> Agent for PolicyNetwork<B> {
    /// Returns an empty vector when `inputs` has the wrong length, which the
    /// caller reports as a malformed output.
    fn evaluate(&self, inputs: &[f32]) -> Vec<f32> {
        if inputs.len() != self.input_len() {
            return Vec::new();
        }

        let device = self.hidden.weight.device();
        let data = TensorData::new(inputs.to_vec(), [1, inputs.len()]);
        let batch = Tensor::<B, 2>::from_data(data, &device);

        self.forward(batch)
            .into_data()
            .to_vec::<f32>()
            .unwrap_or_default()
    }
}
