use rand::Rng;
use tracing::{debug, warn};

use crate::activation::Activation;
use crate::error::Result;
use crate::math::{init, matrix::Matrix};
use crate::network::backward::backward;
use crate::network::config::NetworkConfig;
use crate::network::forward::forward;

/// A three-layer perceptron: input → hidden → output.
///
/// `wih` has shape `hidden × input` and `who` has shape `output × hidden`.
/// Both shapes are fixed at construction; `train` only changes values.
///
/// `query` borrows immutably and `train` mutably, so any number of queries
/// may share a network while no training is running. Sharing across threads
/// while training needs an external lock.
#[derive(Debug, Clone)]
pub struct Network {
    learning_rate: f64,
    activation: Activation,
    wih: Matrix,
    who: Matrix,
}

/// Read-only copy of a network's weights at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSnapshot {
    pub input_nodes: usize,
    pub hidden_nodes: usize,
    pub output_nodes: usize,
    pub wih: Matrix,
    pub who: Matrix,
}

impl Network {
    /// Validates `config`, resolves its activation and draws both weight
    /// matrices from `rng`.
    pub fn new<R: Rng + ?Sized>(config: &NetworkConfig, rng: &mut R) -> Result<Network> {
        config.validate()?;
        let activation = Activation::resolve(&config.activation, config.activation_param)?;
        if !activation.kind().takes_param() && config.activation_param != 0.0 {
            warn!(
                activation = %activation.kind(),
                param = config.activation_param,
                "activation ignores its parameter"
            );
        }

        let wih = init::init(config.hidden_nodes, config.input_nodes, rng)?;
        let who = init::init(config.output_nodes, config.hidden_nodes, rng)?;

        debug!(
            input = config.input_nodes,
            hidden = config.hidden_nodes,
            output = config.output_nodes,
            lr = config.learning_rate,
            activation = %activation.kind(),
            "network initialized"
        );

        Ok(Network {
            learning_rate: config.learning_rate,
            activation,
            wih,
            who,
        })
    }

    /// One stochastic gradient step on a single sample.
    pub fn train(&mut self, inputs: &[f64], targets: &[f64]) -> Result<()> {
        backward(
            &mut self.wih,
            &mut self.who,
            &self.activation,
            self.learning_rate,
            inputs,
            targets,
        )
    }

    /// Forward pass only; the weights are not touched.
    pub fn query(&self, inputs: &[f64]) -> Result<Vec<f64>> {
        let step = forward(&self.wih, &self.who, &self.activation, inputs)?;
        Ok(step.final_out.into_column_vec())
    }

    pub fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            input_nodes: self.input_nodes(),
            hidden_nodes: self.hidden_nodes(),
            output_nodes: self.output_nodes(),
            wih: self.wih.clone(),
            who: self.who.clone(),
        }
    }

    pub fn input_nodes(&self) -> usize {
        self.wih.cols
    }

    pub fn hidden_nodes(&self) -> usize {
        self.wih.rows
    }

    pub fn output_nodes(&self) -> usize {
        self.who.rows
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn activation(&self) -> &Activation {
        &self.activation
    }

    pub fn wih(&self) -> &Matrix {
        &self.wih
    }

    pub fn who(&self) -> &Matrix {
        &self.who
    }
}
