use super::{check_training_shapes, parse_param, IModel};
use crate::error::{FlareError, Result};
use ndarray::{Array, Array1, Array2, ArrayView2, Axis, Dimension, Zip};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

const BETA1: f64 = 0.9;
const BETA2: f64 = 0.999;
const ADAM_EPSILON: f64 = 1e-8;

/// Viacvrstvový perceptrón s jednou skrytou ReLU vrstvou.
///
/// Trénuje sa celým batchom cez Adam na strednej kvadratickej chybe
/// (polovičnej, ako pri bežných knižniciach). Váhy sa inicializujú rovnomerne
/// v rozsahu Xavier/Glorot zo seedovaného generátora, takže tréning je reprodukovateľný.
pub struct MlpWrapper {
    network: Option<Network>,
    hidden_units: usize,
    learning_rate: f64,
    epochs: usize,
    seed: u64,
    last_loss: Option<f64>,
}

#[derive(Debug, Clone)]
struct Network {
    w1: Array2<f64>,
    b1: Array1<f64>,
    w2: Array2<f64>,
    b2: Array1<f64>,
}

struct Forward {
    hidden_pre: Array2<f64>,
    hidden: Array2<f64>,
    output: Array2<f64>,
}

impl Network {
    fn init(inputs: usize, hidden: usize, outputs: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let w1 = glorot(&mut rng, inputs, hidden);
        let b1 = Array1::from_shape_fn(hidden, |_| uniform(&mut rng, inputs, hidden));
        let w2 = glorot(&mut rng, hidden, outputs);
        let b2 = Array1::from_shape_fn(outputs, |_| uniform(&mut rng, hidden, outputs));
        Self { w1, b1, w2, b2 }
    }

    fn forward(&self, x: &ArrayView2<f64>) -> Forward {
        let hidden_pre = x.dot(&self.w1) + &self.b1;
        let hidden = hidden_pre.mapv(|v| v.max(0.0));
        let output = hidden.dot(&self.w2) + &self.b2;
        Forward { hidden_pre, hidden, output }
    }
}

fn uniform(rng: &mut StdRng, fan_in: usize, fan_out: usize) -> f64 {
    let bound = (6.0 / (fan_in + fan_out) as f64).sqrt();
    rng.random_range(-bound..bound)
}

fn glorot(rng: &mut StdRng, fan_in: usize, fan_out: usize) -> Array2<f64> {
    Array2::from_shape_fn((fan_in, fan_out), |_| uniform(rng, fan_in, fan_out))
}

/// Momenty Adamu pre jeden parameter
struct Moments<D: Dimension> {
    m: Array<f64, D>,
    v: Array<f64, D>,
}

impl<D: Dimension> Moments<D> {
    fn like(param: &Array<f64, D>) -> Self {
        Self {
            m: Array::zeros(param.raw_dim()),
            v: Array::zeros(param.raw_dim()),
        }
    }

    fn step(&mut self, param: &mut Array<f64, D>, grad: &Array<f64, D>, lr: f64, t: i32) {
        let correction1 = 1.0 - BETA1.powi(t);
        let correction2 = 1.0 - BETA2.powi(t);
        Zip::from(param)
            .and(grad)
            .and(&mut self.m)
            .and(&mut self.v)
            .for_each(|p, &g, m, v| {
                *m = BETA1 * *m + (1.0 - BETA1) * g;
                *v = BETA2 * *v + (1.0 - BETA2) * g * g;
                let m_hat = *m / correction1;
                let v_hat = *v / correction2;
                *p -= lr * m_hat / (v_hat.sqrt() + ADAM_EPSILON);
            });
    }
}

impl MlpWrapper {
    pub fn new() -> Self {
        Self {
            network: None,
            hidden_units: 100,
            learning_rate: 0.001,
            epochs: 200,
            seed: 42,
            last_loss: None,
        }
    }

    /// Strata po poslednej epoche tréningu
    pub fn last_loss(&self) -> Option<f64> {
        self.last_loss
    }

    fn loss(output: &Array2<f64>, y: &ArrayView2<f64>) -> f64 {
        let n = y.nrows() as f64;
        (output - y).mapv(|d| d * d).sum() / (2.0 * n)
    }
}

impl Default for MlpWrapper {
    fn default() -> Self {
        Self::new()
    }
}

impl IModel for MlpWrapper {
    fn get_name(&self) -> &str {
        "MLP Regressor"
    }

    fn get_supported_params(&self) -> Vec<&str> {
        vec!["hidden_units", "learning_rate", "epochs", "seed"]
    }

    fn set_param(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "hidden_units" => {
                let units: usize = parse_param(key, value)?;
                if units == 0 {
                    return Err(FlareError::Config("hidden_units musí byť aspoň 1".to_string()));
                }
                self.hidden_units = units;
            }
            "learning_rate" => {
                let lr: f64 = parse_param(key, value)?;
                if !(lr > 0.0 && lr.is_finite()) {
                    return Err(FlareError::Config("learning_rate musí byť kladné číslo".to_string()));
                }
                self.learning_rate = lr;
            }
            "epochs" => {
                let epochs: usize = parse_param(key, value)?;
                if epochs == 0 {
                    return Err(FlareError::Config("epochs musí byť aspoň 1".to_string()));
                }
                self.epochs = epochs;
            }
            "seed" => self.seed = parse_param(key, value)?,
            _ => return Err(FlareError::Config(format!("Neznámy parameter {} pre MLP", key))),
        }
        Ok(())
    }

    fn train(&mut self, x: ArrayView2<f64>, y: ArrayView2<f64>) -> Result<()> {
        check_training_shapes(&x, &y)?;

        let n = x.nrows() as f64;
        let mut net = Network::init(x.ncols(), self.hidden_units, y.ncols(), self.seed);
        let mut moments_w1 = Moments::like(&net.w1);
        let mut moments_b1 = Moments::like(&net.b1);
        let mut moments_w2 = Moments::like(&net.w2);
        let mut moments_b2 = Moments::like(&net.b2);

        let mut loss = f64::NAN;
        for epoch in 1..=self.epochs {
            let fwd = net.forward(&x);
            loss = Self::loss(&fwd.output, &y);
            if !loss.is_finite() {
                return Err(FlareError::Model(format!(
                    "Tréning MLP divergoval v epoche {} (learning_rate {})",
                    epoch, self.learning_rate
                )));
            }

            // spätné šírenie pre 0.5 * MSE
            let grad_out = (&fwd.output - &y) / n;
            let grad_w2 = fwd.hidden.t().dot(&grad_out);
            let grad_b2 = grad_out.sum_axis(Axis(0));
            let mut grad_hidden = grad_out.dot(&net.w2.t());
            Zip::from(&mut grad_hidden)
                .and(&fwd.hidden_pre)
                .for_each(|g, &z| {
                    if z <= 0.0 {
                        *g = 0.0;
                    }
                });
            let grad_w1 = x.t().dot(&grad_hidden);
            let grad_b1 = grad_hidden.sum_axis(Axis(0));

            let t = epoch.min(i32::MAX as usize) as i32;
            moments_w1.step(&mut net.w1, &grad_w1, self.learning_rate, t);
            moments_b1.step(&mut net.b1, &grad_b1, self.learning_rate, t);
            moments_w2.step(&mut net.w2, &grad_w2, self.learning_rate, t);
            moments_b2.step(&mut net.b2, &grad_b2, self.learning_rate, t);

            if epoch % 50 == 0 {
                debug!(epoch, loss, "MLP epocha");
            }
        }

        debug!(
            hidden_units = self.hidden_units,
            epochs = self.epochs,
            loss,
            "MLP natrénovaný"
        );
        self.last_loss = Some(loss);
        self.network = Some(net);
        Ok(())
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        let net = self
            .network
            .as_ref()
            .ok_or_else(|| FlareError::Model("MLP ešte nebol natrénovaný".to_string()))?;
        if x.ncols() != net.w1.nrows() {
            return Err(FlareError::Validation(format!(
                "MLP očakáva {} vstupov, dostupných {}",
                net.w1.nrows(),
                x.ncols()
            )));
        }
        Ok(net.forward(&x).output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn toy() -> (Array2<f64>, Array2<f64>) {
        let x = array![
            [1.0, 0.0, 1.0],
            [0.0, 1.0, 2.0],
            [1.0, 0.0, 3.0],
            [0.0, 1.0, 1.0],
            [1.0, 1.0, 2.0],
            [0.0, 0.0, 3.0],
        ];
        let y = x.map_axis(Axis(1), |row| row.sum());
        let y = ndarray::stack(Axis(1), &[y.view(), (&y * 0.5).view(), Array1::zeros(6).view()])
            .unwrap();
        (x, y)
    }

    #[test]
    fn training_reduces_loss() {
        let (x, y) = toy();
        let mut mlp = MlpWrapper::new();
        mlp.set_param("hidden_units", "16").unwrap();
        mlp.set_param("learning_rate", "0.01").unwrap();

        mlp.set_param("epochs", "1").unwrap();
        mlp.train(x.view(), y.view()).unwrap();
        let initial = mlp.last_loss().unwrap();

        mlp.set_param("epochs", "500").unwrap();
        mlp.train(x.view(), y.view()).unwrap();
        let trained = mlp.last_loss().unwrap();

        assert!(trained < initial * 0.5, "loss {} -> {}", initial, trained);
        assert_eq!(mlp.predict(x.view()).unwrap().dim(), (6, 3));
    }

    #[test]
    fn same_seed_gives_same_predictions() {
        let (x, y) = toy();
        let mut a = MlpWrapper::new();
        let mut b = MlpWrapper::new();
        for m in [&mut a, &mut b] {
            m.set_param("epochs", "20").unwrap();
            m.train(x.view(), y.view()).unwrap();
        }
        assert_eq!(a.predict(x.view()).unwrap(), b.predict(x.view()).unwrap());
    }

    #[test]
    fn rejects_bad_params_and_inputs() {
        let mut mlp = MlpWrapper::new();
        assert!(mlp.set_param("hidden_units", "0").is_err());
        assert!(mlp.set_param("learning_rate", "-1").is_err());
        assert!(mlp.set_param("momentum", "0.9").is_err());
        assert!(mlp.predict(array![[1.0]].view()).is_err());

        let (x, y) = toy();
        mlp.set_param("epochs", "1").unwrap();
        mlp.train(x.view(), y.view()).unwrap();
        assert!(mlp.predict(array![[1.0, 2.0]].view()).unwrap_err().is_validation());
    }
}
