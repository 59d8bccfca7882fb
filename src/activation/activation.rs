use std::f64::consts::E;

/// Logistic activation: `1 / (1 + e^-x)`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Sigmoid derivative expressed through the activated output.
///
/// `y` must already be `sigmoid(x)`; passing the raw pre-activation sum
/// gives a wrong gradient.
pub fn dsigmoid(y: f64) -> f64 {
    y * (1.0 - y)
}
