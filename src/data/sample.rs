/// One labelled training record, already normalized for the network.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
    /// Index of the correct class (the position of the high target value).
    pub label: usize,
}

/// Low end of the target/input range. Sigmoid never reaches 0 or 1, so
/// targets stay strictly inside them.
pub const LOW: f64 = 0.01;
pub const HIGH: f64 = 0.99;

impl Sample {
    pub fn new(input: Vec<f64>, label: usize, n_classes: usize) -> Sample {
        Sample { input, target: one_hot(label, n_classes), label }
    }
}

/// Maps a raw pixel in `[0, 255]` into `[0.01, 1.00]`.
///
/// The top of the range is `1.00`; only targets are capped at [`HIGH`]
/// (DESIGN.md, decision 8).
pub fn scale_pixel(raw: f64) -> f64 {
    raw / 255.0 * HIGH + LOW
}

/// Target vector with `0.99` at `label` and `0.01` elsewhere.
pub fn one_hot(label: usize, n_classes: usize) -> Vec<f64> {
    let mut target = vec![LOW; n_classes];
    if let Some(slot) = target.get_mut(label) {
        *slot = HIGH;
    }
    target
}

/// Index of the largest value; ties go to the first. `None` when empty.
pub fn argmax(v: &[f64]) -> Option<usize> {
    v.iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &x)| match best {
            Some((_, b)) if b >= x => best,
            _ => Some((i, x)),
        })
        .map(|(i, _)| i)
}
