//! Bisection over a monotonically increasing objective
//!
//! Used to invert a closed-form corpus projection: find the contribution
//! whose projected corpus lands within an absolute tolerance of a target.

/// Progress callback for bisection
///
/// Arguments: (iteration, `candidate`, `objective_value`)
pub type ProgressCallback = Box<dyn Fn(usize, f64, f64) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bisection {
    /// Last midpoint evaluated
    pub value: f64,
    pub objective_value: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Search `[low, high]` for `x` with `|f(x) - target| < tolerance`.
///
/// `f` must be non-decreasing in `x`. When the tolerance is never met the
/// last midpoint is returned with `converged == false`.
pub fn bisect_increasing<F>(
    mut f: F,
    (mut low, mut high): (f64, f64),
    target: f64,
    tolerance: f64,
    max_iterations: usize,
    progress_callback: Option<&ProgressCallback>,
) -> Bisection
where
    F: FnMut(f64) -> f64,
{
    let mut last = Bisection {
        value: f64::midpoint(low, high),
        objective_value: f64::NAN,
        iterations: 0,
        converged: false,
    };

    for iteration in 1..=max_iterations {
        let mid = f64::midpoint(low, high);
        let value = f(mid);

        if let Some(callback) = progress_callback {
            callback(iteration, mid, value);
        }

        last = Bisection {
            value: mid,
            objective_value: value,
            iterations: iteration,
            converged: (value - target).abs() < tolerance,
        };
        if last.converged {
            break;
        }

        if value < target {
            low = mid;
        } else {
            high = mid;
        }
    }

    last
}
