use ndarray::Array1;

/// Pull a candidate back into the box. Comparisons only: NaN coordinates or
/// bounds never panic here, unlike `f64::clamp`.
pub(crate) fn clip_free_inplace(
    x: &mut Array1<f64>,
    lower: &Array1<f64>,
    upper: &Array1<f64>,
    is_free: &[bool],
) {
    for i in 0..x.len() {
        if is_free[i] {
            if x[i] < lower[i] {
                x[i] = lower[i];
            }
            if x[i] > upper[i] {
                x[i] = upper[i];
            }
        } else {
            x[i] = lower[i]; // fixed var equals bound
        }
    }
}
