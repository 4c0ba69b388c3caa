use itertools::Itertools;

/// Finds the index `i` of the last value in a sorted slice such that `slice[i] <= test_value`,
/// returning 0 when the test value falls before the second element and the final index when it
/// falls at or beyond the last one.
pub fn preceding_index_search<N: PartialOrd + Copy>(slice: &[N], test_value: N) -> usize {
    slice
        .partition_point(|&v| v <= test_value)
        .saturating_sub(1)
}

/// Returns true if every value is less than or equal to the one after it. A slice containing a
/// NaN is never ascending unless it has fewer than two values.
pub fn is_ascending(values: &[f64]) -> bool {
    values.iter().tuple_windows().all(|(a, b)| a <= b)
}

/// Piecewise linear interpolation of the samples `(xp, fp)` at each of the positions in `x`.
/// Positions outside of the sampled range take the value of the nearest end sample. The sample
/// positions must be ascending and `xp` and `fp` must have the same, non-zero, length.
pub fn interp(x: &[f64], xp: &[f64], fp: &[f64]) -> Vec<f64> {
    debug_assert_eq!(xp.len(), fp.len());
    debug_assert!(!xp.is_empty());

    let last = xp.len() - 1;
    x.iter()
        .map(|&v| {
            if v <= xp[0] {
                fp[0]
            } else if v >= xp[last] {
                fp[last]
            } else {
                let i = preceding_index_search(xp, v);
                let f = (v - xp[i]) / (xp[i + 1] - xp[i]);
                fp[i] + f * (fp[i + 1] - fp[i])
            }
        })
        .collect()
}
