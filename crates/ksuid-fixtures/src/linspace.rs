/// Returns `count` evenly spaced integers over `[start, stop]`, like
/// `numpy.linspace`.
///
/// Policy, fixed for fixture reproducibility: `count == 0` yields an empty
/// vector, `count == 1` yields `[start]`, and otherwise the step is
/// `(stop - start) / (count - 1)` with integer division and the final
/// element is forced to exactly `stop` so rounding drift never clips the
/// upper boundary.
pub fn lin_space(start: u64, stop: u64, count: usize) -> Vec<u64> {
    debug_assert!(start <= stop, "inverted interval");
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![start];
    }

    let interval = (stop - start) / (count as u64 - 1);
    let mut res: Vec<u64> = (0..count as u64).map(|i| start + i * interval).collect();
    res[count - 1] = stop;
    res
}
