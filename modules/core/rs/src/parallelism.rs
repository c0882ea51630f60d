use std::cmp::Ordering;
use std::thread::available_parallelism;

use eyre::Result;

fn _normalize(requested: isize, max: isize) -> usize {
    match requested.cmp(&0) {
        Ordering::Less => (max + requested + 1).max(1) as usize,
        Ordering::Equal => 1,
        Ordering::Greater => requested.min(max) as usize,
    }
}

/// Number of worker threads to use for the requested value.
/// Positive values are capped by the hardware parallelism, zero means a single thread,
/// and negative values count down from the hardware maximum (-1 = all threads).
pub fn available(requested: isize) -> Result<usize> {
    let max = available_parallelism()?.get() as isize;
    Ok(_normalize(requested, max))
}
