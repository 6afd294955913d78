//! Small numeric search helpers shared by the calendar engines.

/// Smallest value `>= start` for which `done` holds.
///
/// The caller guarantees `done` eventually becomes true; searches in this
/// workspace are always seeded within a few steps of the answer.
pub fn next_value<F>(start: i64, done: F) -> i64
where
    F: Fn(i64) -> bool,
{
    let mut index = start;
    while !done(index) {
        index += 1;
    }
    index
}

/// Largest value `>= start` whose successors up to it all satisfy `keep`.
///
/// Starts from `start` and walks forward while `keep(index + 1)` holds, so
/// `keep(start)` itself is assumed.
pub fn final_value<F>(start: i64, keep: F) -> i64
where
    F: Fn(i64) -> bool,
{
    let mut index = start;
    while keep(index + 1) {
        index += 1;
    }
    index
}
