/// Wall-clock timestamp in milliseconds.
///
/// Animation formulas are expressed in milliseconds, so the foundation
/// timebase is too.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Millis(pub f64);
