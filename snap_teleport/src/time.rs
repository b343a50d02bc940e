use std::time::Duration;

/// Clock sample handed to the controller once per simulation tick.
///
/// `total` is monotonic time since the host loop started and is the
/// "now" used for debounce bookkeeping; `elapsed` is the delta since
/// the previous tick. The library never reads wall clocks itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct Time {
    pub elapsed: Duration,
    pub total: Duration,
}
