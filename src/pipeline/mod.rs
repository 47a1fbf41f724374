// Pipeline orchestration — the cycle, the broadcast fan-out, and the
// polling loop that drives them.

pub mod broadcast;
pub mod cycle;
pub mod poller;
