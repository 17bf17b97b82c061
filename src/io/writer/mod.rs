/*!
# Resumable table writing

Output rows are appended to the destination table one at a time and flushed right away,
so that an interrupted run can be resumed from the number of rows already present.
!*/
mod resumable;

pub use resumable::{inspect, ResumableWriter};
