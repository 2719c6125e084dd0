pub mod dispatcher;
pub mod frame_timings;
