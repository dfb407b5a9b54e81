pub mod crossbeam_timers;
