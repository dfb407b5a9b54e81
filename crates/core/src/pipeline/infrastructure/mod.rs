pub mod threaded_capture_loop;
