pub mod relative_time;
pub mod thread_url;
