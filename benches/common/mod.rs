pub mod samples;
pub mod timeline;
