pub mod activity_directory;
