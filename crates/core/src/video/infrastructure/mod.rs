pub mod capture_reader;
pub mod image_file_reader;
