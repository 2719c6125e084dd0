pub mod boundary_config;
