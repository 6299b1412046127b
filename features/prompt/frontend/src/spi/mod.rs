/// L1 SPI: host integration — plugin lifecycle, config file, free-cwd.
pub mod config;
pub mod free_cwd;
pub mod host;
