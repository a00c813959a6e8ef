// Library interface for newsquiz modules
// This allows tests and other binaries to import modules

pub mod llm;
pub mod news;
pub mod quiz;
pub mod render;
pub mod server;
pub mod sessions;
