pub mod cli;
pub mod config;
pub mod conversation;
pub mod error;
pub mod gateway;
pub mod llm;
pub mod logging;
pub mod message;
pub mod widget;
