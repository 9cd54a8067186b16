//! UI-to-backend plumbing: the command queue and the worker that services
//! it with the registry client.

pub mod commands;
pub mod runtime;
