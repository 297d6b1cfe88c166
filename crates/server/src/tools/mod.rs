//! MCP tool implementations.
//!
//! This module contains all tools exposed by the openhours-mcp server.

pub mod get_schedule;
pub mod list_facilities;
