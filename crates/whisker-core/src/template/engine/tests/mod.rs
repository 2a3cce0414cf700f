//! Tests for template engine
//!
//! Organized by pipeline stage (tag finder, parser) and by tag family.

use super::*;

// Test helper functions
mod helpers;


mod options;
mod whitespace;
