//! Shared type definitions
//!
//! This module contains the data types shared between windows.

pub mod message;
