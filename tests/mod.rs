//! Test suite for the task board server
//!
//! This module organizes all tests

pub mod integration;
pub mod property;
