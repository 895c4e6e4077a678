//! Property-based tests

mod board_proptest;
