//! Mergeviz Core Types and Definitions
//!
//! This crate provides the foundational data model shared by the Mergeviz
//! trace engine and anything that consumes its output. It includes:
//!
//! - **Geometry**: Canvas coordinates ([`geometry::Point`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Elements**: Visualized values and the links between them ([`element`] module)
//! - **Frames**: Immutable, self-contained trace snapshots ([`frame`] module)
//!
//! Nothing in this crate runs an algorithm; the simulators live in the
//! `mergeviz` crate and only produce values of these types.

pub mod color;
pub mod element;
pub mod frame;
pub mod geometry;
