//! Organigram Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Organigram layout
//! engine and its front-ends. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Model**: The organizational input records ([`model`] module)

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod model;
