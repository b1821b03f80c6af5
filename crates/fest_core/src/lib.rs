//! fest_core - core types and domains for the fest engine.
//!
//! This crate is **I/O-free**. It defines the stable types shared across the
//! engine (`fest_io`, `fest_algo`, `fest_pipeline`, `fest_report`,
//! `fest_cli`):
//!
//! - Identifier newtypes: `ChestNumber`, `TeamCode`, `ProgrammeId`, `ResultId`
//! - Snapshot entities: `Team`, `Participant`, `Programme`, `ResultDoc`
//! - Domain enums: category/subcategory/section, position type, result status
//! - Grade scale and scoring configuration (decode rules)
//! - Deterministic ordering helpers
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod ids;
pub mod entities;
pub mod grades;
pub mod config;
pub mod determinism;

pub use config::{ConfigError, NumericRange, ScoringConfig, TeamDecodeRules};
pub use entities::{
    Category, Participant, Position, PositionType, Programme, ResultDoc, ResultStatus, Section,
    StatusFilter, Subcategory, Team, WinnerEntry,
};
pub use grades::{GradeScale, GradeStep};
pub use ids::{ChestNumber, IdError, ProgrammeId, ResultId, TeamCode};
