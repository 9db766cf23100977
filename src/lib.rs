//! Teamboard: a small team's task board with peer-reviewed scoring.
//!
//! Members create tasks, claim them, vote on their point value, submit
//! activity reports, and review each other's finished work. Vote totals and
//! review outcomes settle into an achieved score per task.
//!
//! # Architecture
//!
//! Teamboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence, identity, storage
//! - **Adapters**: In-memory, `PostgreSQL`, and filesystem implementations
//!
//! # Modules
//!
//! - [`task`]: Tasks, votes, reports, reviews, and score settlement
//! - [`member`]: Team members
//! - [`audit`]: Append-only activity trail
//! - [`identity`]: Caller resolution
//! - [`storage`]: Attachment blob storage
//! - [`api`]: Uniform action outcomes for callers
//! - [`config`]: Runtime configuration

pub mod api;
pub mod audit;
pub mod config;
pub mod identity;
pub mod member;
pub mod postgres;
pub mod storage;
pub mod task;
