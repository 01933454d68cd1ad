//! World generation, action simulation and timeline orchestration for the
//! homestate dataset generator.
//!
//! This crate turns a configuration into datasets: it generates a household,
//! mutates it one narrated action at a time, asks questions about it, and
//! hands every step, with its planning-format encoding, to a sink.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `homestate-config.yaml` into
//!   strongly-typed structs.
//! - [`content`] -- Word pools that name bedrooms and items.
//! - [`context`] -- [`GenerationContext`], the per-run random source and
//!   pools.
//! - [`generator`] -- [`WorldGenerator`] and the initial narration.
//! - [`simulator`] -- State-change, query and goal selection.
//! - [`timeline`] -- [`TimelineDriver`], the [`TimelineSink`] trait and
//!   [`MemorySink`].
//! - [`persist`] -- [`DirectorySink`], the on-disk dataset layout.
//! - [`replay`] -- [`Dataset`], reading a dataset directory back.
//!
//! [`GenerationContext`]: context::GenerationContext
//! [`WorldGenerator`]: generator::WorldGenerator
//! [`TimelineDriver`]: timeline::TimelineDriver
//! [`TimelineSink`]: timeline::TimelineSink
//! [`MemorySink`]: timeline::MemorySink
//! [`DirectorySink`]: persist::DirectorySink
//! [`Dataset`]: replay::Dataset

pub mod config;
pub mod content;
pub mod context;
pub mod generator;
pub mod persist;
pub mod replay;
pub mod simulator;
pub mod timeline;
