//! Storage layer.
//!
//! The theme is the only entity that survives a restart; everything
//! else is in-memory state owned by the domain services.

pub mod theme_repository;

pub use theme_repository::ThemeRepository;
