//! WordPets Library
//!
//! Core modules for the WordPets phonics tutor: the speech-response
//! evaluation engine plus the exercise loop that drives it.

pub mod capture;
pub mod config;
pub mod curriculum;
pub mod error;
pub mod exercise;
pub mod matching;
pub mod prompt;
pub mod session;
