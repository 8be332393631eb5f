//! Interaction Adapters
//!
//! Headless implementations of the `Translator` and `Confirmer` ports.
//!
//! - **StaticTranslator** - Built-in English strings
//! - **FixedConfirmer** - Answers every prompt with a preset value

mod fixed_confirmer;
mod static_translator;

pub use fixed_confirmer::FixedConfirmer;
pub use static_translator::StaticTranslator;
