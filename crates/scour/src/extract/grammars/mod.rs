pub mod structured;
pub mod tolerant;

pub use structured::StructuredGrammar;
pub use tolerant::TolerantGrammar;
