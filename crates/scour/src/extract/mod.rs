/// Pattern extraction engine.
///
/// Two extraction grammars are supported as interchangeable strategies,
/// selected explicitly by configuration — never merged:
///
/// - `grammars/structured.rs`: labeled catalog lines (`ID:`, `PRODUCT:`,
///   optional `PRICE:` and `Stock`).
/// - `grammars/tolerant.rs`: positional receipt lines (leading OCR-tolerant
///   identifier, trailing decimal amount).
///
/// Patterns are compiled once per run inside the grammar values; there is
/// no module-level pattern state.
pub mod grammars;
pub mod model;
pub mod traits;

pub use grammars::{StructuredGrammar, TolerantGrammar};
pub use model::{CandidateRecord, GrammarKind};
pub use traits::Grammar;

/// Build the configured grammar.
pub fn grammar_for(kind: GrammarKind) -> Result<Box<dyn Grammar>, regex::Error> {
    Ok(match kind {
        GrammarKind::StructuredLabeled => Box::new(StructuredGrammar::new()?),
        GrammarKind::TolerantPositional => Box::new(TolerantGrammar::new()?),
    })
}
