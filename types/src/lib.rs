// ========== Statement Model ==========
pub mod term;
pub mod relation;
pub mod vocab;

// Export commonly used types
pub use term::{Literal, Quad, Term};
pub use relation::{RelationParameters, RelationType};
