//! Noyau d’évaluation
//!
//! Organisation interne :
//! - erreurs.rs  : taxonomie ErreurCalc (lexicale, syntaxe, ÷0, domaine, évaluation)
//! - jetons.rs   : normalisation des glyphes + tokenisation
//! - rpn.rs      : shunting-yard + construction Expr
//! - expr.rs     : AST
//! - eval.rs     : évaluation f64 + mode d’angle + pipeline complet
//! - format.rs   : canon 14 chiffres + séparateurs de milliers
//!
//! Sans état : eval_expression est une fonction pure de (texte, mode d’angle).

pub mod erreurs;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod rpn;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreurs::{ErreurCalc, GenreErreur};
pub use eval::{eval_expression, ModeAngle};
pub use format::format_affichage;
