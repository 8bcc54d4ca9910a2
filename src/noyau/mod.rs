//! Noyau d’évaluation
//!
//! Organisation interne :
//! - rpn.rs       : arbre LaTeX -> jetons -> shunting-yard -> RPN -> Expr
//! - expr.rs      : AST exact + simplify + coeff*π
//! - trig.rs      : angles spéciaux + indéfini
//! - numerique.rs : lecture f64 de ce qui reste symbolique
//! - format.rs    : décimal 10 chiffres significatifs, zéros finaux retirés
//! - eval.rs      : pipeline complet (égalité ou expression)

pub mod eval;
pub mod expr;
pub mod format;
pub mod numerique;
pub mod rpn;
pub mod trig;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

use thiserror::Error;

use crate::latex::ErreurLatex;

// API publique minimale
pub use eval::{calculer, calculer_texte, Resultat, EXPRESSION_INVALIDE};

/// Toute erreur d’analyse ou d’évaluation. L’UI n’affiche que "Invalid Expression" ;
/// le détail part dans le journal.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ErreurCalcul {
    #[error(transparent)]
    Latex(#[from] ErreurLatex),

    #[error("expression vide")]
    Vide,

    #[error("expression trop longue")]
    TropLongue,

    #[error("parenthèse non fermée")]
    ParentheseNonFermee,

    #[error("parenthèse fermante inattendue")]
    ParentheseInattendue,

    #[error("opérande manquant")]
    OperandeManquant,

    #[error("fonction {0} sans argument")]
    ArgumentManquant(String),

    #[error("construction non supportée : {0}")]
    NonSupporte(String),

    #[error("relation '{0}' non évaluable")]
    Relation(char),

    #[error("nombre invalide : {0}")]
    NombreInvalide(String),

    #[error("symbole libre : {0}")]
    SymboleLibre(String),

    #[error("valeur indéfinie")]
    Indefini,

    #[error("résultat complexe")]
    Complexe,

    #[error("résultat non fini")]
    NonFini,
}
