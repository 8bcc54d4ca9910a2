//! Frontal LaTeX (mode mathématique)
//!
//! Organisation interne :
//! - jetons.rs   : tokenisation (mots de contrôle, nombres, lettres, symboles)
//! - symboles.rs : tables (lettres grecques, opérateurs, fonctions, espaces)
//! - syntaxe.rs  : arbre syntaxique `Noeud` (descente récursive)
//!
//! Le même arbre sert au noyau (évaluation) et à l’aperçu (mise en page).

pub mod jetons;
pub mod symboles;
pub mod syntaxe;

use thiserror::Error;

pub use syntaxe::{analyser, Noeud};

/// Erreurs du frontal LaTeX (tokenisation + analyse).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErreurLatex {
    #[error("entrée vide")]
    EntreeVide,

    #[error("caractère inattendu: '{0}'")]
    CaractereInattendu(char),

    #[error("commande inconnue: \\{0}")]
    CommandeInconnue(String),

    #[error("accolade non fermée")]
    AccoladeNonFermee,

    #[error("accolade fermante inattendue")]
    AccoladeInattendue,

    #[error("argument manquant pour {0}")]
    ArgumentManquant(String),

    #[error("délimiteur manquant après \\{0}")]
    DelimiteurManquant(String),

    #[error("\\left sans \\right")]
    RightManquant,

    #[error("\\right sans \\left")]
    LeftManquant,

    #[error("double exposant")]
    ExposantDouble,

    #[error("double indice")]
    IndiceDouble,

    #[error("script sans base")]
    ScriptSansBase,

    #[error("imbrication trop profonde")]
    TropProfond,
}
