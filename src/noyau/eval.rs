//! Noyau — évaluation (pipeline réel)
//!
//! LaTeX -> arbre -> (égalité ? deux membres : un membre)
//!       -> jetons -> RPN -> Expr -> simplify (exact, angles spéciaux) -> f64
//!       -> 10 chiffres significatifs -> texte décimal ou True/False
//!
//! Remarque : l’égalité est testée numériquement après arrondi des deux membres,
//! avec une tolérance absolue de 1e-10.

use std::fmt;

use log::debug;

use crate::latex::{analyser, Noeud};

use super::format::{arrondir_significatif, formater_booleen, formater_decimal, CHIFFRES_SIGNIFICATIFS};
use super::numerique::evaluer;
use super::rpn::vers_expr;
use super::ErreurCalcul;

/// Texte affiché pour toute erreur d’analyse ou d’évaluation.
pub const EXPRESSION_INVALIDE: &str = "Invalid Expression";

/// Tolérance absolue du test d’égalité.
pub const TOLERANCE: f64 = 1e-10;

#[derive(Clone, Debug, PartialEq)]
pub enum Resultat {
    /// Valeur décimale déjà mise en forme ("0.5", "120", "-2").
    Valeur(String),
    /// Résultat d’une égalité.
    Booleen(bool),
}

impl fmt::Display for Resultat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resultat::Valeur(s) => f.write_str(s),
            Resultat::Booleen(b) => f.write_str(formater_booleen(*b)),
        }
    }
}

/// Forme de la saisie au niveau racine.
enum Forme<'a> {
    Expression(&'a [Noeud]),
    Egalite(&'a [Noeud], &'a [Noeud]),
}

/// API publique : évalue une formule LaTeX.
///
/// - "a = b" : Booleen(|a - b| < 1e-10) après arrondi des membres
/// - sinon   : Valeur(décimal formaté)
/// - toute autre relation, plusieurs '=', symbole libre, valeur non réelle : Err
pub fn calculer(source: &str) -> Result<Resultat, ErreurCalcul> {
    if source.trim().is_empty() {
        return Err(ErreurCalcul::Vide);
    }

    let arbre = analyser(source)?;
    debug!("arbre: {arbre:?}");

    match classer(&arbre)? {
        Forme::Expression(noeuds) => {
            let v = membre(noeuds)?;
            Ok(Resultat::Valeur(formater_decimal(v)))
        }
        Forme::Egalite(gauche, droite) => {
            let g = membre(gauche)?;
            let d = membre(droite)?;
            debug!("égalité: {g} = {d}");
            Ok(Resultat::Booleen((g - d).abs() < TOLERANCE))
        }
    }
}

/// Texte prêt à afficher : le résultat, ou "Invalid Expression".
pub fn calculer_texte(source: &str) -> (String, bool) {
    match calculer(source) {
        Ok(r) => (r.to_string(), false),
        Err(e) => {
            debug!("évaluation refusée: {e}");
            (EXPRESSION_INVALIDE.to_string(), true)
        }
    }
}

fn classer(arbre: &[Noeud]) -> Result<Forme<'_>, ErreurCalcul> {
    let mut egal: Option<usize> = None;

    for (i, n) in arbre.iter().enumerate() {
        if let Noeud::Operateur(c) = n {
            match c {
                '=' if egal.is_some() => return Err(ErreurCalcul::Relation('=')),
                '=' => egal = Some(i),
                '<' | '>' | '≤' | '≥' | '≠' | '≈' => return Err(ErreurCalcul::Relation(*c)),
                _ => {}
            }
        }
    }

    Ok(match egal {
        Some(i) => Forme::Egalite(&arbre[..i], &arbre[i + 1..]),
        None => Forme::Expression(arbre),
    })
}

/// Un membre : Expr exacte simplifiée, puis lecture f64 arrondie.
fn membre(noeuds: &[Noeud]) -> Result<f64, ErreurCalcul> {
    let expr = vers_expr(noeuds)?;
    debug!("avant: {expr}");

    let simple = expr.simplify();
    debug!("après: {simple}");

    let v = evaluer(&simple)?;
    Ok(arrondir_significatif(v, CHIFFRES_SIGNIFICATIFS))
}
