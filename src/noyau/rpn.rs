// src/noyau/rpn.rs
//
// Arbre LaTeX -> jetons -> shunting-yard -> RPN -> AST
// Objectif:
// - Aplatir une séquence de Noeud en jetons (valeurs + opérateurs)
// - Convertir en RPN (postfix), puis reconstruire Expr
//
// Règles:
// - Les structures LaTeX (\frac, \sqrt, x^y, groupes) sont déjà des valeurs.
// - Parenthèses ( ) [ ] et |…| sont appariées ici (l’analyseur les laisse à plat).
// - Multiplication implicite entre deux valeurs adjacentes : 2x, 2\pi, (1)(2).
// - Moins unaire : opérateur préfixe, plus prioritaire que * et / ("2*-3" => -6).
// - Fonctions (\sin, \ln, ...) : argument parenthésé OU la suite d’atomes qui suit
//   ("\sin 2x" => sin(2x)). \sin^2 x => (sin x)^2 ; \sin^{-1} x => arcsin x ;
//   \log_b x => log base b ; \log x => log base 10.
// - x! : factorielle postfixe sur la dernière valeur.
//
// Bornes (l’AST est parcouru récursivement ensuite) :
// - profondeur d’imbrication cumulée (groupes, parenthèses, barres, fonctions)
// - nombre total d’opérateurs, implicites compris
// - factorielles consécutives

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

use crate::latex::Noeud;

use super::expr::{Expr, Fonction};
use super::ErreurCalcul;

/// Garde-fou : nombre max de jetons par séquence.
const JETONS_MAX: usize = 1000;

/// Imbrication max, tous niveaux confondus.
const PROFONDEUR_MAX: usize = 256;

/// Opérateurs max sur toute l’expression.
const OPERATEURS_MAX: usize = 2000;

/// "3!!!" au plus ; au-delà, le résultat n’est de toute façon pas fini.
const FACTORIELLES_MAX: usize = 3;

#[derive(Clone, Debug)]
pub enum Tok {
    Val(Expr),

    Plus,
    Minus,
    Star,
    Slash,

    Neg, // moins unaire (préfixe)
}

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Val(_) => 0,
    }
}

/// Pipeline complet : séquence de noeuds -> Expr (non simplifiée).
pub fn vers_expr(noeuds: &[Noeud]) -> Result<Expr, ErreurCalcul> {
    Lecture::default().sequence(noeuds)
}

/// État d’une conversion : compteurs partagés par toutes les sous-séquences.
#[derive(Debug, Default)]
struct Lecture {
    profondeur: usize,
    operateurs: usize,
}

impl Lecture {
    fn entrer(&mut self) -> Result<(), ErreurCalcul> {
        self.profondeur += 1;
        if self.profondeur > PROFONDEUR_MAX {
            return Err(ErreurCalcul::TropLongue);
        }
        Ok(())
    }

    fn sortir(&mut self) {
        self.profondeur = self.profondeur.saturating_sub(1);
    }

    fn pousser_op(&mut self, out: &mut Vec<Tok>, op: Tok) -> Result<(), ErreurCalcul> {
        self.operateurs += 1;
        if self.operateurs > OPERATEURS_MAX {
            return Err(ErreurCalcul::TropLongue);
        }
        out.push(op);
        Ok(())
    }

    /// Pousse une valeur ; insère `*` si la précédente était déjà une valeur.
    fn pousser_valeur(&mut self, out: &mut Vec<Tok>, v: Expr) -> Result<(), ErreurCalcul> {
        if derniere_est_valeur(out) {
            self.pousser_op(out, Tok::Star)?;
        }
        out.push(Tok::Val(v));
        Ok(())
    }

    fn sequence(&mut self, noeuds: &[Noeud]) -> Result<Expr, ErreurCalcul> {
        self.entrer()?;
        let jetons = self.jetons_de(noeuds)?;
        if jetons.len() > JETONS_MAX {
            return Err(ErreurCalcul::TropLongue);
        }
        self.sortir();
        from_rpn(to_rpn(jetons))
    }

    fn expr_de(&mut self, n: &Noeud) -> Result<Expr, ErreurCalcul> {
        self.sequence(n.en_sequence())
    }

    /* ------------------------ Aplatissement ------------------------ */

    fn jetons_de(&mut self, noeuds: &[Noeud]) -> Result<Vec<Tok>, ErreurCalcul> {
        let mut out: Vec<Tok> = Vec::new();
        let mut factorielles = 0usize;
        let mut i = 0;

        while i < noeuds.len() {
            let n = &noeuds[i];
            i += 1;

            if matches!(n, Noeud::Operateur('!')) {
                factorielles += 1;
                if factorielles > FACTORIELLES_MAX {
                    return Err(ErreurCalcul::TropLongue);
                }
            } else if !matches!(n, Noeud::Espace(_)) {
                factorielles = 0;
            }

            if let Some((v, consommes)) = self.lire_fonction(n, &noeuds[i..])? {
                i += consommes;
                self.pousser_valeur(&mut out, v)?;
                continue;
            }

            match n {
                Noeud::Espace(_) => {}

                Noeud::Operateur(c) => match c {
                    '+' => {
                        // plus unaire : sans effet
                        if derniere_est_valeur(&out) {
                            self.pousser_op(&mut out, Tok::Plus)?;
                        }
                    }
                    '-' => {
                        let op = if derniere_est_valeur(&out) { Tok::Minus } else { Tok::Neg };
                        self.pousser_op(&mut out, op)?;
                    }
                    '*' | '·' | '×' => self.pousser_op(&mut out, Tok::Star)?,
                    '/' | '÷' => self.pousser_op(&mut out, Tok::Slash)?,
                    '!' => match out.pop() {
                        Some(Tok::Val(v)) => {
                            self.operateurs += 1;
                            out.push(Tok::Val(Expr::Factorielle(Box::new(v))));
                        }
                        _ => return Err(ErreurCalcul::OperandeManquant),
                    },
                    '=' | '<' | '>' | '≤' | '≥' | '≠' | '≈' => return Err(ErreurCalcul::Relation(*c)),
                    autre => return Err(ErreurCalcul::NonSupporte(autre.to_string())),
                },

                Noeud::Ouvrant(_) => {
                    let fin = fermeture(noeuds, i - 1)?;
                    let v = self.sequence(&noeuds[i..fin])?;
                    let v = self.scripts_fermant(v, &noeuds[fin])?;
                    self.pousser_valeur(&mut out, v)?;
                    i = fin + 1;
                }
                Noeud::Fermant(_) => return Err(ErreurCalcul::ParentheseInattendue),
                n if est_fermant(n) => return Err(ErreurCalcul::ParentheseInattendue),

                Noeud::Barre => {
                    let fin = fermeture_barre(noeuds, i - 1)?;
                    let v = Expr::Abs(Box::new(self.sequence(&noeuds[i..fin])?));
                    let v = self.scripts_fermant(v, &noeuds[fin])?;
                    self.pousser_valeur(&mut out, v)?;
                    i = fin + 1;
                }

                autre => {
                    let v = self.atome(autre)?;
                    self.pousser_valeur(&mut out, v)?;
                }
            }
        }

        Ok(out)
    }

    /// Exposant éventuel d’une fermante, à appliquer à la valeur du groupe.
    fn exposant_fermant(&mut self, fermant: &Noeud) -> Result<Option<Expr>, ErreurCalcul> {
        match fermant {
            Noeud::Scripts { indice: Some(_), .. } => Err(ErreurCalcul::NonSupporte("indice".into())),
            Noeud::Scripts {
                exposant: Some(e), ..
            } => Ok(Some(self.expr_de(e)?)),
            _ => Ok(None),
        }
    }

    fn scripts_fermant(&mut self, v: Expr, fermant: &Noeud) -> Result<Expr, ErreurCalcul> {
        Ok(match self.exposant_fermant(fermant)? {
            Some(p) => Expr::Pow(Box::new(v), Box::new(p)),
            None => v,
        })
    }

    /* ------------------------ Atomes ------------------------ */

    fn atome(&mut self, n: &Noeud) -> Result<Expr, ErreurCalcul> {
        let e = match n {
            Noeud::Nombre(s) => lire_nombre(s)?,

            Noeud::Lettre('e') => Expr::E,
            Noeud::Lettre(c) => Expr::Var(c.to_string()),

            Noeud::Symbole { nom, .. } => match nom.as_str() {
                "pi" => Expr::Pi,
                "infty" => Expr::Indefini,
                _ => Expr::Var(nom.clone()),
            },

            Noeud::Groupe(v) => self.sequence(v)?,

            Noeud::Fraction(num, den) => {
                Expr::Div(Box::new(self.expr_de(num)?), Box::new(self.expr_de(den)?))
            }

            Noeud::Binome(n, k) => {
                // C(n,k) = n! / (k! (n-k)!)
                let n = self.expr_de(n)?;
                let k = self.expr_de(k)?;
                let n_moins_k = Expr::Sub(Box::new(n.clone()), Box::new(k.clone()));
                Expr::Div(
                    Box::new(Expr::Factorielle(Box::new(n))),
                    Box::new(Expr::Mul(
                        Box::new(Expr::Factorielle(Box::new(k))),
                        Box::new(Expr::Factorielle(Box::new(n_moins_k))),
                    )),
                )
            }

            Noeud::Racine { indice, radicande } => {
                let r = self.expr_de(radicande)?;
                match indice {
                    None => Expr::Sqrt(Box::new(r)),
                    Some(idx) => {
                        let inverse = Expr::Div(Box::new(Expr::entier(1)), Box::new(self.expr_de(idx)?));
                        Expr::Pow(Box::new(r), Box::new(inverse))
                    }
                }
            }

            Noeud::Scripts {
                base,
                exposant,
                indice,
            } => {
                let b = match indice {
                    // x_1 : simple nom de symbole
                    Some(i) => match base.as_ref() {
                        Noeud::Lettre(_) | Noeud::Symbole { .. } => {
                            let nom = self.atome(base)?;
                            Expr::Var(format!("{}_{}", nom, self.expr_de(i)?))
                        }
                        _ => return Err(ErreurCalcul::NonSupporte("indice".into())),
                    },
                    None => self.atome(base)?,
                };
                match exposant {
                    Some(e) => Expr::Pow(Box::new(b), Box::new(self.expr_de(e)?)),
                    None => b,
                }
            }

            Noeud::Delimite {
                gauche, contenu, ..
            } => {
                let v = self.sequence(contenu)?;
                if *gauche == Some('|') {
                    Expr::Abs(Box::new(v))
                } else {
                    v
                }
            }

            Noeud::Texte(t) => return Err(ErreurCalcul::NonSupporte(format!("\\text{{{t}}}"))),

            Noeud::Espace(_)
            | Noeud::Operateur(_)
            | Noeud::Ouvrant(_)
            | Noeud::Fermant(_)
            | Noeud::Barre
            | Noeud::Fonction(_) => return Err(ErreurCalcul::OperandeManquant),
        };

        Ok(e)
    }

    /* ------------------------ Fonctions ------------------------ */

    /// Si `n` est une fonction (éventuellement avec scripts), lit son argument dans `reste`.
    /// Retour: Some((valeur, noeuds consommés dans `reste`)).
    fn lire_fonction(&mut self, n: &Noeud, reste: &[Noeud]) -> Result<Option<(Expr, usize)>, ErreurCalcul> {
        let (nom, exposant, indice) = match n {
            Noeud::Fonction(nom) => (nom, None, None),
            Noeud::Scripts {
                base,
                exposant,
                indice,
            } => match base.as_ref() {
                Noeud::Fonction(nom) => (nom, exposant.as_deref(), indice.as_deref()),
                _ => return Ok(None),
            },
            _ => return Ok(None),
        };

        // \sin\sin\sin... : chaque fonction compte comme un niveau
        self.entrer()?;
        let (arg, consommes, apres) = self.argument_fonction(nom, reste)?;
        let exposant = match exposant {
            Some(e) => Some(self.expr_de(e)?.simplify()),
            None => None,
        };

        // \log_b x ; \log x = log base 10
        if nom == "log" {
            let base = match indice {
                Some(b) => self.expr_de(b)?,
                None => Expr::entier(10),
            };
            let v = Expr::Log(Box::new(base), Box::new(arg));
            let v = match exposant {
                Some(p) => Expr::Pow(Box::new(v), Box::new(p)),
                None => v,
            };
            self.sortir();
            return Ok(Some((puissance_apres(v, apres), consommes)));
        }

        if indice.is_some() {
            return Err(ErreurCalcul::NonSupporte(format!("\\{nom}_")));
        }

        let f = Fonction::depuis_nom(nom).ok_or_else(|| ErreurCalcul::NonSupporte(format!("\\{nom}")))?;

        let v = match exposant {
            Some(p) if p == Expr::entier(-1) => match f.reciproque() {
                Some(g) => Expr::Fonc(g, Box::new(arg)),
                None => Expr::Pow(Box::new(Expr::Fonc(f, Box::new(arg))), Box::new(p)),
            },
            Some(p) => Expr::Pow(Box::new(Expr::Fonc(f, Box::new(arg))), Box::new(p)),
            None => Expr::Fonc(f, Box::new(arg)),
        };

        self.sortir();
        Ok(Some((puissance_apres(v, apres), consommes)))
    }

    /// Retour: (argument, noeuds consommés, exposant porté par la parenthèse fermante).
    fn argument_fonction(
        &mut self,
        nom: &str,
        reste: &[Noeud],
    ) -> Result<(Expr, usize, Option<Expr>), ErreurCalcul> {
        let manquant = || ErreurCalcul::ArgumentManquant(format!("\\{nom}"));

        let mut j = 0;
        while matches!(reste.get(j), Some(Noeud::Espace(_))) {
            j += 1;
        }

        let Some(premier) = reste.get(j) else {
            return Err(manquant());
        };

        // \sin(x)
        if matches!(premier, Noeud::Ouvrant(_)) {
            let fin = fermeture(reste, j)?;
            let v = self.sequence(&reste[j + 1..fin])?;
            return Ok((v, fin + 1, self.exposant_fermant(&reste[fin])?));
        }

        // \sin \cos x : fonction imbriquée
        if let Some((v, consommes)) = self.lire_fonction(premier, &reste[j + 1..])? {
            return Ok((v, j + 1 + consommes, None));
        }

        // \sin 2x : suite d’atomes
        let debut = j;
        while reste.get(j).is_some_and(est_atome) {
            j += 1;
        }
        if j == debut {
            return Err(manquant());
        }
        Ok((self.sequence(&reste[debut..j])?, j, None))
    }
}

fn derniere_est_valeur(out: &[Tok]) -> bool {
    matches!(out.last(), Some(Tok::Val(_)))
}

/// ")" ou ")^2" : l’exposant porté par la fermante vaut pour tout le groupe.
fn est_fermant(n: &Noeud) -> bool {
    match n {
        Noeud::Fermant(_) => true,
        Noeud::Scripts { base, .. } => matches!(base.as_ref(), Noeud::Fermant(_)),
        _ => false,
    }
}

fn est_barre(n: &Noeud) -> bool {
    match n {
        Noeud::Barre => true,
        Noeud::Scripts { base, .. } => matches!(base.as_ref(), Noeud::Barre),
        _ => false,
    }
}

/// Index de la fermante qui ferme l’Ouvrant situé en `debut`.
fn fermeture(noeuds: &[Noeud], debut: usize) -> Result<usize, ErreurCalcul> {
    let mut profondeur = 0usize;
    for (k, n) in noeuds.iter().enumerate().skip(debut) {
        match n {
            Noeud::Ouvrant(_) => profondeur += 1,
            n if est_fermant(n) => {
                profondeur -= 1;
                if profondeur == 0 {
                    return Ok(k);
                }
            }
            _ => {}
        }
    }
    Err(ErreurCalcul::ParentheseNonFermee)
}

/// Index de la barre qui ferme celle située en `debut`.
///
/// Une barre ouvre quand rien ne la précède qui puisse être refermé :
/// juste après une barre ouvrante, un opérateur, une parenthèse ouvrante
/// ou une fonction ("||-1|+1|"). Sinon elle ferme. "|x|^2" ferme toujours.
fn fermeture_barre(noeuds: &[Noeud], debut: usize) -> Result<usize, ErreurCalcul> {
    let mut profondeur = 0usize;
    let mut ouvre = true;
    for (k, n) in noeuds.iter().enumerate().skip(debut) {
        match n {
            Noeud::Barre if ouvre => profondeur += 1,
            n if est_barre(n) => {
                profondeur = profondeur.saturating_sub(1);
                if profondeur == 0 {
                    return Ok(k);
                }
                ouvre = false;
                continue;
            }
            Noeud::Espace(_) => continue,
            _ => {}
        }
        ouvre = match n {
            Noeud::Barre | Noeud::Ouvrant(_) | Noeud::Fonction(_) => true,
            Noeud::Operateur(c) => *c != '!',
            Noeud::Scripts { base, .. } => matches!(base.as_ref(), Noeud::Fonction(_)),
            _ => false,
        };
    }
    Err(ErreurCalcul::ParentheseNonFermee)
}

/// "3.14" -> 314/100 (exact).
fn lire_nombre(s: &str) -> Result<Expr, ErreurCalcul> {
    let invalide = || ErreurCalcul::NombreInvalide(s.to_string());

    let (entier, fraction) = match s.split_once('.') {
        Some((a, b)) => (a, b),
        None => (s, ""),
    };
    if fraction.contains('.') {
        return Err(invalide());
    }

    let chiffres = format!("{entier}{fraction}");
    if chiffres.is_empty() {
        return Err(invalide());
    }
    let n = BigInt::parse_bytes(chiffres.as_bytes(), 10).ok_or_else(invalide)?;
    let d = BigInt::from(10).pow(fraction.len() as u32);

    Ok(Expr::Rat(BigRational::new(n, d)))
}

/// \sin(x)^2 : l’exposant de la parenthèse fermante porte sur la fonction.
fn puissance_apres(v: Expr, apres: Option<Expr>) -> Expr {
    match apres {
        Some(p) => Expr::Pow(Box::new(v), Box::new(p)),
        None => v,
    }
}

/// Noeuds qui peuvent former l’argument non parenthésé d’une fonction.
fn est_atome(n: &Noeud) -> bool {
    match n {
        Noeud::Nombre(_)
        | Noeud::Lettre(_)
        | Noeud::Symbole { .. }
        | Noeud::Groupe(_)
        | Noeud::Fraction(_, _)
        | Noeud::Binome(_, _)
        | Noeud::Racine { .. }
        | Noeud::Delimite { .. }
        | Noeud::Espace(_) => true,
        Noeud::Scripts { base, .. } => !matches!(base.as_ref(), Noeud::Fonction(_)),
        _ => false,
    }
}

/* ------------------------ Shunting-yard ------------------------ */

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   jetons: [Val(2), Star, Neg, Val(3)]
///   rpn:    [Val(2), Val(3), Neg, Star]
pub fn to_rpn(jetons: Vec<Tok>) -> Vec<Tok> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    for tok in jetons {
        match tok {
            Tok::Val(_) => out.push(tok),

            // préfixe : rien à dépiler, il attend son opérande
            Tok::Neg => ops.push(tok),

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash => {
                // tous binaires associatifs à gauche
                while ops
                    .last()
                    .is_some_and(|top| precedence(top) >= precedence(&tok))
                {
                    if let Some(top) = ops.pop() {
                        out.push(top);
                    }
                }
                ops.push(tok);
            }
        }
    }

    while let Some(op) = ops.pop() {
        out.push(op);
    }

    out
}

/// Construit une Expr à partir d’une RPN.
pub fn from_rpn(rpn: Vec<Tok>) -> Result<Expr, ErreurCalcul> {
    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn {
        match tok {
            Tok::Val(e) => st.push(e),

            Tok::Neg => {
                let x = st.pop().ok_or(ErreurCalcul::OperandeManquant)?;
                st.push(Expr::Sub(
                    Box::new(Expr::Rat(BigRational::zero())),
                    Box::new(x),
                ));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash => {
                let b = st.pop().ok_or(ErreurCalcul::OperandeManquant)?;
                let a = st.pop().ok_or(ErreurCalcul::OperandeManquant)?;
                let (a, b) = (Box::new(a), Box::new(b));

                st.push(match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    _ => Expr::Div(a, b),
                });
            }
        }
    }

    match st.len() {
        0 => Err(ErreurCalcul::Vide),
        1 => st.pop().ok_or(ErreurCalcul::Vide),
        _ => Err(ErreurCalcul::OperandeManquant),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::analyser;
    use pretty_assertions::assert_eq;

    fn simple(s: &str) -> Result<Expr, ErreurCalcul> {
        let arbre = analyser(s)?;
        Ok(vers_expr(&arbre)?.simplify())
    }

    fn rat(n: i64, d: i64) -> Expr {
        Expr::Rat(BigRational::new(BigInt::from(n), BigInt::from(d)))
    }

    #[test]
    fn priorites() {
        assert_eq!(simple("1+2*3").unwrap(), rat(7, 1));
        assert_eq!(simple("(1+2)*3").unwrap(), rat(9, 1));
        assert_eq!(simple("2*-3").unwrap(), rat(-6, 1));
        assert_eq!(simple("-2^2").unwrap(), rat(-4, 1));
        assert_eq!(simple("8/2/2").unwrap(), rat(2, 1));
        assert_eq!(simple("10-4-3").unwrap(), rat(3, 1));
    }

    #[test]
    fn decimaux_exacts() {
        assert_eq!(simple("0.1+0.2").unwrap(), rat(3, 10));
        assert_eq!(simple(".5").unwrap(), rat(1, 2));
        assert!(matches!(
            simple("1.2.3"),
            Err(ErreurCalcul::NombreInvalide(_))
        ));
    }

    #[test]
    fn multiplication_implicite() {
        assert_eq!(simple(r"2\frac{1}{2}").unwrap(), rat(1, 1));
        assert_eq!(simple("(1+1)(2)").unwrap(), rat(4, 1));
        assert_eq!(simple(r"\left(3\right)[2]").unwrap(), rat(6, 1));
    }

    #[test]
    fn valeur_absolue_et_factorielle() {
        assert_eq!(simple("|-3|").unwrap(), rat(3, 1));
        assert_eq!(simple(r"\left|-\frac{1}{2}\right|").unwrap(), rat(1, 2));
        assert_eq!(simple("3!+1").unwrap(), rat(7, 1));
        assert_eq!(simple(r"\binom{5}{2}").unwrap(), rat(10, 1));
    }

    #[test]
    fn fonctions_et_arguments() {
        // \sin 2x : sin(2x) reste symbolique (x libre)
        let e = simple(r"\sin 2x").unwrap();
        assert!(matches!(e, Expr::Fonc(Fonction::Sin, _)));

        // \sin^2 (\pi/2) = 1
        assert_eq!(simple(r"\sin^2(\frac{\pi}{2})").unwrap(), rat(1, 1));

        // \sin^{-1} => arcsin
        let e = simple(r"\sin^{-1}x").unwrap();
        assert!(matches!(e, Expr::Fonc(Fonction::Arcsin, _)));

        // \log_2 8 reste un Log (évalué numériquement plus tard)
        let e = simple(r"\log_2 8").unwrap();
        assert!(matches!(e, Expr::Log(_, _)));

        // fonction imbriquée sans parenthèses
        assert_eq!(simple(r"\cos\sin 0").unwrap(), rat(1, 1));
    }

    #[test]
    fn exposant_sur_fermante() {
        assert_eq!(simple("(1+2)^2").unwrap(), rat(9, 1));
        assert_eq!(simple("|-2|^3").unwrap(), rat(8, 1));
        assert_eq!(simple(r"\sin(\frac{\pi}{2})^2").unwrap(), rat(1, 1));
        assert_eq!(simple("1)^2"), Err(ErreurCalcul::ParentheseInattendue));
    }

    #[test]
    fn erreurs() {
        assert_eq!(simple("1+"), Err(ErreurCalcul::OperandeManquant));
        assert_eq!(simple("(1+2"), Err(ErreurCalcul::ParentheseNonFermee));
        assert_eq!(simple("1+2)"), Err(ErreurCalcul::ParentheseInattendue));
        assert_eq!(simple(r"\sin"), Err(ErreurCalcul::ArgumentManquant("\\sin".into())));
        assert_eq!(simple("()"), Err(ErreurCalcul::Vide));
        assert_eq!(simple("(1<2)"), Err(ErreurCalcul::Relation('<')));
        assert!(matches!(simple(r"\text{abc}"), Err(ErreurCalcul::NonSupporte(_))));
    }

    #[test]
    fn longueur_bornee() {
        let long = vec!["1"; 2000].join("+");
        assert_eq!(simple(&long), Err(ErreurCalcul::TropLongue));
    }

    #[test]
    fn barres_imbriquees() {
        assert_eq!(simple("||-1|+1|").unwrap(), rat(2, 1));
        assert_eq!(simple("|1-|2||").unwrap(), rat(1, 1));
        assert_eq!(simple(r"|\frac{1}{2}-|-3||").unwrap(), rat(5, 2));
        // deux barres côte à côte : deux valeurs absolues multipliées
        assert_eq!(simple("|2||3|").unwrap(), rat(6, 1));
        assert_eq!(simple("||-2|^2|").unwrap(), rat(4, 1));
        assert_eq!(simple("|1+|2|"), Err(ErreurCalcul::ParentheseNonFermee));
    }

    #[test]
    fn imbrication_bornee() {
        let n = PROFONDEUR_MAX + 10;

        let parentheses = format!("{}1{}", "(".repeat(n), ")".repeat(n));
        assert_eq!(simple(&parentheses), Err(ErreurCalcul::TropLongue));

        let fonctions = format!("{}0", r"\sin ".repeat(n));
        assert_eq!(simple(&fonctions), Err(ErreurCalcul::TropLongue));

        let barres = format!("{}1{}", "|".repeat(n), "|".repeat(n));
        assert_eq!(simple(&barres), Err(ErreurCalcul::TropLongue));

        // juste sous la borne : accepté
        let ok = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(simple(&ok).unwrap(), rat(1, 1));
        let ok = format!("{}0", r"\sin ".repeat(100));
        assert_eq!(simple(&ok).unwrap(), rat(0, 1));
    }

    #[test]
    fn factorielles_consecutives_bornees() {
        assert_eq!(simple("3!!").unwrap(), rat(720, 1));
        assert_eq!(simple("1!!!!"), Err(ErreurCalcul::TropLongue));
        // séparées par une parenthèse : comptées à part
        assert_eq!(simple("(2!!)!").unwrap(), rat(2, 1));
    }

    #[test]
    fn operateurs_bornes_sur_toute_l_expression() {
        // 40 groupes de 99 opérateurs : chaque séquence reste courte
        let groupe = format!("({})", vec!["1"; 100].join("-"));
        let expr = vec![groupe; 40].join("+");
        assert_eq!(simple(&expr), Err(ErreurCalcul::TropLongue));
    }

    #[test]
    fn rpn_moins_unaire() {
        let rpn = to_rpn(vec![
            Tok::Val(Expr::entier(2)),
            Tok::Star,
            Tok::Neg,
            Tok::Val(Expr::entier(3)),
        ]);
        assert_eq!(from_rpn(rpn).unwrap().simplify(), Expr::entier(-6));
    }
}
