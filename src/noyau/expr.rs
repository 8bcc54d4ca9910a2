// src/noyau/expr.rs
//
// AST symbolique (rationnels exacts + constantes + fonctions).
// - Rat : rationnel exact (les décimaux saisis sont lus exactement : 0.1 = 1/10)
// - Pi, E : constantes
// - Indefini : résultat exact indéfini (ex: tan(π/2), 1/0)
// - Var : symbole libre (ex: x) => jamais de valeur numérique
//
// IMPORTANT (SAFE):
// - simplify() ne doit jamais “inventer” une valeur pour Var.
// - Ce qui n’est pas démontrable exactement reste symbolique ; numerique.rs tranche.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use std::fmt;

use super::trig::trig_special;

/// Garde-fou : exposant entier max pour la puissance exacte d’un rationnel.
const EXPOSANT_EXACT_MAX: i64 = 4096;
/// Taille max (en bits) d’une puissance calculée exactement.
const BITS_EXACTS_MAX: u64 = 1 << 16;

/// Garde-fou : n! exact seulement jusqu’à cette borne.
const FACTORIELLE_EXACTE_MAX: u64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Cot,
    Sec,
    Csc,
    Arcsin,
    Arccos,
    Arctan,
    Sinh,
    Cosh,
    Tanh,
    Ln,
    Exp,
}

impl Fonction {
    /// Nom LaTeX (sans antislash) -> fonction. `log` est traité à part (base).
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        use Fonction::*;
        let f = match nom {
            "sin" => Sin,
            "cos" => Cos,
            "tan" => Tan,
            "cot" => Cot,
            "sec" => Sec,
            "csc" => Csc,
            "arcsin" | "asin" => Arcsin,
            "arccos" | "acos" => Arccos,
            "arctan" | "atan" => Arctan,
            "sinh" => Sinh,
            "cosh" => Cosh,
            "tanh" => Tanh,
            "ln" => Ln,
            "exp" => Exp,
            _ => return None,
        };
        Some(f)
    }

    /// Réciproque pour la notation \sin^{-1}.
    pub fn reciproque(self) -> Option<Self> {
        use Fonction::*;
        match self {
            Sin => Some(Arcsin),
            Cos => Some(Arccos),
            Tan => Some(Arctan),
            Arcsin => Some(Sin),
            Arccos => Some(Cos),
            Arctan => Some(Tan),
            Ln => Some(Exp),
            Exp => Some(Ln),
            _ => None,
        }
    }

    pub fn nom(self) -> &'static str {
        use Fonction::*;
        match self {
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Cot => "cot",
            Sec => "sec",
            Csc => "csc",
            Arcsin => "arcsin",
            Arccos => "arccos",
            Arctan => "arctan",
            Sinh => "sinh",
            Cosh => "cosh",
            Tanh => "tanh",
            Ln => "ln",
            Exp => "exp",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Rat(BigRational),
    Pi,
    E,
    Indefini,

    Var(String),

    Sqrt(Box<Expr>),            // √(x)
    Pow(Box<Expr>, Box<Expr>),  // x^y
    Fonc(Fonction, Box<Expr>),  // sin(x), ln(x), ...
    Log(Box<Expr>, Box<Expr>),  // log_b(x) : (base, argument)
    Abs(Box<Expr>),             // |x|
    Factorielle(Box<Expr>),     // x!

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn entier(n: i64) -> Expr {
        Expr::Rat(BigRational::from_integer(BigInt::from(n)))
    }

    /// Simplification locale (SAFE), sans heuristiques.
    /// Objectif: réduire ce qui est strictement démontrable sans exploser l’arbre.
    pub fn simplify(self) -> Expr {
        use Expr::*;

        match self {
            // Feuilles: aucune simplification à faire
            Rat(_) | Pi | E | Indefini | Var(_) => self,

            Add(a, b) => {
                let a = a.simplify();
                let b = b.simplify();
                match (&a, &b) {
                    (Indefini, _) | (_, Indefini) => Indefini,
                    (Rat(x), Rat(y)) => Rat(x + y),
                    (Rat(x), _) if x.is_zero() => b,
                    (_, Rat(y)) if y.is_zero() => a,
                    _ => Add(Box::new(a), Box::new(b)),
                }
            }

            Sub(a, b) => {
                let a = a.simplify();
                let b = b.simplify();

                if matches!(a, Indefini) || matches!(b, Indefini) {
                    return Indefini;
                }

                // x - x => 0 (renforce la normalisation)
                if a == b {
                    return Rat(BigRational::zero());
                }

                match (&a, &b) {
                    (Rat(x), Rat(y)) => Rat(x - y),
                    (_, Rat(y)) if y.is_zero() => a,
                    // 0 - b => on garde Sub(0,b) (forme “moins unaire”, utile pour coeff·π)
                    _ => Sub(Box::new(a), Box::new(b)),
                }
            }

            Mul(a, b) => {
                let a = a.simplify();
                let b = b.simplify();

                if matches!(a, Indefini) || matches!(b, Indefini) {
                    return Indefini;
                }

                // √x * √x => x
                if let (Sqrt(x), Sqrt(y)) = (&a, &b) {
                    if x.as_ref() == y.as_ref() {
                        return (*x.clone()).simplify();
                    }
                }

                // √u * √v => √(u*v) si u,v rationnels >= 0
                if let (Sqrt(u), Sqrt(v)) = (&a, &b) {
                    if let (Rat(ru), Rat(rv)) = (u.as_ref(), v.as_ref()) {
                        if !ru.is_negative() && !rv.is_negative() {
                            return Sqrt(Box::new(Rat(ru * rv))).simplify();
                        }
                    }
                }

                match (&a, &b) {
                    (Rat(x), Rat(y)) => Rat(x * y),
                    (Rat(x), _) if x.is_zero() => Rat(BigRational::zero()),
                    (_, Rat(y)) if y.is_zero() => Rat(BigRational::zero()),
                    (Rat(x), _) if x.is_one() => b,
                    (_, Rat(y)) if y.is_one() => a,
                    _ => Mul(Box::new(a), Box::new(b)),
                }
            }

            Div(a, b) => {
                let a = a.simplify();
                let b = b.simplify();

                if matches!(a, Indefini) || matches!(b, Indefini) {
                    return Indefini;
                }

                // division par zéro exact : indéfini (1/0, 0/0)
                if let Rat(y) = &b {
                    if y.is_zero() {
                        return Indefini;
                    }
                }

                // √x / √x => 1 (si x rationnel non nul)
                if let (Sqrt(x), Sqrt(y)) = (&a, &b) {
                    if x.as_ref() == y.as_ref() {
                        if let Rat(r) = x.as_ref() {
                            if !r.is_zero() {
                                return Rat(BigRational::one());
                            }
                        }
                    }
                }

                match (&a, &b) {
                    (Rat(x), Rat(y)) => Rat(x / y),
                    (_, Rat(y)) if y.is_one() => a,
                    _ => Div(Box::new(a), Box::new(b)),
                }
            }

            Pow(base, exposant) => {
                let base = base.simplify();
                let exposant = exposant.simplify();

                if matches!(base, Indefini) || matches!(exposant, Indefini) {
                    return Indefini;
                }

                if let Rat(e) = &exposant {
                    if e.is_zero() {
                        return Rat(BigRational::one());
                    }
                    if e.is_one() {
                        return base;
                    }
                    if *e == BigRational::new(BigInt::one(), BigInt::from(2)) {
                        return Sqrt(Box::new(base)).simplify();
                    }
                    if let (Rat(r), Some(n)) = (&base, exposant_entier_borne(e)) {
                        if taille_bits(r).saturating_mul(n.unsigned_abs()) > BITS_EXACTS_MAX {
                            return Pow(Box::new(base), Box::new(exposant));
                        }
                        if r.is_zero() && n < 0 {
                            return Indefini;
                        }
                        return Rat(rational_pow_int(r.clone(), n));
                    }
                }

                Pow(Box::new(base), Box::new(exposant))
            }

            Sqrt(x) => {
                let x = x.simplify();
                if matches!(x, Indefini) {
                    return Indefini;
                }
                if let Rat(r) = &x {
                    if let Some(s) = rational_sqrt_exact(r) {
                        return Rat(s);
                    }
                }
                Sqrt(Box::new(x))
            }

            Fonc(f, x) => {
                let x = x.simplify();
                if matches!(x, Indefini) {
                    return Indefini;
                }

                if matches!(f, Fonction::Sin | Fonction::Cos | Fonction::Tan) {
                    if let Some(v) = trig_special(&x, f) {
                        return v.simplify();
                    }
                }

                match (f, &x) {
                    (Fonction::Ln, Rat(r)) if r.is_one() => Rat(BigRational::zero()),
                    (Fonction::Ln, E) => Rat(BigRational::one()),
                    (Fonction::Exp, Rat(r)) if r.is_zero() => Rat(BigRational::one()),
                    _ => Fonc(f, Box::new(x)),
                }
            }

            Log(base, x) => {
                let base = base.simplify();
                let x = x.simplify();
                if matches!(base, Indefini) || matches!(x, Indefini) {
                    return Indefini;
                }
                if let Rat(r) = &x {
                    if r.is_one() {
                        return Rat(BigRational::zero());
                    }
                }
                if base == x && !matches!(x, Rat(_)) {
                    return Rat(BigRational::one());
                }
                Log(Box::new(base), Box::new(x))
            }

            Abs(x) => {
                let x = x.simplify();
                match x {
                    Indefini => Indefini,
                    Rat(r) => Rat(r.abs()),
                    Pi => Pi,
                    E => E,
                    autre => Abs(Box::new(autre)),
                }
            }

            Factorielle(x) => {
                let x = x.simplify();
                if matches!(x, Indefini) {
                    return Indefini;
                }
                if let Rat(r) = &x {
                    if r.is_integer() {
                        if r.is_negative() {
                            // (-n)! : pôle de Γ
                            return Indefini;
                        }
                        if let Some(n) = r.to_integer().to_u64() {
                            if n <= FACTORIELLE_EXACTE_MAX {
                                return Rat(BigRational::from_integer(factorielle(n)));
                            }
                        }
                    }
                }
                Factorielle(Box::new(x))
            }
        }
    }

    /// Détecte un coeff·π rationnel (π, 3π/2, π/4 + 2π, -π, 0...).
    ///
    /// SAFE: Var => None (on ne “devine” rien).
    pub fn as_coeff_pi(&self) -> Option<BigRational> {
        use Expr::*;

        match self {
            Pi => Some(BigRational::one()),
            Rat(r) if r.is_zero() => Some(BigRational::zero()),

            Mul(a, b) => match (a.as_ref(), b.as_ref()) {
                (Rat(r), autre) | (autre, Rat(r)) => autre.as_coeff_pi().map(|c| c * r),
                _ => None,
            },

            Div(a, b) => match b.as_ref() {
                Rat(r) if !r.is_zero() => a.as_coeff_pi().map(|c| c / r),
                _ => None,
            },

            Add(a, b) => Some(a.as_coeff_pi()? + b.as_coeff_pi()?),
            Sub(a, b) => Some(a.as_coeff_pi()? - b.as_coeff_pi()?),

            _ => None,
        }
    }
}

/* ------------------------ Affichage debug (journal) ------------------------ */

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Rat(r) => {
                let n = r.numer();
                let d = r.denom();
                if d.is_one() {
                    write!(f, "{n}")
                } else {
                    write!(f, "{n}/{d}")
                }
            }
            Pi => write!(f, "π"),
            E => write!(f, "e"),
            Indefini => write!(f, "indéfini"),
            Var(s) => write!(f, "{s}"),
            Sqrt(x) => write!(f, "√({x})"),
            Pow(x, n) => write!(f, "({x})^({n})"),
            Fonc(g, x) => write!(f, "{}({x})", g.nom()),
            Log(b, x) => write!(f, "log_{b}({x})"),
            Abs(x) => write!(f, "|{x}|"),
            Factorielle(x) => write!(f, "({x})!"),
            Add(a, b) => write!(f, "({a}+{b})"),
            Sub(a, b) => write!(f, "({a}-{b})"),
            Mul(a, b) => write!(f, "({a}*{b})"),
            Div(a, b) => write!(f, "({a}/{b})"),
        }
    }
}

/* ------------------------ Outils rationnels (utilisés par simplify) ------------------------ */

fn taille_bits(r: &BigRational) -> u64 {
    r.numer().bits() + r.denom().bits()
}

fn exposant_entier_borne(e: &BigRational) -> Option<i64> {
    if !e.is_integer() {
        return None;
    }
    let n = e.to_integer().to_i64()?;
    if n.abs() <= EXPOSANT_EXACT_MAX {
        Some(n)
    } else {
        None
    }
}

fn factorielle(n: u64) -> BigInt {
    (2..=n).fold(BigInt::one(), |acc, k| acc * k)
}

pub(crate) fn rational_pow_int(base: BigRational, exp: i64) -> BigRational {
    if exp == 0 {
        return BigRational::one();
    }
    if exp < 0 {
        let pos = rational_pow_int(base, -exp);
        return BigRational::one() / pos;
    }

    let mut e = exp as u64;
    let mut acc = BigRational::one();
    let mut b = base;

    while e > 0 {
        if (e & 1) == 1 {
            acc *= b.clone();
        }
        e >>= 1;
        if e > 0 {
            b *= b.clone();
        }
    }
    acc
}

fn rational_sqrt_exact(r: &BigRational) -> Option<BigRational> {
    if r.is_negative() {
        return None;
    }
    let n = r.numer();
    let d = r.denom();
    let sn = int_sqrt_exact(n)?;
    let sd = int_sqrt_exact(d)?;
    Some(BigRational::new(sn, sd))
}

fn int_sqrt_exact(x: &BigInt) -> Option<BigInt> {
    if x.is_negative() {
        return None;
    }
    let s = int_sqrt_floor(x);
    if &s * &s == *x {
        Some(s)
    } else {
        None
    }
}

fn int_sqrt_floor(x: &BigInt) -> BigInt {
    if x.is_zero() || x.is_negative() {
        return BigInt::zero();
    }

    let mut y = approx_sqrt_start(x);
    loop {
        let y_next = (&y + (x / &y)) >> 1;
        if y_next >= y {
            let mut z = y_next;
            while (&z + 1u32) * (&z + 1u32) <= *x {
                z += 1u32;
            }
            while &z * &z > *x {
                z -= 1u32;
            }
            return z;
        }
        y = y_next;
    }
}

fn approx_sqrt_start(x: &BigInt) -> BigInt {
    let bits = x.bits();
    let half = bits.div_ceil(2);
    BigInt::one() << half
}
