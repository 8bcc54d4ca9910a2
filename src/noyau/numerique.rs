// src/noyau/numerique.rs
//
// Lecture numérique (f64) d’une Expr déjà simplifiée.
// - Les rationnels exacts sont convertis au dernier moment.
// - Domaine réel uniquement : √(négatif), ln(≤0), (négatif)^(non entier) => Complexe.
// - Tout résultat intermédiaire non fini => NonFini.

use std::f64::consts::{E as EULER, PI};

use num_rational::BigRational;
use num_traits::ToPrimitive;

use super::expr::{Expr, Fonction};
use super::ErreurCalcul;

/// Au-delà, n! déborde f64.
const FACTORIELLE_MAX: f64 = 170.0;

pub fn evaluer(expr: &Expr) -> Result<f64, ErreurCalcul> {
    use Expr::*;

    let v = match expr {
        Rat(r) => rat_vers_f64(r)?,
        Pi => PI,
        E => EULER,
        Indefini => return Err(ErreurCalcul::Indefini),
        Var(s) => return Err(ErreurCalcul::SymboleLibre(s.clone())),

        Sqrt(x) => {
            let v = evaluer(x)?;
            if v < 0.0 {
                return Err(ErreurCalcul::Complexe);
            }
            v.sqrt()
        }

        Pow(b, e) => puissance(evaluer(b)?, evaluer(e)?)?,

        Fonc(f, x) => appliquer(*f, evaluer(x)?)?,

        Log(b, x) => {
            let b = evaluer(b)?;
            let x = evaluer(x)?;
            if x <= 0.0 || b <= 0.0 {
                return Err(ErreurCalcul::Complexe);
            }
            if b == 1.0 {
                return Err(ErreurCalcul::Indefini);
            }
            x.ln() / b.ln()
        }

        Abs(x) => evaluer(x)?.abs(),

        Factorielle(x) => factorielle(evaluer(x)?)?,

        Add(a, b) => evaluer(a)? + evaluer(b)?,
        Sub(a, b) => evaluer(a)? - evaluer(b)?,
        Mul(a, b) => evaluer(a)? * evaluer(b)?,
        Div(a, b) => {
            let n = evaluer(a)?;
            let d = evaluer(b)?;
            if d == 0.0 {
                return Err(ErreurCalcul::Indefini);
            }
            n / d
        }
    };

    fini(v)
}

fn fini(v: f64) -> Result<f64, ErreurCalcul> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ErreurCalcul::NonFini)
    }
}

fn rat_vers_f64(r: &BigRational) -> Result<f64, ErreurCalcul> {
    r.to_f64()
        .filter(|v| v.is_finite())
        .ok_or(ErreurCalcul::NonFini)
}

fn puissance(b: f64, e: f64) -> Result<f64, ErreurCalcul> {
    if b < 0.0 && e.fract() != 0.0 {
        return Err(ErreurCalcul::Complexe);
    }
    if b == 0.0 && e < 0.0 {
        return Err(ErreurCalcul::Indefini);
    }
    Ok(b.powf(e))
}

fn factorielle(v: f64) -> Result<f64, ErreurCalcul> {
    if v.fract() != 0.0 {
        return Err(ErreurCalcul::NonSupporte("factorielle non entière".into()));
    }
    if v < 0.0 {
        return Err(ErreurCalcul::Indefini);
    }
    if v > FACTORIELLE_MAX {
        return Err(ErreurCalcul::NonFini);
    }
    Ok((2..=v as u32).fold(1.0, |acc, k| acc * k as f64))
}

fn appliquer(f: Fonction, x: f64) -> Result<f64, ErreurCalcul> {
    let v = match f {
        Fonction::Sin => x.sin(),
        Fonction::Cos => x.cos(),
        Fonction::Tan => x.tan(),
        Fonction::Cot => inverse(x.tan())?,
        Fonction::Sec => inverse(x.cos())?,
        Fonction::Csc => inverse(x.sin())?,

        Fonction::Arcsin | Fonction::Arccos if !(-1.0..=1.0).contains(&x) => {
            return Err(ErreurCalcul::Complexe)
        }
        Fonction::Arcsin => x.asin(),
        Fonction::Arccos => x.acos(),
        Fonction::Arctan => x.atan(),

        Fonction::Sinh => x.sinh(),
        Fonction::Cosh => x.cosh(),
        Fonction::Tanh => x.tanh(),

        Fonction::Ln if x <= 0.0 => return Err(ErreurCalcul::Complexe),
        Fonction::Ln => x.ln(),
        Fonction::Exp => x.exp(),
    };
    fini(v)
}

fn inverse(d: f64) -> Result<f64, ErreurCalcul> {
    if d == 0.0 {
        return Err(ErreurCalcul::Indefini);
    }
    Ok(1.0 / d)
}
