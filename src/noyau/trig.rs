// src/noyau/trig.rs
//
// Trig spéciale (angles “exactement reconnus”) pour sin/cos/tan
// -----------------------------------------------------------
// - Extraction coeff·π via as_coeff_pi()
// - Réduction modulo période via mod_rationnel() (sin/cos: 2 ; tan: 1)
// - Table angles spéciaux sur n ∈ {1,2,3,4,6}
//
// Hors table : None, l’évaluation numérique prend le relais.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

use super::expr::{Expr, Fonction};

/// Valeur exacte de f(x) si x est un angle spécial (multiple rationnel de π).
///
/// Retour:
/// - Some(expr_exact) si reconnu (Expr::Indefini pour tan(π/2), tan(3π/2))
/// - None si non reconnu ou si `f` n’est pas sin/cos/tan
pub fn trig_special(x: &Expr, f: Fonction) -> Option<Expr> {
    // 1) extraire coeff·π
    let coeff = x.as_coeff_pi()?;

    // 2) réduire modulo période
    let coeff_reduit = match f {
        Fonction::Sin | Fonction::Cos => mod_rationnel(&coeff, 2),
        Fonction::Tan => mod_rationnel(&coeff, 1),
        _ => return None,
    };

    // 3) convertir en k/n "petit"
    let (k, n) = rational_to_small_kn(&coeff_reduit)?; // k/n

    // 4) réduction modulo 2π : k mod (2n) (tables codées sur [0,2π))
    let k_mod = k.rem_euclid(2 * n);

    // Constructeurs
    let rat = |a: i64, b: i64| Expr::Rat(BigRational::new(BigInt::from(a), BigInt::from(b)));
    let sub0 = |e: Expr| Expr::Sub(Box::new(rat(0, 1)), Box::new(e));
    let racine = |a: i64| Expr::Sqrt(Box::new(Expr::entier(a)));
    let sur = |e: Expr, d: i64| Expr::Div(Box::new(e), Box::new(Expr::entier(d)));

    let a = (k_mod, n);

    let v = match f {
        Fonction::Sin => match a {
            (0, _) | (1, 1) | (2, 1) => rat(0, 1),
            (1, 6) | (5, 6) => rat(1, 2),
            (7, 6) | (11, 6) => rat(-1, 2),
            (1, 4) | (3, 4) => sur(racine(2), 2),
            (5, 4) | (7, 4) => sub0(sur(racine(2), 2)),
            (1, 3) | (2, 3) => sur(racine(3), 2),
            (4, 3) | (5, 3) => sub0(sur(racine(3), 2)),
            (1, 2) => rat(1, 1),
            (3, 2) => rat(-1, 1),
            _ => return None,
        },

        Fonction::Cos => match a {
            (0, _) | (2, 1) => rat(1, 1),
            (1, 1) => rat(-1, 1),
            (1, 6) | (11, 6) => sur(racine(3), 2),
            (5, 6) | (7, 6) => sub0(sur(racine(3), 2)),
            (1, 4) | (7, 4) => sur(racine(2), 2),
            (3, 4) | (5, 4) => sub0(sur(racine(2), 2)),
            (1, 3) | (5, 3) => rat(1, 2),
            (2, 3) | (4, 3) => rat(-1, 2),
            (1, 2) | (3, 2) => rat(0, 1),
            _ => return None,
        },

        Fonction::Tan => match a {
            (0, _) | (1, 1) | (2, 1) => rat(0, 1),
            (1, 6) | (7, 6) => sur(racine(3), 3),
            (5, 6) | (11, 6) => sub0(sur(racine(3), 3)),
            (1, 4) | (5, 4) => rat(1, 1),
            (3, 4) | (7, 4) => rat(-1, 1),
            (1, 3) | (4, 3) => racine(3),
            (2, 3) | (5, 3) => sub0(racine(3)),
            (1, 2) | (3, 2) => Expr::Indefini,
            _ => return None,
        },

        _ => return None,
    };

    Some(v)
}

/* ------------------------ Outils ------------------------ */

/// Réduction modulo `periode` sur un coefficient rationnel.
/// Retourne un rationnel dans [0, periode).
///
/// Si coeff = n/d, alors coeff mod periode = (n mod (periode*d))/d.
fn mod_rationnel(coeff: &BigRational, periode: i64) -> BigRational {
    if periode <= 0 || coeff.is_zero() {
        return coeff.clone();
    }

    let d = coeff.denom().clone(); // denom > 0 (num_rational)
    let n = coeff.numer().clone();
    let m = BigInt::from(periode) * &d;

    let mut r = &n % &m;
    if r.is_negative() {
        r += &m;
    }
    BigRational::new(r, d)
}

/// Convertit un rationnel en (k,n) i64 réduit.
/// Accepte seulement n ∈ {1,2,3,4,6}.
fn rational_to_small_kn(r: &BigRational) -> Option<(i64, i64)> {
    let denom = r.denom().to_i64()?;
    let numer = r.numer().to_i64()?;

    let g = gcd_i64(numer.abs(), denom.abs());
    if g == 0 {
        return None;
    }
    let k = numer / g;
    let n = denom / g;

    if [1, 2, 3, 4, 6].contains(&n) {
        Some((k, n))
    } else {
        None
    }
}

fn gcd_i64(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a.abs()
}
