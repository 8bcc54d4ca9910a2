//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : trouver les limites sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//!
//! Notes (aligné avec l’état actuel du noyau) :
//! - Les angles spéciaux k·π/n (n ∈ {1,2,3,4,6}) sont reconnus exactement ;
//!   tan(π/2) est donc indéfini (=> "Invalid Expression") et non un grand flottant.
//! - Les égalités sont numériques : chaque membre est arrondi à 10 chiffres
//!   significatifs, puis |g - d| < 1e-10.

use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;

use super::eval::calculer_texte;
use super::EXPRESSION_INVALIDE;

fn eval_ok(expr: &str) -> String {
    let (texte, erreur) = calculer_texte(expr);
    assert!(!erreur, "expr={expr:?} refusée");
    texte
}

fn assert_invalide(expr: &str) {
    let (texte, erreur) = calculer_texte(expr);
    assert!(erreur, "expr={expr:?} aurait dû être refusée, obtenu {texte:?}");
    assert_eq!(texte, EXPRESSION_INVALIDE, "expr={expr:?}");
}

fn assert_valeur(expr: &str, attendu: &str) {
    assert_eq!(eval_ok(expr), attendu, "expr={expr:?}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Invariants trig (angles spéciaux) ------------------------ */

#[test]
fn sci_indefinis_tan() {
    assert_invalide(r"\tan(\frac{\pi}{2})");
    assert_invalide(r"\tan(\frac{3\pi}{2})");
    assert_invalide(r"\tan\left(-\frac{\pi}{2}\right)");
}

#[test]
fn sci_identites_symetrie() {
    // sin(-x) = -sin(x)
    assert_valeur(r"\sin(-\frac{\pi}{4})", "-0.7071067812");
    assert_valeur(r"\sin(\frac{\pi}{4})", "0.7071067812");

    // cos(-x) = cos(x)
    assert_valeur(r"\cos(-\frac{\pi}{3})", "0.5");
    assert_valeur(r"\cos(\frac{\pi}{3})", "0.5");

    // tan(-x) = -tan(x)
    assert_valeur(r"\tan(-\frac{\pi}{6})", "-0.5773502692");
    assert_valeur(r"\tan(\frac{\pi}{6})", "0.5773502692");
}

#[test]
fn sci_periodicite_angles() {
    // sin(x + 2π) = sin(x)
    assert_valeur(r"\sin(\frac{9\pi}{4})", "0.7071067812");
    assert_valeur(r"\sin(\frac{\pi}{4}+2\pi)", "0.7071067812");

    // cos(x + 2π) = cos(x)
    assert_valeur(r"\cos(\frac{7\pi}{3})", "0.5");

    // tan(x + π) = tan(x)
    assert_valeur(r"\tan(\frac{7\pi}{6})", "0.5773502692");
}

#[test]
fn sci_zeros_exacts() {
    // pas de -0, pas de 1.2e-16
    assert_valeur(r"\sin(\pi)", "0");
    assert_valeur(r"\cos(\frac{\pi}{2})", "0");
    assert_valeur(r"\sin(-\pi)", "0");
    assert_valeur(r"-\sin(2\pi)", "0");
}

#[test]
fn sci_propagation_indefini() {
    assert_invalide(r"1 + \tan(\frac{\pi}{2})");
    assert_invalide(r"\tan(\frac{\pi}{2}) + 1");
    assert_invalide(r"2 \cdot \tan(\frac{\pi}{2})");
    assert_invalide(r"\tan(\frac{\pi}{2}) \div 3");
    assert_invalide(r"0 \cdot \tan(\frac{\pi}{2})");
}

/* ------------------------ Cohérence algébrique (zéro) ------------------------ */

#[test]
fn sci_zero_algebrique() {
    assert_valeur(r"(\frac{1}{2} + \frac{1}{3}) - \frac{5}{6}", "0");
    assert_valeur(r"\frac{2}{3} \cdot \frac{3}{4} - \frac{1}{2}", "0");
    assert_valeur(r"\sqrt{2}\sqrt{2} - 2", "0");
}

#[test]
fn sci_egalites_numeriques() {
    assert_valeur(r"\frac{1}{\sqrt{3}} = \frac{\sqrt{3}}{3}", "True");
    assert_valeur(r"\sin^2(\frac{\pi}{5}) + \cos^2(\frac{\pi}{5}) = 1", "True");
    assert_valeur(r"e^{\ln 2} = 2", "True");
    assert_valeur(r"\sqrt{2} = 1.414", "False");
    assert_valeur(r"\frac{22}{7} = \pi", "False");
}

#[test]
fn sci_arrondi_dix_chiffres() {
    assert_valeur(r"2\pi", "6.283185307");
    assert_valeur(r"\frac{2}{3}", "0.6666666667");
    assert_valeur(r"\sqrt{2}", "1.414213562");
    assert_valeur("123456789012", "123456789000");
    assert_valeur("0.1+0.2", "0.3");
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_profondeur_sqrt_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // alterne √ et ^2 pour rester sur des carrés parfaits (exact)
    let mut expr = "4".to_string();
    for k in 0..60 {
        expr = if k % 2 == 0 {
            format!(r"\sqrt{{{expr}}}")
        } else {
            format!("({expr})^2")
        };
        budget(t0, max);
    }

    assert_valeur(&expr, "4");
}

#[test]
fn sci_stress_taille_somme_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut expr = String::new();
    for k in 0..80 {
        if k > 0 {
            expr.push_str(" + ");
        }
        expr.push_str(r"\frac{1}{2}");
        budget(t0, max);
    }

    // 80*(1/2)=40
    assert_valeur(&expr, "40");
}

#[test]
fn sci_stress_bigint_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // gros numérateur contrôlé (100 chiffres) : (10^100 - 1 + 1)/10^99 = 10
    let big = "9".repeat(100);
    let dix = format!("1{}", "0".repeat(99));
    let expr = format!(r"\frac{{{big} + 1}}{{{dix}}}");
    budget(t0, max);

    assert_valeur(&expr, "10");
}

#[test]
fn sci_stress_imbrication_refusee() {
    // au-delà de la profondeur permise : refus propre, pas de débordement de pile
    let expr = format!("{}1{}", r"\sqrt{".repeat(400), "}".repeat(400));
    assert_invalide(&expr);
}

#[test]
fn sci_stress_parentheses_profondes_refusees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    let n = 20_000;
    let expr = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert_invalide(&expr);
    budget(t0, max);
}

#[test]
fn sci_stress_fonctions_imbriquees_refusees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    let expr = format!("{}0", r"\sin ".repeat(20_000));
    assert_invalide(&expr);
    budget(t0, max);
}

#[test]
fn sci_stress_factorielles_refusees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    let expr = format!("1{}", "!".repeat(100_000));
    assert_invalide(&expr);
    budget(t0, max);
}
