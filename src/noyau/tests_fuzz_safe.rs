//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - on accepte certaines erreurs attendues (division par zéro, tan(π/2), etc.)
//! - invariant clé : jamais de panique, sortie = décimal valide OU "Invalid Expression"

use std::time::{Duration, Instant};

use super::eval::calculer_texte;
use super::{calculer, ErreurCalcul, Resultat, EXPRESSION_INVALIDE};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(e: &ErreurCalcul) -> bool {
    // Liste blanche : erreurs *normales* pour un fuzz sur un domaine volontairement limité.
    matches!(
        e,
        ErreurCalcul::Indefini | ErreurCalcul::Complexe | ErreurCalcul::NonFini
    )
}

/// Un résultat décimal doit relire comme un f64 fini, sans zéros finaux ni "-0".
fn check_forme_decimale(s: &str) {
    let v: f64 = s
        .parse()
        .unwrap_or_else(|_| panic!("sortie non décimale: {s:?}"));
    assert!(v.is_finite(), "sortie non finie: {s:?}");
    assert_ne!(s, "-0");
    if s.contains('.') {
        assert!(!s.ends_with('0') && !s.ends_with('.'), "zéros finaux: {s:?}");
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_rat(rng: &mut Rng) -> String {
    // rationnels simples, incluant 0 (utile pour tester zéros)
    let a = rng.pick(8);

    // éviter dénominateur 0 ici; la division par zéro doit arriver via \frac{…}{expr}
    let b = 1 + rng.pick(8);

    if rng.coin() {
        format!(r"\frac{{{a}}}{{{b}}}")
    } else {
        format!("{a}")
    }
}

fn gen_coeff_pi(rng: &mut Rng) -> String {
    // coeffs raisonnables, pour rester dans le domaine des angles spéciaux
    let k = rng.pick(14) as i64 - 6;

    let d = match rng.pick(6) {
        0 => 1,
        1 => 2,
        2 => 3,
        3 => 4,
        4 => 6,
        _ => 12,
    };

    if d == 1 {
        format!(r"{k}\pi")
    } else {
        format!(r"\frac{{{k}\pi}}{{{d}}}")
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => gen_rat(rng),
        1 => r"\pi".to_string(),
        2 => format!("({})", gen_coeff_pi(rng)),
        3 => r"\sqrt{2}".to_string(),
        4 => "0.25".to_string(),
        _ => r"\sqrt{3}".to_string(),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(10) {
        0 => gen_atom(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!(
            r"({} \cdot {})",
            gen_expr(rng, depth - 1),
            gen_expr(rng, depth - 1)
        ),
        4 => format!(
            r"\frac{{{}}}{{{}}}",
            gen_expr(rng, depth - 1),
            gen_expr(rng, depth - 1)
        ),
        5 => format!(r"\sin({})", gen_coeff_pi(rng)), // angle contrôlé
        6 => format!(r"\cos({})", gen_coeff_pi(rng)),
        7 => format!(r"\tan({})", gen_coeff_pi(rng)),
        8 => format!("-{}", gen_atom(rng)),
        _ => {
            if rng.coin() {
                r"\sqrt{2}".to_string()
            } else {
                r"\sqrt{3}".to_string()
            }
        }
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_forme_sortie() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..120 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);

        match calculer(&expr) {
            Ok(Resultat::Valeur(s)) => {
                check_forme_decimale(&s);
                // même entrée, même sortie
                assert_eq!(calculer(&expr), Ok(Resultat::Valeur(s)));
                seen_ok += 1;
            }
            Ok(Resultat::Booleen(_)) => panic!("booléen sans '=' : expr={expr:?}"),
            Err(e) => {
                assert!(
                    is_erreur_attendue(&e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_egalite_reflexive() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..60 {
        budget(t0, max);

        let a = gen_expr(&mut rng, 3);
        let expr = format!("{a}={a}");

        match calculer(&expr) {
            // x = x est toujours vrai quand x est défini
            Ok(r) => assert_eq!(r, Resultat::Booleen(true), "expr={expr:?}"),
            Err(e) => assert!(
                is_erreur_attendue(&e),
                "erreur non attendue: expr={expr:?} err={e}"
            ),
        }
    }
}

#[test]
fn fuzz_safe_bruit_ascii_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    let alphabet: Vec<char> = r"0123456789+-*/^_{}()[]|!=.\ fracsqrtpi".chars().collect();
    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..300 {
        budget(t0, max);

        let n = 1 + rng.pick(24) as usize;
        let s: String = (0..n)
            .map(|_| alphabet[rng.pick(alphabet.len() as u32) as usize])
            .collect();

        // seule exigence : une réponse, jamais de panique
        let (texte, erreur) = calculer_texte(&s);
        if erreur {
            assert_eq!(texte, EXPRESSION_INVALIDE);
        } else {
            assert!(!texte.is_empty(), "sortie vide pour {s:?}");
        }
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1000);

    let expr = somme_balancee(r"\frac{1}{2}", 800);
    budget(t0, max);

    // 800*(1/2) = 400
    assert_eq!(calculer(&expr), Ok(Resultat::Valeur("400".into())));
}
