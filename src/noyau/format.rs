// src/noyau/format.rs
//
// Mise en forme du résultat affiché.
// - arrondi à 10 chiffres significatifs (via notation scientifique)
// - écriture à 10 décimales, zéros finaux puis point final retirés
// - "-0" normalisé en "0"

pub const CHIFFRES_SIGNIFICATIFS: usize = 10;
pub const DECIMALES: usize = 10;

/// Arrondit `v` à `chiffres` chiffres significatifs.
pub fn arrondir_significatif(v: f64, chiffres: usize) -> f64 {
    if v == 0.0 || !v.is_finite() || chiffres == 0 {
        return v;
    }
    // "{:.9e}" => 1.234567890e3 : 10 chiffres significatifs
    format!("{:.*e}", chiffres - 1, v).parse().unwrap_or(v)
}

/// 0.5 -> "0.5" ; 2.0 -> "2" ; 1/3 -> "0.3333333333"
pub fn formater_decimal(v: f64) -> String {
    let brut = format!("{:.*}", DECIMALES, v);
    let s = if brut.contains('.') {
        brut.trim_end_matches('0').trim_end_matches('.')
    } else {
        brut.as_str()
    };
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

pub fn formater_booleen(b: bool) -> &'static str {
    if b {
        "True"
    } else {
        "False"
    }
}
