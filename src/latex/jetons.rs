// src/latex/jetons.rs

use super::ErreurLatex;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Jeton {
    /// Chiffres et point décimal, tels quels ("3.14").
    Nombre(String),
    Lettre(char),

    /// Mot de contrôle (\frac -> "frac") ou symbole de contrôle (\, -> ",").
    Commande(String),

    AccOuvrante,
    AccFermante,
    ParOuvrante,
    ParFermante,
    CrochetOuvrant,
    CrochetFermant,

    Chapeau,  // ^
    Souligne, // _

    /// Opérateurs et ponctuation : + - * / = < > ! , | ' . et équivalents unicode.
    Symbole(char),

    /// Contenu brut d’un argument texte (\text{...}, \operatorname{...}), espaces compris.
    Brut(String),
}

/// Commandes dont l’argument est lu tel quel (pas de tokenisation math).
fn prend_texte_brut(nom: &str) -> bool {
    matches!(nom, "text" | "textrm" | "mathrm" | "mbox" | "operatorname")
}

/// Tokenize une formule LaTeX (mode math).
/// Supporte:
/// - nombres décimaux (ex: 12, 3.14, .5)
/// - lettres isolées (ASCII + alphabétiques unicode)
/// - mots de contrôle \[a-zA-Z]+ et symboles de contrôle \x
/// - { } ( ) [ ] ^ _
/// - + - * / = < > ! , | '
/// - raccourcis unicode : π, √, ×, ·, ÷, −, ≤, ≥, ≠
/// - ~ (espace insécable) => Commande(",")
pub fn tokenize(s: &str) -> Result<Vec<Jeton>, ErreurLatex> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Commandes
        if c == '\\' {
            i += 1;
            let Some(&d) = chars.get(i) else {
                return Err(ErreurLatex::CaractereInattendu('\\'));
            };
            if d.is_ascii_alphabetic() {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_alphabetic() {
                    i += 1;
                }
                let nom: String = chars[start..i].iter().collect();
                let brut = prend_texte_brut(&nom);
                out.push(Jeton::Commande(nom));
                if brut {
                    i = lire_brut(&chars, i, &mut out)?;
                }
            } else {
                out.push(Jeton::Commande(d.to_string()));
                i += 1;
            }
            continue;
        }

        // Structure
        let structure = match c {
            '{' => Some(Jeton::AccOuvrante),
            '}' => Some(Jeton::AccFermante),
            '(' => Some(Jeton::ParOuvrante),
            ')' => Some(Jeton::ParFermante),
            '[' => Some(Jeton::CrochetOuvrant),
            ']' => Some(Jeton::CrochetFermant),
            '^' => Some(Jeton::Chapeau),
            '_' => Some(Jeton::Souligne),
            '~' => Some(Jeton::Commande(",".into())),
            _ => None,
        };
        if let Some(j) = structure {
            out.push(j);
            i += 1;
            continue;
        }

        // Opérateurs
        match c {
            '+' | '-' | '*' | '/' | '=' | '<' | '>' | '!' | ',' | '|' | '\'' => {
                out.push(Jeton::Symbole(c));
                i += 1;
                continue;
            }
            '−' => {
                out.push(Jeton::Symbole('-'));
                i += 1;
                continue;
            }
            '×' | '·' | '÷' | '≤' | '≥' | '≠' => {
                out.push(Jeton::Symbole(c));
                i += 1;
                continue;
            }
            _ => {}
        }

        // Raccourcis unicode
        if c == 'π' {
            out.push(Jeton::Commande("pi".into()));
            i += 1;
            continue;
        }
        if c == '√' {
            out.push(Jeton::Commande("sqrt".into()));
            i += 1;
            continue;
        }

        // Nombre décimal : chiffres + au plus un point (vérifié par le noyau)
        if c.is_ascii_digit() || (c == '.' && chars.get(i + 1).is_some_and(|d| d.is_ascii_digit()))
        {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            out.push(Jeton::Nombre(chars[start..i].iter().collect()));
            continue;
        }

        // Lettres : une par jeton (en mode math, "xy" = x·y)
        if c.is_alphabetic() {
            out.push(Jeton::Lettre(c));
            i += 1;
            continue;
        }

        // Point isolé (ex: délimiteur vide de \left.)
        if c == '.' {
            out.push(Jeton::Symbole('.'));
            i += 1;
            continue;
        }

        return Err(ErreurLatex::CaractereInattendu(c));
    }

    Ok(out)
}

/// Lit `{...}` brut (accolades équilibrées) à partir de `i` et pousse `Jeton::Brut`.
/// Sans accolade ouvrante, ne consomme rien : l’analyseur signalera l’argument manquant.
fn lire_brut(chars: &[char], mut i: usize, out: &mut Vec<Jeton>) -> Result<usize, ErreurLatex> {
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    if chars.get(i) != Some(&'{') {
        return Ok(i);
    }
    i += 1;
    let start = i;
    let mut profondeur = 1usize;
    while i < chars.len() {
        match chars[i] {
            '{' => profondeur += 1,
            '}' => {
                profondeur -= 1;
                if profondeur == 0 {
                    out.push(Jeton::Brut(chars[start..i].iter().collect()));
                    return Ok(i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }
    Err(ErreurLatex::AccoladeNonFermee)
}
