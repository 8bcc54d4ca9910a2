// src/latex/symboles.rs
//
// Tables de correspondance commandes LaTeX -> sens.
// Une seule source de vérité pour le noyau ET l’aperçu.

/// Lettres grecques (minuscules + majuscules distinctes du latin) et constantes nommées.
pub fn symbole(nom: &str) -> Option<char> {
    let c = match nom {
        "alpha" => 'α',
        "beta" => 'β',
        "gamma" => 'γ',
        "delta" => 'δ',
        "epsilon" => 'ϵ',
        "varepsilon" => 'ε',
        "zeta" => 'ζ',
        "eta" => 'η',
        "theta" => 'θ',
        "vartheta" => 'ϑ',
        "iota" => 'ι',
        "kappa" => 'κ',
        "lambda" => 'λ',
        "mu" => 'μ',
        "nu" => 'ν',
        "xi" => 'ξ',
        "pi" => 'π',
        "varpi" => 'ϖ',
        "rho" => 'ρ',
        "sigma" => 'σ',
        "tau" => 'τ',
        "upsilon" => 'υ',
        "phi" => 'ϕ',
        "varphi" => 'φ',
        "chi" => 'χ',
        "psi" => 'ψ',
        "omega" => 'ω',
        "Gamma" => 'Γ',
        "Delta" => 'Δ',
        "Theta" => 'Θ',
        "Lambda" => 'Λ',
        "Xi" => 'Ξ',
        "Pi" => 'Π',
        "Sigma" => 'Σ',
        "Upsilon" => 'Υ',
        "Phi" => 'Φ',
        "Psi" => 'Ψ',
        "Omega" => 'Ω',
        "infty" => '∞',
        _ => return None,
    };
    Some(c)
}

/// Opérateurs binaires et relations écrits en commande (\cdot, \leq, ...).
pub fn operateur(nom: &str) -> Option<char> {
    let c = match nom {
        "cdot" => '·',
        "times" => '×',
        "div" => '÷',
        "pm" => '±',
        "mp" => '∓',
        "ast" => '*',
        "leq" | "le" => '≤',
        "geq" | "ge" => '≥',
        "neq" | "ne" => '≠',
        "lt" => '<',
        "gt" => '>',
        "approx" => '≈',
        _ => return None,
    };
    Some(c)
}

/// Fonctions “opérateur” composées en romain (\sin, \log, ...).
pub fn est_fonction(nom: &str) -> bool {
    matches!(
        nom,
        "sin"
            | "cos"
            | "tan"
            | "cot"
            | "sec"
            | "csc"
            | "arcsin"
            | "arccos"
            | "arctan"
            | "sinh"
            | "cosh"
            | "tanh"
            | "ln"
            | "log"
            | "exp"
    )
}

/// Espaces explicites, en em.
pub fn espace(nom: &str) -> Option<f32> {
    let em = match nom {
        "," => 3.0 / 18.0,
        ":" | ">" => 4.0 / 18.0,
        ";" => 5.0 / 18.0,
        "!" => -3.0 / 18.0,
        " " => 1.0 / 3.0,
        "quad" => 1.0,
        "qquad" => 2.0,
        _ => return None,
    };
    Some(em)
}

/// Délimiteurs acceptés après \left / \right. `None` = délimiteur vide (\left.).
pub fn delimiteur(nom: &str) -> Option<Option<char>> {
    let d = match nom {
        "(" => Some('('),
        ")" => Some(')'),
        "[" => Some('['),
        "]" => Some(']'),
        "|" => Some('|'),
        "{" | "lbrace" => Some('{'),
        "}" | "rbrace" => Some('}'),
        "langle" => Some('⟨'),
        "rangle" => Some('⟩'),
        "lvert" | "rvert" | "vert" => Some('|'),
        "." => None,
        _ => return None,
    };
    Some(d)
}
