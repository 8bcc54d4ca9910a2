// src/latex/syntaxe.rs
//
// Jetons -> arbre syntaxique (descente récursive)
// ------------------------------------------------
// - Les parenthèses simples ( ) [ ] restent À PLAT (Ouvrant/Fermant) :
//   l’aperçu les dessine telles quelles, le noyau les apparie lui-même.
// - \left ... \right produit un Delimite (contenu regroupé).
// - ^ et _ s’attachent au dernier noeud de la séquence (Scripts).
// - Argument de macro = groupe {…} OU un seul jeton (\frac12 => 1 et 2).

use super::jetons::{tokenize, Jeton};
use super::symboles;
use super::ErreurLatex;

/// Garde-fou : profondeur d’imbrication max (anti-débordement de pile).
const PROFONDEUR_MAX: usize = 256;

#[derive(Clone, Debug, PartialEq)]
pub enum Noeud {
    Nombre(String),
    Lettre(char),

    /// Lettre grecque ou constante nommée (\pi, \infty, ...).
    Symbole { nom: String, glyphe: char },

    /// Opérateur binaire, relation ou ponctuation (+, =, \cdot => '·', ...).
    Operateur(char),

    Ouvrant(char),
    Fermant(char),
    Barre, // |

    /// Fonction romaine (\sin, \ln, \operatorname{...}).
    Fonction(String),

    Groupe(Vec<Noeud>),
    Fraction(Box<Noeud>, Box<Noeud>),
    Binome(Box<Noeud>, Box<Noeud>),
    Racine {
        indice: Option<Box<Noeud>>,
        radicande: Box<Noeud>,
    },
    Scripts {
        base: Box<Noeud>,
        exposant: Option<Box<Noeud>>,
        indice: Option<Box<Noeud>>,
    },
    /// \left g ... \right d ; `None` = délimiteur vide (\left.).
    Delimite {
        gauche: Option<char>,
        droite: Option<char>,
        contenu: Vec<Noeud>,
    },

    Texte(String),

    /// Espace explicite, en em (peut être négatif : \!).
    Espace(f32),
}

impl Noeud {
    /// Vue “séquence” : un groupe donne ses enfants, tout autre noeud se donne lui-même.
    pub fn en_sequence(&self) -> &[Noeud] {
        match self {
            Noeud::Groupe(v) => v,
            autre => std::slice::from_ref(autre),
        }
    }
}

/// Analyse une formule LaTeX complète.
pub fn analyser(source: &str) -> Result<Vec<Noeud>, ErreurLatex> {
    let jetons = tokenize(source)?;
    if jetons.is_empty() {
        return Err(ErreurLatex::EntreeVide);
    }

    let mut a = Analyseur {
        jetons,
        pos: 0,
        profondeur: 0,
    };
    a.sequence(Fin::Entree)
}

/* ------------------------ Analyseur ------------------------ */

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Fin {
    Entree,
    Accolade,
    Crochet,
    Right,
}

struct Analyseur {
    jetons: Vec<Jeton>,
    pos: usize,
    profondeur: usize,
}

impl Analyseur {
    fn courant(&self) -> Option<&Jeton> {
        self.jetons.get(self.pos)
    }

    fn suivant(&mut self) -> Option<Jeton> {
        let j = self.jetons.get(self.pos).cloned();
        if j.is_some() {
            self.pos += 1;
        }
        j
    }

    fn entrer(&mut self) -> Result<(), ErreurLatex> {
        self.profondeur += 1;
        if self.profondeur > PROFONDEUR_MAX {
            return Err(ErreurLatex::TropProfond);
        }
        Ok(())
    }

    fn sortir(&mut self) {
        self.profondeur = self.profondeur.saturating_sub(1);
    }

    /// Lit des noeuds jusqu’à la fin attendue (consommée, sauf \right laissé à l’appelant).
    fn sequence(&mut self, fin: Fin) -> Result<Vec<Noeud>, ErreurLatex> {
        let mut out: Vec<Noeud> = Vec::new();

        loop {
            let Some(j) = self.courant() else {
                return match fin {
                    Fin::Entree => Ok(out),
                    Fin::Accolade => Err(ErreurLatex::AccoladeNonFermee),
                    Fin::Crochet => Err(ErreurLatex::ArgumentManquant("\\sqrt[".into())),
                    Fin::Right => Err(ErreurLatex::RightManquant),
                };
            };

            match j {
                Jeton::AccFermante => {
                    if fin == Fin::Accolade {
                        self.pos += 1;
                        return Ok(out);
                    }
                    return Err(ErreurLatex::AccoladeInattendue);
                }
                Jeton::CrochetFermant if fin == Fin::Crochet => {
                    self.pos += 1;
                    return Ok(out);
                }
                Jeton::Commande(nom) if nom == "right" => {
                    if fin == Fin::Right {
                        return Ok(out);
                    }
                    return Err(ErreurLatex::LeftManquant);
                }
                Jeton::Chapeau | Jeton::Souligne => {
                    let base = out.pop().ok_or(ErreurLatex::ScriptSansBase)?;
                    let n = self.attacher_script(base)?;
                    out.push(n);
                }
                _ => {
                    let n = self.primaire()?;
                    out.push(n);
                }
            }
        }
    }

    /// ^ ou _ courant : attache l’argument suivant à `base` (fusionne x_1^2).
    fn attacher_script(&mut self, base: Noeud) -> Result<Noeud, ErreurLatex> {
        let (base, mut exposant, mut indice) = match base {
            Noeud::Scripts {
                base,
                exposant,
                indice,
            } => (base, exposant, indice),
            autre => (Box::new(autre), None, None),
        };

        match self.suivant() {
            Some(Jeton::Chapeau) => {
                if exposant.is_some() {
                    return Err(ErreurLatex::ExposantDouble);
                }
                exposant = Some(Box::new(self.argument("^")?));
            }
            Some(Jeton::Souligne) => {
                if indice.is_some() {
                    return Err(ErreurLatex::IndiceDouble);
                }
                indice = Some(Box::new(self.argument("_")?));
            }
            _ => return Err(ErreurLatex::ScriptSansBase),
        }

        Ok(Noeud::Scripts {
            base,
            exposant,
            indice,
        })
    }

    /// Argument de macro : {groupe} ou un seul jeton.
    fn argument(&mut self, commande: &str) -> Result<Noeud, ErreurLatex> {
        let manquant = || ErreurLatex::ArgumentManquant(commande.to_string());

        match self.courant() {
            None => Err(manquant()),
            Some(Jeton::AccOuvrante) => {
                self.pos += 1;
                self.entrer()?;
                let v = self.sequence(Fin::Accolade);
                self.sortir();
                Ok(Noeud::Groupe(v?))
            }
            // \frac12 : un seul chiffre par argument, le reste reste dans le flux
            Some(Jeton::Nombre(s)) if s.chars().count() > 1 => {
                let mut it = s.chars();
                let premier = it.next().map(String::from).unwrap_or_default();
                let reste: String = it.collect();
                self.jetons[self.pos] = Jeton::Nombre(reste);
                Ok(Noeud::Nombre(premier))
            }
            Some(
                Jeton::AccFermante
                | Jeton::Chapeau
                | Jeton::Souligne
                | Jeton::CrochetFermant
                | Jeton::Brut(_),
            ) => Err(manquant()),
            Some(Jeton::Commande(nom)) if nom == "right" => Err(manquant()),
            Some(_) => self.primaire(),
        }
    }

    fn primaire(&mut self) -> Result<Noeud, ErreurLatex> {
        self.entrer()?;
        let r = self.primaire_interne();
        self.sortir();
        r
    }

    fn primaire_interne(&mut self) -> Result<Noeud, ErreurLatex> {
        let Some(j) = self.suivant() else {
            return Err(ErreurLatex::EntreeVide);
        };

        let n = match j {
            Jeton::Nombre(s) => Noeud::Nombre(s),
            Jeton::Lettre(c) => Noeud::Lettre(c),

            Jeton::AccOuvrante => Noeud::Groupe(self.sequence(Fin::Accolade)?),
            Jeton::AccFermante => return Err(ErreurLatex::AccoladeInattendue),

            Jeton::ParOuvrante => Noeud::Ouvrant('('),
            Jeton::ParFermante => Noeud::Fermant(')'),
            Jeton::CrochetOuvrant => Noeud::Ouvrant('['),
            Jeton::CrochetFermant => Noeud::Fermant(']'),

            Jeton::Chapeau | Jeton::Souligne => return Err(ErreurLatex::ScriptSansBase),

            Jeton::Symbole('|') => Noeud::Barre,
            Jeton::Symbole(c) => Noeud::Operateur(c),

            Jeton::Brut(s) => Noeud::Texte(s),

            Jeton::Commande(nom) => self.commande(nom)?,
        };

        Ok(n)
    }

    fn commande(&mut self, nom: String) -> Result<Noeud, ErreurLatex> {
        let n = match nom.as_str() {
            "frac" | "dfrac" | "tfrac" => {
                let num = self.argument("\\frac")?;
                let den = self.argument("\\frac")?;
                Noeud::Fraction(Box::new(num), Box::new(den))
            }
            "binom" => {
                let n = self.argument("\\binom")?;
                let k = self.argument("\\binom")?;
                Noeud::Binome(Box::new(n), Box::new(k))
            }
            "sqrt" => {
                let indice = if matches!(self.courant(), Some(Jeton::CrochetOuvrant)) {
                    self.pos += 1;
                    self.entrer()?;
                    let v = self.sequence(Fin::Crochet);
                    self.sortir();
                    Some(Box::new(Noeud::Groupe(v?)))
                } else {
                    None
                };
                let radicande = self.argument("\\sqrt")?;
                Noeud::Racine {
                    indice,
                    radicande: Box::new(radicande),
                }
            }
            "left" => {
                let gauche = self.delimiteur("left")?;
                self.entrer()?;
                let contenu = self.sequence(Fin::Right);
                self.sortir();
                let contenu = contenu?;
                // sequence(Fin::Right) s’arrête SUR \right
                self.pos += 1;
                let droite = self.delimiteur("right")?;
                Noeud::Delimite {
                    gauche,
                    droite,
                    contenu,
                }
            }
            "right" => return Err(ErreurLatex::LeftManquant),

            "text" | "textrm" | "mathrm" | "mbox" => Noeud::Texte(self.brut(&nom)?),
            "operatorname" => Noeud::Fonction(self.brut(&nom)?.trim().to_string()),

            "{" | "lbrace" => Noeud::Ouvrant('{'),
            "}" | "rbrace" => Noeud::Fermant('}'),
            "|" => Noeud::Barre,

            // Styles sans effet sur le sens ni sur notre mise en page
            "displaystyle" | "textstyle" | "limits" | "nolimits" => Noeud::Espace(0.0),

            _ => {
                if symboles::est_fonction(&nom) {
                    Noeud::Fonction(nom)
                } else if let Some(c) = symboles::operateur(&nom) {
                    Noeud::Operateur(c)
                } else if let Some(glyphe) = symboles::symbole(&nom) {
                    Noeud::Symbole { nom, glyphe }
                } else if let Some(em) = symboles::espace(&nom) {
                    Noeud::Espace(em)
                } else {
                    return Err(ErreurLatex::CommandeInconnue(nom));
                }
            }
        };

        Ok(n)
    }

    /// Délimiteur qui suit \left / \right.
    fn delimiteur(&mut self, commande: &str) -> Result<Option<char>, ErreurLatex> {
        let manquant = || ErreurLatex::DelimiteurManquant(commande.to_string());

        let d = match self.suivant().ok_or_else(manquant)? {
            Jeton::ParOuvrante => Some('('),
            Jeton::ParFermante => Some(')'),
            Jeton::CrochetOuvrant => Some('['),
            Jeton::CrochetFermant => Some(']'),
            Jeton::Symbole('|') => Some('|'),
            Jeton::Symbole('.') => None,
            Jeton::Commande(nom) => symboles::delimiteur(&nom).ok_or_else(manquant)?,
            _ => return Err(manquant()),
        };
        Ok(d)
    }

    fn brut(&mut self, commande: &str) -> Result<String, ErreurLatex> {
        match self.suivant() {
            Some(Jeton::Brut(s)) => Ok(s),
            _ => Err(ErreurLatex::ArgumentManquant(format!("\\{commande}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn nombre(s: &str) -> Noeud {
        Noeud::Nombre(s.into())
    }

    fn groupe(v: Vec<Noeud>) -> Noeud {
        Noeud::Groupe(v)
    }

    #[test]
    fn fraction_plus_racine() {
        let a = analyser(r"\frac{1}{2}+\sqrt{4}").unwrap();
        assert_eq!(
            a,
            vec![
                Noeud::Fraction(
                    Box::new(groupe(vec![nombre("1")])),
                    Box::new(groupe(vec![nombre("2")]))
                ),
                Noeud::Operateur('+'),
                Noeud::Racine {
                    indice: None,
                    radicande: Box::new(groupe(vec![nombre("4")])),
                },
            ]
        );
    }

    #[test]
    fn frac_sans_accolades_decoupe_les_chiffres() {
        let a = analyser(r"\frac12").unwrap();
        assert_eq!(
            a,
            vec![Noeud::Fraction(
                Box::new(nombre("1")),
                Box::new(nombre("2"))
            )]
        );
    }

    #[test]
    fn scripts_fusionnes() {
        let a = analyser("x_1^2").unwrap();
        assert_eq!(
            a,
            vec![Noeud::Scripts {
                base: Box::new(Noeud::Lettre('x')),
                exposant: Some(Box::new(nombre("2"))),
                indice: Some(Box::new(nombre("1"))),
            }]
        );
    }

    #[test]
    fn exposant_double_refuse() {
        assert_eq!(analyser("x^2^3"), Err(ErreurLatex::ExposantDouble));
    }

    #[test]
    fn racine_n_ieme() {
        let a = analyser(r"\sqrt[3]{8}").unwrap();
        assert_eq!(
            a,
            vec![Noeud::Racine {
                indice: Some(Box::new(groupe(vec![nombre("3")]))),
                radicande: Box::new(groupe(vec![nombre("8")])),
            }]
        );
    }

    #[test]
    fn left_right() {
        let a = analyser(r"\left|x\right.").unwrap();
        assert_eq!(
            a,
            vec![Noeud::Delimite {
                gauche: Some('|'),
                droite: None,
                contenu: vec![Noeud::Lettre('x')],
            }]
        );
    }

    #[test]
    fn erreurs_structurelles() {
        assert_eq!(analyser(r"\frac{1}{2"), Err(ErreurLatex::AccoladeNonFermee));
        assert_eq!(analyser("1}"), Err(ErreurLatex::AccoladeInattendue));
        assert_eq!(analyser(r"\left(1"), Err(ErreurLatex::RightManquant));
        assert_eq!(analyser(r"1\right)"), Err(ErreurLatex::LeftManquant));
        assert_eq!(analyser("^2"), Err(ErreurLatex::ScriptSansBase));
        assert_eq!(
            analyser(r"\frac{1}"),
            Err(ErreurLatex::ArgumentManquant("\\frac".into()))
        );
        assert_eq!(
            analyser(r"\foo"),
            Err(ErreurLatex::CommandeInconnue("foo".into()))
        );
        assert_eq!(analyser("   "), Err(ErreurLatex::EntreeVide));
    }

    #[test]
    fn commandes_classees() {
        let a = analyser(r"\sin\alpha\cdot\,\text{ok}").unwrap();
        assert_eq!(
            a,
            vec![
                Noeud::Fonction("sin".into()),
                Noeud::Symbole {
                    nom: "alpha".into(),
                    glyphe: 'α'
                },
                Noeud::Operateur('·'),
                Noeud::Espace(3.0 / 18.0),
                Noeud::Texte("ok".into()),
            ]
        );
    }

    #[test]
    fn imbrication_bornee() {
        let profond = "{".repeat(1000) + "1" + &"}".repeat(1000);
        assert_eq!(analyser(&profond), Err(ErreurLatex::TropProfond));

        let raisonnable = "{".repeat(50) + "1" + &"}".repeat(50);
        assert!(analyser(&raisonnable).is_ok());
    }
}
