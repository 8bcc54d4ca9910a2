// src/apercu/mise_en_page.rs
//
// Arbre LaTeX -> Boite (em, y vers le haut)
// Règles (TeX simplifié) :
// - lettres latines et grecques minuscules en italique, chiffres et fonctions en romain
// - espacement selon la classe : binaire (4/18 em), relation (5/18 em), fonction (3/18 em)
//   ; un opérateur en tête ou après un autre opérateur est unaire (pas d’espace)
// - \frac : numérateur / dénominateur réduits, centrés autour de l’axe
// - exposants / indices à 70 % (plancher 50 %)
// - \left \right : délimiteurs étirés verticalement autour de l’axe

use crate::latex::Noeud;

use super::boite::{horizontal, Boite, Element};
use super::police::Polices;

/// Hauteur de l’axe mathématique (barre de fraction, centre des délimiteurs).
const AXE: f32 = 0.25;
const FILET: f32 = 0.045;
const ECART_FRACTION: f32 = 0.1;
const MARGE_FRACTION: f32 = 0.08;

const TAILLE_SCRIPT: f32 = 0.7;
const TAILLE_MIN: f32 = 0.5;

const ESPACE_FINE: f32 = 3.0 / 18.0;
const ESPACE_BINAIRE: f32 = 4.0 / 18.0;
const ESPACE_RELATION: f32 = 5.0 / 18.0;
const ESPACE_DELIMITEUR_VIDE: f32 = 0.12;
const ESPACE_APRES_SCRIPT: f32 = 0.04;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Classe {
    Debut,
    Ord,
    Op,
    Bin,
    Rel,
    Ouvrant,
    Fermant,
    Ponct,
}

fn est_relation(c: char) -> bool {
    matches!(c, '=' | '<' | '>' | '≤' | '≥' | '≠' | '≈')
}

fn classe(n: &Noeud, precedent: Classe) -> Classe {
    match n {
        Noeud::Operateur(c) if est_relation(*c) => Classe::Rel,
        Noeud::Operateur(',') => Classe::Ponct,
        Noeud::Operateur('+' | '-' | '·' | '×' | '÷' | '*' | '±' | '∓') => {
            if matches!(precedent, Classe::Ord | Classe::Fermant) {
                Classe::Bin
            } else {
                Classe::Ord
            }
        }
        Noeud::Operateur(_) => Classe::Ord,
        Noeud::Ouvrant(_) => Classe::Ouvrant,
        Noeud::Fermant(_) => Classe::Fermant,
        Noeud::Fonction(_) => Classe::Op,
        Noeud::Scripts { base, .. } => classe(base, precedent),
        // un espace explicite ne change pas le contexte
        Noeud::Espace(_) => precedent,
        _ => Classe::Ord,
    }
}

fn espacement(a: Classe, b: Classe) -> f32 {
    use Classe::*;
    match (a, b) {
        (_, Bin) | (Bin, _) => ESPACE_BINAIRE,
        (Debut | Ouvrant | Rel, Rel) => 0.0,
        (_, Rel) | (Rel, _) => ESPACE_RELATION,
        (Op, Ord) | (Ord | Fermant, Op) | (Op, Op) | (Ponct, _) => ESPACE_FINE,
        _ => 0.0,
    }
}

fn reduit(t: f32) -> f32 {
    (t * TAILLE_SCRIPT).max(TAILLE_MIN)
}

/// Caractère réellement dessiné pour un opérateur saisi.
fn affiche(c: char) -> char {
    match c {
        '-' => '−',
        '*' => '∗',
        autre => autre,
    }
}

pub struct MiseEnPage<'p> {
    polices: &'p Polices,
}

impl<'p> MiseEnPage<'p> {
    pub fn new(polices: &'p Polices) -> Self {
        Self { polices }
    }

    /// Formule complète, au corps 1.0.
    pub fn formule(&self, noeuds: &[Noeud]) -> Boite {
        self.sequence(noeuds, 1.0)
    }

    fn sequence(&self, noeuds: &[Noeud], t: f32) -> Boite {
        let mut b = Boite::vide();
        let mut precedent = Classe::Debut;

        for n in noeuds {
            let c = classe(n, precedent);
            // pas d’espacement de classe dans les scripts
            if t >= 1.0 && !matches!(n, Noeud::Espace(_)) {
                let e = espacement(precedent, c);
                if e > 0.0 {
                    b.suivre(Boite::espace(e * t), 0.0);
                }
            }
            b.suivre(self.noeud(n, t), 0.0);
            precedent = c;
        }

        b
    }

    fn noeud(&self, n: &Noeud, t: f32) -> Boite {
        match n {
            Noeud::Nombre(s) => self.texte(s, t),
            Noeud::Lettre(c) => self.glyphe(*c, t, true),
            Noeud::Symbole { glyphe, .. } => self.glyphe(*glyphe, t, glyphe.is_lowercase()),
            Noeud::Operateur(c) => self.glyphe(affiche(*c), t, false),
            Noeud::Ouvrant(c) | Noeud::Fermant(c) => self.glyphe(*c, t, false),
            Noeud::Barre => self.glyphe('|', t, false),
            Noeud::Fonction(nom) => self.texte(nom, t),
            Noeud::Texte(s) => self.texte(s, t),
            Noeud::Espace(em) => Boite::espace(em * t),

            Noeud::Groupe(v) => self.sequence(v, t),

            Noeud::Fraction(num, den) => self.fraction(num, den, t, true),

            Noeud::Binome(n, k) => {
                let f = self.fraction(n, k, t, false);
                self.entoure(f, Some('('), Some(')'), t)
            }

            Noeud::Racine { indice, radicande } => self.racine(indice.as_deref(), radicande, t),

            Noeud::Scripts {
                base,
                exposant,
                indice,
            } => self.scripts(base, exposant.as_deref(), indice.as_deref(), t),

            Noeud::Delimite {
                gauche,
                droite,
                contenu,
            } => {
                let c = self.sequence(contenu, t);
                self.entoure(c, *gauche, *droite, t)
            }
        }
    }

    fn glyphe(&self, c: char, t: f32, italique: bool) -> Boite {
        Boite::glyphe(self.polices.glyphe(c), t, italique)
    }

    /// Texte romain, caractère par caractère.
    fn texte(&self, s: &str, t: f32) -> Boite {
        horizontal(s.chars().map(|c| self.glyphe(c, t, false)))
    }

    fn fraction(&self, num: &Noeud, den: &Noeud, t: f32, barre: bool) -> Boite {
        let tf = reduit(t);
        let n = self.sequence(num.en_sequence(), tf);
        let d = self.sequence(den.en_sequence(), tf);

        let l = n.largeur.max(d.largeur) + 2.0 * MARGE_FRACTION * t;
        let a = AXE * t;
        let e = FILET * t;
        let g = ECART_FRACTION * t;

        let (xn, yn) = ((l - n.largeur) / 2.0, a + e / 2.0 + g + n.profondeur);
        let (xd, yd) = ((l - d.largeur) / 2.0, a - e / 2.0 - g - d.hauteur);

        let mut b = Boite::vide();
        b.poser(n, xn, yn);
        b.poser(d, xd, yd);
        if barre {
            b.ajouter_element(Element::Filet {
                x: 0.0,
                y: a - e / 2.0,
                largeur: l,
                epaisseur: e,
            });
        }
        b.largeur = l;
        b
    }

    fn racine(&self, indice: Option<&Noeud>, radicande: &Noeud, t: f32) -> Boite {
        let r = self.sequence(radicande.en_sequence(), t);

        let e = FILET * t;
        let jeu = 0.1 * t;
        let signe = 0.55 * t;

        let haut = r.hauteur.max(0.7 * t) + jeu + e / 2.0;
        let bas = -(r.profondeur.max(0.05 * t) + 0.05 * t);

        // indice : au-dessus du crochet, poussant le signe si trop large
        let k = indice.map(|i| self.sequence(i.en_sequence(), reduit(reduit(t))));
        let place_indice = 0.3 * t;
        let decal = k
            .as_ref()
            .map(|k| (k.largeur - place_indice).max(0.0))
            .unwrap_or(0.0);

        let fin = decal + signe + r.largeur + 2.0 * jeu;
        let points = vec![
            (decal, bas + 0.25 * t),
            (decal + 0.12 * t, bas + 0.32 * t),
            (decal + 0.3 * t, bas),
            (decal + signe, haut),
            (fin, haut),
        ];

        let mut b = Boite::vide();
        b.poser(r, decal + signe + jeu, 0.0);
        b.ajouter_element(Element::Trait {
            points,
            epaisseur: e,
        });
        b.hauteur = b.hauteur.max(haut + e / 2.0);
        b.profondeur = b.profondeur.max(-bas + e / 2.0);

        if let Some(k) = k {
            let dy = bas + 0.45 * (haut - bas) + k.profondeur;
            let x = decal + place_indice - k.largeur;
            b.poser(k, x.max(0.0), dy);
        }

        b.largeur = fin;
        b
    }

    fn scripts(&self, base: &Noeud, exposant: Option<&Noeud>, indice: Option<&Noeud>, t: f32) -> Boite {
        let mut b = self.noeud(base, t);
        let w = b.largeur;
        let ts = reduit(t);

        // petite correction italique pour l’exposant
        let kern = if matches!(base, Noeud::Lettre(_)) { 0.05 * t } else { 0.0 };

        let sup = exposant.map(|e| self.sequence(e.en_sequence(), ts));
        let sub = indice.map(|i| self.sequence(i.en_sequence(), ts));

        let mut u = sup
            .as_ref()
            .map(|s| (b.hauteur - 0.35 * t).max(0.38 * t).max(s.profondeur + 0.25 * t))
            .unwrap_or(0.0);
        let mut d = sub
            .as_ref()
            .map(|s| (b.profondeur + 0.1 * t).max(0.15 * t).max(s.hauteur - 0.4 * t))
            .unwrap_or(0.0);

        if let (Some(s), Some(i)) = (&sup, &sub) {
            let ecart = (u - s.profondeur) - (i.hauteur - d);
            let min = 0.12 * t;
            if ecart < min {
                let manque = min - ecart;
                u += manque / 2.0;
                d += manque / 2.0;
            }
        }

        let mut l = w;
        if let Some(s) = sup {
            l = l.max(w + kern + s.largeur);
            b.poser(s, w + kern, u);
        }
        if let Some(i) = sub {
            l = l.max(w + i.largeur);
            b.poser(i, w, -d);
        }

        b.largeur = l + ESPACE_APRES_SCRIPT * t;
        b
    }

    /// Délimiteurs étirés autour de `contenu`, symétriques par rapport à l’axe.
    fn entoure(&self, contenu: Boite, gauche: Option<char>, droite: Option<char>, t: f32) -> Boite {
        let a = AXE * t;
        let demi = (contenu.hauteur - a).max(contenu.profondeur + a).max(0.5 * t) + 0.08 * t;

        let g = self.delimiteur(gauche, a, demi, t);
        let d = self.delimiteur(droite, a, demi, t);
        horizontal([g, contenu, d])
    }

    fn delimiteur(&self, c: Option<char>, axe: f32, demi: f32, t: f32) -> Boite {
        let Some(c) = c else {
            return Boite::espace(ESPACE_DELIMITEUR_VIDE * t);
        };
        let m = self.polices.glyphe(c);

        let h = (m.haut - m.bas) * t;
        let etirement = if h > 0.0 { (2.0 * demi / h).max(1.0) } else { 1.0 };
        let dy = axe - (m.bas + m.haut) / 2.0 * t * etirement;

        Boite {
            largeur: m.avance * t,
            hauteur: (dy + m.haut * t * etirement).max(0.0),
            profondeur: (-(dy + m.bas * t * etirement)).max(0.0),
            elements: vec![Element::Glyphe {
                x: 0.0,
                y: dy,
                metrique: m,
                taille: t,
                etirement,
                italique: false,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::analyser;

    fn boite(s: &str) -> Boite {
        let p = Polices::charger().unwrap();
        let arbre = analyser(s).unwrap();
        MiseEnPage::new(&p).formule(&arbre)
    }

    #[test]
    fn plus_long_plus_large() {
        assert!(boite("1+1+1").largeur > boite("1+1").largeur);
        assert!(boite("11").largeur > boite("1").largeur);
    }

    #[test]
    fn espacement_binaire_et_unaire() {
        // "1-1" porte deux espaces binaires, "-11" aucun
        let binaire = boite("1-1").largeur;
        let unaire = boite("-11").largeur;
        assert!(binaire > unaire + 0.3);
    }

    #[test]
    fn fraction_haute_et_profonde() {
        let f = boite(r"\frac{1}{2}");
        let un = boite("1");
        assert!(f.hauteur > un.hauteur * 0.9);
        assert!(f.profondeur > 0.2);
        assert!(f.elements.iter().any(|e| matches!(e, Element::Filet { .. })));
    }

    #[test]
    fn binome_sans_barre() {
        let b = boite(r"\binom{5}{2}");
        assert!(!b.elements.iter().any(|e| matches!(e, Element::Filet { .. })));
    }

    #[test]
    fn racine_englobe() {
        let r = boite(r"\sqrt{2}");
        let deux = boite("2");
        assert!(r.largeur > deux.largeur + 0.5);
        assert!(r.hauteur > deux.hauteur);
        assert!(r.elements.iter().any(|e| matches!(e, Element::Trait { .. })));

        let ri = boite(r"\sqrt[3]{2}");
        assert!(ri.elements.len() > r.elements.len());
    }

    #[test]
    fn exposant_monte_indice_descend() {
        let x = boite("x");
        let x2 = boite("x^2");
        let x_2 = boite("x_2");
        assert!(x2.hauteur > x.hauteur);
        assert!(x_2.profondeur > x.profondeur);
        assert!(x2.largeur > x.largeur);
    }

    #[test]
    fn delimiteurs_etires() {
        let petit = boite(r"\left(1\right)");
        let grand = boite(r"\left(\frac{\frac{1}{2}}{3}\right)");
        let hauteur = |b: &Boite| b.hauteur + b.profondeur;
        assert!(hauteur(&grand) > hauteur(&petit));
        let etire = grand.elements.iter().any(|e| match e {
            Element::Glyphe { etirement, .. } => *etirement > 1.0,
            _ => false,
        });
        assert!(etire);
    }

    #[test]
    fn delimiteur_vide() {
        let b = boite(r"\left.x\right|");
        assert!(b.largeur > boite("x").largeur);
    }
}
