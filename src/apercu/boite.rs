// src/apercu/boite.rs
//
// Boîtes de mise en page (modèle TeX simplifié).
// Unités : em du corps ; origine = point de base gauche ; y vers le HAUT.
// - largeur  : avance horizontale
// - hauteur  : au-dessus de la ligne de base
// - profondeur : sous la ligne de base (positive)

use super::police::Metrique;

#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Glyphe {
        x: f32,
        y: f32,
        metrique: Metrique,
        /// Taille relative au corps (1.0, 0.7 pour un exposant, ...).
        taille: f32,
        etirement: f32,
        italique: bool,
    },
    /// Filet horizontal plein (barre de fraction) ; `y` = bord inférieur.
    Filet {
        x: f32,
        y: f32,
        largeur: f32,
        epaisseur: f32,
    },
    /// Ligne brisée (signe radical).
    Trait {
        points: Vec<(f32, f32)>,
        epaisseur: f32,
    },
}

impl Element {
    fn decale(&mut self, dx: f32, dy: f32) {
        match self {
            Element::Glyphe { x, y, .. } | Element::Filet { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
            Element::Trait { points, .. } => {
                for (x, y) in points.iter_mut() {
                    *x += dx;
                    *y += dy;
                }
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Boite {
    pub largeur: f32,
    pub hauteur: f32,
    pub profondeur: f32,
    pub elements: Vec<Element>,
}

impl Boite {
    pub fn vide() -> Self {
        Self::default()
    }

    /// Espace horizontal pur.
    pub fn espace(largeur: f32) -> Self {
        Self {
            largeur,
            ..Self::default()
        }
    }

    /// Un glyphe posé sur la ligne de base.
    pub fn glyphe(metrique: Metrique, taille: f32, italique: bool) -> Self {
        Self {
            largeur: metrique.avance * taille,
            hauteur: (metrique.haut * taille).max(0.0),
            profondeur: (-metrique.bas * taille).max(0.0),
            elements: vec![Element::Glyphe {
                x: 0.0,
                y: 0.0,
                metrique,
                taille,
                etirement: 1.0,
                italique,
            }],
        }
    }

    /// Superpose `autre` décalé de (dx, dy) ; la largeur n’avance pas.
    pub fn poser(&mut self, autre: Boite, dx: f32, dy: f32) {
        self.hauteur = self.hauteur.max(autre.hauteur + dy);
        self.profondeur = self.profondeur.max(autre.profondeur - dy);
        self.largeur = self.largeur.max(autre.largeur + dx);
        self.elements.extend(autre.elements.into_iter().map(|mut e| {
            e.decale(dx, dy);
            e
        }));
    }

    /// Ajoute `autre` à droite, sur la même ligne de base (décalée de `dy`).
    pub fn suivre(&mut self, autre: Boite, dy: f32) {
        let x = self.largeur;
        let l = autre.largeur;
        self.poser(autre, x, dy);
        self.largeur = x + l;
    }

    pub fn ajouter_element(&mut self, e: Element) {
        self.elements.push(e);
    }

    pub fn est_vide(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Concatène horizontalement.
pub fn horizontal(boites: impl IntoIterator<Item = Boite>) -> Boite {
    let mut b = Boite::vide();
    for x in boites {
        b.suivre(x, 0.0);
    }
    b
}
