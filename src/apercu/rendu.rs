// src/apercu/rendu.rs
//
// Formule -> Bitmap, en deux passes :
// 1) mesure de l’encre à la résolution cible
// 2) toile = encre x marges (largeur 1.05, hauteur 1.10), formule centrée
//
// Une toile hors bornes (côté ou surface) est refaite à résolution réduite :
// une formule très longue reste affichée, en plus petit.
//
// Toute erreur est journalisée ("Preview error: ...") et donne None :
// l’interface efface simplement l’aperçu.

use log::{debug, warn};
use tiny_skia::Rect;

use crate::latex::analyser;

use super::boite::Boite;
use super::mise_en_page::MiseEnPage;
use super::police::Polices;
use super::surface::{dessiner, Mesure, Toile};
use super::{Bitmap, ErreurRendu, OptionsRendu};

/// Côté max de la toile, en pixels.
pub const COTE_MAX: u32 = 16384;

/// Surface max de la toile, en pixels.
pub const AIRE_MAX: f32 = 32.0 * 1024.0 * 1024.0;

/// Aperçu avec les réglages par défaut (600 dpi, 10 pt, encre blanche).
pub fn rendre_latex(source: &str) -> Option<Bitmap> {
    rendre_latex_avec(source, &OptionsRendu::default())
}

pub fn rendre_latex_avec(source: &str, options: &OptionsRendu) -> Option<Bitmap> {
    let formule = sans_dollars(source);
    if formule.is_empty() {
        return None;
    }

    match rendre(&formule, options) {
        Ok(b) => {
            debug!("aperçu {}x{} pour {formule:?}", b.largeur, b.hauteur);
            Some(b)
        }
        Err(e) => {
            warn!("Preview error: {e}");
            None
        }
    }
}

/// "$x^2$" et "x^2" donnent le même aperçu : tout '$' est retiré.
fn sans_dollars(source: &str) -> String {
    source.replace('$', "").trim().to_string()
}

/// Encre mesurée à `em_px` ; Err si rien n’est dessiné.
fn mesurer(boite: &Boite, polices: &Polices, em_px: f32) -> Result<Rect, ErreurRendu> {
    let mut mesure = Mesure::default();
    dessiner(boite, polices, &mut mesure, 0.0, 0.0, em_px);
    let encre = mesure.encre().ok_or(ErreurRendu::SansEncre)?;
    if encre.width() <= 0.0 && encre.height() <= 0.0 {
        return Err(ErreurRendu::SansEncre);
    }
    Ok(encre)
}

/// Toile = encre en pouces x marges, ramenée en pixels.
fn taille_toile(encre: &Rect, options: &OptionsRendu) -> (f32, f32) {
    let largeur_po = encre.width() / options.dpi * options.marge_largeur;
    let hauteur_po = encre.height() / options.dpi * options.marge_hauteur;
    (
        (largeur_po * options.dpi).ceil().max(1.0),
        (hauteur_po * options.dpi).ceil().max(1.0),
    )
}

/// Facteur (<= 1) qui ramène la toile sous COTE_MAX et AIRE_MAX.
fn reduction(largeur: f32, hauteur: f32) -> f32 {
    let cote = COTE_MAX as f32 / largeur.max(hauteur);
    let aire = (AIRE_MAX / (largeur * hauteur)).sqrt();
    cote.min(aire).min(1.0)
}

pub fn rendre(formule: &str, options: &OptionsRendu) -> Result<Bitmap, ErreurRendu> {
    let arbre = analyser(formule)?;
    let polices = Polices::charger()?;
    let boite = MiseEnPage::new(&polices).formule(&arbre);
    if boite.est_vide() {
        return Err(ErreurRendu::SansEncre);
    }

    // 1) encre à la résolution demandée
    let mut em_px = options.em_px();
    let mut encre = mesurer(&boite, &polices, em_px)?;
    let (mut largeur_px, mut hauteur_px) = taille_toile(&encre, options);

    // trop grande : même formule à résolution réduite (marge de 1 % pour l’arrondi)
    let r = reduction(largeur_px, hauteur_px);
    if r < 1.0 {
        em_px *= r * 0.99;
        debug!("aperçu réduit à {:.0} dpi", options.dpi * r * 0.99);
        encre = mesurer(&boite, &polices, em_px)?;
        (largeur_px, hauteur_px) = taille_toile(&encre, options);
    }

    // 2) taille de toile
    let largeur = largeur_px.min(COTE_MAX as f32) as u32;
    let hauteur = hauteur_px.min(COTE_MAX as f32) as u32;

    // 3) dessin centré
    let ox = (largeur as f32 - encre.width()) / 2.0 - encre.left();
    let oy = (hauteur as f32 - encre.height()) / 2.0 - encre.top();

    let mut toile = Toile::new(largeur, hauteur, options.couleur)?;
    dessiner(&boite, &polices, &mut toile, ox, oy, em_px);

    Ok(toile.en_bitmap())
}
