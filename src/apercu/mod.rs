//! Aperçu : formule LaTeX -> image RGBA
//!
//! Organisation interne :
//! - police.rs      : polices embarquées (egui), métriques + contours de glyphes
//! - boite.rs       : boîtes de mise en page (glyphes, filets, traits) en em
//! - mise_en_page.rs: arbre LaTeX -> Boite (fractions, racines, scripts, délimiteurs)
//! - surface.rs     : Mesure (encre) et Toile (tiny-skia)
//! - rendu.rs       : deux passes (mesure puis dessin centré) -> Bitmap
//!
//! Le rendu est indépendant de l’évaluation : une formule non calculable
//! peut très bien avoir un aperçu.

pub mod boite;
pub mod mise_en_page;
pub mod police;
pub mod rendu;
pub mod surface;

use image::imageops;
use thiserror::Error;

use crate::latex::ErreurLatex;

pub use rendu::{rendre_latex, rendre_latex_avec};

/// Paramètres de rendu.
#[derive(Clone, Debug, PartialEq)]
pub struct OptionsRendu {
    /// Résolution (points par pouce).
    pub dpi: f32,
    /// Taille du corps, en points typographiques.
    pub taille_pt: f32,
    /// Couleur de l’encre (RGBA, non prémultiplié).
    pub couleur: [u8; 4],
    /// Facteurs appliqués à l’encre mesurée pour obtenir la toile.
    pub marge_largeur: f32,
    pub marge_hauteur: f32,
}

impl Default for OptionsRendu {
    fn default() -> Self {
        Self {
            dpi: 600.0,
            taille_pt: 10.0,
            couleur: [255, 255, 255, 255],
            marge_largeur: 1.05,
            marge_hauteur: 1.10,
        }
    }
}

impl OptionsRendu {
    /// Taille d’un em en pixels.
    pub fn em_px(&self) -> f32 {
        self.taille_pt * self.dpi / 72.0
    }
}

/// Image RGBA non prémultipliée, lignes de haut en bas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    pub largeur: u32,
    pub hauteur: u32,
    pub rgba: Vec<u8>,
}

impl Bitmap {
    pub fn taille(&self) -> [usize; 2] {
        [self.largeur as usize, self.hauteur as usize]
    }

    /// Réduit l’image pour tenir dans `largeur_max` x `hauteur_max`, proportions gardées.
    /// Jamais d’agrandissement. Le filtrage se fait en alpha prémultiplié :
    /// les pixels transparents (noirs) ne salissent pas les bords de l’encre.
    pub fn reduire(self, largeur_max: u32, hauteur_max: u32) -> Bitmap {
        let (l, h) = (self.largeur, self.hauteur);
        if largeur_max == 0 || hauteur_max == 0 || (l <= largeur_max && h <= hauteur_max) {
            return self;
        }

        let echelle = (largeur_max as f32 / l as f32).min(hauteur_max as f32 / h as f32);
        let nl = ((l as f32 * echelle).round() as u32).clamp(1, largeur_max);
        let nh = ((h as f32 * echelle).round() as u32).clamp(1, hauteur_max);

        let premult: Vec<u8> = self
            .rgba
            .chunks_exact(4)
            .flat_map(|p| [premultiplier(p[0], p[3]), premultiplier(p[1], p[3]), premultiplier(p[2], p[3]), p[3]])
            .collect();
        let Some(source) = image::RgbaImage::from_raw(l, h, premult) else {
            return self;
        };

        let reduite = imageops::resize(&source, nl, nh, imageops::FilterType::Triangle);
        let rgba = reduite
            .into_raw()
            .chunks_exact(4)
            .flat_map(|p| {
                let a = p[3];
                [demultiplier(p[0], a), demultiplier(p[1], a), demultiplier(p[2], a), a]
            })
            .collect();

        Bitmap {
            largeur: nl,
            hauteur: nh,
            rgba,
        }
    }
}

fn premultiplier(c: u8, a: u8) -> u8 {
    ((u16::from(c) * u16::from(a) + 127) / 255) as u8
}

fn demultiplier(c: u8, a: u8) -> u8 {
    if a == 0 {
        return 0;
    }
    ((u16::from(c) * 255 + u16::from(a) / 2) / u16::from(a)).min(255) as u8
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ErreurRendu {
    #[error(transparent)]
    Latex(#[from] ErreurLatex),

    #[error("formule sans encre")]
    SansEncre,

    #[error("police embarquée illisible : {0}")]
    Police(String),

    #[error("toile impossible à allouer")]
    Toile,
}
