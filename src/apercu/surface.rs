// src/apercu/surface.rs
//
// Deux surfaces pour un même parcours de boîte :
// - Mesure : n’accumule que l’étendue de l’encre (pixels)
// - Toile  : rastérise avec tiny-skia (anticrénelage, remplissage non nul)

use tiny_skia::{
    FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform,
};

use super::boite::{Boite, Element};
use super::police::{Placement, Polices};
use super::{Bitmap, ErreurRendu};

/// Inclinaison de l’italique synthétique.
const PENTE_ITALIQUE: f32 = 0.2;

pub trait Surface {
    fn remplir(&mut self, chemin: &Path);
    fn tracer(&mut self, chemin: &Path, epaisseur: f32);
}

/* ------------------------ Mesure ------------------------ */

#[derive(Debug, Default)]
pub struct Mesure {
    encre: Option<Rect>,
}

impl Mesure {
    /// Rectangle englobant de l’encre ; None si rien n’a été posé.
    pub fn encre(&self) -> Option<Rect> {
        self.encre
    }

    fn etendre(&mut self, l: f32, t: f32, r: f32, b: f32) {
        let union = match self.encre {
            Some(e) => Rect::from_ltrb(e.left().min(l), e.top().min(t), e.right().max(r), e.bottom().max(b)),
            None => Rect::from_ltrb(l, t, r, b),
        };
        if union.is_some() {
            self.encre = union;
        }
    }
}

impl Surface for Mesure {
    fn remplir(&mut self, chemin: &Path) {
        let b = chemin.bounds();
        self.etendre(b.left(), b.top(), b.right(), b.bottom());
    }

    fn tracer(&mut self, chemin: &Path, epaisseur: f32) {
        let b = chemin.bounds();
        let d = epaisseur / 2.0;
        self.etendre(b.left() - d, b.top() - d, b.right() + d, b.bottom() + d);
    }
}

/* ------------------------ Toile ------------------------ */

pub struct Toile {
    pixmap: Pixmap,
    paint: Paint<'static>,
}

impl Toile {
    /// Toile transparente ; `couleur` = encre RGBA.
    pub fn new(largeur: u32, hauteur: u32, couleur: [u8; 4]) -> Result<Self, ErreurRendu> {
        let pixmap = Pixmap::new(largeur, hauteur).ok_or(ErreurRendu::Toile)?;
        let mut paint = Paint::default();
        let [r, g, b, a] = couleur;
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        Ok(Self { pixmap, paint })
    }

    /// Pixels non prémultipliés, prêts pour une texture egui.
    pub fn en_bitmap(self) -> Bitmap {
        let rgba = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();

        Bitmap {
            largeur: self.pixmap.width(),
            hauteur: self.pixmap.height(),
            rgba,
        }
    }
}

impl Surface for Toile {
    fn remplir(&mut self, chemin: &Path) {
        self.pixmap
            .fill_path(chemin, &self.paint, FillRule::Winding, Transform::identity(), None);
    }

    fn tracer(&mut self, chemin: &Path, epaisseur: f32) {
        let stroke = Stroke {
            width: epaisseur,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(chemin, &self.paint, &stroke, Transform::identity(), None);
    }
}

/* ------------------------ Parcours ------------------------ */

/// Pose tous les éléments de `boite` ; (ox, oy) = point de base en pixels, y vers le bas.
pub fn dessiner(boite: &Boite, polices: &Polices, surface: &mut impl Surface, ox: f32, oy: f32, em_px: f32) {
    for e in &boite.elements {
        match e {
            Element::Glyphe {
                x,
                y,
                metrique,
                taille,
                etirement,
                italique,
            } => {
                let p = Placement {
                    x: ox + x * em_px,
                    y: oy - y * em_px,
                    taille_px: taille * em_px,
                    etirement: *etirement,
                    pente: if *italique { PENTE_ITALIQUE } else { 0.0 },
                };
                if let Some(chemin) = polices.contour(metrique, &p) {
                    surface.remplir(&chemin);
                }
            }

            Element::Filet {
                x,
                y,
                largeur,
                epaisseur,
            } => {
                let rect = Rect::from_ltrb(
                    ox + x * em_px,
                    oy - (y + epaisseur) * em_px,
                    ox + (x + largeur) * em_px,
                    oy - y * em_px,
                );
                if let Some(r) = rect {
                    surface.remplir(&PathBuilder::from_rect(r));
                }
            }

            Element::Trait { points, epaisseur } => {
                let mut pb = PathBuilder::new();
                for (i, (x, y)) in points.iter().enumerate() {
                    let (px, py) = (ox + x * em_px, oy - y * em_px);
                    if i == 0 {
                        pb.move_to(px, py);
                    } else {
                        pb.line_to(px, py);
                    }
                }
                if let Some(chemin) = pb.finish() {
                    surface.tracer(&chemin, epaisseur * em_px);
                }
            }
        }
    }
}
