// src/apercu/police.rs
//
// Polices embarquées (celles d’egui) lues avec ttf-parser.
// - Romain : Ubuntu Light (latin, grec, opérateurs courants)
// - Mono   : Hack (repli pour les symboles absents de la romaine)
//
// Les métriques sont rendues en em (unités de la police / units_per_em).

use tiny_skia::{Path, PathBuilder};
use ttf_parser::{Face, GlyphId, OutlineBuilder};

use super::ErreurRendu;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Famille {
    Romain,
    Mono,
}

/// Métriques d’un glyphe, en em.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metrique {
    pub famille: Famille,
    pub id: GlyphId,
    pub avance: f32,
    /// Encre : x_min, y_min, x_max, y_max (y vers le haut, 0 = ligne de base).
    pub gauche: f32,
    pub bas: f32,
    pub droite: f32,
    pub haut: f32,
}

/// Où et comment poser un glyphe sur une surface (pixels, y vers le bas).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub taille_px: f32,
    /// Facteur vertical (délimiteurs étirés).
    pub etirement: f32,
    /// Inclinaison synthétique (italique).
    pub pente: f32,
}

pub struct Polices {
    romain: Face<'static>,
    mono: Face<'static>,
}

impl Polices {
    pub fn charger() -> Result<Self, ErreurRendu> {
        let romain = Face::parse(epaint_default_fonts::UBUNTU_LIGHT, 0)
            .map_err(|e| ErreurRendu::Police(format!("Ubuntu Light: {e}")))?;
        let mono = Face::parse(epaint_default_fonts::HACK_REGULAR, 0)
            .map_err(|e| ErreurRendu::Police(format!("Hack: {e}")))?;
        Ok(Self { romain, mono })
    }

    fn face(&self, famille: Famille) -> &Face<'static> {
        match famille {
            Famille::Romain => &self.romain,
            Famille::Mono => &self.mono,
        }
    }

    /// Métriques de `c` : police romaine, puis mono, puis un caractère de substitution,
    /// et en dernier recours `.notdef` de la romaine.
    pub fn glyphe(&self, c: char) -> Metrique {
        self.glyphe_dans(c, Famille::Romain)
            .or_else(|| self.glyphe_dans(c, Famille::Mono))
            .or_else(|| {
                let s = substitut(c)?;
                self.glyphe_dans(s, Famille::Romain)
                    .or_else(|| self.glyphe_dans(s, Famille::Mono))
            })
            .unwrap_or_else(|| self.metrique(GlyphId(0), Famille::Romain))
    }

    fn glyphe_dans(&self, c: char, famille: Famille) -> Option<Metrique> {
        let id = self.face(famille).glyph_index(c)?;
        Some(self.metrique(id, famille))
    }

    fn metrique(&self, id: GlyphId, famille: Famille) -> Metrique {
        let face = self.face(famille);
        let upem = f32::from(face.units_per_em());

        let avance = face.glyph_hor_advance(id).map(f32::from).unwrap_or(0.0) / upem;
        let (gauche, bas, droite, haut) = match face.glyph_bounding_box(id) {
            Some(r) => (
                f32::from(r.x_min) / upem,
                f32::from(r.y_min) / upem,
                f32::from(r.x_max) / upem,
                f32::from(r.y_max) / upem,
            ),
            // espace : pas d’encre
            None => (0.0, 0.0, 0.0, 0.0),
        };

        Metrique {
            famille,
            id,
            avance,
            gauche,
            bas,
            droite,
            haut,
        }
    }

    /// Contour du glyphe en pixels ; None si le glyphe n’a pas d’encre.
    pub fn contour(&self, m: &Metrique, p: &Placement) -> Option<Path> {
        let face = self.face(m.famille);
        let echelle = p.taille_px / f32::from(face.units_per_em());

        let mut c = Contour {
            pb: PathBuilder::new(),
            p: *p,
            echelle,
        };
        face.outline_glyph(m.id, &mut c)?;
        c.pb.finish()
    }
}

/// Équivalents visuels pour les caractères absents des deux polices.
fn substitut(c: char) -> Option<char> {
    let s = match c {
        '⟨' => '<',
        '⟩' => '>',
        '−' => '-',
        '∓' => '±',
        '∗' => '*',
        'ϵ' => 'ε',
        'ϑ' => 'θ',
        'ϖ' => 'π',
        'ϕ' => 'φ',
        _ => return None,
    };
    Some(s)
}

/// ttf-parser -> tiny-skia : unités police (y vers le haut) -> pixels (y vers le bas).
struct Contour {
    pb: PathBuilder,
    p: Placement,
    echelle: f32,
}

impl Contour {
    fn pt(&self, x: f32, y: f32) -> (f32, f32) {
        let y = y * self.p.etirement;
        (
            self.p.x + (x + y * self.p.pente) * self.echelle,
            self.p.y - y * self.echelle,
        )
    }
}

impl OutlineBuilder for Contour {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.pt(x, y);
        self.pb.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.pt(x, y);
        self.pb.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.pt(x1, y1);
        let (x, y) = self.pt(x, y);
        self.pb.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.pt(x1, y1);
        let (x2, y2) = self.pt(x2, y2);
        let (x, y) = self.pt(x, y);
        self.pb.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.pb.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polices_embarquees_lisibles() {
        let p = Polices::charger().unwrap();
        let m = p.glyphe('x');
        assert_eq!(m.famille, Famille::Romain);
        assert!(m.avance > 0.3 && m.avance < 1.0);
        assert!(m.haut > 0.3);
    }

    #[test]
    fn grec_et_operateurs() {
        let p = Polices::charger().unwrap();
        for c in ['π', 'α', 'Ω', '+', '=', '(', ')'] {
            assert_ne!(p.glyphe(c).id, GlyphId(0), "glyphe manquant: {c}");
        }
    }

    #[test]
    fn caractere_absent_donne_notdef() {
        let p = Polices::charger().unwrap();
        let m = p.glyphe('漢');
        assert_eq!(m.id, GlyphId(0));
        assert_eq!(m.famille, Famille::Romain);
    }

    #[test]
    fn espace_sans_encre() {
        let p = Polices::charger().unwrap();
        let m = p.glyphe(' ');
        assert!(m.avance > 0.0);
        let place = Placement {
            x: 0.0,
            y: 100.0,
            taille_px: 100.0,
            etirement: 1.0,
            pente: 0.0,
        };
        assert!(p.contour(&m, &place).is_none());
    }

    #[test]
    fn contour_a_l_echelle() {
        let p = Polices::charger().unwrap();
        let m = p.glyphe('H');
        let place = Placement {
            x: 10.0,
            y: 100.0,
            taille_px: 100.0,
            etirement: 1.0,
            pente: 0.0,
        };
        let b = p.contour(&m, &place).unwrap().bounds();
        // encre au-dessus de la ligne de base, hauteur ≈ m.haut em
        assert!(b.bottom() <= 100.5);
        assert!((b.height() - (m.haut - m.bas) * 100.0).abs() < 1.0);
        assert!(b.left() >= 10.0);
    }
}
