// src/app/vue.rs
//
// Vue (UI egui)
// -------------
// Disposition, de haut en bas :
// - titre + lien du projet
// - cadre "Input:"   (éditeur multiligne, monospace)
// - cadre "Preview:" (aperçu rendu, ajusté à la zone, proportions gardées)
// - barre du bas     (bouton "Calculate" + résultat aligné à droite), voir app.rs
//
// Les deux cadres se partagent la hauteur restante à parts égales.
// Ctrl+Entrée (Cmd+Entrée sur macOS) équivaut à "Calculate".

use eframe::egui;
use egui::{Align, Color32, Key, Layout, Modifiers, RichText, TextStyle};
use log::debug;

use super::etat::AppCalc;
use super::{BLANC, FOND_CADRE, GRIS, ROUGE};
use crate::apercu::rendre_latex;
use crate::noyau::calculer_texte;

const TITRE: &str = "LaTeX Calculator";
const URL_PROJET: &str = "https://github.com/RaffTechAU/LatexCalc";
const INDICE_ENTREE: &str = r"Enter LaTeX expression (e.g., \frac{1}{2} + \sqrt{4} = 2.5)";

const ESPACEMENT: f32 = 15.0;
const MARGE_CADRE: i8 = 10;
const BOUTON: [f32; 2] = [120.0, 35.0];

fn cadre() -> egui::Frame {
    egui::Frame::new()
        .fill(FOND_CADRE)
        .corner_radius(10)
        .inner_margin(egui::Margin::same(MARGE_CADRE))
}

fn etiquette(texte: &str) -> RichText {
    RichText::new(texte).size(14.0).strong().color(BLANC)
}

/// Taille d’affichage de l’aperçu : tient dans `zone`, proportions conservées.
pub fn ajuster(image: egui::Vec2, zone: egui::Vec2) -> egui::Vec2 {
    if image.x <= 0.0 || image.y <= 0.0 || zone.x <= 0.0 || zone.y <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let echelle = (zone.x / image.x).min(zone.y / image.y);
    image * echelle
}

/// Côté max d’une texture d’aperçu : la zone si elle est connue, sinon la borne du moteur.
pub fn limite(zone: f32, cote_max: u32) -> u32 {
    if zone >= 1.0 {
        (zone.ceil() as u32).min(cote_max)
    } else {
        cote_max
    }
}

impl AppCalc {
    /// Partie centrale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(ESPACEMENT, ESPACEMENT);

        ui.vertical_centered(|ui| {
            ui.label(RichText::new(TITRE).size(32.0).strong().color(BLANC));
            ui.hyperlink_to(RichText::new(URL_PROJET).size(16.0).strong().color(GRIS), URL_PROJET);
        });

        // deux cadres, un espacement entre eux, marges internes déduites
        let marges = 2.0 * MARGE_CADRE as f32;
        let hauteur = ((ui.available_height() - ESPACEMENT) / 2.0 - marges).max(40.0);

        self.ui_entree(ui, hauteur);
        self.ui_apercu(ui, hauteur);
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui, hauteur: f32) {
        cadre().show(ui, |ui| {
            ui.set_min_size(egui::vec2(ui.available_width(), hauteur));
            ui.set_max_height(hauteur);
            ui.spacing_mut().item_spacing.y = 5.0;
            ui.label(etiquette("Input:"));

            let resp = egui::ScrollArea::vertical()
                .id_salt("defilement_entree")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut self.entree)
                            .id_salt("entree_latex")
                            .hint_text(INDICE_ENTREE)
                            .font(TextStyle::Monospace)
                            .text_color(GRIS)
                            .desired_width(f32::INFINITY)
                            .desired_rows(3)
                            .frame(false),
                    )
                })
                .inner;

            if resp.changed() {
                self.entree_modifiee();
            }

            if self.focus_entree {
                resp.request_focus();
                self.focus_entree = false;
            }

            // Ctrl+Entrée : calcul, sans saut de ligne (le saut reste sur Entrée seule)
            if resp.has_focus() && ui.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::Enter)) {
                self.calculer();
            }
        });
    }

    fn ui_apercu(&mut self, ui: &mut egui::Ui, hauteur: f32) {
        cadre().show(ui, |ui| {
            ui.set_min_size(egui::vec2(ui.available_width(), hauteur));
            ui.set_max_height(hauteur);
            ui.spacing_mut().item_spacing.y = 5.0;
            ui.label(etiquette("Preview:"));

            let zone = ui.available_size();
            self.zone_redimensionnee(zone);
            if self.apercu_perime {
                self.rafraichir_apercu(ui.ctx());
            }

            ui.allocate_ui_with_layout(zone, Layout::centered_and_justified(egui::Direction::TopDown), |ui| {
                match &self.apercu {
                    Some(tex) => {
                        let taille = ajuster(tex.size_vec2(), zone);
                        ui.add(egui::Image::new((tex.id(), taille)));
                    }
                    None => {
                        ui.label("");
                    }
                }
            });
        });
    }

    /// Barre du bas : bouton "Calculate" puis le résultat, collé à droite.
    pub fn ui_barre(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 10.0;

            let bouton = ui.add_sized(
                BOUTON,
                egui::Button::new(RichText::new("Calculate").size(20.0).color(BLANC)).corner_radius(10),
            );
            if bouton.clicked() {
                self.calculer();
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let couleur: Color32 = if self.en_erreur { ROUGE } else { BLANC };
                ui.label(RichText::new(&self.resultat).size(20.0).color(couleur));
            });
        });
    }

    /// Entrée blanche : rien (le résultat précédent reste affiché).
    fn calculer(&mut self) {
        if self.entree_vide() {
            return;
        }
        let (texte, erreur) = calculer_texte(&self.entree);
        debug!("{:?} -> {texte}", self.entree);
        self.set_resultat(texte, erreur);
    }

    /// Rendu, puis réduction à la zone d’aperçu (pixels physiques) et à la
    /// taille de texture permise par le moteur graphique, avant envoi.
    fn rafraichir_apercu(&mut self, ctx: &egui::Context) {
        let cote_max = u32::try_from(ctx.input(|i| i.max_texture_side)).unwrap_or(u32::MAX);
        let zone = self.zone_apercu * ctx.pixels_per_point();
        let (largeur_max, hauteur_max) = (limite(zone.x, cote_max), limite(zone.y, cote_max));

        let texture = rendre_latex(&self.entree).map(|b| {
            let b = b.reduire(largeur_max, hauteur_max);
            let image = egui::ColorImage::from_rgba_unmultiplied(b.taille(), &b.rgba);
            ctx.load_texture("apercu_latex", image, egui::TextureOptions::LINEAR)
        });
        self.set_apercu(texture);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ajustement_garde_les_proportions() {
        // trop large : limité par la largeur
        let t = ajuster(egui::vec2(400.0, 100.0), egui::vec2(200.0, 200.0));
        assert_eq!(t, egui::vec2(200.0, 50.0));

        // trop haut : limité par la hauteur
        let t = ajuster(egui::vec2(100.0, 400.0), egui::vec2(200.0, 200.0));
        assert_eq!(t, egui::vec2(50.0, 200.0));

        // petite image : agrandie jusqu’au bord
        let t = ajuster(egui::vec2(10.0, 5.0), egui::vec2(100.0, 100.0));
        assert_eq!(t, egui::vec2(100.0, 50.0));
    }

    #[test]
    fn ajustement_zone_nulle() {
        assert_eq!(ajuster(egui::vec2(10.0, 10.0), egui::Vec2::ZERO), egui::Vec2::ZERO);
        assert_eq!(ajuster(egui::Vec2::ZERO, egui::vec2(10.0, 10.0)), egui::Vec2::ZERO);
    }

    #[test]
    fn limite_de_texture() {
        assert_eq!(limite(300.4, 8192), 301);
        assert_eq!(limite(20_000.0, 8192), 8192);
        // zone pas encore mesurée : seule la borne du moteur compte
        assert_eq!(limite(0.0, 2048), 2048);
    }

    #[test]
    fn apercu_long_tient_dans_une_texture() {
        let formule = format!("{}1", "1+".repeat(150));
        let b = rendre_latex(&formule).unwrap().reduire(limite(0.0, 8192), limite(0.0, 8192));
        assert!(b.largeur <= 8192 && b.hauteur <= 8192);
    }

    #[test]
    fn calcul_ignore_le_blanc() {
        let mut a = AppCalc::default();
        a.set_resultat("3", false);
        a.entree = "   ".into();
        a.calculer();
        assert_eq!(a.resultat, "3");

        a.entree = r"\frac{1}{2} + \sqrt{4} = 2.5".into();
        a.calculer();
        assert_eq!(a.resultat, "True");
        assert!(!a.en_erreur);

        a.entree = r"\frac{1}{0}".into();
        a.calculer();
        assert_eq!(a.resultat, "Invalid Expression");
        assert!(a.en_erreur);
    }
}
