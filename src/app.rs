// src/app.rs
//
// Calculatrice LaTeX — module App (racine)
// ----------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Thème sombre + impl eframe::App
//
// La barre du bas (Calculate + résultat) est posée AVANT le panneau central :
// egui attribue l’espace restant au CentralPanel.

pub mod etat;
pub mod vue;

pub use etat::AppCalc;

use eframe::egui;
use egui::Color32;

/* ------------------------ Palette ------------------------ */

pub const FOND: Color32 = Color32::from_rgb(0x1e, 0x1e, 0x1e);
pub const FOND_CADRE: Color32 = Color32::from_rgb(0x2b, 0x2b, 0x2b);
pub const BOUTON: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);
pub const BOUTON_SURVOL: Color32 = Color32::from_rgb(0x40, 0x40, 0x40);
pub const GRIS: Color32 = Color32::from_rgb(0x88, 0x88, 0x88);
pub const ROUGE: Color32 = Color32::from_rgb(0xff, 0x44, 0x44);
pub const BLANC: Color32 = Color32::WHITE;

/// Thème sombre : à appliquer une fois, avant la première frame.
pub fn appliquer_theme(ctx: &egui::Context) {
    let mut v = egui::Visuals::dark();

    v.panel_fill = FOND;
    v.window_fill = FOND;
    v.extreme_bg_color = FOND_CADRE; // fond des éditeurs
    v.hyperlink_color = GRIS;
    v.error_fg_color = ROUGE;

    v.widgets.inactive.bg_fill = BOUTON;
    v.widgets.inactive.weak_bg_fill = BOUTON;
    v.widgets.hovered.bg_fill = BOUTON_SURVOL;
    v.widgets.hovered.weak_bg_fill = BOUTON_SURVOL;
    v.widgets.active.bg_fill = BOUTON_SURVOL;
    v.widgets.active.weak_bg_fill = BOUTON_SURVOL;

    ctx.set_visuals(v);
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("barre_calcul")
            .show_separator_line(false)
            .frame(egui::Frame::new().fill(FOND).inner_margin(egui::Margin {
                left: 20,
                right: 20,
                top: 0,
                bottom: 20,
            }))
            .show(ctx, |ui| {
                self.ui_barre(ui);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(FOND).inner_margin(egui::Margin::same(20)))
            .show(ctx, |ui| {
                self.ui(ui);
            });
    }
}
