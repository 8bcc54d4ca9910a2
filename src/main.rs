// src/main.rs
//
// Calculatrice LaTeX — point d’entrée (bureau)
// --------------------------------------------
// - Journal     : env_logger, niveau "warn" par défaut (RUST_LOG pour plus)
// - Icône       : cropped-logo.ico à côté de l’exécutable, sinon dans le dossier courant
// - Fenêtre     : 400x400 minimum, identifiant d’application "latexcalc"
//
// Structure :
// - latex/  : lecture du LaTeX (jetons + arbre)
// - noyau/  : évaluation (exact puis f64), formatage du résultat
// - apercu/ : rendu de l’arbre en bitmap RGBA
// - app/    : état + vue egui

use std::path::PathBuf;

use eframe::egui;
use log::{debug, warn};

mod apercu;
mod app;
mod latex;
mod noyau;

use app::AppCalc;

const TITRE_APP: &str = "LaTeX Calculator";
const ID_APP: &str = "latexcalc";
const FICHIER_ICONE: &str = "cropped-logo.ico";
const TAILLE_FENETRE: [f32; 2] = [400.0, 400.0];

/* ------------------------ Icône ------------------------ */

fn chemins_icone() -> Vec<PathBuf> {
    let mut chemins = Vec::new();
    if let Some(dossier) = std::env::current_exe().ok().and_then(|p| p.parent().map(PathBuf::from)) {
        chemins.push(dossier.join(FICHIER_ICONE));
    }
    chemins.push(PathBuf::from(FICHIER_ICONE));
    chemins
}

/// Icône absente ou illisible : la fenêtre garde l’icône par défaut.
fn charger_icone() -> Option<egui::IconData> {
    for chemin in chemins_icone().into_iter().filter(|c| c.is_file()) {
        match image::open(&chemin) {
            Ok(img) => {
                let rgba = img.into_rgba8();
                let (width, height) = rgba.dimensions();
                debug!("icône chargée: {}", chemin.display());
                return Some(egui::IconData {
                    rgba: rgba.into_raw(),
                    width,
                    height,
                });
            }
            Err(e) => warn!("icône illisible ({}): {e}", chemin.display()),
        }
    }
    debug!("pas d’icône {FICHIER_ICONE}");
    None
}

/* ------------------------ Entrée ------------------------ */

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut viewport = egui::ViewportBuilder::default()
        .with_title(TITRE_APP)
        .with_app_id(ID_APP)
        .with_inner_size(TAILLE_FENETRE)
        .with_min_inner_size(TAILLE_FENETRE);
    if let Some(icone) = charger_icone() {
        viewport = viewport.with_icon(icone);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(|cc| {
            // Contexte egui prêt => thème avant la première frame.
            app::appliquer_theme(&cc.egui_ctx);
            Ok(Box::<AppCalc>::default())
        }),
    )
}
