//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, drapeau d’erreur,
//! aperçu courant) et offrir des opérations simples sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ni aucun rendu ici.
//! - Chaque sortie est remplacée d’un bloc (résultat, aperçu), jamais modifiée en partie.

use eframe::egui;

#[derive(Clone)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String, // décimal, "True"/"False" ou "Invalid Expression"
    pub en_erreur: bool,  // résultat affiché en rouge

    // --- aperçu ---
    pub apercu: Option<egui::TextureHandle>,
    /// L’entrée ou la zone d’aperçu a changé depuis le dernier rendu.
    pub apercu_perime: bool,
    /// Taille de la zone d’aperçu au dernier rendu (détection du redimensionnement).
    pub zone_apercu: egui::Vec2,

    // --- UX ---
    // Redonne le focus à l’éditeur après un clic sur "Calculate".
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            en_erreur: false,
            apercu: None,
            apercu_perime: false, // entrée vide : rien à rendre
            zone_apercu: egui::Vec2::ZERO,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /// Entrée vide ou faite uniquement d’espaces : "Calculate" ne fait rien.
    pub fn entree_vide(&self) -> bool {
        self.entree.trim().is_empty()
    }

    /// L’entrée a changé : l’aperçu sera refait à la prochaine frame.
    pub fn entree_modifiee(&mut self) {
        self.apercu_perime = true;
    }

    /// La zone d’aperçu a changé de taille : même traitement qu’une saisie.
    /// Retourne true si la taille a réellement bougé.
    pub fn zone_redimensionnee(&mut self, zone: egui::Vec2) -> bool {
        if (zone - self.zone_apercu).length() < 0.5 {
            return false;
        }
        self.zone_apercu = zone;
        self.apercu_perime = true;
        true
    }

    /// Dépose le texte issu du noyau.
    pub fn set_resultat(&mut self, texte: impl Into<String>, erreur: bool) {
        self.resultat = texte.into();
        self.en_erreur = erreur;
        self.focus_entree = true;
    }

    /// Remplace l’aperçu (None = zone vide).
    pub fn set_apercu(&mut self, apercu: Option<egui::TextureHandle>) {
        self.apercu = apercu;
        self.apercu_perime = false;
    }
}
