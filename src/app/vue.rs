// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// - Affichage : mode d’angle + expression calculée (petite ligne) + résultat / entrée
// - Deux pavés (scientifique + principal), 4 colonnes
// - Historique dans un panneau latéral (ouvert depuis l’en-tête)
//
// La vue ne fait que traduire des clics en Touche : toute la logique est dans etat.rs.

use eframe::egui;

use super::etat::AppCalc;
use super::touches::{Bouton, Touche, COLONNES_PAVE, PAVE_PRINCIPAL, PAVE_SCIENTIFIQUE};
use crate::noyau::format_affichage;

/// Titre unique (natif + web).
pub const TITRE_APP: &str = "Calculatrice scientifique";

const TAILLE_BOUTON: [f32; 2] = [76.0, 40.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.ui_entete(ui);
                ui.add_space(6.0);

                self.ui_affichage(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_pave(ui, "pave_scientifique", &PAVE_SCIENTIFIQUE);
                ui.add_space(8.0);
                self.ui_pave(ui, "pave_principal", &PAVE_PRINCIPAL);
            });
    }

    fn ui_entete(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading(TITRE_APP);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let libelle = if self.historique_ouvert {
                    "Fermer l’historique"
                } else {
                    "Historique"
                };
                if ui.button(libelle).clicked() {
                    self.historique_ouvert = !self.historique_ouvert;
                }
            });
        });
    }

    fn ui_affichage(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());

                ui.horizontal(|ui| {
                    ui.small(self.mode_angle.libelle());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.monospace(self.ligne_expression());
                    });
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mut texte = egui::RichText::new(self.ligne_principale())
                        .monospace()
                        .size(30.0);
                    if self.erreur {
                        texte = texte.color(ui.visuals().error_fg_color);
                    }
                    ui.label(texte);
                });
            });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui, id: &str, boutons: &[Bouton]) {
        let mut appui: Option<Touche> = None;

        egui::Grid::new(id)
            .num_columns(COLONNES_PAVE)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in boutons.chunks(COLONNES_PAVE) {
                    for b in rangee {
                        if self.bouton(ui, b) {
                            appui = Some(b.touche);
                        }
                    }
                    ui.end_row();
                }
            });

        if let Some(t) = appui {
            self.appuyer(t);
        }
    }

    fn bouton(&self, ui: &mut egui::Ui, b: &Bouton) -> bool {
        // deg/rad montre le mode courant
        let libelle = match b.touche {
            Touche::BasculeAngle => format!("{} · {}", b.libelle, self.mode_angle.libelle()),
            _ => b.libelle.to_string(),
        };
        let mut texte = egui::RichText::new(libelle).size(18.0);
        if matches!(b.touche, Touche::Evaluer) {
            texte = texte.strong();
        }
        ui.add_sized(TAILLE_BOUTON, egui::Button::new(texte))
            .clicked()
    }

    /// Panneau historique : plus récent en haut ; un clic rappelle le résultat.
    pub fn ui_historique(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Historique");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Vider").clicked() {
                    self.vider_historique();
                }
            });
        });
        ui.separator();

        if self.historique.is_empty() {
            ui.label("Aucun calcul pour l’instant");
            return;
        }

        let mut choisi: Option<u64> = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for e in self.historique.iter() {
                    let heure = e.horodatage.with_timezone(&chrono::Local);
                    ui.small(heure.format("%H:%M:%S").to_string());
                    ui.monospace(e.expression.as_str());

                    let resultat = format!("= {}", format_affichage(&e.resultat));
                    if ui
                        .button(egui::RichText::new(resultat).monospace())
                        .clicked()
                    {
                        choisi = Some(e.id);
                    }
                    ui.separator();
                }
            });

        if let Some(id) = choisi {
            self.choisir_historique(id);
        }
    }
}
