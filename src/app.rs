// src/app.rs
//
// Module App (racine)
// -------------------
// Rôle:
// - Déclarer les sous-modules (etat, historique, touches, vue)
// - Ré-exporter AppCalc (pour main.rs)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Clavier : chiffres / opérateurs / parenthèses tapés, Enter = "=", Backspace = DEL,
// Escape = C. Tout passe par AppCalc::appuyer, comme les clics.

pub mod etat;
pub mod historique;
pub mod touches;
pub mod vue;

// Ré-export pratique : `use calculatrice_sci::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

use touches::{touche_clavier, Touche};

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for t in touches_clavier(ctx) {
            self.appuyer(t);
        }

        if self.historique_ouvert {
            egui::SidePanel::right("historique_calc")
                .default_width(260.0)
                .show(ctx, |ui| {
                    self.ui_historique(ui);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}

/// Événements clavier de la frame -> touches.
fn touches_clavier(ctx: &egui::Context) -> Vec<Touche> {
    ctx.input(|i| {
        let mut out = Vec::new();
        for ev in &i.events {
            match ev {
                egui::Event::Text(t) => out.extend(t.chars().filter_map(touche_clavier)),
                egui::Event::Key {
                    key, pressed: true, ..
                } => match key {
                    egui::Key::Enter => out.push(Touche::Evaluer),
                    egui::Key::Backspace => out.push(Touche::Retour),
                    egui::Key::Escape => out.push(Touche::Effacer),
                    _ => {}
                },
                _ => {}
            }
        }
        out
    })
}
