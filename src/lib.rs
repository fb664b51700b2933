//! Calculatrice scientifique
//!
//! - noyau : texte + mode d’angle -> résultat canonique (ou erreur typée), sans état
//! - app   : session (pavé, historique, machine à états) + vue egui

pub mod app;
pub mod noyau;
