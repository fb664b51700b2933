//! src/app/etat.rs
//!
//! État de session (sans vue).
//!
//! Rôle : contenir l’entrée en cours, le dernier résultat, l’historique et le mode d’angle,
//! et appliquer les touches du pavé. Le noyau n’est appelé qu’au moment de "=".
//!
//! Machine à états explicite :
//! - Vide    : rien de tapé
//! - Saisie  : entrée en cours (éventuellement marquée en erreur après un "=" refusé)
//! - Evalue  : l’entrée contient le résultat du dernier "=" (chaînable)

use tracing::debug;

use super::historique::Historique;
use super::touches::Touche;
use crate::noyau::{eval_expression, format_affichage, ModeAngle};

/// Ce que voit l’utilisateur quand le noyau refuse l’expression.
pub const TEXTE_ERREUR: &str = "Error";

/// Motifs retirés d’un bloc par DEL (les plus longs d’abord).
const MOTIFS_RETOUR: [&str; 8] = [
    "log10(", "sqrt(", "sin(", "cos(", "tan(", "log(", "abs(", "pi",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Vide,
    Saisie,
    Evalue,
}

#[derive(Clone, Debug, Default)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,
    pub phase: Phase,

    // --- sorties ---
    pub resultat: String,           // dernier résultat canonique
    pub expression_evaluee: String, // expression qui a produit `resultat`
    pub erreur: bool,               // le dernier "=" a échoué (entrée conservée)

    // --- paramètres ---
    pub mode_angle: ModeAngle,

    // --- historique ---
    pub historique: Historique,
    pub historique_ouvert: bool,
}

impl AppCalc {
    /* ------------------------ Point d’entrée unique ------------------------ */

    pub fn appuyer(&mut self, t: Touche) {
        match t {
            Touche::Effacer => self.effacer(),
            Touche::Retour => self.retour(),
            Touche::Evaluer => self.evaluer(),
            Touche::Ans => self.ans(),
            Touche::BasculeAngle => self.basculer_angle(),
            Touche::Inverse => self.inverse(),
            Touche::Chiffre(c) => self.inserer_chiffre(c),
            Touche::Operateur(op) => self.inserer_operateur(op),
            Touche::Insertion(s) => self.inserer(s, t.prolonge_resultat()),
        }
    }

    /* ------------------------ Actions ------------------------ */

    /// C : tout effacer sauf l’historique et le mode d’angle.
    pub fn effacer(&mut self) {
        self.entree.clear();
        self.resultat.clear();
        self.expression_evaluee.clear();
        self.erreur = false;
        self.phase = Phase::Vide;
    }

    /// DEL “intelligent” : retire d’un coup les motifs utiles ("sin(", "pi", etc.).
    pub fn retour(&mut self) {
        self.erreur = false;
        if self.entree.is_empty() {
            self.phase = Phase::Vide;
            return;
        }

        // Retire espaces finaux
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }

        match MOTIFS_RETOUR.iter().find(|m| self.entree.ends_with(**m)) {
            Some(m) => {
                let garde = self.entree.len() - m.len();
                self.entree.truncate(garde);
            }
            None => {
                self.entree.pop();
            }
        }

        self.phase = if self.entree.trim().is_empty() {
            self.entree.clear();
            Phase::Vide
        } else {
            Phase::Saisie
        };
    }

    /// "=" : évalue l’entrée. Succès -> historique + résultat chaînable ; échec -> "Error",
    /// entrée intacte.
    pub fn evaluer(&mut self) {
        let expr = self.entree.trim().to_string();
        if expr.is_empty() {
            return;
        }

        match eval_expression(&expr, self.mode_angle) {
            Ok(r) => {
                debug!(expression = %expr, resultat = %r, "calcul");
                self.historique.ajouter(expr.clone(), r.clone());
                self.expression_evaluee = expr;
                self.resultat = r.clone();
                self.entree = r;
                self.erreur = false;
                self.phase = Phase::Evalue;
            }
            Err(e) => {
                debug!(expression = %expr, erreur = %e, "calcul refusé");
                self.erreur = true;
                self.phase = Phase::Saisie;
            }
        }
    }

    /// Ans : réinjecte le résultat le plus récent de l’historique.
    pub fn ans(&mut self) {
        let Some(r) = self.historique.plus_recent().map(|e| e.resultat.clone()) else {
            return;
        };
        if self.phase == Phase::Evalue {
            self.entree = r;
        } else {
            self.entree.push_str(&r);
        }
        self.erreur = false;
        self.phase = Phase::Saisie;
    }

    pub fn basculer_angle(&mut self) {
        self.mode_angle = self.mode_angle.bascule();
    }

    /// inv : x -> 1/(x)
    pub fn inverse(&mut self) {
        let e = self.entree.trim();
        if e.is_empty() {
            return;
        }
        self.entree = format!("1/({e})");
        self.erreur = false;
        self.phase = Phase::Saisie;
    }

    /// Rappel d’un calcul de l’historique : il redevient le résultat courant.
    pub fn choisir_historique(&mut self, id: u64) {
        let Some(item) = self.historique.get(id) else {
            return;
        };
        self.expression_evaluee = item.expression.clone();
        self.resultat = item.resultat.clone();
        self.entree = item.resultat.clone();
        self.erreur = false;
        self.phase = Phase::Evalue;
        self.historique_ouvert = false;
    }

    pub fn vider_historique(&mut self) {
        self.historique.vider();
    }

    /* ------------------------ Insertions ------------------------ */

    fn inserer_chiffre(&mut self, c: char) {
        if self.phase == Phase::Evalue {
            // un chiffre après "=" : on repart de zéro
            self.entree.clear();
        }
        self.entree.push(c);
        self.erreur = false;
        self.phase = Phase::Saisie;
    }

    fn inserer_operateur(&mut self, op: char) {
        // après "=", l’entrée contient déjà le résultat : on le prolonge
        let fin = self.entree.trim_end().chars().last();

        match fin {
            None => {
                // seul un moins (négatif) peut ouvrir une entrée
                if op != '-' {
                    return;
                }
                self.entree.clear();
                self.entree.push('-');
            }
            Some('(' | '^') | Some('*' | '/') if op == '-' => self.entree.push('-'),
            Some('(' | '^') => return,
            Some('+' | '-' | '*' | '/') => {
                // remplace le ou les opérateurs finaux
                let garde = self
                    .entree
                    .trim_end_matches(|c: char| c.is_whitespace() || "+-*/".contains(c))
                    .len();
                self.entree.truncate(garde);
                if self.entree.is_empty() && op != '-' {
                    self.phase = Phase::Vide;
                    return;
                }
                self.entree.push(op);
            }
            Some(_) => self.entree.push(op),
        }

        self.erreur = false;
        self.phase = Phase::Saisie;
    }

    fn inserer(&mut self, s: &str, prolonge: bool) {
        if self.phase == Phase::Evalue && !prolonge {
            self.entree.clear();
        }
        self.entree.push_str(s);
        self.erreur = false;
        self.phase = Phase::Saisie;
    }

    /* ------------------------ Lignes d’affichage ------------------------ */

    /// Petite ligne : l’expression calculée ("12+3 ="), ou l’entrée refusée.
    pub fn ligne_expression(&self) -> String {
        match self.phase {
            Phase::Evalue => format!("{} =", self.expression_evaluee),
            _ if self.erreur => self.entree.clone(),
            _ => String::new(),
        }
    }

    /// Grande ligne : résultat (séparateurs de milliers), "Error", ou l’entrée en cours.
    pub fn ligne_principale(&self) -> String {
        match self.phase {
            Phase::Evalue => format_affichage(&self.resultat),
            _ if self.erreur => TEXTE_ERREUR.to_string(),
            Phase::Vide => "0".to_string(),
            Phase::Saisie => format_affichage(&self.entree),
        }
    }
}
