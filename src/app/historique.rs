//! src/app/historique.rs
//!
//! Historique des calculs réussis : plus récent en tête, borné (le plus ancien sort).

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

/// Taille maximale de l’historique.
pub const HISTORIQUE_MAX: usize = 50;

#[derive(Clone, Debug, PartialEq)]
pub struct EntreeHistorique {
    pub id: u64,
    pub expression: String,
    /// Résultat canonique (sans séparateurs), ré-injectable tel quel.
    pub resultat: String,
    pub horodatage: DateTime<Utc>,
}

#[derive(Clone, Debug, Default)]
pub struct Historique {
    entrees: VecDeque<EntreeHistorique>,
    prochain_id: u64,
}

impl Historique {
    pub fn ajouter(&mut self, expression: impl Into<String>, resultat: impl Into<String>) {
        let entree = EntreeHistorique {
            id: self.prochain_id,
            expression: expression.into(),
            resultat: resultat.into(),
            horodatage: Utc::now(),
        };
        self.prochain_id += 1;

        tracing::trace!(id = entree.id, expression = %entree.expression, "historique");

        self.entrees.push_front(entree);
        self.entrees.truncate(HISTORIQUE_MAX);
    }

    pub fn plus_recent(&self) -> Option<&EntreeHistorique> {
        self.entrees.front()
    }

    pub fn get(&self, id: u64) -> Option<&EntreeHistorique> {
        self.entrees.iter().find(|e| e.id == id)
    }

    /// Plus récent d’abord.
    pub fn iter(&self) -> impl Iterator<Item = &EntreeHistorique> {
        self.entrees.iter()
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }

    pub fn vider(&mut self) {
        self.entrees.clear();
    }
}
