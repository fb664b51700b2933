// src/noyau/erreurs.rs
//
// Taxonomie des erreurs du noyau
// ------------------------------
// Toute erreur est terminale pour un appel à eval_expression.
// L’UI les rend toutes en "Error" ; les messages servent au diagnostic (logs, tests).

pub type ResultatCalc<T> = Result<T, ErreurCalc>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ErreurCalc {
    /// Caractère inconnu, nombre mal formé.
    #[error("erreur lexicale (position {position}) : {message}")]
    Lexicale { message: String, position: usize },

    /// Parenthèses, opérande manquant, opérateur final, identifiant inconnu, argument vide.
    #[error("erreur de syntaxe (position {position}) : {message}")]
    Syntaxe { message: String, position: usize },

    #[error("division par zéro")]
    DivisionParZero,

    /// Opérande hors domaine (√, log, log10, !, base négative).
    #[error("hors domaine : {0}")]
    Domaine(String),

    /// Fourre-tout : dépassement de capacité, garde-fous, incohérence interne.
    #[error("erreur d’évaluation : {0}")]
    Evaluation(String),
}

/// Genre d’erreur, sans le détail (pratique pour les tests et l’UI).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenreErreur {
    Lexicale,
    Syntaxe,
    DivisionParZero,
    Domaine,
    Evaluation,
}

impl ErreurCalc {
    pub fn lexicale(message: impl Into<String>, position: usize) -> Self {
        Self::Lexicale {
            message: message.into(),
            position,
        }
    }

    pub fn syntaxe(message: impl Into<String>, position: usize) -> Self {
        Self::Syntaxe {
            message: message.into(),
            position,
        }
    }

    pub fn domaine(message: impl Into<String>) -> Self {
        Self::Domaine(message.into())
    }

    pub fn evaluation(message: impl Into<String>) -> Self {
        Self::Evaluation(message.into())
    }

    pub fn genre(&self) -> GenreErreur {
        match self {
            Self::Lexicale { .. } => GenreErreur::Lexicale,
            Self::Syntaxe { .. } => GenreErreur::Syntaxe,
            Self::DivisionParZero => GenreErreur::DivisionParZero,
            Self::Domaine(_) => GenreErreur::Domaine,
            Self::Evaluation(_) => GenreErreur::Evaluation,
        }
    }

    /// Position (caractère) dans l’entrée normalisée, si l’erreur est localisée.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Lexicale { position, .. } | Self::Syntaxe { position, .. } => Some(*position),
            _ => None,
        }
    }
}
