// src/noyau/expr.rs
//
// AST de l’expression
// -------------------
// Chaque noeud possède ses enfants (Box) : pas de partage, pas de cycle.
// Un appel de fonction a exactement un argument, un opérateur binaire deux opérandes.

use super::jetons::{Constante, Fonction};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpUnaire {
    Neg,
    /// n!
    Factorielle,
    /// x% = x/100 (pas un modulo)
    Pourcent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBinaire {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl OpBinaire {
    pub fn symbole(self) -> char {
        match self {
            OpBinaire::Add => '+',
            OpBinaire::Sub => '-',
            OpBinaire::Mul => '*',
            OpBinaire::Div => '/',
            OpBinaire::Pow => '^',
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Const(Constante),
    Unaire(OpUnaire, Box<Expr>),
    Binaire(OpBinaire, Box<Expr>, Box<Expr>),
    Appel(Fonction, Box<Expr>),
}

impl Expr {
    pub fn unaire(op: OpUnaire, x: Expr) -> Self {
        Expr::Unaire(op, Box::new(x))
    }

    pub fn binaire(op: OpBinaire, a: Expr, b: Expr) -> Self {
        Expr::Binaire(op, Box::new(a), Box::new(b))
    }

    pub fn appel(f: Fonction, x: Expr) -> Self {
        Expr::Appel(f, Box::new(x))
    }
}

/// Forme entièrement parenthésée (logs + tests de structure).
///
/// Exemple: "2 ^ 3 ^ 2" -> "(2^(3^2))", "-3!" -> "((-3)!)"
pub fn format_expr(e: &Expr) -> String {
    match e {
        Expr::Nombre(v) => format!("{v}"),
        Expr::Const(k) => k.nom().to_string(),
        Expr::Unaire(OpUnaire::Neg, x) => format!("(-{})", format_expr(x)),
        Expr::Unaire(OpUnaire::Factorielle, x) => format!("({}!)", format_expr(x)),
        Expr::Unaire(OpUnaire::Pourcent, x) => format!("({}%)", format_expr(x)),
        Expr::Binaire(op, a, b) => {
            format!("({}{}{})", format_expr(a), op.symbole(), format_expr(b))
        }
        Expr::Appel(f, x) => format!("{}({})", f.nom(), format_expr(x)),
    }
}
