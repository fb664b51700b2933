// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Jeton en RPN (postfix), en validant la syntaxe au passage
// - Puis reconstruire Expr
//
// Précédences (forte -> faible):
// - Neg (moins unaire, collé à la primaire qui suit)
// - postfixés ! et % (sortis directement, après les Neg en attente)
// - ^ (associatif à droite)
// - * /
// - + -
//
// Règles:
// - '-' quand on attend une valeur => Neg (début, après '(', après un opérateur)
// - multiplication implicite : "2pi", "2(3)", "3sin(x)", "(1+2)(3)" => '*' injecté
//   (même précédence que '*'), mais deux nombres accolés "2 3" restent refusés
// - une fonction doit être suivie de '(' ; elle sort après la parenthèse fermante
// - profondeur de l’arbre bornée (PROFONDEUR_MAX) : evaluer/format_expr/drop sont récursifs

use super::erreurs::{ErreurCalc, ResultatCalc};
use super::expr::{Expr, OpBinaire, OpUnaire};
use super::jetons::{Jeton, Tok};

/// Profondeur max de l’arbre, tient sur une pile de thread de 2 Mo.
pub const PROFONDEUR_MAX: usize = 256;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Caret => 3,
        Tok::Neg => 5,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret)
}

fn symbole(t: &Tok) -> &'static str {
    match t {
        Tok::Plus => "+",
        Tok::Minus => "-",
        Tok::Star => "*",
        Tok::Slash => "/",
        Tok::Caret => "^",
        Tok::Bang => "!",
        Tok::Percent => "%",
        _ => "?",
    }
}

/// Le jeton ouvre-t-il une valeur ? (candidat à la multiplication implicite)
fn ouvre_valeur(t: &Tok) -> bool {
    matches!(t, Tok::Num(_) | Tok::Const(_) | Tok::Fonction(_) | Tok::LPar)
}

/// Empile un opérateur binaire après avoir sorti ceux qui doivent l’être.
fn empiler_binaire(ops: &mut Vec<Jeton>, out: &mut Vec<Jeton>, j: Jeton) {
    // dépile tant que:
    // - on n'est pas bloqué par '(' (ni par une fonction, qui est sous sa '(')
    // - et la précédence/associativité exige de sortir l'opérateur du haut
    while let Some(top) = ops.last() {
        if matches!(top.tok, Tok::LPar | Tok::Fonction(_)) {
            break;
        }

        let p_top = precedence(&top.tok);
        let p_tok = precedence(&j.tok);

        let doit_pop = if is_right_associative(&j.tok) {
            p_top > p_tok
        } else {
            p_top >= p_tok
        };

        if !doit_pop {
            break;
        }
        if let Some(t) = ops.pop() {
            out.push(t);
        }
    }

    ops.push(j);
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   jetons: [Fonction(sin), LPar, Const(pi), Slash, Num(2), RPar]
///   rpn:    [Const(pi), Num(2), Slash, Fonction(sin)]
pub fn to_rpn(jetons: &[Jeton]) -> ResultatCalc<Vec<Jeton>> {
    if jetons.is_empty() {
        return Err(ErreurCalc::syntaxe("Entrée vide", 0));
    }

    let mut out: Vec<Jeton> = Vec::with_capacity(jetons.len());
    let mut ops: Vec<Jeton> = Vec::new();

    // true quand le prochain jeton doit commencer une valeur
    // (début, après '(' ou après un opérateur binaire / Neg).
    let mut attend_valeur = true;

    for (i, j) in jetons.iter().enumerate() {
        if !attend_valeur && ouvre_valeur(&j.tok) {
            let apres_nombre = i > 0 && matches!(jetons[i - 1].tok, Tok::Num(_));
            if apres_nombre && matches!(j.tok, Tok::Num(_)) {
                return Err(ErreurCalc::syntaxe("opérateur manquant", j.pos));
            }
            // "2pi" = "2*pi"
            empiler_binaire(
                &mut ops,
                &mut out,
                Jeton {
                    tok: Tok::Star,
                    pos: j.pos,
                },
            );
            attend_valeur = true;
        }

        match &j.tok {
            Tok::Num(_) | Tok::Const(_) => {
                out.push(j.clone());
                attend_valeur = false;
            }

            Tok::Fonction(f) => {
                if !matches!(jetons.get(i + 1).map(|s| &s.tok), Some(Tok::LPar)) {
                    return Err(ErreurCalc::syntaxe(
                        format!("'(' attendu après {}", f.nom()),
                        j.pos,
                    ));
                }
                // la fonction reste sur la pile, sous sa parenthèse
                ops.push(j.clone());
            }

            Tok::LPar => {
                ops.push(j.clone());
            }

            Tok::RPar => {
                if attend_valeur {
                    let vide = i > 0 && matches!(jetons[i - 1].tok, Tok::LPar);
                    let msg = if vide {
                        "parenthèses vides"
                    } else {
                        "opérande manquant avant ')'"
                    };
                    return Err(ErreurCalc::syntaxe(msg, j.pos));
                }

                // dépile jusqu’à '('
                let mut ouvrante = false;
                while let Some(top) = ops.pop() {
                    if matches!(top.tok, Tok::LPar) {
                        ouvrante = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouvrante {
                    return Err(ErreurCalc::syntaxe("')' sans '(' correspondante", j.pos));
                }

                // si une fonction est au sommet, on la sort aussi
                if matches!(ops.last().map(|t| &t.tok), Some(Tok::Fonction(_))) {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }

                attend_valeur = false;
            }

            Tok::Minus | Tok::Neg if attend_valeur => {
                ops.push(Jeton {
                    tok: Tok::Neg,
                    pos: j.pos,
                });
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                if attend_valeur {
                    return Err(ErreurCalc::syntaxe(
                        format!("opérande manquant avant '{}'", symbole(&j.tok)),
                        j.pos,
                    ));
                }

                empiler_binaire(&mut ops, &mut out, j.clone());
                attend_valeur = true;
            }

            Tok::Bang | Tok::Percent => {
                if attend_valeur {
                    return Err(ErreurCalc::syntaxe(
                        format!("opérande manquant avant '{}'", symbole(&j.tok)),
                        j.pos,
                    ));
                }
                // le moins unaire en attente s’applique d’abord : "-3!" = (-3)!
                while matches!(ops.last().map(|t| &t.tok), Some(Tok::Neg)) {
                    if let Some(t) = ops.pop() {
                        out.push(t);
                    }
                }
                out.push(j.clone());
            }

            // Neg hors position de valeur : ne vient jamais de tokenize
            Tok::Neg => return Err(ErreurCalc::syntaxe("opérateur manquant", j.pos)),
        }
    }

    if attend_valeur {
        let fin = jetons.last().map(|j| j.pos).unwrap_or(0);
        return Err(ErreurCalc::syntaxe("expression incomplète", fin));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op.tok, Tok::LPar) {
            return Err(ErreurCalc::syntaxe("parenthèse non fermée", op.pos));
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN produite par to_rpn.
///
/// Chaque sous-arbre garde sa profondeur ; au-delà de PROFONDEUR_MAX -> EvaluationError.
pub fn from_rpn(rpn: &[Jeton]) -> ResultatCalc<Expr> {
    let mut st: Vec<(Expr, usize)> = Vec::new();

    fn depile(st: &mut Vec<(Expr, usize)>, j: &Jeton) -> ResultatCalc<(Expr, usize)> {
        st.pop().ok_or_else(|| {
            ErreurCalc::evaluation(format!("RPN invalide (position {})", j.pos))
        })
    }

    for j in rpn {
        let (e, prof) = match &j.tok {
            Tok::Num(v) => (Expr::Nombre(*v), 1),
            Tok::Const(k) => (Expr::Const(*k), 1),

            Tok::Neg | Tok::Bang | Tok::Percent => {
                let op = match j.tok {
                    Tok::Neg => OpUnaire::Neg,
                    Tok::Bang => OpUnaire::Factorielle,
                    _ => OpUnaire::Pourcent,
                };
                let (x, p) = depile(&mut st, j)?;
                (Expr::unaire(op, x), p + 1)
            }

            Tok::Fonction(f) => {
                let (x, p) = depile(&mut st, j)?;
                (Expr::appel(*f, x), p + 1)
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let (b, pb) = depile(&mut st, j)?;
                let (a, pa) = depile(&mut st, j)?;
                let op = match j.tok {
                    Tok::Plus => OpBinaire::Add,
                    Tok::Minus => OpBinaire::Sub,
                    Tok::Star => OpBinaire::Mul,
                    Tok::Slash => OpBinaire::Div,
                    _ => OpBinaire::Pow,
                };
                (Expr::binaire(op, a, b), pa.max(pb) + 1)
            }

            Tok::LPar | Tok::RPar => {
                return Err(ErreurCalc::evaluation("parenthèse inattendue en RPN"))
            }
        };
        if prof > PROFONDEUR_MAX {
            return Err(ErreurCalc::evaluation(format!(
                "expression trop imbriquée (profondeur > {PROFONDEUR_MAX})"
            )));
        }
        st.push((e, prof));
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        _ => Err(ErreurCalc::evaluation("RPN invalide")),
    }
}
