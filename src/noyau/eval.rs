//! Noyau — évaluation (pipeline réel)
//!
//! normalisation glyphes -> jetons -> RPN -> Expr -> valeur f64 -> canon (14 chiffres)
//!
//! Le mode d’angle est un paramètre explicite : seul l’appel sin/cos/tan le consulte.

use tracing::debug;

use super::erreurs::{ErreurCalc, ResultatCalc};
use super::expr::{format_expr, Expr, OpBinaire, OpUnaire};
use super::format::canonicaliser;
use super::jetons::{format_tokens, normaliser_glyphes, tokenize, Fonction};
use super::rpn::{from_rpn, to_rpn};

/// Tolérance pour reconnaître un entier (factorielle).
const EPSILON_ENTIER: f64 = 1e-9;

/// 170! est la dernière factorielle finie en f64.
const FACTORIELLE_MAX: u32 = 170;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeAngle {
    #[default]
    Radians,
    Degres,
}

impl ModeAngle {
    pub fn bascule(self) -> Self {
        match self {
            ModeAngle::Radians => ModeAngle::Degres,
            ModeAngle::Degres => ModeAngle::Radians,
        }
    }

    pub fn libelle(self) -> &'static str {
        match self {
            ModeAngle::Radians => "RAD",
            ModeAngle::Degres => "DEG",
        }
    }
}

/// API publique : évalue une expression et retourne sa forme canonique
/// (14 chiffres significatifs, sans séparateurs de milliers).
#[tracing::instrument(level = "debug", skip(expr_str), fields(expr = %expr_str))]
pub fn eval_expression(expr_str: &str, mode: ModeAngle) -> ResultatCalc<String> {
    let normalise = normaliser_glyphes(expr_str);

    let res = pipeline(&normalise, mode);
    if let Err(e) = &res {
        debug!(erreur = %e, "évaluation refusée");
    }
    res
}

fn pipeline(s: &str, mode: ModeAngle) -> ResultatCalc<String> {
    // 1) Jetons
    let jetons = tokenize(s)?;
    debug!(jetons = %format_tokens(&jetons));

    // 2) RPN (valide la syntaxe)
    let rpn = to_rpn(&jetons)?;
    debug!(rpn = %format_tokens(&rpn));

    // 3) AST
    let expr = from_rpn(&rpn)?;
    debug!(arbre = %format_expr(&expr));

    // 4) Valeur puis canon
    let v = evaluer(&expr, mode)?;
    Ok(canonicaliser(v))
}

/// Évalue l’arbre (post-ordre). Toute valeur non finie est refusée.
pub fn evaluer(expr: &Expr, mode: ModeAngle) -> ResultatCalc<f64> {
    let v = match expr {
        Expr::Nombre(v) => *v,
        Expr::Const(k) => k.valeur(),

        Expr::Unaire(op, x) => {
            let x = evaluer(x, mode)?;
            match op {
                OpUnaire::Neg => -x,
                OpUnaire::Pourcent => x / 100.0,
                OpUnaire::Factorielle => factorielle(x)?,
            }
        }

        Expr::Binaire(op, a, b) => {
            let a = evaluer(a, mode)?;
            let b = evaluer(b, mode)?;
            match op {
                OpBinaire::Add => a + b,
                OpBinaire::Sub => a - b,
                OpBinaire::Mul => a * b,
                OpBinaire::Div => {
                    if b == 0.0 {
                        return Err(ErreurCalc::DivisionParZero);
                    }
                    a / b
                }
                OpBinaire::Pow => puissance(a, b)?,
            }
        }

        Expr::Appel(f, x) => {
            let x = evaluer(x, mode)?;
            appel(*f, x, mode)?
        }
    };

    if !v.is_finite() {
        return Err(ErreurCalc::evaluation("dépassement de capacité"));
    }
    Ok(v)
}

fn puissance(base: f64, exposant: f64) -> ResultatCalc<f64> {
    if base < 0.0 && exposant.fract() != 0.0 {
        return Err(ErreurCalc::domaine(format!(
            "base négative ({base}) avec exposant non entier ({exposant})"
        )));
    }
    if base == 0.0 && exposant < 0.0 {
        return Err(ErreurCalc::DivisionParZero);
    }
    Ok(base.powf(exposant))
}

fn factorielle(x: f64) -> ResultatCalc<f64> {
    let n = x.round();
    // on teste l’entier arrondi : -1e-17 vaut 0
    if n < 0.0 || (x - n).abs() > EPSILON_ENTIER {
        return Err(ErreurCalc::domaine(format!(
            "factorielle d’un non entier naturel ({x})"
        )));
    }
    if n > FACTORIELLE_MAX as f64 {
        return Err(ErreurCalc::evaluation(format!(
            "factorielle trop grande ({n}!)"
        )));
    }

    let mut acc = 1.0_f64;
    for k in 2..=(n as u32) {
        acc *= k as f64;
    }
    Ok(acc)
}

fn appel(f: Fonction, x: f64, mode: ModeAngle) -> ResultatCalc<f64> {
    match f {
        Fonction::Sin | Fonction::Cos | Fonction::Tan => Ok(trig(f, x, mode)),

        Fonction::Sqrt => {
            if x < 0.0 {
                return Err(ErreurCalc::domaine(format!("√ d’un nombre négatif ({x})")));
            }
            Ok(x.sqrt())
        }

        Fonction::Log | Fonction::Log10 => {
            if x <= 0.0 {
                return Err(ErreurCalc::domaine(format!(
                    "{} d’un nombre non positif ({x})",
                    f.nom()
                )));
            }
            Ok(if f == Fonction::Log { x.ln() } else { x.log10() })
        }

        Fonction::Abs => Ok(x.abs()),
    }
}

/// sin/cos/tan selon le mode d’angle.
///
/// En degrés, les multiples exacts de 90° donnent des valeurs exactes
/// (sin(180) = 0 et non 1.2e-16). tan(90°) n’est pas piégée : grande valeur finie.
fn trig(f: Fonction, x: f64, mode: ModeAngle) -> f64 {
    let rad = match mode {
        ModeAngle::Radians => x,
        ModeAngle::Degres => {
            // rem_euclid(-1e-20, 360) arrondit à 360 : on replie sur 0
            let reduit = match x.rem_euclid(360.0) {
                r if r >= 360.0 => 0.0,
                r => r,
            };
            if reduit % 90.0 == 0.0 {
                let quadrant = (reduit / 90.0) as u8;
                match (f, quadrant) {
                    (Fonction::Sin, 0 | 2) | (Fonction::Cos, 1 | 3) => return 0.0,
                    (Fonction::Sin, 1) | (Fonction::Cos, 0) => return 1.0,
                    (Fonction::Sin, 3) | (Fonction::Cos, 2) => return -1.0,
                    (Fonction::Tan, 0 | 2) => return 0.0,
                    _ => {}
                }
            }
            reduit.to_radians()
        }
    };

    match f {
        Fonction::Sin => rad.sin(),
        Fonction::Cos => rad.cos(),
        _ => rad.tan(),
    }
}
