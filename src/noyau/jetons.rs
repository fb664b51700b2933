// src/noyau/jetons.rs

use super::erreurs::{ErreurCalc, ResultatCalc};

/// Garde-fou : au-delà, l’arbre deviendrait trop profond pour l’évaluation récursive.
pub const JETONS_MAX: usize = 4096;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub fn valeur(self) -> f64 {
        match self {
            Constante::Pi => std::f64::consts::PI,
            Constante::E => std::f64::consts::E,
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Constante::Pi => "pi",
            Constante::E => "e",
        }
    }
}

/// Fonctions du pavé (toutes unaires).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    /// logarithme naturel
    Log,
    Log10,
    Sqrt,
    Abs,
}

impl Fonction {
    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Log => "log",
            Fonction::Log10 => "log10",
            Fonction::Sqrt => "sqrt",
            Fonction::Abs => "abs",
        }
    }

    fn depuis_nom(nom: &str) -> Option<Self> {
        Some(match nom {
            "sin" => Fonction::Sin,
            "cos" => Fonction::Cos,
            "tan" => Fonction::Tan,
            "log" => Fonction::Log,
            "log10" => Fonction::Log10,
            "sqrt" => Fonction::Sqrt,
            "abs" => Fonction::Abs,
            _ => return None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Const(Constante),
    Fonction(Fonction),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    // postfixés
    Bang,    // !
    Percent, // %

    /// Moins unaire. Jamais produit par tokenize : c’est to_rpn qui le décide.
    Neg,

    LPar,
    RPar,
}

/// Jeton + position (en caractères) dans l’entrée normalisée.
#[derive(Clone, Debug, PartialEq)]
pub struct Jeton {
    pub tok: Tok,
    pub pos: usize,
}

/// Remplace les glyphes d’affichage par leur forme canonique.
/// × -> *, ÷ -> /, π -> pi, √ -> sqrt
pub fn normaliser_glyphes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '×' => out.push('*'),
            '÷' => out.push('/'),
            'π' => out.push_str("pi"),
            '√' => out.push_str("sqrt"),
            _ => out.push(c),
        }
    }
    out
}

/// Tokenize une chaîne (déjà normalisée) en jetons.
/// Supporte:
/// - nombres décimaux (12, 0.5, .5, 5.) + exposant optionnel (1.5e+25)
/// - opérateurs + - * / ^ et postfixés ! %
/// - parenthèses ( )
/// - fonctions sin cos tan log log10 sqrt abs, constantes pi e (insensible à la casse)
pub fn tokenize(s: &str) -> ResultatCalc<Vec<Jeton>> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if out.len() >= JETONS_MAX {
            return Err(ErreurCalc::evaluation("expression trop longue"));
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '!' => Some(Tok::Bang),
            '%' => Some(Tok::Percent),
            _ => None,
        };
        if let Some(tok) = simple {
            out.push(Jeton { tok, pos: i });
            i += 1;
            continue;
        }

        // Nombre : chiffres + au plus un point, exposant optionnel
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            let mut vu_point = false;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                if chars[i] == '.' {
                    if vu_point {
                        return Err(ErreurCalc::lexicale("second point décimal", i));
                    }
                    vu_point = true;
                }
                i += 1;
            }

            // exposant : seulement si suivi d’au moins un chiffre (sinon "e" reste un identifiant)
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    while j < chars.len() && chars[j].is_ascii_digit() {
                        j += 1;
                    }
                    i = j;
                }
            }

            let txt: String = chars[start..i].iter().collect();
            let v: f64 = txt
                .parse()
                .map_err(|_| ErreurCalc::lexicale(format!("nombre mal formé: '{txt}'"), start))?;
            if !v.is_finite() {
                return Err(ErreurCalc::lexicale(
                    format!("nombre trop grand: '{txt}'"),
                    start,
                ));
            }

            out.push(Jeton {
                tok: Tok::Num(v),
                pos: start,
            });
            continue;
        }

        // Identifiants : suite maximale de lettres ASCII (+ cas log10)
        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let mut w: String = chars[start..i].iter().collect::<String>().to_lowercase();

            if w == "log" && chars.get(i) == Some(&'1') && chars.get(i + 1) == Some(&'0') {
                w.push_str("10");
                i += 2;
            }

            let tok = match w.as_str() {
                "pi" => Tok::Const(Constante::Pi),
                "e" => Tok::Const(Constante::E),
                _ => match Fonction::depuis_nom(&w) {
                    Some(f) => Tok::Fonction(f),
                    None => {
                        return Err(ErreurCalc::syntaxe(
                            format!("identifiant inconnu: '{w}'"),
                            start,
                        ))
                    }
                },
            };

            out.push(Jeton { tok, pos: start });
            continue;
        }

        return Err(ErreurCalc::lexicale(format!("caractère inattendu: '{c}'"), i));
    }

    Ok(out)
}

/// Format utilitaire (logs) : liste de jetons en texte.
pub fn format_tokens(jetons: &[Jeton]) -> String {
    let mut out = Vec::with_capacity(jetons.len());
    for j in jetons {
        let s = match &j.tok {
            Tok::Num(v) => format!("{v}"),
            Tok::Const(k) => k.nom().to_string(),
            Tok::Fonction(f) => f.nom().to_string(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Bang => "!".to_string(),
            Tok::Percent => "%".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
