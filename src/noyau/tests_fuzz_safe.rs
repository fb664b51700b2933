//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : toute entrée termine par Ok(canon) ou par une erreur classée,
//!   et un canon est stable (ré-évalué, il se redonne lui-même)

use std::time::{Duration, Instant};

use super::{eval_expression, format_affichage, GenreErreur, ModeAngle};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn check_canon(expr: &str, canon: &str) {
    // pas de séparateurs au stade résultat
    assert!(!canon.contains(','), "expr={expr:?} canon={canon:?}");
    // stable : ré-évalué, le canon se redonne lui-même
    let encore = eval_expression(canon, ModeAngle::Radians)
        .unwrap_or_else(|e| panic!("canon non ré-évaluable: expr={expr:?} canon={canon:?} err={e}"));
    assert_eq!(encore, canon, "expr={expr:?}");
    // affichage idempotent
    let aff = format_affichage(canon);
    assert_eq!(format_affichage(&aff), aff);
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    // inclut 0 (division par zéro, log(0)) et des négatifs (domaines)
    let a = match rng.pick(9) {
        0 => "0",
        1 => "1",
        2 => "2",
        3 => "3",
        4 => "0.5",
        5 => "2.5",
        6 => "10",
        7 => "90",
        _ => "1234.5",
    };
    if rng.pick(4) == 0 {
        format!("-{a}")
    } else {
        a.to_string()
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 | 1 | 2 => gen_nombre(rng),
        3 => "pi".to_string(),
        4 => "e".to_string(),
        _ => format!("{}!", rng.pick(8)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let a = gen_expr(rng, depth - 1);
    match rng.pick(12) {
        0 => gen_atom(rng),
        1 => format!("({a}+{})", gen_expr(rng, depth - 1)),
        2 => format!("({a}-{})", gen_expr(rng, depth - 1)),
        3 => format!("({a}*{})", gen_expr(rng, depth - 1)),
        4 => format!("({a}/{})", gen_expr(rng, depth - 1)),
        5 => format!("({a})^{}", gen_nombre(rng)),
        6 => format!("sin({a})"),
        7 => format!("cos({a})"),
        8 => format!("tan({a})"),
        9 => {
            if rng.coin() {
                format!("sqrt({a})")
            } else {
                format!("abs({a})")
            }
        }
        10 => {
            if rng.coin() {
                format!("log({a})")
            } else {
                format!("log10({a})")
            }
        }
        _ => format!("({a})%"),
    }
}

/// Mutation grossière : supprime / duplique un caractère (entrées mal formées).
fn muter(rng: &mut Rng, s: &str) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    let i = rng.pick(chars.len() as u32) as usize;
    if rng.coin() {
        chars.remove(i);
    } else {
        let c = chars[i];
        chars.insert(i, c);
    }
    chars.into_iter().collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_canon_stable() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for k in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let mode = if k % 2 == 0 {
            ModeAngle::Radians
        } else {
            ModeAngle::Degres
        };

        // même entrée => même sortie
        let r1 = eval_expression(&expr, mode);
        let r2 = eval_expression(&expr, mode);
        assert_eq!(r1, r2, "non déterministe: expr={expr:?}");

        match r1 {
            Ok(canon) => {
                check_canon(&expr, &canon);
                seen_ok += 1;
            }
            Err(e) => {
                // expressions bien formées : jamais d’erreur lexicale / de syntaxe
                assert!(
                    !matches!(e.genre(), GenreErreur::Lexicale | GenreErreur::Syntaxe),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 30, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_entrees_mutees_terminent() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..300 {
        budget(t0, max);

        let base = gen_expr(&mut rng, 3);
        let expr = muter(&mut rng, &base);

        // doit terminer, Ok ou erreur classée ; jamais de panique
        if let Ok(canon) = eval_expression(&expr, ModeAngle::Radians) {
            check_canon(&expr, &canon);
        }
    }
}

#[test]
fn fuzz_safe_caracteres_arbitraires() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let alphabet: Vec<char> = "0123456789.+-*/^()!% piesqrtlogabcn×÷π√,#é\t".chars().collect();
    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..400 {
        budget(t0, max);

        let n = 1 + rng.pick(12) as usize;
        let expr: String = (0..n)
            .map(|_| alphabet[rng.pick(alphabet.len() as u32) as usize])
            .collect();

        if let Ok(canon) = eval_expression(&expr, ModeAngle::Degres) {
            check_canon(&expr, &canon);
        }
    }
}
