//! Tests scientifiques (campagne) : propriétés attendues du calcul + robustesse bornée.
//!
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//! - identités vérifiées en aval du canon 14 chiffres (pas d’égalité f64 brute)

use std::time::{Duration, Instant};

use super::jetons::JETONS_MAX;
use super::{eval_expression, format_affichage, GenreErreur, ModeAngle};

fn eval_ok(expr: &str, mode: ModeAngle) -> String {
    eval_expression(expr, mode).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_canon(expr: &str, attendu: &str) {
    assert_eq!(eval_ok(expr, ModeAngle::Radians), attendu, "expr={expr:?}");
}

fn assert_canon_deg(expr: &str, attendu: &str) {
    assert_eq!(eval_ok(expr, ModeAngle::Degres), attendu, "expr={expr:?}");
}

fn assert_genre(expr: &str, genre: GenreErreur) {
    match eval_expression(expr, ModeAngle::Radians) {
        Ok(v) => panic!("expr={expr:?} : attendu {genre:?}, obtenu {v:?}"),
        Err(e) => assert_eq!(e.genre(), genre, "expr={expr:?} err={e}"),
    }
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Propriétés de référence ------------------------ */

#[test]
fn sci_proprietes_de_reference() {
    assert_canon("0.1 + 0.2", "0.3");
    assert_canon("2 + 3 * 4", "14");
    assert_canon("(2 + 3) * 4", "20");
    assert_canon("2 ^ 3 ^ 2", "512");
    assert_canon("-5 + 3", "-2");
    assert_canon("5 - -3", "8");
    assert_canon_deg("sin(90)", "1");
    assert_canon("sin(pi/2)", "1");
    assert_genre("sqrt(-1)", GenreErreur::Domaine);
    assert_genre("5/0", GenreErreur::DivisionParZero);
    assert_genre("(-8)^0.5", GenreErreur::Domaine);
    assert_genre("2 + ", GenreErreur::Syntaxe);
    assert_genre("((2+3)", GenreErreur::Syntaxe);
    assert_canon("5!", "120");
    assert_genre("2.5!", GenreErreur::Domaine);
    assert_eq!(format_affichage("1234567.89"), "1,234,567.89");
}

/* ------------------------ Identités trig (degrés) ------------------------ */

#[test]
fn sci_identites_symetrie_degres() {
    // sin(-x) = -sin(x), cos(-x) = cos(x)
    assert_canon_deg("sin(-30)", "-0.5");
    assert_canon_deg("cos(-60)", "0.5");
    assert_canon_deg("tan(-45)", "-1");
}

#[test]
fn sci_periodicite_degres() {
    assert_canon_deg("sin(390)", "0.5");
    assert_canon_deg("cos(720)", "1");
    assert_canon_deg("sin(270)", "-1");
    assert_canon_deg("tan(540)", "0");
}

#[test]
fn sci_pythagore_canon() {
    // sin² + cos² = 1 après canonicalisation
    for a in ["0.3", "1", "2.5", "pi/7"] {
        assert_canon(&format!("sin({a})^2 + cos({a})^2"), "1");
    }
    for a in ["17", "45", "123.4"] {
        assert_canon_deg(&format!("sin({a})^2 + cos({a})^2"), "1");
    }
}

#[test]
fn sci_modes_coherents() {
    // 60° = π/3 rad
    assert_eq!(
        eval_ok("cos(60)", ModeAngle::Degres),
        eval_ok("cos(pi/3)", ModeAngle::Radians)
    );
    // le mode n’affecte que la trig
    assert_eq!(
        eval_ok("log(e^2) + sqrt(2)^2", ModeAngle::Degres),
        eval_ok("log(e^2) + sqrt(2)^2", ModeAngle::Radians)
    );
}

/* ------------------------ Chaînage du résultat ------------------------ */

#[test]
fn sci_resultat_rechainable() {
    // le canon (sans virgules) redonne la même valeur
    for expr in ["1/3", "2^70", "1/7e9", "-pi*1e30", "10!", "0.1+0.2"] {
        let r = eval_ok(expr, ModeAngle::Radians);
        assert_eq!(eval_ok(&r, ModeAngle::Radians), r, "expr={expr:?} r={r:?}");
        let suite = eval_ok(&format!("{r} * 2"), ModeAngle::Radians);
        assert!(!suite.is_empty());
    }
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_parentheses_profondes() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut expr = "1".to_string();
    for _ in 0..200 {
        expr = format!("({expr}+1)");
        budget(t0, max);
    }
    assert_canon(&expr, "201");
}

#[test]
fn sci_stress_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // somme associative à gauche : profondeur 250, sous la borne
    let expr = vec!["0.5"; 250].join(" + ");
    budget(t0, max);
    assert_canon(&expr, "125");
}

#[test]
fn sci_stress_trop_de_jetons() {
    let expr = vec!["1"; 5000].join("+");
    assert_genre(&expr, GenreErreur::Evaluation);
}

#[test]
fn sci_stress_moins_unaires() {
    let expr = format!("{}7", "-".repeat(250));
    assert_canon(&expr, "7");
}

#[test]
fn sci_stress_imbrication_refusee_sur_petite_pile() {
    // pire cas sous la borne de jetons, sur un thread à pile standard (2 Mo)
    let cas = [
        format!("{}1", "-".repeat(JETONS_MAX - 1)),
        vec!["1"; 2000].join("+"),
        vec!["2"; 2000].join("^"),
        format!("{}1{}", "(".repeat(1500), ")".repeat(1500)) + &"!".repeat(1000),
    ];

    let genres = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(move || {
            cas.iter()
                .map(|s| eval_expression(s, ModeAngle::Radians).map_err(|e| e.genre()))
                .collect::<Vec<_>>()
        })
        .unwrap_or_else(|e| panic!("spawn: {e}"))
        .join()
        .unwrap_or_else(|_| panic!("le thread d’évaluation a paniqué"));

    for g in genres {
        assert_eq!(g, Err(GenreErreur::Evaluation));
    }
}
