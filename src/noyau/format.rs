// src/noyau/format.rs
//
// Deux responsabilités, séparées :
// - canonicaliser : f64 -> texte décimal à 14 chiffres significatifs (sans bruit binaire)
// - format_affichage : texte canonique -> texte avec séparateurs de milliers
//
// L’arrondi se fait sur la valeur EXACTE du double (rationnel), pas sur son écriture.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

/// Précision du résultat canonique.
pub const CHIFFRES_SIGNIFICATIFS: usize = 14;

/// Plage d’exposants décimaux écrits en notation ordinaire ; au-delà : 1.5e+25.
const EXPOSANT_DECIMAL_MIN: i32 = -7;
const EXPOSANT_DECIMAL_MAX: i32 = 21;

/* ------------------------ Décimal (scaled -> texte) ------------------------ */

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal.
pub fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    if digits == 0 {
        return if neg {
            format!("-{int_part}")
        } else {
            format!("{int_part}")
        };
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    if neg {
        format!("-{int_part}.{frac}")
    } else {
        format!("{int_part}.{frac}")
    }
}

fn retirer_zeros_finaux(mut s: String) -> String {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}

/* ------------------------ Canonicalisation ------------------------ */

/// round(r × 10^k), demi-unité arrondie loin de zéro. k peut être négatif.
fn arrondi_echelle(r: &BigRational, k: i32) -> BigInt {
    let facteur = BigRational::from_integer(pow10(k.unsigned_abs() as usize));
    let x = if k >= 0 {
        r.clone() * facteur
    } else {
        r.clone() / facteur
    };
    x.round().to_integer()
}

/// Mantisse entière de exactement 14 chiffres + exposant décimal du premier chiffre.
///
/// `e10` n’est qu’une estimation (log10 flottant) : on la corrige selon le nombre
/// de chiffres obtenus (retenue 9.99… -> 10, ou log10 arrondi au-dessus).
fn mantisse_significative(abs: &BigRational, mut e10: i32) -> (BigInt, i32) {
    let n = CHIFFRES_SIGNIFICATIFS as i32;

    for _ in 0..4 {
        let m = arrondi_echelle(abs, n - 1 - e10);
        let longueur = m.to_str_radix(10).len();
        match longueur.cmp(&CHIFFRES_SIGNIFICATIFS) {
            std::cmp::Ordering::Greater => e10 += 1,
            std::cmp::Ordering::Less => e10 -= 1,
            std::cmp::Ordering::Equal => return (m, e10),
        }
    }

    (arrondi_echelle(abs, n - 1 - e10), e10)
}

fn ecriture_decimale(mantisse: BigInt, e10: i32) -> String {
    let decalage = e10 - (CHIFFRES_SIGNIFICATIFS as i32 - 1);
    if decalage >= 0 {
        (mantisse * pow10(decalage as usize)).to_string()
    } else {
        retirer_zeros_finaux(scaled_to_decimal(mantisse, decalage.unsigned_abs() as usize))
    }
}

fn ecriture_exponentielle(mantisse: &BigInt, e10: i32) -> String {
    let chiffres = mantisse.to_str_radix(10);
    let chiffres = chiffres.trim_end_matches('0');
    let (tete, reste) = chiffres.split_at(1);

    let signe = if e10 < 0 { '-' } else { '+' };
    if reste.is_empty() {
        format!("{tete}e{signe}{}", e10.unsigned_abs())
    } else {
        format!("{tete}.{reste}e{signe}{}", e10.unsigned_abs())
    }
}

/// Forme canonique d’un résultat fini : 14 chiffres significatifs, sans zéros inutiles.
///
/// 0.30000000000000004 -> "0.3", 120 -> "120", -0 -> "0", 1e21 -> "1e+21"
pub fn canonicaliser(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    // non fini : jamais produit par l’évaluateur
    let Some(exact) = BigRational::from_float(x) else {
        return x.to_string();
    };
    if exact.is_zero() {
        return "0".to_string();
    }

    let abs = exact.abs();
    let estimation = x.abs().log10().floor() as i32;
    let (mantisse, e10) = mantisse_significative(&abs, estimation);

    let txt = if (EXPOSANT_DECIMAL_MIN..EXPOSANT_DECIMAL_MAX).contains(&e10) {
        ecriture_decimale(mantisse, e10)
    } else {
        ecriture_exponentielle(&mantisse, e10)
    };

    if exact.is_negative() {
        format!("-{txt}")
    } else {
        txt
    }
}

/* ------------------------ Affichage ------------------------ */

fn que_des_chiffres(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn grouper_milliers(entier: &str) -> String {
    let n = entier.len();
    let mut out = String::with_capacity(n + n / 3);
    for (i, c) in entier.chars().enumerate() {
        if i > 0 && (n - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Ajoute les séparateurs de milliers à la partie entière d’un nombre “simple”
/// (`-?chiffres(.chiffres)?`). Tout le reste (déjà formaté, exponentiel, "Error")
/// est rendu tel quel, donc format_affichage est idempotent.
pub fn format_affichage(s: &str) -> String {
    let (signe, corps) = match s.strip_prefix('-') {
        Some(reste) => ("-", reste),
        None => ("", s),
    };
    let (entier, frac) = match corps.split_once('.') {
        Some((a, b)) => (a, Some(b)),
        None => (corps, None),
    };

    if !que_des_chiffres(entier) || frac.is_some_and(|f| !que_des_chiffres(f)) {
        return s.to_string();
    }

    let groupe = grouper_milliers(entier);
    match frac {
        Some(f) => format!("{signe}{groupe}.{f}"),
        None => format!("{signe}{groupe}"),
    }
}
