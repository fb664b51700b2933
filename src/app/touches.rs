//! src/app/touches.rs
//!
//! Touches du pavé (typées) + disposition des deux pavés.
//! Les libellés peuvent être des glyphes (×, ÷, π, √) ; ce qui est inséré est toujours
//! la forme canonique comprise par le noyau.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Touche {
    /// 0-9 et '.'
    Chiffre(char),
    /// + - * /
    Operateur(char),
    /// Texte inséré tel quel : "sin(", "pi", "(", "!", ...
    Insertion(&'static str),

    Effacer,
    Retour,
    Evaluer,
    Ans,
    BasculeAngle,
    /// 1/x : enveloppe l’entrée
    Inverse,
}

impl Touche {
    /// Après un résultat : ces insertions prolongent le résultat ("5" puis "!" -> "5!"),
    /// les autres (fonctions, constantes, "(") repartent d’une entrée neuve.
    pub fn prolonge_resultat(self) -> bool {
        matches!(self, Touche::Insertion("^" | "!" | "%" | ")"))
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Bouton {
    pub libelle: &'static str,
    pub touche: Touche,
}

const fn b(libelle: &'static str, touche: Touche) -> Bouton {
    Bouton { libelle, touche }
}

pub const COLONNES_PAVE: usize = 4;

pub const PAVE_SCIENTIFIQUE: [Bouton; 16] = [
    b("deg/rad", Touche::BasculeAngle),
    b("sin", Touche::Insertion("sin(")),
    b("cos", Touche::Insertion("cos(")),
    b("tan", Touche::Insertion("tan(")),
    b("ln", Touche::Insertion("log(")),
    b("log", Touche::Insertion("log10(")),
    b("(", Touche::Insertion("(")),
    b(")", Touche::Insertion(")")),
    b("√", Touche::Insertion("sqrt(")),
    b("^", Touche::Insertion("^")),
    b("π", Touche::Insertion("pi")),
    b("e", Touche::Insertion("e")),
    b("!", Touche::Insertion("!")),
    b("inv", Touche::Inverse),
    b("%", Touche::Insertion("%")),
    b("abs", Touche::Insertion("abs(")),
];

pub const PAVE_PRINCIPAL: [Bouton; 19] = [
    b("C", Touche::Effacer),
    b("DEL", Touche::Retour),
    b("÷", Touche::Operateur('/')),
    b("×", Touche::Operateur('*')),
    b("7", Touche::Chiffre('7')),
    b("8", Touche::Chiffre('8')),
    b("9", Touche::Chiffre('9')),
    b("−", Touche::Operateur('-')),
    b("4", Touche::Chiffre('4')),
    b("5", Touche::Chiffre('5')),
    b("6", Touche::Chiffre('6')),
    b("+", Touche::Operateur('+')),
    b("1", Touche::Chiffre('1')),
    b("2", Touche::Chiffre('2')),
    b("3", Touche::Chiffre('3')),
    b("=", Touche::Evaluer),
    b("0", Touche::Chiffre('0')),
    b(".", Touche::Chiffre('.')),
    b("Ans", Touche::Ans),
];

/// Clavier physique -> touche (caractères tapés).
pub fn touche_clavier(c: char) -> Option<Touche> {
    Some(match c {
        '0'..='9' | '.' => Touche::Chiffre(c),
        '+' | '-' | '*' | '/' => Touche::Operateur(c),
        '(' => Touche::Insertion("("),
        ')' => Touche::Insertion(")"),
        '^' => Touche::Insertion("^"),
        '!' => Touche::Insertion("!"),
        '%' => Touche::Insertion("%"),
        '=' => Touche::Evaluer,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clavier() {
        assert_eq!(touche_clavier('7'), Some(Touche::Chiffre('7')));
        assert_eq!(touche_clavier('*'), Some(Touche::Operateur('*')));
        assert_eq!(touche_clavier(')'), Some(Touche::Insertion(")")));
        assert_eq!(touche_clavier('a'), None);
    }

    #[test]
    fn paves_complets() {
        let libelles: Vec<&str> = PAVE_SCIENTIFIQUE.iter().map(|b| b.libelle).collect();
        for l in ["sin", "ln", "log", "√", "π", "e", "!", "inv", "%", "abs", "deg/rad"] {
            assert!(libelles.contains(&l), "manque {l}");
        }
        assert!(PAVE_PRINCIPAL
            .iter()
            .any(|b| b.touche == Touche::Evaluer));
    }

    #[test]
    fn insertions_canoniques() {
        // aucun glyphe d’affichage n’est inséré tel quel
        for bouton in PAVE_SCIENTIFIQUE.iter().chain(PAVE_PRINCIPAL.iter()) {
            if let Touche::Insertion(s) = bouton.touche {
                assert!(s.is_ascii(), "insertion non canonique: {s:?}");
            }
        }
    }

    #[test]
    fn prolongement() {
        assert!(Touche::Insertion("!").prolonge_resultat());
        assert!(!Touche::Insertion("sin(").prolonge_resultat());
        assert!(!Touche::Chiffre('1').prolonge_resultat());
    }
}
