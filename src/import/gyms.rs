use crate::utils::french_dates::fold;

/// Away gyms by opponent name fragment.
const GYMS: &[(&str, &str)] = &[
    ("RIORGES", "Parc Sportif Galliéni, 439 avenue Galliéni, 42153 Riorges"),
    ("VALLAURIS", "Gymnase Jacques Allinéi, 176 avenue des Mimosas, 06220 Golfe-Juan"),
    ("GOLFE JUAN", "Gymnase Jacques Allinéi, 176 avenue des Mimosas, 06220 Golfe-Juan"),
    ("TAIN", "Gymnase J. Longo, Rue de Chapotte, 07300 Tournon-sur-Rhône"),
    ("TOURNON", "Gymnase J. Longo, Rue de Chapotte, 07300 Tournon-sur-Rhône"),
    ("ROCHE VENDÉE", "Halle des Sports des Oudairies, Rue Giotto, 85000 La Roche-sur-Yon"),
    ("LYON SO", "La Canopée, 30 Rue Charles de Gaulle, 69310 Oullins-Pierre-Bénite"),
    ("NEYRAT", "Gymnase Jules Verne, Rue des Aulnes, 63100 Clermont-Ferrand"),
    ("ANDREZIEUX", "Palais des Sports, 23 rue des Bullieux, 42160 Andrézieux-Bouthéon"),
    ("NOHANENT", "Espace Sportif du Puy Valeix, Rue du Puy-Valeix, 63830 Nohanent"),
    ("BÉDAT", "Complexe Sportif Sayat, Rue Gustave Fougère, 63530 Sayat"),
    ("SORGUES", "Plaine Sportive, Chemin de Lucette, 84700 Sorgues"),
    ("FRONTIGNAN", "Salle Roger Arnaud, 4 avenue Jean Mermoz, 34110 Frontignan"),
    ("AGDE", "Palais des Sports, Boulevard des Héllènes, 34300 Agde"),
    ("MONTBRISON", "Gymnase J.P. Cherblanc, Rue de Beauregard, 42600 Montbrison"),
    ("TOULOUGES", "Halle des Sports, 11 Boulevard de Clairfont, 66350 Toulouges"),
    ("CASTELNAU", "Palais des Sports J. Chaban-Delmas, 515 avenue de la Monnaie, 34170 Castelnau-le-Lez"),
    ("MONTELIMAR", "Halle des Sports des Alexis, 58 Chemin des Alexis, 26200 Montélimar"),
    ("RODEZ", "Gymnase Ginette Mazel, Chemin de l'Auterne, 12000 Rodez"),
    ("AUBENAS", "Halle des Sports, 14 Boulevard Maréchal Leclerc, 07200 Aubenas"),
    ("OUEST MONTPELLIER", "Gymnase Miralles, Rue Federico Garcia Lorca, 34430 Saint-Jean-de-Védas"),
];

/// Address of the opponent's gym. The longest matching fragment wins, so
/// `NOHANENT PUY VALEIX` beats a shorter club-wide key.
pub fn away_gym(opponent: &str) -> Option<&'static str> {
    let opponent = fold(opponent);

    GYMS.iter()
        .filter(|(key, _)| opponent.contains(&fold(key)))
        .max_by_key(|(key, _)| key.len())
        .map(|(_, address)| *address)
}

#[cfg(test)]
mod tests {
    use super::away_gym;

    #[test]
    fn matches_fragments_without_accents() {
        assert_eq!(
            away_gym("IE - Montélimar UMS"),
            Some("Halle des Sports des Alexis, 58 Chemin des Alexis, 26200 Montélimar")
        );
        assert_eq!(
            away_gym("CTC Bedat Volcans"),
            Some("Complexe Sportif Sayat, Rue Gustave Fougère, 63530 Sayat")
        );
    }

    #[test]
    fn longest_fragment_wins() {
        assert_eq!(
            away_gym("CTC BÉDAT VOLCANS BASKET - NOHANENT"),
            Some("Espace Sportif du Puy Valeix, Rue du Puy-Valeix, 63830 Nohanent")
        );
    }

    #[test]
    fn unknown_opponent() {
        assert_eq!(away_gym("ROYAT BC"), None);
    }
}
