use std::cmp::Ordering;

/// Sort key for ingredient names: case and accents are folded so that
/// "aceite", "Ajo" and "Árbol" sort together, while `ñ` keeps its own place
/// right after `n`.
pub fn collation_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());

    for c in name.trim().chars().flat_map(char::to_lowercase) {
        match c {
            'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => key.push('a'),
            'é' | 'è' | 'ê' | 'ë' => key.push('e'),
            'í' | 'ì' | 'î' | 'ï' => key.push('i'),
            'ó' | 'ò' | 'ô' | 'ö' | 'õ' => key.push('o'),
            'ú' | 'ù' | 'û' | 'ü' => key.push('u'),
            'ç' => key.push('c'),
            'ñ' => key.push_str("n~"),
            c => key.push(c),
        }
    }

    key
}

/// Compares two names by [`collation_key`], then by the raw text so that the
/// order stays total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accent_and_case_are_folded() {
        assert_eq!(collation_key("Árbol"), "arbol");
        assert_eq!(collation_key(" Cebolla "), "cebolla");
        assert_eq!(compare_names("azúcar", "Azucar"), Ordering::Greater);
        assert_eq!(compare_names("Ébano", "eje"), Ordering::Less);
    }

    #[test]
    fn test_enye_sorts_after_n() {
        let mut names = vec!["ñoquis", "nueces", "olivas", "nabo"];
        names.sort_by(|a, b| compare_names(a, b));

        assert_eq!(names, vec!["nabo", "nueces", "ñoquis", "olivas"]);
    }
}
