/// Derive a URL slug from a title: lowercase, diacritics stripped,
/// runs of non-alphanumerics collapsed to single hyphens, no leading or
/// trailing hyphen. Idempotent: slugify(slugify(x)) == slugify(x).
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen

    for c in input.chars() {
        let c = strip_diacritic(c);
        for c in c.to_lowercase() {
            if c.is_ascii_alphanumeric() {
                out.push(c);
                last_was_hyphen = false;
            } else if !last_was_hyphen {
                out.push('-');
                last_was_hyphen = true;
            }
        }
    }

    if out.ends_with('-') {
        out.pop();
    }
    out
}

/// Map common Latin diacritics onto their ASCII base letter. Anything not
/// covered falls through unchanged and gets collapsed to a hyphen later.
fn strip_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'a',
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => 'u',
        'ý' | 'ÿ' | 'Ý' => 'y',
        'ñ' | 'Ñ' => 'n',
        'ç' | 'Ç' => 'c',
        'ß' => 's',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_title() {
        assert_eq!(slugify("Inca Trail Trek"), "inca-trail-trek");
    }

    #[test]
    fn test_diacritics_stripped() {
        assert_eq!(slugify("Encantos de Bogotá"), "encantos-de-bogota");
        assert_eq!(slugify("Überraschung für Groß"), "uberraschung-fur-gros");
    }

    #[test]
    fn test_punctuation_collapsed() {
        assert_eq!(slugify("Salt Flats -- & Geysers!"), "salt-flats-geysers");
    }

    #[test]
    fn test_no_edge_hyphens() {
        assert_eq!(slugify("  ¡Patagonia!  "), "patagonia");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_idempotent() {
        for input in [
            "Encantos de Bogotá",
            "Salt Flats -- & Geysers!",
            "already-a-slug",
            "MIXED Case 123",
        ] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "not idempotent for {:?}", input);
        }
    }
}
