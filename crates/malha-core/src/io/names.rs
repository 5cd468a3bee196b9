/// Canonical node name: accents folded, lowercase, punctuation collapsed to
/// single spaces, trimmed.
///
/// `"  Boa Viagem "` and `"boa-viagem"` both become `"boa viagem"`;
/// `"Várzea"` becomes `"varzea"`.
pub fn normalize_name(raw: &str) -> String {
    slug::slugify(raw).replace('-', " ")
}

/// File-safe slug for per-route output names (`"Boa Viagem"` -> `"boa_viagem"`)
pub fn slug_name(raw: &str) -> String {
    slug::slugify(raw).replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_folds_accents_and_case() {
        assert_eq!(normalize_name("Várzea"), "varzea");
        assert_eq!(normalize_name("  Boa Viagem "), "boa viagem");
        assert_eq!(normalize_name("Poço da Panela"), "poco da panela");
        assert_eq!(normalize_name("boa-viagem"), "boa viagem");
    }

    #[test]
    fn test_normalize_name_is_idempotent() {
        let once = normalize_name("Santo Amaro (Centro)");
        assert_eq!(normalize_name(&once), once);
    }

    #[test]
    fn test_slug_name() {
        assert_eq!(slug_name("Nova Descoberta"), "nova_descoberta");
        assert_eq!(slug_name("Setúbal"), "setubal");
    }
}
