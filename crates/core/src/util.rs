use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Fold text for search: decompose, strip combining marks, lowercase.
/// "Cadeira GIRATÓRIA" and "cadeira giratoria" fold to the same string.
pub fn fold_text(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Compiled search filter, matched against asset id and description.
#[derive(Debug, Clone)]
pub struct TextFilter {
    needle: String,
}

impl TextFilter {
    /// Returns `None` for blank filters, which match everything.
    pub fn new(raw: Option<&str>) -> Option<Self> {
        let needle = fold_text(raw?.trim());
        if needle.is_empty() {
            None
        } else {
            Some(Self { needle })
        }
    }

    pub fn matches(&self, asset: &patrimonio_api::Asset) -> bool {
        fold_text(&asset.asset_id).contains(&self.needle)
            || asset
                .description
                .as_deref()
                .is_some_and(|d| fold_text(d).contains(&self.needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patrimonio_api::Asset;

    #[test]
    fn test_fold_strips_accents_and_case() {
        assert_eq!(fold_text("Mesa de Reunião"), "mesa de reuniao");
        assert_eq!(fold_text("ÇÃO"), "cao");
    }

    #[test]
    fn test_filter_matches_id_or_description() {
        let asset = Asset::new("TB-0042").with_description("Cadeira Giratória");
        assert!(TextFilter::new(Some("giratoria")).unwrap().matches(&asset));
        assert!(TextFilter::new(Some("tb-00")).unwrap().matches(&asset));
        assert!(!TextFilter::new(Some("mesa")).unwrap().matches(&asset));
        assert!(TextFilter::new(Some("   ")).is_none());
    }
}
