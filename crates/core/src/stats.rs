use crate::index::{AssetIndex, RegistrationMarks};
use patrimonio_api::InventoryStats;

/// Derive partition counts from the index and the global mark map.
pub fn compute(index: &AssetIndex, marks: &RegistrationMarks) -> InventoryStats {
    let total = index.len();
    let located = index.located_count();
    let percent_located = if total == 0 {
        0
    } else {
        (100.0 * located as f64 / total as f64).round() as u32
    };

    InventoryStats {
        total,
        located,
        pending: index.pending_count(),
        registered: marks.len(),
        percent_located,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use patrimonio_api::Asset;

    #[test]
    fn test_empty_inventory() {
        let stats = compute(&AssetIndex::empty(), &RegistrationMarks::new());
        assert_eq!(stats, InventoryStats::default());
    }

    #[test]
    fn test_percent_rounds() {
        let assets = vec![
            Asset::new("1").with_unit("A"),
            Asset::new("2").with_unit("A"),
            Asset::new("3"),
        ];
        let (index, _) = AssetIndex::rebuild(assets, &RegistrationMarks::new());
        let stats = compute(&index, &RegistrationMarks::new());
        assert_eq!(stats.percent_located, 67);
        assert_eq!(stats.pending, 1);
    }

    #[test]
    fn test_registered_counts_orphan_marks() {
        let mut marks = RegistrationMarks::new();
        marks.insert("gone".to_string(), Utc::now());
        let (index, _) = AssetIndex::rebuild(vec![Asset::new("1")], &marks);
        let stats = compute(&index, &marks);
        assert_eq!(stats.total, 1);
        assert_eq!(stats.registered, 1);
    }
}
