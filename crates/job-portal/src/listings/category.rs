use std::collections::{HashMap, HashSet};

use super::domain::Category;
use super::normalizer::normalize_label;

/// Lookup from normalized category name to its category.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    entries: HashMap<String, Category>,
}

impl CategoryIndex {
    /// Later categories replace earlier ones sharing a normalized name.
    pub fn from_categories<'a, I>(categories: I) -> Self
    where
        I: IntoIterator<Item = &'a Category>,
    {
        let entries = categories
            .into_iter()
            .filter_map(|category| {
                let key = normalize_label(&category.name);
                (!key.is_empty()).then(|| (key, category.clone()))
            })
            .collect();

        Self { entries }
    }

    pub fn get(&self, label: &str) -> Option<&Category> {
        self.entries.get(&normalize_label(label))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Expands selected labels into the set of category labels a record may carry.
    ///
    /// A known parent contributes itself and all of its subcategories. A label
    /// with no index entry is kept as a literal match.
    pub fn expand<'a, I>(&self, selected: I) -> AllowedCategories
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut allowed = HashSet::new();

        for label in selected {
            let key = normalize_label(label);
            if key.is_empty() {
                continue;
            }

            match self.entries.get(&key) {
                Some(category) => {
                    allowed.insert(key);
                    allowed.extend(
                        category
                            .subcategories
                            .iter()
                            .map(|sub| normalize_label(sub))
                            .filter(|sub| !sub.is_empty()),
                    );
                }
                None => {
                    allowed.insert(key);
                }
            }
        }

        if allowed.is_empty() {
            AllowedCategories::Unbounded
        } else {
            AllowedCategories::Only(allowed)
        }
    }
}

/// Category labels a record must carry to pass the category predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedCategories {
    /// Nothing selected: every record passes, including uncategorized ones.
    Unbounded,
    Only(HashSet<String>),
}

impl AllowedCategories {
    pub fn permits<'a, I>(&self, labels: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        match self {
            AllowedCategories::Unbounded => true,
            AllowedCategories::Only(allowed) => labels
                .into_iter()
                .any(|label| allowed.contains(&normalize_label(label))),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, AllowedCategories::Unbounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> CategoryIndex {
        CategoryIndex::from_categories(&[
            Category::new("Trades", ["Welding", "Plumbing"]),
            Category::new("Hospitality", ["Barista", " "]),
        ])
    }

    fn selected(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|label| label.to_string()).collect()
    }

    #[test]
    fn empty_selection_is_unbounded_not_empty() {
        let allowed = index().expand(&Vec::<String>::new());
        assert!(allowed.is_unbounded());
        assert!(allowed.permits(std::iter::empty()));
    }

    #[test]
    fn parent_selection_expands_to_subcategories() {
        let allowed = index().expand(&selected(&[" TRADES "]));
        let AllowedCategories::Only(labels) = &allowed else {
            panic!("expected a bounded set, got {allowed:?}");
        };

        assert_eq!(labels.len(), 3);
        assert!(allowed.permits(["Welding"]));
        assert!(allowed.permits(["plumbing "]));
        assert!(allowed.permits(["Trades"]));
        assert!(!allowed.permits(["Barista"]));
    }

    #[test]
    fn orphan_labels_stay_literal() {
        let allowed = index().expand(&selected(&["welding"]));
        assert!(allowed.permits(["Welding"]));
        assert!(!allowed.permits(["Plumbing"]));
        assert!(!allowed.permits(["Trades"]));
    }

    #[test]
    fn blank_subcategories_are_not_indexed() {
        let allowed = index().expand(&selected(&["Hospitality"]));
        assert!(!allowed.permits([""]));
        assert!(allowed.permits(["barista"]));
    }

    #[test]
    fn blank_selections_carry_no_constraint() {
        assert!(index().expand(&selected(&["  "])).is_unbounded());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let index = index();
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.get("hospitality").map(|c| c.name.as_str()),
            Some("Hospitality")
        );
        assert!(index.get("Retail").is_none());
    }
}
