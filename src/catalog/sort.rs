//! Listing sort keys and their total-order comparators.
//!
//! The server applies the ordering for remote listings; the comparators here
//! back the client-filtered mode and the order checks in tests. Every key
//! tie-breaks by ascending id, so each comparator is a total order over
//! records with distinct ids.

use std::cmp::Ordering;

use clap::ValueEnum;

use crate::model::Offer;

/// Available listing orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortKey {
    /// Registration order (ascending id). The default.
    #[default]
    RegistrationAsc,
    /// Most viewed first.
    PopularityDesc,
    /// Highest discount first.
    DiscountDesc,
    /// Lowest discount first.
    DiscountAsc,
    /// Soonest deadline first; offers without a parseable deadline last.
    DeadlineAsc,
    /// Latest deadline first; offers without a parseable deadline last.
    DeadlineDesc,
}

impl SortKey {
    /// Every key, in menu order.
    pub const ALL: [Self; 6] = [
        Self::RegistrationAsc,
        Self::PopularityDesc,
        Self::DiscountDesc,
        Self::DiscountAsc,
        Self::DeadlineAsc,
        Self::DeadlineDesc,
    ];

    /// Value of the `sort` query parameter. Hard wire contract.
    #[must_use]
    pub fn wire(self) -> &'static str {
        match self {
            Self::RegistrationAsc => "idAsc",
            Self::PopularityDesc => "popular",
            Self::DiscountDesc => "discountDesc",
            Self::DiscountAsc => "discountAsc",
            Self::DeadlineAsc => "deadlineAsc",
            Self::DeadlineDesc => "deadlineDesc",
        }
    }

    /// Menu label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::RegistrationAsc => "Registration",
            Self::PopularityDesc => "Most viewed",
            Self::DiscountDesc => "Discount high",
            Self::DiscountAsc => "Discount low",
            Self::DeadlineAsc => "Deadline soon",
            Self::DeadlineDesc => "Deadline late",
        }
    }

    /// Compares two offers under this key.
    ///
    /// Unparseable deadlines sort after parseable ones in both deadline
    /// directions, and every key falls back to ascending id on ties.
    #[must_use]
    pub fn compare(self, a: &Offer, b: &Offer) -> Ordering {
        let primary = match self {
            Self::RegistrationAsc => Ordering::Equal,
            Self::PopularityDesc => b.view_count.cmp(&a.view_count),
            Self::DiscountDesc => b.discount_percent.cmp(&a.discount_percent),
            Self::DiscountAsc => a.discount_percent.cmp(&b.discount_percent),
            Self::DeadlineAsc => match (a.deadline, b.deadline) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            Self::DeadlineDesc => match (a.deadline, b.deadline) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }

    /// Sorts `items` in place under this key.
    pub fn sort(self, items: &mut [Offer]) {
        items.sort_by(|a, b| self.compare(a, b));
    }

    /// Whether `items` is already ordered under this key.
    #[must_use]
    pub fn is_ordered(self, items: &[Offer]) -> bool {
        items
            .windows(2)
            .all(|pair| self.compare(&pair[0], &pair[1]) != Ordering::Greater)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn offer(id: u64, views: u64, discount: u8, deadline: Option<(i32, u32, u32)>) -> Offer {
        Offer {
            id,
            title: format!("Offer {id}"),
            merchant_name: String::new(),
            image_url: String::new(),
            category: String::new(),
            organization_tags: Vec::new(),
            benefit_type_tags: Vec::new(),
            view_count: views,
            discount_percent: discount,
            deadline_text: String::new(),
            deadline: deadline.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            is_featured: false,
        }
    }

    fn ids(items: &[Offer]) -> Vec<u64> {
        items.iter().map(|o| o.id).collect()
    }

    #[test]
    fn registration_orders_by_ascending_id() {
        let mut items = vec![offer(3, 0, 0, None), offer(1, 0, 0, None), offer(2, 0, 0, None)];
        SortKey::RegistrationAsc.sort(&mut items);
        assert_eq!(ids(&items), vec![1, 2, 3]);
    }

    #[test]
    fn popularity_breaks_ties_by_id() {
        let mut items = vec![
            offer(2, 10, 0, None),
            offer(1, 10, 0, None),
            offer(3, 50, 0, None),
        ];
        SortKey::PopularityDesc.sort(&mut items);
        assert_eq!(ids(&items), vec![3, 1, 2]);
    }

    #[test]
    fn discount_directions_are_mirrored() {
        let mut items = vec![offer(1, 0, 5, None), offer(2, 0, 30, None), offer(3, 0, 15, None)];
        SortKey::DiscountDesc.sort(&mut items);
        assert_eq!(ids(&items), vec![2, 3, 1]);
        SortKey::DiscountAsc.sort(&mut items);
        assert_eq!(ids(&items), vec![1, 3, 2]);
    }

    #[test]
    fn missing_deadlines_sort_last_in_both_directions() {
        let items = vec![
            offer(1, 0, 0, None),
            offer(2, 0, 0, Some((2026, 9, 1))),
            offer(3, 0, 0, Some((2026, 3, 1))),
        ];

        let mut asc = items.clone();
        SortKey::DeadlineAsc.sort(&mut asc);
        assert_eq!(ids(&asc), vec![3, 2, 1]);

        let mut desc = items;
        SortKey::DeadlineDesc.sort(&mut desc);
        assert_eq!(ids(&desc), vec![2, 3, 1]);
    }

    #[test]
    fn sorting_twice_equals_sorting_once() {
        let mut items = vec![
            offer(4, 7, 20, Some((2026, 5, 5))),
            offer(2, 7, 20, Some((2026, 5, 5))),
            offer(9, 1, 20, None),
        ];
        SortKey::PopularityDesc.sort(&mut items);
        let once = ids(&items);
        SortKey::PopularityDesc.sort(&mut items);
        assert_eq!(ids(&items), once);
        assert!(SortKey::PopularityDesc.is_ordered(&items));
    }

    #[test]
    fn is_ordered_detects_misordered_pages() {
        let items = vec![offer(1, 5, 0, None), offer(2, 9, 0, None)];
        assert!(!SortKey::PopularityDesc.is_ordered(&items));
        assert!(SortKey::PopularityDesc.is_ordered(&[]));
    }

    #[test]
    fn wire_names_are_stable() {
        let wires: Vec<&str> = SortKey::ALL.iter().map(|k| k.wire()).collect();
        assert_eq!(
            wires,
            vec!["idAsc", "popular", "discountDesc", "discountAsc", "deadlineAsc", "deadlineDesc"]
        );
    }
}
