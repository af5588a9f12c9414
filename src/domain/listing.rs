use serde::Deserialize;
use uuid::Uuid;

use crate::entities::tour::{self, TourStatus};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TourSort {
    Title,
    Newest,
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Filter/sort parameters for the tour table views. The admin view exposes
/// all of them; the public listing pins `status` to published.
#[derive(Debug, Default, Deserialize)]
pub struct TourQuery {
    pub search: Option<String>,
    pub status: Option<TourStatus>,
    pub destination_id: Option<Uuid>,
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub sort: Option<TourSort>,
    pub order: Option<SortOrder>,
}

/// Filter and sort an in-memory tour collection. The admin panel and public
/// listing both load the full set and narrow it here rather than pushing
/// predicates into SQL; fine at this catalogue size.
pub fn filter_tours(mut tours: Vec<tour::Model>, query: &TourQuery) -> Vec<tour::Model> {
    if let Some(search) = query.search.as_deref() {
        let needle = search.to_lowercase();
        tours.retain(|t| t.title.to_lowercase().contains(&needle));
    }

    if let Some(status) = &query.status {
        tours.retain(|t| t.status == *status);
    }

    if let Some(destination_id) = query.destination_id {
        tours.retain(|t| t.destination_id == Some(destination_id));
    }

    if let Some(category) = query.category.as_deref() {
        tours.retain(|t| t.category.as_deref() == Some(category));
    }

    if let Some(featured) = query.featured {
        tours.retain(|t| t.featured == featured);
    }

    let sort = query.sort.unwrap_or(TourSort::Newest);
    match sort {
        TourSort::Title => tours.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase())),
        TourSort::Newest => tours.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        TourSort::Price => tours.sort_by(|a, b| {
            let pa = a.starting_price_from.or(a.price_usd).unwrap_or(f64::MAX);
            let pb = b.starting_price_from.or(b.price_usd).unwrap_or(f64::MAX);
            pa.partial_cmp(&pb).unwrap_or(std::cmp::Ordering::Equal)
        }),
    }

    // Newest already reads most-recent-first; an explicit order flips any sort.
    if let Some(order) = query.order {
        let default_desc = sort == TourSort::Newest;
        let want_desc = order == SortOrder::Desc;
        if default_desc != want_desc {
            tours.reverse();
        }
    }

    tours
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::tour::{FaqList, Itinerary, PackageCache, PackageType, StringList};
    use chrono::{Duration, Utc};

    fn tour(title: &str, status: TourStatus, price: Option<f64>, age_days: i64) -> tour::Model {
        tour::Model {
            id: Uuid::new_v4(),
            title: title.to_string(),
            slug: title.to_lowercase().replace(' ', "-"),
            short_description: None,
            long_description: None,
            category: Some("trekking".to_string()),
            difficulty: None,
            hero_image_url: None,
            gallery_image_urls: StringList::default(),
            destination_id: None,
            destination_name: None,
            activities_label: None,
            difficulty_level: None,
            duration_days: None,
            age_min: None,
            age_max: None,
            group_size_min: None,
            group_size_max: None,
            featured: false,
            status,
            itinerary: Itinerary::default(),
            includes: StringList::default(),
            excludes: StringList::default(),
            faqs: FaqList::default(),
            price_usd: price,
            starting_price_from: price,
            package_type: PackageType::Single,
            primary_price_category: None,
            price_packages_cache: PackageCache::default(),
            created_at: (Utc::now() - Duration::days(age_days)).fixed_offset(),
            updated_at: Utc::now().fixed_offset(),
        }
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let tours = vec![
            tour("Inca Trail Trek", TourStatus::Published, Some(500.0), 1),
            tour("Bogota City Walk", TourStatus::Published, Some(40.0), 2),
        ];

        let query = TourQuery {
            search: Some("inca".to_string()),
            ..Default::default()
        };
        let result = filter_tours(tours, &query);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Inca Trail Trek");
    }

    #[test]
    fn test_status_filter() {
        let tours = vec![
            tour("Draft Tour", TourStatus::Draft, None, 1),
            tour("Live Tour", TourStatus::Published, Some(100.0), 2),
        ];

        let query = TourQuery {
            status: Some(TourStatus::Published),
            ..Default::default()
        };
        let result = filter_tours(tours, &query);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Live Tour");
    }

    #[test]
    fn test_destination_filter() {
        let destination_id = Uuid::new_v4();
        let mut matching = tour("In Bogota", TourStatus::Published, None, 1);
        matching.destination_id = Some(destination_id);
        let other = tour("Elsewhere", TourStatus::Published, None, 2);

        let query = TourQuery {
            destination_id: Some(destination_id),
            ..Default::default()
        };
        let result = filter_tours(vec![matching, other], &query);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "In Bogota");
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let tours = vec![
            tour("Older", TourStatus::Published, None, 10),
            tour("Newer", TourStatus::Published, None, 1),
        ];

        let result = filter_tours(tours, &TourQuery::default());
        assert_eq!(result[0].title, "Newer");
    }

    #[test]
    fn test_price_sort_ascending_with_missing_prices_last() {
        let tours = vec![
            tour("Pricey", TourStatus::Published, Some(900.0), 1),
            tour("No Price", TourStatus::Published, None, 2),
            tour("Cheap", TourStatus::Published, Some(50.0), 3),
        ];

        let query = TourQuery {
            sort: Some(TourSort::Price),
            ..Default::default()
        };
        let result = filter_tours(tours, &query);
        assert_eq!(result[0].title, "Cheap");
        assert_eq!(result[1].title, "Pricey");
        assert_eq!(result[2].title, "No Price");
    }

    #[test]
    fn test_explicit_order_flips_sort() {
        let tours = vec![
            tour("Alpha", TourStatus::Published, None, 1),
            tour("Zulu", TourStatus::Published, None, 2),
        ];

        let query = TourQuery {
            sort: Some(TourSort::Title),
            order: Some(SortOrder::Desc),
            ..Default::default()
        };
        let result = filter_tours(tours, &query);
        assert_eq!(result[0].title, "Zulu");
    }
}
