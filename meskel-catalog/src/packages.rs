use serde::{Deserialize, Serialize};

/// A bookable tour package shown on the package-selection step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TourPackage {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_ref: String,
    pub icon_ref: String,
    pub color_token: String,
}

/// The fixed catalog. Consumed by the package step for display and by the
/// relay payload builder to resolve a human title from the selected id.
pub fn tour_packages() -> Vec<TourPackage> {
    vec![
        TourPackage {
            id: "rock-churches".to_string(),
            title: "Explore the iconic rock-hewn churches of Ethiopia".to_string(),
            description: "Journey through Ethiopia's spiritual wonders and ancient architecture with expert guides.".to_string(),
            image_ref: "/placeholder.svg".to_string(),
            icon_ref: "landmark".to_string(),
            color_token: "bg-purple-50".to_string(),
        },
        TourPackage {
            id: "walled-city".to_string(),
            title: "Discover the ancient walled city and its fascinating heritage".to_string(),
            description: "Step back in time as you explore traditional villages and experience authentic Ethiopian culture.".to_string(),
            image_ref: "/placeholder.svg".to_string(),
            icon_ref: "building".to_string(),
            color_token: "bg-blue-50".to_string(),
        },
        TourPackage {
            id: "erta-ale".to_string(),
            title: "Witness the Otherworldly Beauty of Erta Ale".to_string(),
            description: "Embark on an adventure to see the spectacular active lava lake of Erta Ale volcano.".to_string(),
            image_ref: "/placeholder.svg".to_string(),
            icon_ref: "mountain".to_string(),
            color_token: "bg-orange-50".to_string(),
        },
    ]
}

/// Look up a package by its id
pub fn find_package(id: &str) -> Option<TourPackage> {
    tour_packages().into_iter().find(|pkg| pkg.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_fixed() {
        let packages = tour_packages();
        assert_eq!(packages.len(), 3);

        let ids: Vec<&str> = packages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["rock-churches", "walled-city", "erta-ale"]);
    }

    #[test]
    fn test_find_package() {
        let pkg = find_package("erta-ale").unwrap();
        assert_eq!(pkg.title, "Witness the Otherworldly Beauty of Erta Ale");

        assert!(find_package("danakil").is_none());
        assert!(find_package("").is_none());
    }
}
