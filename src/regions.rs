use walkers::Position;

/// A named point of interest shown on the map with a descriptive popup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub name: &'static str,
    /// (lon, lat), the order the map stack uses everywhere.
    pub coords: (f64, f64),
    pub description: &'static str,
    pub tag: &'static str,
}

impl Region {
    pub fn position(&self) -> Position {
        walkers::lat_lon(self.coords.1, self.coords.0)
    }

    /// Path under the charter site listing trips for this region.
    pub fn link_path(&self) -> String {
        format!("/tag/{}/", self.tag)
    }
}

/// The sailing regions served by the charter fleet. Static, defined at
/// startup, never mutated.
pub const REGIONS: [Region; 8] = [
    Region {
        name: "Bodrum",
        coords: (27.4295, 37.0344),
        description: "Historic peninsula with vibrant marina life",
        tag: "bodrum-region",
    },
    Region {
        name: "Datça",
        coords: (27.6870, 36.7260),
        description: "Unspoiled peninsula between two seas",
        tag: "datca-region",
    },
    Region {
        name: "Bozburun",
        coords: (28.0570, 36.6880),
        description: "Traditional gulet-building village",
        tag: "bozburun-region",
    },
    Region {
        name: "Marmaris",
        coords: (28.2740, 36.8510),
        description: "Major charter hub and marina town",
        tag: "marmaris-region",
    },
    Region {
        name: "Göcek",
        coords: (28.9400, 36.7550),
        description: "Sheltered bay with world-class marinas",
        tag: "gocek-region",
    },
    Region {
        name: "Fethiye",
        coords: (29.1145, 36.6515),
        description: "Gateway to the Twelve Islands",
        tag: "fethiye-region",
    },
    Region {
        name: "Kaş",
        coords: (29.6380, 36.2000),
        description: "Charming harbour town near Greek islands",
        tag: "kas-region",
    },
    Region {
        name: "Greek Dodecanese",
        coords: (27.1350, 36.8930),
        description: "Kos, Rhodes, Symi and more",
        tag: "greek-dodecanese-islands",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn registry_has_eight_unique_regions() {
        assert_eq!(REGIONS.len(), 8);
        let tags: HashSet<_> = REGIONS.iter().map(|r| r.tag).collect();
        assert_eq!(tags.len(), REGIONS.len(), "duplicate tag in registry");
        let names: HashSet<_> = REGIONS.iter().map(|r| r.name).collect();
        assert_eq!(names.len(), REGIONS.len(), "duplicate name in registry");
    }

    #[test]
    fn link_paths_follow_site_convention() {
        for region in &REGIONS {
            let path = region.link_path();
            assert!(path.starts_with("/tag/"), "{}", path);
            assert!(path.ends_with('/'), "{}", path);
            assert_eq!(path, format!("/tag/{}/", region.tag));
        }
    }

    #[test]
    fn coordinates_lie_in_the_aegean() {
        for region in &REGIONS {
            let (lon, lat) = region.coords;
            assert!((26.0..31.0).contains(&lon), "{} lon {}", region.name, lon);
            assert!((35.0..38.0).contains(&lat), "{} lat {}", region.name, lat);
        }
    }
}
