//! Target categories and the curated hotspot lists.
//!
//! The hotspot lists are compiled-in constants. They are handed to the
//! pipeline explicitly through [`HOTSPOT_LISTS`] rather than read from any
//! global state.

use std::fmt;

/// One of the five output categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Every network block of the country, fetched at runtime
    AllRussia,
    /// Hikvision devices (port 8000)
    Hikvision8000,
    /// SmartPSS clients (port 3000)
    SmartPss3000,
    /// Web interfaces (port 80)
    Web80,
    /// Dahua/Hikvision cameras (port 37777)
    Camera37777,
}

impl Category {
    /// All categories in output order.
    pub const ALL: [Category; 5] = [
        Category::AllRussia,
        Category::Hikvision8000,
        Category::SmartPss3000,
        Category::Web80,
        Category::Camera37777,
    ];

    /// File stem used for the category's output file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::AllRussia => "all_russia",
            Category::Hikvision8000 => "hikvision_8000",
            Category::SmartPss3000 => "smartpss_3000",
            Category::Web80 => "web_80",
            Category::Camera37777 => "camera_37777",
        }
    }

    /// Label used in the run summary.
    pub fn label(&self) -> &'static str {
        match self {
            Category::AllRussia => "All Russia",
            Category::Hikvision8000 => "Hikvision (8000)",
            Category::SmartPss3000 => "SmartPSS (3000)",
            Category::Web80 => "Web (80)",
            Category::Camera37777 => "Cameras (37777)",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.txt", self.as_str())
    }

    pub fn is_bulk(&self) -> bool {
        matches!(self, Category::AllRussia)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// A named, ordered list of CIDR literals for one hotspot category.
#[derive(Debug, Clone, Copy)]
pub struct HotspotList {
    pub category: Category,
    pub cidrs: &'static [&'static str],
}

/// Port 8000
pub const HIKVISION_8000: &[&str] = &[
    // Rostelecom
    "31.173.0.0/16", "95.165.0.0/16", "178.140.0.0/16", "188.170.0.0/16",
    "62.109.0.0/16", "85.26.0.0/16", "79.141.0.0/16", "31.130.0.0/16",
    // MTS business
    "37.9.0.0/16", "37.44.0.0/16", "46.180.0.0/16", "46.188.0.0/16",
    "37.110.0.0/16", "37.145.0.0/16",
    // Beeline
    "77.37.0.0/16", "78.36.0.0/16", "87.117.0.0/16", "89.22.0.0/16",
    "77.121.0.0/16", "78.107.0.0/16",
    // Dom.ru
    "109.111.0.0/16", "176.196.0.0/16", "176.197.0.0/16", "109.124.0.0/16",
    // TTK
    "85.26.0.0/16", "79.141.0.0/16", "93.170.0.0/16", "94.139.0.0/16",
    // Government and business networks
    "85.113.0.0/16", "86.57.0.0/16", "95.24.0.0/16", "128.204.0.0/16",
    "176.108.0.0/16", "178.219.0.0/16", "188.186.0.0/16",
];

/// Port 3000
pub const SMARTPSS_3000: &[&str] = &[
    // Large business networks
    "93.170.0.0/16", "94.139.0.0/16", "95.24.0.0/16",
    "109.124.0.0/16", "109.200.0.0/16", "128.204.0.0/16",
    "176.108.0.0/16", "178.219.0.0/16",
    // Office camera networks
    "85.113.0.0/16", "86.57.0.0/16", "87.117.0.0/16",
    "91.76.0.0/16", "91.224.0.0/16", "92.63.0.0/16",
];

/// Port 80
pub const WEB_80: &[&str] = &[
    "31.173.0.0/16", "95.165.0.0/16", "178.140.0.0/16",
    "37.9.0.0/16", "46.180.0.0/16", "77.37.0.0/16",
    "109.111.0.0/16", "176.196.0.0/16", "85.26.0.0/16",
];

/// Port 37777
pub const CAMERA_37777: &[&str] = &[
    "31.173.0.0/16", "95.165.0.0/16", "178.140.0.0/16", // Rostelecom
    "37.9.0.0/16", "46.180.0.0/16",                     // MTS
    "77.37.0.0/16", "78.36.0.0/16",                     // Beeline
    "109.111.0.0/16", "176.196.0.0/16",                 // Dom.ru
    "85.26.0.0/16", "79.141.0.0/16",                    // TTK
    // Business networks
    "93.170.0.0/16", "94.139.0.0/16", "95.24.0.0/16",
    "109.124.0.0/16", "128.204.0.0/16",
    // Regional providers
    "31.41.0.0/16", "46.138.0.0/16", "83.239.0.0/16",
    "89.189.0.0/16", "91.76.0.0/16", "92.63.0.0/16",
];

/// The four curated hotspot lists, in category order.
pub const HOTSPOT_LISTS: [HotspotList; 4] = [
    HotspotList {
        category: Category::Hikvision8000,
        cidrs: HIKVISION_8000,
    },
    HotspotList {
        category: Category::SmartPss3000,
        cidrs: SMARTPSS_3000,
    },
    HotspotList {
        category: Category::Web80,
        cidrs: WEB_80,
    },
    HotspotList {
        category: Category::Camera37777,
        cidrs: CAMERA_37777,
    },
];
