use serde::Serialize;

/// Centre of India, shown when no pin code matches
pub const DEFAULT_CENTER: [f64; 2] = [20.5937, 78.9629];
pub const DEFAULT_ZOOM: u8 = 4;
pub const CITY_ZOOM: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CourtTier {
    SupremeCourt,
    HighCourt,
    DistrictCourt,
}

impl CourtTier {
    /// Marker colour for the map widget
    pub fn color(&self) -> &'static str {
        match self {
            CourtTier::SupremeCourt => "red",
            CourtTier::HighCourt => "blue",
            CourtTier::DistrictCourt => "green",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Court {
    pub name: &'static str,
    pub coords: [f64; 2],
    pub tier: CourtTier,
}

pub const COURTS: [Court; 8] = [
    Court {
        name: "Supreme Court of India",
        coords: [28.6151, 77.2390],
        tier: CourtTier::SupremeCourt,
    },
    Court {
        name: "Allahabad High Court",
        coords: [25.4542, 81.8267],
        tier: CourtTier::HighCourt,
    },
    Court {
        name: "Bombay High Court",
        coords: [18.9221, 72.8335],
        tier: CourtTier::HighCourt,
    },
    Court {
        name: "Madras High Court",
        coords: [13.0886, 80.2858],
        tier: CourtTier::HighCourt,
    },
    Court {
        name: "Delhi High Court",
        coords: [28.6120, 77.2285],
        tier: CourtTier::HighCourt,
    },
    Court {
        name: "Bandra Kurla Complex Court, Mumbai",
        coords: [19.0664, 72.8687],
        tier: CourtTier::DistrictCourt,
    },
    Court {
        name: "Tis Hazari Courts, Delhi",
        coords: [28.6657, 77.2104],
        tier: CourtTier::DistrictCourt,
    },
    Court {
        name: "Egmore Court, Chennai",
        coords: [13.0768, 80.2586],
        tier: CourtTier::DistrictCourt,
    },
];

// Demonstration data only, one head post office per metro
const PIN_CODES: [(&str, &str, [f64; 2]); 6] = [
    ("110001", "New Delhi", [28.6139, 77.2090]),
    ("400001", "Mumbai", [18.9750, 72.8258]),
    ("700001", "Kolkata", [22.5726, 88.3639]),
    ("600001", "Chennai", [13.0827, 80.2707]),
    ("560001", "Bengaluru", [12.9716, 77.5946]),
    ("500001", "Hyderabad", [17.3850, 78.4867]),
];

/// Where the map widget should centre itself
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: [f64; 2],
    pub zoom: u8,
    pub place: Option<&'static str>,
    /// False when a pin code was given but is not in the demonstration data
    pub found: bool,
}

/// Resolve an optional pin code to a map view
pub fn locate(pin_code: Option<&str>) -> MapView {
    let pin_code = pin_code.map(str::trim).filter(|p| !p.is_empty());

    match pin_code {
        None => MapView {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            place: None,
            found: true,
        },
        Some(pin) => match PIN_CODES.iter().find(|(code, _, _)| *code == pin) {
            Some((_, place, coords)) => MapView {
                center: *coords,
                zoom: CITY_ZOOM,
                place: Some(*place),
                found: true,
            },
            None => MapView {
                center: DEFAULT_CENTER,
                zoom: DEFAULT_ZOOM,
                place: None,
                found: false,
            },
        },
    }
}
