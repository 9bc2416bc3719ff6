use std::collections::BTreeMap;

use crate::foundation::core::GeoPoint;

/// Radar center and image scale for one product id.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StationMeta {
    pub center: GeoPoint,
    pub km_per_pixel: f64,
}

impl StationMeta {
    /// Used for product ids missing from the table. Markers placed with it are not meaningful.
    pub const FALLBACK: Self = Self {
        center: GeoPoint { lat: 0.0, lon: 0.0 },
        km_per_pixel: 1.0,
    };
}

/// A table entry: product id plus site name and range.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Station {
    pub product_id: String,
    pub site: &'static str,
    pub range_km: u32,
    pub meta: StationMeta,
}

// Product ids are `<site code><range digit>`; the digit selects the range and scale.
const RANGES: [(char, u32, f64); 4] = [('1', 512, 4.0), ('2', 256, 2.0), ('3', 128, 1.0), ('4', 64, 0.5)];

// (site code, name, latitude, longitude)
const SITES: &[(&str, &str, f64, f64)] = &[
    // Northern Territory
    ("IDR63", "Darwin (Berrimah)", -12.457, 130.925),
    ("IDR112", "Gove", -12.27, 136.82),
    ("IDR42", "Katherine (Tindal)", -14.521, 132.378),
    // Western Australia
    ("IDR39", "Halls Creek", -18.229, 127.66),
    ("IDR17", "Broome", -17.951, 122.235),
    ("IDR16", "Port Hedland", -20.372, 118.631),
    ("IDR111", "Karratha", -20.7375, 116.8467),
    ("IDR114", "Carnarvon", -24.888, 113.671),
    ("IDR06", "Geraldton", -28.778333, 114.614444),
    ("IDR70", "Perth (Serpentine)", -32.393, 115.867),
    ("IDR31", "Albany", -34.941806, 117.816361),
    ("IDR32", "Esperance", -33.859444, 121.891111),
    // South Australia
    ("IDR27", "Woomera", -31.144, 136.818),
    ("IDR64", "Adelaide (Buckland Park)", -34.617, 138.469),
    ("IDR14", "Mt Gambier", -37.747, 140.774),
    // Victoria
    ("IDR97", "Mildura", -34.287111, 141.598194),
    ("IDR95", "Rainbow", -35.997556, 142.013306),
    ("IDR02", "Melbourne", -37.855222, 144.755417),
    ("IDR68", "Bairnsdale", -37.885, 147.567),
    // Tasmania
    ("IDR76", "Hobart", -42.832, 147.502),
    // New South Wales
    ("IDR55", "Wagga Wagga", -35.165, 147.457),
    ("IDR94", "Hillston", -33.552194, 145.52861),
    ("IDR96", "Yeoval", -32.744472, 148.708083),
    ("IDR71", "Sydney (Terrey Hills)", -33.70083, 151.209417),
    ("IDR04", "Newcastle", -32.852, 151.385),
    ("IDR28", "Grafton", -29.623, 152.982),
    // Queensland
    ("IDR66", "Brisbane (Mt Stapylton)", -27.501667, 153.116389),
    ("IDR50", "Marburg", -27.658056, 152.595556),
    ("IDR108", "Toowoomba", -27.56, 151.95),
    ("IDR08", "Gympie", -26.183, 152.667),
    ("IDR23", "Gladstone", -23.847, 151.263),
    ("IDR72", "Emerald", -23.534, 148.164),
    ("IDR107", "Richmond", -20.702, 143.143),
    ("IDR106", "Townsville", -19.406, 146.77),
    ("IDR74", "Greenvale", -19.252222, 145.018056),
    ("IDR19", "Cairns", -16.885, 145.755),
    ("IDR41", "Willis Island", -16.289, 149.972),
    // Australian Capital Territory
    ("IDR40", "Canberra", -35.3075, 149.191),
];

/// Immutable product-id lookup, built once at startup and shared by reference.
#[derive(Clone, Debug)]
pub struct StationTable {
    stations: BTreeMap<String, Station>,
}

impl StationTable {
    /// Every Australian radar site at its 512, 256, 128 and 64 km products.
    pub fn australia() -> Self {
        let mut stations = BTreeMap::new();
        for &(code, site, lat, lon) in SITES {
            for (digit, range_km, km_per_pixel) in RANGES {
                let product_id = format!("{code}{digit}");
                stations.insert(
                    product_id.clone(),
                    Station {
                        product_id,
                        site,
                        range_km,
                        meta: StationMeta {
                            center: GeoPoint::new(lat, lon),
                            km_per_pixel,
                        },
                    },
                );
            }
        }
        Self { stations }
    }

    pub fn get(&self, product_id: &str) -> Option<&Station> {
        self.stations.get(product_id)
    }

    /// Center and scale for `product_id`, or [`StationMeta::FALLBACK`] with a warning.
    pub fn lookup(&self, product_id: &str) -> StationMeta {
        match self.get(product_id) {
            Some(station) => station.meta,
            None => {
                tracing::warn!(
                    product_id,
                    "radar metadata not found; using defaults, marker may be misplaced"
                );
                StationMeta::FALLBACK
            }
        }
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }
}

impl Default for StationTable {
    fn default() -> Self {
        Self::australia()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geo/stations.rs"]
mod tests;
