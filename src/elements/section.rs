//! Cross-section properties for beam elements

use serde::{Deserialize, Serialize};

/// Cross-section properties of a beam element
///
/// Area and second moment of area drive the stiffness formulation; the
/// remaining fields feed connection and stability checks downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Cross-sectional area in m²
    pub a: f64,
    /// Second moment of area about the bending axis in m⁴
    pub i: f64,
    /// Section height in m
    pub h: f64,
    /// Elastic section modulus in m³
    pub wel: Option<f64>,
    /// Plastic section modulus in m³
    pub wpl: Option<f64>,
    /// Flange width in m
    pub flange_width: Option<f64>,
    /// Flange thickness in m
    pub flange_thickness: Option<f64>,
    /// Web thickness in m
    pub web_thickness: Option<f64>,
    /// St. Venant torsion constant in m⁴
    pub it: Option<f64>,
    /// Warping constant in m⁶
    pub iw: Option<f64>,
    /// Catalog profile name, e.g. "IPE200"
    pub profile: Option<String>,
}

/// Rolled profile catalog row: (designation, h, b, tw, tf, A, I, Wel, Wpl)
/// in mm, mm, mm, mm, cm², cm⁴, cm³, cm³.
type CatalogRow = (u32, f64, f64, f64, f64, f64, f64, f64, f64);

#[rustfmt::skip]
const IPE: &[CatalogRow] = &[
    ( 80,  80.0,  46.0,  3.8,  5.2,   7.64,    80.1,   20.0,   23.2),
    (100, 100.0,  55.0,  4.1,  5.7,  10.3,    171.0,   34.2,   39.4),
    (120, 120.0,  64.0,  4.4,  6.3,  13.2,    318.0,   53.0,   60.7),
    (140, 140.0,  73.0,  4.7,  6.9,  16.4,    541.0,   77.3,   88.3),
    (160, 160.0,  82.0,  5.0,  7.4,  20.1,    869.0,  109.0,  124.0),
    (180, 180.0,  91.0,  5.3,  8.0,  23.9,   1317.0,  146.0,  166.0),
    (200, 200.0, 100.0,  5.6,  8.5,  28.5,   1943.0,  194.0,  221.0),
    (220, 220.0, 110.0,  5.9,  9.2,  33.4,   2772.0,  252.0,  285.0),
    (240, 240.0, 120.0,  6.2,  9.8,  39.1,   3892.0,  324.0,  367.0),
    (270, 270.0, 135.0,  6.6, 10.2,  45.9,   5790.0,  429.0,  484.0),
    (300, 300.0, 150.0,  7.1, 10.7,  53.8,   8356.0,  557.0,  628.0),
    (330, 330.0, 160.0,  7.5, 11.5,  62.6,  11770.0,  713.0,  804.0),
    (360, 360.0, 170.0,  8.0, 12.7,  72.73, 16270.0,  904.0, 1019.0),
    (400, 400.0, 180.0,  8.6, 13.5,  84.5,  23130.0, 1156.0, 1307.0),
    (450, 450.0, 190.0,  9.4, 14.6,  98.8,  33740.0, 1500.0, 1702.0),
    (500, 500.0, 200.0, 10.2, 16.0, 116.0,  48200.0, 1928.0, 2194.0),
    (550, 550.0, 210.0, 11.1, 17.2, 134.0,  67120.0, 2441.0, 2787.0),
    (600, 600.0, 220.0, 12.0, 19.0, 156.0,  92080.0, 3069.0, 3512.0),
];

#[rustfmt::skip]
const HEA: &[CatalogRow] = &[
    (100,  96.0, 100.0, 5.0,  8.0,  21.2,    349.2,   72.8,   83.0),
    (120, 114.0, 120.0, 5.0,  8.0,  25.3,    606.2,  106.3,  119.5),
    (140, 133.0, 140.0, 5.5,  8.5,  31.4,   1033.0,  155.4,  173.5),
    (160, 152.0, 160.0, 6.0,  9.0,  38.77,  1673.0,  220.1,  245.1),
    (180, 171.0, 180.0, 6.0,  9.5,  45.3,   2510.0,  293.6,  324.9),
    (200, 190.0, 200.0, 6.5, 10.0,  53.8,   3692.0,  388.6,  429.5),
    (220, 210.0, 220.0, 7.0, 11.0,  64.3,   5410.0,  515.2,  568.5),
    (240, 230.0, 240.0, 7.5, 12.0,  76.8,   7763.0,  675.1,  744.6),
    (300, 290.0, 300.0, 8.5, 14.0, 112.5,  18260.0, 1260.0, 1383.0),
];

#[rustfmt::skip]
const HEB: &[CatalogRow] = &[
    (100, 100.0, 100.0,  6.0, 10.0,  26.0,    449.5,   89.9,  104.2),
    (140, 140.0, 140.0,  7.0, 12.0,  43.0,   1509.0,  215.6,  245.4),
    (160, 160.0, 160.0,  8.0, 13.0,  54.3,   2492.0,  311.5,  354.0),
    (200, 200.0, 200.0,  9.0, 15.0,  78.1,   5696.0,  569.6,  642.5),
    (240, 240.0, 240.0, 10.0, 17.0, 106.0,  11260.0,  938.3, 1053.0),
    (300, 300.0, 300.0, 11.0, 19.0, 149.1,  25170.0, 1678.0, 1869.0),
];

fn from_catalog(series: &str, rows: &[CatalogRow], designation: u32) -> Option<Section> {
    let &(_, h, b, tw, tf, a, i, wel, wpl) = rows.iter().find(|r| r.0 == designation)?;
    Some(Section {
        a: a * 1e-4,
        i: i * 1e-8,
        h: h * 1e-3,
        wel: Some(wel * 1e-6),
        wpl: Some(wpl * 1e-6),
        flange_width: Some(b * 1e-3),
        flange_thickness: Some(tf * 1e-3),
        web_thickness: Some(tw * 1e-3),
        it: None,
        iw: None,
        profile: Some(format!("{series}{designation}")),
    })
}

impl Section {
    /// Create a section from the basic stiffness properties
    pub fn new(a: f64, i: f64, h: f64) -> Self {
        Self {
            a,
            i,
            h,
            wel: None,
            wpl: None,
            flange_width: None,
            flange_thickness: None,
            web_thickness: None,
            it: None,
            iw: None,
            profile: None,
        }
    }

    /// Solid rectangular section of the given width and depth
    pub fn rectangular(width: f64, depth: f64) -> Self {
        let a = width * depth;
        let i = width * depth.powi(3) / 12.0;

        // Torsion constant for a solid rectangle (approximate)
        let (long, short) = if width > depth {
            (width, depth)
        } else {
            (depth, width)
        };
        let it = long * short.powi(3) / 3.0 * (1.0 - 0.63 * short / long);

        Self {
            wel: Some(width * depth.powi(2) / 6.0),
            wpl: Some(width * depth.powi(2) / 4.0),
            it: Some(it),
            ..Self::new(a, i, depth)
        }
    }

    /// IPE rolled profile by designation, e.g. `Section::ipe(200)`
    pub fn ipe(designation: u32) -> Option<Self> {
        from_catalog("IPE", IPE, designation)
    }

    /// HEA rolled profile by designation
    pub fn hea(designation: u32) -> Option<Self> {
        from_catalog("HEA", HEA, designation)
    }

    /// HEB rolled profile by designation
    pub fn heb(designation: u32) -> Option<Self> {
        from_catalog("HEB", HEB, designation)
    }

    /// Look up a profile by name, e.g. "IPE200" or "HEB300"
    pub fn by_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_uppercase();
        if name.len() < 4 {
            return None;
        }
        let (series, rest) = name.split_at(3);
        let designation: u32 = rest.parse().ok()?;
        match series {
            "IPE" => Self::ipe(designation),
            "HEA" => Self::hea(designation),
            "HEB" => Self::heb(designation),
            _ => None,
        }
    }

    /// Radius of gyration
    pub fn radius_of_gyration(&self) -> f64 {
        (self.i / self.a).sqrt()
    }
}

impl Default for Section {
    fn default() -> Self {
        Self::rectangular(0.2, 0.2)
    }
}
