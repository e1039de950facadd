//! Instants of true new moon.
//!
//! Clean-room implementation from Meeus, *Astronomical Algorithms*, ch. 49
//! (mean phase plus 25 periodic and 14 planetary correction terms).
//! Accuracy is a few seconds of time over 1900–2100.

/// JDE of the mean new moon of lunation 0 (2000-01-06).
const LUNATION_EPOCH_JDE: f64 = 2_451_550.097_66;

/// Mean synodic month, days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_861;

/// Planetary arguments `(a0, a1, a2, coefficient × 1e6)` from Meeus table 49.B.
const PLANETARY_TERMS: [(f64, f64, f64, f64); 14] = [
    (299.77, 0.107_408, -0.009_173, 325.0),
    (251.88, 0.016_321, 0.0, 165.0),
    (251.83, 26.651_886, 0.0, 164.0),
    (349.42, 36.412_478, 0.0, 126.0),
    (84.66, 18.206_239, 0.0, 110.0),
    (141.74, 53.303_771, 0.0, 62.0),
    (207.14, 2.453_732, 0.0, 60.0),
    (154.84, 7.306_860, 0.0, 56.0),
    (34.52, 27.261_239, 0.0, 47.0),
    (207.19, 0.121_824, 0.0, 42.0),
    (291.34, 1.844_379, 0.0, 40.0),
    (161.72, 24.198_154, 0.0, 37.0),
    (239.56, 25.513_099, 0.0, 35.0),
    (331.55, 3.592_518, 0.0, 23.0),
];

/// TT instant (JDE) of the true new moon of lunation `k`.
///
/// `k = 0` is the new moon of 2000-01-06; negative values run backwards.
pub fn new_moon_jde(k: i64) -> f64 {
    let k = k as f64;
    let t = k / 1236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let jde = LUNATION_EPOCH_JDE + SYNODIC_MONTH_DAYS * k + 0.000_154_37 * t2 - 0.000_000_150 * t3
        + 0.000_000_000_73 * t4;

    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;
    let m = (2.5534 + 29.105_356_70 * k - 0.000_001_4 * t2 - 0.000_000_11 * t3).to_radians();
    let mp = (201.5643 + 385.816_935_28 * k + 0.010_758_2 * t2 + 0.000_012_38 * t3
        - 0.000_000_058 * t4)
        .to_radians();
    let f = (160.7108 + 390.670_502_84 * k - 0.001_611_8 * t2 - 0.000_002_27 * t3
        + 0.000_000_011 * t4)
        .to_radians();
    let om = (124.7746 - 1.563_755_88 * k + 0.002_067_2 * t2 + 0.000_002_15 * t3).to_radians();

    let periodic = -0.40720 * mp.sin()
        + 0.17241 * e * m.sin()
        + 0.01608 * (2.0 * mp).sin()
        + 0.01039 * (2.0 * f).sin()
        + 0.00739 * e * (mp - m).sin()
        - 0.00514 * e * (mp + m).sin()
        + 0.00208 * e * e * (2.0 * m).sin()
        - 0.00111 * (mp - 2.0 * f).sin()
        - 0.00057 * (mp + 2.0 * f).sin()
        + 0.00056 * e * (2.0 * mp + m).sin()
        - 0.00042 * (3.0 * mp).sin()
        + 0.00042 * e * (m + 2.0 * f).sin()
        + 0.00038 * e * (m - 2.0 * f).sin()
        - 0.00024 * e * (2.0 * mp - m).sin()
        - 0.00017 * om.sin()
        - 0.00007 * (mp + 2.0 * m).sin()
        + 0.00004 * (2.0 * mp - 2.0 * f).sin()
        + 0.00004 * (3.0 * m).sin()
        + 0.00003 * (mp + m - 2.0 * f).sin()
        + 0.00003 * (2.0 * mp + 2.0 * f).sin()
        - 0.00003 * (mp + m + 2.0 * f).sin()
        + 0.00003 * (mp - m + 2.0 * f).sin()
        - 0.00002 * (mp - m - 2.0 * f).sin()
        - 0.00002 * (3.0 * mp + m).sin()
        + 0.00002 * (4.0 * mp).sin();

    let planetary: f64 = PLANETARY_TERMS
        .iter()
        .map(|&(a0, a1, a2, coeff)| coeff * 1e-6 * (a0 + a1 * k + a2 * t2).to_radians().sin())
        .sum();

    jde + periodic + planetary
}

/// Lunation number whose mean new moon falls nearest to `jde`.
pub fn nearest_lunation(jde: f64) -> i64 {
    ((jde - LUNATION_EPOCH_JDE) / SYNODIC_MONTH_DAYS).round() as i64
}
