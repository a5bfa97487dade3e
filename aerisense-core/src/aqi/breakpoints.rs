//! EPA breakpoint tables
//!
//! Each row maps a concentration band `[c_low, c_high]` onto an index band
//! `[i_low, i_high]`. Rows are ordered and non-overlapping. The small gaps
//! between rows (12.0 → 12.1 for PM2.5) reflect the precision the EPA
//! truncates concentrations to; a value inside a gap matches no row.

use super::pollutant::Pollutant;

/// One row of a breakpoint table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    /// Lowest concentration of the band
    pub c_low: f32,
    /// Highest concentration of the band
    pub c_high: f32,
    /// Index at `c_low`
    pub i_low: u16,
    /// Index at `c_high`
    pub i_high: u16,
}

impl Breakpoint {
    const fn new(c_low: f32, c_high: f32, i_low: u16, i_high: u16) -> Self {
        Self { c_low, c_high, i_low, i_high }
    }

    /// Whether `c` lies inside the band, edges included
    pub fn contains(&self, c: f32) -> bool {
        self.c_low <= c && c <= self.c_high
    }

    /// Linear interpolation of `c` onto the index band, unrounded
    pub fn interpolate(&self, c: f32) -> f32 {
        let slope = (self.i_high - self.i_low) as f32 / (self.c_high - self.c_low);
        slope * (c - self.c_low) + self.i_low as f32
    }
}

/// Highest index any table produces
pub const MAX_AQI: u16 = 500;

/// PM2.5, µg/m³, 24-hour average
pub const PM25: [Breakpoint; 7] = [
    Breakpoint::new(0.0, 12.0, 0, 50),
    Breakpoint::new(12.1, 35.4, 51, 100),
    Breakpoint::new(35.5, 55.4, 101, 150),
    Breakpoint::new(55.5, 150.4, 151, 200),
    Breakpoint::new(150.5, 250.4, 201, 300),
    Breakpoint::new(250.5, 350.4, 301, 400),
    Breakpoint::new(350.5, 500.4, 401, 500),
];

/// PM10, µg/m³, 24-hour average
pub const PM10: [Breakpoint; 7] = [
    Breakpoint::new(0.0, 54.0, 0, 50),
    Breakpoint::new(55.0, 154.0, 51, 100),
    Breakpoint::new(155.0, 254.0, 101, 150),
    Breakpoint::new(255.0, 354.0, 151, 200),
    Breakpoint::new(355.0, 424.0, 201, 300),
    Breakpoint::new(425.0, 504.0, 301, 400),
    Breakpoint::new(505.0, 604.0, 401, 500),
];

/// Ozone, ppb, 8-hour average
pub const O3: [Breakpoint; 5] = [
    Breakpoint::new(0.0, 54.0, 0, 50),
    Breakpoint::new(55.0, 70.0, 51, 100),
    Breakpoint::new(71.0, 85.0, 101, 150),
    Breakpoint::new(86.0, 105.0, 151, 200),
    Breakpoint::new(106.0, 200.0, 201, 300),
];

/// NO₂, ppb, 1-hour average
pub const NO2: [Breakpoint; 7] = [
    Breakpoint::new(0.0, 53.0, 0, 50),
    Breakpoint::new(54.0, 100.0, 51, 100),
    Breakpoint::new(101.0, 360.0, 101, 150),
    Breakpoint::new(361.0, 649.0, 151, 200),
    Breakpoint::new(650.0, 1249.0, 201, 300),
    Breakpoint::new(1250.0, 1649.0, 301, 400),
    Breakpoint::new(1650.0, 2049.0, 401, 500),
];

/// SO₂, ppb, 1-hour average
pub const SO2: [Breakpoint; 7] = [
    Breakpoint::new(0.0, 35.0, 0, 50),
    Breakpoint::new(36.0, 75.0, 51, 100),
    Breakpoint::new(76.0, 185.0, 101, 150),
    Breakpoint::new(186.0, 304.0, 151, 200),
    Breakpoint::new(305.0, 604.0, 201, 300),
    Breakpoint::new(605.0, 804.0, 301, 400),
    Breakpoint::new(805.0, 1004.0, 401, 500),
];

/// CO, ppm, 8-hour average
pub const CO: [Breakpoint; 7] = [
    Breakpoint::new(0.0, 4.4, 0, 50),
    Breakpoint::new(4.5, 9.4, 51, 100),
    Breakpoint::new(9.5, 12.4, 101, 150),
    Breakpoint::new(12.5, 15.4, 151, 200),
    Breakpoint::new(15.5, 30.4, 201, 300),
    Breakpoint::new(30.5, 40.4, 301, 400),
    Breakpoint::new(40.5, 50.4, 401, 500),
];

/// Table for a pollutant
pub fn table(pollutant: Pollutant) -> &'static [Breakpoint] {
    match pollutant {
        Pollutant::Pm25 => &PM25,
        Pollutant::Pm10 => &PM10,
        Pollutant::O3 => &O3,
        Pollutant::No2 => &NO2,
        Pollutant::So2 => &SO2,
        Pollutant::Co => &CO,
    }
}

/// Where a concentration falls in a table
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Inside a band
    Band(Breakpoint),
    /// Above the last band
    AboveTable,
    /// Below the first band, between two bands, or not a number
    Unmapped,
}

/// Locate `c` in `table`
pub fn locate(table: &[Breakpoint], c: f32) -> Placement {
    if !c.is_finite() {
        return Placement::Unmapped;
    }
    for bp in table {
        if bp.contains(c) {
            return Placement::Band(*bp);
        }
        if c < bp.c_low {
            return Placement::Unmapped;
        }
    }
    match table.last() {
        Some(_) => Placement::AboveTable,
        None => Placement::Unmapped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_ordered_and_contiguous_in_index() {
        for p in Pollutant::ALL {
            let t = table(p);
            assert_eq!(t[0].i_low, 0);
            for pair in t.windows(2) {
                assert!(pair[0].c_high < pair[1].c_low);
                assert_eq!(pair[0].i_high + 1, pair[1].i_low);
            }
        }
    }

    #[test]
    fn placement() {
        assert!(matches!(locate(&PM25, 12.0), Placement::Band(bp) if bp.i_high == 50));
        assert_eq!(locate(&PM25, 12.05), Placement::Unmapped);
        assert_eq!(locate(&CO, 4.45), Placement::Unmapped);
        assert_eq!(locate(&PM25, 600.0), Placement::AboveTable);
        assert_eq!(locate(&PM25, -1.0), Placement::Unmapped);
        assert_eq!(locate(&PM25, f32::NAN), Placement::Unmapped);
    }
}
