/// A national site scraped from its nps.gov detail page.
///
/// Every field falls back to a fixed sentinel when its markup is missing
/// (e.g. some sites have no designation, some list no zip+4), so a record
/// is always usable even when partially populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NationalSite {
    pub category: String,
    pub name: String,
    pub address: String,
    pub zipcode: String,
    pub phone: String,
}

impl NationalSite {
    pub fn info(&self) -> String {
        format!(
            "{} ({}): {} {}",
            self.name, self.category, self.address, self.zipcode
        )
    }
}

/// One entry from the nearby-places search, for immediate display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceRecord {
    pub name: String,
    pub category: String,
    pub address: String,
    pub city: String,
}

impl PlaceRecord {
    pub fn info(&self) -> String {
        format!(
            "{} ({}): {}, {}",
            self.name, self.category, self.address, self.city
        )
    }
}
