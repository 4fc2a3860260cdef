use std::collections::HashMap;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::NationalSite;

pub const NPS_HOST: &str = "https://www.nps.gov";

// Create static selectors to avoid recompiling them each time
static STATE_MENU: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("ul.dropdown-menu.SearchBar-keywordSearch")
        .expect("Failed to parse state menu selector")
});

static PARK_LIST: Lazy<Selector> =
    Lazy::new(|| Selector::parse("ul#list_parks").expect("Failed to parse park list selector"));

static PARK_HEADING: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h3").expect("Failed to parse park heading selector"));

static ANCHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("Failed to parse anchor selector"));

static HERO_DESIGNATION: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("span.Hero-designation").expect("Failed to parse designation selector")
});

static HERO_TITLE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.Hero-titleContainer a.Hero-title")
        .expect("Failed to parse title selector")
});

static ADDRESS_LOCALITY: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"p.adr span[itemprop="addressLocality"]"#)
        .expect("Failed to parse locality selector")
});

static ADDRESS_REGION: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"p.adr span[itemprop="addressRegion"]"#)
        .expect("Failed to parse region selector")
});

static POSTAL_CODE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("p.adr span.postal-code").expect("Failed to parse postal code selector")
});

static PHONE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.tel").expect("Failed to parse phone selector"));

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().map(element_text)
}

/// Builds the state-name-to-URL index from the nps.gov home page.
///
/// The navigation menu is required structure: without it no state can be
/// resolved, so its absence is an error rather than an empty index.
pub fn parse_state_index(html: &str) -> Result<HashMap<String, String>> {
    let document = Html::parse_document(html);
    let mut index = HashMap::new();
    let mut found_menu = false;

    for menu in document.select(&STATE_MENU) {
        found_menu = true;
        for link in menu.select(&ANCHOR) {
            if let Some(href) = link.value().attr("href") {
                index.insert(element_text(link).to_lowercase(), format!("{NPS_HOST}{href}"));
            }
        }
    }

    if !found_menu {
        return Err(AppError::Malformed(
            "state navigation menu not found on index page".to_string(),
        ));
    }
    Ok(index)
}

/// Extracts the detail-page URL for every park entry on a state page, in
/// document order. Order matters: the shell numbers sites by position.
pub fn parse_park_list(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let list = document.select(&PARK_LIST).next().ok_or_else(|| {
        AppError::Malformed("park list not found on state page".to_string())
    })?;

    let mut urls = Vec::new();
    for heading in list.select(&PARK_HEADING) {
        let Some(link) = heading.select(&ANCHOR).next() else {
            continue;
        };
        if let Some(href) = link.value().attr("href") {
            urls.push(format!("{NPS_HOST}{href}index.htm"));
        }
    }
    Ok(urls)
}

/// Assembles a `NationalSite` from a detail page. Each of the five fields
/// is extracted independently and falls back to its own sentinel, so a
/// partially malformed page still yields a usable record.
pub fn parse_site_detail(html: &str) -> NationalSite {
    let document = Html::parse_document(html);

    let category =
        first_text(&document, &HERO_DESIGNATION).unwrap_or_else(|| "No Category".to_string());
    let name = first_text(&document, &HERO_TITLE).unwrap_or_else(|| "No Name".to_string());

    let locality = first_text(&document, &ADDRESS_LOCALITY);
    let region = first_text(&document, &ADDRESS_REGION);
    let address = match (locality, region) {
        (Some(locality), Some(region)) => format!("{locality}, {region}"),
        _ => "No Address".to_string(),
    };

    let zipcode = first_text(&document, &POSTAL_CODE).unwrap_or_else(|| "No Zipcode".to_string());
    let phone = first_text(&document, &PHONE).unwrap_or_else(|| "No Phone Number".to_string());

    NationalSite {
        category,
        name,
        address,
        zipcode,
        phone,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL_PAGE: &str = r#"
        <html><body>
          <div class="Hero-titleContainer">
            <a href="/isro/" class="Hero-title">Isle Royale</a>
          </div>
          <span class="Hero-designation">National Park</span>
          <div class="vcard">
            <p class="adr">
              <span itemprop="addressLocality">Houghton</span>,
              <span itemprop="addressRegion">MI</span>
              <span class="postal-code" itemprop="postalCode">49931</span>
            </p>
            <span class="tel">(906) 482-0984</span>
          </div>
        </body></html>
    "#;

    #[test]
    fn state_index_from_single_link() {
        let html = r#"
            <ul class="dropdown-menu SearchBar-keywordSearch">
              <li><a href="/state/mi/index.htm">Michigan</a></li>
            </ul>
        "#;
        let index = parse_state_index(html).unwrap();
        assert_eq!(
            index.get("michigan").map(String::as_str),
            Some("https://www.nps.gov/state/mi/index.htm")
        );
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn state_names_are_lowercased() {
        let html = r#"
            <ul class="dropdown-menu SearchBar-keywordSearch">
              <li><a href="/state/ny/index.htm">New York</a></li>
              <li><a href="/state/mi/index.htm">Michigan</a></li>
            </ul>
        "#;
        let index = parse_state_index(html).unwrap();
        assert!(index.contains_key("new york"));
        assert!(index.contains_key("michigan"));
    }

    #[test]
    fn missing_state_menu_is_an_error() {
        let html = "<html><body><ul class=\"other-menu\"></ul></body></html>";
        let result = parse_state_index(html);
        assert!(matches!(result, Err(crate::error::AppError::Malformed(_))));
    }

    #[test]
    fn park_list_preserves_document_order() {
        let html = r#"
            <ul id="list_parks">
              <li><h3><a href="/isro/">Isle Royale</a></h3></li>
              <li><h3><a href="/piro/">Pictured Rocks</a></h3></li>
              <li><h3><a href="/slbe/">Sleeping Bear Dunes</a></h3></li>
            </ul>
        "#;
        let urls = parse_park_list(html).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://www.nps.gov/isro/index.htm",
                "https://www.nps.gov/piro/index.htm",
                "https://www.nps.gov/slbe/index.htm",
            ]
        );
    }

    #[test]
    fn missing_park_list_is_an_error() {
        let result = parse_park_list("<html><body><p>nothing here</p></body></html>");
        assert!(matches!(result, Err(crate::error::AppError::Malformed(_))));
    }

    #[test]
    fn detail_page_with_all_fields() {
        let site = parse_site_detail(DETAIL_PAGE);
        assert_eq!(site.category, "National Park");
        assert_eq!(site.name, "Isle Royale");
        assert_eq!(site.address, "Houghton, MI");
        assert_eq!(site.zipcode, "49931");
        assert_eq!(site.phone, "(906) 482-0984");
    }

    #[test]
    fn missing_phone_leaves_other_fields_intact() {
        let html = DETAIL_PAGE.replace(r#"<span class="tel">(906) 482-0984</span>"#, "");
        let site = parse_site_detail(&html);
        assert_eq!(site.phone, "No Phone Number");
        assert_eq!(site.category, "National Park");
        assert_eq!(site.name, "Isle Royale");
        assert_eq!(site.address, "Houghton, MI");
        assert_eq!(site.zipcode, "49931");
    }

    #[test]
    fn detail_page_with_only_category_and_name() {
        let html = r#"
            <div class="Hero-titleContainer">
              <a href="/yell/" class="Hero-title">Yellowstone</a>
            </div>
            <span class="Hero-designation">National Park</span>
        "#;
        let site = parse_site_detail(html);
        assert_eq!(site.category, "National Park");
        assert_eq!(site.name, "Yellowstone");
        assert_eq!(site.address, "No Address");
        assert_eq!(site.zipcode, "No Zipcode");
        assert_eq!(site.phone, "No Phone Number");
    }

    #[test]
    fn address_needs_both_locality_and_region() {
        let html = r#"
            <p class="adr">
              <span itemprop="addressLocality">Houghton</span>
            </p>
        "#;
        let site = parse_site_detail(html);
        assert_eq!(site.address, "No Address");
    }

    #[test]
    fn blank_detail_page_is_all_sentinels() {
        let site = parse_site_detail("<html><body></body></html>");
        assert_eq!(site.category, "No Category");
        assert_eq!(site.name, "No Name");
        assert_eq!(site.address, "No Address");
        assert_eq!(site.zipcode, "No Zipcode");
        assert_eq!(site.phone, "No Phone Number");
    }
}
