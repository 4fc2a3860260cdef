use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use nps_explorer::cache::CacheStore;
use nps_explorer::config::Config;
use nps_explorer::error::Result;
use nps_explorer::extract;
use nps_explorer::fetch::fetch_with_cache;
use nps_explorer::models::NationalSite;
use nps_explorer::places;

fn main() {
    if let Err(err) = run() {
        eprintln!("[Error] {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = Config::load()?;
    let mut cache = CacheStore::load(&config.cache_file);

    // The whole session depends on the state index; failure here is fatal.
    let states = build_state_index(&mut cache)?;

    loop {
        let input = prompt("Enter a state name (e.g. Michigan, michigan) or \"exit\": ");
        let input = input.trim();
        if input.eq_ignore_ascii_case("exit") {
            break;
        }

        let Some(state_url) = states.get(&input.to_lowercase()) else {
            println!("[Error] Enter a proper state name");
            println!();
            continue;
        };

        let sites = match sites_for_state(&mut cache, state_url) {
            Ok(sites) => sites,
            Err(err) => {
                println!("[Error] {err}");
                println!();
                continue;
            }
        };

        println!("--------------------------------------");
        println!("List of national sites in {input}");
        println!("--------------------------------------");
        for (number, site) in sites.iter().enumerate() {
            println!("[{}] {}", number + 1, site.info());
        }

        if !site_menu(&mut cache, &config, &sites) {
            break;
        }
    }
    Ok(())
}

/// Inner selection loop for one state's site list. Returns false when the
/// user asked to exit the program, true when they went back.
fn site_menu(cache: &mut CacheStore, config: &Config, sites: &[NationalSite]) -> bool {
    loop {
        let input = prompt("Choose the number for detail search or \"exit\" or \"back\": ");
        let input = input.trim();
        if input == "back" {
            return true;
        }
        if input.eq_ignore_ascii_case("exit") {
            return false;
        }

        let Some(index) = parse_selection(input, sites.len()) else {
            println!("[Error] Invalid input");
            println!();
            continue;
        };

        let site = &sites[index];
        match places::nearby(cache, &config.mapquest_api_key, site) {
            Ok(nearby) => {
                println!("--------------------------------------");
                println!("Places near {}", site.name);
                println!("--------------------------------------");
                for place in &nearby {
                    println!("- {}", place.info());
                }
            }
            Err(err) => {
                println!("[Error] {err}");
                println!();
            }
        }
    }
}

fn build_state_index(cache: &mut CacheStore) -> Result<HashMap<String, String>> {
    let body = fetch_with_cache(cache, "https://www.nps.gov/index.htm", &[])?;
    extract::parse_state_index(&body)
}

fn sites_for_state(cache: &mut CacheStore, state_url: &str) -> Result<Vec<NationalSite>> {
    let body = fetch_with_cache(cache, state_url, &[])?;
    let urls = extract::parse_park_list(&body)?;

    let mut sites = Vec::with_capacity(urls.len());
    for url in urls {
        let page = fetch_with_cache(cache, &url, &[])?;
        sites.push(extract::parse_site_detail(&page));
    }
    Ok(sites)
}

/// Parses a 1-based menu selection, returning the zero-based index.
fn parse_selection(input: &str, len: usize) -> Option<usize> {
    let number: usize = input.parse().ok()?;
    if (1..=len).contains(&number) {
        Some(number - 1)
    } else {
        None
    }
}

fn prompt(message: &str) -> String {
    print!("{message}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        // EOF behaves like "exit" so piped input terminates cleanly
        Ok(0) | Err(_) => "exit".to_string(),
        Ok(_) => line,
    }
}

#[cfg(test)]
mod tests {
    use super::parse_selection;

    #[test]
    fn selection_is_one_based_and_bounded() {
        assert_eq!(parse_selection("1", 3), Some(0));
        assert_eq!(parse_selection("3", 3), Some(2));
        assert_eq!(parse_selection("0", 3), None);
        assert_eq!(parse_selection("4", 3), None);
        assert_eq!(parse_selection("back-ish", 3), None);
        assert_eq!(parse_selection("-1", 3), None);
    }
}
