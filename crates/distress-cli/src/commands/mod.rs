pub mod bootstrap;
pub mod compute;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;

use distress_core::{
    PriceLevelTable, PriceRow, SlackRow, SlackSeries, SummaryBounds, WeightRow, WeightTable,
};

/// Print an error and exit. All input problems are fatal to the invocation.
pub fn fail(message: &str) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}

fn load_rows<T: DeserializeOwned>(path: &str, what: &str) -> Vec<T> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => fail(&format!("cannot read {what} from {path}: {err}")),
    };
    match serde_json::from_str(&text) {
        Ok(rows) => rows,
        Err(err) => fail(&format!("cannot parse {what} in {path}: {err}")),
    }
}

pub fn load_prices(path: &str) -> PriceLevelTable {
    let rows: Vec<PriceRow> = load_rows(path, "price level table");
    match PriceLevelTable::from_rows(rows) {
        Ok(table) => table,
        Err(err) => fail(&format!("invalid price level table in {path}: {err}")),
    }
}

pub fn load_weights(path: &str) -> WeightTable {
    let rows: Vec<WeightRow> = load_rows(path, "weight table");
    WeightTable::new(rows)
}

pub fn load_slack(path: &str) -> SlackSeries {
    let rows: Vec<SlackRow> = load_rows(path, "slack series");
    SlackSeries::new(rows)
}

/// Parse a `lowest,highest` boundary-label pair.
pub fn parse_bounds(raw: &str) -> SummaryBounds {
    match raw.split_once(',') {
        Some((lowest, highest)) if !lowest.trim().is_empty() && !highest.trim().is_empty() => {
            SummaryBounds {
                lowest: lowest.trim().to_string(),
                highest: highest.trim().to_string(),
            }
        }
        _ => fail(&format!(
            "invalid --bounds {raw:?}, expected \"LOWEST,HIGHEST\""
        )),
    }
}

pub fn write_json<T: Serialize>(path: &str, value: &T) {
    let json = match serde_json::to_string_pretty(value) {
        Ok(json) => json,
        Err(err) => fail(&format!("cannot serialize output: {err}")),
    };
    if let Err(err) = fs::write(path, json) {
        fail(&format!("cannot write {path}: {err}"));
    }
    println!("\nWrote {path}");
}
