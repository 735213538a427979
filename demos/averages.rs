//! demos/averages.rs
//!
//! Prints the monthly averages for a year range, fetched from an endpoint that
//! serves `temperature.json` and `precipitation.json`.
//!
//! To run this demo:
//! cargo run --example averages -- http://localhost:8080/d temperature 1950 1980

use meteohistory::{DataType, MeteoHistory, Selection, MAX_YEAR, MIN_YEAR};
use std::env;
use std::error::Error;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);
    let base_url = args
        .next()
        .ok_or("usage: averages <base-url> [data-type] [from] [to]")?;
    let data_type: DataType = args.next().as_deref().unwrap_or("temperature").parse()?;
    let from: i32 = args.next().map_or(Ok(MIN_YEAR), |s| s.parse())?;
    let to: i32 = args.next().map_or(Ok(MAX_YEAR), |s| s.parse())?;
    let selection = Selection::new(data_type, from, to)?;

    let client = MeteoHistory::builder().base_url(base_url).build().await?;
    let chart = client.chart_data(selection).await?;

    println!(
        "{} {}-{} (scale {} .. {})",
        data_type, from, to, chart.scale.min, chart.scale.max
    );
    for (month, value) in MONTHS.iter().zip(chart.averages.iter()) {
        println!("{:>4} {:>8.2}", month, value);
    }

    client.shutdown().await;
    Ok(())
}
