//! Show the latest stored weather snapshot.

use colored::Colorize;

use rg_sync::Store;

pub fn run() -> Result<(), String> {
    let config = super::load_config()?;
    let store = super::open_store(&config)?;
    show(&store)
}

/// Render the latest weather snapshot from `store`.
pub fn show(store: &Store) -> Result<(), String> {
    let Some(snapshot) = store.latest_weather().map_err(|e| e.to_string())? else {
        super::print_missing("weather");
        return Ok(());
    };

    println!("{}", "  === WEATHER ===".cyan().bold());
    let place = [
        snapshot.location_name.as_deref(),
        snapshot.region.as_deref(),
        snapshot.country.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(", ");
    if !place.is_empty() {
        println!("  Location:   {place}");
    }
    if let Some(temp) = snapshot.temperature_c {
        println!("  Temp:       {temp:.1}°C");
    }
    if let Some(feels) = snapshot.feels_like_c {
        println!("  Feels like: {feels:.1}°C");
    }
    if let Some(wind) = snapshot.wind_kph {
        let dir = snapshot.wind_dir.as_deref().unwrap_or("");
        println!("  Wind:       {wind:.1} km/h {dir}");
    }
    if let Some(humidity) = snapshot.humidity {
        println!("  Humidity:   {humidity:.0}%");
    }
    if let Some(uv) = snapshot.uv_index {
        println!("  UV index:   {uv:.1}");
    }
    if let Some(updated) = snapshot.last_updated {
        println!("  As of:      {}", updated.format("%Y-%m-%d %H:%M UTC"));
    }
    Ok(())
}
