mod cli;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use vedro_core::{App, AppError};
use vedro_services::Mutation;
use vedro_ui::{CurrentView, ForecastView, HomeView, LocationView, Screens, ViewState};

use cli::{city_name, Args, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize core
    vedro_core::init()?;

    let app = match App::new() {
        Ok(app) => app,
        Err(e) => exit_with(&e),
    };
    {
        let theme = app.theme();
        let mut theme = theme.write();
        if let Some(units) = args.units {
            theme.set_units(units);
        }
        if args.dark {
            theme.set_dark(true);
        }
    }

    tracing::info!("Vedro started");

    let result = run(&app, &args).await;
    app.shutdown();
    if let Err(e) = result {
        exit_with(&e);
    }
    Ok(())
}

async fn run(app: &App, args: &Args) -> Result<(), AppError> {
    match &args.command {
        Command::Show { city } => {
            let Some(city) = required_city(city) else {
                return Ok(());
            };
            let home = Screens::new(app)?.home(city).await?;
            emit(args.json, &home, print_home)
        }
        Command::Here => {
            let view = Screens::new(app)?.here(&app.geolocator()).await;
            emit(args.json, &view, print_location)
        }
        Command::Favorites => {
            if app.favorites().lock().is_empty() {
                println!("No favorite cities yet. Add one with `vedro add <city>`.");
                return Ok(());
            }
            let cards = Screens::new(app)?.favorites().await;
            emit(args.json, &cards, |cards| cards.iter().for_each(print_card))
        }
        Command::Add { city } => {
            if let Some(city) = required_city(city) {
                let outcome = app.favorites().lock().add(city);
                print_mutation(city, outcome, "added to", "already in");
            }
            Ok(())
        }
        Command::Remove { city } => {
            if let Some(city) = required_city(city) {
                let outcome = app.favorites().lock().remove(city);
                print_mutation(city, outcome, "removed from", "not in");
            }
            Ok(())
        }
    }
}

fn required_city(raw: &str) -> Option<&str> {
    let city = city_name(raw);
    if city.is_none() {
        println!("City name is empty");
    }
    city
}

fn exit_with(e: &AppError) -> ! {
    tracing::error!("{}", e);
    eprintln!("{}", e.user_message());
    std::process::exit(1);
}

fn emit<T: Serialize>(json: bool, view: &T, print: impl FnOnce(&T)) -> Result<(), AppError> {
    if json {
        let text = serde_json::to_string_pretty(view).map_err(anyhow::Error::from)?;
        println!("{}", text);
    } else {
        print(view);
    }
    Ok(())
}

fn print_mutation(city: &str, outcome: Mutation, done: &str, unchanged: &str) {
    match outcome {
        Mutation::Persisted => println!("{} {} favorites", city, done),
        Mutation::NotPersisted => println!(
            "{} {} favorites for this session only; saving failed",
            city, done
        ),
        Mutation::Unchanged => println!("{} is {} favorites", city, unchanged),
    }
}

fn print_home(home: &HomeView) {
    match &home.current {
        ViewState::Ready(current) => print_current(current),
        ViewState::NoData { city } => print_no_data(city.as_deref()),
        ViewState::Empty => {}
    }
    if let Some(forecast) = &home.forecast {
        print_forecast(forecast);
    }
}

fn print_current(view: &CurrentView) {
    let heart = if view.is_favorite { " ♥" } else { "" };
    println!("{}{}", view.city, heart);
    println!(
        "  {}  {} [{}]",
        view.temperature_label,
        view.condition,
        view.icon.icon_name()
    );

    let details = [
        ("Feels like", &view.feels_like_label),
        ("Humidity", &view.humidity_label),
        ("Pressure", &view.pressure_label),
        ("Wind", &view.wind_label),
    ];
    for (label, value) in details {
        if let Some(value) = value {
            println!("  {:<11}{}", label, value);
        }
    }
}

fn print_forecast(forecast: &ForecastView) {
    if !forecast.hourly.is_empty() {
        println!();
        let strip: Vec<String> = forecast
            .hourly
            .iter()
            .map(|row| format!("{} {}", row.time, row.temperature_label))
            .collect();
        println!("  {}", strip.join("  "));
    }
    if !forecast.daily.is_empty() {
        println!();
        for row in &forecast.daily {
            println!(
                "  {} {}  {:>6} / {:<6} {}",
                row.weekday,
                row.date.format("%d.%m."),
                row.high_label,
                row.low_label,
                row.condition
            );
        }
    }
}

fn print_card(card: &ViewState<CurrentView>) {
    match card {
        ViewState::Ready(view) => println!(
            "{:<20} {:>6}  {}",
            view.city, view.temperature_label, view.condition
        ),
        ViewState::NoData { city } => print_no_data(city.as_deref()),
        ViewState::Empty => {}
    }
}

fn print_location(view: &LocationView) {
    match view {
        LocationView::PermissionDenied => println!("Location permission was denied."),
        LocationView::Unavailable => {
            println!("Location is not enabled. Set [location] in config.toml.")
        }
        LocationView::NoData => print_no_data(None),
        LocationView::Ready(current) => print_current(current),
    }
}

fn print_no_data(city: Option<&str>) {
    match city {
        Some(city) => println!("No data for {}", city),
        None => println!("No data available"),
    }
}
