//! # Terminal Adapter
//!
//! Maps CLI commands onto the pages of the record system: every
//! command first navigates the router to its page, which pushes the
//! computed title to the terminal, and then performs the page's API
//! work. The page functions take the resource seam and return plain
//! text so tests can run them against a stub without a backend.
//!
//! This is the only module that knows about crossterm.

use std::io::stdout;

use clap::{Args as ClapArgs, Subcommand};
use crossterm::execute;
use crossterm::terminal::SetTitle;
use log::info;

use crate::api::{ApiError, CarApi, CarRecord, CarResource};
use crate::core::config::ResolvedConfig;
use crate::core::format::{format_date_time, format_number};
use crate::core::router::Router;

/// What the user asked for. Each command belongs to one page of the
/// original three-page layout; `path` says which.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Overview of the record collection
    Home,
    /// Add a new car record
    Add {
        /// Brand name, e.g. 比亚迪
        brand: String,
        /// Model name, e.g. 海豹
        model: String,
        #[command(flatten)]
        details: CarDetailArgs,
    },
    /// List records, optionally filtered by brand
    List {
        #[arg(long)]
        brand: Option<String>,
        /// Print raw JSON instead of formatted columns
        #[arg(long)]
        json: bool,
    },
    /// Show one record in full
    Show {
        id: String,
        /// Print raw JSON instead of formatted fields
        #[arg(long)]
        json: bool,
    },
    /// Update fields of an existing record
    Edit {
        id: String,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[command(flatten)]
        details: CarDetailArgs,
    },
    /// Delete a record
    Remove { id: String },
}

/// The optional record fields shared by `add` and `edit`.
#[derive(ClapArgs, Debug, Default)]
pub struct CarDetailArgs {
    /// Fuel consumption in L/100km
    #[arg(long)]
    pub fuel_consumption: Option<f64>,
    #[arg(long)]
    pub fuel_type: Option<String>,
    /// Total mileage in km
    #[arg(long)]
    pub mileage: Option<f64>,
    /// Average yearly mileage in km
    #[arg(long)]
    pub annual_mileage: Option<f64>,
    #[arg(long)]
    pub storage_environment: Option<String>,
    /// May be given multiple times
    #[arg(long)]
    pub usage_scenario: Vec<String>,
    #[arg(long)]
    pub remarks: Option<String>,
}

impl Command {
    /// The client-side path this command navigates to before running.
    /// Record-level actions (`show`, `edit`, `remove`) belong to the
    /// list page.
    pub fn path(&self) -> &'static str {
        match self {
            Command::Home => "/",
            Command::Add { .. } => "/add",
            Command::List { .. }
            | Command::Show { .. }
            | Command::Edit { .. }
            | Command::Remove { .. } => "/list",
        }
    }
}

/// Runs one command to completion: navigate, call the backend, print.
pub async fn run(command: Command, config: &ResolvedConfig) -> Result<(), ApiError> {
    let mut router = Router::new(Box::new(|title: &str| {
        // The router only computes the title; the terminal mutation
        // belongs to this adapter.
        let _ = execute!(stdout(), SetTitle(title));
    }));

    let event = router.navigate(command.path());
    info!(
        "navigated to {} ({})",
        event.to.as_ref().map(|r| r.name).unwrap_or("?"),
        event.title
    );

    let api = CarApi::new(config.base_url.clone());
    let output = dispatch(command, &api, config).await?;
    println!("{output}");
    Ok(())
}

async fn dispatch(
    command: Command,
    api: &dyn CarResource,
    config: &ResolvedConfig,
) -> Result<String, ApiError> {
    match command {
        Command::Home => home_page(api).await,
        Command::Add {
            brand,
            model,
            details,
        } => {
            let mut car = CarRecord::new(brand, model);
            details.apply(&mut car);
            add_page(api, car).await
        }
        Command::List { brand, json } => list_page(api, brand.as_deref(), json, config).await,
        Command::Show { id, json } => show_page(api, &id, json, config).await,
        Command::Edit {
            id,
            brand,
            model,
            details,
        } => edit_page(api, &id, brand, model, details).await,
        Command::Remove { id } => remove_page(api, &id).await,
    }
}

impl CarDetailArgs {
    /// Copies every provided flag onto the record. Flags that were not
    /// given leave the record untouched, which is what makes `edit`
    /// merge instead of overwrite.
    fn apply(self, car: &mut CarRecord) {
        if self.fuel_consumption.is_some() {
            car.fuel_consumption = self.fuel_consumption;
        }
        if self.fuel_type.is_some() {
            car.fuel_type = self.fuel_type;
        }
        if self.mileage.is_some() {
            car.mileage = self.mileage;
        }
        if self.annual_mileage.is_some() {
            car.annual_mileage = self.annual_mileage;
        }
        if self.storage_environment.is_some() {
            car.storage_environment = self.storage_environment;
        }
        if !self.usage_scenario.is_empty() {
            car.usage_scenario = Some(self.usage_scenario);
        }
        if self.remarks.is_some() {
            car.remarks = self.remarks;
        }
    }
}

// ============================================================================
// Pages
// ============================================================================

async fn home_page(api: &dyn CarResource) -> Result<String, ApiError> {
    let cars = api.list_cars().await?;
    Ok(format!("车辆信息记录系统\n共 {} 条车辆记录", cars.len()))
}

async fn add_page(api: &dyn CarResource, car: CarRecord) -> Result<String, ApiError> {
    let created = api.create_car(&car).await?;
    Ok(format!(
        "已添加车辆: {} {} ({})",
        created.brand,
        created.model,
        created.id.as_deref().unwrap_or("-")
    ))
}

async fn list_page(
    api: &dyn CarResource,
    brand: Option<&str>,
    json: bool,
    config: &ResolvedConfig,
) -> Result<String, ApiError> {
    let cars = match brand {
        Some(b) => api.cars_by_brand(b).await?,
        None => api.list_cars().await?,
    };
    if json {
        return serde_json::to_string_pretty(&cars).map_err(|e| ApiError::Decode(e.to_string()));
    }
    if cars.is_empty() {
        return Ok("暂无车辆记录".to_string());
    }
    let lines: Vec<String> = cars.iter().map(|car| row(car, config)).collect();
    Ok(lines.join("\n"))
}

async fn show_page(
    api: &dyn CarResource,
    id: &str,
    json: bool,
    config: &ResolvedConfig,
) -> Result<String, ApiError> {
    let car = api.get_car(id).await?;
    if json {
        return serde_json::to_string_pretty(&car).map_err(|e| ApiError::Decode(e.to_string()));
    }
    let digits = config.number_digits;
    let text = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    let num = |v: Option<f64>| {
        let s = format_number(v, digits);
        if s.is_empty() { "-".to_string() } else { s }
    };
    let date = |v: Option<chrono::DateTime<chrono::Utc>>| {
        let s = format_date_time(v, &config.date_format);
        if s.is_empty() { "-".to_string() } else { s }
    };
    Ok(format!(
        "编号: {}\n品牌: {}\n车型: {}\n油耗: {} L/100km\n燃油类型: {}\n\
         行驶里程: {} km\n年均里程: {} km\n存放环境: {}\n使用场景: {}\n\
         备注: {}\n创建时间: {}\n更新时间: {}",
        text(&car.id),
        car.brand,
        car.model,
        num(car.fuel_consumption),
        text(&car.fuel_type),
        num(car.mileage),
        num(car.annual_mileage),
        text(&car.storage_environment),
        car.usage_scenario
            .as_deref()
            .map(|s| s.join(", "))
            .unwrap_or_else(|| "-".to_string()),
        text(&car.remarks),
        date(car.created_at),
        date(car.updated_at),
    ))
}

async fn edit_page(
    api: &dyn CarResource,
    id: &str,
    brand: Option<String>,
    model: Option<String>,
    details: CarDetailArgs,
) -> Result<String, ApiError> {
    // Fetch, merge the provided flags, put back. The form did the same.
    let mut car = api.get_car(id).await?;
    if let Some(brand) = brand {
        car.brand = brand;
    }
    if let Some(model) = model {
        car.model = model;
    }
    details.apply(&mut car);
    let updated = api.update_car(id, &car).await?;
    Ok(format!(
        "已更新车辆: {} {} ({id})",
        updated.brand, updated.model
    ))
}

async fn remove_page(api: &dyn CarResource, id: &str) -> Result<String, ApiError> {
    api.delete_car(id).await?;
    Ok(format!("已删除车辆: {id}"))
}

/// One list line: id, brand, model, mileage, created time.
fn row(car: &CarRecord, config: &ResolvedConfig) -> String {
    format!(
        "{:<18} {:<10} {:<12} {:>12} {}",
        car.id.as_deref().unwrap_or("-"),
        car.brand,
        car.model,
        format_number(car.mileage, config.number_digits),
        format_date_time(car.created_at, &config.date_format),
    )
}
