//! # AWJ Calculator CLI
//!
//! Terminal front end for `awj_core`.
//!
//! ## Usage
//!
//! ```text
//! awj_cli                 # prompt for parameters
//! awj_cli input.json      # read an AwjInput or a BatchRequest from a file
//! ```
//!
//! Cost rates and the arithmetic policy are read from the JSON file named by
//! `AWJ_SETTINGS` when it is set. Log verbosity follows `RUST_LOG` (default
//! `warn`), written to stderr.

use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use awj_core::calculations::batch::{run_batch, BatchRequest};
use awj_core::calculations::{advisories, AwjInput, AwjResult};
use awj_core::equations::cost_breakdown;
use awj_core::materials::{material_catalog, MaterialType, MeshSize};
use awj_core::record::CalculationRecord;
use awj_core::settings::CalculatorSettings;
use awj_core::{CalcError, CalcResult};
use tracing_subscriber::EnvFilter;

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input).ok()?;
    Some(input.trim().to_string())
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    prompt_line(prompt)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn prompt_material() -> CalcResult<MaterialType> {
    let keys: Vec<_> = material_catalog().into_iter().map(|(key, _)| key).collect();
    let prompt = format!("Material ({}) [steel]: ", keys.join(", "));
    match prompt_line(&prompt) {
        Some(s) if !s.is_empty() => MaterialType::from_key(&s),
        _ => Ok(MaterialType::Steel),
    }
}

fn prompt_mesh() -> f64 {
    let sizes: Vec<_> = MeshSize::ALL.iter().map(|m| m.display_name()).collect();
    println!("Abrasive grits: {}", sizes.join(", "));
    let default = MeshSize::default().mesh_number();
    let mesh = prompt_f64(&format!("Abrasive mesh [{:.0}]: ", default), default);
    if MeshSize::from_mesh_number(mesh).is_none() {
        println!("Note: {} mesh is not a catalog grit", mesh);
    }
    mesh
}

fn prompt_input() -> CalcResult<AwjInput> {
    let material = prompt_material()?;
    let thickness = prompt_f64("Thickness (mm) [10.0]: ", 10.0);
    let pressure = prompt_f64("Pressure (MPa) [300.0]: ", 300.0);
    let nozzle = prompt_f64("Nozzle diameter (mm) [0.33]: ", 0.33);
    let focus = prompt_f64("Focus tube diameter (mm) [1.0]: ", 1.0);
    let abrasive = prompt_f64("Abrasive flow (g/s) [8.0]: ", 8.0);
    let mesh = prompt_mesh();

    Ok(AwjInput::new(material.key(), thickness, pressure)
        .with_nozzle_diameter(nozzle)
        .with_focus_diameter(focus)
        .with_abrasive_flow(abrasive)
        .with_mesh_size(mesh))
}

fn load_settings() -> CalcResult<CalculatorSettings> {
    match env::var("AWJ_SETTINGS") {
        Ok(path) => CalculatorSettings::load(Path::new(&path)),
        Err(_) => Ok(CalculatorSettings::default()),
    }
}

fn read_file(path: &str) -> CalcResult<String> {
    fs::read_to_string(path).map_err(|e| CalcError::file_error("read", path, e.to_string()))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> CalcResult<()> {
    let settings = load_settings()?;

    println!("AWJ Calculator - Abrasive Waterjet Cutting Parameters");
    println!("=====================================================");
    println!();

    let input = match env::args().nth(1) {
        Some(path) => {
            let contents = read_file(&path)?;
            let value: serde_json::Value = serde_json::from_str(&contents)?;
            if value.get("base_parameters").is_some() {
                let request: BatchRequest = serde_json::from_value(value)?;
                return run_batch_file(&request, &settings);
            }
            serde_json::from_value(value)?
        }
        None => prompt_input()?,
    };

    for note in advisories(&input) {
        println!("Note: {}", note);
    }

    let record = CalculationRecord::compute(input, &settings)?;
    print_summary(&record.input, &record.result, &settings);

    println!();
    println!("JSON Output:");
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn run_batch_file(request: &BatchRequest, settings: &CalculatorSettings) -> CalcResult<()> {
    let batch = run_batch(request, settings)?;

    println!(
        "{:<14} {:>10} {:>10} {:>10} {:>8} {:>9}",
        "variant", "p [MPa]", "t [mm]", "v [mm/min]", "Ra [µm]", "cost [/m]"
    );
    for v in &batch.results {
        println!(
            "{:<14} {:>10.1} {:>10.1} {:>10.1} {:>8.2} {:>9.2}",
            v.variant,
            v.parameters.pressure_mpa,
            v.parameters.thickness_mm,
            v.results.cutting_speed_mm_min,
            v.results.surface_roughness_um,
            v.results.cost_per_meter
        );
    }
    if let (Some(fastest), Some(cheapest)) = (batch.fastest(), batch.cheapest()) {
        println!();
        println!("Fastest:  {}", fastest.variant);
        println!("Cheapest: {}", cheapest.variant);
    }

    println!();
    println!("JSON Output:");
    println!("{}", serde_json::to_string_pretty(&batch)?);
    Ok(())
}

fn print_summary(input: &AwjInput, result: &AwjResult, settings: &CalculatorSettings) {
    let material = MaterialType::from_record_key(&input.material).unwrap_or_default();
    let costs = cost_breakdown(
        input.abrasive_flow_gs,
        result.cutting_speed_mm_min,
        result.water_flow_lpm,
        result.hydraulic_power_kw,
        &settings.cost_rates,
    );

    println!();
    println!("═══════════════════════════════════════");
    println!("  AWJ CALCULATION RESULTS");
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Material:  {}", material);
    println!("  Thickness: {:.1} mm", input.thickness_mm);
    println!("  Pressure:  {:.0} MPa", input.pressure_mpa);
    println!(
        "  Nozzle:    {:.2} mm / focus {:.2} mm",
        input.nozzle_diameter_mm, input.focus_diameter_mm
    );
    println!("  Abrasive:  {:.1} g/s, {:.0} mesh", input.abrasive_flow_gs, input.mesh_size);
    println!();
    println!("Hydraulics:");
    println!("  Water flow      = {:.2} l/min", result.water_flow_lpm);
    println!("  Hydraulic power = {:.2} kW", result.hydraulic_power_kw);
    println!("  Jet velocity    = {:.1} m/s", result.extended.water_velocity_m_s);
    println!();
    println!("Cutting:");
    println!("  Speed     = {:.1} mm/min", result.cutting_speed_mm_min);
    println!("  Max depth = {:.2} mm", result.cut_depth_mm);
    println!("  Ra        = {:.2} µm", result.surface_roughness_um);
    println!();
    println!("Cost per meter:");
    println!("  Abrasive = {:.2}", costs.abrasive);
    println!("  Water    = {:.2}", costs.water);
    println!("  Energy   = {:.2}", costs.energy);
    println!("  Total    = {:.2}", result.cost_per_meter);
    println!("═══════════════════════════════════════");
}
