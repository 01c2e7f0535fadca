use libr::{If97Water, LibrSolution, UnitSystem, WaterBackend};

/// State points of a single-effect LiBr/H₂O absorption chiller in
/// engineering units (°C, kPa, kJ/kg).
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Single-effect LiBr/H₂O chiller ===\n");

    let libr = LibrSolution::with_units(If97Water::new(), UnitSystem::engineering());
    let water = libr.backend();

    // ── Pressure levels from the refrigerant side ───────────────────
    let p_evap = water.saturation_pressure(5.0 + 273.15, 0.0)? / 1000.0;
    let p_cond = water.saturation_pressure(40.0 + 273.15, 0.0)? / 1000.0;
    println!("Evaporator  5 °C → {p_evap:.4} kPa");
    println!("Condenser  40 °C → {p_cond:.4} kPa\n");

    // ── Solution concentrations ─────────────────────────────────────
    let weak = libr.mass_fraction(35.0, p_evap)?;
    let strong = libr.mass_fraction(90.0, p_cond)?;
    println!("Absorber outlet  (35 °C): x = {:.4}  [{}]", weak.value, weak);
    println!("Generator outlet (90 °C): x = {:.4}  [{}]\n", strong.value, strong);

    // ── Generator inlet: weak solution starts boiling at ────────────
    let t_gen_in = libr.temperature(p_cond, weak.value)?;
    println!("Weak solution boils in the generator at {:.2} °C\n", t_gen_in.value);

    // ── Full property set at the absorber outlet ────────────────────
    let state = libr.props(35.0, weak.value)?;
    println!("Absorber outlet:\n{state}\n");

    // ── Strong solution after the heat exchanger, throttled ─────────
    let h_hx = libr.enthalpy(55.0, strong.value)?;
    let split = libr.flash(h_hx, p_evap, strong.value)?;
    println!("Throttled into absorber: {split}\n");

    // ── Crystallization margin ──────────────────────────────────────
    let report = libr.check_state_points([
        ("absorber outlet", 35.0, weak.value),
        ("generator outlet", 90.0, strong.value),
        ("HX strong outlet", 55.0, strong.value),
        ("absorber inlet", split.temperature, split.liquid_mass_fraction),
    ]);
    if report.is_ok() {
        println!("No state point crystallizes.");
    } else {
        for v in &report.violations {
            println!("!! {v}");
        }
    }
    if let Some(t_cryst) = libr.crystallization_temperature(strong.value) {
        println!("Strong solution crystallizes below {t_cryst:.2} °C");
    }

    Ok(())
}
