use libr::{
    Config, DomainPolicy, EnthalpyReference, FlashConfig, FlashResult, Quality, SolverConfig,
};

#[test]
fn defaults() {
    let config = Config::default();
    assert_eq!(config.solver.max_iterations, 100);
    assert_eq!(config.solver.residual_tolerance, 1e-9);
    assert_eq!(config.solver.temperature_bounds, (0.0, 647.0));
    assert_eq!(config.solver.mass_fraction_bounds, (0.0, 1.0));
    assert_eq!(config.flash.initial_quality, 0.1);
    assert_eq!(config.flash.tolerance, 1e-5);
    assert_eq!(config.flash.min_iterations, 5);
    assert_eq!(config.flash.max_iterations, 100);
    assert_eq!(config.reference, EnthalpyReference::Iapws);
    assert_eq!(config.domain, DomainPolicy::Warn);
}

#[test]
fn json_round_trip() {
    let config = Config::new()
        .solver(SolverConfig { max_iterations: 40, ..SolverConfig::default() })
        .flash(FlashConfig { tolerance: 1e-8, ..FlashConfig::default() })
        .reference(EnthalpyReference::Ambient)
        .domain(DomainPolicy::Reject);
    let json = serde_json::to_string(&config).unwrap();
    let back: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn partial_json_fills_defaults() {
    let config: Config = serde_json::from_str(
        r#"{ "domain": "reject", "solver": { "mass_fraction_bounds": [0.3, 0.75] } }"#,
    )
    .unwrap();
    assert_eq!(config.domain, DomainPolicy::Reject);
    assert_eq!(config.solver.mass_fraction_bounds, (0.3, 0.75));
    assert_eq!(config.solver.max_iterations, 100);
    assert_eq!(config.flash, FlashConfig::default());
}

#[test]
fn unknown_policy_is_rejected() {
    let err = serde_json::from_str::<Config>(r#"{ "domain": "panic" }"#);
    assert!(err.is_err());
}

#[test]
fn results_serialize() {
    let r = FlashResult {
        quality: Quality::Saturated(0.0146),
        temperature: 321.75,
        liquid_mass_fraction: 0.6089,
        iterations: 7,
    };
    let json = serde_json::to_value(r).unwrap();
    assert_eq!(json["quality"]["Saturated"], 0.0146);
    assert_eq!(json["iterations"], 7);

    let subcooled = serde_json::to_value(Quality::Subcooled).unwrap();
    assert_eq!(subcooled, "Subcooled");
}
