//! Human-readable rendering of results.

use archery_core::calculations::{ManufacturerRecommendation, SafetyCheck, SafetyStatus, SpineRecommendation};
use archery_core::configuration::ArrowConfiguration;
use archery_core::reference::{ComponentWeight, OverhangOption, ShaftData};
use archery_core::units::{Grains, GrainsPerInch, Inches, Pounds};

const RULE: &str = "═══════════════════════════════════════";

pub fn banner(title: &str) {
    println!("{}", RULE);
    println!("  {}", title);
    println!("{}", RULE);
}

fn status_icon(status: SafetyStatus) -> &'static str {
    match status {
        SafetyStatus::Safe => "[OK]",
        SafetyStatus::Warning => "[WARN]",
        SafetyStatus::Danger => "[DANGER]",
    }
}

fn inches(value: f64, metric: bool) -> String {
    if metric {
        format!("{:.2}\" ({:.1} cm)", value, Inches(value).cm())
    } else {
        format!("{:.2}\"", value)
    }
}

fn grains(value: f64, metric: bool) -> String {
    if metric {
        format!("{:.1} gr ({:.2} g)", value, Grains(value).grams())
    } else {
        format!("{:.1} gr", value)
    }
}

fn pounds(value: f64, metric: bool) -> String {
    if metric {
        format!("{:.1} lb ({:.1} kg)", value, Pounds(value).kg())
    } else {
        format!("{:.1} lb", value)
    }
}

fn grains_per_inch(value: f64, metric: bool) -> String {
    if metric {
        format!("{:.2} gpi ({:.3} g/cm)", value, GrainsPerInch(value).grams_per_cm())
    } else {
        format!("{:.2} gpi", value)
    }
}

pub fn print_spine(rec: &SpineRecommendation) {
    banner("SPINE RECOMMENDATION");
    println!();
    println!("  Material:    {}", rec.material);
    println!("  Recommended: {:.0}", rec.recommended);
    println!("  Range:       {:.0} - {:.0}", rec.min_spine, rec.max_spine);
    if !rec.notes.is_empty() {
        println!();
        println!("Notes:");
        for note in &rec.notes {
            println!("  - {}", note);
        }
    }
    println!();
}

pub fn print_manufacturers(recs: &[ManufacturerRecommendation]) {
    banner("MANUFACTURER CHARTS");
    println!();
    if recs.is_empty() {
        println!("  No chart covers this draw weight and point weight.");
        println!();
        return;
    }

    for rec in recs {
        println!(
            "  {:<12} {:<20} {:>5.0}  ({})",
            rec.manufacturer, rec.series, rec.recommended_spine, rec.confidence
        );
        for note in &rec.notes {
            println!("      {}", note);
        }
    }
    println!();
}

pub fn print_weight(config: &ArrowConfiguration, metric: bool) {
    banner("ARROW WEIGHT");
    println!();
    println!("Input:");
    println!("  Draw weight:  {}", pounds(config.draw_weight, metric));
    println!("  Arrow length: {}", inches(config.arrow_length, metric));
    println!("  Shaft:        {}", grains_per_inch(config.shaft_weight, metric));
    println!("  Point:        {}", grains(config.point_weight, metric));
    println!("  Nock:         {}", grains(config.nock_weight, metric));
    println!("  Fletching:    {}", grains(config.fletching_weight, metric));
    println!();
    println!("Result:");
    println!("  Total weight: {}", grains(config.total_weight, metric));
    println!("  GPP:          {:.2}", config.gpp);
    println!("  FOC:          {:.1}%", config.foc);
    println!();
}

pub fn print_optimal_point(point_weight: f64, target_gpp: f64, metric: bool) {
    banner("OPTIMAL POINT WEIGHT");
    println!();
    println!("  Target GPP:   {:.2}", target_gpp);
    println!("  Point weight: {}", grains(point_weight, metric));
    println!();
}

pub fn print_safety(check: &SafetyCheck) {
    banner("SAFETY CHECK");
    println!();
    println!(
        "  GPP ({:.2}):    {} {}",
        check.gpp.value,
        status_icon(check.gpp.status),
        check.gpp.message
    );
    println!(
        "  Arrow length: {} {}",
        status_icon(check.arrow_length.status),
        check.arrow_length.message
    );
    println!("  Spine:        {} {}", status_icon(check.spine.status), check.spine.message);
    println!();
    println!("{}", RULE);
    println!("  OVERALL: {}", check.overall.label().to_uppercase());
    println!("{}", RULE);
}

pub fn print_shafts<'a>(shafts: impl IntoIterator<Item = &'a ShaftData>) {
    println!("  {:<40} {:<9} {:>6} {:>6} {:>6}", "Name", "Material", "Spine", "GPI", "mm");
    for shaft in shafts {
        println!(
            "  {:<40} {:<9} {:>6.0} {:>6.1} {:>6.1}",
            shaft.name, shaft.material.display_name(), shaft.spine, shaft.weight_gpi, shaft.diameter_mm
        );
    }
}

pub fn print_components<'a>(components: impl IntoIterator<Item = &'a ComponentWeight>) {
    for component in components {
        println!("  {:<10} {:<36} {:>6.1} gr", component.category.display_name(), component.name, component.weight);
    }
}

pub fn print_overhangs(options: &[OverhangOption]) {
    for option in options {
        println!("  {:>4.2}\"  {:<16} {}", option.inches, option.label, option.description);
        println!("          {}", option.safety);
    }
}

pub fn print_configuration_list(configs: &[ArrowConfiguration]) {
    if configs.is_empty() {
        println!("No saved configurations.");
        return;
    }
    for config in configs {
        println!(
            "  {}  {:<24} {:>5.1} lb  spine {:>4.0}  {:>6.1} gr",
            config.id, config.name, config.draw_weight, config.spine_value, config.total_weight
        );
    }
}

pub fn print_configuration(config: &ArrowConfiguration, metric: bool) {
    banner(&config.name.to_uppercase());
    println!();
    println!("  Id:           {}", config.id);
    println!("  Draw weight:  {}", pounds(config.draw_weight, metric));
    println!("  Draw length:  {}", inches(config.draw_length, metric));
    println!("  Overhang:     {}", inches(config.overhang, metric));
    println!("  Arrow length: {}", inches(config.arrow_length, metric));
    println!("  Material:     {}", config.arrow_material);
    if let Some(name) = &config.shaft_name {
        println!("  Shaft:        {}", name);
    }
    println!("  Spine:        {:.0}", config.spine_value);
    println!("  Shaft weight: {}", grains_per_inch(config.shaft_weight, metric));
    println!("  Point:        {}", grains(config.point_weight, metric));
    println!("  Nock:         {}", grains(config.nock_weight, metric));
    println!("  Fletching:    {}", grains(config.fletching_weight, metric));
    println!();
    println!("  Total weight: {}", grains(config.total_weight, metric));
    println!("  GPP:          {:.2}", config.gpp);
    println!("  FOC:          {:.1}%", config.foc);
    println!();
}
