//! Site configuration and chart catalogue demonstration
//!
//! `cargo run -p uhi-site-config --example demo [config.toml|config.json]`

use uhi_site_config::{ChartSlot, ConfigParser, HeatmapGenerator, SiteConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Urban Heat Island Site Configuration Demo\n");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let format = ConfigParser::detect_format(&path)?;
            let content = std::fs::read_to_string(&path)?;
            SiteConfig::load(&content, format)?
        }
        None => SiteConfig::default(),
    };

    println!("Timing:");
    println!("  Chart init delay: {:?}", config.timing.chart_init_delay());
    println!("  Resize debounce: {:?}", config.timing.resize_debounce());
    println!("  Notification dismiss: {:?}", config.timing.notification_dismiss());
    println!("Reveal targets: {}", config.reveal.selector_list());
    println!(
        "Navbar: {} gains {} past {}px",
        config.navbar.selector, config.navbar.scrolled_class, config.navbar.scroll_threshold_px
    );
    println!();

    let mut heatmap = HeatmapGenerator::new(2024);
    println!("Chart catalogue:");
    for slot in ChartSlot::RESEARCH.iter().chain(ChartSlot::OVERVIEW.iter()) {
        let chart = slot.build(&mut heatmap);
        chart.validate()?;
        let title = chart
            .options
            .title
            .as_ref()
            .map(|t| t.text.as_str())
            .unwrap_or("-");
        println!(
            "  #{:<26} {:<9} {:>2} series {:>5} points  {}",
            slot.element_id(),
            chart.kind.as_str(),
            chart.series.len(),
            chart.point_count(),
            title
        );
    }

    println!("\nEffective configuration (TOML):");
    println!("{}", toml::to_string_pretty(&config)?);

    Ok(())
}
