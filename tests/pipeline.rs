use approx::assert_relative_eq;
use physdemos::Funnel::funnel_drainage::{Funnel, frame_count};
use physdemos::Funnel::funnel_shapes::FunnelShape;
use physdemos::Population::population_data::load_population;
use physdemos::settings::{DemoConfig, FunnelConfig, PopulationConfig};
use std::path::PathBuf;
use tempfile::tempdir;

fn bundled_population() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("worlddata.csv")
}

#[test]
fn test_package_metadata() {
    assert!(!env!("CARGO_PKG_AUTHORS").is_empty());
    assert_eq!(env!("CARGO_PKG_NAME"), "physdemos");
}

#[test]
fn test_bundled_population_table() {
    let data = load_population(bundled_population(), &PopulationConfig::default()).unwrap();
    assert_eq!(data.len(), 13);
    assert_relative_eq!(data.years[0], 1800.0);
    assert_relative_eq!(data.population[4], 2_536_431_018.0);
    assert!(data.years.windows(2).all(|w| w[0] < w[1]));
    assert!(data.population.iter().all(|p| *p > 0.0));
}

#[test]
fn test_config_file_drives_funnel() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("physdemos.json");
    let mut config = DemoConfig::default();
    config.funnel.shapes = FunnelShape::parse_list("cylinder, cone").unwrap();
    config.funnel.resolution = 50;
    config.save(&path).unwrap();

    let loaded = DemoConfig::load(&path).unwrap();
    assert_eq!(loaded.funnel.shapes, vec![FunnelShape::Cylinder, FunnelShape::Cone]);
    let funnels: Vec<Funnel> = loaded
        .funnel
        .shapes
        .iter()
        .map(|s| Funnel::new(*s, &loaded.funnel).unwrap())
        .collect();
    let frames = frame_count(&funnels);
    assert!(frames > 1);
    for funnel in &funnels {
        let h = funnel.heights();
        assert_relative_eq!(h[0], loaded.funnel.height);
        assert!(h.windows(2).all(|w| w[1] < w[0] && w[1] > 0.0));
        // after the funnel ran dry the last height is repeated
        assert_relative_eq!(funnel.frame(frames + 10).height, *h.last().unwrap());
    }
}

#[test]
fn test_faster_outflow_drains_sooner() {
    let slow = FunnelConfig {
        resolution: 20,
        ..FunnelConfig::default()
    };
    let fast = FunnelConfig {
        alpha: 1.2,
        ..slow.clone()
    };
    let slow = Funnel::new(FunnelShape::Cylinder, &slow).unwrap();
    let fast = Funnel::new(FunnelShape::Cylinder, &fast).unwrap();
    assert!(fast.heights().len() < slow.heights().len());
}
