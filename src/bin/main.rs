use airfoil_algebra::airfoil::Surface;
use airfoil_algebra::{Naca4Profile, SamplingParams};
use std::error::Error;
use std::fs::File;
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let designation = args.next().unwrap_or_else(|| "2412".to_string());
    let params = match args.next() {
        Some(n) => SamplingParams::with_points(n.parse()?),
        None => SamplingParams::default(),
    };

    let profile = Naca4Profile::from_designation(&designation, &params)?;
    info!(profile = %profile.designation(), points = profile.len(), "generated");

    let (lower, upper) = profile.split();
    write_points(&upper, "upper.txt")?;
    write_points(&lower, "lower.txt")?;

    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

fn write_points(surface: &Surface, file_name: &str) -> std::io::Result<()> {
    let mut file = File::create(file_name)?;
    for p in surface.points().iter() {
        writeln!(file, "{}, {}", &p.x, &p.y)?;
    }

    Ok(())
}
