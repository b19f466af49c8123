use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Neighborhood name, cluster center (lat, lon), price level multiplier.
const NEIGHBORHOODS: [(&str, f64, f64, f64); 6] = [
    ("OldTown", 42.030, -93.615, 0.85),
    ("NAmes", 42.045, -93.630, 0.95),
    ("Sawyer", 42.020, -93.660, 0.90),
    ("CollgCr", 42.015, -93.685, 1.10),
    ("NoRidge", 42.060, -93.650, 1.45),
    ("Edwards", 42.010, -93.670, 0.80),
];

fn gauss(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    // Box-Muller transform for normal distribution
    let u1: f64 = rng.gen_range(1e-12..1.0);
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);
    let output_path = "sample_sales.csv";

    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;
    writer
        .write_record([
            "Order",
            "SalePrice",
            "Gr Liv Area",
            "Year Built",
            "Neighborhood",
            "Lot Area",
            "Latitude",
            "Longitude",
            "Pool QC",
        ])
        .context("writing header")?;

    let rows = 400;
    for order in 0..rows {
        let (name, lat0, lon0, level) = NEIGHBORHOODS[rng.gen_range(0..NEIGHBORHOODS.len())];

        let year: i64 = rng.gen_range(1900..=2010);
        let area = gauss(&mut rng, 1500.0, 400.0).clamp(500.0, 4500.0);

        // Price driven by area and year with noise, scaled per neighborhood.
        let base = 20_000.0 + 90.0 * area + 450.0 * (year - 1900) as f64;
        let price = (base * level + gauss(&mut rng, 0.0, 15_000.0)).max(35_000.0);

        let lat = gauss(&mut rng, lat0, 0.004);
        let lon = gauss(&mut rng, lon0, 0.004);

        // Sparse columns: lot area occasionally missing, pool almost always.
        let lot_area = if rng.gen_bool(0.9) {
            format!("{}", rng.gen_range(4_000..20_000))
        } else {
            String::new()
        };
        let pool = if rng.gen_bool(0.03) { "Gd" } else { "" };

        writer
            .write_record([
                order.to_string(),
                format!("{price:.0}"),
                format!("{area:.0}"),
                year.to_string(),
                name.to_string(),
                lot_area,
                format!("{lat:.5}"),
                format!("{lon:.5}"),
                pool.to_string(),
            ])
            .with_context(|| format!("writing row {order}"))?;
    }

    writer.flush().context("flushing output")?;
    println!("Wrote {rows} synthetic sales to {output_path}");
    Ok(())
}
