use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Per-species generation parameters: (mean, std dev) of each measurement.
struct SpeciesProfile {
    name: &'static str,
    count: usize,
    islands: &'static [&'static str],
    bill_length: (f64, f64),
    bill_depth: (f64, f64),
    flipper_length: (f64, f64),
    body_mass: (f64, f64),
}

const PROFILES: [SpeciesProfile; 3] = [
    SpeciesProfile {
        name: "Adelie",
        count: 152,
        islands: &["Torgersen", "Biscoe", "Dream"],
        bill_length: (38.8, 2.7),
        bill_depth: (18.3, 1.2),
        flipper_length: (190.0, 6.5),
        body_mass: (3700.0, 460.0),
    },
    SpeciesProfile {
        name: "Gentoo",
        count: 124,
        islands: &["Biscoe"],
        bill_length: (47.5, 3.1),
        bill_depth: (15.0, 1.0),
        flipper_length: (217.0, 6.5),
        body_mass: (5076.0, 504.0),
    },
    SpeciesProfile {
        name: "Chinstrap",
        count: 68,
        islands: &["Dream"],
        bill_length: (48.8, 3.3),
        bill_depth: (18.4, 1.1),
        flipper_length: (196.0, 7.1),
        body_mass: (3733.0, 384.0),
    },
];

/// Probability that a measurement row is missing entirely.
const MISSING_ROW_RATE: f64 = 0.01;
/// Probability that only `sex` is missing.
const MISSING_SEX_RATE: f64 = 0.03;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, (mean, std_dev): (f64, f64)) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

#[derive(Default)]
struct Columns {
    species: Vec<&'static str>,
    island: Vec<&'static str>,
    bill_length_mm: Vec<Option<f64>>,
    bill_depth_mm: Vec<Option<f64>>,
    flipper_length_mm: Vec<Option<f64>>,
    body_mass_g: Vec<Option<f64>>,
    sex: Vec<Option<&'static str>>,
    year: Vec<i64>,
}

fn round_to(v: f64, decimals: i32) -> f64 {
    let f = 10f64.powi(decimals);
    (v * f).round() / f
}

fn generate(rng: &mut SimpleRng) -> Columns {
    let mut cols = Columns::default();
    for profile in &PROFILES {
        for _ in 0..profile.count {
            let missing_row = rng.next_f64() < MISSING_ROW_RATE;
            let measure = |rng: &mut SimpleRng, params, decimals| {
                let v = rng.gauss(params);
                (!missing_row).then(|| round_to(v, decimals))
            };

            cols.species.push(profile.name);
            cols.island.push(rng.pick(profile.islands));
            cols.bill_length_mm.push(measure(rng, profile.bill_length, 1));
            cols.bill_depth_mm.push(measure(rng, profile.bill_depth, 1));
            cols.flipper_length_mm.push(measure(rng, profile.flipper_length, 0));
            cols.body_mass_g.push(measure(rng, profile.body_mass, -1));

            let sex = if rng.next_f64() < 0.5 { "male" } else { "female" };
            let sex_missing = missing_row || rng.next_f64() < MISSING_SEX_RATE;
            cols.sex.push((!sex_missing).then_some(sex));
            cols.year.push(2007 + (rng.next_u64() % 3) as i64);
        }
    }
    cols
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map_or_else(|| "NA".to_string(), |x| format!("{x}"))
}

fn write_csv(path: &str, cols: &Columns) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "species",
        "island",
        "bill_length_mm",
        "bill_depth_mm",
        "flipper_length_mm",
        "body_mass_g",
        "sex",
        "year",
    ])?;
    for i in 0..cols.species.len() {
        writer.write_record([
            cols.species[i].to_string(),
            cols.island[i].to_string(),
            fmt_opt(cols.bill_length_mm[i]),
            fmt_opt(cols.bill_depth_mm[i]),
            fmt_opt(cols.flipper_length_mm[i]),
            fmt_opt(cols.body_mass_g[i]),
            cols.sex[i].unwrap_or("NA").to_string(),
            cols.year[i].to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, cols: &Columns) -> anyhow::Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("species", DataType::Utf8, false),
        Field::new("island", DataType::Utf8, false),
        Field::new("bill_length_mm", DataType::Float64, true),
        Field::new("bill_depth_mm", DataType::Float64, true),
        Field::new("flipper_length_mm", DataType::Float64, true),
        Field::new("body_mass_g", DataType::Float64, true),
        Field::new("sex", DataType::Utf8, true),
        Field::new("year", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(cols.species.clone())),
            Arc::new(StringArray::from(cols.island.clone())),
            Arc::new(Float64Array::from(cols.bill_length_mm.clone())),
            Arc::new(Float64Array::from(cols.bill_depth_mm.clone())),
            Arc::new(Float64Array::from(cols.flipper_length_mm.clone())),
            Arc::new(Float64Array::from(cols.body_mass_g.clone())),
            Arc::new(StringArray::from(cols.sex.clone())),
            Arc::new(Int64Array::from(cols.year.clone())),
        ],
    )?;

    let file = std::fs::File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);
    let cols = generate(&mut rng);

    write_csv("penguins_sample.csv", &cols)?;
    write_parquet("penguins_sample.parquet", &cols)?;

    println!(
        "Wrote {} penguins to penguins_sample.csv and penguins_sample.parquet",
        cols.species.len()
    );
    Ok(())
}
