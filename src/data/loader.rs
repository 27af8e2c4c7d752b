use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{Dataset, Record, Species, is_missing_token};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a penguins dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – palmerpenguins layout, `NA` or empty for missing values
/// * `.json`    – `[{ "species": "Adelie", "island": ..., ... }, ...]`
/// * `.parquet` – one column per field, nullable
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            read_csv(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            parse_json(&text)
        }
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} penguins from {} ({} islands)",
        dataset.len(),
        path.display(),
        dataset.islands().len()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with (at least) the columns
/// `species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex`.
/// `year` is optional; extra columns are ignored.
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    for required in ["species", "island"] {
        if !headers.iter().any(|h| h == required) {
            bail!("CSV missing '{required}' column");
        }
    }

    let records = reader
        .deserialize::<Record>()
        .enumerate()
        .map(|(row_no, row)| row.with_context(|| format!("CSV row {row_no}")))
        .collect::<Result<Vec<_>>>()?;

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "species": "Adelie",
///     "island": "Torgersen",
///     "bill_length_mm": 39.1,
///     "bill_depth_mm": null,
///     "sex": "male"
///   },
///   ...
/// ]
/// ```
pub fn parse_json(text: &str) -> Result<Dataset> {
    let records: Vec<Record> = serde_json::from_str(text).context("parsing JSON records")?;
    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing penguin rows.
///
/// Expected schema: `species` and `island` string columns (dictionary-encoded
/// categoricals are fine), numeric measurement columns of any width, optional
/// `sex` and `year`. Everything is cast to the target type first.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        append_batch(&batch, &mut records)?;
    }

    Ok(Dataset::from_records(records))
}

fn append_batch(batch: &RecordBatch, out: &mut Vec<Record>) -> Result<()> {
    let species = required_column(batch, "species", &DataType::Utf8)?;
    let island = required_column(batch, "island", &DataType::Utf8)?;
    let bill_length = optional_column(batch, "bill_length_mm", &DataType::Float64)?;
    let bill_depth = optional_column(batch, "bill_depth_mm", &DataType::Float64)?;
    let flipper = optional_column(batch, "flipper_length_mm", &DataType::Float64)?;
    let mass = optional_column(batch, "body_mass_g", &DataType::Float64)?;
    let sex = optional_column(batch, "sex", &DataType::Utf8)?;
    let year = optional_column(batch, "year", &DataType::Int64)?;

    let species = species.as_string::<i32>();
    let island = island.as_string::<i32>();

    for row in 0..batch.num_rows() {
        if species.is_null(row) {
            bail!("Row {row}: null species");
        }
        let sp: Species = species
            .value(row)
            .parse()
            .with_context(|| format!("Row {row}"))?;

        out.push(Record {
            species: sp,
            island: if island.is_null(row) {
                String::new()
            } else {
                island.value(row).to_string()
            },
            bill_length_mm: float_at(bill_length.as_ref(), row),
            bill_depth_mm: float_at(bill_depth.as_ref(), row),
            flipper_length_mm: float_at(flipper.as_ref(), row),
            body_mass_g: float_at(mass.as_ref(), row),
            sex: string_at(sex.as_ref(), row),
            year: year
                .as_ref()
                .filter(|col| !col.is_null(row))
                .map(|col| col.as_primitive::<Int64Type>().value(row)),
        });
    }
    Ok(())
}

// -- Parquet / Arrow helpers --

fn required_column(batch: &RecordBatch, name: &str, target: &DataType) -> Result<ArrayRef> {
    optional_column(batch, name, target)?
        .with_context(|| format!("Parquet file missing '{name}' column"))
}

/// Look up a column by name and cast it to `target`; `None` if absent.
fn optional_column(batch: &RecordBatch, name: &str, target: &DataType) -> Result<Option<ArrayRef>> {
    let Some(col) = batch.column_by_name(name) else {
        return Ok(None);
    };
    let cast_col = cast(col, target)
        .with_context(|| format!("column '{name}' ({:?}) is not {target:?}", col.data_type()))?;
    Ok(Some(cast_col))
}

fn float_at(col: Option<&ArrayRef>, row: usize) -> Option<f64> {
    let col = col?;
    if col.is_null(row) {
        return None;
    }
    let v = col.as_primitive::<Float64Type>().value(row);
    v.is_finite().then_some(v)
}

fn string_at(col: Option<&ArrayRef>, row: usize) -> Option<String> {
    let col = col?;
    if col.is_null(row) {
        return None;
    }
    let s = col.as_string::<i32>().value(row);
    (!is_missing_token(s)).then(|| s.to_string())
}

/// Load and wrap for sharing; used at startup and by File → Open….
pub fn load_shared(path: &Path) -> Result<Arc<Dataset>> {
    load_file(path).map(Arc::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{DictionaryArray, Float64Array, Int32Array, StringArray};
    use arrow::datatypes::{Field, Int32Type, Schema};
    use parquet::arrow::ArrowWriter;

    const PENGUINS_CSV: &str = "\
species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex,year
Adelie,Torgersen,39.1,18.7,181,3750,male,2007
Adelie,Torgersen,NA,NA,NA,NA,NA,2007
Gentoo,Biscoe,46.1,13.2,211,4500,female,2007
Chinstrap,Dream,46.5,17.9,192,3500,,2007
";

    #[test]
    fn csv_na_cells_become_missing() {
        let ds = read_csv(PENGUINS_CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 4);

        let first = &ds.records()[0];
        assert_eq!(first.species, Species::Adelie);
        assert_eq!(first.flipper_length_mm, Some(181.0));
        assert_eq!(first.sex.as_deref(), Some("male"));
        assert_eq!(first.year, Some(2007));

        let gap = &ds.records()[1];
        assert_eq!(gap.bill_length_mm, None);
        assert_eq!(gap.body_mass_g, None);
        assert_eq!(gap.sex, None);

        assert_eq!(ds.records()[3].sex, None);
    }

    #[test]
    fn csv_without_year_column_loads() {
        let text = "species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex\n\
                    Gentoo,Biscoe,50.0,15.2,218,5700,male\n";
        let ds = read_csv(text.as_bytes()).unwrap();
        assert_eq!(ds.records()[0].year, None);
    }

    #[test]
    fn csv_unknown_species_is_an_error() {
        let text = "species,island,bill_length_mm\nEmperor,Ross,100.0\n";
        let err = read_csv(text.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 0"), "{err:#}");
    }

    #[test]
    fn csv_missing_species_column_is_an_error() {
        let text = "island,bill_length_mm\nDream,40.0\n";
        assert!(read_csv(text.as_bytes()).is_err());
    }

    #[test]
    fn json_nulls_become_missing() {
        let text = r#"[
            {"species": "Adelie", "island": "Dream", "bill_length_mm": 36.7,
             "bill_depth_mm": null, "flipper_length_mm": 193, "body_mass_g": 3450,
             "sex": "female", "year": 2007},
            {"species": "Gentoo", "island": "Biscoe", "bill_length_mm": null,
             "sex": null}
        ]"#;
        let ds = parse_json(text).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].bill_depth_mm, None);
        assert_eq!(ds.records()[0].flipper_length_mm, Some(193.0));
        assert_eq!(ds.records()[1].bill_length_mm, None);
        assert_eq!(ds.records()[1].sex, None);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("penguins.xlsx")).unwrap_err();
        assert!(err.to_string().contains("Unsupported"));
    }

    #[test]
    fn parquet_with_categorical_species_and_int_mass() {
        let species: DictionaryArray<Int32Type> =
            vec!["Adelie", "Chinstrap"].into_iter().collect();
        let schema = Arc::new(Schema::new(vec![
            Field::new("species", species.data_type().clone(), false),
            Field::new("island", DataType::Utf8, false),
            Field::new("bill_length_mm", DataType::Float64, true),
            Field::new("body_mass_g", DataType::Int32, true),
            Field::new("sex", DataType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(species),
                Arc::new(StringArray::from(vec!["Torgersen", "Dream"])),
                Arc::new(Float64Array::from(vec![Some(39.1), None])),
                Arc::new(Int32Array::from(vec![Some(3750), Some(3500)])),
                Arc::new(StringArray::from(vec![Some("male"), None])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("penguins.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].body_mass_g, Some(3750.0));
        assert_eq!(ds.records()[1].species, Species::Chinstrap);
        assert_eq!(ds.records()[1].bill_length_mm, None);
        assert_eq!(ds.records()[1].sex, None);
        assert_eq!(ds.records()[1].bill_depth_mm, None);
    }
}
